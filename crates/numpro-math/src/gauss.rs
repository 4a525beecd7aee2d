// ─────────────────────────────────────────────────────────────────────
// NumPro Core — Gauss
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense Gaussian elimination with partial pivoting.
//!
//! - [`back_substitute`]: upper-triangular solve `R x = b`.
//! - [`solve`]: general non-singular `A x = b`.
//! - [`solve_sing`]: non-zero `p` with `A p ≈ 0` for a matrix whose null
//!   space is one-dimensional.
//!
//! Every routine borrows its inputs and works on private copies; the
//! caller's matrix and vector are never modified.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use numpro_types::config::SolverConfig;
use numpro_types::error::{NumError, NumResult};

use crate::trace::{EliminationObserver, NoopObserver};

/// Pivot candidate: row index and absolute value in the pivot column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub row: usize,
    pub magnitude: f64,
}

/// Result of a singular reduction.
#[derive(Debug, Clone)]
pub struct NullSpace {
    /// Null-space vector `p`. All zeros when the matrix was non-singular.
    pub vector: Array1<f64>,
    /// Step `Tn` at which the pivot collapsed; `p[Tn] == 1` and
    /// `p[i] == 0` for `i > Tn`. `None` when elimination ran to completion.
    pub rank_boundary: Option<usize>,
}

/// Terminal state of the elimination loop.
#[derive(Debug, Clone, Copy)]
enum Reduction {
    /// Every step found a usable pivot.
    Reduced,
    /// Stopped at `rank_boundary` on a degenerate pivot.
    Truncated { rank_boundary: usize, pivot: Pivot },
}

// ───────────────────────────── validation ────────────────────────────

#[inline]
fn is_pseudo_zero(value: f64, eps: f64) -> bool {
    value == 0.0 || value.abs() < eps
}

fn ensure_square(a: &Array2<f64>) -> NumResult<usize> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(NumError::NotSquare { rows, cols });
    }
    Ok(rows)
}

fn ensure_finite_matrix(a: &Array2<f64>) -> NumResult<()> {
    match a.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), _)) => Err(NumError::NonFinite { row, col }),
        None => Ok(()),
    }
}

fn ensure_finite_vector(b: &Array1<f64>) -> NumResult<()> {
    match b.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(NumError::NonFinite { row, col: 0 }),
        None => Ok(()),
    }
}

// ───────────────────────────── elimination ───────────────────────────

/// Largest-magnitude entry of column `col` among rows `start..`.
///
/// Comparison is strict, so on ties the lowest row index wins.
pub fn select_pivot(work: &Array2<f64>, start: usize, col: usize) -> Pivot {
    let mut best = Pivot {
        row: start,
        magnitude: work[[start, col]].abs(),
    };
    for s in start + 1..work.nrows() {
        let magnitude = work[[s, col]].abs();
        if magnitude > best.magnitude {
            best = Pivot { row: s, magnitude };
        }
    }
    best
}

fn swap_rows(work: &mut Array2<f64>, a: usize, b: usize) {
    if a == b {
        return;
    }
    for c in 0..work.ncols() {
        work.swap([a, c], [b, c]);
    }
}

/// Subtract multiples of row `row` from every row below it so that
/// column `col` vanishes under the pivot. Columns `< col` are untouched.
///
/// Returns the first updated row that overflowed to a non-finite value.
fn eliminate_below(
    work: &mut Array2<f64>,
    mut rhs: Option<&mut Array1<f64>>,
    row: usize,
    col: usize,
) -> Option<usize> {
    let pivot = work[[row, col]];
    for s in row + 1..work.nrows() {
        let factor = work[[s, col]] / pivot;
        if factor == 0.0 {
            continue;
        }
        let mut finite = factor.is_finite();
        for i in col..work.ncols() {
            work[[s, i]] -= factor * work[[row, i]];
            finite &= work[[s, i]].is_finite();
        }
        if let Some(b) = rhs.as_deref_mut() {
            b[s] -= factor * b[row];
            finite &= b[s].is_finite();
        }
        if !finite {
            return Some(s);
        }
    }
    None
}

/// Run up to `steps` pivot-and-eliminate steps on `work` (and `rhs`).
fn reduce(
    work: &mut Array2<f64>,
    mut rhs: Option<&mut Array1<f64>>,
    steps: usize,
    eps: f64,
    observer: &mut dyn EliminationObserver,
) -> NumResult<Reduction> {
    for k in 0..steps {
        let pivot = select_pivot(work, k, k);
        if is_pseudo_zero(pivot.magnitude, eps) {
            observer.rank_collapsed(k, pivot);
            return Ok(Reduction::Truncated {
                rank_boundary: k,
                pivot,
            });
        }
        observer.pivot_selected(k, pivot);

        swap_rows(work, k, pivot.row);
        if let Some(b) = rhs.as_deref_mut() {
            b.swap(k, pivot.row);
        }

        if let Some(row) = eliminate_below(work, rhs.as_deref_mut(), k, k) {
            return Err(NumError::EliminationOverflow { step: k, row });
        }
        observer.step_completed(k, work.view());
    }
    Ok(Reduction::Reduced)
}

/// Back substitution over the upper triangle of `r`.
fn substitute(
    r: ArrayView2<'_, f64>,
    b: ArrayView1<'_, f64>,
    eps: f64,
    observer: &mut dyn EliminationObserver,
) -> NumResult<Array1<f64>> {
    let n = b.len();
    let mut x = Array1::zeros(n);

    for i in (0..n).rev() {
        let diag = r[[i, i]];
        if is_pseudo_zero(diag, eps) {
            return Err(NumError::SingularPivot {
                row: i,
                magnitude: diag.abs(),
                threshold: eps,
            });
        }

        let mut acc = b[i];
        for j in i + 1..n {
            acc -= r[[i, j]] * x[j];
        }
        let xi = acc / diag;
        // Overflow on a tiny but admissible pivot.
        if !xi.is_finite() {
            return Err(NumError::SingularPivot {
                row: i,
                magnitude: diag.abs(),
                threshold: eps,
            });
        }

        x[i] = xi;
        observer.row_substituted(i, xi);
    }

    Ok(x)
}

/// After truncation at `tn`, the columns right of `tn` must stay
/// independent; otherwise the null space has dimension >= 2.
fn check_trailing_rank(work: &Array2<f64>, tn: usize, eps: f64) -> NumResult<()> {
    let n = work.nrows();
    if tn + 1 >= n {
        return Ok(());
    }

    let mut trailing = work.slice(s![tn.., tn + 1..]).to_owned();
    for c in 0..trailing.ncols() {
        let pivot = select_pivot(&trailing, c, c);
        if is_pseudo_zero(pivot.magnitude, eps) {
            return Err(NumError::RankAssumptionViolated {
                rank_boundary: tn,
                column: tn + 1 + c,
            });
        }
        swap_rows(&mut trailing, c, pivot.row);
        if let Some(row) = eliminate_below(&mut trailing, None, c, c) {
            return Err(NumError::EliminationOverflow {
                step: tn + 1 + c,
                row: tn + row,
            });
        }
    }
    Ok(())
}

// ─────────────────────────────── public API ──────────────────────────

/// Solve `R x = b` for upper-triangular `R` with default tolerances.
///
/// Entries below the diagonal of `R` are ignored.
pub fn back_substitute(r: &Array2<f64>, b: &Array1<f64>) -> NumResult<Array1<f64>> {
    back_substitute_with(r, b, &SolverConfig::default(), &mut NoopObserver)
}

/// Solve `R x = b` for upper-triangular `R`.
///
/// Fails with [`NumError::SingularPivot`] on the first (bottom-up)
/// diagonal entry below `config.pseudo_zero`.
pub fn back_substitute_with(
    r: &Array2<f64>,
    b: &Array1<f64>,
    config: &SolverConfig,
    observer: &mut dyn EliminationObserver,
) -> NumResult<Array1<f64>> {
    config.validate()?;
    let n = ensure_square(r)?;
    if b.len() != n {
        return Err(NumError::DimensionMismatch {
            context: "back_substitute right-hand side",
            expected: n,
            actual: b.len(),
        });
    }
    ensure_finite_matrix(r)?;
    ensure_finite_vector(b)?;

    substitute(r.view(), b.view(), config.pseudo_zero, observer)
}

/// Solve the non-singular system `A x = b` with default tolerances.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> NumResult<Array1<f64>> {
    solve_with(a, b, &SolverConfig::default(), &mut NoopObserver)
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
///
/// For steps `k = 0..n-1` the row with the largest `|A[s][k]|`, `s >= k`,
/// is swapped into place and eliminated below. A pivot column that is
/// entirely below `config.pseudo_zero` fails with
/// [`NumError::SingularPivot`]; use [`solve_sing`] for singular matrices.
pub fn solve_with(
    a: &Array2<f64>,
    b: &Array1<f64>,
    config: &SolverConfig,
    observer: &mut dyn EliminationObserver,
) -> NumResult<Array1<f64>> {
    config.validate()?;
    let n = ensure_square(a)?;
    if b.len() != n {
        return Err(NumError::DimensionMismatch {
            context: "solve right-hand side",
            expected: n,
            actual: b.len(),
        });
    }
    ensure_finite_matrix(a)?;
    ensure_finite_vector(b)?;

    let eps = config.pseudo_zero;
    let mut work = a.to_owned();
    let mut rhs = b.to_owned();

    match reduce(&mut work, Some(&mut rhs), n.saturating_sub(1), eps, observer)? {
        Reduction::Truncated {
            rank_boundary,
            pivot,
        } => Err(NumError::SingularPivot {
            row: rank_boundary,
            magnitude: pivot.magnitude,
            threshold: eps,
        }),
        Reduction::Reduced => substitute(work.view(), rhs.view(), eps, observer),
    }
}

/// Null-space vector of a corank-1 matrix with default tolerances.
///
/// Returns the zero vector when `A` turns out to be non-singular.
pub fn solve_sing(a: &Array2<f64>) -> NumResult<Array1<f64>> {
    solve_sing_detailed(a, &SolverConfig::default(), &mut NoopObserver).map(|ns| ns.vector)
}

/// Find `p != 0` with `A p ≈ 0` for a matrix with a one-dimensional
/// null space.
///
/// Elimination stops at the first step `Tn` whose best pivot is below
/// `config.pseudo_zero`. The leading `Tn x Tn` block `T` is then solved
/// against `v = -A[..Tn, Tn]` and the result assembled as
/// `(x_0, .., x_{Tn-1}, 1, 0, .., 0)`.
///
/// If the trailing columns past `Tn` are themselves dependent, the null
/// space is larger than one dimension and
/// [`NumError::RankAssumptionViolated`] is returned.
pub fn solve_sing_detailed(
    a: &Array2<f64>,
    config: &SolverConfig,
    observer: &mut dyn EliminationObserver,
) -> NumResult<NullSpace> {
    config.validate()?;
    let n = ensure_square(a)?;
    ensure_finite_matrix(a)?;

    let eps = config.pseudo_zero;
    let mut work = a.to_owned();

    let tn = match reduce(&mut work, None, n, eps, observer)? {
        Reduction::Reduced => {
            return Ok(NullSpace {
                vector: Array1::zeros(n),
                rank_boundary: None,
            })
        }
        Reduction::Truncated { rank_boundary, .. } => rank_boundary,
    };

    check_trailing_rank(&work, tn, eps)?;

    let t = work.slice(s![..tn, ..tn]);
    let v = work.slice(s![..tn, tn]).mapv(|x| -x);
    let x = substitute(t, v.view(), eps, observer)?;

    let mut p = Array1::zeros(n);
    p.slice_mut(s![..tn]).assign(&x);
    p[tn] = 1.0;

    Ok(NullSpace {
        vector: p,
        rank_boundary: Some(tn),
    })
}
