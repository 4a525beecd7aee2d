// ─────────────────────────────────────────────────────────────────────
// NumPro Core — PageRank
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PageRank as the null space of `Ã − I`.
//!
//! `L[i][j] == 1` means node `j` links to node `i`. The transition matrix
//! is `Ã[i][j] = (1 − ρ)·L[i][j]/outdeg(j) + ρ/n`; its stationary vector
//! solves `(Ã − I) p = 0` and is normalised to sum to one.

use ndarray::{Array1, Array2};
use numpro_math::gauss::solve_sing_detailed;
use numpro_math::trace::{EliminationObserver, NoopObserver};
use numpro_types::config::{RankingConfig, SolverConfig};
use numpro_types::error::{NumError, NumResult};

/// A labelled node with its normalised score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage {
    pub label: String,
    pub score: f64,
}

fn ensure_link_matrix(links: &Array2<u8>) -> NumResult<usize> {
    let (rows, cols) = links.dim();
    if rows != cols {
        return Err(NumError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Build the damped transition matrix `Ã`.
///
/// Nodes without outgoing links keep only the teleport term `ρ/n` in
/// their column.
pub fn build_transition_matrix(links: &Array2<u8>, rho: f64) -> NumResult<Array2<f64>> {
    RankingConfig { damping: rho }.validate()?;
    let n = ensure_link_matrix(links)?;

    let out_degree: Vec<usize> = links
        .columns()
        .into_iter()
        .map(|col| col.iter().filter(|&&l| l == 1).count())
        .collect();

    let teleport = if n > 0 { rho / n as f64 } else { 0.0 };
    let mut a = Array2::from_elem((n, n), teleport);
    for ((i, j), &l) in links.indexed_iter() {
        if l == 1 {
            a[[i, j]] += (1.0 - rho) / out_degree[j] as f64;
        }
    }
    Ok(a)
}

/// Normalised PageRank vector with default solver tolerances.
pub fn rank(links: &Array2<u8>, rho: f64) -> NumResult<Array1<f64>> {
    rank_with(links, rho, &SolverConfig::default(), &mut NoopObserver)
}

/// Normalised PageRank vector.
///
/// Fails with [`NumError::DegenerateRanking`] when the reduction finds
/// no null vector or its entries sum to zero.
pub fn rank_with(
    links: &Array2<u8>,
    rho: f64,
    config: &SolverConfig,
    observer: &mut dyn EliminationObserver,
) -> NumResult<Array1<f64>> {
    let mut system = build_transition_matrix(links, rho)?;
    let n = system.nrows();
    for i in 0..n {
        system[[i, i]] -= 1.0;
    }

    let ns = solve_sing_detailed(&system, config, observer)?;
    let Some(rank_boundary) = ns.rank_boundary else {
        return Err(NumError::DegenerateRanking(
            "transition matrix minus identity is non-singular".to_string(),
        ));
    };

    let total: f64 = ns.vector.sum();
    if !total.is_finite() || total.abs() < config.pseudo_zero {
        return Err(NumError::DegenerateRanking(format!(
            "null vector sums to {total:e}"
        )));
    }

    tracing::debug!(nodes = n, rank_boundary, rho, "stationary vector computed");
    Ok(ns.vector / total)
}

/// Labels paired with their scores, sorted by descending score.
///
/// The sort is stable: equal scores keep their input order.
pub fn ranked_pages<S: AsRef<str>>(
    labels: &[S],
    links: &Array2<u8>,
    rho: f64,
) -> NumResult<Vec<RankedPage>> {
    let n = ensure_link_matrix(links)?;
    if labels.len() != n {
        return Err(NumError::DimensionMismatch {
            context: "ranked_pages labels",
            expected: n,
            actual: labels.len(),
        });
    }

    let scores = rank(links, rho)?;
    let mut pages: Vec<RankedPage> = labels
        .iter()
        .zip(scores.iter())
        .map(|(label, &score)| RankedPage {
            label: label.as_ref().to_string(),
            score,
        })
        .collect();
    pages.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(pages)
}

/// Labels ordered by descending PageRank.
pub fn sorted_labels<S: AsRef<str>>(
    labels: &[S],
    links: &Array2<u8>,
    rho: f64,
) -> NumResult<Vec<String>> {
    Ok(ranked_pages(labels, links, rho)?
        .into_iter()
        .map(|page| page.label)
        .collect())
}
