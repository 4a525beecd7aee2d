// ─────────────────────────────────────────────────────────────────────
// NumPro Core — Elimination Trace
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Step-by-step observation of Gaussian elimination.
//!
//! The solvers in [`crate::gauss`] never print or log on their own.
//! Callers that want to follow pivot selection, the working matrix after
//! each elimination step, or the back-substitution sweep pass an
//! [`EliminationObserver`]. All methods default to no-ops.

use ndarray::ArrayView2;

use crate::gauss::Pivot;

/// Hook invoked by the elimination routines.
pub trait EliminationObserver {
    /// Pivot chosen for column `step` (before the row swap).
    fn pivot_selected(&mut self, _step: usize, _pivot: Pivot) {}

    /// Working matrix after the elimination below row `step`.
    fn step_completed(&mut self, _step: usize, _work: ArrayView2<'_, f64>) {}

    /// Best available pivot at `step` fell below the pseudo-zero threshold.
    fn rank_collapsed(&mut self, _step: usize, _pivot: Pivot) {}

    /// Back substitution resolved unknown `row`.
    fn row_substituted(&mut self, _row: usize, _value: f64) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EliminationObserver for NoopObserver {}

/// Forwards every event to `tracing`.
///
/// Pivots and collapses go out at DEBUG, the working matrix and each
/// substituted unknown at TRACE.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EliminationObserver for TracingObserver {
    fn pivot_selected(&mut self, step: usize, pivot: Pivot) {
        tracing::debug!(
            step,
            pivot_row = pivot.row,
            magnitude = pivot.magnitude,
            "pivot selected"
        );
    }

    fn step_completed(&mut self, step: usize, work: ArrayView2<'_, f64>) {
        tracing::trace!(step, matrix = %work, "elimination step completed");
    }

    fn rank_collapsed(&mut self, step: usize, pivot: Pivot) {
        tracing::debug!(
            rank_boundary = step,
            magnitude = pivot.magnitude,
            "pivot below pseudo-zero, stopping elimination"
        );
    }

    fn row_substituted(&mut self, row: usize, value: f64) {
        tracing::trace!(row, value, "back substitution");
    }
}

/// In-memory record of the pivot sequence.
#[derive(Debug, Clone, Default)]
pub struct PivotLog {
    /// `(step, pivot)` in the order the pivots were chosen.
    pub pivots: Vec<(usize, Pivot)>,
    /// Step at which elimination stopped on a degenerate pivot, if any.
    pub collapse: Option<usize>,
    /// Number of completed elimination steps.
    pub steps: usize,
    /// Number of back-substituted unknowns.
    pub substitutions: usize,
}

impl EliminationObserver for PivotLog {
    fn pivot_selected(&mut self, step: usize, pivot: Pivot) {
        self.pivots.push((step, pivot));
    }

    fn step_completed(&mut self, _step: usize, _work: ArrayView2<'_, f64>) {
        self.steps += 1;
    }

    fn rank_collapsed(&mut self, step: usize, _pivot: Pivot) {
        self.collapse = Some(step);
    }

    fn row_substituted(&mut self, _row: usize, _value: f64) {
        self.substitutions += 1;
    }
}

impl PivotLog {
    /// Pivot rows in selection order.
    pub fn rows(&self) -> Vec<usize> {
        self.pivots.iter().map(|(_, p)| p.row).collect()
    }
}
