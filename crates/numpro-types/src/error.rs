use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumError {
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Matrix must be square: got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Singular pivot at row {row}: |{magnitude:e}| is below threshold {threshold:e}")]
    SingularPivot {
        row: usize,
        magnitude: f64,
        threshold: f64,
    },

    #[error(
        "Null space is not one-dimensional: column {column} is dependent past rank boundary {rank_boundary}"
    )]
    RankAssumptionViolated { rank_boundary: usize, column: usize },

    #[error("Elimination overflowed at step {step}: row {row} became non-finite")]
    EliminationOverflow { step: usize, row: usize },

    #[error("Non-finite input value at row={row}, col={col}")]
    NonFinite { row: usize, col: usize },

    #[error("Ranking cannot be normalised: {0}")]
    DegenerateRanking(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type NumResult<T> = Result<T, NumError>;
