//! Dense linear solvers for NumPro Core.

pub mod gauss;
pub mod linalg;
pub mod trace;
