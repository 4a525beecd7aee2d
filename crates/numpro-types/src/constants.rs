// ─────────────────────────────────────────────────────────────────────
// NumPro Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Pseudo-zero threshold: pivots with magnitude below this are treated as
/// exactly zero when detecting rank collapse.
pub const PSEUDO_ZERO: f64 = 1e-10;

/// Default PageRank teleport probability (rho).
pub const DEFAULT_DAMPING: f64 = 0.15;
