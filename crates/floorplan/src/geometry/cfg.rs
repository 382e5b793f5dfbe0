//! Tolerance defaults for plan geometry (internal).
//!
//! Policy
//! - Defaults are fixed constants. Coordinates are expected in drawing units
//!   (centimetres in the standard catalog), so an absolute point tolerance is
//!   adequate; parametric tolerances are derived from it per segment length.

/// Coordinate equality and perpendicular-distance tolerance.
pub const POINT_EPS: f64 = 1e-6;
/// Relative tolerance for the parallelism test `|r × s| <= DET_EPS·|r|·|s|`.
pub const DET_EPS: f64 = 1e-10;
/// Faces with smaller absolute signed area are treated as degenerate.
pub const AREA_EPS: f64 = 1e-9;
