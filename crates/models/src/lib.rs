//! Models for the `descent` problems.
//!
//! - [`brachistochrone`] — rates of a frictionless bead sliding on a wire
//!   under gravity, with closed-form sparse partials
//! - [`paraboloid`] — a two-variable quadratic objective with one linear
//!   constraint

pub mod brachistochrone;
pub mod paraboloid;
