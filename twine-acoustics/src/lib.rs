//! Thermoviscous loss models for wind-instrument bore simulation.
//!
//! A loss model turns a duct segment ([`Pipe`]) and a set of scaled angular
//! frequencies into two complex coefficients per frequency and position:
//! a flow loss added to the inertance and a pressure loss added to the
//! compliance of the telegraph equations. Models are selected from a
//! configuration tag with [`losses::losses_model`].

mod error;
mod scaling;

pub mod losses;
pub mod physics;
pub mod pipe;
pub mod special;

#[cfg(test)]
mod test_utils;

pub use error::LossError;
pub use losses::{LossSelection, LossesConfig, ModelKind, ThermoviscousModel, losses_model};
pub use physics::Physics;
pub use pipe::{ConicalPipe, Pipe};
pub use scaling::Scaling;
