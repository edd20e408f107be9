//! Special functions of complex argument used by the loss models.
//!
//! - [`jve`]: exponentially scaled Bessel functions of the first kind.
//! - [`legendre_ratio`]: the logarithmic derivative of a Legendre function
//!   of complex degree, written as a ratio of hypergeometric functions
//!   (feature `spherical-harmonics`).

mod bessel;
#[cfg(feature = "spherical-harmonics")]
mod legendre;

pub use bessel::jve;
#[cfg(feature = "spherical-harmonics")]
pub use legendre::legendre_ratio;
