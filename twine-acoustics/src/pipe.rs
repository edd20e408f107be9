//! The duct segment a loss model is evaluated on.

mod conical;

use std::f64::consts::PI;

use ndarray::Array1;

use crate::{
    Scaling,
    physics::{Coef, Physics},
};

pub use conical::ConicalPipe;

/// An acoustic duct segment seen by the loss models.
///
/// Positions `x` are normalized along the pipe, `0` at its entry and `1` at
/// its exit. Every accessor returns one value per position.
///
/// Implementors provide the geometry, the air physics and the scaling; the
/// dimensionless propagation coefficients and their derivatives are derived
/// from those by the provided methods.
///
/// The propagation coefficients are chosen so that the series impedance and
/// the shunt admittance per unit of normalized length read
/// `Z = jω(coef_flow + losses_flow)` and `Y = jω(coef_pressure + losses_pressure)`.
pub trait Pipe {
    /// Returns the air physics inside the pipe.
    fn physics(&self) -> &Physics;

    /// Returns the scaling used for the dimensionless coefficients.
    fn scaling(&self) -> &Scaling;

    /// Returns the physical length of the pipe in metres.
    fn length(&self) -> f64;

    /// Returns the radius in metres.
    fn radius_at(&self, x: &Array1<f64>) -> Array1<f64>;

    /// Returns the conicity `dr/dℓ`, the tangent of the local half-angle.
    fn conicity_at(&self, x: &Array1<f64>) -> Array1<f64>;

    /// Returns the derivative of the radius with respect to design parameter `diff_index`.
    ///
    /// Parameters the pipe does not depend on yield zeros.
    fn diff_radius_at(&self, x: &Array1<f64>, diff_index: usize) -> Array1<f64>;

    /// Returns the cross-section area `S = πr²`.
    fn section_at(&self, x: &Array1<f64>) -> Array1<f64> {
        self.radius_at(x).mapv(|r| PI * r * r)
    }

    /// Returns the dimensionless inertance per unit length, `ρ/S`.
    fn coef_flow_at(&self, x: &Array1<f64>) -> Array1<f64> {
        let [rho] = self.physics().coefs_at(x, [Coef::Rho]);
        let scale = self.length() / self.scaling().inertance();
        rho / self.section_at(x) * scale
    }

    /// Returns the dimensionless compliance per unit length, `S/(ρc²)`.
    fn coef_pressure_at(&self, x: &Array1<f64>) -> Array1<f64> {
        let [rho, c] = self.physics().coefs_at(x, [Coef::Rho, Coef::C]);
        let scale = self.length() / self.scaling().compliance();
        self.section_at(x) / (rho * &c * &c) * scale
    }

    /// Returns the derivative of [`Pipe::coef_flow_at`] with respect to design
    /// parameter `diff_index`.
    fn diff_coef_flow_at(&self, x: &Array1<f64>, diff_index: usize) -> Array1<f64> {
        let radius = self.radius_at(x);
        let diff_radius = self.diff_radius_at(x, diff_index);
        -2.0 * self.coef_flow_at(x) * diff_radius / radius
    }

    /// Returns the derivative of [`Pipe::coef_pressure_at`] with respect to
    /// design parameter `diff_index`.
    fn diff_coef_pressure_at(&self, x: &Array1<f64>, diff_index: usize) -> Array1<f64> {
        let radius = self.radius_at(x);
        let diff_radius = self.diff_radius_at(x, diff_index);
        2.0 * self.coef_pressure_at(x) * diff_radius / radius
    }
}
