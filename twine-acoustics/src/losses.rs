//! Thermoviscous loss models.
//!
//! Every model implements [`ThermoviscousModel`]. Given a [`Pipe`], the
//! normalized positions `x` and the scaled angular frequencies `ω̃`, a model
//! returns the flow loss `Lossesᵤ` and the pressure loss `Lossesₚ` on the
//! `(ω̃.len(), x.len())` grid, such that the series impedance and the shunt
//! admittance per normalized length are
//!
//! ```text
//! Z = jω̃ (coef_flow + Lossesᵤ)
//! Y = jω̃ (coef_pressure + Lossesₚ)
//! ```
//!
//! A model is passive when both losses have a non-positive imaginary part.
//!
//! | model                         | flow | pressure | derivatives |
//! |-------------------------------|------|----------|-------------|
//! | [`Lossless`]                  | 0    | 0        | 0           |
//! | [`Bessel`]                    | ✓    | ✓        | geometric radius only |
//! | [`Keefe`]                     | ✓    | ✓        | ✓           |
//! | [`MiniKeefe`]                 | ✓    | ✓        |             |
//! | [`DiffusiveRepresentation`]   | ✓    | ✓        |             |
//! | [`WebsterLokshin`]            | 0    | ✓        |             |
//! | [`SphericalHarmonics`]        | ✓    | ✓        |             |

mod bessel;
mod diffusive;
mod factory;
mod keefe;
mod lossless;
mod spherical_harmonics;
mod webster_lokshin;

use std::fmt;

use ndarray::{Array1, Array2, Axis, Zip};
use num_complex::Complex64;

use crate::{LossError, pipe::Pipe};

pub use bessel::Bessel;
pub use diffusive::{
    AVAILABLE_ORDERS, DiffReprCoefficients, DiffusiveRepresentation, ThermalBranches,
    ViscousBranches,
};
pub use factory::{LossSelection, LossesConfig, losses_model};
pub use keefe::{Keefe, MiniKeefe};
pub use lossless::Lossless;
pub use spherical_harmonics::SphericalHarmonics;
pub use webster_lokshin::WebsterLokshin;

/// Half-angle, in radians, below which a duct is treated as cylindrical.
pub const HYDRAULIC_RADIUS_THRESHOLD: f64 = 1e-4;

/// Identifies a concrete loss model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Lossless,
    Bessel,
    Keefe,
    MiniKeefe,
    DiffusiveRepresentation,
    WebsterLokshin,
    SphericalHarmonics,
}

impl ModelKind {
    /// Returns a short human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lossless => "lossless",
            Self::Bessel => "bessel",
            Self::Keefe => "keefe",
            Self::MiniKeefe => "minikeefe",
            Self::DiffusiveRepresentation => "diffrepr",
            Self::WebsterLokshin => "webster-lokshin",
            Self::SphericalHarmonics => "spherical harmonics",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A frequency-domain thermoviscous loss model.
///
/// All operations are pure: they neither mutate the pipe nor the model, so a
/// single model can be shared across threads.
///
/// Results are shaped `(omegas_scaled.len(), x.len())`, except for models
/// that are identically zero, which may return a `1×1` array meant to be
/// broadcast against that grid.
///
/// The scaled frequencies must be strictly positive. A zero frequency is not
/// rejected: the lossy models return non-finite values (`NaN` or `±inf`) in
/// the matching row instead of an error.
pub trait ThermoviscousModel: fmt::Debug + Send + Sync {
    /// Returns the kind of this model.
    fn kind(&self) -> ModelKind;

    /// Returns the flow loss `Lossesᵤ(ω̃, x)`.
    ///
    /// # Errors
    ///
    /// Returns a [`LossError`] if a special function cannot be evaluated.
    fn loss_flow_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError>;

    /// Returns the pressure loss `Lossesₚ(ω̃, x)`.
    ///
    /// # Errors
    ///
    /// Returns a [`LossError`] if a special function cannot be evaluated.
    fn loss_pressure_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError>;

    /// Returns whether the derivative operations are available.
    fn supports_derivatives(&self) -> bool {
        false
    }

    /// Returns the derivative of the flow loss with respect to the pipe's
    /// design parameter `diff_index`.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::NotImplemented`] unless the model provides it.
    fn diff_loss_flow(
        &self,
        _pipe: &dyn Pipe,
        _x: &Array1<f64>,
        _omegas_scaled: &Array1<f64>,
        _diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        Err(LossError::not_implemented("diff_loss_flow", self.kind().name()))
    }

    /// Returns the derivative of the pressure loss with respect to the pipe's
    /// design parameter `diff_index`.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::NotImplemented`] unless the model provides it.
    fn diff_loss_pressure(
        &self,
        _pipe: &dyn Pipe,
        _x: &Array1<f64>,
        _omegas_scaled: &Array1<f64>,
        _diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        Err(LossError::not_implemented("diff_loss_pressure", self.kind().name()))
    }
}

/// Returns `sqrt(ω)` as a column, with `ω = ω̃ / time` the physical angular
/// frequency.
///
/// The `(n, 1)` shape broadcasts against a row of positions.
#[must_use]
pub fn sqrt_omegas(pipe: &dyn Pipe, omegas_scaled: &Array1<f64>) -> Array2<f64> {
    let time = pipe.scaling().time();
    omegas_scaled
        .mapv(|omega| (omega / time).sqrt())
        .insert_axis(Axis(1))
}

/// Returns the hydraulic radius of the spherical wave front at each position.
///
/// With `Θ = atan(conicity)` the front is a spherical cap of radius
/// `R = r / sin Θ`, and its hydraulic radius is `R Θ² sin Θ / (2(1 − cos Θ))`.
/// Below [`HYDRAULIC_RADIUS_THRESHOLD`] the geometric radius is returned.
#[must_use]
pub fn hydraulic_radius(pipe: &dyn Pipe, x: &Array1<f64>) -> Array1<f64> {
    let radius = pipe.radius_at(x);
    let conicity = pipe.conicity_at(x);

    Zip::from(&radius)
        .and(&conicity)
        .map_collect(|&radius, &conicity| {
            let theta = conicity.atan();
            if theta.abs() < HYDRAULIC_RADIUS_THRESHOLD {
                radius
            } else {
                let sphere_radius = radius / theta.sin();
                sphere_radius * theta * theta * theta.sin() / (2.0 * (1.0 - theta.cos()))
            }
        })
}

/// `sqrt(−j)`, the phase of every shear wave number.
fn sqrt_minus_j() -> Complex64 {
    Complex64::new(0.0, -1.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    use crate::{
        Scaling,
        test_utils::{cone, cylinder, cylinder_with_scaling},
    };

    #[test]
    fn sqrt_omegas_is_a_column() {
        let pipe = cylinder(0.01, 0.3);
        let roots = sqrt_omegas(&pipe, &array![0.0, 4.0, 100.0]);

        assert_eq!(roots.dim(), (3, 1));
        assert_eq!(roots.column(0), array![0.0, 2.0, 10.0]);
    }

    #[test]
    fn sqrt_omegas_redimensionalizes() -> Result<(), LossError> {
        let pipe = cylinder_with_scaling(0.01, 0.3, Scaling::new(0.25, 1.0, 1.0)?);
        let roots = sqrt_omegas(&pipe, &array![1.0]);
        assert_relative_eq!(roots[[0, 0]], 2.0);
        Ok(())
    }

    #[test]
    fn hydraulic_radius_of_a_cylinder_is_its_radius() {
        let pipe = cylinder(0.0075, 0.3);
        let x = Array1::linspace(0.0, 1.0, 7);
        assert_eq!(hydraulic_radius(&pipe, &x), pipe.radius_at(&x));
    }

    #[test]
    fn hydraulic_radius_of_a_cone_exceeds_its_radius() {
        let pipe = cone(0.005, 0.05, 0.3);
        let x = array![0.0, 0.5, 1.0];
        let radius = pipe.radius_at(&x);
        let hydraulic = hydraulic_radius(&pipe, &x);

        let theta = (0.045_f64 / 0.3).atan();
        for (r, h) in radius.iter().zip(&hydraulic) {
            assert!(h > r);
            assert_relative_eq!(
                *h,
                r * theta * theta / (2.0 * (1.0 - theta.cos())),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn hydraulic_radius_is_continuous_at_the_threshold() {
        // Just above the threshold the formula is within O(Θ²) of the radius.
        let tiny = HYDRAULIC_RADIUS_THRESHOLD * 1.5;
        let pipe = cone(0.01, 0.01 + tiny * 0.3, 0.3);
        let x = array![0.5];
        assert_relative_eq!(
            hydraulic_radius(&pipe, &x)[0],
            pipe.radius_at(&x)[0],
            max_relative = 1e-6
        );
    }

    #[test]
    fn default_derivatives_are_not_implemented() {
        #[derive(Debug)]
        struct Flat;

        impl ThermoviscousModel for Flat {
            fn kind(&self) -> ModelKind {
                ModelKind::Lossless
            }

            fn loss_flow_at(
                &self,
                _pipe: &dyn Pipe,
                x: &Array1<f64>,
                omegas_scaled: &Array1<f64>,
            ) -> Result<Array2<Complex64>, LossError> {
                Ok(Array2::zeros((omegas_scaled.len(), x.len())))
            }

            fn loss_pressure_at(
                &self,
                pipe: &dyn Pipe,
                x: &Array1<f64>,
                omegas_scaled: &Array1<f64>,
            ) -> Result<Array2<Complex64>, LossError> {
                self.loss_flow_at(pipe, x, omegas_scaled)
            }
        }

        let pipe = cylinder(0.01, 0.3);
        let x = array![0.5];
        let omegas = array![1000.0];

        assert!(!Flat.supports_derivatives());
        assert!(matches!(
            Flat.diff_loss_flow(&pipe, &x, &omegas, 0),
            Err(LossError::NotImplemented {
                operation: "diff_loss_flow",
                ..
            })
        ));
        assert!(matches!(
            Flat.diff_loss_pressure(&pipe, &x, &omegas, 0),
            Err(LossError::NotImplemented { .. })
        ));
    }
}
