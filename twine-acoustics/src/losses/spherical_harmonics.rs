use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{LossError, physics::Coef, pipe::Pipe};

use super::{
    HYDRAULIC_RADIUS_THRESHOLD, ModelKind, ThermoviscousModel, bessel::thermal_ratio,
    hydraulic_radius, sqrt_minus_j, sqrt_omegas,
};

/// Thermoviscous losses of a conical duct from spherical wave fronts.
///
/// The boundary layers are solved on the spherical cap of half-angle
/// `Θ = atan(conicity)` instead of a plane section, which brings in Legendre
/// functions of complex degree
///
/// ```text
/// η = sqrt(−j S²/cΘ² + 1/4) − 1/2,   cΘ = 2(1 − cos Θ)/sin Θ
/// K = legendre_ratio(η, Θ)
/// ```
///
/// where `S` is the Stokes number built on the hydraulic radius. Then
/// `Lossesᵤ = K_v/(1 − K_v) · coef_flow` and
/// `Lossesₚ = (γ − 1) K_t · coef_pressure`.
///
/// For a cylinder, `K = 2J₁(k)/(kJ₀(k))` with `k = sqrt(−j) S` and the model
/// reduces to [`Bessel`].
///
/// Requires the `spherical-harmonics` feature.
///
/// [`Bessel`]: super::Bessel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphericalHarmonics {
    _private: (),
}

impl SphericalHarmonics {
    /// Creates the model.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::MissingFeature`] if the crate was built without
    /// the `spherical-harmonics` feature.
    pub fn new() -> Result<Self, LossError> {
        if cfg!(feature = "spherical-harmonics") {
            Ok(Self { _private: () })
        } else {
            Err(LossError::MissingFeature {
                feature: "spherical-harmonics",
            })
        }
    }

    /// Evaluates `K` on the grid for the Stokes-number `rate`
    /// (`sqrt(ρ/μ)` or `sqrt(ρCp/κ)`).
    fn wall_ratios(
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
        rate: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let radius = hydraulic_radius(pipe, x);
        let theta = pipe.conicity_at(x).mapv(f64::atan);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        let mut ratios = Array2::zeros((omegas_scaled.len(), x.len()));
        for ((i, j), ratio) in ratios.indexed_iter_mut() {
            let stokes = radius[j] * rate[j] * sqrt_omegas[[i, 0]];
            *ratio = wall_ratio(stokes, theta[j])?;
        }
        Ok(ratios)
    }
}

fn wall_ratio(stokes: f64, theta: f64) -> Result<Complex64, LossError> {
    if theta.abs() < HYDRAULIC_RADIUS_THRESHOLD {
        return Ok(thermal_ratio(sqrt_minus_j() * stokes));
    }

    let theta = theta.abs();
    let c_theta = 2.0 * (1.0 - theta.cos()) / theta.sin();
    let eta = (Complex64::new(0.25, -stokes * stokes / (c_theta * c_theta))).sqrt() - 0.5;
    legendre(eta, theta)
}

#[cfg(feature = "spherical-harmonics")]
fn legendre(eta: Complex64, theta: f64) -> Result<Complex64, LossError> {
    crate::special::legendre_ratio(eta, theta)
}

#[cfg(not(feature = "spherical-harmonics"))]
fn legendre(_eta: Complex64, _theta: f64) -> Result<Complex64, LossError> {
    Err(LossError::MissingFeature {
        feature: "spherical-harmonics",
    })
}

impl ThermoviscousModel for SphericalHarmonics {
    fn kind(&self) -> ModelKind {
        ModelKind::SphericalHarmonics
    }

    fn loss_flow_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let [rho, mu] = pipe.physics().coefs_at(x, [Coef::Rho, Coef::Mu]);
        let rate = (rho / mu).mapv(f64::sqrt);
        let coef_flow = pipe.coef_flow_at(x);

        let mut losses = Self::wall_ratios(pipe, x, omegas_scaled, &rate)?;
        for ((_, j), loss) in losses.indexed_iter_mut() {
            *loss = *loss / (1.0 - *loss) * coef_flow[j];
        }
        Ok(losses)
    }

    fn loss_pressure_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let [rho, kappa, cp, gamma] = pipe
            .physics()
            .coefs_at(x, [Coef::Rho, Coef::Kappa, Coef::Cp, Coef::Gamma]);
        let rate = (rho * cp / kappa).mapv(f64::sqrt);
        let coef_pressure = pipe.coef_pressure_at(x);

        let mut losses = Self::wall_ratios(pipe, x, omegas_scaled, &rate)?;
        for ((_, j), loss) in losses.indexed_iter_mut() {
            *loss *= (gamma[j] - 1.0) * coef_pressure[j];
        }
        Ok(losses)
    }
}
