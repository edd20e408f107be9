use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{LossError, physics::Coef, pipe::Pipe, special::jve};

use super::{ModelKind, ThermoviscousModel, hydraulic_radius, sqrt_minus_j, sqrt_omegas};

/// The exact Zwikker-Kosten model of a cylindrical duct.
///
/// With the shear wave numbers `kv = r sqrt(−jωρ/μ)` and
/// `kt = r sqrt(−jωρCp/κ)`:
///
/// ```text
/// Lossesᵤ = −2 J₁(kv) / (kv J₂(kv)) · coef_flow
/// Lossesₚ = (γ − 1) · 2 J₁(kt) / (kt J₀(kt)) · coef_pressure
/// ```
///
/// When `use_new_stokes_number` is set, `r` is the hydraulic radius of the
/// spherical wave front instead of the geometric radius, which accounts for
/// conicity. The derivatives are only available for the geometric radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bessel {
    use_new_stokes_number: bool,
}

impl Bessel {
    /// Creates the model, optionally on the hydraulic radius.
    #[must_use]
    pub fn new(use_new_stokes_number: bool) -> Self {
        Self {
            use_new_stokes_number,
        }
    }

    /// Returns whether the hydraulic radius is used in the wave numbers.
    #[must_use]
    pub fn use_new_stokes_number(&self) -> bool {
        self.use_new_stokes_number
    }

    fn radius_at(&self, pipe: &dyn Pipe, x: &Array1<f64>) -> Array1<f64> {
        if self.use_new_stokes_number {
            hydraulic_radius(pipe, x)
        } else {
            pipe.radius_at(x)
        }
    }

    fn check_derivatives(&self, operation: &'static str) -> Result<(), LossError> {
        if self.use_new_stokes_number {
            Err(LossError::NotImplemented {
                operation,
                model: ModelKind::Bessel.name(),
                context: Some("derivatives need the geometric radius".into()),
            })
        } else {
            Ok(())
        }
    }
}

/// `−2 J₁(k) / (k J₂(k))`.
fn viscous_ratio(k: Complex64) -> Complex64 {
    -2.0 * jve(1, k) / (k * jve(2, k))
}

/// `2 J₁(k) / (k J₀(k))`.
pub(super) fn thermal_ratio(k: Complex64) -> Complex64 {
    2.0 * jve(1, k) / (k * jve(0, k))
}

/// `d/dk` of [`viscous_ratio`], from its own value.
fn viscous_ratio_prime(k: Complex64, ratio: Complex64) -> Complex64 {
    (2.0 * ratio + 2.0 + k * k * ratio * ratio / 2.0) / k
}

/// `d/dk` of [`thermal_ratio`], from its own value.
fn thermal_ratio_prime(k: Complex64, ratio: Complex64) -> Complex64 {
    2.0 * (1.0 - ratio + k * k * ratio * ratio / 4.0) / k
}

/// `sqrt(−j · rate)` for each position, with `rate` the inverse of a
/// diffusivity (`ρ/μ` or `ρCp/κ`).
fn wave_factors(rate: &Array1<f64>) -> Array1<Complex64> {
    let phase = sqrt_minus_j();
    rate.mapv(|rate| phase * rate.sqrt())
}

impl ThermoviscousModel for Bessel {
    fn kind(&self) -> ModelKind {
        ModelKind::Bessel
    }

    fn loss_flow_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let radius = self.radius_at(pipe, x);
        let [rho, mu] = pipe.physics().coefs_at(x, [Coef::Rho, Coef::Mu]);
        let factor = wave_factors(&(rho / mu));
        let coef_flow = pipe.coef_flow_at(x);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let k = radius[j] * factor[j] * sqrt_omegas[[i, 0]];
            viscous_ratio(k) * coef_flow[j]
        }))
    }

    fn loss_pressure_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let radius = self.radius_at(pipe, x);
        let [rho, kappa, cp, gamma] = pipe
            .physics()
            .coefs_at(x, [Coef::Rho, Coef::Kappa, Coef::Cp, Coef::Gamma]);
        let factor = wave_factors(&(rho * cp / kappa));
        let coef_pressure = pipe.coef_pressure_at(x);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let k = radius[j] * factor[j] * sqrt_omegas[[i, 0]];
            (gamma[j] - 1.0) * thermal_ratio(k) * coef_pressure[j]
        }))
    }

    fn supports_derivatives(&self) -> bool {
        !self.use_new_stokes_number
    }

    fn diff_loss_flow(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
        diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        self.check_derivatives("diff_loss_flow")?;

        let radius = pipe.radius_at(x);
        let diff_radius = pipe.diff_radius_at(x, diff_index);
        let [rho, mu] = pipe.physics().coefs_at(x, [Coef::Rho, Coef::Mu]);
        let factor = wave_factors(&(rho / mu));
        let coef_flow = pipe.coef_flow_at(x);
        let diff_coef_flow = pipe.diff_coef_flow_at(x, diff_index);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let scale = factor[j] * sqrt_omegas[[i, 0]];
            let k = radius[j] * scale;
            let jv = viscous_ratio(k);
            let jv_prime = viscous_ratio_prime(k, jv);
            jv_prime * diff_radius[j] * scale * coef_flow[j] + jv * diff_coef_flow[j]
        }))
    }

    fn diff_loss_pressure(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
        diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        self.check_derivatives("diff_loss_pressure")?;

        let radius = pipe.radius_at(x);
        let diff_radius = pipe.diff_radius_at(x, diff_index);
        let [rho, kappa, cp, gamma] = pipe
            .physics()
            .coefs_at(x, [Coef::Rho, Coef::Kappa, Coef::Cp, Coef::Gamma]);
        let factor = wave_factors(&(rho * cp / kappa));
        let coef_pressure = pipe.coef_pressure_at(x);
        let diff_coef_pressure = pipe.diff_coef_pressure_at(x, diff_index);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let scale = factor[j] * sqrt_omegas[[i, 0]];
            let k = radius[j] * scale;
            let jt = thermal_ratio(k);
            let jt_prime = thermal_ratio_prime(k, jt);
            (gamma[j] - 1.0)
                * (jt_prime * diff_radius[j] * scale * coef_pressure[j]
                    + jt * diff_coef_pressure[j])
        }))
    }
}
