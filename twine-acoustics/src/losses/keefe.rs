use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{LossError, physics::Coef, pipe::Pipe};

use super::{ModelKind, ThermoviscousModel, sqrt_minus_j, sqrt_omegas};

/// Second-order large-Stokes-number expansion of the [`Bessel`] model.
///
/// With `rv = r sqrt(ωρ/μ)` and `rt = r sqrt(ωρCp/κ)`:
///
/// ```text
/// Lossesᵤ = (2 sqrt(−j)/rv − 3j/rv²) · coef_flow
/// Lossesₚ = (γ − 1) (2 sqrt(−j)/rt + j/rt²) · coef_pressure
/// ```
///
/// No special function is evaluated. The expansion is accurate when the
/// boundary layers are thin compared to the radius, which is the case over
/// most of the playing range of wind instruments.
///
/// [`Bessel`]: super::Bessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keefe;

/// First-order large-Stokes-number expansion of the [`Bessel`] model.
///
/// Keeps only the `2 sqrt(−j)/r` term of [`Keefe`].
///
/// [`Bessel`]: super::Bessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MiniKeefe;

fn viscous_coefficient(rv: f64, second_order: bool) -> Complex64 {
    let first = 2.0 * sqrt_minus_j() / rv;
    if second_order {
        first - 3.0 * Complex64::i() / (rv * rv)
    } else {
        first
    }
}

fn thermal_coefficient(rt: f64, second_order: bool) -> Complex64 {
    let first = 2.0 * sqrt_minus_j() / rt;
    if second_order {
        first + Complex64::i() / (rt * rt)
    } else {
        first
    }
}

fn viscous_coefficient_prime(rv: f64) -> Complex64 {
    -2.0 * sqrt_minus_j() / (rv * rv) + 6.0 * Complex64::i() / rv.powi(3)
}

fn thermal_coefficient_prime(rt: f64) -> Complex64 {
    -2.0 * sqrt_minus_j() / (rt * rt) - 2.0 * Complex64::i() / rt.powi(3)
}

/// `sqrt(ρ/μ)` at each position.
fn viscous_rate(pipe: &dyn Pipe, x: &Array1<f64>) -> Array1<f64> {
    let [rho, mu] = pipe.physics().coefs_at(x, [Coef::Rho, Coef::Mu]);
    (rho / mu).mapv(f64::sqrt)
}

/// `sqrt(ρCp/κ)` and `γ − 1` at each position.
fn thermal_rate(pipe: &dyn Pipe, x: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
    let [rho, kappa, cp, gamma] = pipe
        .physics()
        .coefs_at(x, [Coef::Rho, Coef::Kappa, Coef::Cp, Coef::Gamma]);
    ((rho * cp / kappa).mapv(f64::sqrt), gamma - 1.0)
}

fn loss_flow(
    pipe: &dyn Pipe,
    x: &Array1<f64>,
    omegas_scaled: &Array1<f64>,
    second_order: bool,
) -> Array2<Complex64> {
    let radius = pipe.radius_at(x);
    let rate = viscous_rate(pipe, x);
    let coef_flow = pipe.coef_flow_at(x);
    let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

    Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
        let rv = radius[j] * rate[j] * sqrt_omegas[[i, 0]];
        viscous_coefficient(rv, second_order) * coef_flow[j]
    })
}

fn loss_pressure(
    pipe: &dyn Pipe,
    x: &Array1<f64>,
    omegas_scaled: &Array1<f64>,
    second_order: bool,
) -> Array2<Complex64> {
    let radius = pipe.radius_at(x);
    let (rate, gamma_minus_one) = thermal_rate(pipe, x);
    let coef_pressure = pipe.coef_pressure_at(x);
    let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

    Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
        let rt = radius[j] * rate[j] * sqrt_omegas[[i, 0]];
        gamma_minus_one[j] * thermal_coefficient(rt, second_order) * coef_pressure[j]
    })
}

impl ThermoviscousModel for Keefe {
    fn kind(&self) -> ModelKind {
        ModelKind::Keefe
    }

    fn loss_flow_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(loss_flow(pipe, x, omegas_scaled, true))
    }

    fn loss_pressure_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(loss_pressure(pipe, x, omegas_scaled, true))
    }

    fn supports_derivatives(&self) -> bool {
        true
    }

    fn diff_loss_flow(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
        diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        let radius = pipe.radius_at(x);
        let diff_radius = pipe.diff_radius_at(x, diff_index);
        let rate = viscous_rate(pipe, x);
        let coef_flow = pipe.coef_flow_at(x);
        let diff_coef_flow = pipe.diff_coef_flow_at(x, diff_index);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let scale = rate[j] * sqrt_omegas[[i, 0]];
            let rv = radius[j] * scale;
            viscous_coefficient_prime(rv) * diff_radius[j] * scale * coef_flow[j]
                + viscous_coefficient(rv, true) * diff_coef_flow[j]
        }))
    }

    fn diff_loss_pressure(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
        diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        let radius = pipe.radius_at(x);
        let diff_radius = pipe.diff_radius_at(x, diff_index);
        let (rate, gamma_minus_one) = thermal_rate(pipe, x);
        let coef_pressure = pipe.coef_pressure_at(x);
        let diff_coef_pressure = pipe.diff_coef_pressure_at(x, diff_index);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let scale = rate[j] * sqrt_omegas[[i, 0]];
            let rt = radius[j] * scale;
            gamma_minus_one[j]
                * (thermal_coefficient_prime(rt) * diff_radius[j] * scale * coef_pressure[j]
                    + thermal_coefficient(rt, true) * diff_coef_pressure[j])
        }))
    }
}

impl ThermoviscousModel for MiniKeefe {
    fn kind(&self) -> ModelKind {
        ModelKind::MiniKeefe
    }

    fn loss_flow_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(loss_flow(pipe, x, omegas_scaled, false))
    }

    fn loss_pressure_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(loss_pressure(pipe, x, omegas_scaled, false))
    }
}
