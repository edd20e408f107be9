use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{LossError, physics::Coef, pipe::Pipe};

use super::{ModelKind, ThermoviscousModel, sqrt_minus_j, sqrt_omegas};

/// The Webster-Lokshin model: both boundary layers acting on the pressure.
///
/// The flow loss is zero. The pressure loss is a half-order fractional
/// derivative:
///
/// ```text
/// ε* = sqrt(lv) + (γ − 1) sqrt(lt)
/// ε  = ε* sqrt(1 + conicity²) / r
/// Lossesₚ = 2 ε sqrt(−j c) / sqrt(ω) · coef_pressure
/// ```
///
/// The viscous term, which the other models put on the flow, is carried by
/// the pressure here, so the pressure loss alone is comparable to the sum of
/// both losses of a first-order model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WebsterLokshin;

impl ThermoviscousModel for WebsterLokshin {
    fn kind(&self) -> ModelKind {
        ModelKind::WebsterLokshin
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
        let [lv, lt, gamma, c] = pipe
            .physics()
            .coefs_at(x, [Coef::Lv, Coef::Lt, Coef::Gamma, Coef::C]);
        let radius = pipe.radius_at(x);
        let conicity = pipe.conicity_at(x);
        let coef_pressure = pipe.coef_pressure_at(x);
        let sqrt_omegas = sqrt_omegas(pipe, omegas_scaled);

        let epsilon = Array1::from_shape_fn(x.len(), |j| {
            let epsilon_star = lv[j].sqrt() + (gamma[j] - 1.0) * lt[j].sqrt();
            epsilon_star * (1.0 + conicity[j] * conicity[j]).sqrt() / radius[j]
        });
        let phase = sqrt_minus_j();

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            2.0 * epsilon[j] * phase * c[j].sqrt() / sqrt_omegas[[i, 0]] * coef_pressure[j]
        }))
    }
}
