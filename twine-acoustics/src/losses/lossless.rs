use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{LossError, pipe::Pipe};

use super::{ModelKind, ThermoviscousModel};

/// An ideal duct without wall losses.
///
/// Every operation returns a `1×1` zero that broadcasts against any
/// frequency/position grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lossless;

fn zero() -> Array2<Complex64> {
    Array2::zeros((1, 1))
}

impl ThermoviscousModel for Lossless {
    fn kind(&self) -> ModelKind {
        ModelKind::Lossless
    }

    fn loss_flow_at(
        &self,
        _pipe: &dyn Pipe,
        _x: &Array1<f64>,
        _omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(zero())
    }

    fn loss_pressure_at(
        &self,
        _pipe: &dyn Pipe,
        _x: &Array1<f64>,
        _omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(zero())
    }

    fn supports_derivatives(&self) -> bool {
        true
    }

    fn diff_loss_flow(
        &self,
        _pipe: &dyn Pipe,
        _x: &Array1<f64>,
        _omegas_scaled: &Array1<f64>,
        _diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(zero())
    }

    fn diff_loss_pressure(
        &self,
        _pipe: &dyn Pipe,
        _x: &Array1<f64>,
        _omegas_scaled: &Array1<f64>,
        _diff_index: usize,
    ) -> Result<Array2<Complex64>, LossError> {
        Ok(zero())
    }
}
