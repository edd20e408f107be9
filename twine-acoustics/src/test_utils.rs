use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use uom::si::{f64::Length, length::meter};

use crate::{
    ConicalPipe, Physics, Scaling,
    physics::AirProperties,
};

/// Air with round numbers, as used in textbook examples.
pub(crate) fn round_air() -> Physics {
    Physics::fixed(AirProperties {
        rho: 1.2,
        mu: 1.8e-5,
        kappa: 0.025,
        cp: 1005.0,
        gamma: 1.4,
        c: 340.0,
    })
}

pub(crate) fn cylinder(radius: f64, length: f64) -> ConicalPipe {
    cylinder_with_scaling(radius, length, Scaling::default())
}

pub(crate) fn cylinder_with_scaling(radius: f64, length: f64, scaling: Scaling) -> ConicalPipe {
    ConicalPipe::cylinder(
        Length::new::<meter>(length),
        Length::new::<meter>(radius),
        round_air(),
        scaling,
    )
    .expect("valid cylinder")
}

pub(crate) fn cone(entry_radius: f64, exit_radius: f64, length: f64) -> ConicalPipe {
    ConicalPipe::new(
        Length::new::<meter>(length),
        Length::new::<meter>(entry_radius),
        Length::new::<meter>(exit_radius),
        round_air(),
        Scaling::default(),
    )
    .expect("valid cone")
}

/// Angular frequencies of the given frequencies in Hz.
pub(crate) fn omegas(hertz: &[f64]) -> Array1<f64> {
    hertz.iter().map(|f| 2.0 * PI * f).collect()
}

/// Asserts that every loss has a non-positive imaginary part.
pub(crate) fn assert_passive(losses: &Array2<Complex64>) {
    for loss in losses {
        assert!(loss.im <= 0.0, "active loss {loss}");
    }
}

/// Asserts elementwise closeness of two complex grids.
pub(crate) fn assert_grids_close(
    actual: &Array2<Complex64>,
    expected: &Array2<Complex64>,
    tolerance: f64,
) {
    assert_eq!(actual.dim(), expected.dim());
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).norm() <= tolerance * e.norm(),
            "{a} differs from {e} by more than {tolerance}"
        );
    }
}
