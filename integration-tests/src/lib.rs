pub mod bore {
    use serde::{Deserialize, Serialize};
    use twine_acoustics::{
        ConicalPipe, LossError, LossesConfig, Physics, Scaling, ThermoviscousModel,
        losses_model,
        physics::{AirProperties, TemperatureProfile},
    };
    use uom::si::{
        f64::{Length, ThermodynamicTemperature},
        length::meter,
        thermodynamic_temperature::degree_celsius,
    };

    /// A single conical bore section, as read from an instrument file.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BoreConfig {
        /// Length in meters.
        pub length: f64,
        /// Radius at the entry in meters.
        pub entry_radius: f64,
        /// Radius at the exit in meters.
        pub exit_radius: f64,
        /// Uniform air temperature in °C, ignored when `air` is given.
        #[serde(default = "default_temperature")]
        pub temperature: f64,
        /// Fixed air coefficients overriding the dry-air laws.
        #[serde(default)]
        pub air: Option<AirProperties>,
        #[serde(default)]
        pub losses: LossesConfig,
    }

    fn default_temperature() -> f64 {
        20.0
    }

    impl BoreConfig {
        /// Builds the pipe described by this section.
        ///
        /// # Errors
        ///
        /// Returns an error if a dimension is not strictly positive.
        pub fn pipe(&self) -> Result<ConicalPipe, LossError> {
            let physics = match self.air {
                Some(air) => Physics::fixed(air),
                None => Physics::air(TemperatureProfile::Uniform(
                    ThermodynamicTemperature::new::<degree_celsius>(self.temperature),
                )),
            };

            ConicalPipe::new(
                Length::new::<meter>(self.length),
                Length::new::<meter>(self.entry_radius),
                Length::new::<meter>(self.exit_radius),
                physics,
                Scaling::default(),
            )
        }

        /// Builds the configured loss model.
        ///
        /// # Errors
        ///
        /// Returns an error if the losses tag is unknown.
        pub fn losses_model(&self) -> Result<Box<dyn ThermoviscousModel>, LossError> {
            losses_model(&self.losses)
        }
    }

    /// Air with round numbers.
    #[must_use]
    pub fn round_air() -> AirProperties {
        AirProperties {
            rho: 1.2,
            mu: 1.8e-5,
            kappa: 0.025,
            cp: 1005.0,
            gamma: 1.4,
            c: 340.0,
        }
    }

    /// A conical pipe filled with round-number air.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is not strictly positive.
    #[must_use]
    pub fn cone(entry_radius: f64, exit_radius: f64, length: f64) -> ConicalPipe {
        ConicalPipe::new(
            Length::new::<meter>(length),
            Length::new::<meter>(entry_radius),
            Length::new::<meter>(exit_radius),
            Physics::fixed(round_air()),
            Scaling::default(),
        )
        .expect("pipe dimensions must be positive")
    }

    /// A cylindrical pipe filled with round-number air.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is not strictly positive.
    #[must_use]
    pub fn cylinder(radius: f64, length: f64) -> ConicalPipe {
        cone(radius, radius, length)
    }
}

pub mod grid {
    use std::f64::consts::PI;

    use ndarray::{Array1, Array2, Zip};
    use num_complex::Complex64;

    /// Every tag the factory accepts, booleans aside.
    pub const ALL_TAGS: [&str; 9] = [
        "bessel",
        "bessel_new",
        "diffrepr",
        "diffrepr0",
        "diffrepr16",
        "wl",
        "keefe",
        "minikeefe",
        "sh",
    ];

    /// Angular frequencies of the given frequencies in Hz.
    #[must_use]
    pub fn omegas(hertz: &[f64]) -> Array1<f64> {
        hertz.iter().map(|f| 2.0 * PI * f).collect()
    }

    /// Angular frequencies of `n` log-spaced frequencies from `low` to `high` Hz.
    #[must_use]
    pub fn log_omegas(low: f64, high: f64, n: usize) -> Array1<f64> {
        Array1::logspace(10.0, low.log10(), high.log10(), n).mapv(|f| 2.0 * PI * f)
    }

    /// The largest relative distance between two loss grids.
    ///
    /// # Panics
    ///
    /// Panics if the grids differ in shape.
    #[must_use]
    pub fn max_relative_error(actual: &Array2<Complex64>, expected: &Array2<Complex64>) -> f64 {
        assert_eq!(actual.dim(), expected.dim(), "grid shapes differ");
        Zip::from(actual)
            .and(expected)
            .fold(0.0, |worst: f64, a, e| worst.max((a - e).norm() / e.norm()))
    }

    /// Whether every loss dissipates energy.
    #[must_use]
    pub fn is_passive(losses: &Array2<Complex64>) -> bool {
        losses.iter().all(|loss| loss.im <= 0.0)
    }
}
