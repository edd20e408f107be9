use ndarray::Array1;
use serde::{Deserialize, Serialize};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

/// Names of the physical coefficients a [`Physics`] can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coef {
    /// Air density `ρ` in kg/m³.
    Rho,
    /// Dynamic viscosity `μ` in Pa·s.
    Mu,
    /// Thermal conductivity `κ` in W/(m·K).
    Kappa,
    /// Specific heat capacity at constant pressure `Cp` in J/(kg·K).
    Cp,
    /// Ratio of specific heats `γ`.
    Gamma,
    /// Speed of sound `c` in m/s.
    C,
    /// Viscous characteristic length `lv = μ/(ρc)` in m.
    Lv,
    /// Thermal characteristic length `lt = κ/(ρcCp)` in m.
    Lt,
}

/// Air coefficients at a single point, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirProperties {
    pub rho: f64,
    pub mu: f64,
    pub kappa: f64,
    pub cp: f64,
    pub gamma: f64,
    pub c: f64,
}

impl AirProperties {
    /// Returns the properties of dry air at the given temperature in °C.
    ///
    /// Uses the usual linearized laws around 0 °C found in musical acoustics
    /// references, valid for temperatures met in wind instruments.
    #[must_use]
    pub fn of_dry_air(celsius: f64) -> Self {
        let kelvin = celsius + 273.15;
        Self {
            rho: 1.2929 * 273.15 / kelvin,
            mu: 1.708e-5 * (1.0 + 0.0029 * celsius),
            kappa: 5.77e-3 * (1.0 + 0.0033 * celsius) * 4.184,
            cp: 240.0 * 4.184,
            gamma: 1.402,
            c: 331.45 * (kelvin / 273.15).sqrt(),
        }
    }

    /// Viscous characteristic length `lv = μ/(ρc)`.
    #[must_use]
    pub fn lv(&self) -> f64 {
        self.mu / (self.rho * self.c)
    }

    /// Thermal characteristic length `lt = κ/(ρcCp)`.
    #[must_use]
    pub fn lt(&self) -> f64 {
        self.kappa / (self.rho * self.c * self.cp)
    }

    /// Returns the value of the named coefficient.
    #[must_use]
    pub fn get(&self, coef: Coef) -> f64 {
        match coef {
            Coef::Rho => self.rho,
            Coef::Mu => self.mu,
            Coef::Kappa => self.kappa,
            Coef::Cp => self.cp,
            Coef::Gamma => self.gamma,
            Coef::C => self.c,
            Coef::Lv => self.lv(),
            Coef::Lt => self.lt(),
        }
    }
}

/// Air temperature along the normalized pipe abscissa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureProfile {
    /// The same temperature everywhere.
    Uniform(ThermodynamicTemperature),
    /// A linear variation from the pipe entry (`x = 0`) to its exit (`x = 1`).
    Linear {
        entry: ThermodynamicTemperature,
        exit: ThermodynamicTemperature,
    },
}

impl TemperatureProfile {
    fn celsius_at(&self, x: f64) -> f64 {
        match self {
            Self::Uniform(t) => t.get::<degree_celsius>(),
            Self::Linear { entry, exit } => {
                let entry = entry.get::<degree_celsius>();
                let exit = exit.get::<degree_celsius>();
                entry + (exit - entry) * x
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Air(TemperatureProfile),
    Fixed(AirProperties),
}

/// Physical coefficients of the air column inside a pipe.
///
/// Coefficients are requested by name at an array of normalized positions,
/// and each returned array has one entry per position.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use twine_acoustics::physics::{Coef, Physics, TemperatureProfile};
/// use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
///
/// let physics = Physics::air(TemperatureProfile::Uniform(
///     ThermodynamicTemperature::new::<degree_celsius>(20.0),
/// ));
/// let [rho, c] = physics.coefs_at(&array![0.0, 0.5, 1.0], [Coef::Rho, Coef::C]);
/// assert_eq!(rho.len(), 3);
/// assert!((c[0] - 343.4).abs() < 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Physics {
    source: Source,
}

impl Physics {
    /// Dry air following the given temperature profile.
    #[must_use]
    pub fn air(profile: TemperatureProfile) -> Self {
        Self {
            source: Source::Air(profile),
        }
    }

    /// Constant, user-provided coefficients.
    #[must_use]
    pub fn fixed(properties: AirProperties) -> Self {
        Self {
            source: Source::Fixed(properties),
        }
    }

    /// Returns all coefficients at a single normalized position.
    #[must_use]
    pub fn properties_at(&self, x: f64) -> AirProperties {
        match &self.source {
            Source::Air(profile) => AirProperties::of_dry_air(profile.celsius_at(x)),
            Source::Fixed(properties) => *properties,
        }
    }

    /// Returns one coefficient at each position of `x`.
    #[must_use]
    pub fn coef_at(&self, x: &Array1<f64>, coef: Coef) -> Array1<f64> {
        x.mapv(|xi| self.properties_at(xi).get(coef))
    }

    /// Returns several coefficients at once, in the order requested.
    #[must_use]
    pub fn coefs_at<const N: usize>(&self, x: &Array1<f64>, coefs: [Coef; N]) -> [Array1<f64>; N] {
        coefs.map(|coef| self.coef_at(x, coef))
    }
}

impl Default for Physics {
    /// Dry air at 20 °C.
    fn default() -> Self {
        Self::air(TemperatureProfile::Uniform(ThermodynamicTemperature::new::<
            degree_celsius,
        >(20.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn dry_air_at_twenty_celsius() {
        let air = AirProperties::of_dry_air(20.0);

        assert_relative_eq!(air.rho, 1.20469, max_relative = 1e-5);
        assert_relative_eq!(air.c, 343.37, max_relative = 1e-4);
        assert_relative_eq!(air.mu, 1.8071e-5, max_relative = 1e-4);
        assert_relative_eq!(air.gamma, 1.402);

        // Both boundary-layer lengths are a few tens of nanometres.
        assert!(air.lv() > 1e-8 && air.lv() < 1e-7);
        assert!(air.lt() > 1e-8 && air.lt() < 1e-7);
        assert_relative_eq!(air.get(Coef::Lv), air.mu / (air.rho * air.c));
    }

    #[test]
    fn linear_profile_interpolates_between_ends() {
        let physics = Physics::air(TemperatureProfile::Linear {
            entry: ThermodynamicTemperature::new::<degree_celsius>(30.0),
            exit: ThermodynamicTemperature::new::<degree_celsius>(20.0),
        });

        let c = physics.coef_at(&array![0.0, 0.5, 1.0], Coef::C);

        assert_relative_eq!(c[0], AirProperties::of_dry_air(30.0).c);
        assert_relative_eq!(c[1], AirProperties::of_dry_air(25.0).c);
        assert_relative_eq!(c[2], AirProperties::of_dry_air(20.0).c);
    }

    #[test]
    fn fixed_properties_are_uniform() {
        let properties = AirProperties {
            rho: 1.2,
            mu: 1.8e-5,
            kappa: 0.025,
            cp: 1005.0,
            gamma: 1.4,
            c: 340.0,
        };
        let physics = Physics::fixed(properties);

        let [rho, gamma] = physics.coefs_at(&array![0.1, 0.9], [Coef::Rho, Coef::Gamma]);

        assert_eq!(rho, array![1.2, 1.2]);
        assert_eq!(gamma, array![1.4, 1.4]);
    }

    #[test]
    fn empty_positions_give_empty_coefficients() {
        let physics = Physics::default();
        let mu = physics.coef_at(&Array1::zeros(0), Coef::Mu);
        assert!(mu.is_empty());
    }
}
