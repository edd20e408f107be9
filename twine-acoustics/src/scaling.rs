use crate::LossError;

/// Reference scales used to make the propagation coefficients dimensionless.
///
/// Scaled angular frequencies are `ω·time`, scaled flows `u/flow` and scaled
/// pressures `p/pressure`. The unit scaling (all ones, the default) leaves
/// every coefficient in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    time: f64,
    flow: f64,
    pressure: f64,
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            time: 1.0,
            flow: 1.0,
            pressure: 1.0,
        }
    }
}

impl Scaling {
    /// Creates a scaling from its reference time, flow and pressure.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::InvalidInput`] if any scale is not finite and
    /// strictly positive.
    pub fn new(time: f64, flow: f64, pressure: f64) -> Result<Self, LossError> {
        for (name, value) in [("time", time), ("flow", flow), ("pressure", pressure)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LossError::InvalidInput(format!(
                    "{name} scale must be finite and strictly positive, got {value}"
                )));
            }
        }

        Ok(Self {
            time,
            flow,
            pressure,
        })
    }

    /// Returns the reference time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the reference flow.
    #[must_use]
    pub fn flow(&self) -> f64 {
        self.flow
    }

    /// Returns the reference pressure.
    #[must_use]
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Scale of an inertance (pressure·time/flow).
    #[must_use]
    pub fn inertance(&self) -> f64 {
        self.pressure * self.time / self.flow
    }

    /// Scale of a compliance (flow·time/pressure).
    #[must_use]
    pub fn compliance(&self) -> f64 {
        self.flow * self.time / self.pressure
    }

    /// Scale of a resistance (pressure/flow).
    #[must_use]
    pub fn resistance(&self) -> f64 {
        self.pressure / self.flow
    }

    /// Scale of a conductance (flow/pressure).
    #[must_use]
    pub fn conductance(&self) -> f64 {
        self.flow / self.pressure
    }
}
