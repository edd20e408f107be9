use ndarray::Array1;
use uom::si::{f64::Length, length::meter};

use crate::{LossError, Scaling, physics::Physics};

use super::Pipe;

/// A truncated cone, or a cylinder when both radii are equal.
///
/// The radius varies linearly between the entry and the exit. Two design
/// parameters are exposed to the derivative accessors: index `0` is the
/// entry radius and index `1` the exit radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicalPipe {
    length: f64,
    entry_radius: f64,
    exit_radius: f64,
    physics: Physics,
    scaling: Scaling,
}

impl ConicalPipe {
    /// Design parameter index of the entry radius.
    pub const ENTRY_RADIUS: usize = 0;

    /// Design parameter index of the exit radius.
    pub const EXIT_RADIUS: usize = 1;

    /// Creates a conical pipe.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::InvalidInput`] if the length or a radius is not
    /// finite and strictly positive.
    pub fn new(
        length: Length,
        entry_radius: Length,
        exit_radius: Length,
        physics: Physics,
        scaling: Scaling,
    ) -> Result<Self, LossError> {
        let length = positive("length", length)?;
        let entry_radius = positive("entry radius", entry_radius)?;
        let exit_radius = positive("exit radius", exit_radius)?;

        Ok(Self {
            length,
            entry_radius,
            exit_radius,
            physics,
            scaling,
        })
    }

    /// Creates a cylindrical pipe.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::InvalidInput`] if the length or the radius is not
    /// finite and strictly positive.
    pub fn cylinder(
        length: Length,
        radius: Length,
        physics: Physics,
        scaling: Scaling,
    ) -> Result<Self, LossError> {
        Self::new(length, radius, radius, physics, scaling)
    }

    /// Returns the same pipe with a different entry radius.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::InvalidInput`] if the radius is not finite and
    /// strictly positive.
    pub fn with_entry_radius(self, entry_radius: Length) -> Result<Self, LossError> {
        Ok(Self {
            entry_radius: positive("entry radius", entry_radius)?,
            ..self
        })
    }

    /// Returns the same pipe with a different exit radius.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::InvalidInput`] if the radius is not finite and
    /// strictly positive.
    pub fn with_exit_radius(self, exit_radius: Length) -> Result<Self, LossError> {
        Ok(Self {
            exit_radius: positive("exit radius", exit_radius)?,
            ..self
        })
    }
}

impl Pipe for ConicalPipe {
    fn physics(&self) -> &Physics {
        &self.physics
    }

    fn scaling(&self) -> &Scaling {
        &self.scaling
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn radius_at(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.entry_radius + (self.exit_radius - self.entry_radius) * xi)
    }

    fn conicity_at(&self, x: &Array1<f64>) -> Array1<f64> {
        let conicity = (self.exit_radius - self.entry_radius) / self.length;
        Array1::from_elem(x.len(), conicity)
    }

    fn diff_radius_at(&self, x: &Array1<f64>, diff_index: usize) -> Array1<f64> {
        match diff_index {
            Self::ENTRY_RADIUS => x.mapv(|xi| 1.0 - xi),
            Self::EXIT_RADIUS => x.clone(),
            _ => Array1::zeros(x.len()),
        }
    }
}

fn positive(name: &str, value: Length) -> Result<f64, LossError> {
    let value = value.get::<meter>();
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LossError::InvalidInput(format!(
            "{name} must be finite and strictly positive, got {value} m"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use uom::si::length::millimeter;

    fn cone() -> ConicalPipe {
        ConicalPipe::new(
            Length::new::<meter>(0.5),
            Length::new::<millimeter>(5.0),
            Length::new::<millimeter>(15.0),
            Physics::default(),
            Scaling::default(),
        )
        .unwrap()
    }

    #[test]
    fn radius_varies_linearly() {
        let radius = cone().radius_at(&array![0.0, 0.5, 1.0]);
        assert_relative_eq!(radius[0], 0.005);
        assert_relative_eq!(radius[1], 0.010);
        assert_relative_eq!(radius[2], 0.015);
    }

    #[test]
    fn conicity_is_the_radius_slope() {
        let conicity = cone().conicity_at(&array![0.2, 0.7]);
        assert_relative_eq!(conicity[0], 0.02);
        assert_relative_eq!(conicity[1], 0.02);
    }

    #[test]
    fn coefficient_derivatives_match_finite_differences() -> Result<(), LossError> {
        let pipe = cone();
        let x = array![0.0, 0.3, 1.0];
        let step = 1e-7;

        for (index, plus, minus) in [
            (
                ConicalPipe::ENTRY_RADIUS,
                pipe.clone().with_entry_radius(Length::new::<meter>(0.005 + step))?,
                pipe.clone().with_entry_radius(Length::new::<meter>(0.005 - step))?,
            ),
            (
                ConicalPipe::EXIT_RADIUS,
                pipe.clone().with_exit_radius(Length::new::<meter>(0.015 + step))?,
                pipe.clone().with_exit_radius(Length::new::<meter>(0.015 - step))?,
            ),
        ] {
            let flow = pipe.diff_coef_flow_at(&x, index);
            let pressure = pipe.diff_coef_pressure_at(&x, index);
            let flow_fd = (plus.coef_flow_at(&x) - minus.coef_flow_at(&x)) / (2.0 * step);
            let pressure_fd =
                (plus.coef_pressure_at(&x) - minus.coef_pressure_at(&x)) / (2.0 * step);

            for i in 0..x.len() {
                assert_relative_eq!(flow[i], flow_fd[i], epsilon = 1e-6, max_relative = 1e-6);
                assert_relative_eq!(
                    pressure[i],
                    pressure_fd[i],
                    epsilon = 1e-12,
                    max_relative = 1e-6
                );
            }
        }

        Ok(())
    }

    #[test]
    fn changed_radii_are_validated() -> Result<(), LossError> {
        let wider = cone().with_exit_radius(Length::new::<millimeter>(20.0))?;
        assert_relative_eq!(wider.radius_at(&array![1.0])[0], 0.02);

        for radius in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let radius = Length::new::<meter>(radius);
            assert!(matches!(
                cone().with_entry_radius(radius),
                Err(LossError::InvalidInput(_))
            ));
            assert!(matches!(
                cone().with_exit_radius(radius),
                Err(LossError::InvalidInput(_))
            ));
        }

        Ok(())
    }

    #[test]
    fn unknown_design_parameter_has_zero_derivative() {
        let pipe = cone();
        let x = array![0.1, 0.9];
        assert_eq!(pipe.diff_radius_at(&x, 7), array![0.0, 0.0]);
        assert_eq!(pipe.diff_coef_flow_at(&x, 7), array![0.0, 0.0]);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let result = ConicalPipe::cylinder(
            Length::new::<meter>(0.0),
            Length::new::<meter>(0.01),
            Physics::default(),
            Scaling::default(),
        );
        assert!(matches!(result, Err(LossError::InvalidInput(_))));
    }
}
