mod coefficients;

use std::f64::consts::PI;

use log::debug;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::{LossError, physics::Coef, pipe::Pipe};

use super::{ModelKind, ThermoviscousModel};

pub use coefficients::AVAILABLE_ORDERS;

/// Order selected by the bare `"diffrepr"` tag.
pub const DEFAULT_ORDER: usize = 8;

/// Coefficients of the rational approximation
/// `h(q) ≈ q + a0 + Σᵢ aᵢ q / (1 + bᵢ q)`
/// of the Zwikker-Kosten function `h(q) = −q J₀(κ)/J₂(κ)`, `κ² = −q`.
///
/// `q` is `jωρr²/μ` for the viscous layer and `jωρCpr²/κ` for the thermal
/// one; a single set of coefficients serves both.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffReprCoefficients {
    a0: f64,
    ai: Vec<f64>,
    bi: Vec<f64>,
}

impl DiffReprCoefficients {
    /// Creates a coefficient set.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::MismatchedCoefficients`] if `ai` and `bi` have
    /// different lengths.
    pub fn new(a0: f64, ai: Vec<f64>, bi: Vec<f64>) -> Result<Self, LossError> {
        if ai.len() != bi.len() {
            return Err(LossError::MismatchedCoefficients {
                ai: ai.len(),
                bi: bi.len(),
            });
        }
        Ok(Self { a0, ai, bi })
    }

    /// Returns the precomputed set of the given order.
    ///
    /// # Errors
    ///
    /// Returns [`LossError::UnknownCoefficients`] if no set of that order
    /// exists. See [`AVAILABLE_ORDERS`].
    pub fn precomputed(order: usize) -> Result<Self, LossError> {
        coefficients::table(order).ok_or_else(|| LossError::UnknownCoefficients {
            tag: format!("diffrepr{order}"),
        })
    }

    /// Weight of the constant term.
    #[must_use]
    pub fn a0(&self) -> f64 {
        self.a0
    }

    /// Weights of the first-order terms.
    #[must_use]
    pub fn ai(&self) -> &[f64] {
        &self.ai
    }

    /// Poles of the first-order terms.
    #[must_use]
    pub fn bi(&self) -> &[f64] {
        &self.bi
    }

    /// Number of first-order terms.
    #[must_use]
    pub fn order(&self) -> usize {
        self.ai.len()
    }
}

/// Viscous branches at each position: a resistance `r0` in series with
/// parallel `(rᵢ, lᵢ)` pairs.
///
/// `ri` and `li` have one row per position and one column per damper.
#[derive(Debug, Clone, PartialEq)]
pub struct ViscousBranches {
    pub r0: Array1<f64>,
    pub ri: Array2<f64>,
    pub li: Array2<f64>,
}

/// Thermal branches at each position: a conductance `g0` in parallel with
/// series `(gᵢ, cᵢ)` pairs, the whole in series with the capacitance `c0`.
///
/// `gi` and `ci` have one row per position and one column per damper.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalBranches {
    pub g0: Array1<f64>,
    pub gi: Array2<f64>,
    pub c0: Array1<f64>,
    pub ci: Array2<f64>,
}

/// Diffusive representation of the [`Bessel`] model.
///
/// Approximates the exact losses by a finite sum of first-order terms in
/// `jω`, which can be realized in the time domain with one auxiliary state
/// per term ("damper"). The flow loss is the impedance of the viscous
/// [`ViscousBranches`] network, the pressure loss the admittance of the
/// [`ThermalBranches`] network, both divided by `jω̃`.
///
/// [`Bessel`]: super::Bessel
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusiveRepresentation {
    coefficients: DiffReprCoefficients,
}

impl DiffusiveRepresentation {
    /// Creates the model from a coefficient set.
    #[must_use]
    pub fn new(coefficients: DiffReprCoefficients) -> Self {
        Self { coefficients }
    }

    /// Builds the model from a `"diffrepr"` or `"diffreprN"` tag.
    ///
    /// `"diffrepr"` selects order [`DEFAULT_ORDER`].
    ///
    /// # Errors
    ///
    /// Returns [`LossError::UnknownCoefficients`] if the tag does not name one
    /// of the [`AVAILABLE_ORDERS`] in plain decimal, without leading zeros.
    pub fn from_tag(tag: &str) -> Result<Self, LossError> {
        let unknown = || LossError::UnknownCoefficients {
            tag: tag.to_owned(),
        };

        let order = match tag.strip_prefix("diffrepr").ok_or_else(unknown)? {
            "" => DEFAULT_ORDER,
            suffix
                if suffix.bytes().all(|b| b.is_ascii_digit())
                    && (suffix.len() == 1 || !suffix.starts_with('0')) =>
            {
                suffix.parse().map_err(|_| unknown())?
            }
            _ => return Err(unknown()),
        };

        let coefficients = coefficients::table(order).ok_or_else(unknown)?;
        debug!("diffusive representation `{tag}` with {order} dampers");
        Ok(Self::new(coefficients))
    }

    /// Returns the coefficient set.
    #[must_use]
    pub fn coefficients(&self) -> &DiffReprCoefficients {
        &self.coefficients
    }

    /// Number of first-order terms, which sizes the state of a time-domain
    /// scheme.
    #[must_use]
    pub fn number_of_dampers(&self) -> usize {
        self.coefficients.order()
    }

    /// Returns the dimensionless viscous network at each position.
    #[must_use]
    pub fn viscous_branches(&self, pipe: &dyn Pipe, x: &Array1<f64>) -> ViscousBranches {
        let DiffReprCoefficients { a0, ai, bi } = &self.coefficients;
        let [rho, mu] = pipe.physics().coefs_at(x, [Coef::Rho, Coef::Mu]);
        let section = pipe.section_at(x);
        let length = pipe.length();
        let scaling = pipe.scaling();

        let resistance = Array1::from_shape_fn(x.len(), |j| {
            PI * mu[j] / (section[j] * section[j]) * length / scaling.resistance()
        });
        let inertance =
            Array1::from_shape_fn(x.len(), |j| rho[j] / section[j] * length / scaling.inertance());

        ViscousBranches {
            r0: &resistance * *a0,
            ri: Array2::from_shape_fn((x.len(), ai.len()), |(j, n)| {
                resistance[j] * ai[n] / bi[n]
            }),
            li: Array2::from_shape_fn((x.len(), ai.len()), |(j, n)| inertance[j] * ai[n]),
        }
    }

    /// Returns the dimensionless thermal network at each position.
    #[must_use]
    pub fn thermal_branches(&self, pipe: &dyn Pipe, x: &Array1<f64>) -> ThermalBranches {
        let DiffReprCoefficients { a0, ai, bi } = &self.coefficients;
        let [rho, kappa, cp, gamma, c] = pipe.physics().coefs_at(
            x,
            [Coef::Rho, Coef::Kappa, Coef::Cp, Coef::Gamma, Coef::C],
        );
        let section = pipe.section_at(x);
        let length = pipe.length();
        let scaling = pipe.scaling();

        let conductance = Array1::from_shape_fn(x.len(), |j| {
            let rho_c = rho[j] * c[j];
            PI * kappa[j] * (gamma[j] - 1.0) / (rho_c * rho_c * cp[j]) * length
                / scaling.conductance()
        });
        let c0 = Array1::from_shape_fn(x.len(), |j| {
            (gamma[j] - 1.0) * section[j] / (rho[j] * c[j] * c[j]) * length / scaling.compliance()
        });

        ThermalBranches {
            g0: &conductance * *a0,
            gi: Array2::from_shape_fn((x.len(), ai.len()), |(j, n)| {
                conductance[j] * ai[n] / bi[n]
            }),
            ci: Array2::from_shape_fn((x.len(), ai.len()), |(j, n)| c0[j] * ai[n]),
            c0,
        }
    }
}

impl ThermoviscousModel for DiffusiveRepresentation {
    fn kind(&self) -> ModelKind {
        ModelKind::DiffusiveRepresentation
    }

    fn loss_flow_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let ViscousBranches { r0, ri, li } = self.viscous_branches(pipe, x);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let jw = Complex64::new(0.0, omegas_scaled[i]);
            let impedance = ri
                .row(j)
                .iter()
                .zip(li.row(j))
                .fold(Complex64::from(r0[j]), |sum, (&r, &l)| {
                    sum + 1.0 / (1.0 / r + 1.0 / (jw * l))
                });
            impedance / jw
        }))
    }

    fn loss_pressure_at(
        &self,
        pipe: &dyn Pipe,
        x: &Array1<f64>,
        omegas_scaled: &Array1<f64>,
    ) -> Result<Array2<Complex64>, LossError> {
        let ThermalBranches { g0, gi, c0, ci } = self.thermal_branches(pipe, x);

        Ok(Array2::from_shape_fn((omegas_scaled.len(), x.len()), |(i, j)| {
            let jw = Complex64::new(0.0, omegas_scaled[i]);
            let y_tilde = gi
                .row(j)
                .iter()
                .zip(ci.row(j))
                .fold(Complex64::from(g0[j]), |sum, (&g, &c)| {
                    sum + 1.0 / (1.0 / g + 1.0 / (jw * c))
                });
            let admittance = 1.0 / (1.0 / (jw * c0[j]) + 1.0 / y_tilde);
            admittance / jw
        }))
    }
}
