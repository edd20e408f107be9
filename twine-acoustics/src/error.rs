use thiserror::Error;

/// Errors that may occur when building or evaluating a loss model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LossError {
    /// The configuration tag does not name a known loss model.
    #[error(
        "unknown losses model `{tag}`: expected `true`, `false`, `bessel`, `bessel_new`, \
         `diffrepr`, `diffreprN`, `wl`, `keefe`, `minikeefe` or `sh`"
    )]
    UnknownModel { tag: String },

    /// No precomputed diffusive-representation table matches the tag.
    #[error(
        "diffusive representation coefficients not available for `{tag}`: \
         expected `diffrepr` or `diffreprN` with N in 0..=8 or 16"
    )]
    UnknownCoefficients { tag: String },

    /// The residue and pole coefficients of a diffusive representation differ in length.
    #[error("diffusive representation needs as many `ai` as `bi` (got {ai} and {bi})")]
    MismatchedCoefficients { ai: usize, bi: usize },

    /// The operation is not provided by this model.
    ///
    /// Indicates a permanent capability gap, not a transient failure.
    #[error("`{operation}` is not implemented by the `{model}` losses model")]
    NotImplemented {
        operation: &'static str,
        model: &'static str,
        context: Option<String>,
    },

    /// The model needs a cargo feature that was disabled at build time.
    #[error("this losses model requires the `{feature}` feature")]
    MissingFeature { feature: &'static str },

    /// The input values are invalid or inconsistent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The calculation failed due to a numerical error.
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl LossError {
    pub(crate) fn not_implemented(operation: &'static str, model: &'static str) -> Self {
        Self::NotImplemented {
            operation,
            model,
            context: None,
        }
    }
}
