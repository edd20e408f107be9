use std::{convert::Infallible, fmt, str::FromStr};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::LossError;

use super::{
    Bessel, DiffusiveRepresentation, Keefe, Lossless, MiniKeefe, SphericalHarmonics,
    ThermoviscousModel, WebsterLokshin,
};

/// The persisted choice of loss model.
///
/// Deserializes from either a boolean or a tag string, so a configuration
/// file may read `losses = true`, `losses = false` or `losses = "keefe"`.
/// Tags are only checked when the model is built by [`losses_model`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LossesConfig {
    /// `true` selects [`Bessel`], `false` selects [`Lossless`].
    Enabled(bool),
    /// One of `bessel`, `bessel_new`, `diffrepr`, `diffreprN`, `wl`, `keefe`,
    /// `minikeefe` or `sh`.
    Model(String),
}

impl Default for LossesConfig {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

impl FromStr for LossesConfig {
    type Err = Infallible;

    /// Reads `"true"` and `"false"` as flags and anything else as a tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "true" => Self::Enabled(true),
            "false" => Self::Enabled(false),
            tag => Self::Model(tag.to_owned()),
        })
    }
}

impl fmt::Display for LossesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled(enabled) => write!(f, "{enabled}"),
            Self::Model(tag) => f.write_str(tag),
        }
    }
}

/// Anything [`losses_model`] can build a model from.
#[derive(Debug)]
pub enum LossSelection {
    Flag(bool),
    Tag(String),
    /// An existing model, returned unchanged.
    Model(Box<dyn ThermoviscousModel>),
}

impl From<bool> for LossSelection {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for LossSelection {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_owned())
    }
}

impl From<String> for LossSelection {
    fn from(tag: String) -> Self {
        Self::Tag(tag)
    }
}

impl From<LossesConfig> for LossSelection {
    fn from(config: LossesConfig) -> Self {
        match config {
            LossesConfig::Enabled(flag) => Self::Flag(flag),
            LossesConfig::Model(tag) => Self::Tag(tag),
        }
    }
}

impl From<&LossesConfig> for LossSelection {
    fn from(config: &LossesConfig) -> Self {
        config.clone().into()
    }
}

impl From<Box<dyn ThermoviscousModel>> for LossSelection {
    fn from(model: Box<dyn ThermoviscousModel>) -> Self {
        Self::Model(model)
    }
}

/// Builds the loss model named by a flag, a tag or a configuration.
///
/// | selection                   | model                               |
/// |-----------------------------|-------------------------------------|
/// | an existing model           | returned unchanged                  |
/// | `false`                     | [`Lossless`]                        |
/// | `true` or `"bessel"`        | [`Bessel`] with the geometric radius |
/// | `"bessel_new"`              | [`Bessel`] with the hydraulic radius |
/// | `"diffrepr"`, `"diffreprN"` | [`DiffusiveRepresentation`]         |
/// | `"wl"`                      | [`WebsterLokshin`]                  |
/// | `"keefe"`                   | [`Keefe`]                           |
/// | `"minikeefe"`               | [`MiniKeefe`]                       |
/// | `"sh"`                      | [`SphericalHarmonics`]              |
///
/// # Example
///
/// ```
/// use twine_acoustics::{ModelKind, losses_model};
///
/// let model = losses_model("keefe")?;
/// assert_eq!(model.kind(), ModelKind::Keefe);
///
/// let same = losses_model(model)?;
/// assert_eq!(same.kind(), ModelKind::Keefe);
/// # Ok::<(), twine_acoustics::LossError>(())
/// ```
///
/// # Errors
///
/// Returns [`LossError::UnknownModel`] for an unknown tag,
/// [`LossError::UnknownCoefficients`] for an unknown diffusive order and
/// [`LossError::MissingFeature`] for `"sh"` when special functions are
/// compiled out.
pub fn losses_model(
    selection: impl Into<LossSelection>,
) -> Result<Box<dyn ThermoviscousModel>, LossError> {
    let model: Box<dyn ThermoviscousModel> = match selection.into() {
        LossSelection::Model(model) => return Ok(model),
        LossSelection::Flag(false) => Box::new(Lossless),
        LossSelection::Flag(true) => Box::new(Bessel::new(false)),
        LossSelection::Tag(tag) => match tag.as_str() {
            "bessel" => Box::new(Bessel::new(false)),
            "bessel_new" => Box::new(Bessel::new(true)),
            "wl" => Box::new(WebsterLokshin),
            "keefe" => Box::new(Keefe),
            "minikeefe" => Box::new(MiniKeefe),
            "sh" => Box::new(SphericalHarmonics::new()?),
            diffrepr if diffrepr.starts_with("diffrepr") => {
                Box::new(DiffusiveRepresentation::from_tag(diffrepr)?)
            }
            _ => return Err(LossError::UnknownModel { tag }),
        },
    };

    debug!("losses model: {}", model.kind());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::losses::ModelKind;

    #[test]
    fn dispatches_every_tag() -> Result<(), LossError> {
        let cases = [
            (LossSelection::from(false), ModelKind::Lossless),
            (true.into(), ModelKind::Bessel),
            ("bessel".into(), ModelKind::Bessel),
            ("bessel_new".into(), ModelKind::Bessel),
            ("diffrepr".into(), ModelKind::DiffusiveRepresentation),
            ("diffrepr4".into(), ModelKind::DiffusiveRepresentation),
            ("wl".into(), ModelKind::WebsterLokshin),
            ("keefe".into(), ModelKind::Keefe),
            ("minikeefe".into(), ModelKind::MiniKeefe),
        ];

        for (selection, kind) in cases {
            assert_eq!(losses_model(selection)?.kind(), kind);
        }

        Ok(())
    }

    #[test]
    fn bessel_flag_controls_derivatives() -> Result<(), LossError> {
        assert!(losses_model("bessel")?.supports_derivatives());
        assert!(!losses_model("bessel_new")?.supports_derivatives());
        Ok(())
    }

    #[cfg(feature = "spherical-harmonics")]
    #[test]
    fn builds_spherical_harmonics() -> Result<(), LossError> {
        assert_eq!(losses_model("sh")?.kind(), ModelKind::SphericalHarmonics);
        Ok(())
    }

    #[cfg(not(feature = "spherical-harmonics"))]
    #[test]
    fn spherical_harmonics_needs_the_feature() {
        assert!(matches!(
            losses_model("sh"),
            Err(LossError::MissingFeature { .. })
        ));
    }

    #[test]
    fn existing_models_pass_through() -> Result<(), LossError> {
        let model = losses_model(losses_model(losses_model(true)?)?)?;
        assert_eq!(model.kind(), losses_model(true)?.kind());
        Ok(())
    }

    #[test]
    fn unknown_tags_list_the_valid_ones() {
        let error = losses_model("bogus_tag").unwrap_err();
        assert_eq!(
            error,
            LossError::UnknownModel {
                tag: "bogus_tag".into()
            }
        );

        let message = error.to_string();
        for tag in ["bessel_new", "diffreprN", "wl", "minikeefe", "sh"] {
            assert!(message.contains(tag), "{message}");
        }

        // Tags are case sensitive.
        assert!(losses_model("Bessel").is_err());
        assert!(losses_model("True").is_err());
    }

    #[test]
    fn unknown_diffusive_order_is_a_coefficient_error() {
        assert!(matches!(
            losses_model("diffrepr11"),
            Err(LossError::UnknownCoefficients { .. })
        ));
    }

    #[test]
    fn config_parses_flags_and_tags() {
        assert_eq!(LossesConfig::default(), LossesConfig::Enabled(true));
        assert_eq!("false".parse(), Ok(LossesConfig::Enabled(false)));
        assert_eq!(
            "diffrepr16".parse(),
            Ok(LossesConfig::Model("diffrepr16".into()))
        );
        assert_eq!(LossesConfig::Model("wl".into()).to_string(), "wl");
    }

    #[test]
    fn config_builds_its_model() -> Result<(), LossError> {
        let config: LossesConfig = "minikeefe".parse().unwrap();
        assert_eq!(losses_model(&config)?.kind(), ModelKind::MiniKeefe);
        assert_eq!(losses_model(config)?.kind(), ModelKind::MiniKeefe);
        assert_eq!(
            losses_model(LossesConfig::default())?.kind(),
            ModelKind::Bessel
        );
        Ok(())
    }
}
