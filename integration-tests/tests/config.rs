use integration_tests::bore::BoreConfig;
use twine_acoustics::{LossError, LossesConfig, ModelKind, Pipe};

#[test]
fn bore_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let config: BoreConfig = toml::from_str(
        r#"
        length = 0.6
        entry_radius = 0.007
        exit_radius = 0.007
        losses = "keefe"
        "#,
    )?;

    assert_eq!(config.losses, LossesConfig::Model("keefe".into()));
    assert_eq!(config.temperature, 20.0);
    assert_eq!(config.losses_model()?.kind(), ModelKind::Keefe);

    let pipe = config.pipe()?;
    assert_eq!(pipe.length(), 0.6);

    Ok(())
}

#[test]
fn bore_from_json_with_fixed_air() -> Result<(), Box<dyn std::error::Error>> {
    let config: BoreConfig = serde_json::from_str(
        r#"{
            "length": 0.3,
            "entry_radius": 0.01,
            "exit_radius": 0.02,
            "air": {
                "rho": 1.2,
                "mu": 1.8e-5,
                "kappa": 0.025,
                "cp": 1005.0,
                "gamma": 1.4,
                "c": 340.0
            },
            "losses": false
        }"#,
    )?;

    assert_eq!(config.losses, LossesConfig::Enabled(false));
    assert_eq!(config.losses_model()?.kind(), ModelKind::Lossless);
    assert_eq!(config.air.map(|air| air.gamma), Some(1.4));
    config.pipe()?;

    Ok(())
}

#[test]
fn bore_from_yaml_defaults_to_bessel() -> Result<(), Box<dyn std::error::Error>> {
    let config: BoreConfig = serde_yaml::from_str(
        "
        length: 0.45
        entry_radius: 0.004
        exit_radius: 0.03
        temperature: 25.0
        ",
    )?;

    assert_eq!(config.losses, LossesConfig::default());
    assert_eq!(config.losses_model()?.kind(), ModelKind::Bessel);

    Ok(())
}

#[test]
fn diffusive_orders_survive_a_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let config = BoreConfig {
        length: 0.5,
        entry_radius: 0.008,
        exit_radius: 0.008,
        temperature: 20.0,
        air: None,
        losses: "diffrepr4".parse()?,
    };

    let text = toml::to_string(&config)?;
    assert!(text.contains(r#"losses = "diffrepr4""#), "{text}");

    let back: BoreConfig = toml::from_str(&text)?;
    assert_eq!(back, config);

    let model = back.losses_model()?;
    assert_eq!(model.kind(), ModelKind::DiffusiveRepresentation);

    Ok(())
}

#[test]
fn flags_serialize_as_booleans() -> Result<(), serde_json::Error> {
    assert_eq!(serde_json::to_string(&LossesConfig::Enabled(true))?, "true");
    assert_eq!(
        serde_json::to_string(&LossesConfig::Model("sh".into()))?,
        r#""sh""#
    );
    assert_eq!(
        serde_json::from_str::<LossesConfig>(r#""bessel_new""#)?,
        LossesConfig::Model("bessel_new".into())
    );
    Ok(())
}

#[test]
fn unknown_tags_parse_but_fail_to_build() -> Result<(), Box<dyn std::error::Error>> {
    let config: BoreConfig = toml::from_str(
        r#"
        length = 0.3
        entry_radius = 0.01
        exit_radius = 0.01
        losses = "lossy"
        "#,
    )?;

    assert_eq!(
        config.losses_model().unwrap_err(),
        LossError::UnknownModel {
            tag: "lossy".into()
        }
    );

    Ok(())
}

#[test]
fn invalid_dimensions_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let config: BoreConfig = serde_json::from_str(
        r#"{ "length": 0.3, "entry_radius": 0.0, "exit_radius": 0.01 }"#,
    )?;
    assert!(matches!(config.pipe(), Err(LossError::InvalidInput(_))));
    Ok(())
}
