use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    move |key: &str| vars.get(key).cloned()
}

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("ride_control_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("ride.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_match_reference_ride() {
    let settings = load_settings_from(None, no_env).expect("settings");
    assert_eq!(settings, RideSettings::default());
    assert_eq!(settings.fleet_size, 21);
    assert_eq!(settings.advance_interval(), Duration::from_secs(5));
    assert_eq!(settings.history_display_limit, 3);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("ride_control_definitely_missing.toml");
    let settings = load_settings_from(Some(path.as_path()), no_env).expect("settings");
    assert_eq!(settings, RideSettings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config("fleet_size = 9\nadvance_interval_ms = 250\n");

    let settings = load_settings_from(Some(path.as_path()), no_env).expect("settings");

    assert_eq!(settings.fleet_size, 9);
    assert_eq!(settings.advance_interval_ms, 250);
    assert_eq!(settings.blink_interval_ms, 5_000);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unknown_file_keys_are_rejected() {
    let path = temp_config("fleet = 3\n");

    let err = load_settings_from(Some(path.as_path()), no_env).expect_err("should fail");
    assert!(err.to_string().contains("failed to parse config file"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_alias_wins() {
    let path = temp_config("fleet_size = 9\n");
    let env = env_from(&[
        ("RIDE_FLEET_SIZE", "12"),
        ("RIDE_BLINK_INTERVAL_MS", "750"),
        ("APP__BLINK_INTERVAL_MS", "500"),
    ]);

    let settings = load_settings_from(Some(path.as_path()), env).expect("settings");

    assert_eq!(settings.fleet_size, 12);
    assert_eq!(settings.blink_interval_ms, 500);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_env_value_is_reported() {
    let env = env_from(&[("RIDE_ADVANCE_INTERVAL_MS", "soon")]);

    let err = load_settings_from(None, env).expect_err("should fail");

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::InvalidOverride {
            key: "RIDE_ADVANCE_INTERVAL_MS".to_string(),
            value: "soon".to_string(),
        })
    );
}

#[test]
fn zero_values_fail_validation() {
    let empty = RideSettings {
        fleet_size: 0,
        ..RideSettings::default()
    };
    assert_eq!(empty.validate(), Err(ConfigError::EmptyFleet));

    let frozen = RideSettings {
        advance_interval_ms: 0,
        ..RideSettings::default()
    };
    assert_eq!(
        frozen.validate(),
        Err(ConfigError::ZeroInterval {
            field: "advance_interval_ms"
        })
    );

    let dark = RideSettings {
        blink_interval_ms: 0,
        ..RideSettings::default()
    };
    assert_eq!(
        dark.validate(),
        Err(ConfigError::ZeroInterval {
            field: "blink_interval_ms"
        })
    );
}

#[test]
fn zero_history_limit_from_env_is_rejected() {
    let env = env_from(&[("RIDE_HISTORY_DISPLAY_LIMIT", "0")]);

    let err = load_settings_from(None, env).expect_err("should fail");

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::EmptyHistory)
    );
}
