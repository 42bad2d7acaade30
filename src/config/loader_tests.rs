//! Tests for configuration loading and precedence.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("autocopy_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_ends_with_autocopy_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("autocopy") && path_str.ends_with("config.toml"),
            "unexpected default config path: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_autocopy_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("autocopy.log"),
        "Default log path should end with 'autocopy.log', got: {:?}",
        path
    );
}

#[test]
fn defaults_match_documented_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.gesture.required_clicks, 1);
    assert_eq!(config.gesture.min_inter_click_ms, 0);
    assert_eq!(config.gesture.max_inter_click_ms, 500);
    assert_eq!(config.max_lines, 200);
    assert_eq!(config.max_line_bytes, 4096);
    assert!(!config.tui);
    assert!(!config.show_text);
    assert!(!config.batch);
    assert_eq!(config.capture_log, None);
    assert_eq!(config.click_settle_ms, 200);
    assert_eq!(config.copy_settle_ms, 100);
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/autocopy.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = temp_config(
        "valid",
        r#"
required_clicks = 2
require_alt = true
allow_ctrl2 = true
min_inter_click_ms = 40
max_inter_click_ms = 600
max_lines = 50
max_line_bytes = 1024
show_text = true
capture_log = "/tmp/captures.log"
click_settle_ms = 150
"#,
    );

    let config = load_config_file(&path)
        .expect("valid TOML")
        .expect("file exists");

    assert_eq!(config.required_clicks, Some(2));
    assert_eq!(config.require_alt, Some(true));
    assert_eq!(config.require_ctrl, None);
    assert_eq!(config.allow_ctrl2, Some(true));
    assert_eq!(config.min_inter_click_ms, Some(40));
    assert_eq!(config.max_inter_click_ms, Some(600));
    assert_eq!(config.max_lines, Some(50));
    assert_eq!(config.max_line_bytes, Some(1024));
    assert_eq!(config.show_text, Some(true));
    assert_eq!(config.capture_log, Some(PathBuf::from("/tmp/captures.log")));
    assert_eq!(config.click_settle_ms, Some(150));
    assert_eq!(config.copy_settle_ms, None);

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = temp_config("invalid", "this is not valid TOML ][}{");

    match load_config_file(&path) {
        Err(ConfigError::ParseError { path: err_path, .. }) => assert_eq!(err_path, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let path = temp_config("unknown_key", "theme = \"dark\"\n");

    assert!(matches!(
        load_config_file(&path),
        Err(ConfigError::ParseError { .. })
    ));

    fs::remove_file(path).ok();
}

#[test]
fn merge_none_gives_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_clamps_out_of_range_values() {
    let file = ConfigFile {
        required_clicks: Some(9),
        max_lines: Some(5),
        max_line_bytes: Some(10_000_000),
        min_inter_click_ms: Some(-20),
        copy_settle_ms: Some(-1),
        ..Default::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.gesture.required_clicks, 3);
    assert_eq!(resolved.max_lines, MIN_MAX_LINES);
    assert_eq!(resolved.max_line_bytes, MAX_LINE_BYTES);
    assert_eq!(resolved.gesture.min_inter_click_ms, 0);
    assert_eq!(resolved.copy_settle_ms, 0);
}

#[test]
fn merge_keeps_defaults_for_missing_fields() {
    let file = ConfigFile {
        show_text: Some(true),
        ..Default::default()
    };

    let resolved = merge_config(Some(file));

    assert!(resolved.show_text);
    assert_eq!(resolved.max_lines, DEFAULT_MAX_LINES);
    assert_eq!(resolved.gesture, GestureConfig::default());
}

#[test]
fn cli_click_count_and_modifier_override_file() {
    let file = ConfigFile {
        required_clicks: Some(3),
        require_alt: Some(true),
        ..Default::default()
    };
    let cli = CliOverrides {
        required_clicks: Some(2),
        modifier: Some(ModifierRequirement::Ctrl),
        ..Default::default()
    };

    let resolved = apply_cli_overrides(merge_config(Some(file)), &cli);

    assert_eq!(resolved.gesture.required_clicks, 2);
    assert!(resolved.gesture.require_ctrl);
    assert!(!resolved.gesture.require_alt);
}

#[test]
fn cli_alt_clears_ctrl_requirement() {
    let base = ResolvedConfig {
        gesture: GestureConfig {
            require_ctrl: true,
            ..GestureConfig::default()
        },
        ..ResolvedConfig::default()
    };
    let cli = CliOverrides {
        modifier: Some(ModifierRequirement::Alt),
        ..Default::default()
    };

    let resolved = apply_cli_overrides(base, &cli);

    assert!(resolved.gesture.require_alt);
    assert!(!resolved.gesture.require_ctrl);
}

#[test]
fn cli_flags_cannot_switch_off_file_settings() {
    let file = ConfigFile {
        show_text: Some(true),
        allow_ctrl1: Some(true),
        ..Default::default()
    };

    let resolved = apply_cli_overrides(merge_config(Some(file)), &CliOverrides::default());

    assert!(resolved.show_text);
    assert!(resolved.gesture.allow_ctrl1);
}

#[test]
fn cli_numeric_values_are_clamped() {
    let cli = CliOverrides {
        max_lines: Some(1_000_000),
        max_line_bytes: Some(1),
        min_inter_click_ms: Some(-5),
        max_inter_click_ms: Some(800),
        required_clicks: Some(0),
        ..Default::default()
    };

    let resolved = apply_cli_overrides(ResolvedConfig::default(), &cli);

    assert_eq!(resolved.max_lines, MAX_MAX_LINES);
    assert_eq!(resolved.max_line_bytes, MIN_LINE_BYTES);
    assert_eq!(resolved.gesture.min_inter_click_ms, 0);
    assert_eq!(resolved.gesture.max_inter_click_ms, 800);
    assert_eq!(resolved.gesture.required_clicks, 1);
}

#[test]
fn cli_mode_flags_apply() {
    let cli = CliOverrides {
        tui: true,
        batch: true,
        show_text: true,
        allow_ctrl2: true,
        capture_log: Some(PathBuf::from("cli.log")),
        ..Default::default()
    };

    let resolved = apply_cli_overrides(ResolvedConfig::default(), &cli);

    assert!(resolved.tui);
    assert!(resolved.batch);
    assert!(resolved.show_text);
    assert!(resolved.gesture.allow_ctrl2);
    assert_eq!(resolved.capture_log, Some(PathBuf::from("cli.log")));
}

#[test]
#[serial(autocopy_env)]
fn env_capture_log_overrides_file_but_not_cli() {
    env::set_var(CAPTURE_LOG_ENV_VAR, "/tmp/from_env.log");

    let file = ConfigFile {
        capture_log: Some(PathBuf::from("/tmp/from_file.log")),
        ..Default::default()
    };
    let with_env = apply_env_overrides(merge_config(Some(file)));
    assert_eq!(with_env.capture_log, Some(PathBuf::from("/tmp/from_env.log")));

    let cli = CliOverrides {
        capture_log: Some(PathBuf::from("/tmp/from_cli.log")),
        ..Default::default()
    };
    let resolved = apply_cli_overrides(with_env, &cli);
    assert_eq!(resolved.capture_log, Some(PathBuf::from("/tmp/from_cli.log")));

    env::remove_var(CAPTURE_LOG_ENV_VAR);
}

#[test]
#[serial(autocopy_env)]
fn empty_env_capture_log_is_ignored() {
    env::set_var(CAPTURE_LOG_ENV_VAR, "");

    let resolved = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(resolved.capture_log, None);

    env::remove_var(CAPTURE_LOG_ENV_VAR);
}

#[test]
#[serial(autocopy_env)]
fn load_config_with_precedence_prefers_explicit_path() {
    env::remove_var(CONFIG_ENV_VAR);

    let explicit_path = temp_config("explicit", "required_clicks = 3\n");
    let env_path = temp_config("env", "required_clicks = 2\n");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("valid config")
        .expect("file exists");
    assert_eq!(config.required_clicks, Some(3));

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial(autocopy_env)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    env::remove_var(CONFIG_ENV_VAR);

    let env_path = temp_config("env_only", "max_lines = 42\n");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(None)
        .expect("valid config")
        .expect("file exists");
    assert_eq!(config.max_lines, Some(42));

    fs::remove_file(env_path).ok();
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial(autocopy_env)]
fn load_config_with_precedence_missing_env_file_is_not_an_error() {
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/autocopy/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));

    env::remove_var(CONFIG_ENV_VAR);
}
