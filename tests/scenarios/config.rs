//! Config scenario tests
//!
//! Tests layering of defaults, TOML files and environment variables

use std::io::Write;

use dicecrawl::config::{ConfigError, GameConfig};
use dicecrawl::dice::CharacterClass;
use figment::Jail;

/// Test: no file and no env gives the defaults
#[test]
fn test_defaults_without_sources() {
    Jail::expect_with(|_| {
        let config = GameConfig::load(None).map_err(|e| e.to_string())?;
        assert_eq!(config, GameConfig::default());
        Ok(())
    });
}

/// Test: a TOML file overrides defaults section by section
#[test]
fn test_toml_file_overrides() {
    // inside a jail so env vars set by other tests stay out
    Jail::expect_with(|_| {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
seed = 42

[player]
name = "Mira"
class = "rogue"

[combat]
flee_chance = 0.75
"#
        )
        .expect("write config");

        let config = GameConfig::load(Some(file.path())).map_err(|e| e.to_string())?;
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.player.name, "Mira");
        assert_eq!(config.player.class, CharacterClass::Rogue);
        assert_eq!(config.combat.flee_chance, 0.75);
        // untouched keys keep their defaults
        assert_eq!(config.combat.flee_damage_max, 15);
        assert_eq!(config.combat.log_view, 5);
        Ok(())
    });
}

/// Test: environment variables beat the file
#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dicecrawl.toml",
            r#"
[combat]
flee_chance = 0.75
flee_damage_min = 2
"#,
        )?;
        jail.set_env("DICECRAWL_COMBAT__FLEE_CHANCE", "0.25");
        jail.set_env("DICECRAWL_DEBUG", "true");

        let path = std::path::Path::new("dicecrawl.toml");
        let config = GameConfig::load(Some(path)).map_err(|e| e.to_string())?;
        assert_eq!(config.combat.flee_chance, 0.25);
        assert_eq!(config.combat.flee_damage_min, 2);
        assert!(config.debug);
        Ok(())
    });
}

/// Test: out-of-range values are rejected after merging
#[test]
fn test_invalid_values_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("DICECRAWL_COMBAT__FLEE_DAMAGE_MIN", "30");
        let err = GameConfig::load(None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    });
}

/// Test: a malformed file is a load error
#[test]
fn test_malformed_file() {
    Jail::expect_with(|_| {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "combat = [not toml").expect("write config");
        let err = GameConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        Ok(())
    });
}
