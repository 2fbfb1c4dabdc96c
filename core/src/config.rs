//! Configuration: `$DOJO_HOME/config.toml` merged with CLI overrides.
//!
//! Everything has a default; a missing config file is not an error, a
//! malformed one is.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use dojo_content::AcademyId;
use serde::Deserialize;

use crate::error::DojoErr;
use crate::error::Result;

pub const DOJO_HOME_ENV: &str = "DOJO_HOME";
const CONFIG_TOML_FILE: &str = "config.toml";

const DEFAULT_BUILD_START_DELAY_MS: u64 = 400;
const DEFAULT_BUILD_STEP_INTERVAL_MS: u64 = 800;
const DEFAULT_TYPEWRITER_INTERVAL_MS: u64 = 12;
const DEFAULT_TYPEWRITER_CHARS_PER_TICK: u16 = 3;

/// Resolved configuration: defaults, overlaid with `config.toml`, overlaid
/// with CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding all dojo state (config, logs). `~/.dojo` unless the
    /// `DOJO_HOME` environment variable says otherwise.
    pub dojo_home: PathBuf,

    /// Academy to open directly, skipping the picker.
    pub default_academy: Option<AcademyId>,

    /// Pause before the first step of the guided build-order playback.
    pub build_start_delay: Duration,

    /// Interval between build-order playback steps.
    pub build_step_interval: Duration,

    /// Interval between typewriter reveal ticks.
    pub typewriter_interval: Duration,

    /// Graphemes revealed per typewriter tick.
    pub typewriter_chars_per_tick: u16,
}

/// On-disk shape of `config.toml`. Every field optional; unknown keys are
/// rejected so typos fail loudly instead of silently doing nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    default_academy: Option<AcademyId>,
    build_start_delay_ms: Option<u64>,
    build_step_interval_ms: Option<u64>,
    typewriter_interval_ms: Option<u64>,
    typewriter_chars_per_tick: Option<u16>,
}

/// Values that outrank the config file, e.g. from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub academy: Option<AcademyId>,
    pub dojo_home: Option<PathBuf>,
}

impl Config {
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let dojo_home = overrides
            .dojo_home
            .or_else(|| std::env::var_os(DOJO_HOME_ENV).map(PathBuf::from))
            .or_else(|| dirs::home_dir().map(|home| home.join(".dojo")))
            .unwrap_or_else(|| PathBuf::from(".dojo"));
        let config_toml = load_config_toml(&dojo_home)?;
        Ok(Self::merge(dojo_home, config_toml, overrides.academy))
    }

    fn merge(dojo_home: PathBuf, file: ConfigToml, academy: Option<AcademyId>) -> Self {
        Self {
            dojo_home,
            default_academy: academy.or(file.default_academy),
            build_start_delay: Duration::from_millis(
                file.build_start_delay_ms
                    .unwrap_or(DEFAULT_BUILD_START_DELAY_MS),
            ),
            build_step_interval: Duration::from_millis(
                file.build_step_interval_ms
                    .unwrap_or(DEFAULT_BUILD_STEP_INTERVAL_MS),
            ),
            typewriter_interval: Duration::from_millis(
                file.typewriter_interval_ms
                    .unwrap_or(DEFAULT_TYPEWRITER_INTERVAL_MS),
            ),
            typewriter_chars_per_tick: file
                .typewriter_chars_per_tick
                .unwrap_or(DEFAULT_TYPEWRITER_CHARS_PER_TICK)
                .max(1),
        }
    }

    /// Directory the TUI writes its log files into.
    pub fn log_dir(&self) -> PathBuf {
        self.dojo_home.join("log")
    }
}

fn load_config_toml(dojo_home: &Path) -> Result<ConfigToml> {
    let path = dojo_home.join(CONFIG_TOML_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(ConfigToml::default());
        }
        Err(err) => {
            return Err(DojoErr::ConfigRead { path, source: err });
        }
    };
    toml::from_str(&contents).map_err(|err| DojoErr::ConfigParse {
        path,
        source: Box::new(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn load_from(dir: &Path, academy: Option<AcademyId>) -> Result<Config> {
        Config::load(ConfigOverrides {
            academy,
            dojo_home: Some(dir.to_path_buf()),
        })
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let home = tempfile::tempdir().expect("tempdir");
        let config = load_from(home.path(), None).expect("load");
        assert_eq!(config.default_academy, None);
        assert_eq!(config.build_start_delay, Duration::from_millis(400));
        assert_eq!(config.build_step_interval, Duration::from_millis(800));
        assert_eq!(config.typewriter_interval, Duration::from_millis(12));
        assert_eq!(config.typewriter_chars_per_tick, 3);
    }

    #[test]
    fn config_file_values_are_picked_up() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            home.path().join("config.toml"),
            "default_academy = \"agentic-rag\"\nbuild_step_interval_ms = 250\n",
        )
        .expect("write config");
        let config = load_from(home.path(), None).expect("load");
        assert_eq!(config.default_academy, Some(AcademyId::AgenticRag));
        assert_eq!(config.build_step_interval, Duration::from_millis(250));
        // Untouched fields keep their defaults.
        assert_eq!(config.build_start_delay, Duration::from_millis(400));
    }

    #[test]
    fn cli_override_outranks_config_file() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            home.path().join("config.toml"),
            "default_academy = \"llm-evals\"\n",
        )
        .expect("write config");
        let config =
            load_from(home.path(), Some(AcademyId::ToolUse)).expect("load");
        assert_eq!(config.default_academy, Some(AcademyId::ToolUse));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(home.path().join("config.toml"), "typo_key = 1\n")
            .expect("write config");
        let err = load_from(home.path(), None);
        assert!(matches!(err, Err(DojoErr::ConfigParse { .. })));
    }

    #[test]
    fn zero_chars_per_tick_is_clamped_to_one() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            home.path().join("config.toml"),
            "typewriter_chars_per_tick = 0\n",
        )
        .expect("write config");
        let config = load_from(home.path(), None).expect("load");
        assert_eq!(config.typewriter_chars_per_tick, 1);
    }
}
