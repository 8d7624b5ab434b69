use std::path::PathBuf;

use serde::Deserialize;

use bsharp_types::Instrument;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    instrument: Option<String>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    clip_dir: Option<PathBuf>,
    persist_scores: Option<bool>,
}

pub struct Config {
    defaults: DefaultsConfig,
    runtime: RuntimeConfig,
}

impl Config {
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_runtime(&mut base.runtime, user.runtime);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            runtime: base.runtime,
        }
    }

    /// Instrument whose sample set loads at startup.
    pub fn default_instrument(&self) -> Instrument {
        self.defaults
            .instrument
            .as_deref()
            .and_then(parse_instrument)
            .unwrap_or_default()
    }

    /// Clip directory override; falls back to [`crate::paths::clips_dir`].
    pub fn clip_dir(&self) -> PathBuf {
        self.runtime
            .clip_dir
            .clone()
            .unwrap_or_else(crate::paths::clips_dir)
    }

    /// Whether the high score and statistics are written to disk.
    pub fn persist_scores(&self) -> bool {
        self.runtime.persist_scores.unwrap_or(true)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bsharp").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.instrument.is_some() {
        base.instrument = user.instrument;
    }
}

fn merge_runtime(base: &mut RuntimeConfig, user: RuntimeConfig) {
    if user.clip_dir.is_some() {
        base.clip_dir = user.clip_dir;
    }
    if user.persist_scores.is_some() {
        base.persist_scores = user.persist_scores;
    }
}

fn parse_instrument(s: &str) -> Option<Instrument> {
    match s.to_lowercase().as_str() {
        "piano" => Some(Instrument::Piano),
        "violin" => Some(Instrument::Violin),
        "saxophone" | "sax" => Some(Instrument::Saxophone),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.defaults.instrument.as_deref(), Some("Piano"));
        assert_eq!(config.runtime.persist_scores, Some(true));
        assert!(config.runtime.clip_dir.is_none());
    }

    #[test]
    fn parse_instruments() {
        assert_eq!(parse_instrument("Piano"), Some(Instrument::Piano));
        assert_eq!(parse_instrument("violin"), Some(Instrument::Violin));
        assert_eq!(parse_instrument("sax"), Some(Instrument::Saxophone));
        assert_eq!(parse_instrument("kazoo"), None);
    }

    #[test]
    fn missing_fields_fall_back() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let config = Config {
            defaults: file.defaults,
            runtime: file.runtime,
        };
        assert_eq!(config.default_instrument(), Instrument::Piano);
        assert!(config.persist_scores());
    }
}
