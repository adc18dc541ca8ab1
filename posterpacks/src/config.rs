//! User configuration.
//!
//! Settings live in an INI file with one section per concern:
//!
//! ```ini
//! [General]
//! defaultPosterWeight = 50
//! globalPostersOnly = false
//!
//! [Poster Chances]
//! adjustPosterChances = true
//! posterChanceMultiplier = 0.5
//!
//! [Foreign Posters]
//! blacklist = chalk_face,principal_poster
//! invertBlacklist = false
//!
//! [Debug]
//! logAllPosters = false
//! ```
//!
//! Missing keys take their defaults. A value that does not parse is an error
//! rather than a silent default.

use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::info;

use crate::selection::Blacklist;

/// Default poster weight when neither the poster nor its pack sets one.
pub const DEFAULT_POSTER_WEIGHT: i32 = 50;

/// Default blend factor for poster chance adjustment.
pub const DEFAULT_CHANCE_MULTIPLIER: f32 = 0.5;

const SECTION_GENERAL: &str = "General";
const SECTION_CHANCES: &str = "Poster Chances";
const SECTION_FOREIGN: &str = "Foreign Posters";
const SECTION_DEBUG: &str = "Debug";

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or parsed as INI.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// The file could not be written.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A key holds a value of the wrong type.
    #[error("invalid value '{value}' for [{section}] {key}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

/// Poster loading and selection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PostersConfig {
    /// Weight used when neither poster nor pack sets a positive one.
    pub default_weight: i32,

    /// Treat every poster as global, ignoring room and chalkboard modes.
    pub global_posters_only: bool,

    /// Rescale a level's poster chance by how much its poster list changed.
    pub adjust_poster_chances: bool,

    /// How far to move toward the rescaled chance (0 = not at all, 1 = fully).
    pub poster_chance_multiplier: f32,

    /// Names of non-user posters to strip from levels.
    pub foreign_blacklist: Blacklist,

    /// Log every level's final poster list.
    pub log_all_posters: bool,
}

impl Default for PostersConfig {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_POSTER_WEIGHT,
            global_posters_only: false,
            adjust_poster_chances: true,
            poster_chance_multiplier: DEFAULT_CHANCE_MULTIPLIER,
            foreign_blacklist: Blacklist::default(),
            log_all_posters: false,
        }
    }
}

impl PostersConfig {
    /// Load from an INI file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Load from an INI file, writing the defaults first if it does not exist.
    pub fn load_or_create(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!(path = %path.display(), "Created default poster configuration");
            return Ok(config);
        }
        Self::load(path)
    }

    /// Read settings from parsed INI data.
    pub fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let defaults = Self::default();

        let blacklist = ini
            .get_from(Some(SECTION_FOREIGN), "blacklist")
            .unwrap_or_default();
        let invert = read_bool(ini, SECTION_FOREIGN, "invertBlacklist", false)?;

        Ok(Self {
            default_weight: read_value(
                ini,
                SECTION_GENERAL,
                "defaultPosterWeight",
                defaults.default_weight,
            )?,
            global_posters_only: read_bool(
                ini,
                SECTION_GENERAL,
                "globalPostersOnly",
                defaults.global_posters_only,
            )?,
            adjust_poster_chances: read_bool(
                ini,
                SECTION_CHANCES,
                "adjustPosterChances",
                defaults.adjust_poster_chances,
            )?,
            poster_chance_multiplier: read_value(
                ini,
                SECTION_CHANCES,
                "posterChanceMultiplier",
                defaults.poster_chance_multiplier,
            )?,
            foreign_blacklist: Blacklist::parse(blacklist, invert),
            log_all_posters: read_bool(
                ini,
                SECTION_DEBUG,
                "logAllPosters",
                defaults.log_all_posters,
            )?,
        })
    }

    /// Serialize settings to INI data.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION_GENERAL))
            .set("defaultPosterWeight", self.default_weight.to_string())
            .set("globalPostersOnly", self.global_posters_only.to_string());
        ini.with_section(Some(SECTION_CHANCES))
            .set("adjustPosterChances", self.adjust_poster_chances.to_string())
            .set(
                "posterChanceMultiplier",
                self.poster_chance_multiplier.to_string(),
            );
        ini.with_section(Some(SECTION_FOREIGN))
            .set("blacklist", self.foreign_blacklist.to_raw())
            .set(
                "invertBlacklist",
                self.foreign_blacklist.is_inverted().to_string(),
            );
        ini.with_section(Some(SECTION_DEBUG))
            .set("logAllPosters", self.log_all_posters.to_string());
        ini
    }

    /// Write settings to an INI file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_error)?;
            }
        }
        self.to_ini().write_to_file(path).map_err(write_error)
    }

    /// Set the default poster weight.
    pub fn with_default_weight(mut self, weight: i32) -> Self {
        self.default_weight = weight;
        self
    }

    /// Route every poster into the global pool.
    pub fn with_global_posters_only(mut self, enabled: bool) -> Self {
        self.global_posters_only = enabled;
        self
    }

    /// Configure chance adjustment.
    pub fn with_chance_adjustment(mut self, enabled: bool, multiplier: f32) -> Self {
        self.adjust_poster_chances = enabled;
        self.poster_chance_multiplier = multiplier;
        self
    }

    /// Set the foreign poster blacklist.
    pub fn with_blacklist(mut self, blacklist: Blacklist) -> Self {
        self.foreign_blacklist = blacklist;
        self
    }

    /// Log every level's final poster list.
    pub fn with_log_all_posters(mut self, enabled: bool) -> Self {
        self.log_all_posters = enabled;
        self
    }
}

fn read_value<T: FromStr>(ini: &Ini, section: &str, key: &str, default: T) -> ConfigResult<T> {
    match ini.get_from(Some(section), key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| invalid(section, key, raw)),
    }
}

fn read_bool(ini: &Ini, section: &str, key: &str, default: bool) -> ConfigResult<bool> {
    match ini.get_from(Some(section), key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| invalid(section, key, raw)),
    }
}

fn invalid(section: &str, key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PostersConfig::default();
        assert_eq!(config.default_weight, 50);
        assert!(config.adjust_poster_chances);
        assert_eq!(config.poster_chance_multiplier, 0.5);
        assert!(!config.global_posters_only);
        assert!(!config.log_all_posters);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let ini = Ini::load_from_str("[General]\ndefaultPosterWeight = 20\n").unwrap();
        let config = PostersConfig::from_ini(&ini).unwrap();

        assert_eq!(config.default_weight, 20);
        assert!(config.adjust_poster_chances);
    }

    #[test]
    fn test_blacklist_and_bools() {
        let ini = Ini::load_from_str(
            "[Foreign Posters]\nblacklist = a , b\ninvertBlacklist = True\n[Debug]\nlogAllPosters = TRUE\n",
        )
        .unwrap();
        let config = PostersConfig::from_ini(&ini).unwrap();

        assert_eq!(config.foreign_blacklist.names(), vec!["a", "b"]);
        assert!(config.foreign_blacklist.is_inverted());
        assert!(config.log_all_posters);
    }

    #[test]
    fn test_invalid_value_is_error() {
        let ini = Ini::load_from_str("[Poster Chances]\nposterChanceMultiplier = lots\n").unwrap();
        let err = PostersConfig::from_ini(&ini).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("posterChanceMultiplier"));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config").join("posters.ini");

        let config = PostersConfig::default()
            .with_default_weight(75)
            .with_chance_adjustment(false, 0.25)
            .with_blacklist(Blacklist::parse("x,y", false))
            .with_global_posters_only(true);
        config.save(&path).unwrap();

        assert_eq!(PostersConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("posters.ini");

        let config = PostersConfig::load_or_create(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, PostersConfig::default());
        assert_eq!(PostersConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = PostersConfig::load(Path::new("/nonexistent/posters.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
