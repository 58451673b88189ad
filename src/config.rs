use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;
use serde::Deserialize;

use crate::interpreter::DEFAULT_MEMORY_SIZE;

pub const CONFIG_FILE_NAME: &str = "bf.toml";
pub const MEMORY_SIZE_ENV: &str = "BF_MEMORY_SIZE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "invalid memory size {value:?} from {origin} \
         (expected a whole number of cells, at least 1)"
    )]
    InvalidMemorySize { origin: String, value: String },
}

/// On-disk layout of `bf.toml`:
///
/// ```toml
/// [interpreter]
/// memory_size = 4096
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    interpreter: InterpreterTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InterpreterTable {
    memory_size: Option<usize>,
}

/// Fully resolved interpreter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub memory_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
        }
    }
}

impl Settings {
    /// Resolve settings: flag -> `BF_MEMORY_SIZE` -> config file -> default.
    ///
    /// `config_path` replaces the default `$XDG_CONFIG_HOME/bf.toml`. The
    /// default file may be absent; an explicit one must exist and parse even
    /// when a flag or the environment decides the value.
    pub fn load(
        memory_size: Option<usize>,
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let env = std::env::var(MEMORY_SIZE_ENV).ok();
        Self::resolve(memory_size, env.as_deref(), config_path)
    }

    fn resolve(
        memory_size: Option<usize>,
        env: Option<&str>,
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let explicit = config_path.map(read_config).transpose()?;

        if let Some(size) = memory_size {
            return Ok(Self {
                memory_size: nonzero(size, "--memory-size")?,
            });
        }

        if let Some(raw) = env {
            let size = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMemorySize {
                    origin: MEMORY_SIZE_ENV.to_string(),
                    value: raw.to_string(),
                })?;
            return Ok(Self {
                memory_size: nonzero(size, MEMORY_SIZE_ENV)?,
            });
        }

        let file = match explicit {
            Some(cfg) => Some(cfg),
            None => match default_config_path() {
                Some(path) => read_optional_config(&path)?,
                None => None,
            },
        };

        match file.and_then(|cfg| cfg.interpreter.memory_size) {
            Some(size) => Ok(Self {
                memory_size: nonzero(size, CONFIG_FILE_NAME)?,
            }),
            None => Ok(Self::default()),
        }
    }
}

fn nonzero(size: usize, origin: &str) -> Result<usize, ConfigError> {
    if size == 0 {
        return Err(ConfigError::InvalidMemorySize {
            origin: origin.to_string(),
            value: size.to_string(),
        });
    }
    Ok(size)
}

/// `bf.toml` in the user's config home, e.g. `~/.config/bf.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().into_iter().next()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &content)
}

fn read_optional_config(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loading config file");
            parse_config(path, &content).map(Some)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_config(path: &Path, content: &str) -> Result<FileConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
        write!(tf, "{}", content).unwrap();
        tf
    }

    #[test]
    fn flag_wins_over_env_and_file() {
        let tf = config_file("[interpreter]\nmemory_size = 16\n");
        let settings = Settings::resolve(Some(8), Some("32"), Some(tf.path())).unwrap();
        assert_eq!(settings.memory_size, 8);
    }

    #[test]
    fn env_wins_over_file() {
        let tf = config_file("[interpreter]\nmemory_size = 16\n");
        let settings = Settings::resolve(None, Some(" 32 "), Some(tf.path())).unwrap();
        assert_eq!(settings.memory_size, 32);
    }

    #[test]
    fn file_value_is_used_when_nothing_overrides_it() {
        let tf = config_file("[interpreter]\nmemory_size = 16\n");
        let settings = Settings::resolve(None, None, Some(tf.path())).unwrap();
        assert_eq!(settings.memory_size, 16);
    }

    #[test]
    fn file_without_interpreter_table_uses_default() {
        let tf = config_file("# nothing here\n");
        let settings = Settings::resolve(None, None, Some(tf.path())).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.memory_size, 4096);
    }

    #[test]
    fn zero_is_rejected_at_every_layer() {
        let tf = config_file("[interpreter]\nmemory_size = 0\n");
        assert!(matches!(
            Settings::resolve(Some(0), None, None),
            Err(ConfigError::InvalidMemorySize { .. })
        ));
        assert!(matches!(
            Settings::resolve(None, Some("0"), None),
            Err(ConfigError::InvalidMemorySize { .. })
        ));
        assert!(matches!(
            Settings::resolve(None, None, Some(tf.path())),
            Err(ConfigError::InvalidMemorySize { .. })
        ));
    }

    #[test]
    fn non_numeric_env_is_rejected() {
        let err = Settings::resolve(None, Some("lots"), None).unwrap_err();
        assert!(err.to_string().contains(MEMORY_SIZE_ENV));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let tf = config_file("[interpreter\nmemory_size = ");
        let result = Settings::resolve(None, None, Some(tf.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let result = Settings::resolve(None, None, Some(&path));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn missing_explicit_file_is_reported_even_when_flag_decides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let result = Settings::resolve(Some(8), None, Some(&path));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
        let result = Settings::resolve(None, Some("8"), Some(&path));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn malformed_explicit_file_is_reported_even_when_env_decides() {
        let tf = config_file("memory_size = [");
        let result = Settings::resolve(None, Some("8"), Some(tf.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_default_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_optional_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(result.is_none());
    }
}
