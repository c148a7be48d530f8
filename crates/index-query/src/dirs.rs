//! Platform directories for index databases, logs and state files.
//!
//! Resolution is a pure lookup over a home directory and a snapshot of the
//! XDG environment, so it can be configured explicitly and never touches
//! the query compiler:
//!
//! | getter      | macOS                           | other                                |
//! |-------------|---------------------------------|--------------------------------------|
//! | `conf`      | `~/Library/Application Support` | `$XDG_CONFIG_HOME` or `~/.config`    |
//! | `log`       | `~/Library/Logs`                | `$XDG_CACHE_HOME` or `~/.cache`      |
//! | `cache`     | same as `conf`                  | same as `log`                        |
//! | `autostart` | `~/Library/LaunchAgents`        | `conf` + `autostart`                 |
//! | `runtime`   | system temp dir                 | `$XDG_RUNTIME_DIR` or cache          |
//! | `state`     | `~/Library/Application Support` | `$XDG_DATA_HOME` or `~/.local/share` |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexQueryError, Result};

/// Target platform family for directory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Xdg,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Xdg
        }
    }
}

/// Directory resolver over an explicit environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    platform: Platform,
    home: PathBuf,
    temp_dir: PathBuf,
    xdg_config_home: Option<PathBuf>,
    xdg_cache_home: Option<PathBuf>,
    xdg_runtime_dir: Option<PathBuf>,
    xdg_data_home: Option<PathBuf>,
}

impl AppDirs {
    /// Resolver for the current platform and process environment.
    pub fn from_env() -> Result<Self> {
        let platform = Platform::current();
        let mut resolved = Self::new(platform, get_home_dir()?);
        if platform == Platform::Xdg {
            resolved.xdg_config_home = ::dirs::config_dir();
            resolved.xdg_cache_home = ::dirs::cache_dir();
            resolved.xdg_runtime_dir = ::dirs::runtime_dir();
            resolved.xdg_data_home = ::dirs::data_dir();
        }
        Ok(resolved)
    }

    /// Resolver with no XDG overrides.
    pub fn new(platform: Platform, home: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            home: home.into(),
            temp_dir: env::temp_dir(),
            xdg_config_home: None,
            xdg_cache_home: None,
            xdg_runtime_dir: None,
            xdg_data_home: None,
        }
    }

    pub fn with_temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_dir = path.into();
        self
    }

    pub fn with_xdg_config_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg_config_home = Some(path.into());
        self
    }

    pub fn with_xdg_cache_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg_cache_home = Some(path.into());
        self
    }

    pub fn with_xdg_runtime_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg_runtime_dir = Some(path.into());
        self
    }

    pub fn with_xdg_data_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg_data_home = Some(path.into());
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Configuration directory.
    pub fn conf_path(
        &self,
        subfolder: Option<&str>,
        filename: Option<&str>,
        create: bool,
    ) -> Result<PathBuf> {
        finish(self.conf_base(), subfolder, filename, create)
    }

    /// Log directory.
    pub fn log_path(
        &self,
        subfolder: Option<&str>,
        filename: Option<&str>,
        create: bool,
    ) -> Result<PathBuf> {
        finish(self.log_base(), subfolder, filename, create)
    }

    /// Cache directory, where index databases live.
    pub fn cache_path(
        &self,
        subfolder: Option<&str>,
        filename: Option<&str>,
        create: bool,
    ) -> Result<PathBuf> {
        finish(self.cache_base(), subfolder, filename, create)
    }

    /// Directory for login items.
    pub fn autostart_path(&self, filename: Option<&str>, create: bool) -> Result<PathBuf> {
        let base = match self.platform {
            Platform::MacOs => self.home.join("Library").join("LaunchAgents"),
            Platform::Xdg => self.conf_base().join("autostart"),
        };
        finish(base, None, filename, create)
    }

    /// Directory for sockets and lock files.
    pub fn runtime_path(
        &self,
        subfolder: Option<&str>,
        filename: Option<&str>,
        create: bool,
    ) -> Result<PathBuf> {
        let base = match self.platform {
            Platform::MacOs => self.temp_dir.clone(),
            Platform::Xdg => self
                .xdg_runtime_dir
                .clone()
                .unwrap_or_else(|| self.cache_base()),
        };
        finish(base, subfolder, filename, create)
    }

    /// Directory for persistent application state.
    pub fn state_path(
        &self,
        subfolder: Option<&str>,
        filename: Option<&str>,
        create: bool,
    ) -> Result<PathBuf> {
        let base = match self.platform {
            Platform::MacOs => self.application_support(),
            Platform::Xdg => self
                .xdg_data_home
                .clone()
                .unwrap_or_else(|| self.home.join(".local").join("share")),
        };
        finish(base, subfolder, filename, create)
    }

    fn application_support(&self) -> PathBuf {
        self.home.join("Library").join("Application Support")
    }

    fn conf_base(&self) -> PathBuf {
        match self.platform {
            Platform::MacOs => self.application_support(),
            Platform::Xdg => self
                .xdg_config_home
                .clone()
                .unwrap_or_else(|| self.home.join(".config")),
        }
    }

    fn log_base(&self) -> PathBuf {
        match self.platform {
            Platform::MacOs => self.home.join("Library").join("Logs"),
            Platform::Xdg => self
                .xdg_cache_home
                .clone()
                .unwrap_or_else(|| self.home.join(".cache")),
        }
    }

    fn cache_base(&self) -> PathBuf {
        match self.platform {
            Platform::MacOs => self.conf_base(),
            Platform::Xdg => self.log_base(),
        }
    }
}

/// Returns the user's home directory.
///
/// Takes the first existing directory among the account's home directory
/// (which falls back to the password database when `$HOME` is unset),
/// `$HOME`, `$USERPROFILE` and `$TMP`.
pub fn get_home_dir() -> Result<PathBuf> {
    let candidates = std::iter::once(::dirs::home_dir())
        .chain(["HOME", "USERPROFILE", "TMP"].into_iter().map(env_path));
    first_existing_dir(candidates)
}

fn first_existing_dir<I>(candidates: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = Option<PathBuf>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|path| path.is_dir())
        .ok_or(IndexQueryError::HomeNotFound)
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Appends the subfolder, creates the directory if asked, then appends the
/// filename.
fn finish(
    base: PathBuf,
    subfolder: Option<&str>,
    filename: Option<&str>,
    create: bool,
) -> Result<PathBuf> {
    let mut path = match subfolder {
        Some(subfolder) if !subfolder.is_empty() => base.join(subfolder),
        _ => base,
    };

    if create && !path.is_dir() {
        log::debug!("creating directory {}", path.display());
        fs::create_dir_all(&path).map_err(|source| IndexQueryError::CreateDir {
            path: path.clone(),
            source,
        })?;
    }

    if let Some(filename) = filename.filter(|name| !name.is_empty()) {
        path.push(filename);
    }
    Ok(path)
}
