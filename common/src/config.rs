//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of `conecta`.
//! This is a configuration file/struct neutral loading engine, storing only the base directory
//! and with `load()` read the proper file or the default one.
//!
//! The configuration struct itself is available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{makepath, IntoConfig, Status};

/// Main name for the directory base
const TAG: &str = "conecta";

/// Loaded configuration file along with where it was found.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + IntoConfig> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Actual file used.
    path: PathBuf,
    inner: T,
}

/// Find the per-user configuration directory for `tag`.
///
/// - `$HOME/.config/<tag>` on UNIX
/// - `%LOCALAPPDATA%\<tag>` on Windows
///
#[tracing::instrument]
pub fn config_dir(tag: &str) -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or(Status::NoHomeDir)?;

    #[cfg(unix)]
    let dir = makepath!(base.home_dir(), ".config", tag);

    #[cfg(windows)]
    let dir = makepath!(base.data_local_dir(), tag);

    debug!("basedir = {dir:?}");
    Ok(dir)
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + IntoConfig,
{
    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the file actually loaded
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project tag, used as directory name
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - `T::FILENAME` in the default basedir (based on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let basedir = config_dir(TAG)?;
        let default = basedir.join(T::FILENAME);

        let fname = match fname {
            Some(fname) => fname.to_path_buf(),
            None => default.clone(),
        };

        if !fname.exists() {
            return Err(Status::MissingConfig(fname.to_string_lossy().to_string()).into());
        }
        let fname = fname.canonicalize()?;
        trace!("Loading config file {fname:?} from {basedir:?}");

        let data = fs::read_to_string(&fname)?;
        let inner = Self::parse(&data)?;

        Ok(ConfigFile {
            tag: TAG.to_string(),
            basedir,
            path: fname,
            inner,
        })
    }

    /// Parse HCL content and check its version against `T::VERSION`.
    ///
    #[tracing::instrument(skip(data))]
    pub fn parse(data: &str) -> Result<T> {
        let inner: T = hcl::from_str(data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::VERSION {
            return Err(Status::BadFileVersion(inner.version(), T::VERSION).into());
        }
        Ok(inner)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as mutable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the file wrapper
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
