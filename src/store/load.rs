//! Multi-source load orchestration
//!
//! Computes the ordered list of candidate sources for one load call and
//! folds each one that exists into the store, least important first, so
//! later sources override earlier ones. Missing files are skipped; decode
//! failures abort the call (sources merged before the failure stay applied).

use crate::error::ConfigError;
use crate::format::{ExtensionLoader, FileLoader, SUPPORTED_EXTENSIONS};
use crate::platform::{PlatformDirs, SystemDirs};
use crate::store::ConfigStore;
use std::path::{Path, PathBuf};

/// One `load` invocation: which application to search for and which extra
/// files and directories to consult.
///
/// Directory entries are probed for `<app_name><ext>` for every supported
/// extension, so they only contribute sources when `app_name` is set.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    app_name: Option<String>,
    app_version: Option<String>,
    least_important_dirs: Vec<PathBuf>,
    most_important_dirs: Vec<PathBuf>,
    least_important_files: Vec<PathBuf>,
    most_important_files: Vec<PathBuf>,
}

impl LoadOptions {
    pub fn new() -> LoadOptions {
        LoadOptions::default()
    }

    pub fn app_name(mut self, name: impl Into<String>) -> LoadOptions {
        self.app_name = Some(name.into());
        self
    }

    pub fn app_version(mut self, version: impl Into<String>) -> LoadOptions {
        self.app_version = Some(version.into());
        self
    }

    /// Directory searched before the platform locations; overridden by
    /// everything that follows it.
    pub fn least_important_dir(mut self, dir: impl Into<PathBuf>) -> LoadOptions {
        self.least_important_dirs.push(dir.into());
        self
    }

    /// Directory searched after the platform locations; overrides them.
    pub fn most_important_dir(mut self, dir: impl Into<PathBuf>) -> LoadOptions {
        self.most_important_dirs.push(dir.into());
        self
    }

    /// File merged before every other source.
    pub fn least_important_file(mut self, file: impl Into<PathBuf>) -> LoadOptions {
        self.least_important_files.push(file.into());
        self
    }

    /// File merged after every other source; wins every conflict.
    pub fn most_important_file(mut self, file: impl Into<PathBuf>) -> LoadOptions {
        self.most_important_files.push(file.into());
        self
    }
}

impl ConfigStore {
    /// Load and merge configuration from every source the options describe,
    /// using the system platform directories and extension-dispatched
    /// decoding.
    ///
    /// Source order, least to most important:
    /// 1. `least_important_files`, in list order;
    /// 2. `least_important_dirs`, probed for `<app_name><ext>`;
    /// 3. platform site config directories plus `/etc/<app_name>`;
    /// 4. the platform user config directory;
    /// 5. `most_important_dirs`;
    /// 6. `most_important_files`, in list order.
    pub fn load(&mut self, options: &LoadOptions) -> Result<(), ConfigError> {
        self.load_with(options, &SystemDirs, &ExtensionLoader)
    }

    /// [`load`] with injected platform-directory and file-loading
    /// capabilities.
    ///
    /// [`load`]: ConfigStore::load
    pub fn load_with(
        &mut self,
        options: &LoadOptions,
        platform: &dyn PlatformDirs,
        loader: &dyn FileLoader,
    ) -> Result<(), ConfigError> {
        for file in &options.least_important_files {
            self.merge_file(file, loader)?;
        }

        if let Some(app_name) = options.app_name.as_deref() {
            let app_version = options.app_version.as_deref();

            for dir in &options.least_important_dirs {
                self.merge_probed_dir(dir, app_name, loader)?;
            }

            let mut site_dirs = platform.site_config_dirs(app_name, app_version);
            site_dirs.push(Path::new("/etc").join(app_name));
            for dir in &site_dirs {
                self.merge_probed_dir(dir, app_name, loader)?;
            }

            if let Some(user_dir) = platform.user_config_dir(app_name, app_version) {
                self.merge_probed_dir(&user_dir, app_name, loader)?;
            }

            for dir in &options.most_important_dirs {
                self.merge_probed_dir(dir, app_name, loader)?;
            }
        }

        for file in &options.most_important_files {
            self.merge_file(file, loader)?;
        }

        Ok(())
    }

    /// Merge a single config file into the store if it exists; a missing
    /// file is logged and skipped.
    pub fn update_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.merge_file(path.as_ref(), &ExtensionLoader)
    }

    fn merge_file(&mut self, path: &Path, loader: &dyn FileLoader) -> Result<(), ConfigError> {
        if !path.exists() {
            tracing::warn!("not loading config from {}; file not found", path.display());
            return Ok(());
        }
        tracing::info!("loading config from {}", path.display());
        let map = loader.load(path)?;
        self.merge(&map);
        Ok(())
    }

    fn merge_probed_dir(
        &mut self,
        dir: &Path,
        app_name: &str,
        loader: &dyn FileLoader,
    ) -> Result<(), ConfigError> {
        for ext in SUPPORTED_EXTENSIONS {
            let candidate = dir.join(format!("{app_name}{ext}"));
            if candidate.exists() {
                tracing::info!("loading config from {}", candidate.display());
                let map = loader.load(&candidate)?;
                self.merge(&map);
            } else {
                tracing::debug!("no config at {}", candidate.display());
            }
        }
        Ok(())
    }
}
