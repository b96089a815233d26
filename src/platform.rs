//! Platform configuration directories
//!
//! `load` asks a [`PlatformDirs`] for the conventional site and user config
//! locations of an application. The capability is a trait so tests can
//! substitute fixed directories for the real system layout.

use std::env;
use std::path::PathBuf;

/// Conventional configuration directories for a named application.
pub trait PlatformDirs {
    /// Site-wide (system) config directories, most conventional first.
    /// Multipath on platforms that support it (XDG_CONFIG_DIRS).
    fn site_config_dirs(&self, app_name: &str, app_version: Option<&str>) -> Vec<PathBuf>;

    /// Per-user config directory, or `None` when the platform has no home.
    fn user_config_dir(&self, app_name: &str, app_version: Option<&str>) -> Option<PathBuf>;
}

/// [`PlatformDirs`] backed by the real system conventions: XDG on POSIX,
/// ProgramData on Windows, `dirs::config_dir` for the user directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDirs;

impl PlatformDirs for SystemDirs {
    fn site_config_dirs(&self, app_name: &str, app_version: Option<&str>) -> Vec<PathBuf> {
        let roots: Vec<PathBuf> = if cfg!(windows) {
            env::var_os("PROGRAMDATA").map(PathBuf::from).into_iter().collect()
        } else {
            match env::var_os("XDG_CONFIG_DIRS") {
                Some(joined) if !joined.is_empty() => env::split_paths(&joined).collect(),
                _ => vec![PathBuf::from("/etc/xdg")],
            }
        };
        roots.into_iter().map(|root| with_app(root, app_name, app_version)).collect()
    }

    fn user_config_dir(&self, app_name: &str, app_version: Option<&str>) -> Option<PathBuf> {
        dirs::config_dir().map(|root| with_app(root, app_name, app_version))
    }
}

fn with_app(root: PathBuf, app_name: &str, app_version: Option<&str>) -> PathBuf {
    let mut path = root;
    path.push(app_name);
    if let Some(version) = app_version {
        path.push(version);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_app_appends_name_then_version() {
        let base = PathBuf::from("/etc/xdg");
        assert_eq!(with_app(base.clone(), "myapp", None), PathBuf::from("/etc/xdg/myapp"));
        assert_eq!(
            with_app(base, "myapp", Some("2.1")),
            PathBuf::from("/etc/xdg/myapp/2.1")
        );
    }

    #[test]
    fn test_site_dirs_end_with_app_name() {
        for dir in SystemDirs.site_config_dirs("myapp", None) {
            assert!(dir.ends_with("myapp"), "unexpected site dir: {}", dir.display());
        }
    }
}
