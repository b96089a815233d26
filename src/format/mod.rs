//! File format dispatch
//!
//! Maps a file extension to its decoder. The supported set is fixed; the
//! probe order used by `load` is the lexical sort of the extension strings.

use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;

mod decode;

/// Supported config file extensions, in the canonical probe order.
pub const SUPPORTED_EXTENSIONS: [&str; 7] =
    [".env", ".ini", ".json", ".properties", ".toml", ".yaml", ".yml"];

/// Tag for one supported config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    DotEnv,
    Ini,
    Json,
    Properties,
    Toml,
    Yaml,
}

impl Format {
    /// Resolve the format for a path from its extension, or `None` when the
    /// extension is outside the supported set.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            // A bare `.env` file has no extension in path terms.
            None if path.file_name().is_some_and(|n| n == ".env") => return Some(Format::DotEnv),
            None => return None,
        };
        match ext.as_str() {
            "env" => Some(Format::DotEnv),
            "ini" => Some(Format::Ini),
            "json" => Some(Format::Json),
            "properties" => Some(Format::Properties),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::DotEnv => "dotenv",
            Format::Ini => "INI",
            Format::Json => "JSON",
            Format::Properties => "properties",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        };
        f.write_str(name)
    }
}

/// Capability that turns a config file into a nested mapping.
///
/// `load` accepts any implementation; [`ExtensionLoader`] is the default.
pub trait FileLoader {
    fn load(&self, path: &Path) -> Result<Map<String, Value>, ConfigError>;
}

/// Default [`FileLoader`]: reads the file and dispatches on its extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionLoader;

impl FileLoader for ExtensionLoader {
    fn load(&self, path: &Path) -> Result<Map<String, Value>, ConfigError> {
        let format = Format::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedExtension { path: path.to_path_buf() })?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        decode::decode(format, &content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn load(name: &str, content: &str) -> Result<Map<String, Value>, ConfigError> {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(name);
        fs::write(&path, content).expect("write");
        ExtensionLoader.load(&path)
    }

    #[test]
    fn test_supported_extensions_are_lexically_sorted() {
        let mut sorted = SUPPORTED_EXTENSIONS;
        sorted.sort_unstable();
        assert_eq!(sorted, SUPPORTED_EXTENSIONS);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("app.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("app.YAML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("app.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new(".env")), Some(Format::DotEnv));
        assert_eq!(Format::from_path(Path::new("app.env")), Some(Format::DotEnv));
        assert_eq!(Format::from_path(Path::new("app.conf")), None);
        assert_eq!(Format::from_path(Path::new("app")), None);
    }

    #[test]
    fn test_load_json() {
        let map = load("app.json", r#"{"a": 1, "b": {"x": true}}"#).expect("map");
        assert_eq!(Value::Object(map), json!({"a": 1, "b": {"x": true}}));
    }

    #[test]
    fn test_load_yaml() {
        let map = load("app.yaml", "a: 1\nb:\n  x: hi\n").expect("map");
        assert_eq!(Value::Object(map), json!({"a": 1, "b": {"x": "hi"}}));
    }

    #[test]
    fn test_load_empty_yaml_is_empty_mapping() {
        let map = load("app.yaml", "").expect("map");
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_toml() {
        let map = load("app.toml", "a = 1\n\n[b]\nx = \"hi\"\n").expect("map");
        assert_eq!(Value::Object(map), json!({"a": 1, "b": {"x": "hi"}}));
    }

    #[test]
    fn test_load_ini_sections_become_nested_mappings() {
        let map = load("app.ini", "top = 1\n[db]\nhost = localhost\n").expect("map");
        assert_eq!(
            Value::Object(map),
            json!({"top": "1", "db": {"host": "localhost"}})
        );
    }

    #[test]
    fn test_load_properties() {
        let map = load("app.properties", "db.host=localhost\nname=demo\n").expect("map");
        assert_eq!(
            Value::Object(map),
            json!({"db.host": "localhost", "name": "demo"})
        );
    }

    #[test]
    fn test_load_dotenv() {
        let map = load("app.env", "HOST=localhost\nPORT=8080\n").expect("map");
        assert_eq!(
            Value::Object(map),
            json!({"HOST": "localhost", "PORT": "8080"})
        );
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = load("app.json", "{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::Json, .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = load("app.toml", "a = [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::Toml, .. }));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = load("app.yaml", "a: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::Yaml, .. }));
    }

    #[test]
    fn test_malformed_ini_is_parse_error() {
        let err = load("app.ini", "[unclosed\nk=v\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::Ini, .. }));
    }

    #[test]
    fn test_malformed_properties_is_parse_error() {
        // Broken unicode escape in the value.
        let err = load("app.properties", "k=\\uZZZZ\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::Properties, .. }));
    }

    #[test]
    fn test_malformed_dotenv_is_parse_error() {
        // Unterminated quoted value.
        let err = load("app.env", "KEY=\"unterminated\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::DotEnv, .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load("app.conf", "whatever").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_non_mapping_top_level_is_rejected() {
        let err = load("app.json", "[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ExtensionLoader.load(Path::new("/nonexistent/app.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
