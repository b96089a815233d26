//! Per-format decoders
//!
//! Every decoder yields a `serde_json::Map` so the merge layer sees one
//! value model. String-only formats (INI, properties, dotenv) keep their
//! values as strings; coercing them is out of scope.

use crate::error::ConfigError;
use crate::format::Format;
use serde_json::{Map, Value};
use std::path::Path;

pub(crate) fn decode(
    format: Format,
    content: &str,
    path: &Path,
) -> Result<Map<String, Value>, ConfigError> {
    match format {
        Format::Json => decode_json(content, path),
        Format::Yaml => decode_yaml(content, path),
        Format::Toml => decode_toml(content, path),
        Format::Ini => decode_ini(content, path),
        Format::Properties => decode_properties(content, path),
        Format::DotEnv => decode_dotenv(content, path),
    }
}

fn parse_error(
    path: &Path,
    format: Format,
    source: impl std::error::Error + Send + Sync + 'static,
) -> ConfigError {
    ConfigError::Parse {
        path: path.to_path_buf(),
        format,
        source: Box::new(source),
    }
}

fn expect_mapping(value: Value, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAMapping { path: path.to_path_buf() }),
    }
}

fn decode_json(content: &str, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| parse_error(path, Format::Json, e))?;
    expect_mapping(value, path)
}

fn decode_yaml(content: &str, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| parse_error(path, Format::Yaml, e))?;
    // An empty YAML document decodes to null; treat it as an empty config.
    if value.is_null() {
        return Ok(Map::new());
    }
    expect_mapping(value, path)
}

fn decode_toml(content: &str, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| parse_error(path, Format::Toml, e))?;
    Ok(toml_table_to_map(table))
}

fn toml_table_to_map(table: toml::Table) -> Map<String, Value> {
    table.into_iter().map(|(k, v)| (k, toml_value_to_json(v))).collect()
}

fn toml_value_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => {
            // JSON has no nan/inf; those fall back to null.
            serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
        }
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_value_to_json).collect())
        }
        toml::Value::Table(table) => Value::Object(toml_table_to_map(table)),
    }
}

fn decode_ini(content: &str, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let ini =
        ini::Ini::load_from_str(content).map_err(|e| parse_error(path, Format::Ini, e))?;
    let mut map = Map::new();
    for (section, properties) in ini.iter() {
        match section {
            // Sectionless keys land at the top level.
            None => {
                for (key, value) in properties.iter() {
                    map.insert(key.to_string(), Value::String(value.to_string()));
                }
            }
            Some(name) => {
                let mut nested = Map::new();
                for (key, value) in properties.iter() {
                    nested.insert(key.to_string(), Value::String(value.to_string()));
                }
                map.insert(name.to_string(), Value::Object(nested));
            }
        }
    }
    Ok(map)
}

fn decode_properties(content: &str, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let entries = java_properties::read(content.as_bytes())
        .map_err(|e| parse_error(path, Format::Properties, e))?;
    // The parser returns an unordered map; sort for a stable iteration order.
    let mut pairs: Vec<(String, String)> = entries.into_iter().collect();
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
}

fn decode_dotenv(content: &str, path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let mut map = Map::new();
    for entry in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = entry.map_err(|e| parse_error(path, Format::DotEnv, e))?;
        map.insert(key, Value::String(value));
    }
    Ok(map)
}
