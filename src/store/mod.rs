//! The configuration store
//!
//! [`ConfigStore`] is an insertion-ordered string-keyed mapping holding
//! scalars or nested mappings to arbitrary depth. Sources are folded into it
//! by [`deep_merge`], so later sources override earlier ones; namespace and
//! sub-configuration views slice the merged result.

use crate::error::ConfigError;
use crate::merge::deep_merge;
use serde_json::{Map, Value};
use std::fmt;

mod load;

pub use load::LoadOptions;

/// Ordered mapping from string keys to configuration values.
///
/// Created empty or from existing entries; every merge mutates the store in
/// place. Not internally synchronized: concurrent mutation needs an external
/// lock.
#[derive(Clone, Default, PartialEq)]
pub struct ConfigStore(Map<String, Value>);

impl ConfigStore {
    pub fn new() -> ConfigStore {
        ConfigStore(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Deep-merge `src` into this store; `src` keys win on conflicts, nested
    /// mappings merge recursively.
    pub fn merge(&mut self, src: &Map<String, Value>) {
        deep_merge(&mut self.0, src);
    }

    /// Merge every environment variable under `namespace` into the store.
    ///
    /// The prefix is stripped from the variable names as in [`namespace`]
    /// (case-sensitive, exact match); values are merged as strings. No
    /// matching variable means no change.
    ///
    /// Variables whose name is not valid Unicode are skipped (such a name
    /// cannot match a string prefix anyway); non-Unicode values are
    /// converted lossily.
    ///
    /// [`namespace`]: ConfigStore::namespace
    pub fn update_from_env_namespace(&mut self, namespace: &str) {
        let env: ConfigStore = std::env::vars_os()
            .filter_map(|(key, value)| {
                let key = key.into_string().ok()?;
                Some((key, Value::String(value.to_string_lossy().into_owned())))
            })
            .collect();
        let scoped = env.namespace(namespace);
        self.merge(scoped.as_map());
    }

    /// A new store holding only the keys under `prefix`, with the prefix
    /// removed.
    ///
    /// Trailing underscores on `prefix` are ignored, and a single leading
    /// underscore left on a key after removing the prefix is stripped, so
    /// `namespace("MY_APP_")` turns `MY_APP_SETTING1` into `SETTING1`.
    pub fn namespace(&self, prefix: &str) -> ConfigStore {
        self.namespace_with(prefix, |key| key.to_string())
    }

    /// [`namespace`] with a per-key transform applied after the prefix is
    /// stripped. When two keys collide after transformation the later one in
    /// the store's insertion order wins.
    ///
    /// [`namespace`]: ConfigStore::namespace
    pub fn namespace_with(
        &self,
        prefix: &str,
        key_transform: impl Fn(&str) -> String,
    ) -> ConfigStore {
        let prefix = prefix.trim_end_matches('_');
        let mut out = Map::new();
        for (key, value) in &self.0 {
            if let Some(rest) = key.strip_prefix(prefix) {
                let rest = rest.strip_prefix('_').unwrap_or(rest);
                out.insert(key_transform(rest), value.clone());
            }
        }
        ConfigStore(out)
    }

    /// [`namespace`] with keys lower-cased, handy for passing extracted
    /// settings on as keyword-style arguments.
    ///
    /// [`namespace`]: ConfigStore::namespace
    pub fn namespace_lower(&self, prefix: &str) -> ConfigStore {
        self.namespace_with(prefix, |key| key.to_lowercase())
    }

    /// The sub-configuration stored under `namespace`.
    ///
    /// When `namespace` is not a direct key this is prefix extraction as in
    /// [`namespace`]. When it is a key holding a nested mapping, that
    /// mapping is returned as a new store. Any other value (scalar, array,
    /// null) is an error: it cannot be treated as a sub-configuration.
    ///
    /// [`namespace`]: ConfigStore::namespace
    pub fn sub_configuration(&self, namespace: &str) -> Result<ConfigStore, ConfigError> {
        match self.0.get(namespace) {
            None => Ok(self.namespace(namespace)),
            Some(Value::Object(map)) => Ok(ConfigStore(map.clone())),
            Some(_) => Err(ConfigError::Namespace { namespace: namespace.to_string() }),
        }
    }

    /// Mutable borrow of the nested mapping stored under `namespace`.
    ///
    /// Unlike [`sub_configuration`] this aliases the store's own value, so
    /// mutations through the returned map are visible in the parent. Errors
    /// when the key is absent or holds a non-mapping value.
    ///
    /// [`sub_configuration`]: ConfigStore::sub_configuration
    pub fn sub_configuration_mut(
        &mut self,
        namespace: &str,
    ) -> Result<&mut Map<String, Value>, ConfigError> {
        match self.0.get_mut(namespace) {
            Some(Value::Object(map)) => Ok(map),
            _ => Err(ConfigError::Namespace { namespace: namespace.to_string() }),
        }
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigStore({:?})", self.0)
    }
}

impl PartialEq<Map<String, Value>> for ConfigStore {
    fn eq(&self, other: &Map<String, Value>) -> bool {
        &self.0 == other
    }
}

impl From<Map<String, Value>> for ConfigStore {
    fn from(map: Map<String, Value>) -> ConfigStore {
        ConfigStore(map)
    }
}

impl FromIterator<(String, Value)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> ConfigStore {
        ConfigStore(iter.into_iter().collect())
    }
}

impl IntoIterator for ConfigStore {
    type Item = (String, Value);
    type IntoIter = <Map<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
