//! Ordered field buffer backing a pending request.

use std::fmt;

/// Ordered mapping from wire field name to value.
///
/// Re-queuing a name removes the old entry and appends the new one at the
/// end, so the serialized order reflects the most recent write. The provider
/// does not depend on field order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. Always returns `true`.
    pub fn queue(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        self.remove(&key);
        self.entries.push((key, value.into()));
        true
    }

    /// Get a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get a field value, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Check whether a field has been queued.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of queued fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no fields are queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names of the given keys that are absent or empty, in the order given.
    pub fn missing(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .filter(|key| self.get_non_empty(key).is_none())
            .map(|key| key.to_string())
            .collect()
    }

    /// Serialize as `name=value&...` with names and values URL-encoded.
    pub fn to_post_string(&self) -> String {
        self.to_post_string_without(&[])
    }

    /// Serialize like [`to_post_string`](Self::to_post_string), leaving out `skip`.
    pub fn to_post_string_without(&self, skip: &[&str]) -> String {
        self.entries
            .iter()
            .filter(|(k, _)| !skip.contains(&k.as_str()))
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// Values carry card numbers and credentials; only names are printed.
impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap")
            .field("keys", &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}
