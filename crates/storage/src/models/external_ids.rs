use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Identifiers a row carries in third-party systems, keyed by provider name.
///
/// Entries accumulate per provider: merging never removes or rewrites the
/// identifier another provider has already recorded for the same row.
///
/// # Examples
///
/// ```
/// use storage::models::ExternalIds;
///
/// let mut ids = ExternalIds::single("ticketmaster", "Z7r9jZ1A7");
/// ids.merge_missing(&ExternalIds::single("seatgeek", "4412"));
///
/// assert_eq!(ids.get("ticketmaster"), Some("Z7r9jZ1A7"));
/// assert_eq!(ids.get("seatgeek"), Some("4412"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ExternalIds(BTreeMap<String, String>);

impl ExternalIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(provider: impl Into<String>, id: impl Into<String>) -> Self {
        let mut ids = Self::new();
        ids.0.insert(provider.into(), id.into());
        ids
    }

    pub fn get(&self, provider: &str) -> Option<&str> {
        self.0.get(provider).map(String::as_str)
    }

    pub fn contains_provider(&self, provider: &str) -> bool {
        self.0.contains_key(provider)
    }

    /// Records `id` for `provider` unless that provider already has an entry.
    /// Returns whether the map changed.
    pub fn insert_if_absent(&mut self, provider: &str, id: &str) -> bool {
        if self.0.contains_key(provider) {
            return false;
        }
        self.0.insert(provider.to_string(), id.to_string());
        true
    }

    /// Adds every provider entry of `other` that is not present yet.
    pub fn merge_missing(&mut self, other: &ExternalIds) {
        for (provider, id) in &other.0 {
            self.insert_if_absent(provider, id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, id)| (p.as_str(), id.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_absent_keeps_existing_entry() {
        let mut ids = ExternalIds::single("ticketmaster", "first");
        assert!(!ids.insert_if_absent("ticketmaster", "second"));
        assert_eq!(ids.get("ticketmaster"), Some("first"));
    }

    #[test]
    fn test_merge_preserves_other_providers() {
        let mut ids = ExternalIds::single("seatgeek", "sg-1");
        ids.merge_missing(&ExternalIds::single("ticketmaster", "tm-1"));

        assert_eq!(ids.get("seatgeek"), Some("sg-1"));
        assert_eq!(ids.get("ticketmaster"), Some("tm-1"));
        assert_eq!(ids.iter().count(), 2);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let ids = ExternalIds::single("ticketmaster", "abc");
        let json = serde_json::to_value(&ids).unwrap();
        assert_eq!(json, serde_json::json!({ "ticketmaster": "abc" }));

        let back: ExternalIds = serde_json::from_value(json).unwrap();
        assert_eq!(back, ids);
    }
}
