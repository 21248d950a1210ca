//! Per-card progress indices
//!
//! Keys are card numbers, values are how far the player got through that
//! card's clue/object sequence. A missing key means progress 0; entries are
//! only created on first write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which of the two independent progress maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressTrack {
    /// Clue ("indice") progress
    Indice,
    /// Object ("objet") progress
    Objet,
}

impl ProgressTrack {
    pub const ALL: [ProgressTrack; 2] = [ProgressTrack::Indice, ProgressTrack::Objet];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressTrack::Indice => "indice",
            ProgressTrack::Objet => "objet",
        }
    }
}

/// Card number → progress index.
///
/// Serializes as a JSON object keyed by the decimal card number, e.g.
/// `{"7":2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<u32, u32>);

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, card: u32, index: u32) {
        self.0.insert(card, index);
    }

    pub fn get(&self, card: u32) -> u32 {
        self.0.get(&card).copied().unwrap_or(0)
    }

    pub fn contains(&self, card: u32) -> bool {
        self.0.contains_key(&card)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in card order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(card, index)| (*card, *index))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the persisted object form. Any bad key or value rejects the
    /// whole document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(u32, u32)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_card_is_zero() {
        let map = ProgressMap::new();
        assert_eq!(map.get(7), 0);
        assert!(!map.contains(7));
        assert!(map.is_empty());
    }

    #[test]
    fn test_record_creates_lazily() {
        let mut map = ProgressMap::new();
        map.record(7, 2);
        assert_eq!(map.get(7), 2);
        assert_eq!(map.len(), 1);

        map.record(7, 3);
        assert_eq!(map.get(7), 3);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_json_uses_string_keys() {
        let map: ProgressMap = [(7, 2), (12, 0)].into_iter().collect();
        assert_eq!(map.to_json().unwrap(), r#"{"7":2,"12":0}"#);
    }

    #[test]
    fn test_from_json_accepts_object() {
        let map = ProgressMap::from_json(r#"{"7":2,"31":5}"#).unwrap();
        assert_eq!(map.get(7), 2);
        assert_eq!(map.get(31), 5);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(7, 2), (31, 5)]);
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        for bad in [
            "",
            "null",
            "[1,2]",
            r#"{"seven":2}"#,
            r#"{"7":"2"}"#,
            r#"{"7":-1}"#,
            r#"{"7":1.5}"#,
        ] {
            assert!(ProgressMap::from_json(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
