use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recorded in place of a value whose type has no reader.
pub const UNSUPPORTED_SENTINEL: &str = "<unsupported>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    String,
    Hash,
    List,
    Set,
    ZSet,
    Unsupported,
}

impl KeyType {
    /// Parse a TYPE reply as reported by the store. Anything unrecognized,
    /// including "none" for a key that vanished after the scan, is Unsupported.
    pub fn from_store(reply: &str) -> Self {
        match reply {
            "string" => KeyType::String,
            "hash" => KeyType::Hash,
            "list" => KeyType::List,
            "set" => KeyType::Set,
            "zset" => KeyType::ZSet,
            _ => KeyType::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Hash => "hash",
            KeyType::List => "list",
            KeyType::Set => "set",
            KeyType::ZSet => "zset",
            KeyType::Unsupported => "unsupported",
        }
    }
}

/// A key's value, shaped for the output document. Lists and sets share the
/// sequence variant; the record's type field tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Seq(Vec<String>),
    Map(BTreeMap<String, String>),
    /// Sorted-set members as [score, member] pairs, ascending by score.
    Scored(Vec<(f64, String)>),
}

impl Value {
    pub fn sentinel() -> Self {
        Value::Str(UNSUPPORTED_SENTINEL.to_string())
    }
}

/// One exported key: its type, remaining TTL in seconds (-1 = no expiry,
/// -2 = key absent at read time), and full value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub kind: KeyType,
    pub ttl: i64,
    pub value: Value,
}

impl Record {
    pub fn unsupported(ttl: i64) -> Self {
        Record {
            kind: KeyType::Unsupported,
            ttl,
            value: Value::sentinel(),
        }
    }
}

/// The full export document: every scanned key mapped to its record. Sorted
/// so repeated runs against an unchanged store serialize identically.
pub type Snapshot = BTreeMap<String, Record>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keytype_from_store() {
        assert_eq!(KeyType::from_store("string"), KeyType::String);
        assert_eq!(KeyType::from_store("hash"), KeyType::Hash);
        assert_eq!(KeyType::from_store("list"), KeyType::List);
        assert_eq!(KeyType::from_store("set"), KeyType::Set);
        assert_eq!(KeyType::from_store("zset"), KeyType::ZSet);

        // "none" means the key vanished between scan and classify
        assert_eq!(KeyType::from_store("none"), KeyType::Unsupported);
        assert_eq!(KeyType::from_store("stream"), KeyType::Unsupported);
    }

    #[test]
    fn test_keytype_serializes_lowercase() {
        assert_eq!(serde_json::to_value(KeyType::ZSet).unwrap(), json!("zset"));
        assert_eq!(
            serde_json::to_value(KeyType::Unsupported).unwrap(),
            json!("unsupported")
        );
    }

    #[test]
    fn test_string_record_shape() {
        let record = Record {
            kind: KeyType::String,
            ttl: -1,
            value: Value::Str("v".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "string", "ttl": -1, "value": "v"})
        );
    }

    #[test]
    fn test_hash_record_shape() {
        let mut fields = BTreeMap::new();
        fields.insert("b".to_string(), "2".to_string());
        fields.insert("a".to_string(), "1".to_string());

        let record = Record {
            kind: KeyType::Hash,
            ttl: 30,
            value: Value::Map(fields),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "hash", "ttl": 30, "value": {"a": "1", "b": "2"}})
        );
    }

    #[test]
    fn test_zset_record_shape() {
        let record = Record {
            kind: KeyType::ZSet,
            ttl: -1,
            value: Value::Scored(vec![(1.0, "m1".to_string()), (2.0, "m2".to_string())]),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "zset", "ttl": -1, "value": [[1.0, "m1"], [2.0, "m2"]]})
        );
    }

    #[test]
    fn test_unsupported_record_uses_sentinel() {
        let record = Record::unsupported(-2);
        assert_eq!(record.value, Value::Str(UNSUPPORTED_SENTINEL.to_string()));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "unsupported", "ttl": -2, "value": "<unsupported>"})
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "s".to_string(),
            Record {
                kind: KeyType::String,
                ttl: -1,
                value: Value::Str("hello".to_string()),
            },
        );
        snapshot.insert(
            "l".to_string(),
            Record {
                kind: KeyType::List,
                ttl: 60,
                value: Value::Seq(vec!["x".to_string(), "y".to_string(), "z".to_string()]),
            },
        );
        snapshot.insert(
            "z".to_string(),
            Record {
                kind: KeyType::ZSet,
                ttl: -1,
                value: Value::Scored(vec![(0.5, "low".to_string()), (9.5, "high".to_string())]),
            },
        );

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_snapshot_serialization_is_deterministic() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "b".to_string(),
            Record {
                kind: KeyType::String,
                ttl: -1,
                value: Value::Str("2".to_string()),
            },
        );
        snapshot.insert(
            "a".to_string(),
            Record {
                kind: KeyType::String,
                ttl: -1,
                value: Value::Str("1".to_string()),
            },
        );

        let first = serde_json::to_string_pretty(&snapshot).unwrap();
        let second = serde_json::to_string_pretty(&snapshot).unwrap();
        assert_eq!(first, second);

        // Sorted map puts "a" before "b" regardless of insertion order
        assert!(first.find("\"a\"").unwrap() < first.find("\"b\"").unwrap());
    }
}
