// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Sensor list loading

use crate::{Result, SeedError};
use diagnostics::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Identifier of one sensor, used only to build object names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorId(String);

impl SensorId {
    #[must_use]
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Only `id` is consumed; other fields are ignored.
#[derive(Deserialize)]
struct SensorRecord {
    // `Some(Value::Null)` for `"id": null`, `None` only when the key is absent.
    #[serde(default, deserialize_with = "present")]
    id: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Read a JSON array of sensor records and return the `id` of each
/// record that has one, in file order.
pub fn load_sensors<P: AsRef<Path>>(path: P) -> Result<Vec<SensorId>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::SensorsRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_sensors(&content).map_err(|source| SeedError::SensorsParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse sensor records from JSON text.
///
/// The document must be an array. Every object with an `id` key yields a
/// sensor; string ids are used as-is, any other value by its JSON text.
/// Elements that are not objects are skipped.
pub fn parse_sensors(content: &str) -> serde_json::Result<Vec<SensorId>> {
    let items: Vec<Value> = serde_json::from_str(content)?;

    let mut sensors = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            continue;
        }
        let record: SensorRecord = serde_json::from_value(item)?;
        match record.id {
            None => {}
            Some(Value::String(id)) => sensors.push(SensorId(id)),
            Some(other) => {
                let id = other.to_string();
                if !other.is_number() {
                    warn!(
                        "Sensor record {index} has a non-string id, using {id}",
                        index: index,
                        id: id.as_str()
                    );
                }
                sensors.push(SensorId(id));
            }
        }
    }

    debug!("Parsed {count} sensor ids", count: sensors.len());
    Ok(sensors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ids(sensors: &[SensorId]) -> Vec<&str> {
        sensors.iter().map(SensorId::as_str).collect()
    }

    #[test]
    fn test_records_without_id_are_discarded() {
        let sensors =
            parse_sensors(r#"[{"id":"s1"},{"id":"s2"},{"no_id":"x"}]"#).expect("valid json");
        assert_eq!(ids(&sensors), vec!["s1", "s2"]);
    }

    #[test]
    fn test_extra_fields_do_not_matter() {
        let json = r#"[
            {"id": "a", "name": "North inlet", "gps": {"latitude": 44.1, "longitude": -123.2}},
            {"id": "b", "active": false},
            {"id": "c"}
        ]"#;
        let sensors = parse_sensors(json).expect("valid json");
        assert_eq!(ids(&sensors), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_string_ids_are_kept() {
        let json = r#"[{"id": 17}, "loose string", 3, {"id": null}, {"id": ["x"]}, {"id": "z"}]"#;
        let sensors = parse_sensors(json).expect("valid json");
        assert_eq!(ids(&sensors), vec!["17", "null", r#"["x"]"#, "z"]);
    }

    #[test]
    fn test_every_record_with_id_counts() {
        let json = r#"[{"id":null},{"id":true},{"id":"s1"},{"other":1}]"#;
        let sensors = parse_sensors(json).expect("valid json");
        assert_eq!(sensors.len(), 3);
        assert_eq!(ids(&sensors), vec!["null", "true", "s1"]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let sensors = parse_sensors(r#"[{"id":"b"},{"id":"a"},{"id":"b"}]"#).expect("valid json");
        assert_eq!(ids(&sensors), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_non_array_is_an_error() {
        assert!(parse_sensors(r#"{"id":"s1"}"#).is_err());
        assert!(parse_sensors("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_sensors(dir.path().join("sensors.json")).expect_err("missing file");
        assert!(matches!(err, SeedError::SensorsRead { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "[{{\"id\": \"s1\"}},").expect("write");
        let err = load_sensors(file.path()).expect_err("malformed file");
        assert!(matches!(err, SeedError::SensorsParse { .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"[{{"id":"s1"}},{{"id":"s2"}}]"#).expect("write");
        let sensors = load_sensors(file.path()).expect("load");
        assert_eq!(ids(&sensors), vec!["s1", "s2"]);
    }
}
