// src/transform.rs

//! Transformation of the raw AppStream API payload into the grouped table.
//!
//! The lifecycle API returns a flat `data` array mixing package and module
//! entries for every release. Grouping by `el{os_major}` up front keeps the
//! on-disk vars file small and lets the evaluator do a single key lookup.

use crate::lifecycle::{LifecycleTable, ModuleEntry, PackageEntry};
use serde_json::Value;

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn end_date_field(item: &Value) -> Option<String> {
    item.get("end_date")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Group a raw AppStream API response by OS major release
///
/// Entries whose `impl` is neither `package` nor `dnf_module` are skipped;
/// a missing or non-integer `os_major` groups under `el0`. Missing names,
/// streams, or end dates are carried through empty and left for the
/// evaluator's exclusion rules.
pub fn transform_appstreams(payload: &Value) -> LifecycleTable {
    let mut grouped = LifecycleTable::new();

    let items = payload
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for item in items {
        if !item.is_object() {
            continue;
        }

        let kind = match item.get("impl").and_then(Value::as_str) {
            Some(kind @ ("package" | "dnf_module")) => kind,
            _ => continue,
        };

        let os_major = item.get("os_major").and_then(Value::as_i64).unwrap_or(0);
        let major = grouped.entry(format!("el{os_major}")).or_default();

        if kind == "package" {
            major.package.push(PackageEntry {
                name: string_field(item, "name"),
                end_date: end_date_field(item),
            });
        } else {
            major.dnf_module.push(ModuleEntry {
                name: string_field(item, "name"),
                stream: string_field(item, "stream"),
                end_date: end_date_field(item),
            });
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_groups_by_major_and_impl() {
        let payload = json!({
            "data": [
                {"name": "ant", "stream": "1.10", "end_date": "2030-05-31",
                 "impl": "package", "os_major": 9},
                {"name": "nodejs", "stream": "18", "end_date": "2025-04-30",
                 "impl": "dnf_module", "os_major": 8},
                {"name": "nginx", "stream": "1.22", "end_date": "2027-05-31",
                 "impl": "dnf_module", "os_major": 8},
            ],
            "meta": {"count": 3}
        });

        let grouped = transform_appstreams(&payload);
        assert_eq!(grouped.get("el9").unwrap().package.len(), 1);
        assert_eq!(grouped.get("el9").unwrap().dnf_module.len(), 0);

        let el8 = grouped.get("el8").unwrap();
        assert_eq!(el8.dnf_module.len(), 2);
        assert_eq!(el8.dnf_module[0].name, "nodejs");
        assert_eq!(el8.dnf_module[0].stream, "18");
    }

    #[test]
    fn test_unknown_impl_and_non_objects_skipped() {
        let payload = json!({
            "data": [
                {"name": "scl", "impl": "scl", "os_major": 7},
                "not-an-object",
                42,
            ]
        });
        assert!(transform_appstreams(&payload).is_empty());
    }

    #[test]
    fn test_missing_os_major_groups_under_el0() {
        let payload = json!({
            "data": [{"name": "mystery", "impl": "package"}]
        });
        let grouped = transform_appstreams(&payload);
        assert_eq!(grouped.get("el0").unwrap().package[0].name, "mystery");
    }

    #[test]
    fn test_missing_fields_carried_through_empty() {
        let payload = json!({
            "data": [{"impl": "dnf_module", "os_major": 9}]
        });
        let grouped = transform_appstreams(&payload);
        let entry = &grouped.get("el9").unwrap().dnf_module[0];
        assert!(entry.name.is_empty());
        assert!(entry.stream.is_empty());
        assert!(entry.end_date.is_none());
    }

    #[test]
    fn test_empty_or_missing_data_array() {
        assert!(transform_appstreams(&json!({})).is_empty());
        assert!(transform_appstreams(&json!({"data": []})).is_empty());
    }
}
