//! Report records and the in-memory registry that serves them.
//!
//! The registry is built once at startup and shared read-only behind an
//! `Arc`; there is no mutation after construction, so lookups need no
//! locking.

use crate::{Error, Result, content::ContentFormat};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Timestamp layout used for `report_updated_date` (ISO-8601, microseconds,
/// no offset).
pub const UPDATED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A previously generated report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_id: String,
    pub report_title: String,
    pub report_raw_text: String,
    pub speaker_a: String,
    pub speaker_b: String,
    pub report_tazak: String,
    pub report_updated_date: String,
}

impl ReportRecord {
    /// Builds the `index`-th sample report around `body`.
    #[must_use]
    pub fn sample(index: usize, body: &str, updated_at: NaiveDateTime) -> Self {
        Self {
            report_id: format!("report_{index}"),
            report_title: format!("כתבה דוגמה {index}"),
            report_raw_text: format!("{body} קטע מספר {index}"),
            speaker_a: format!("מרצה א {index}"),
            speaker_b: format!("מרצה ב {index}"),
            report_tazak: format!("תזק דוגמה {index}"),
            report_updated_date: updated_at.format(UPDATED_DATE_FORMAT).to_string(),
        }
    }
}

/// Read-only mapping from request identifier (`id1`, `id2`, ...) to report.
///
/// Keys keep their insertion order, which is the order advertised to clients
/// in the `Request-Ids` header.
#[derive(Clone, Debug, Default)]
pub struct ReportRegistry {
    keys: Vec<String>,
    records: HashMap<String, ReportRecord>,
}

impl ReportRegistry {
    /// Builds a registry of `count` sample reports keyed `id1..=id{count}`,
    /// all stamped with `updated_at`.
    #[must_use]
    pub fn seeded(count: usize, format: ContentFormat, updated_at: NaiveDateTime) -> Self {
        (1..=count)
            .map(|i| {
                (
                    format!("id{i}"),
                    ReportRecord::sample(i, format.source_text(), updated_at),
                )
            })
            .collect()
    }

    /// Same as [`Self::seeded`], stamped with the current local time.
    #[must_use]
    pub fn seeded_now(count: usize, format: ContentFormat) -> Self {
        Self::seeded(count, format, chrono::Local::now().naive_local())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ReportRecord> {
        self.records.get(key)
    }

    /// Looks up a report, failing with [`Error::NotFound`] when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `key` is not registered.
    pub fn require(&self, key: &str) -> Result<&ReportRecord> {
        self.get(key).ok_or_else(Error::report_not_found)
    }

    /// Registered keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Registered keys encoded as a JSON array, as sent in `Request-Ids`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if serialization fails.
    pub fn keys_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.keys)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<(String, ReportRecord)> for ReportRegistry {
    /// Later records replace earlier ones with the same key; the key keeps its
    /// first position.
    fn from_iter<I: IntoIterator<Item = (String, ReportRecord)>>(iter: I) -> Self {
        let mut registry = Self::default();
        for (key, record) in iter {
            if registry.records.insert(key.clone(), record).is_none() {
                registry.keys.push(key);
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_micro_opt(12, 30, 15, 42))
            .unwrap()
    }

    #[test]
    fn seeded_registry_has_sequential_keys() {
        let registry = ReportRegistry::seeded(5, ContentFormat::Html, fixed_time());
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["id1", "id2", "id3", "id4", "id5"]
        );
    }

    #[test]
    fn keys_keep_insertion_order_past_nine() {
        let registry = ReportRegistry::seeded(11, ContentFormat::Plain, fixed_time());
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys[9], "id10");
        assert_eq!(keys[10], "id11");
    }

    #[test]
    fn sample_record_fields() {
        let registry = ReportRegistry::seeded(2, ContentFormat::Plain, fixed_time());
        let record = registry.require("id2").unwrap();
        assert_eq!(record.report_id, "report_2");
        assert_eq!(record.report_title, "כתבה דוגמה 2");
        assert_eq!(record.speaker_a, "מרצה א 2");
        assert_eq!(record.speaker_b, "מרצה ב 2");
        assert_eq!(record.report_tazak, "תזק דוגמה 2");
        assert!(record.report_raw_text.ends_with(" קטע מספר 2"));
        assert!(record.report_raw_text.starts_with(ContentFormat::Plain.source_text()));
        assert_eq!(record.report_updated_date, "2024-05-01T12:30:15.000042");
    }

    #[test]
    fn lookups_are_stable() {
        let registry = ReportRegistry::seeded(5, ContentFormat::Html, fixed_time());
        let first = registry.require("id1").unwrap().clone();
        let second = registry.require("id1").unwrap();
        assert_eq!(&first, second);
        assert_eq!(first.report_id, "report_1");
    }

    #[test]
    fn unknown_key_is_not_found() {
        let registry = ReportRegistry::seeded(5, ContentFormat::Html, fixed_time());
        assert_eq!(registry.require("missing"), Err(Error::report_not_found()));
        assert!(registry.get("id6").is_none());
    }

    #[test]
    fn keys_json_is_an_array() {
        let registry = ReportRegistry::seeded(3, ContentFormat::Html, fixed_time());
        assert_eq!(registry.keys_json().unwrap(), r#"["id1","id2","id3"]"#);
        assert_eq!(ReportRegistry::default().keys_json().unwrap(), "[]");
    }

    #[test]
    fn duplicate_keys_keep_first_position() {
        let record = |i| ReportRecord::sample(i, "body", fixed_time());
        let registry: ReportRegistry = vec![
            ("b".to_string(), record(1)),
            ("a".to_string(), record(2)),
            ("b".to_string(), record(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(registry.require("b").unwrap().report_id, "report_3");
    }
}
