//! backend/src/domain/models/baby.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One discrete sleep attempt (bedtime to wake time) within a record.
///
/// Immutable once created; a full record edit regenerates cycle entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepCycle {
    pub id: String,
    /// Bedtime as an HH:MM string
    pub bedtime: String,
    /// Free text describing how long falling asleep took
    pub time_to_sleep: String,
    pub who_put_to_sleep: String,
    pub how_fell_asleep: String,
    /// HH:MM string; `None` while the baby has not yet woken
    pub wake_time: Option<String>,
}

impl SleepCycle {
    /// Generate a unique ID for a sleep cycle
    pub fn generate_id() -> String {
        format!("sc::{}", Uuid::new_v4())
    }
}

/// The sleep cycles logged for one calendar date and coaching stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: String,
    pub date: NaiveDate,
    /// Free-text label for the coaching phase, e.g. "הסתגלות"
    pub stage: String,
    /// At least one cycle; insertion order is the cycle number
    pub sleep_cycles: Vec<SleepCycle>,
}

impl SleepRecord {
    /// Generate a unique ID for a sleep record
    pub fn generate_id() -> String {
        format!("sr::{}", Uuid::new_v4())
    }
}

/// Domain model representing a coaching subject and its aggregate state.
///
/// The baby exclusively owns its sleep records and, transitively, their
/// cycles; relationships are purely compositional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baby {
    pub id: String,
    pub name: String,
    pub family_name: String,
    /// Age in months (0-36)
    pub age_months: u8,
    pub mother_name: String,
    pub father_name: String,
    pub siblings_count: u32,
    pub siblings_names: Option<String>,
    pub description: Option<String>,
    /// Login username of the parents; unique and immutable after creation
    pub parent_username: String,
    /// Notes the coach shares with the parents
    pub coach_notes: Option<String>,
    /// Kept sorted by date descending after every mutation
    pub sleep_records: Vec<SleepRecord>,
    pub is_archived: bool,
    /// Set when the baby is archived, cleared on unarchive
    pub date_archived: Option<DateTime<Utc>>,
    /// Advanced on every successful mutation
    pub last_modified: DateTime<Utc>,
}

impl Baby {
    /// Generate a globally unique ID for a baby
    pub fn generate_id() -> String {
        format!("baby::{}", Uuid::new_v4())
    }

    /// Sort the sleep records by date descending (most recent first).
    ///
    /// The sort is stable, so records sharing a date keep their relative
    /// order.
    pub fn sort_sleep_records(&mut self) {
        self.sleep_records.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// The most recent sleep record, preferring list order on date ties.
    pub fn latest_sleep_record(&self) -> Option<&SleepRecord> {
        self.sleep_records
            .iter()
            .fold(None, |best: Option<&SleepRecord>, record| match best {
                Some(current) if current.date >= record.date => Some(current),
                _ => Some(record),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: NaiveDate) -> SleepRecord {
        SleepRecord {
            id: id.to_string(),
            date,
            stage: "הסתגלות".to_string(),
            sleep_cycles: vec![SleepCycle {
                id: SleepCycle::generate_id(),
                bedtime: "19:00".to_string(),
                time_to_sleep: "30 דקות".to_string(),
                who_put_to_sleep: "אמא".to_string(),
                how_fell_asleep: "הנקה".to_string(),
                wake_time: Some("06:00".to_string()),
            }],
        }
    }

    fn baby_with_records(records: Vec<SleepRecord>) -> Baby {
        Baby {
            id: Baby::generate_id(),
            name: "נועה".to_string(),
            family_name: "לוי".to_string(),
            age_months: 8,
            mother_name: "רבקה".to_string(),
            father_name: "יעקב".to_string(),
            siblings_count: 0,
            siblings_names: None,
            description: None,
            parent_username: "levi-family".to_string(),
            coach_notes: None,
            sleep_records: records,
            is_archived: false,
            date_archived: None,
            last_modified: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generated_ids_are_unique_and_prefixed() {
        let a = Baby::generate_id();
        let b = Baby::generate_id();
        assert_ne!(a, b);
        assert!(a.starts_with("baby::"));
        assert!(SleepRecord::generate_id().starts_with("sr::"));
        assert!(SleepCycle::generate_id().starts_with("sc::"));
    }

    #[test]
    fn test_sort_sleep_records_descending() {
        let mut baby = baby_with_records(vec![
            record("old", date(2024, 7, 18)),
            record("newest", date(2024, 7, 21)),
            record("middle", date(2024, 7, 20)),
        ]);
        baby.sort_sleep_records();
        let ids: Vec<&str> = baby.sleep_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "middle", "old"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut baby = baby_with_records(vec![
            record("first", date(2024, 7, 20)),
            record("second", date(2024, 7, 20)),
            record("newer", date(2024, 7, 21)),
        ]);
        baby.sort_sleep_records();
        let ids: Vec<&str> = baby.sleep_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "first", "second"]);
    }

    #[test]
    fn test_latest_sleep_record() {
        let baby = baby_with_records(vec![
            record("old", date(2024, 7, 18)),
            record("newest", date(2024, 7, 21)),
        ]);
        assert_eq!(baby.latest_sleep_record().unwrap().id, "newest");

        let empty = baby_with_records(vec![]);
        assert!(empty.latest_sleep_record().is_none());
    }
}
