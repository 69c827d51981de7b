//! Demo fixture dataset for the in-memory store.
//!
//! A freshly seeded store matches the demo roster the original service
//! shipped with: three active babies, two of them with logged sleep data
//! and one without any records yet.

use chrono::{NaiveDate, Utc};

use crate::domain::models::baby::{Baby, SleepCycle, SleepRecord};

fn fixture_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

fn cycle(
    id: &str,
    bedtime: &str,
    time_to_sleep: &str,
    who_put_to_sleep: &str,
    how_fell_asleep: &str,
    wake_time: &str,
) -> SleepCycle {
    SleepCycle {
        id: id.to_string(),
        bedtime: bedtime.to_string(),
        time_to_sleep: time_to_sleep.to_string(),
        who_put_to_sleep: who_put_to_sleep.to_string(),
        how_fell_asleep: how_fell_asleep.to_string(),
        wake_time: Some(wake_time.to_string()),
    }
}

/// The three demo babies, all active.
pub fn fixture_babies() -> Vec<Baby> {
    let now = Utc::now();

    vec![
        Baby {
            id: "baby::demo-cohen".to_string(),
            name: "אורי".to_string(),
            family_name: "כהן".to_string(),
            age_months: 6,
            mother_name: "שרה".to_string(),
            father_name: "משה".to_string(),
            siblings_count: 0,
            siblings_names: None,
            description: Some("תינוק חייכן ושמח, מתקשה להירדם בלילה.".to_string()),
            parent_username: "cohen-family".to_string(),
            coach_notes: Some(
                "להמליץ על טקס שינה קבוע. לבדוק תזונה לפני השינה.".to_string(),
            ),
            sleep_records: vec![SleepRecord {
                id: "sr::demo-cohen-1".to_string(),
                date: fixture_date(2024, 7, 20),
                stage: "הסתגלות".to_string(),
                sleep_cycles: vec![
                    cycle("sc::demo-cohen-1", "19:00", "30 דקות", "אמא", "הנקה", "06:00"),
                    cycle("sc::demo-cohen-2", "10:00", "15 דקות", "אבא", "נענוע קל", "11:30"),
                ],
            }],
            is_archived: false,
            date_archived: None,
            last_modified: now,
        },
        Baby {
            id: "baby::demo-levi".to_string(),
            name: "נועה".to_string(),
            family_name: "לוי".to_string(),
            age_months: 8,
            mother_name: "רבקה".to_string(),
            father_name: "יעקב".to_string(),
            siblings_count: 1,
            siblings_names: Some("דניאל (3)".to_string()),
            description: Some("מתעוררת מספר פעמים בלילה.".to_string()),
            parent_username: "levi-family".to_string(),
            coach_notes: Some(
                "לנסות להפחית גירויים לפני השינה. לבדוק טמפרטורת חדר.".to_string(),
            ),
            sleep_records: vec![SleepRecord {
                id: "sr::demo-levi-1".to_string(),
                date: fixture_date(2024, 7, 21),
                stage: "ביסוס הרגלים".to_string(),
                sleep_cycles: vec![cycle(
                    "sc::demo-levi-1",
                    "20:00",
                    "20 דקות",
                    "אמא",
                    "שיר ערש",
                    "05:30",
                )],
            }],
            is_archived: false,
            date_archived: None,
            last_modified: now,
        },
        Baby {
            id: "baby::demo-israel".to_string(),
            name: "איתי".to_string(),
            family_name: "ישראל".to_string(),
            age_months: 12,
            mother_name: "לאה".to_string(),
            father_name: "יוסף".to_string(),
            siblings_count: 2,
            siblings_names: Some("רות (5), דוד (2)".to_string()),
            description: Some("נרדם רק על הידיים.".to_string()),
            parent_username: "israel-family".to_string(),
            coach_notes: Some("לעבוד על הרדמות עצמאית במיטה.".to_string()),
            // No sleep data logged yet; exercises the export placeholder row
            sleep_records: Vec::new(),
            is_archived: false,
            date_archived: None,
            last_modified: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_roster() {
        let babies = fixture_babies();
        assert_eq!(babies.len(), 3);
        assert!(babies.iter().all(|b| !b.is_archived));
        assert!(babies.iter().all(|b| b.date_archived.is_none()));

        let usernames: Vec<&str> = babies.iter().map(|b| b.parent_username.as_str()).collect();
        assert_eq!(
            usernames,
            vec!["cohen-family", "levi-family", "israel-family"]
        );
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let babies = fixture_babies();
        for (i, a) in babies.iter().enumerate() {
            for b in babies.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_fixture_sleep_data() {
        let babies = fixture_babies();
        assert_eq!(babies[0].sleep_records.len(), 1);
        assert_eq!(babies[0].sleep_records[0].sleep_cycles.len(), 2);
        assert_eq!(babies[1].sleep_records.len(), 1);
        // איתי has no records yet
        assert!(babies[2].sleep_records.is_empty());
    }
}
