//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. A presentation layer is responsible for
//! mapping the public DTOs defined in the `shared` crate to these internal
//! types.

pub mod babies {
    use crate::domain::models::baby::{Baby, SleepRecord};

    /// Input for creating a new baby profile.
    ///
    /// Identifier, sleep records, coach notes, archival state and timestamps
    /// are all assigned by the service, never supplied by the caller.
    #[derive(Debug, Clone)]
    pub struct CreateBabyCommand {
        pub name: String,
        pub family_name: String,
        pub age_months: u8,
        pub mother_name: String,
        pub father_name: String,
        pub siblings_count: u32,
        pub siblings_names: Option<String>,
        pub description: Option<String>,
        pub parent_username: String,
    }

    /// Result of creating a baby.
    #[derive(Debug, Clone)]
    pub struct CreateBabyResult {
        pub baby: Baby,
    }

    /// Input for fetching a baby by ID.
    #[derive(Debug, Clone)]
    pub struct GetBabyCommand {
        pub baby_id: String,
    }

    /// Result of fetching a baby by ID.
    #[derive(Debug, Clone)]
    pub struct GetBabyResult {
        pub baby: Option<Baby>,
    }

    /// Input for the parent-facing lookup by login username.
    #[derive(Debug, Clone)]
    pub struct GetBabyByParentCommand {
        pub parent_username: String,
    }

    /// Result of listing babies.
    #[derive(Debug, Clone)]
    pub struct ListBabiesResult {
        pub babies: Vec<Baby>,
    }

    /// Input for filtering the active roster.
    #[derive(Debug, Clone)]
    pub struct SearchBabiesCommand {
        pub term: String,
    }

    /// Partial update of a baby profile.
    ///
    /// `None` leaves a field unchanged. For the optional text fields an
    /// empty or whitespace-only value clears the field, which is the only
    /// way the original edit form could blank one.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBabyCommand {
        pub baby_id: String,
        pub name: Option<String>,
        pub family_name: Option<String>,
        pub age_months: Option<u8>,
        pub mother_name: Option<String>,
        pub father_name: Option<String>,
        pub siblings_count: Option<u32>,
        pub siblings_names: Option<String>,
        pub description: Option<String>,
        pub coach_notes: Option<String>,
        pub sleep_records: Option<Vec<SleepRecord>>,
    }

    /// Result of updating a baby.
    #[derive(Debug, Clone)]
    pub struct UpdateBabyResult {
        pub baby: Baby,
    }

    /// Input for archiving or unarchiving a baby.
    #[derive(Debug, Clone)]
    pub struct ArchiveBabyCommand {
        pub baby_id: String,
    }

    /// Result of archiving a baby.
    #[derive(Debug, Clone)]
    pub struct ArchiveBabyResult {
        pub baby: Baby,
        /// True when the baby was already archived (no-op success)
        pub already_archived: bool,
    }

    /// Result of unarchiving a baby.
    #[derive(Debug, Clone)]
    pub struct UnarchiveBabyResult {
        pub baby: Baby,
        /// True when the baby was already active (no-op success)
        pub already_active: bool,
    }

    /// Input for permanently deleting a baby.
    #[derive(Debug, Clone)]
    pub struct DeleteBabyCommand {
        pub baby_id: String,
    }

    /// Result of a permanent deletion. Irreversible when `deleted` is true.
    #[derive(Debug, Clone)]
    pub struct DeleteBabyResult {
        pub deleted: bool,
    }
}

pub mod sleep {
    use crate::domain::models::baby::SleepRecord;
    use chrono::NaiveDate;

    /// One cycle as submitted by the parent sleep form.
    #[derive(Debug, Clone)]
    pub struct SleepCycleInput {
        pub bedtime: String,
        pub time_to_sleep: String,
        pub who_put_to_sleep: String,
        pub how_fell_asleep: String,
        pub wake_time: Option<String>,
    }

    /// Input for logging a new sleep record.
    #[derive(Debug, Clone)]
    pub struct AddSleepRecordCommand {
        pub baby_id: String,
        pub date: NaiveDate,
        pub stage: String,
        pub cycles: Vec<SleepCycleInput>,
    }

    /// Result of logging a sleep record.
    #[derive(Debug, Clone)]
    pub struct AddSleepRecordResult {
        pub record: SleepRecord,
    }

    /// Full replacement of an existing sleep record.
    #[derive(Debug, Clone)]
    pub struct UpdateSleepRecordCommand {
        pub baby_id: String,
        pub record_id: String,
        pub date: NaiveDate,
        pub stage: String,
        pub cycles: Vec<SleepCycleInput>,
    }

    /// Result of editing a sleep record.
    #[derive(Debug, Clone)]
    pub struct UpdateSleepRecordResult {
        pub record: SleepRecord,
    }

    /// Input for deleting one sleep record from a baby.
    #[derive(Debug, Clone)]
    pub struct DeleteSleepRecordCommand {
        pub baby_id: String,
        pub record_id: String,
    }

    /// Result of deleting a sleep record.
    #[derive(Debug, Clone)]
    pub struct DeleteSleepRecordResult {
        pub success_message: String,
    }
}
