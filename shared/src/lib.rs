use serde::{Deserialize, Serialize};

/// One sleep attempt within a day, as presented to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepCycle {
    pub id: String,
    /// Bedtime as an HH:MM string
    pub bedtime: String,
    /// Free text, e.g. "30 דקות"
    pub time_to_sleep: String,
    pub who_put_to_sleep: String,
    pub how_fell_asleep: String,
    /// HH:MM string; absent if the baby has not yet woken
    pub wake_time: Option<String>,
}

/// The set of sleep cycles logged for one calendar date and coaching stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepRecord {
    pub id: String,
    /// Calendar date as YYYY-MM-DD
    pub date: String,
    /// Free-text coaching-phase label
    pub stage: String,
    /// Insertion order is the cycle number
    pub sleep_cycles: Vec<SleepCycle>,
}

/// A coaching subject profile as presented to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
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
    /// Ordered most-recent-first
    pub sleep_records: Vec<SleepRecord>,
    pub is_archived: bool,
    /// RFC 3339 timestamp; set while the baby is archived
    pub date_archived: Option<String>,
    /// RFC 3339 timestamp of the last successful mutation
    pub last_modified: String,
}

/// Role of the logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "coach")]
    Coach,
    #[serde(rename = "parent")]
    Parent,
}

/// Current session as exposed to page-level guards.
///
/// This is a convenience flag only, not an authentication mechanism: there is
/// no password, token, or server-side verification behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub username: Option<String>,
    pub role: Option<UserRole>,
}

/// One generated CSV file, ready for download triggering by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExportFile {
    /// `LailaTov_Data_<name>_<familyName>.csv`, sanitized
    pub filename: String,
    /// UTF-8 CSV text with a leading byte-order mark
    pub content: String,
}

/// Result of exporting all active babies as CSV (one file per baby).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCsvResponse {
    pub files: Vec<CsvExportFile>,
    pub baby_count: usize,
}

/// Result of rendering the printable report.
///
/// The HTML is handed to the host's print facility; no file is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPrintResponse {
    pub html: String,
    pub baby_count: usize,
}
