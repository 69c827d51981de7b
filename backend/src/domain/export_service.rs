//! Export service domain logic for the sleep-coaching backend.
//!
//! This module contains all business logic related to exporting sleep data:
//! per-baby CSV files with the fixed Hebrew column labels, and the printable
//! RTL HTML report. The UI only handles presentation concerns (triggering
//! downloads, opening the print dialog).

use anyhow::Result;
use log::info;

use shared::{Baby, CsvExportFile, ExportCsvResponse, ExportPrintResponse, SleepCycle, SleepRecord};

use crate::domain::baby_service::BabyService;

/// Fixed Hebrew CSV column labels, in column order.
const CSV_HEADERS: [&str; 8] = [
    "תאריך",
    "שלב בתהליך",
    "מספר מחזור שינה",
    "שעת השכבה",
    "כמה זמן עד שנרדם/ה",
    "מי הרדים/ה",
    "איך נרדמ/ה",
    "שעת יקיצה",
];

/// Placeholder date cell for a baby without any sleep records.
const NO_SLEEP_DATA: &str = "אין נתוני שינה";

/// Maps domain models to the presentation DTOs in the `shared` crate.
struct BabyMapper;

impl BabyMapper {
    pub fn to_dto(baby: crate::domain::models::baby::Baby) -> Baby {
        Baby {
            id: baby.id,
            name: baby.name,
            family_name: baby.family_name,
            age_months: baby.age_months,
            mother_name: baby.mother_name,
            father_name: baby.father_name,
            siblings_count: baby.siblings_count,
            siblings_names: baby.siblings_names,
            description: baby.description,
            parent_username: baby.parent_username,
            coach_notes: baby.coach_notes,
            sleep_records: baby
                .sleep_records
                .into_iter()
                .map(|record| SleepRecord {
                    id: record.id,
                    date: record.date.format("%Y-%m-%d").to_string(),
                    stage: record.stage,
                    sleep_cycles: record
                        .sleep_cycles
                        .into_iter()
                        .map(|cycle| SleepCycle {
                            id: cycle.id,
                            bedtime: cycle.bedtime,
                            time_to_sleep: cycle.time_to_sleep,
                            who_put_to_sleep: cycle.who_put_to_sleep,
                            how_fell_asleep: cycle.how_fell_asleep,
                            wake_time: cycle.wake_time,
                        })
                        .collect(),
                })
                .collect(),
            is_archived: baby.is_archived,
            date_archived: baby.date_archived.map(|d| d.to_rfc3339()),
            last_modified: baby.last_modified.to_rfc3339(),
        }
    }
}

/// Export service that handles all export-related business logic
#[derive(Clone)]
pub struct ExportService {
    // No internal state needed for now
}

impl ExportService {
    /// Create a new ExportService instance
    pub fn new() -> Self {
        Self {}
    }

    /// Export all active babies as CSV, one file per baby.
    ///
    /// Each file is UTF-8 with a leading byte-order mark so spreadsheet
    /// applications pick up the Hebrew text correctly.
    pub fn export_csv(&self, baby_service: &BabyService) -> Result<ExportCsvResponse> {
        info!("Exporting sleep data as CSV for all active babies");

        let babies: Vec<Baby> = baby_service
            .list_active_babies()?
            .babies
            .into_iter()
            .map(BabyMapper::to_dto)
            .collect();

        let files: Vec<CsvExportFile> = babies
            .iter()
            .map(|baby| CsvExportFile {
                filename: csv_file_name(baby),
                content: csv_content(baby),
            })
            .collect();

        info!("Generated {} CSV export files", files.len());

        Ok(ExportCsvResponse {
            baby_count: babies.len(),
            files,
        })
    }

    /// Render the printable report: a single RTL Hebrew HTML document with
    /// one page-section per active baby.
    ///
    /// The host hands the document to its print facility; nothing is
    /// persisted here.
    pub fn export_print_html(&self, baby_service: &BabyService) -> Result<ExportPrintResponse> {
        info!("Rendering printable report for all active babies");

        let babies: Vec<Baby> = baby_service
            .list_active_babies()?
            .babies
            .into_iter()
            .map(BabyMapper::to_dto)
            .collect();

        let mut sections = String::new();
        for baby in &babies {
            sections.push_str(&baby_section_html(baby));
        }

        let html = format!(
            "<!DOCTYPE html>\n\
             <html dir=\"rtl\" lang=\"he\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>לילה טוב - דוח נתוני שינה</title>\n\
             <style>\n\
             body {{ direction: rtl; font-family: sans-serif; margin: 2em; }}\n\
             .baby-section {{ page-break-after: always; }}\n\
             table {{ border-collapse: collapse; width: 100%; margin-top: 0.5em; }}\n\
             th, td {{ border: 1px solid #999; padding: 4px 8px; text-align: right; }}\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <h1>דוח נתוני שינה</h1>\n\
             {}\
             </body>\n\
             </html>\n",
            sections
        );

        Ok(ExportPrintResponse {
            html,
            baby_count: babies.len(),
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a single CSV field: quote-wrap when it contains a comma, quote or
/// line break, doubling any internal quotes.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Keep ASCII alphanumerics, Hebrew letters, `_`, `.` and `-`; everything
/// else becomes an underscore.
fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric()
                || ('\u{05D0}'..='\u{05EA}').contains(&c)
                || matches!(c, '_' | '.' | '-')
            {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn csv_file_name(baby: &Baby) -> String {
    let safe = sanitize_file_name(&format!("{}_{}", baby.name, baby.family_name));
    format!("LailaTov_Data_{}.csv", safe)
}

/// Build one baby's CSV text: BOM, header row, then one row per cycle.
///
/// A record without cycles keeps its date and stage and carries `-` in the
/// cycle columns; a baby without records yields a single row flagging the
/// absence of sleep data.
fn csv_content(baby: &Baby) -> String {
    let mut rows: Vec<String> = Vec::new();
    rows.push(
        CSV_HEADERS
            .iter()
            .map(|h| escape_csv(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    if baby.sleep_records.is_empty() {
        let mut cells = vec![NO_SLEEP_DATA.to_string()];
        cells.resize(CSV_HEADERS.len(), String::new());
        rows.push(cells.join(","));
    } else {
        for record in &baby.sleep_records {
            if record.sleep_cycles.is_empty() {
                let cells = [
                    record.date.as_str(),
                    record.stage.as_str(),
                    "-",
                    "-",
                    "-",
                    "-",
                    "-",
                    "-",
                ];
                rows.push(cells.map(escape_csv).join(","));
            } else {
                for (index, cycle) in record.sleep_cycles.iter().enumerate() {
                    let cycle_number = (index + 1).to_string();
                    let cells = [
                        record.date.as_str(),
                        record.stage.as_str(),
                        cycle_number.as_str(),
                        cycle.bedtime.as_str(),
                        cycle.time_to_sleep.as_str(),
                        cycle.who_put_to_sleep.as_str(),
                        cycle.how_fell_asleep.as_str(),
                        cycle.wake_time.as_deref().unwrap_or(""),
                    ];
                    rows.push(cells.map(escape_csv).join(","));
                }
            }
        }
    }

    format!("\u{FEFF}{}", rows.join("\n"))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn baby_section_html(baby: &Baby) -> String {
    let mut section = String::new();
    section.push_str("<section class=\"baby-section\">\n");
    section.push_str(&format!(
        "<h2>{} {}</h2>\n",
        escape_html(&baby.name),
        escape_html(&baby.family_name)
    ));
    section.push_str(&format!("<p>גיל: {} חודשים</p>\n", baby.age_months));
    section.push_str(&format!(
        "<p>שם האם: {} | שם האב: {}</p>\n",
        escape_html(&baby.mother_name),
        escape_html(&baby.father_name)
    ));
    if let Some(description) = &baby.description {
        section.push_str(&format!("<p>תיאור: {}</p>\n", escape_html(description)));
    }
    if let Some(coach_notes) = &baby.coach_notes {
        section.push_str(&format!(
            "<p>המלצות היועצת: {}</p>\n",
            escape_html(coach_notes)
        ));
    }

    if baby.sleep_records.is_empty() {
        section.push_str(&format!("<p>{}</p>\n", NO_SLEEP_DATA));
    } else {
        for record in &baby.sleep_records {
            section.push_str(&format!(
                "<h3>{} — {}</h3>\n",
                escape_html(&record.date),
                escape_html(&record.stage)
            ));
            section.push_str("<table>\n<tr>");
            for header in &CSV_HEADERS[2..] {
                section.push_str(&format!("<th>{}</th>", header));
            }
            section.push_str("</tr>\n");
            for (index, cycle) in record.sleep_cycles.iter().enumerate() {
                section.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    index + 1,
                    escape_html(&cycle.bedtime),
                    escape_html(&cycle.time_to_sleep),
                    escape_html(&cycle.who_put_to_sleep),
                    escape_html(&cycle.how_fell_asleep),
                    escape_html(cycle.wake_time.as_deref().unwrap_or("")),
                ));
            }
            section.push_str("</table>\n");
        }
    }

    section.push_str("</section>\n");
    section
}
