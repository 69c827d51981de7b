use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::babies::{
    ArchiveBabyCommand, ArchiveBabyResult, CreateBabyCommand, CreateBabyResult, DeleteBabyCommand,
    DeleteBabyResult, GetBabyByParentCommand, GetBabyCommand, GetBabyResult, ListBabiesResult,
    SearchBabiesCommand, UnarchiveBabyResult, UpdateBabyCommand, UpdateBabyResult,
};
use crate::domain::models::baby::Baby as DomainBaby;
use crate::storage::memory::{BabyRepository, MemoryConnection};
use crate::storage::traits::BabyStorage;

/// Service for managing baby profiles in the sleep-coaching system.
///
/// Field-level input validation is a presentation concern; this service
/// assumes already-validated input and only fails on unknown identifiers.
#[derive(Clone)]
pub struct BabyService {
    baby_repository: BabyRepository,
}

impl BabyService {
    /// Create a new BabyService
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        let baby_repository = BabyRepository::new(connection);
        Self { baby_repository }
    }

    /// Create a new baby profile.
    ///
    /// Identifier and bookkeeping fields are assigned here: sleep records
    /// and coach notes start empty, the baby starts active, and
    /// `last_modified` is set to now.
    pub fn create_baby(&self, command: CreateBabyCommand) -> Result<CreateBabyResult> {
        info!(
            "Creating baby: name={} {}, parent_username={}",
            command.name, command.family_name, command.parent_username
        );

        let now = Utc::now();
        let baby = DomainBaby {
            id: DomainBaby::generate_id(),
            name: command.name.trim().to_string(),
            family_name: command.family_name.trim().to_string(),
            age_months: command.age_months,
            mother_name: command.mother_name.trim().to_string(),
            father_name: command.father_name.trim().to_string(),
            siblings_count: command.siblings_count,
            siblings_names: normalize_optional_text(command.siblings_names),
            description: normalize_optional_text(command.description),
            parent_username: command.parent_username.trim().to_string(),
            coach_notes: None,
            sleep_records: Vec::new(),
            is_archived: false,
            date_archived: None,
            last_modified: now,
        };

        self.baby_repository.store_baby(&baby)?;

        info!("Created baby {} with ID: {}", baby.name, baby.id);

        Ok(CreateBabyResult { baby })
    }

    /// Get a baby by ID, regardless of archived state
    pub fn get_baby(&self, command: GetBabyCommand) -> Result<GetBabyResult> {
        debug!("Getting baby: {}", command.baby_id);

        let baby = self.baby_repository.get_baby(&command.baby_id)?;

        if baby.is_none() {
            warn!("Baby not found: {}", command.baby_id);
        }

        Ok(GetBabyResult { baby })
    }

    /// Parent-facing lookup: the unique non-archived baby with this
    /// parent username
    pub fn get_baby_by_parent_username(
        &self,
        command: GetBabyByParentCommand,
    ) -> Result<GetBabyResult> {
        debug!("Looking up baby for parent: {}", command.parent_username);

        let baby = self
            .baby_repository
            .get_baby_by_parent_username(&command.parent_username)?;

        Ok(GetBabyResult { baby })
    }

    /// List all non-archived babies
    pub fn list_active_babies(&self) -> Result<ListBabiesResult> {
        let babies = self.baby_repository.list_active_babies()?;
        debug!("Found {} active babies", babies.len());
        Ok(ListBabiesResult { babies })
    }

    /// List all archived babies
    pub fn list_archived_babies(&self) -> Result<ListBabiesResult> {
        let babies = self.baby_repository.list_archived_babies()?;
        debug!("Found {} archived babies", babies.len());
        Ok(ListBabiesResult { babies })
    }

    /// Filter the active roster by a case-insensitive substring over the
    /// baby's name, family name and parents' names.
    pub fn search_active_babies(&self, command: SearchBabiesCommand) -> Result<ListBabiesResult> {
        let term = command.term.trim().to_lowercase();
        let mut babies = self.baby_repository.list_active_babies()?;

        if !term.is_empty() {
            babies.retain(|b| {
                b.name.to_lowercase().contains(&term)
                    || b.family_name.to_lowercase().contains(&term)
                    || b.mother_name.to_lowercase().contains(&term)
                    || b.father_name.to_lowercase().contains(&term)
            });
        }

        Ok(ListBabiesResult { babies })
    }

    /// Update an existing baby with partial-merge semantics.
    ///
    /// Supplied fields override, omitted fields are preserved. The parent
    /// username is immutable after creation and cannot be merged.
    pub fn update_baby(&self, command: UpdateBabyCommand) -> Result<UpdateBabyResult> {
        info!("Updating baby: {}", command.baby_id);

        let mut baby = self
            .baby_repository
            .get_baby(&command.baby_id)?
            .ok_or_else(|| anyhow::anyhow!("Baby not found: {}", command.baby_id))?;

        if let Some(name) = command.name {
            baby.name = name.trim().to_string();
        }
        if let Some(family_name) = command.family_name {
            baby.family_name = family_name.trim().to_string();
        }
        if let Some(age_months) = command.age_months {
            baby.age_months = age_months;
        }
        if let Some(mother_name) = command.mother_name {
            baby.mother_name = mother_name.trim().to_string();
        }
        if let Some(father_name) = command.father_name {
            baby.father_name = father_name.trim().to_string();
        }
        if let Some(siblings_count) = command.siblings_count {
            baby.siblings_count = siblings_count;
        }
        if let Some(siblings_names) = command.siblings_names {
            baby.siblings_names = normalize_optional_text(Some(siblings_names));
        }
        if let Some(description) = command.description {
            baby.description = normalize_optional_text(Some(description));
        }
        if let Some(coach_notes) = command.coach_notes {
            baby.coach_notes = normalize_optional_text(Some(coach_notes));
        }
        if let Some(sleep_records) = command.sleep_records {
            baby.sleep_records = sleep_records;
            baby.sort_sleep_records();
        }

        baby.last_modified = Utc::now();

        self.baby_repository.update_baby(&baby)?;

        info!("Updated baby {} with ID: {}", baby.name, baby.id);

        Ok(UpdateBabyResult { baby })
    }

    /// Archive a baby: excluded from the active roster and from parent
    /// lookup, but fully retrievable by ID and reversible without data
    /// loss. Archiving an already-archived baby is a no-op success.
    pub fn archive_baby(&self, command: ArchiveBabyCommand) -> Result<ArchiveBabyResult> {
        info!("Archiving baby: {}", command.baby_id);

        let mut baby = self
            .baby_repository
            .get_baby(&command.baby_id)?
            .ok_or_else(|| anyhow::anyhow!("Baby not found: {}", command.baby_id))?;

        if baby.is_archived {
            debug!("Baby {} is already archived", baby.id);
            return Ok(ArchiveBabyResult {
                baby,
                already_archived: true,
            });
        }

        let now = Utc::now();
        baby.is_archived = true;
        baby.date_archived = Some(now);
        baby.last_modified = now;

        self.baby_repository.update_baby(&baby)?;

        info!("Archived baby {} ({})", baby.name, baby.id);

        Ok(ArchiveBabyResult {
            baby,
            already_archived: false,
        })
    }

    /// Unarchive a baby, restoring it to the active roster. Unarchiving an
    /// already-active baby is a no-op success.
    pub fn unarchive_baby(&self, command: ArchiveBabyCommand) -> Result<UnarchiveBabyResult> {
        info!("Unarchiving baby: {}", command.baby_id);

        let mut baby = self
            .baby_repository
            .get_baby(&command.baby_id)?
            .ok_or_else(|| anyhow::anyhow!("Baby not found: {}", command.baby_id))?;

        if !baby.is_archived {
            debug!("Baby {} is already active", baby.id);
            return Ok(UnarchiveBabyResult {
                baby,
                already_active: true,
            });
        }

        baby.is_archived = false;
        baby.date_archived = None;
        baby.last_modified = Utc::now();

        self.baby_repository.update_baby(&baby)?;

        info!("Unarchived baby {} ({})", baby.name, baby.id);

        Ok(UnarchiveBabyResult {
            baby,
            already_active: false,
        })
    }

    /// Permanently remove a baby from the store. Irreversible; no
    /// transition leaves the deleted state.
    pub fn delete_baby_permanently(&self, command: DeleteBabyCommand) -> Result<DeleteBabyResult> {
        info!("Permanently deleting baby: {}", command.baby_id);

        let deleted = self.baby_repository.delete_baby(&command.baby_id)?;

        if !deleted {
            warn!("Baby not found for deletion: {}", command.baby_id);
        }

        Ok(DeleteBabyResult { deleted })
    }
}

/// Trim a user-supplied optional text field, treating an empty result as
/// "cleared".
fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    use crate::domain::models::baby::{SleepCycle, SleepRecord};

    fn setup_service() -> BabyService {
        BabyService::new(Arc::new(MemoryConnection::new()))
    }

    fn noa_command() -> CreateBabyCommand {
        CreateBabyCommand {
            name: "Noa".to_string(),
            family_name: "Levi".to_string(),
            age_months: 8,
            mother_name: "Rivka".to_string(),
            father_name: "Yaakov".to_string(),
            siblings_count: 1,
            siblings_names: Some("Daniel (3)".to_string()),
            description: Some("Wakes up several times a night.".to_string()),
            parent_username: "levi-family".to_string(),
        }
    }

    fn record(id: &str, y: i32, m: u32, d: u32) -> SleepRecord {
        SleepRecord {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            stage: "הסתגלות".to_string(),
            sleep_cycles: vec![SleepCycle {
                id: SleepCycle::generate_id(),
                bedtime: "19:30".to_string(),
                time_to_sleep: "10 דקות".to_string(),
                who_put_to_sleep: "אבא".to_string(),
                how_fell_asleep: "ליטוף".to_string(),
                wake_time: Some("06:15".to_string()),
            }],
        }
    }

    #[test]
    fn test_create_baby_assigns_bookkeeping_fields() {
        let service = setup_service();
        let result = service.create_baby(noa_command()).unwrap();

        let baby = result.baby;
        assert!(baby.id.starts_with("baby::"));
        assert!(baby.sleep_records.is_empty());
        assert!(baby.coach_notes.is_none());
        assert!(!baby.is_archived);
        assert!(baby.date_archived.is_none());
        assert_eq!(baby.parent_username, "levi-family");
    }

    #[test]
    fn test_create_trims_names() {
        let service = setup_service();
        let mut command = noa_command();
        command.name = "  Noa ".to_string();
        command.family_name = " Levi  ".to_string();

        let baby = service.create_baby(command).unwrap().baby;
        assert_eq!(baby.name, "Noa");
        assert_eq!(baby.family_name, "Levi");
    }

    #[test]
    fn test_created_ids_are_unique() {
        let service = setup_service();
        let mut seen = HashSet::new();

        for i in 0..50 {
            let mut command = noa_command();
            command.parent_username = format!("family-{}", i);
            let baby = service.create_baby(command).unwrap().baby;
            assert!(seen.insert(baby.id), "duplicate ID generated");
        }

        // Deleting does not free an ID for reuse
        let victim = service.list_active_babies().unwrap().babies[0].id.clone();
        service
            .delete_baby_permanently(DeleteBabyCommand {
                baby_id: victim.clone(),
            })
            .unwrap();
        let fresh = service.create_baby(noa_command()).unwrap().baby;
        assert!(seen.insert(fresh.id.clone()));
        assert_ne!(fresh.id, victim);
    }

    #[test]
    fn test_noa_levi_lifecycle_scenario() {
        let service = setup_service();
        let created = service.create_baby(noa_command()).unwrap().baby;

        // Parent lookup finds the freshly created baby with no records
        let found = service
            .get_baby_by_parent_username(GetBabyByParentCommand {
                parent_username: "levi-family".to_string(),
            })
            .unwrap()
            .baby
            .unwrap();
        assert_eq!(found.id, created.id);
        assert!(found.sleep_records.is_empty());

        // Archive: parent lookup stops finding it, lookup by ID still works
        service
            .archive_baby(ArchiveBabyCommand {
                baby_id: created.id.clone(),
            })
            .unwrap();
        assert!(service
            .get_baby_by_parent_username(GetBabyByParentCommand {
                parent_username: "levi-family".to_string(),
            })
            .unwrap()
            .baby
            .is_none());
        let archived = service
            .get_baby(GetBabyCommand {
                baby_id: created.id.clone(),
            })
            .unwrap()
            .baby
            .unwrap();
        assert!(archived.is_archived);
        assert!(archived.date_archived.is_some());

        // Unarchive: back on the roster, archival timestamp cleared
        service
            .unarchive_baby(ArchiveBabyCommand {
                baby_id: created.id.clone(),
            })
            .unwrap();
        let restored = service
            .get_baby_by_parent_username(GetBabyByParentCommand {
                parent_username: "levi-family".to_string(),
            })
            .unwrap()
            .baby
            .unwrap();
        assert!(!restored.is_archived);
        assert!(restored.date_archived.is_none());
    }

    #[test]
    fn test_archive_unarchive_restores_every_field_except_last_modified() {
        let service = setup_service();
        let mut original = service.create_baby(noa_command()).unwrap().baby;

        // Give it some data so the round trip has something to lose
        service
            .update_baby(UpdateBabyCommand {
                baby_id: original.id.clone(),
                coach_notes: Some("לבדוק טמפרטורת חדר".to_string()),
                sleep_records: Some(vec![record("sr-1", 2024, 7, 20)]),
                ..Default::default()
            })
            .unwrap();
        original = service
            .get_baby(GetBabyCommand {
                baby_id: original.id.clone(),
            })
            .unwrap()
            .baby
            .unwrap();

        service
            .archive_baby(ArchiveBabyCommand {
                baby_id: original.id.clone(),
            })
            .unwrap();
        let restored = service
            .unarchive_baby(ArchiveBabyCommand {
                baby_id: original.id.clone(),
            })
            .unwrap()
            .baby;

        assert!(restored.last_modified > original.last_modified);

        let mut comparable = restored.clone();
        comparable.last_modified = original.last_modified;
        assert_eq!(comparable, original);
    }

    #[test]
    fn test_repeated_transitions_are_noop_successes() {
        let service = setup_service();
        let baby = service.create_baby(noa_command()).unwrap().baby;
        let command = ArchiveBabyCommand {
            baby_id: baby.id.clone(),
        };

        let first = service.archive_baby(command.clone()).unwrap();
        assert!(!first.already_archived);
        let modified_after_archive = first.baby.last_modified;

        let second = service.archive_baby(command.clone()).unwrap();
        assert!(second.already_archived);
        assert_eq!(second.baby.last_modified, modified_after_archive);
        assert_eq!(second.baby.date_archived, first.baby.date_archived);

        service.unarchive_baby(command.clone()).unwrap();
        let repeat = service.unarchive_baby(command).unwrap();
        assert!(repeat.already_active);
    }

    #[test]
    fn test_archive_missing_baby_fails() {
        let service = setup_service();
        assert!(service
            .archive_baby(ArchiveBabyCommand {
                baby_id: "baby::missing".to_string(),
            })
            .is_err());
    }

    #[test]
    fn test_update_merges_partially() {
        let service = setup_service();
        let created = service.create_baby(noa_command()).unwrap().baby;

        let updated = service
            .update_baby(UpdateBabyCommand {
                baby_id: created.id.clone(),
                age_months: Some(9),
                coach_notes: Some("טקס שינה קבוע".to_string()),
                ..Default::default()
            })
            .unwrap()
            .baby;

        assert_eq!(updated.age_months, 9);
        assert_eq!(updated.coach_notes.as_deref(), Some("טקס שינה קבוע"));
        // Everything omitted from the partial is preserved
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.family_name, created.family_name);
        assert_eq!(updated.mother_name, created.mother_name);
        assert_eq!(updated.father_name, created.father_name);
        assert_eq!(updated.siblings_count, created.siblings_count);
        assert_eq!(updated.siblings_names, created.siblings_names);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.parent_username, created.parent_username);
        assert!(updated.last_modified > created.last_modified);

        // And the merge is visible on a fresh read
        let reread = service
            .get_baby(GetBabyCommand {
                baby_id: created.id,
            })
            .unwrap()
            .baby
            .unwrap();
        assert_eq!(reread.age_months, 9);
    }

    #[test]
    fn test_update_clears_optional_text_on_empty_value() {
        let service = setup_service();
        let created = service.create_baby(noa_command()).unwrap().baby;
        assert!(created.description.is_some());

        let updated = service
            .update_baby(UpdateBabyCommand {
                baby_id: created.id,
                description: Some("   ".to_string()),
                ..Default::default()
            })
            .unwrap()
            .baby;
        assert!(updated.description.is_none());
    }

    #[test]
    fn test_update_resorts_supplied_records() {
        let service = setup_service();
        let created = service.create_baby(noa_command()).unwrap().baby;

        let updated = service
            .update_baby(UpdateBabyCommand {
                baby_id: created.id,
                sleep_records: Some(vec![
                    record("older", 2024, 7, 19),
                    record("newer", 2024, 7, 20),
                ]),
                ..Default::default()
            })
            .unwrap()
            .baby;

        assert_eq!(updated.sleep_records[0].id, "newer");
        assert_eq!(updated.sleep_records[1].id, "older");
    }

    #[test]
    fn test_update_missing_baby_fails() {
        let service = setup_service();
        let result = service.update_baby(UpdateBabyCommand {
            baby_id: "baby::missing".to_string(),
            name: Some("Someone".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_active_and_archived_partition_the_store() {
        let service = setup_service();
        let mut ids = Vec::new();
        for i in 0..4 {
            let mut command = noa_command();
            command.parent_username = format!("family-{}", i);
            ids.push(service.create_baby(command).unwrap().baby.id);
        }

        service
            .archive_baby(ArchiveBabyCommand {
                baby_id: ids[1].clone(),
            })
            .unwrap();
        service
            .archive_baby(ArchiveBabyCommand {
                baby_id: ids[3].clone(),
            })
            .unwrap();
        service
            .unarchive_baby(ArchiveBabyCommand {
                baby_id: ids[1].clone(),
            })
            .unwrap();

        let active: HashSet<String> = service
            .list_active_babies()
            .unwrap()
            .babies
            .into_iter()
            .map(|b| b.id)
            .collect();
        let archived: HashSet<String> = service
            .list_archived_babies()
            .unwrap()
            .babies
            .into_iter()
            .map(|b| b.id)
            .collect();

        assert!(active.is_disjoint(&archived));
        let union: HashSet<String> = active.union(&archived).cloned().collect();
        let expected: HashSet<String> = ids.iter().cloned().collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_delete_permanently() {
        let service = setup_service();
        let baby = service.create_baby(noa_command()).unwrap().baby;

        let result = service
            .delete_baby_permanently(DeleteBabyCommand {
                baby_id: baby.id.clone(),
            })
            .unwrap();
        assert!(result.deleted);
        assert!(service
            .get_baby(GetBabyCommand { baby_id: baby.id })
            .unwrap()
            .baby
            .is_none());
    }

    #[test]
    fn test_delete_missing_baby_leaves_store_unchanged() {
        let service = setup_service();
        let baby = service.create_baby(noa_command()).unwrap().baby;
        let before = service.list_active_babies().unwrap().babies;

        let result = service
            .delete_baby_permanently(DeleteBabyCommand {
                baby_id: "baby::missing".to_string(),
            })
            .unwrap();
        assert!(!result.deleted);

        let after = service.list_active_babies().unwrap().babies;
        assert_eq!(before.len(), after.len());
        assert!(after.iter().any(|b| b.id == baby.id));
    }

    #[test]
    fn test_search_active_babies() {
        let service = BabyService::new(Arc::new(MemoryConnection::seeded()));

        let by_family = service
            .search_active_babies(SearchBabiesCommand {
                term: "לוי".to_string(),
            })
            .unwrap()
            .babies;
        assert_eq!(by_family.len(), 1);
        assert_eq!(by_family[0].name, "נועה");

        let by_mother = service
            .search_active_babies(SearchBabiesCommand {
                term: "שרה".to_string(),
            })
            .unwrap()
            .babies;
        assert_eq!(by_mother.len(), 1);
        assert_eq!(by_mother[0].name, "אורי");

        let all = service
            .search_active_babies(SearchBabiesCommand {
                term: "  ".to_string(),
            })
            .unwrap()
            .babies;
        assert_eq!(all.len(), 3);
    }
}
