use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::sleep::{
    AddSleepRecordCommand, AddSleepRecordResult, DeleteSleepRecordCommand,
    DeleteSleepRecordResult, SleepCycleInput, UpdateSleepRecordCommand, UpdateSleepRecordResult,
};
use crate::domain::models::baby::{SleepCycle, SleepRecord};
use crate::storage::memory::{BabyRepository, MemoryConnection};
use crate::storage::traits::BabyStorage;

/// Service for the sleep-record lifecycle within a baby profile.
///
/// Records are owned by their baby: they are created from parent form
/// submissions, replaced wholesale on edit, and deleted individually. The
/// owning baby's record list stays sorted by date descending and its
/// `last_modified` advances on every mutation.
#[derive(Clone)]
pub struct SleepRecordService {
    baby_repository: BabyRepository,
}

impl SleepRecordService {
    /// Create a new SleepRecordService
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        let baby_repository = BabyRepository::new(connection);
        Self { baby_repository }
    }

    /// Log a new sleep record for a baby.
    ///
    /// Assigns fresh record and cycle IDs; the submitted cycle order is the
    /// cycle number.
    pub fn add_sleep_record(&self, command: AddSleepRecordCommand) -> Result<AddSleepRecordResult> {
        info!(
            "Adding sleep record for baby {} on {}",
            command.baby_id, command.date
        );

        if command.cycles.is_empty() {
            return Err(anyhow::anyhow!("A sleep record requires at least one cycle"));
        }

        let mut baby = self
            .baby_repository
            .get_baby(&command.baby_id)?
            .ok_or_else(|| anyhow::anyhow!("Baby not found: {}", command.baby_id))?;

        let record = SleepRecord {
            id: SleepRecord::generate_id(),
            date: command.date,
            stage: command.stage,
            sleep_cycles: command.cycles.into_iter().map(new_cycle).collect(),
        };

        baby.sleep_records.insert(0, record.clone());
        baby.sort_sleep_records();
        baby.last_modified = Utc::now();

        self.baby_repository.update_baby(&baby)?;

        info!("Added sleep record {} to baby {}", record.id, baby.id);

        Ok(AddSleepRecordResult { record })
    }

    /// Replace an existing sleep record wholesale.
    ///
    /// Cycle IDs are preserved positionally from the previous cycle list;
    /// cycles beyond its length get fresh IDs.
    pub fn update_sleep_record(
        &self,
        command: UpdateSleepRecordCommand,
    ) -> Result<UpdateSleepRecordResult> {
        info!(
            "Updating sleep record {} for baby {}",
            command.record_id, command.baby_id
        );

        if command.cycles.is_empty() {
            return Err(anyhow::anyhow!("A sleep record requires at least one cycle"));
        }

        let mut baby = self
            .baby_repository
            .get_baby(&command.baby_id)?
            .ok_or_else(|| anyhow::anyhow!("Baby not found: {}", command.baby_id))?;

        let existing = baby
            .sleep_records
            .iter_mut()
            .find(|r| r.id == command.record_id)
            .ok_or_else(|| {
                warn!(
                    "Sleep record {} not found on baby {}",
                    command.record_id, command.baby_id
                );
                anyhow::anyhow!("Sleep record not found: {}", command.record_id)
            })?;

        let previous_cycle_ids: Vec<String> =
            existing.sleep_cycles.iter().map(|c| c.id.clone()).collect();

        existing.date = command.date;
        existing.stage = command.stage;
        existing.sleep_cycles = command
            .cycles
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let mut cycle = new_cycle(input);
                if let Some(id) = previous_cycle_ids.get(index) {
                    cycle.id = id.clone();
                }
                cycle
            })
            .collect();
        let record = existing.clone();

        baby.sort_sleep_records();
        baby.last_modified = Utc::now();

        self.baby_repository.update_baby(&baby)?;

        Ok(UpdateSleepRecordResult { record })
    }

    /// Delete exactly one sleep record from a baby's list.
    pub fn delete_sleep_record(
        &self,
        command: DeleteSleepRecordCommand,
    ) -> Result<DeleteSleepRecordResult> {
        info!(
            "Deleting sleep record {} from baby {}",
            command.record_id, command.baby_id
        );

        let mut baby = self
            .baby_repository
            .get_baby(&command.baby_id)?
            .ok_or_else(|| anyhow::anyhow!("Baby not found: {}", command.baby_id))?;

        let before = baby.sleep_records.len();
        baby.sleep_records.retain(|r| r.id != command.record_id);
        if baby.sleep_records.len() == before {
            warn!(
                "Sleep record {} not found on baby {}",
                command.record_id, command.baby_id
            );
            return Err(anyhow::anyhow!(
                "Sleep record not found: {}",
                command.record_id
            ));
        }

        baby.last_modified = Utc::now();

        self.baby_repository.update_baby(&baby)?;

        Ok(DeleteSleepRecordResult {
            success_message: format!("Sleep record {} deleted", command.record_id),
        })
    }
}

fn new_cycle(input: SleepCycleInput) -> SleepCycle {
    SleepCycle {
        id: SleepCycle::generate_id(),
        bedtime: input.bedtime,
        time_to_sleep: input.time_to_sleep,
        who_put_to_sleep: input.who_put_to_sleep,
        how_fell_asleep: input.how_fell_asleep,
        wake_time: input.wake_time,
    }
}
