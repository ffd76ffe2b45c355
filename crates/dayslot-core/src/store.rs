//! In-memory state for one planning session.
//!
//! The store owns the task list, the obligations and the last generated
//! schedule. Derivation and placement stay pure; the store only feeds them
//! its current contents and keeps what they return.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::clock::ClockTime;
use crate::error::ValidationError;
use crate::plan::PlanFile;
use crate::schedule::{Obligation, ObligationKind, ScheduledSlot, SchedulingPolicy, Weekday};
use crate::scheduler::{PlacementEngine, PlacementOutcome};
use crate::task::Task;
use crate::timeline::{AvailabilityDeriver, FreeInterval};

#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    policy: SchedulingPolicy,
    tasks: Vec<Task>,
    obligations: Vec<Obligation>,
    schedule: Option<PlacementOutcome>,
}

impl ScheduleStore {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a store from a plan file, validating every entry.
    pub fn from_plan(policy: SchedulingPolicy, plan: PlanFile) -> Result<Self, ValidationError> {
        let mut store = Self::new(policy);
        for obligation in plan.obligations {
            obligation.validate()?;
            store.obligations.push(obligation);
        }
        for task in plan.tasks {
            store.add_task(task)?;
        }
        Ok(store)
    }

    /// Current tasks and obligations as a plan file.
    pub fn to_plan(&self) -> PlanFile {
        PlanFile {
            obligations: self.obligations.clone(),
            tasks: self.tasks.clone(),
        }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn obligations(&self) -> &[Obligation] {
        &self.obligations
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Append a task. Ids must be unique across the store.
    pub fn add_task(&mut self, task: Task) -> Result<(), ValidationError> {
        task.validate()?;
        if self.task(&task.id).is_some() {
            return Err(ValidationError::InvalidValue {
                field: "task.id".to_string(),
                message: format!("duplicate task id '{}'", task.id),
            });
        }
        debug!(task = %task.id, subtasks = task.subtasks.len(), "added task");
        self.tasks.push(task);
        Ok(())
    }

    /// Remove a task together with its subtasks and any slots placed for it.
    pub fn remove_task(&mut self, task_id: &str) -> Result<Task, ValidationError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| ValidationError::UnknownTask(task_id.to_string()))?;
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.placed.retain(|s| s.task_id != task_id);
            schedule.unplaced.retain(|s| s.task_id != task_id);
        }
        Ok(self.tasks.remove(index))
    }

    /// Add an obligation with a generated id and return that id.
    pub fn add_obligation(
        &mut self,
        title: impl Into<String>,
        start_time: ClockTime,
        end_time: ClockTime,
        category: ObligationKind,
        day: Option<Weekday>,
    ) -> Result<String, ValidationError> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut obligation = Obligation::new(id.clone(), title, start_time, end_time, category);
        obligation.day = day;
        obligation.validate()?;
        self.obligations.push(obligation);
        Ok(id)
    }

    pub fn remove_obligation(&mut self, obligation_id: &str) -> Result<Obligation, ValidationError> {
        let index = self
            .obligations
            .iter()
            .position(|o| o.id == obligation_id)
            .ok_or_else(|| ValidationError::UnknownObligation(obligation_id.to_string()))?;
        Ok(self.obligations.remove(index))
    }

    /// Record progress on one subtask.
    ///
    /// Completing stamps `completed_at` and, once every subtask is done, the
    /// task's `last_completed`. Reopening clears the subtask's timestamp.
    pub fn update_subtask(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        completed: bool,
        actual_minutes: Option<u32>,
    ) -> Result<(), ValidationError> {
        let now = Utc::now();
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ValidationError::UnknownTask(task_id.to_string()))?;
        let subtask = task
            .subtask_mut(subtask_id)
            .ok_or_else(|| ValidationError::UnknownSubtask {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            })?;

        subtask.set_completed(completed, actual_minutes, now);
        if task.is_complete() {
            task.last_completed = Some(now);
        }
        info!(task = task_id, subtask = subtask_id, completed, "updated subtask");
        Ok(())
    }

    /// Free intervals for `day` given the current obligations.
    pub fn available_intervals(&self, day: Option<Weekday>) -> Result<Vec<FreeInterval>, ValidationError> {
        AvailabilityDeriver::new(self.policy.clone()).derive(&self.obligations, day)
    }

    /// Derive, place, and keep the result, replacing any earlier schedule.
    pub fn generate_schedule(
        &mut self,
        day: Option<Weekday>,
        date: NaiveDate,
    ) -> Result<&PlacementOutcome, ValidationError> {
        let intervals = self.available_intervals(day)?;
        let outcome = PlacementEngine::new(self.policy.clone()).place(&self.tasks, &intervals, date)?;
        debug!(
            placed = outcome.placed.len(),
            unplaced = outcome.unplaced.len(),
            %date,
            "generated schedule"
        );
        Ok(&*self.schedule.insert(outcome))
    }

    pub fn schedule(&self) -> Option<&PlacementOutcome> {
        self.schedule.as_ref()
    }

    /// Slots of the last generated schedule, in assignment order.
    pub fn scheduled_slots(&self) -> &[ScheduledSlot] {
        self.schedule
            .as_ref()
            .map(|s| s.placed.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyLevel;
    use crate::task::{Subtask, TaskComplexity};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn reading() -> Task {
        Task::new("Read")
            .with_id("read")
            .with_energy(EnergyLevel::Low)
            .with_complexity(TaskComplexity::Simple)
            .with_subtasks(vec![
                Subtask::new("Chapter 1", 30, EnergyLevel::Low).with_id("c1"),
                Subtask::new("Chapter 2", 30, EnergyLevel::Low).with_id("c2"),
            ])
    }

    fn store() -> ScheduleStore {
        let mut store = ScheduleStore::default();
        store
            .add_obligation(
                "Work",
                ClockTime::from_hour(9),
                ClockTime::from_hour(17),
                ObligationKind::Work,
                None,
            )
            .unwrap();
        store.add_task(reading()).unwrap();
        store
    }

    #[test]
    fn add_obligation_assigns_ids() {
        let mut store = store();
        let id = store
            .add_obligation(
                "Dentist",
                ClockTime::from_hour(18),
                ClockTime::from_hour(19),
                ObligationKind::Appointment,
                Some(Weekday::Friday),
            )
            .unwrap();
        assert_eq!(store.obligations().len(), 2);
        assert_ne!(store.obligations()[0].id, id);

        let removed = store.remove_obligation(&id).unwrap();
        assert_eq!(removed.title, "Dentist");
        assert_eq!(
            store.remove_obligation(&id),
            Err(ValidationError::UnknownObligation(id))
        );
    }

    #[test]
    fn add_obligation_rejects_inverted_range() {
        let mut store = ScheduleStore::default();
        let err = store
            .add_obligation(
                "Backwards",
                ClockTime::from_hour(12),
                ClockTime::from_hour(11),
                ObligationKind::Personal,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));
        assert!(store.obligations().is_empty());
    }

    #[test]
    fn duplicate_task_ids_are_rejected() {
        let mut store = store();
        assert!(store.add_task(reading()).is_err());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn update_subtask_records_progress() {
        let mut store = store();
        store.update_subtask("read", "c1", true, Some(25)).unwrap();

        let sub = store.task("read").unwrap().subtask("c1").unwrap();
        assert!(sub.completed);
        assert_eq!(sub.actual_minutes, Some(25));
        assert!(sub.completed_at.is_some());
        assert!(store.task("read").unwrap().last_completed.is_none());

        store.update_subtask("read", "c2", true, None).unwrap();
        assert!(store.task("read").unwrap().last_completed.is_some());

        store.update_subtask("read", "c1", false, None).unwrap();
        let sub = store.task("read").unwrap().subtask("c1").unwrap();
        assert!(!sub.completed);
        assert!(sub.completed_at.is_none());
    }

    #[test]
    fn update_subtask_reports_unknown_ids() {
        let mut store = store();
        assert_eq!(
            store.update_subtask("nope", "c1", true, None),
            Err(ValidationError::UnknownTask("nope".to_string()))
        );
        assert!(matches!(
            store.update_subtask("read", "c9", true, None),
            Err(ValidationError::UnknownSubtask { .. })
        ));
    }

    #[test]
    fn generate_schedule_replaces_previous_result() {
        let mut store = store();
        assert!(store.scheduled_slots().is_empty());

        store.generate_schedule(None, date()).unwrap();
        assert_eq!(store.scheduled_slots().len(), 2);

        store.update_subtask("read", "c1", true, None).unwrap();
        store.generate_schedule(None, date()).unwrap();
        assert_eq!(store.scheduled_slots().len(), 1);
        assert_eq!(store.scheduled_slots()[0].subtask_id, "c2");
    }

    #[test]
    fn remove_task_drops_its_slots() {
        let mut store = store();
        store.generate_schedule(None, date()).unwrap();
        let removed = store.remove_task("read").unwrap();
        assert_eq!(removed.id, "read");
        assert!(store.scheduled_slots().is_empty());
        assert!(matches!(store.remove_task("read"), Err(ValidationError::UnknownTask(_))));
    }

    #[test]
    fn available_intervals_follow_obligations() {
        let store = store();
        let intervals = store.available_intervals(None).unwrap();
        let spans: Vec<_> = intervals
            .iter()
            .map(|i| (i.start.to_string(), i.end.to_string()))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("06:00".to_string(), "08:30".to_string()),
                ("17:30".to_string(), "23:00".to_string()),
            ]
        );
    }

    #[test]
    fn from_plan_rejects_estimates_longer_than_a_day() {
        let plan = PlanFile::parse(
            r#"
            [[tasks]]
            id = "huge"
            title = "Huge"
            energy_level = "high"
            location = "any"
            complexity = "complex"

            [[tasks.subtasks]]
            id = "s"
            title = "Forever"
            estimated_minutes = 4294967295
            energy_level = "high"
            "#,
            crate::plan::PlanFormat::Toml,
        )
        .unwrap();
        let err = ScheduleStore::from_plan(SchedulingPolicy::default(), plan).unwrap_err();
        assert!(err.to_string().contains("estimated_minutes"));
    }

    #[test]
    fn plan_round_trip_keeps_contents() {
        let store = store();
        let plan = store.to_plan();
        let again = ScheduleStore::from_plan(SchedulingPolicy::default(), plan.clone()).unwrap();
        assert_eq!(again.to_plan(), plan);
    }
}
