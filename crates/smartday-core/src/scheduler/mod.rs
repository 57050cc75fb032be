//! Single-day planner.
//!
//! [`DayScheduler::plan`] makes one deterministic pass over the validated
//! task list:
//! - Orders tasks: constrained first, then by priority, then longest first
//! - Probes start times from the cursor in fixed steps until the task's
//!   constraint accepts one and the task still ends inside the window
//! - Inserts a recovery break once enough work has accumulated
//! - Closes the day with a wrap-up block when time remains
//!
//! Tasks that find no acceptable start are left out of the plan.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{format_clock, hours};
use crate::constraint::fits_constraint;
use crate::error::ValidationError;
use crate::schedule::{
    Block, BlockKind, PlanInput, PlanRequest, PlanResponse, BREAK_LABEL, BREAK_NOTE,
    WRAP_UP_LABEL, WRAP_UP_NOTE,
};
use crate::task::Task;

/// Scheduler configuration. All values are minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Distance between successive candidate start times
    pub probe_step_minutes: i64,
    /// Worked minutes that earn a break
    pub break_after_minutes: i64,
    /// Break length
    pub break_minutes: i64,
    /// Minimum time left for a wrap-up block to be added
    pub wrap_up_min_minutes: i64,
    /// Longest wrap-up block
    pub wrap_up_max_minutes: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            probe_step_minutes: 30,
            break_after_minutes: 150,
            break_minutes: 15,
            wrap_up_min_minutes: 10,
            wrap_up_max_minutes: 30,
        }
    }
}

/// Mutable planning state for one pass.
#[derive(Debug)]
struct DayState {
    /// Next free instant; only moves forward.
    cursor: NaiveDateTime,
    end_limit: NaiveDateTime,
    minutes_since_break: i64,
}

/// Day planner.
pub struct DayScheduler {
    config: SchedulerConfig,
}

impl DayScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Plan a day.
    ///
    /// # Arguments
    /// * `input` - Validated request (window start, available hours, tasks)
    /// * `date` - Calendar date the window is anchored on and the response is stamped with
    ///
    /// # Returns
    /// Blocks in placement order and one checklist entry per placed task
    pub fn plan(&self, input: &PlanInput, date: NaiveDate) -> PlanResponse {
        let window_start = date.and_time(input.start_time);
        let end_limit = window_start
            .checked_add_signed(hours(input.available_hours))
            .unwrap_or(NaiveDateTime::MAX);

        let mut state = DayState {
            cursor: window_start,
            end_limit,
            minutes_since_break: 0,
        };
        let mut blocks = Vec::new();
        let mut checklist = Vec::new();

        for task in order_tasks(&input.tasks) {
            match self.place_task(&mut state, task) {
                Some(block) => {
                    blocks.push(block);
                    checklist.push(task.checklist_entry());
                    if let Some(rest) = self.take_break(&mut state) {
                        blocks.push(rest);
                    }
                }
                None => debug!(
                    task = %task.name,
                    constraint = task.constraint.as_ref().map(|c| c.as_str()),
                    cursor = %format_clock(state.cursor),
                    "no feasible start before window end; task dropped"
                ),
            }
        }

        if let Some(wrap_up) = self.wrap_up(&state) {
            blocks.push(wrap_up);
        }

        info!(
            %date,
            requested = input.tasks.len(),
            placed = checklist.len(),
            blocks = blocks.len(),
            "day planned"
        );

        PlanResponse {
            date,
            total_hours: input.available_hours,
            blocks,
            checklist,
        }
    }

    /// Validate a submitted request and plan it.
    ///
    /// `default_start` applies when the request has no `start_time`.
    pub fn plan_request(
        &self,
        request: &PlanRequest,
        default_start: NaiveTime,
        date: NaiveDate,
    ) -> Result<PlanResponse, ValidationError> {
        let input = request.validate(default_start)?;
        Ok(self.plan(&input, date))
    }

    /// Probe from the cursor for the first accepted start.
    ///
    /// The cursor follows the probe even when nothing is placed, so later
    /// tasks start probing where this one stopped.
    fn place_task(&self, state: &mut DayState, task: &Task) -> Option<Block> {
        let span = hours(task.duration);
        let step = self.probe_step();
        let mut probe = state.cursor;

        while let Some(end) = probe
            .checked_add_signed(span)
            .filter(|end| *end <= state.end_limit)
        {
            if fits_constraint(probe.time(), task.constraint.as_ref()) {
                state.cursor = end;
                state.minutes_since_break += task.worked_minutes();
                return Some(Block {
                    start: format_clock(probe),
                    end: format_clock(end),
                    task: task.title(),
                    notes: task
                        .constraint
                        .as_ref()
                        .map(|c| format!("constraint={}", c.as_str())),
                    kind: BlockKind::Task,
                });
            }

            probe = match probe.checked_add_signed(step) {
                Some(next) => next,
                None => break,
            };
            if probe > state.cursor {
                state.cursor = probe;
            }
        }

        None
    }

    /// Break at the cursor once enough work has accumulated and it still fits.
    fn take_break(&self, state: &mut DayState) -> Option<Block> {
        if state.minutes_since_break < self.config.break_after_minutes {
            return None;
        }
        let end = state
            .cursor
            .checked_add_signed(Duration::try_minutes(self.config.break_minutes)?)?;
        if end > state.end_limit {
            return None;
        }

        debug!(
            at = %format_clock(state.cursor),
            worked = state.minutes_since_break,
            "inserting break"
        );
        let block = Block {
            start: format_clock(state.cursor),
            end: format_clock(end),
            task: BREAK_LABEL.to_string(),
            notes: Some(BREAK_NOTE.to_string()),
            kind: BlockKind::Break,
        };
        state.cursor = end;
        state.minutes_since_break = 0;
        Some(block)
    }

    fn wrap_up(&self, state: &DayState) -> Option<Block> {
        let earliest_end = state
            .cursor
            .checked_add_signed(Duration::try_minutes(self.config.wrap_up_min_minutes)?)?;
        if earliest_end > state.end_limit {
            return None;
        }
        let end = state
            .cursor
            .checked_add_signed(
                Duration::try_minutes(self.config.wrap_up_max_minutes).unwrap_or(Duration::MAX),
            )
            .map_or(state.end_limit, |end| end.min(state.end_limit));

        Some(Block {
            start: format_clock(state.cursor),
            end: format_clock(end),
            task: WRAP_UP_LABEL.to_string(),
            notes: Some(WRAP_UP_NOTE.to_string()),
            kind: BlockKind::WrapUp,
        })
    }

    /// Out-of-range steps saturate, which ends probing after one candidate.
    fn probe_step(&self) -> Duration {
        Duration::try_minutes(self.config.probe_step_minutes.max(1)).unwrap_or(Duration::MAX)
    }
}

impl Default for DayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement order: constrained tasks first, then high > medium > low
/// priority, then longest duration first. Equal keys keep input order.
pub fn order_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    // `sort_by` is stable
    ordered.sort_by(|a, b| {
        b.is_constrained()
            .cmp(&a.is_constrained())
            .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
            .then_with(|| b.duration.total_cmp(&a.duration))
    });
    ordered
}
