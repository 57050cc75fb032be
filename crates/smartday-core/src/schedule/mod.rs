//! Plan request/response types and schedule blocks.
//!
//! [`PlanRequest`] is the wire form a caller submits; validating it yields a
//! [`PlanInput`] for the scheduler. The scheduler answers with a
//! [`PlanResponse`] holding [`Block`]s in placement order.

mod request;

pub use request::{PlanInput, PlanRequest, TaskInput};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::format_hours;

/// Label of the recovery break block.
pub const BREAK_LABEL: &str = "Break";
/// Note attached to break blocks.
pub const BREAK_NOTE: &str = "recharge";
/// Label of the closing block.
pub const WRAP_UP_LABEL: &str = "Wrap-up & Tomorrow Prep";
/// Note attached to the closing block.
pub const WRAP_UP_NOTE: &str = "review & carry-over";

/// Type of schedule block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A placed task
    #[default]
    Task,
    /// Recovery break
    Break,
    /// Closing review block
    WrapUp,
}

/// A scheduled block on the day's timeline.
///
/// `start`/`end` are `HH:MM`. The kind is kept in memory only; on the wire a
/// block is `{start, end, task, notes}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub start: String,
    pub end: String,
    pub task: String,
    pub notes: Option<String>,
    #[serde(skip)]
    pub kind: BlockKind,
}

impl Block {
    pub fn is_task(&self) -> bool {
        self.kind == BlockKind::Task
    }
}

/// The planner's answer for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanResponse {
    /// ISO calendar date the plan was made for.
    pub date: NaiveDate,
    /// Echo of the requested available hours.
    pub total_hours: f64,
    pub blocks: Vec<Block>,
    /// One `[ ] Title (Nh)` entry per placed task.
    pub checklist: Vec<String>,
}

impl PlanResponse {
    /// Blocks that hold placed tasks (no breaks, no wrap-up).
    pub fn task_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_task())
    }

    /// Plain-text rendering: one line per block, then the checklist.
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "Plan for {} ({}h available)\n\n",
            self.date,
            format_hours(self.total_hours)
        );
        for block in &self.blocks {
            match &block.notes {
                Some(notes) => out.push_str(&format!(
                    "{}-{}  {}  ({})\n",
                    block.start, block.end, block.task, notes
                )),
                None => out.push_str(&format!("{}-{}  {}\n", block.start, block.end, block.task)),
            }
        }
        if !self.checklist.is_empty() {
            out.push_str("\nChecklist:\n");
            for item in &self.checklist {
                out.push_str(item);
                out.push('\n');
            }
        }
        out
    }
}
