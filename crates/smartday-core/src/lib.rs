//! # SmartDay Core Library
//!
//! This library provides the planning logic behind SmartDay: it turns a list
//! of tasks (duration, priority, time-of-day constraint) into a single-day
//! schedule of blocks with recovery breaks and a closing wrap-up block.
//! The CLI binary and its HTTP server are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Validation**: [`PlanRequest`] is checked field by field and turned into
//!   a [`PlanInput`]; nothing unvalidated reaches the scheduler
//! - **Constraints**: free-text time-of-day predicates parsed once into
//!   [`ConstraintKind`]
//! - **Scheduler**: [`DayScheduler`] orders tasks and probes for start times;
//!   it is pure, with the calendar date passed in by the caller
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`DayScheduler`]: Planning pass
//! - [`PlanRequest`] / [`PlanResponse`]: Wire types
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod constraint;
pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod task;

pub use constraint::{Constraint, ConstraintKind};
pub use error::{ConfigError, CoreError, ValidationError};
pub use schedule::{Block, BlockKind, PlanInput, PlanRequest, PlanResponse, TaskInput};
pub use scheduler::{order_tasks, DayScheduler, SchedulerConfig};
pub use storage::Config;
pub use task::{Priority, Task};

use serde::{Deserialize, Serialize};

/// Liveness probe payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub version: String,
}

/// Static health status: `{"status": "ok", "version": "<crate version>"}`.
pub fn health() -> Health {
    Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
