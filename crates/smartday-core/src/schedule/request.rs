use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::parse_clock_field;
use crate::constraint::Constraint;
use crate::error::ValidationError;
use crate::task::{Priority, Task};

/// A task as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskInput {
    pub name: String,
    /// Duration in hours.
    pub duration: f64,
    /// `low`, `medium` or `high`; absent means `medium`.
    #[serde(default)]
    pub priority: Option<String>,
    /// `morning`, `afternoon`, `evening`, `after:HH:MM`, `before:HH:MM`.
    #[serde(default)]
    pub constraint: Option<String>,
}

impl TaskInput {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            priority: None,
            constraint: None,
        }
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    /// Validate into a [`Task`]. Field names in errors are relative
    /// (`duration`, `priority`, ...).
    pub fn validate(&self) -> Result<Task, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        positive("duration", self.duration)?;

        let priority = match self.priority.as_deref() {
            None => Priority::default(),
            Some(text) => text
                .parse::<Priority>()
                .map_err(|_| ValidationError::UnknownPriority {
                    field: "priority".into(),
                    value: text.to_string(),
                })?,
        };

        let constraint = match self.constraint.as_deref() {
            None | Some("") => None,
            Some(text) => Some(Constraint::parse(text)?),
        };

        Ok(Task {
            name: self.name.clone(),
            duration: self.duration,
            priority,
            constraint,
        })
    }
}

/// A planning request as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    pub available_hours: f64,
    /// `HH:MM`; absent or empty means the configured default start.
    #[serde(default)]
    pub start_time: Option<String>,
    pub tasks: Vec<TaskInput>,
}

impl PlanRequest {
    pub fn new(available_hours: f64) -> Self {
        Self {
            available_hours,
            start_time: None,
            tasks: Vec::new(),
        }
    }

    pub fn start_time(mut self, start: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self
    }

    pub fn task(mut self, task: TaskInput) -> Self {
        self.tasks.push(task);
        self
    }

    /// Validate the whole request, failing on the first offending field.
    pub fn validate(&self, default_start: NaiveTime) -> Result<PlanInput, ValidationError> {
        positive("available_hours", self.available_hours)?;

        let start_time =
            parse_clock_field("start_time", self.start_time.as_deref(), default_start)?;

        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                task.validate()
                    .map_err(|e| e.nested_under(&format!("tasks[{i}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanInput {
            start_time,
            available_hours: self.available_hours,
            tasks,
        })
    }
}

/// A validated request: the only input the scheduler accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    pub start_time: NaiveTime,
    pub available_hours: f64,
    pub tasks: Vec<Task>,
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            message: "must be a finite number".into(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.into(),
            message: format!("must be greater than 0 (got {value})"),
        });
    }
    Ok(())
}
