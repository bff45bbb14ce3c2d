//! Domain models for the yard database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 8-character hex ID type used for all entities.
pub type Id = String;

/// A car known to the yard, keyed by its unique registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: Id,
    pub reg: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub paint_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Dismantling progress of a breaking vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakingStatus {
    #[default]
    Queued,
    Stripping,
    Done,
}

impl fmt::Display for BreakingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BreakingStatus::Queued => "queued",
            BreakingStatus::Stripping => "stripping",
            BreakingStatus::Done => "done",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BreakingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(BreakingStatus::Queued),
            "stripping" => Ok(BreakingStatus::Stripping),
            "done" => Ok(BreakingStatus::Done),
            other => Err(format!("unknown breaking status: {}", other)),
        }
    }
}

/// A car that is being broken for parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingVehicle {
    pub id: Id,
    pub car_id: Id,
    pub status: BreakingStatus,
    pub notes: Option<String>,
    pub created_at: String,
}

/// A breaking vehicle joined with its car. The car is always present;
/// the listing query uses an inner join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingVehicleWithCar {
    pub vehicle: BreakingVehicle,
    pub car: Car,
}

/// Workflow state of a yard task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status: {}", other)),
        }
    }
}

/// A yard task, listed in bulk on the tasks page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub name: String,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// A task description looked up by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

/// A user profile, scoped one-to-one with an external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Id,
    pub clerk_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
}

/// A weighbridge log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Id,
    pub kilograms: f64,
    pub recorded_at: String,
    pub created_at: String,
}
