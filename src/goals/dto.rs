use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::goals::repo::{Goal, GoalPatch};

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub text: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

/// Partial update. Absent fields stay untouched; `dueDate` additionally
/// distinguishes an explicit null (clear the date) from absence, via the
/// double-`Option` deserializer.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoalRequest {
    pub text: Option<String>,
    pub completed: Option<bool>,
    #[serde(rename = "dueDate", default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

impl From<UpdateGoalRequest> for GoalPatch {
    fn from(req: UpdateGoalRequest) -> Self {
        GoalPatch {
            text: req.text,
            completed: req.completed,
            due_date: req.due_date,
            category: req.category,
            priority: req.priority,
        }
    }
}

/// Outbound goal shape. The owner id never leaves the store boundary.
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub category: String,
    pub priority: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Goal> for GoalResponse {
    fn from(g: Goal) -> Self {
        Self {
            id: g.id,
            text: g.text,
            completed: g.completed,
            due_date: g.due_date,
            category: g.category,
            priority: g.priority,
            created_at: g.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub completed: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
