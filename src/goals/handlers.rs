use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    error::ApiError,
    goals::{
        dto::{CreateGoalRequest, GoalResponse, MessageResponse, StatsResponse, UpdateGoalRequest},
        repo::{Goal, GoalPatch},
    },
    state::AppState,
};

const DEFAULT_CATEGORY: &str = "Personal";
const DEFAULT_PRIORITY: &str = "medium";

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/stats", get(goal_stats))
        .route("/goals/:id", put(update_goal).delete(delete_goal))
}

/// Path ids are parsed by hand so a malformed id comes back as a 400
/// with the taxonomy's JSON body instead of the router's plain-text
/// rejection.
fn parse_goal_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

// Same idea for request bodies: the JSON layer's rejection becomes a
// taxonomy validation error with the uniform body shape.
fn reject_body(e: JsonRejection) -> ApiError {
    warn!(error = %e, "rejected request body");
    ApiError::Validation("Invalid request body".into())
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_goals(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<GoalResponse>>, ApiError> {
    let goals = Goal::list_by_owner(&state.db, user.0.id).await?;
    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn create_goal(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateGoalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiError> {
    let Json(payload) = payload.map_err(reject_body)?;
    let text = payload
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Goal text cannot be empty".into()))?;

    let category = payload.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let priority = payload.priority.as_deref().unwrap_or(DEFAULT_PRIORITY);

    let goal = Goal::create(
        &state.db,
        user.0.id,
        text,
        payload.due_date.as_deref(),
        category,
        priority,
    )
    .await?;

    info!(goal_id = %goal.id, "goal created");
    Ok((StatusCode::CREATED, Json(GoalResponse::from(goal))))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn update_goal(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateGoalRequest>, JsonRejection>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal_id = parse_goal_id(&id)?;
    let Json(payload) = payload.map_err(reject_body)?;
    let patch = build_patch(payload)?;

    let goal = Goal::update(&state.db, user.0.id, goal_id, patch)
        .await?
        .ok_or(ApiError::NotFoundOrForbidden)?;

    info!(goal_id = %goal.id, "goal updated");
    Ok(Json(GoalResponse::from(goal)))
}

/// Trims incoming text and rejects patches that would blank it or that
/// carry no fields at all.
fn build_patch(payload: UpdateGoalRequest) -> Result<GoalPatch, ApiError> {
    let mut patch = GoalPatch::from(payload);
    if let Some(text) = patch.text.take() {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ApiError::Validation("Goal text cannot be empty".into()));
        }
        patch.text = Some(text);
    }
    if patch.is_empty() {
        return Err(ApiError::Validation("No valid fields to update".into()));
    }
    Ok(patch)
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn delete_goal(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let goal_id = parse_goal_id(&id)?;

    if !Goal::delete(&state.db, user.0.id, goal_id).await? {
        return Err(ApiError::NotFoundOrForbidden);
    }

    info!(goal_id = %goal_id, "goal deleted");
    Ok(Json(MessageResponse {
        message: "Goal deleted successfully".into(),
    }))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn goal_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let (total, completed) = Goal::stats(&state.db, user.0.id).await?;
    Ok(Json(StatsResponse { total, completed }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_goal_id() {
        let err = parse_goal_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::InvalidId(_)));
        assert_eq!(err.to_string(), "'not-a-uuid' is not a valid goal ID");
    }

    #[test]
    fn accepts_well_formed_goal_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_goal_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn patch_trims_text() {
        let req: UpdateGoalRequest = serde_json::from_str(r#"{"text": "  Ship it  "}"#).unwrap();
        let patch = build_patch(req).unwrap();
        assert_eq!(patch.text.as_deref(), Some("Ship it"));
    }

    #[test]
    fn patch_rejects_blank_text() {
        let req: UpdateGoalRequest = serde_json::from_str(r#"{"text": "   "}"#).unwrap();
        assert!(matches!(
            build_patch(req),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn patch_rejects_empty_body() {
        let req: UpdateGoalRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            build_patch(req),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn patch_keeps_explicit_null_due_date() {
        let req: UpdateGoalRequest =
            serde_json::from_str(r#"{"dueDate": null, "completed": true}"#).unwrap();
        let patch = build_patch(req).unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.completed, Some(true));
    }
}
