use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Goal row as stored. Not a wire type: serialization goes through
/// `dto::GoalResponse`, which strips the owner id.
#[derive(Debug, Clone, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub completed: bool,
    pub due_date: Option<String>,
    pub category: String,
    pub priority: String,
    pub created_at: OffsetDateTime,
}

/// Sparse patch for an update. `None` means the field was absent from
/// the request and stays untouched; `due_date` carries one more level
/// so an explicit null can clear the date.
#[derive(Debug, Default)]
pub struct GoalPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<String>>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl GoalPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
            && self.category.is_none()
            && self.priority.is_none()
    }
}

impl Goal {
    /// All goals belonging to `owner`, oldest first for a stable order.
    pub async fn list_by_owner(db: &PgPool, owner: Uuid) -> Result<Vec<Goal>, sqlx::Error> {
        sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, text, completed, due_date, category, priority, created_at
            FROM goals
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        owner: Uuid,
        text: &str,
        due_date: Option<&str>,
        category: &str,
        priority: &str,
    ) -> Result<Goal, sqlx::Error> {
        sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO goals (user_id, text, due_date, category, priority)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, text, completed, due_date, category, priority, created_at
            "#,
        )
        .bind(owner)
        .bind(text)
        .bind(due_date)
        .bind(category)
        .bind(priority)
        .fetch_one(db)
        .await
    }

    /// Applies only the fields present in `patch`. The predicate matches
    /// id AND owner in one statement, so a goal that exists but belongs
    /// to someone else is indistinguishable from one that does not
    /// exist: both return `None`.
    pub async fn update(
        db: &PgPool,
        owner: Uuid,
        goal_id: Uuid,
        patch: GoalPatch,
    ) -> Result<Option<Goal>, sqlx::Error> {
        sqlx::query_as::<_, Goal>(
            r#"
            UPDATE goals
            SET text = COALESCE($3, text),
                completed = COALESCE($4, completed),
                category = COALESCE($5, category),
                priority = COALESCE($6, priority),
                due_date = CASE WHEN $7 THEN $8 ELSE due_date END
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, text, completed, due_date, category, priority, created_at
            "#,
        )
        .bind(goal_id)
        .bind(owner)
        .bind(patch.text)
        .bind(patch.completed)
        .bind(patch.category)
        .bind(patch.priority)
        .bind(patch.due_date.is_some())
        .bind(patch.due_date.flatten())
        .fetch_optional(db)
        .await
    }

    /// Returns false when zero rows matched the id+owner predicate.
    pub async fn delete(db: &PgPool, owner: Uuid, goal_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(goal_id)
        .bind(owner)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// (total, completed) counts for `owner`.
    pub async fn stats(db: &PgPool, owner: Uuid) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE completed)
            FROM goals
            WHERE user_id = $1
            "#,
        )
        .bind(owner)
        .fetch_one(db)
        .await
    }
}
