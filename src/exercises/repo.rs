use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Exercise catalog entry. Name and category are the display metadata the
/// profile engine resolves the favorite exercise against.
#[derive(Debug, Clone, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub created_at: OffsetDateTime,
}

impl Exercise {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        category: &str,
    ) -> anyhow::Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (user_id, name, category)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, category, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(category)
        .fetch_one(db)
        .await?;
        Ok(exercise)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Exercise>> {
        let rows = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, user_id, name, category, created_at
            FROM exercises
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, user_id, name, category, created_at
            FROM exercises
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(exercise)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM exercises WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
