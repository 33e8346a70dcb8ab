use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub s3_key: String,
    pub content_type: String,
    pub created_at: OffsetDateTime,
}

impl Photo {
    pub async fn insert(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        s3_key: &str,
        content_type: &str,
    ) -> anyhow::Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (id, user_id, s3_key, content_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, s3_key, content_type, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(s3_key)
        .bind(content_type)
        .fetch_one(db)
        .await?;
        Ok(photo)
    }

    pub async fn find_by_id(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Photo>> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, user_id, s3_key, content_type, created_at
            FROM photos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(photo)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM photos WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
