use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use crate::domain::{
    models::{Photo, ProfileFields, UpdateOutcome, UserId, UserProfile},
    ports::outbound::UserStore,
    ProfileError,
};

/// Postgres-backed user store.
///
/// Each user is one row with the photo list embedded in a `jsonb` column,
/// so every primitive below is a single-statement update and inherits the
/// store's per-row atomicity. First-matching-element flag updates are
/// expressed as a `jsonb_set` at the index found by an ordinal scan of the
/// array; the `@>` containment guards make `rows_affected` a faithful
/// modified-count.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    introduction: String,
    looking_for: String,
    interests: String,
    city: String,
    country: String,
    photos: Json<Vec<Photo>>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            introduction: row.introduction,
            looking_for: row.looking_for,
            interests: row.interests,
            city: row.city,
            country: row.country,
            photos: row.photos.0,
        }
    }
}

fn map_sqlx(err: sqlx::Error) -> ProfileError {
    ProfileError::database(err.to_string())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, introduction, looking_for, interests, city, country, photos
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(UserProfile::from))
    }

    async fn push_photo(
        &self,
        user_id: &UserId,
        photo: &Photo,
    ) -> Result<UpdateOutcome, ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET photos = photos || jsonb_build_array($2::jsonb)
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(Json(photo))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(UpdateOutcome::new(result.rows_affected()))
    }

    async fn clear_main_flag(&self, user_id: &UserId) -> Result<UpdateOutcome, ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET photos = jsonb_set(
                    photos,
                    ARRAY[(
                        SELECT ord - 1
                        FROM jsonb_array_elements(photos) WITH ORDINALITY AS photo(doc, ord)
                        WHERE (photo.doc ->> 'is_main')::boolean
                        ORDER BY ord
                        LIMIT 1
                    )::text, 'is_main'],
                    'false'::jsonb
                )
            WHERE id = $1
              AND photos @> '[{"is_main": true}]'::jsonb
            "#,
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(UpdateOutcome::new(result.rows_affected()))
    }

    async fn set_main_flag(
        &self,
        user_id: &UserId,
        url: &str,
    ) -> Result<UpdateOutcome, ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET photos = jsonb_set(
                    photos,
                    ARRAY[(
                        SELECT ord - 1
                        FROM jsonb_array_elements(photos) WITH ORDINALITY AS photo(doc, ord)
                        WHERE photo.doc ->> 'url' = $2
                        ORDER BY ord
                        LIMIT 1
                    )::text, 'is_main'],
                    'true'::jsonb
                )
            WHERE id = $1
              AND photos @> jsonb_build_array(jsonb_build_object('url', $2::text))
            "#,
        )
        .bind(user_id.as_str())
        .bind(url)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(UpdateOutcome::new(result.rows_affected()))
    }

    async fn pull_photo(
        &self,
        user_id: &UserId,
        url: &str,
    ) -> Result<UpdateOutcome, ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET photos = COALESCE(
                    (
                        SELECT jsonb_agg(photo.doc ORDER BY photo.ord)
                        FROM jsonb_array_elements(photos) WITH ORDINALITY AS photo(doc, ord)
                        WHERE photo.doc ->> 'url' <> $2
                    ),
                    '[]'::jsonb
                )
            WHERE id = $1
              AND photos @> jsonb_build_array(jsonb_build_object('url', $2::text))
            "#,
        )
        .bind(user_id.as_str())
        .bind(url)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(UpdateOutcome::new(result.rows_affected()))
    }

    async fn set_profile_fields(
        &self,
        user_id: &UserId,
        fields: &ProfileFields,
    ) -> Result<UpdateOutcome, ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET introduction = $2,
                looking_for = $3,
                interests = $4,
                city = $5,
                country = $6
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(&fields.introduction)
        .bind(&fields.looking_for)
        .bind(&fields.interests)
        .bind(&fields.city)
        .bind(&fields.country)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(UpdateOutcome::new(result.rows_affected()))
    }
}
