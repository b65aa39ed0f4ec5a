use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::advisor::models::RecommendationRow;
use crate::matching::scorer::CareerMatch;

pub async fn insert_recommendation(
    pool: &PgPool,
    student_id: Uuid,
    predicted_career: &str,
    narrative: &str,
    matches: &[CareerMatch],
) -> Result<RecommendationRow, sqlx::Error> {
    sqlx::query_as::<_, RecommendationRow>(
        r#"
        INSERT INTO recommendations (id, student_id, predicted_career, narrative, career_matches)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(student_id)
    .bind(predicted_career)
    .bind(narrative)
    .bind(Json(matches))
    .fetch_one(pool)
    .await
}

pub async fn latest_recommendation(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Option<RecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, RecommendationRow>(
        r#"
        SELECT * FROM recommendations
        WHERE student_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await
}
