use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::roadmap::models::{OverallProgress, RoadmapRow, RoadmapStage};

/// Deletes the student's existing roadmaps and stores `roadmap` in one transaction.
pub async fn replace_roadmaps(pool: &PgPool, roadmap: &RoadmapRow) -> Result<RoadmapRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM personalized_roadmaps WHERE student_id = $1")
        .bind(roadmap.student_id)
        .execute(&mut *tx)
        .await?;

    let saved = sqlx::query_as::<_, RoadmapRow>(
        r#"
        INSERT INTO personalized_roadmaps
            (id, student_id, career_id, career_name, description, stages,
             overall_progress, generation_source, is_active, generated_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(roadmap.id)
    .bind(roadmap.student_id)
    .bind(&roadmap.career_id)
    .bind(&roadmap.career_name)
    .bind(&roadmap.description)
    .bind(&roadmap.stages)
    .bind(&roadmap.overall_progress)
    .bind(&roadmap.generation_source)
    .bind(roadmap.is_active)
    .bind(roadmap.generated_at)
    .bind(roadmap.updated_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(saved)
}

pub async fn find_active_roadmap(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Option<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        SELECT * FROM personalized_roadmaps
        WHERE student_id = $1 AND is_active
        ORDER BY generated_at DESC
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_roadmap(pool: &PgPool, id: Uuid) -> Result<Option<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>("SELECT * FROM personalized_roadmaps WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Loads the student's active roadmap and locks its row until `conn`'s
/// transaction ends, so concurrent progress writes serialize.
pub async fn lock_active_roadmap(
    conn: &mut PgConnection,
    student_id: Uuid,
) -> Result<Option<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        SELECT * FROM personalized_roadmaps
        WHERE student_id = $1 AND is_active
        ORDER BY generated_at DESC
        LIMIT 1
        FOR UPDATE
        "#,
    )
    .bind(student_id)
    .fetch_optional(conn)
    .await
}

/// Returns the number of rows written (0 when the roadmap no longer exists).
pub async fn update_stages(
    conn: &mut PgConnection,
    id: Uuid,
    stages: &[RoadmapStage],
    progress: OverallProgress,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE personalized_roadmaps
        SET stages = $2, overall_progress = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(Json(stages))
    .bind(Json(progress))
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}
