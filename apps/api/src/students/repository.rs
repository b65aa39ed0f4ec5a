use sqlx::PgPool;
use uuid::Uuid;

use crate::students::models::{StudentRow, StudentSummary};

pub async fn student_exists(
    pool: &PgPool,
    email: &str,
    student_code: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM students WHERE LOWER(email) = LOWER($1) OR student_code = $2)",
    )
    .bind(email)
    .bind(student_code)
    .fetch_one(pool)
    .await
}

pub async fn insert_student(pool: &PgPool, s: &StudentRow) -> Result<StudentRow, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>(
        r#"
        INSERT INTO students
            (id, student_code, email, full_name, university, major,
             current_year, current_semester, gpa, personality_type,
             traits, skill_scores, it_skills, soft_skills, interests,
             career_goals, time_per_week_hours, courses,
             target_career_id, predicted_career, career_confidence, ai_recommendation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22)
        RETURNING *
        "#,
    )
    .bind(s.id)
    .bind(&s.student_code)
    .bind(&s.email)
    .bind(&s.full_name)
    .bind(&s.university)
    .bind(&s.major)
    .bind(s.current_year)
    .bind(s.current_semester)
    .bind(s.gpa)
    .bind(&s.personality_type)
    .bind(&s.traits)
    .bind(&s.skill_scores)
    .bind(&s.it_skills)
    .bind(&s.soft_skills)
    .bind(&s.interests)
    .bind(&s.career_goals)
    .bind(s.time_per_week_hours)
    .bind(&s.courses)
    .bind(&s.target_career_id)
    .bind(&s.predicted_career)
    .bind(s.career_confidence)
    .bind(&s.ai_recommendation)
    .fetch_one(pool)
    .await
}

/// Writes every mutable column back and bumps `updated_at`.
pub async fn save_student(pool: &PgPool, s: &StudentRow) -> Result<StudentRow, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>(
        r#"
        UPDATE students SET
            full_name = $2, university = $3, major = $4,
            current_year = $5, current_semester = $6, gpa = $7,
            personality_type = $8, traits = $9, skill_scores = $10,
            it_skills = $11, soft_skills = $12, interests = $13,
            career_goals = $14, time_per_week_hours = $15, courses = $16,
            target_career_id = $17, predicted_career = $18,
            career_confidence = $19, ai_recommendation = $20,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(s.id)
    .bind(&s.full_name)
    .bind(&s.university)
    .bind(&s.major)
    .bind(s.current_year)
    .bind(s.current_semester)
    .bind(s.gpa)
    .bind(&s.personality_type)
    .bind(&s.traits)
    .bind(&s.skill_scores)
    .bind(&s.it_skills)
    .bind(&s.soft_skills)
    .bind(&s.interests)
    .bind(&s.career_goals)
    .bind(s.time_per_week_hours)
    .bind(&s.courses)
    .bind(&s.target_career_id)
    .bind(&s.predicted_career)
    .bind(s.career_confidence)
    .bind(&s.ai_recommendation)
    .fetch_one(pool)
    .await
}

pub async fn find_student(pool: &PgPool, id: Uuid) -> Result<Option<StudentRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// `code` must already be normalized.
pub async fn find_student_by_code(
    pool: &PgPool,
    code: &str,
) -> Result<Option<StudentRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE student_code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
}

pub async fn list_students(pool: &PgPool) -> Result<Vec<StudentSummary>, sqlx::Error> {
    sqlx::query_as::<_, StudentSummary>(
        r#"
        SELECT id, student_code, full_name, gpa, target_career_id, predicted_career
        FROM students
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}
