use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::advisor::models::{AdvisorProfile, CareerAdvice};
use crate::advisor::pipeline::apply_career_pipeline;
use crate::advisor::service::{advise, job_file_for_career, CAREER_CONFIDENCE};
use crate::errors::AppError;
use crate::state::AppState;
use crate::students::completeness::{gpa_from_courses, profile_completeness};
use crate::students::models::{
    CoursesResponse, RegisterRequest, StudentResponse, StudentRow, StudentSummary,
    UpdateCourseGradeRequest, UpdateStudentRequest,
};
use crate::students::repository::{
    find_student, find_student_by_code, insert_student, list_students, save_student,
    student_exists,
};
use crate::students::validation::{
    apply_update, normalize_code, validate_register, validate_update, MAX_COURSE_GRADE,
};

fn respond(student: StudentRow) -> StudentResponse {
    StudentResponse {
        profile_completeness: profile_completeness(&student),
        student,
    }
}

fn already_registered() -> AppError {
    AppError::UnprocessableEntity("Email or student code is already registered".to_string())
}

pub async fn load_student(state: &AppState, id: Uuid) -> Result<StudentRow, AppError> {
    find_student(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))
}

/// POST /api/v1/students
///
/// Creates the student, then predicts a career and builds the roadmap.
/// Failures after the insert are logged; the student is returned regardless.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    validate_register(&req).map_err(AppError::Validation)?;

    let code = normalize_code(&req.student_code);
    if student_exists(&state.db, req.email.trim(), &code).await? {
        return Err(already_registered());
    }

    let mut row = StudentRow::from_register(req);
    if row.gpa.is_none() {
        row.gpa = gpa_from_courses(&row.courses.0);
    }
    let student = insert_student(&state.db, &row)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration.
            sqlx::Error::Database(ref db) if db.is_unique_violation() => already_registered(),
            other => AppError::Database(other),
        })?;
    info!("Registered student {} ({})", student.student_code, student.id);

    let student = match run_registration_pipeline(&state, student.clone()).await {
        Ok(updated) => updated,
        Err(e) => {
            warn!(
                "Career pipeline failed for new student {}: {e}",
                student.student_code
            );
            find_student(&state.db, student.id).await?.unwrap_or(student)
        }
    };

    Ok((StatusCode::CREATED, Json(respond(student))))
}

/// Reuses a career already predicted during preview, otherwise asks the advisor.
async fn run_registration_pipeline(
    state: &AppState,
    student: StudentRow,
) -> Result<StudentRow, AppError> {
    let advice = match (&student.predicted_career, &student.ai_recommendation) {
        (Some(career), Some(recommendation)) => CareerAdvice {
            predicted_career: career.clone(),
            target_career_id: job_file_for_career(career).to_string(),
            confidence: CAREER_CONFIDENCE,
            recommendation: recommendation.clone(),
        },
        _ => advise(state.advisor.as_ref(), &AdvisorProfile::from(&student)).await?,
    };
    let (student, _) = apply_career_pipeline(state, student, &advice).await?;
    Ok(student)
}

/// GET /api/v1/students
pub async fn handle_list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentSummary>>, AppError> {
    Ok(Json(list_students(&state.db).await?))
}

/// GET /api/v1/students/:id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, AppError> {
    Ok(Json(respond(load_student(&state, id).await?)))
}

/// GET /api/v1/students/by-code/:code
pub async fn handle_get_student_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StudentResponse>, AppError> {
    let code = normalize_code(&code);
    let student = find_student_by_code(&state.db, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {code} not found")))?;
    Ok(Json(respond(student)))
}

/// PATCH /api/v1/students/:id
pub async fn handle_update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    validate_update(&req).map_err(AppError::Validation)?;

    let mut student = load_student(&state, id).await?;
    apply_update(&mut student, req);
    let student = save_student(&state.db, &student).await?;
    info!("Updated profile of student {}", student.student_code);

    Ok(Json(respond(student)))
}

/// GET /api/v1/students/:id/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CoursesResponse>, AppError> {
    let student = load_student(&state, id).await?;
    Ok(Json(CoursesResponse {
        courses: student.courses.0,
        gpa: student.gpa,
    }))
}

/// PATCH /api/v1/students/:id/courses
///
/// Sets one course grade and recomputes the GPA from all graded courses.
pub async fn handle_update_course_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCourseGradeRequest>,
) -> Result<Json<CoursesResponse>, AppError> {
    if !(0.0..=MAX_COURSE_GRADE).contains(&req.grade) {
        return Err(AppError::Validation(format!(
            "grade must be between 0 and {MAX_COURSE_GRADE}"
        )));
    }

    let mut student = load_student(&state, id).await?;
    let course = student
        .courses
        .0
        .iter_mut()
        .find(|c| c.code.eq_ignore_ascii_case(req.course_code.trim()))
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", req.course_code)))?;
    course.grade = req.grade;

    if let Some(gpa) = gpa_from_courses(&student.courses.0) {
        student.gpa = Some(gpa);
    }
    let student = save_student(&state.db, &student).await?;

    Ok(Json(CoursesResponse {
        courses: student.courses.0,
        gpa: student.gpa,
    }))
}
