use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::profile::{PersonalityType, SkillScores, StudentProfile, Traits};
use crate::students::validation::normalize_code;

/// A course on the student's curriculum with its grade on the 10-point scale.
/// A grade of 0 means the course has not been graded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGrade {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub semester: Option<i32>,
    #[serde(default)]
    pub grade: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub id: Uuid,
    pub student_code: String,
    pub email: String,
    pub full_name: String,
    pub university: Option<String>,
    pub major: Option<String>,
    pub current_year: Option<i32>,
    pub current_semester: Option<i32>,
    pub gpa: Option<f64>,
    pub personality_type: Option<String>,
    pub traits: Json<Traits>,
    pub skill_scores: Json<SkillScores>,
    pub it_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub interests: Vec<String>,
    pub career_goals: Option<String>,
    pub time_per_week_hours: Option<i32>,
    pub courses: Json<Vec<CourseGrade>>,
    pub target_career_id: Option<String>,
    pub predicted_career: Option<String>,
    pub career_confidence: Option<f64>,
    pub ai_recommendation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRow {
    /// Snapshot of the fields the career-fit scorer reads.
    /// A missing GPA scores as 0; an unknown personality label scores as a miss.
    pub fn to_profile(&self) -> StudentProfile {
        StudentProfile {
            gpa: self.gpa.unwrap_or(0.0),
            personality_type: self
                .personality_type
                .as_deref()
                .and_then(|p| p.parse::<PersonalityType>().ok()),
            traits: self.traits.0,
            skills: self.skill_scores.0,
            interests: self.interests.clone(),
        }
    }

    /// Builds a fresh record from a validated registration payload.
    pub fn from_register(req: RegisterRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_code: normalize_code(&req.student_code),
            email: req.email.trim().to_string(),
            full_name: req.full_name.trim().to_string(),
            university: req.university,
            major: req.major,
            current_year: req.current_year,
            current_semester: req.current_semester,
            gpa: req.gpa,
            personality_type: req.personality_type.map(|p| p.to_string()),
            traits: Json(req.traits),
            skill_scores: Json(req.skill_scores),
            it_skills: req.it_skills,
            soft_skills: req.soft_skills,
            interests: req.interests,
            career_goals: req.career_goals,
            time_per_week_hours: req.time_per_week_hours,
            courses: Json(req.courses),
            target_career_id: None,
            predicted_career: req.predicted_career,
            career_confidence: None,
            ai_recommendation: req.ai_recommendation,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing projection used by student pickers.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Uuid,
    pub student_code: String,
    pub full_name: String,
    pub gpa: Option<f64>,
    pub target_career_id: Option<String>,
    pub predicted_career: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    #[serde(flatten)]
    pub student: StudentRow,
    pub profile_completeness: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub student_code: String,
    pub full_name: String,
    pub university: Option<String>,
    pub major: Option<String>,
    pub current_year: Option<i32>,
    pub current_semester: Option<i32>,
    pub gpa: Option<f64>,
    pub personality_type: Option<PersonalityType>,
    #[serde(default)]
    pub traits: Traits,
    #[serde(default)]
    pub skill_scores: SkillScores,
    #[serde(default)]
    pub it_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub career_goals: Option<String>,
    pub time_per_week_hours: Option<i32>,
    #[serde(default)]
    pub courses: Vec<CourseGrade>,
    /// Carried over from the preview step so registration can skip a second prediction.
    pub predicted_career: Option<String>,
    pub ai_recommendation: Option<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub current_year: Option<i32>,
    pub current_semester: Option<i32>,
    pub gpa: Option<f64>,
    pub personality_type: Option<PersonalityType>,
    pub traits: Option<Traits>,
    pub skill_scores: Option<SkillScores>,
    pub it_skills: Option<Vec<String>>,
    pub soft_skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub career_goals: Option<String>,
    pub time_per_week_hours: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseGradeRequest {
    pub course_code: String,
    pub grade: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesResponse {
    pub courses: Vec<CourseGrade>,
    pub gpa: Option<f64>,
}
