use crate::students::models::{CourseGrade, StudentRow};

/// Percentage of the core profile fields that are filled in:
/// full name, GPA, personality type, IT skills and interests.
pub fn profile_completeness(student: &StudentRow) -> u8 {
    let filled = [
        !student.full_name.trim().is_empty(),
        student.gpa.is_some(),
        student.personality_type.is_some(),
        !student.it_skills.is_empty(),
        !student.interests.is_empty(),
    ];
    let count = filled.iter().filter(|f| **f).count();
    ((count as f64 / filled.len() as f64) * 100.0).round() as u8
}

/// GPA on the 4-point scale from graded courses (10-point grades > 0).
/// Returns `None` when nothing has been graded, leaving the stored GPA as-is.
pub fn gpa_from_courses(courses: &[CourseGrade]) -> Option<f64> {
    let graded: Vec<f64> = courses
        .iter()
        .map(|c| c.grade)
        .filter(|g| *g > 0.0)
        .collect();
    if graded.is_empty() {
        return None;
    }
    let average = graded.iter().sum::<f64>() / graded.len() as f64;
    Some(average / 10.0 * 4.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    use crate::matching::profile::{SkillScores, Traits};

    pub(crate) fn make_student() -> StudentRow {
        StudentRow {
            id: Uuid::new_v4(),
            student_code: "B21DCCN001".to_string(),
            email: "student@example.edu".to_string(),
            full_name: "Nguyen Van A".to_string(),
            university: Some("PTIT".to_string()),
            major: Some("Information Technology".to_string()),
            current_year: Some(3),
            current_semester: Some(5),
            gpa: Some(3.2),
            personality_type: Some("INTJ".to_string()),
            traits: Json(Traits::default()),
            skill_scores: Json(SkillScores::default()),
            it_skills: vec!["Python".to_string(), "SQL".to_string()],
            soft_skills: vec!["Teamwork".to_string()],
            interests: vec!["data-science".to_string()],
            career_goals: None,
            time_per_week_hours: Some(10),
            courses: Json(vec![]),
            target_career_id: None,
            predicted_career: None,
            career_confidence: None,
            ai_recommendation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(code: &str, grade: f64) -> CourseGrade {
        CourseGrade {
            code: code.to_string(),
            name: format!("Course {code}"),
            semester: Some(1),
            grade,
        }
    }

    #[test]
    fn test_full_profile_is_100() {
        assert_eq!(profile_completeness(&make_student()), 100);
    }

    #[test]
    fn test_partial_profile_rounds() {
        let mut student = make_student();
        student.gpa = None;
        student.personality_type = None;
        student.interests.clear();
        assert_eq!(profile_completeness(&student), 40);
    }

    #[test]
    fn test_blank_name_counts_as_missing() {
        let mut student = make_student();
        student.full_name = "   ".to_string();
        assert_eq!(profile_completeness(&student), 80);
    }

    #[test]
    fn test_gpa_ignores_ungraded_courses() {
        let courses = vec![course("INT1", 8.0), course("INT2", 9.0), course("INT3", 0.0)];
        let gpa = gpa_from_courses(&courses).unwrap();
        assert!((gpa - 3.4).abs() < 1e-9, "GPA was {gpa}");
    }

    #[test]
    fn test_gpa_none_without_grades() {
        assert!(gpa_from_courses(&[course("INT1", 0.0)]).is_none());
        assert!(gpa_from_courses(&[]).is_none());
    }

    #[test]
    fn test_perfect_grades_give_max_gpa() {
        let gpa = gpa_from_courses(&[course("INT1", 10.0)]).unwrap();
        assert!((gpa - 4.0).abs() < 1e-9);
    }
}
