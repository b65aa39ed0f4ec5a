use crate::matching::profile::{MAX_GPA, MAX_SCORE};
use crate::students::models::{RegisterRequest, StudentRow, UpdateStudentRequest};

/// Course grades use the 10-point scale.
pub const MAX_COURSE_GRADE: f64 = 10.0;

/// Checks a registration payload before anything touches the database.
/// Returns the first problem found as a user-facing message.
pub fn validate_register(req: &RegisterRequest) -> Result<(), String> {
    if req.full_name.trim().is_empty() {
        return Err("fullName is required".to_string());
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err("A valid email is required".to_string());
    }
    if req.student_code.trim().is_empty() {
        return Err("studentCode is required".to_string());
    }
    if !req.it_skills.iter().any(|s| !s.trim().is_empty()) {
        return Err("At least one IT skill is required".to_string());
    }
    validate_gpa(req.gpa)?;
    if let Some(course) = req
        .courses
        .iter()
        .find(|c| !(0.0..=MAX_COURSE_GRADE).contains(&c.grade))
    {
        return Err(format!(
            "grade of course {} must be between 0 and {MAX_COURSE_GRADE}",
            course.code
        ));
    }
    validate_scores(&req.traits.entries())?;
    validate_scores(&req.skill_scores.entries())
}

pub fn validate_update(req: &UpdateStudentRequest) -> Result<(), String> {
    if let Some(name) = &req.full_name {
        if name.trim().is_empty() {
            return Err("fullName cannot be blank".to_string());
        }
    }
    validate_gpa(req.gpa)?;
    if let Some(traits) = &req.traits {
        validate_scores(&traits.entries())?;
    }
    if let Some(skills) = &req.skill_scores {
        validate_scores(&skills.entries())?;
    }
    Ok(())
}

fn validate_gpa(gpa: Option<f64>) -> Result<(), String> {
    match gpa {
        Some(g) if !(0.0..=MAX_GPA).contains(&g) => {
            Err(format!("gpa must be between 0 and {MAX_GPA}"))
        }
        _ => Ok(()),
    }
}

fn validate_scores(entries: &[(&'static str, u8)]) -> Result<(), String> {
    match entries.iter().find(|(_, score)| *score > MAX_SCORE) {
        Some((name, _)) => Err(format!("{name} must be between 0 and {MAX_SCORE}")),
        None => Ok(()),
    }
}

/// Student codes are stored uppercased so lookups are case-insensitive.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Copies every provided field of `req` onto `student`.
pub fn apply_update(student: &mut StudentRow, req: UpdateStudentRequest) {
    if let Some(v) = req.full_name {
        student.full_name = v.trim().to_string();
    }
    if let Some(v) = req.university {
        student.university = Some(v);
    }
    if let Some(v) = req.major {
        student.major = Some(v);
    }
    if let Some(v) = req.current_year {
        student.current_year = Some(v);
    }
    if let Some(v) = req.current_semester {
        student.current_semester = Some(v);
    }
    if let Some(v) = req.gpa {
        student.gpa = Some(v);
    }
    if let Some(v) = req.personality_type {
        student.personality_type = Some(v.to_string());
    }
    if let Some(v) = req.traits {
        student.traits.0 = v;
    }
    if let Some(v) = req.skill_scores {
        student.skill_scores.0 = v;
    }
    if let Some(v) = req.it_skills {
        student.it_skills = v;
    }
    if let Some(v) = req.soft_skills {
        student.soft_skills = v;
    }
    if let Some(v) = req.interests {
        student.interests = v;
    }
    if let Some(v) = req.career_goals {
        student.career_goals = Some(v);
    }
    if let Some(v) = req.time_per_week_hours {
        student.time_per_week_hours = Some(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::matching::profile::{PersonalityType, Traits};
    use crate::students::completeness::tests::make_student;

    fn register_body() -> serde_json::Value {
        json!({
            "email": "an@example.edu",
            "studentCode": "b21dccn042",
            "fullName": "Tran Thi An",
            "gpa": 3.5,
            "personalityType": "ENFP",
            "itSkills": ["React", "TypeScript"],
            "softSkills": ["Communication"],
            "interests": ["web-development"]
        })
    }

    fn register(value: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_register_passes() {
        assert!(validate_register(&register(register_body())).is_ok());
    }

    #[test]
    fn test_register_personality_label() {
        let mut body = register_body();
        body["personalityType"] = json!("enfp");
        assert_eq!(register(body.clone()).personality_type, Some(PersonalityType::Enfp));

        body["personalityType"] = json!("XXXX");
        assert!(serde_json::from_value::<RegisterRequest>(body).is_err());
    }

    #[test]
    fn test_register_requires_it_skill() {
        let mut body = register_body();
        body["itSkills"] = json!(["  "]);
        let err = validate_register(&register(body)).unwrap_err();
        assert!(err.contains("IT skill"));
    }

    #[test]
    fn test_register_rejects_bad_email_and_gpa() {
        let mut body = register_body();
        body["email"] = json!("not-an-email");
        assert!(validate_register(&register(body)).is_err());

        let mut body = register_body();
        body["gpa"] = json!(4.5);
        assert!(validate_register(&register(body)).is_err());
    }

    #[test]
    fn test_register_rejects_trait_above_ten() {
        let mut body = register_body();
        body["traits"] = json!({"leadership": 11});
        let err = validate_register(&register(body)).unwrap_err();
        assert!(err.starts_with("leadership"));
    }

    #[test]
    fn test_register_rejects_course_grade_above_ten() {
        let mut body = register_body();
        body["courses"] = json!([{"code": "INT1340", "name": "Databases", "grade": 12}]);
        let err = validate_register(&register(body)).unwrap_err();
        assert!(err.contains("INT1340"));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" b21dccn042 "), "B21DCCN042");
    }

    #[test]
    fn test_apply_update_only_touches_provided_fields() {
        let mut student = make_student();
        let before = student.clone();
        let update = UpdateStudentRequest {
            gpa: Some(3.9),
            personality_type: Some(PersonalityType::Enfp),
            traits: Some(Traits {
                creative: 9,
                ..Traits::default()
            }),
            ..UpdateStudentRequest::default()
        };

        apply_update(&mut student, update);

        assert_eq!(student.gpa, Some(3.9));
        assert_eq!(student.personality_type.as_deref(), Some("ENFP"));
        assert_eq!(student.traits.0.creative, 9);
        assert_eq!(student.full_name, before.full_name);
        assert_eq!(student.it_skills, before.it_skills);
        assert_eq!(student.interests, before.interests);
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let update = UpdateStudentRequest {
            full_name: Some(" ".to_string()),
            ..UpdateStudentRequest::default()
        };
        assert!(validate_update(&update).is_err());
    }
}
