use crate::advisor::models::AdvisorProfile;
use crate::llm_client::prompts::join_or_none;

pub const CAREER_ADVISOR_SYSTEM: &str = "You are an expert career advisor for IT students. \
Provide detailed career recommendations and guidance based on the student's profile and predicted career path.

Include:
1. Why this career fits the student
2. Key strengths to leverage
3. Skills to develop
4. Career trajectory and opportunities
5. Industry trends
6. Recommended certifications

Be encouraging, specific, and actionable.";

/// Input for the tuned prediction model. The wording matches its training data.
pub fn career_prediction_prompt(it_skills: &[String], soft_skills: &[String]) -> String {
    format!(
        "Given the following IT skills: {} and Soft skills: {}, the job role",
        it_skills.join(", "),
        soft_skills.join(", ")
    )
}

pub fn recommendation_prompt(profile: &AdvisorProfile, predicted_career: &str) -> String {
    let mut lines = vec![
        "Student Profile:".to_string(),
        format!("- Name: {}", profile.full_name),
        format!("- IT Skills: {}", join_or_none(&profile.it_skills)),
        format!("- Soft Skills: {}", join_or_none(&profile.soft_skills)),
    ];
    if !profile.interests.is_empty() {
        lines.push(format!("- Interests: {}", profile.interests.join(", ")));
    }
    lines.push(format!(
        "- Current Semester: {}",
        profile
            .current_semester
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    ));
    lines.push(format!(
        "- GPA: {}/4.0",
        profile
            .gpa
            .map(|g| format!("{g:.2}"))
            .unwrap_or_else(|| "N/A".to_string())
    ));
    lines.push(String::new());
    lines.push(format!("Predicted Career: {predicted_career}"));
    lines.push(String::new());
    lines.push("Provide career recommendations for this student.".to_string());
    lines.join("\n")
}
