//! Career advisor: predicts a job role from a student's skills and writes a
//! narrative recommendation for it.
//!
//! `ClovaAdvisor` is the production backend. `AppState` carries an
//! `Arc<dyn CareerAdvisor>` so the handlers can run against a canned advisor.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::advisor::models::{AdvisorProfile, CareerAdvice};
use crate::advisor::prompts::{
    career_prediction_prompt, recommendation_prompt, CAREER_ADVISOR_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::prompts::ENGLISH_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

/// Confidence recorded alongside a predicted career.
pub const CAREER_CONFIDENCE: f64 = 0.85;
const DEFAULT_JOB_FILE: &str = "full_stack_developer";

#[async_trait]
pub trait CareerAdvisor: Send + Sync {
    async fn predict_career(
        &self,
        it_skills: &[String],
        soft_skills: &[String],
    ) -> Result<String, AppError>;

    async fn recommend(
        &self,
        profile: &AdvisorProfile,
        predicted_career: &str,
    ) -> Result<String, AppError>;
}

pub struct ClovaAdvisor {
    llm: LlmClient,
}

impl ClovaAdvisor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CareerAdvisor for ClovaAdvisor {
    async fn predict_career(
        &self,
        it_skills: &[String],
        soft_skills: &[String],
    ) -> Result<String, AppError> {
        let prompt = career_prediction_prompt(it_skills, soft_skills);
        let raw = self.llm.complete_task(&prompt, ENGLISH_ONLY_SYSTEM).await?;
        extract_role(&raw).ok_or(AppError::Llm(LlmError::EmptyContent))
    }

    async fn recommend(
        &self,
        profile: &AdvisorProfile,
        predicted_career: &str,
    ) -> Result<String, AppError> {
        let prompt = recommendation_prompt(profile, predicted_career);
        Ok(self.llm.chat(&prompt, CAREER_ADVISOR_SYSTEM).await?)
    }
}

/// The tuned model answers with a role name followed by free text.
/// Keeps the first line up to the first period.
pub fn extract_role(raw: &str) -> Option<String> {
    let first_line = raw.trim().split('\n').next().unwrap_or_default();
    let role = first_line.split('.').next().unwrap_or_default().trim();
    (!role.is_empty()).then(|| role.to_string())
}

const DIRECT_JOB_FILES: &[(&str, &str)] = &[
    ("information_technology", "full_stack_developer"),
    ("software_engineer", "full_stack_developer"),
    ("web_developer", "full_stack_developer"),
    ("frontend_developer", "full_stack_developer"),
    ("backend_developer", "full_stack_developer"),
    ("data_analyst", "data_analyst"),
    ("data_scientist", "data_scientist"),
    ("machine_learning_engineer", "machine_learning"),
    ("ml_engineer", "machine_learning"),
    ("ai_engineer", "machine_learning"),
    ("big_data_engineer", "big_data_engineer"),
    ("cloud_architect", "cloud_architect"),
    ("cloud_engineer", "cloud_architect"),
    ("devops_engineer", "cloud_architect"),
    ("security_analyst", "information_security_analyst"),
    ("cybersecurity_analyst", "information_security_analyst"),
    ("business_analyst", "business_intelligence_analyst"),
    ("bi_analyst", "business_intelligence_analyst"),
];

/// Maps a free-text career name to the roadmap job file it should be built from.
pub fn job_file_for_career(career: &str) -> &'static str {
    let key = career
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    if let Some((_, file)) = DIRECT_JOB_FILES.iter().find(|(name, _)| *name == key) {
        return file;
    }

    let has = |needle: &str| key.contains(needle);
    if has("data") && has("scien") {
        "data_scientist"
    } else if has("data") && has("analy") {
        "data_analyst"
    } else if has("machine") || has("learning") {
        "machine_learning"
    } else if has("cloud") {
        "cloud_architect"
    } else if has("security") {
        "information_security_analyst"
    } else if has("business") && has("intel") {
        "business_intelligence_analyst"
    } else if has("big") && has("data") {
        "big_data_engineer"
    } else {
        DEFAULT_JOB_FILE
    }
}

pub fn fallback_recommendation(career: &str) -> String {
    format!("Career recommendation for {career} based on your skills and profile.")
}

/// Predicts a career and writes its narrative. A failed prediction is an error;
/// a failed narrative falls back to a one-line recommendation.
pub async fn advise(
    advisor: &dyn CareerAdvisor,
    profile: &AdvisorProfile,
) -> Result<CareerAdvice, AppError> {
    let predicted_career = advisor
        .predict_career(&profile.it_skills, &profile.soft_skills)
        .await?;
    info!("Predicted career for {}: {predicted_career}", profile.full_name);

    let recommendation = match advisor.recommend(profile, &predicted_career).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Recommendation failed, using fallback: {e}");
            fallback_recommendation(&predicted_career)
        }
    };

    Ok(CareerAdvice {
        target_career_id: job_file_for_career(&predicted_career).to_string(),
        predicted_career,
        confidence: CAREER_CONFIDENCE,
        recommendation,
    })
}
