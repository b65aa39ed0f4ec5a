//! Roadmap personalization service client.
//!
//! The service owns the canonical career roadmaps and personalizes them from the
//! stored student record; it only needs the student id and a job name.
//! `AppState` holds an `Arc<dyn RoadmapProvider>` so handlers can be exercised
//! without the service running.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::roadmap::models::GeneratedRoadmap;

#[derive(Debug, Error)]
pub enum RoadmapServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Roadmap service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Roadmap service rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed roadmap payload: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait RoadmapProvider: Send + Sync {
    async fn personalized_roadmap(
        &self,
        student_id: Uuid,
        job_name: &str,
    ) -> Result<GeneratedRoadmap, RoadmapServiceError>;
}

#[derive(Debug, Serialize)]
struct PersonalizeRequest<'a> {
    user_id: String,
    jobname: &'a str,
}

pub struct HttpRoadmapProvider {
    client: Client,
    base_url: String,
}

impl HttpRoadmapProvider {
    pub fn new(base_url: String) -> Result<Self, RoadmapServiceError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(180))
                .build()?,
            base_url,
        })
    }
}

#[async_trait]
impl RoadmapProvider for HttpRoadmapProvider {
    async fn personalized_roadmap(
        &self,
        student_id: Uuid,
        job_name: &str,
    ) -> Result<GeneratedRoadmap, RoadmapServiceError> {
        let url = format!("{}/roadmap/personalized", self.base_url);
        info!("Requesting personalized roadmap for student {student_id} ({job_name})");

        let response = self
            .client
            .post(&url)
            .json(&PersonalizeRequest {
                user_id: student_id.to_string(),
                jobname: job_name,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RoadmapServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let roadmap = parse_roadmap(&body)?;
        debug!("Roadmap service returned {} stages", roadmap.stages.len());
        Ok(roadmap)
    }
}

/// The service reports lookup failures as `{"error": "..."}` with a 200 status.
fn parse_roadmap(body: &str) -> Result<GeneratedRoadmap, RoadmapServiceError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(RoadmapServiceError::Rejected(message.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}
