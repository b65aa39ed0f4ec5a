use std::sync::Arc;

use sqlx::PgPool;

use crate::advisor::service::CareerAdvisor;
use crate::roadmap::provider::RoadmapProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Career prediction and narrative backend. Default: `ClovaAdvisor`.
    pub advisor: Arc<dyn CareerAdvisor>,
    /// Roadmap personalization backend. Default: `HttpRoadmapProvider`.
    pub roadmap_provider: Arc<dyn RoadmapProvider>,
}
