// Personalized learning roadmaps: ingest from the personalization service,
// storage, and per-item progress tracking.

pub mod handlers;
pub mod models;
pub mod progress;
pub mod provider;
pub mod repository;
