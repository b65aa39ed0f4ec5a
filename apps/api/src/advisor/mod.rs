// AI career prediction and narrative recommendations, plus the pipeline that
// turns a prediction into a stored career, roadmap and recommendation snapshot.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod repository;
pub mod service;
