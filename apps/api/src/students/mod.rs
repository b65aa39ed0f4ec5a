// Student records: registration, profile edits, course grades.

pub mod completeness;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod validation;
