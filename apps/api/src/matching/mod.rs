// Deterministic career-fit scoring against a static career table.
// No I/O here; handlers adapt stored students into `StudentProfile`.

pub mod catalog;
pub mod handlers;
pub mod profile;
pub mod scorer;
