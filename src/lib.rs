// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod console;
pub mod difficulty;
pub mod history;
pub mod results_log;
pub mod scoring;
pub mod sequence;
pub mod session;
