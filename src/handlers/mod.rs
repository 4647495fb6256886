// handlers/mod.rs - HTTP handlers
//
// Handlers only extract, validate, and call the repository. Capability checks
// happen in the route layer before any handler runs.
pub mod jobs;
pub mod system;
