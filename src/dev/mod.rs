// src/dev/mod.rs
// Helpers shared by the probe binary and the integration tests.
pub mod generator;
