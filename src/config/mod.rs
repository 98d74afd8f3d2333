//! Configuration module for loading simulation parameters.

mod parameters;

pub use parameters::{BiologyParameters, EngineParameters, Parameters};
