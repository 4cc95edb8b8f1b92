//! Analysis pipeline

pub mod analyzer;

pub use analyzer::{AnalysisEngine, AnalysisRequest, ResumeSource, MISSING_INPUT_MESSAGE};
