//! # cur-gen
//!
//! LLM-backed generation passes for Curator: application ideas, per-app
//! file sets, review findings, and bug fixes.
//!
//! Every pass is generic over the [`cur_llm::Completion`] capability so the
//! orchestrator and tests can substitute scripted models. No pass retries
//! internally; each makes exactly the completion calls its contract names.

pub mod codegen;
pub mod extract;
pub mod idea;
pub mod review;
pub mod select;

pub use codegen::CodeGenerator;
pub use idea::{IdeaContext, IdeaGenerator};
pub use review::{BugFixer, CodeReviewer, actionable};

use thiserror::Error;

/// Errors from generation, review, and fix passes.
#[derive(Debug, Error)]
pub enum GenError {
    /// The underlying completion call failed.
    #[error(transparent)]
    Llm(#[from] cur_llm::LlmError),

    /// LLM output did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The generated idea collides with a registered application.
    #[error("duplicate idea: key '{key}' already registered")]
    Duplicate { key: String },
}
