//! # cur-core
//!
//! Core types shared across all Curator crates:
//! - Application ideas and generated file sets
//! - Registry records for deduplication across runs
//! - Category and AWS service catalog entries
//! - Review issues and severity levels
//! - Iteration reports returned by the orchestrator
//! - Slug and uniqueness-key helpers

pub mod catalog;
pub mod idea;
pub mod issue;
pub mod keys;
pub mod record;
pub mod report;

pub use catalog::{AwsService, Category};
pub use idea::{AppIdea, GeneratedApplication};
pub use issue::{Issue, IssueKind, Severity};
pub use keys::{slug, uniqueness_key};
pub use record::AppRecord;
pub use report::{FailureStage, ItemFailure, IterationReport};
