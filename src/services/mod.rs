//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `evaluator.rs`: fixed-penalty moderation/quality checks (pure).
//! - `readiness.rs`: readiness and health summaries derived from a check run.
//! - `lifecycle.rs`: post status state machine and role rules.
//! - `workspace.rs`: draft/review/calendar collection operations.
//! - `storage.rs`: workspace document store, device keys, audit log.
//! - `identity.rs`: identity provider boundary and explicit session.
//! - `config.rs`: `config.toml` loading.
//! - `genai.rs`: generative-AI credential availability.
//! - `output.rs`: JSON/text output helpers and error codes.
//!
//! ## Conventions
//! - Prefer pure helpers where possible; take `now` and `Session` as arguments.
//! - Side effects should be explicit and localized (storage/identity).
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod evaluator;
pub mod genai;
pub mod identity;
pub mod lifecycle;
pub mod output;
pub mod readiness;
pub mod storage;
pub mod workspace;
