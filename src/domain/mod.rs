//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep post/user/report structs in one place.
//! - Avoid cyclic imports between services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: posts, moderation results, users, workspace snapshot, config, reports.
//! - `constants.rs`: scoring penalties, risk terms, limits, file names.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! These structs are the workspace document format and the `--json` output.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
