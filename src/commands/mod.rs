//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `account.rs`: auth/team/theme/ai command trees (no workspace load).
//! - `posts.rs`: draft/post/check/review/calendar/workspace.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod account;
pub mod posts;

pub use account::handle_account_commands;
pub use posts::{handle_post_commands, Studio};
