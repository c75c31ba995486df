//! poststudio: draft, check, review and schedule social posts from the terminal.
//!
//! Layers: `cli` (argument surface) → `commands` (orchestration/output) →
//! `services` (logic, storage, identity) → `domain` (data only).

pub mod cli;
pub mod commands;
pub mod domain;
pub mod logging;
pub mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::config::load_config;
pub use services::evaluator::evaluate;
pub use services::genai::{ai_status, EnvGenerationHost, GenerationHost};
pub use services::identity::{
    resolve_session, session_from, IdentityError, IdentityProvider, LocalIdentityProvider,
    Session,
};
pub use services::lifecycle::{LifecycleError, Transition};
pub use services::output::{print_error, print_one, print_out};
pub use services::readiness::{health_summary, readiness_summary};
pub use services::storage::{
    audit, config_dir, load_workspace, persist_workspace, DeviceStore, DocumentStore,
    FileDocumentStore, StoreError,
};
pub use services::workspace::{
    create_draft, delete_post, duplicate_post, edit_post, find_post, list_calendar, list_drafts,
    list_review, normalize_hashtags, parse_media, transition_post, CalendarFilter, PostPatch,
    WorkspaceError,
};

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let dir = config_dir()?;
    let config = load_config(&dir)?;
    let identity = LocalIdentityProvider::new(&dir);
    let device = DeviceStore::from_home()?;

    if handle_account_commands(cli, &identity, &device)? {
        return Ok(());
    }

    let session = resolve_session(&identity);
    tracing::debug!(user = %session.user.id, role = %session.user.role, "session resolved");
    let studio = Studio::open(cli, config, session)?;
    handle_post_commands(cli, &studio)
}
