//! Identity provider boundary and the explicit acting-user session.

use crate::domain::constants::{MAX_FAILED_SIGN_INS, SIGN_IN_WINDOW_MINUTES};
use crate::domain::models::{Role, TeamMember, User};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error("invalid credential")]
    InvalidCredential,
    #[error("rate limited")]
    RateLimited,
    /// Already mapped to the text shown to the user.
    #[error("{0}")]
    Rejected(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl IdentityError {
    /// Text shown to the person signing in. Details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            IdentityError::InvalidCredential => "invalid email or password",
            IdentityError::RateLimited => "too many sign-in attempts, try again later",
            IdentityError::Rejected(msg) => *msg,
            _ => "sign-in failed",
        }
    }
}

/// Acting user for one command. Passed explicitly into every operation that
/// needs an identity or role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn guest() -> Self {
        Session {
            user: User {
                id: "guest".to_string(),
                display_name: "Guest".to_string(),
                email: String::new(),
                role: Role::Reviewer,
                avatar_url: None,
            },
        }
    }

    pub fn is_guest(&self) -> bool {
        self.user.id == "guest"
    }
}

pub trait IdentityProvider {
    fn sign_in(&self, email: &str, secret: &str, now: DateTime<Utc>)
        -> Result<User, IdentityError>;
    fn sign_out(&self) -> Result<(), IdentityError>;
    fn current(&self) -> Result<Option<User>, IdentityError>;
}

pub fn session_from(provider: &dyn IdentityProvider) -> Result<Session, IdentityError> {
    Ok(provider
        .current()?
        .map(|user| Session { user })
        .unwrap_or_else(Session::guest))
}

/// Like [`session_from`], but a provider failure degrades to the guest session.
pub fn resolve_session(provider: &dyn IdentityProvider) -> Session {
    session_from(provider).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "identity unavailable; acting as guest");
        Session::guest()
    })
}

#[derive(Debug, Deserialize, Default)]
pub struct AccountsFile {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Account {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    pub display_name: String,
    pub password_sha256: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Account {
    pub fn role(&self) -> Role {
        match self.role {
            Some(r) => r,
            None if self.primary => Role::Admin,
            None => Role::Editor,
        }
    }

    pub fn to_user(&self) -> User {
        User {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| sha256_hex(&self.email.to_lowercase())[..16].to_string()),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.role(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionFile {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    failed_attempts: u32,
    #[serde(default)]
    first_failure_at: Option<DateTime<Utc>>,
}

pub fn sha256_hex(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Accounts from `accounts.toml`, session and sign-in throttle in `session.json`.
pub struct LocalIdentityProvider {
    dir: PathBuf,
}

impl LocalIdentityProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn accounts_path(&self) -> PathBuf {
        self.dir.join("accounts.toml")
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    pub fn accounts(&self) -> Result<Vec<Account>, IdentityError> {
        let path = self.accounts_path();
        if !path.exists() {
            return Ok(vec![]);
        }
        let raw = std::fs::read_to_string(path)?;
        let file: AccountsFile = toml::from_str(&raw)?;
        Ok(file.accounts)
    }

    pub fn team(&self) -> Result<Vec<TeamMember>, IdentityError> {
        Ok(self
            .accounts()?
            .into_iter()
            .map(|a| TeamMember {
                role: a.role(),
                email: a.email,
                display_name: a.display_name,
                primary: a.primary,
            })
            .collect())
    }

    fn load_session(&self) -> Result<SessionFile, IdentityError> {
        let p = self.session_path();
        if !p.exists() {
            return Ok(SessionFile::default());
        }
        let raw = std::fs::read_to_string(&p)?;
        match serde_json::from_str(&raw) {
            Ok(s) => Ok(s),
            Err(e) => {
                tracing::warn!(
                    path = %p.display(),
                    error = %e,
                    "session file unreadable; starting signed out"
                );
                Ok(SessionFile::default())
            }
        }
    }

    fn save_session(&self, s: &SessionFile) -> Result<(), IdentityError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.session_path(), serde_json::to_string_pretty(s)?)?;
        Ok(())
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn sign_in(
        &self,
        email: &str,
        secret: &str,
        now: DateTime<Utc>,
    ) -> Result<User, IdentityError> {
        let mut session = self.load_session()?;
        let window = Duration::minutes(SIGN_IN_WINDOW_MINUTES);
        match session.first_failure_at {
            Some(first) if now - first >= window => {
                session.failed_attempts = 0;
                session.first_failure_at = None;
            }
            Some(_) if session.failed_attempts >= MAX_FAILED_SIGN_INS => {
                tracing::warn!(email, "sign-in throttled");
                return Err(IdentityError::RateLimited);
            }
            _ => {}
        }

        let digest = sha256_hex(secret);
        let matched = self.accounts()?.into_iter().find(|a| {
            a.email.eq_ignore_ascii_case(email.trim())
                && a.password_sha256.eq_ignore_ascii_case(&digest)
        });

        let Some(account) = matched else {
            session.failed_attempts += 1;
            session.first_failure_at.get_or_insert(now);
            self.save_session(&session)?;
            tracing::warn!(email, attempts = session.failed_attempts, "sign-in rejected");
            return Err(IdentityError::InvalidCredential);
        };

        let user = account.to_user();
        let changed = session.user.as_ref().map(|u| &u.id) != Some(&user.id);
        session.user = Some(user.clone());
        session.failed_attempts = 0;
        session.first_failure_at = None;
        self.save_session(&session)?;
        if changed {
            tracing::info!(user = %user.id, role = %user.role, "current user changed");
        }
        Ok(user)
    }

    fn sign_out(&self) -> Result<(), IdentityError> {
        let mut session = self.load_session()?;
        if let Some(u) = session.user.take() {
            tracing::info!(user = %u.id, "current user changed: signed out");
        }
        self.save_session(&session)
    }

    fn current(&self) -> Result<Option<User>, IdentityError> {
        Ok(self.load_session()?.user)
    }
}
