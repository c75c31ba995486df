//! Generative-AI host boundary. Only credential availability is modelled here.

use crate::domain::constants::GENAI_KEY_ENV;
use crate::domain::models::AiStatus;

pub trait GenerationHost {
    fn name(&self) -> &str;
    fn has_selected_credential(&self) -> bool;
    /// Asks the host to let the user pick a credential. Returns whether one is
    /// selected afterwards.
    fn open_credential_selection(&self) -> anyhow::Result<bool>;
}

/// Terminal host: a credential is "selected" when the env var holds a value.
pub struct EnvGenerationHost {
    value: Option<String>,
}

impl EnvGenerationHost {
    pub fn from_env() -> Self {
        Self {
            value: std::env::var(GENAI_KEY_ENV).ok(),
        }
    }
}

impl GenerationHost for EnvGenerationHost {
    fn name(&self) -> &str {
        "env"
    }

    fn has_selected_credential(&self) -> bool {
        self.value
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }

    fn open_credential_selection(&self) -> anyhow::Result<bool> {
        if !self.has_selected_credential() {
            tracing::info!("no interactive credential picker; export {GENAI_KEY_ENV}");
        }
        Ok(self.has_selected_credential())
    }
}

pub fn ai_status(host: &dyn GenerationHost) -> AiStatus {
    AiStatus {
        host: host.name().to_string(),
        credential_selected: host.has_selected_credential(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ai_status, EnvGenerationHost, GenerationHost};

    #[test]
    fn blank_value_is_not_a_credential() {
        let host = EnvGenerationHost {
            value: Some("  ".into()),
        };
        assert!(!host.has_selected_credential());
        assert!(!ai_status(&host).credential_selected);
    }

    #[test]
    fn present_value_is_selected() {
        let host = EnvGenerationHost {
            value: Some("sk-test".into()),
        };
        assert!(host.open_credential_selection().expect("select"));
        assert_eq!(ai_status(&host).host, "env");
    }
}
