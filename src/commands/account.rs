use crate::*;
use chrono::Utc;

/// Handles commands that never touch the workspace document. Returns `false`
/// when the command belongs elsewhere.
pub fn handle_account_commands(
    cli: &Cli,
    identity: &LocalIdentityProvider,
    device: &DeviceStore,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::SignIn { email, password } => {
                let user = identity
                    .sign_in(email, password, Utc::now())
                    .map_err(|e| {
                        tracing::debug!(error = %e, "sign-in failed");
                        IdentityError::Rejected(e.user_message())
                    })?;
                audit("auth.sign_in", &user.id, serde_json::json!({"email": user.email}));
                print_one(cli.json, user, |u| {
                    format!("signed in as {} <{}> ({})", u.display_name, u.email, u.role)
                })?;
            }
            AuthCommands::SignOut => {
                let actor = resolve_session(identity).user.id;
                identity.sign_out()?;
                audit("auth.sign_out", &actor, serde_json::json!({}));
                print_one(cli.json, "signed_out", |s| s.to_string())?;
            }
            AuthCommands::Whoami => {
                let session = resolve_session(identity);
                let guest = session.is_guest();
                print_one(cli.json, session.user, |u| {
                    if guest {
                        format!("guest ({})", u.role)
                    } else {
                        format!("{} <{}> ({})", u.display_name, u.email, u.role)
                    }
                })?;
            }
        },
        Commands::Team { command } => match command {
            TeamCommands::List => {
                let team = identity.team()?;
                print_out(cli.json, &team, |m| {
                    format!(
                        "{}\t{}\t{}{}",
                        m.email,
                        m.display_name,
                        m.role,
                        if m.primary { "\tprimary" } else { "" }
                    )
                })?;
            }
        },
        Commands::Theme { command } => match command {
            ThemeCommands::Show => {
                print_one(cli.json, device.read_theme(), |t| t.to_string())?;
            }
            ThemeCommands::Set { theme } => {
                device.write_theme(*theme)?;
                print_one(cli.json, *theme, |t| format!("theme set to {}", t))?;
            }
        },
        Commands::Ai { command } => {
            let host = EnvGenerationHost::from_env();
            match command {
                AiCommands::Status => {
                    print_one(cli.json, ai_status(&host), |s| {
                        format!("host={} credential_selected={}", s.host, s.credential_selected)
                    })?;
                }
                AiCommands::Select => {
                    let selected = host.open_credential_selection()?;
                    if !selected && !cli.json {
                        eprintln!("set {} to select a generation credential", GENAI_KEY_ENV);
                    }
                    print_one(cli.json, ai_status(&host), |s| {
                        format!("credential_selected={}", s.credential_selected)
                    })?;
                }
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
