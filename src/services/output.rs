use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use crate::services::identity::IdentityError;
use crate::services::lifecycle::LifecycleError;
use crate::services::storage::StoreError;
use crate::services::workspace::WorkspaceError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<WorkspaceError>() {
            return match e {
                WorkspaceError::NotFound(_) => "NOT_FOUND",
                WorkspaceError::Ambiguous(_)
                | WorkspaceError::NoPlatform
                | WorkspaceError::InvalidInput(_) => "INVALID_INPUT",
                WorkspaceError::Locked(_) => "INVALID_TRANSITION",
                WorkspaceError::Lifecycle(l) => lifecycle_code(l),
            };
        }
        if let Some(e) = cause.downcast_ref::<LifecycleError>() {
            return lifecycle_code(e);
        }
        if cause.downcast_ref::<IdentityError>().is_some() {
            return "AUTH_FAILED";
        }
        if let Some(e) = cause.downcast_ref::<StoreError>() {
            return match e {
                StoreError::InvalidWorkspaceId(_) => "INVALID_INPUT",
                _ => "STORE_ERROR",
            };
        }
    }
    "INTERNAL"
}

fn lifecycle_code(e: &LifecycleError) -> &'static str {
    match e {
        LifecycleError::Forbidden { .. } => "FORBIDDEN",
        LifecycleError::InvalidTransition { .. } | LifecycleError::EmptyContent => {
            "INVALID_TRANSITION"
        }
    }
}

/// Failure envelope on stdout for `--json`, plain message on stderr otherwise.
pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let out = JsonErr {
            ok: false,
            error: ErrorBody {
                code: error_code(err).to_string(),
                message: format!("{err:#}"),
            },
        };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(_) => eprintln!("error: {err:#}"),
        }
    } else {
        eprintln!("error: {err:#}");
    }
}
