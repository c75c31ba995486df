use crate::domain::models::{Post, PostStatus, ReviewNote, Role};
use crate::services::identity::Session;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Submit,
    StartReview,
    RequestChanges { note: Option<String> },
    Resubmit,
    Approve,
    Schedule { at: DateTime<Utc> },
    Publish,
    Fail,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::Submit => "submit",
            Transition::StartReview => "start-review",
            Transition::RequestChanges { .. } => "request-changes",
            Transition::Resubmit => "resubmit",
            Transition::Approve => "approve",
            Transition::Schedule { .. } => "schedule",
            Transition::Publish => "publish",
            Transition::Fail => "fail",
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot {action} a post in status {from}")]
    InvalidTransition { from: PostStatus, action: String },
    #[error("role {role} cannot {action} posts")]
    Forbidden { role: Role, action: String },
    #[error("post has no content to submit")]
    EmptyContent,
}

/// Status reached by applying `transition` in `from`, or why it is refused.
pub fn next_status(
    from: PostStatus,
    transition: &Transition,
    role: Role,
) -> Result<PostStatus, LifecycleError> {
    use PostStatus::*;
    let to = match (from, transition) {
        (Draft, Transition::Submit) => ReadyToReview,
        (ReadyToReview, Transition::StartReview) => InReview,
        (ReadyToReview | InReview, Transition::RequestChanges { .. }) => NeedsFix,
        (NeedsFix, Transition::Resubmit) => InReview,
        (InReview, Transition::Approve) => {
            if !role.can_approve() {
                return Err(LifecycleError::Forbidden {
                    role,
                    action: transition.to_string(),
                });
            }
            Approved
        }
        (Approved | Failed, Transition::Schedule { .. }) => Scheduled,
        (Scheduled, Transition::Publish) => Published,
        (Scheduled, Transition::Fail) => Failed,
        _ => {
            return Err(LifecycleError::InvalidTransition {
                from,
                action: transition.to_string(),
            })
        }
    };
    Ok(to)
}

/// Moves `post` to its next status and records transition side data.
pub fn apply_transition(
    post: &mut Post,
    transition: &Transition,
    session: &Session,
    now: DateTime<Utc>,
) -> Result<PostStatus, LifecycleError> {
    let to = next_status(post.status, transition, session.user.role)?;
    if *transition == Transition::Submit && !has_content(post) {
        return Err(LifecycleError::EmptyContent);
    }

    match transition {
        Transition::RequestChanges { note: Some(note) } if !note.trim().is_empty() => {
            post.review_notes.push(ReviewNote {
                author: session.user.display_name.clone(),
                note: note.trim().to_string(),
                at: now,
            });
        }
        Transition::Schedule { at } => post.scheduled_at = Some(*at),
        _ => {}
    }

    post.status = to;
    post.updated_at = now;
    Ok(to)
}

fn has_content(post: &Post) -> bool {
    !post.content.title.trim().is_empty()
        || !post.content.caption.trim().is_empty()
        || !post.content.media.is_empty()
}
