use crate::domain::models::{
    Collection, MediaAttachment, MediaKind, ModerationConfig, Platform, Post, PostContent,
    PostFormat, PostStatus, RemovedReport, Snapshot, TransitionReport,
};
use crate::services::identity::Session;
use crate::services::lifecycle::{apply_transition, LifecycleError, Transition};
use crate::services::readiness::refresh;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[derive(thiserror::Error, Debug)]
pub enum WorkspaceError {
    #[error("post not found: {0}")]
    NotFound(String),
    #[error("post id prefix {0:?} is ambiguous")]
    Ambiguous(String),
    #[error("post {0} is published and can no longer be edited")]
    Locked(String),
    #[error("a post needs at least one target platform")]
    NoPlatform,
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Partial edit; `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub cta: Option<String>,
    pub platforms: Option<BTreeSet<Platform>>,
    pub format: Option<PostFormat>,
    pub media: Option<Vec<MediaAttachment>>,
}

#[derive(Clone, Debug, Default)]
pub struct CalendarFilter {
    pub platform: Option<Platform>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub fn normalize_hashtags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|h| h.split_whitespace())
        .map(|h| h.trim_start_matches('#'))
        .filter(|h| !h.is_empty())
        .map(|h| format!("#{h}"))
        .collect()
}

/// Accepts `image:<url>`, `video:<url>` or a bare url (kind guessed from the extension).
pub fn parse_media(raw: &str) -> Result<MediaAttachment, String> {
    let raw = raw.trim();
    let (kind, url) = if let Some(url) = raw.strip_prefix("image:") {
        (MediaKind::Image, url)
    } else if let Some(url) = raw.strip_prefix("video:") {
        (MediaKind::Video, url)
    } else {
        let lower = raw.to_ascii_lowercase();
        let video = [".mp4", ".mov", ".webm", ".m4v"]
            .iter()
            .any(|ext| lower.ends_with(ext));
        let kind = if video {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        (kind, raw)
    };
    if url.trim().is_empty() {
        return Err(format!("media url missing in {raw:?}"));
    }
    Ok(MediaAttachment {
        kind,
        url: url.trim().to_string(),
    })
}

pub fn new_post(content: PostContent, config: &ModerationConfig, now: DateTime<Utc>) -> Post {
    let mut post = Post {
        id: uuid::Uuid::new_v4().to_string(),
        content,
        status: PostStatus::Draft,
        scheduled_at: None,
        review_notes: Vec::new(),
        readiness: Default::default(),
        health: Default::default(),
        created_at: now,
        updated_at: now,
    };
    refresh(&mut post, config);
    post
}

pub fn create_draft(
    snapshot: &mut Snapshot,
    mut content: PostContent,
    config: &ModerationConfig,
    now: DateTime<Utc>,
) -> Result<Post, WorkspaceError> {
    if content.platforms.is_empty() {
        return Err(WorkspaceError::NoPlatform);
    }
    content.hashtags = normalize_hashtags(&content.hashtags);
    let post = new_post(content, config, now);
    snapshot.drafts.push(post.clone());
    Ok(post)
}

/// Resolves a full id or a unique id prefix to its collection and index.
pub fn locate(snapshot: &Snapshot, id: &str) -> Result<(Collection, usize), WorkspaceError> {
    let mut hits = Vec::new();
    for c in [Collection::Drafts, Collection::Review, Collection::Calendar] {
        for (i, p) in snapshot.collection(c).iter().enumerate() {
            if p.id == id {
                return Ok((c, i));
            }
            if !id.is_empty() && p.id.starts_with(id) {
                hits.push((c, i));
            }
        }
    }
    match hits.len() {
        0 => Err(WorkspaceError::NotFound(id.to_string())),
        1 => Ok(hits[0]),
        _ => Err(WorkspaceError::Ambiguous(id.to_string())),
    }
}

pub fn find_post<'a>(snapshot: &'a Snapshot, id: &str) -> Result<&'a Post, WorkspaceError> {
    let (c, i) = locate(snapshot, id)?;
    Ok(&snapshot.collection(c)[i])
}

pub fn edit_post(
    snapshot: &mut Snapshot,
    id: &str,
    patch: PostPatch,
    config: &ModerationConfig,
    now: DateTime<Utc>,
) -> Result<Post, WorkspaceError> {
    let (c, i) = locate(snapshot, id)?;
    let post = &mut snapshot.collection_mut(c)[i];
    if post.status == PostStatus::Published {
        return Err(WorkspaceError::Locked(post.id.clone()));
    }
    if matches!(&patch.platforms, Some(p) if p.is_empty()) {
        return Err(WorkspaceError::NoPlatform);
    }

    let content = &mut post.content;
    if let Some(v) = patch.title {
        content.title = v;
    }
    if let Some(v) = patch.caption {
        content.caption = v;
    }
    if let Some(v) = patch.hashtags {
        content.hashtags = normalize_hashtags(&v);
    }
    if let Some(v) = patch.cta {
        content.cta = v;
    }
    if let Some(v) = patch.platforms {
        content.platforms = v;
    }
    if let Some(v) = patch.format {
        content.format = v;
    }
    if let Some(v) = patch.media {
        content.media = v;
    }
    post.updated_at = now;
    refresh(post, config);
    Ok(post.clone())
}

pub fn duplicate_post(
    snapshot: &mut Snapshot,
    id: &str,
    config: &ModerationConfig,
    now: DateTime<Utc>,
) -> Result<Post, WorkspaceError> {
    let content = find_post(snapshot, id)?.content.clone();
    let post = new_post(content, config, now);
    snapshot.drafts.push(post.clone());
    Ok(post)
}

pub fn delete_post(snapshot: &mut Snapshot, id: &str) -> Result<RemovedReport, WorkspaceError> {
    let (c, i) = locate(snapshot, id)?;
    let removed = snapshot.collection_mut(c).remove(i);
    Ok(RemovedReport {
        id: removed.id,
        collection: c,
    })
}

/// Applies a lifecycle transition and moves the post to the collection its
/// new status belongs to (appended at the end).
pub fn transition_post(
    snapshot: &mut Snapshot,
    id: &str,
    transition: &Transition,
    session: &Session,
    now: DateTime<Utc>,
) -> Result<TransitionReport, WorkspaceError> {
    let (c, i) = locate(snapshot, id)?;
    let post = &mut snapshot.collection_mut(c)[i];
    let from = post.status;
    let to = apply_transition(post, transition, session, now)?;
    let target = to.collection();
    let post_id = post.id.clone();
    if target != c {
        let moved = snapshot.collection_mut(c).remove(i);
        snapshot.collection_mut(target).push(moved);
    }
    tracing::info!(post = %post_id, %from, %to, actor = %session.user.id, "post transitioned");
    Ok(TransitionReport {
        id: post_id,
        from,
        to,
        collection: target,
    })
}

pub fn reevaluate_all(snapshot: &mut Snapshot, config: &ModerationConfig) {
    for c in [Collection::Drafts, Collection::Review, Collection::Calendar] {
        for post in snapshot.collection_mut(c).iter_mut() {
            refresh(post, config);
        }
    }
}

/// Drafts matching `query` (title, caption or hashtags), most recently edited first.
pub fn list_drafts<'a>(snapshot: &'a Snapshot, query: Option<&str>) -> Vec<&'a Post> {
    let q = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    let mut out: Vec<&Post> = snapshot
        .drafts
        .iter()
        .filter(|p| {
            q.is_empty()
                || p.content.title.to_lowercase().contains(&q)
                || p.content.caption.to_lowercase().contains(&q)
                || p.content
                    .hashtags
                    .iter()
                    .any(|h| h.to_lowercase().contains(&q))
        })
        .collect();
    out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    out
}

pub fn list_review<'a>(snapshot: &'a Snapshot, status: Option<PostStatus>) -> Vec<&'a Post> {
    snapshot
        .review_posts
        .iter()
        .filter(|p| status.map(|s| p.status == s).unwrap_or(true))
        .collect()
}

/// Calendar posts within the filter window, earliest slot first.
pub fn list_calendar<'a>(snapshot: &'a Snapshot, filter: &CalendarFilter) -> Vec<&'a Post> {
    let mut out: Vec<&Post> = snapshot
        .calendar_posts
        .iter()
        .filter(|p| {
            filter
                .platform
                .map(|pl| p.content.platforms.contains(&pl))
                .unwrap_or(true)
        })
        .filter(|p| match (filter.from, p.scheduled_at) {
            (Some(from), Some(at)) => at >= from,
            (Some(_), None) => false,
            _ => true,
        })
        .filter(|p| match (filter.to, p.scheduled_at) {
            (Some(to), Some(at)) => at < to,
            (Some(_), None) => false,
            _ => true,
        })
        .collect();
    out.sort_by_key(|p| p.scheduled_at);
    out
}
