use crate::domain::constants::{CALENDAR_KEY, DRAFTS_KEY, THEME_KEY};
use crate::domain::models::{ModerationConfig, Post, Snapshot, Theme};
use crate::services::workspace::reevaluate_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid workspace id: {0:?}")]
    InvalidWorkspaceId(String),
    #[error("HOME is not set")]
    NoHome,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("corrupt document {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

fn home() -> Result<PathBuf, StoreError> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| StoreError::NoHome)
}

pub fn config_dir() -> Result<PathBuf, StoreError> {
    Ok(home()?.join(".config/poststudio"))
}

pub fn data_dir() -> Result<PathBuf, StoreError> {
    Ok(home()?.join(".local").join("share").join("poststudio"))
}

pub fn audit(action: &str, actor: &str, data: serde_json::Value) {
    let Ok(dir) = config_dir() else {
        return;
    };
    let path = dir.join("audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "actor": actor,
        "data": data
    });
    let line = format!("{}\n", event);
    let res = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
    if let Err(e) = res {
        tracing::debug!(error = %e, "audit write skipped");
    }
}

/// Whole-document workspace persistence. Saves replace the entire snapshot;
/// concurrent writers resolve as last-write-wins.
pub trait DocumentStore {
    fn load(&self, workspace_id: &str) -> Result<Option<Snapshot>, StoreError>;
    fn save(&self, workspace_id: &str, snapshot: &Snapshot) -> Result<(), StoreError>;
}

pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_home() -> Result<Self, StoreError> {
        Ok(Self::new(data_dir()?.join("workspaces")))
    }

    pub fn document_path(&self, workspace_id: &str) -> Result<PathBuf, StoreError> {
        check_workspace_id(workspace_id)?;
        Ok(self.root.join(format!("{workspace_id}.json")))
    }
}

impl DocumentStore for FileDocumentStore {
    fn load(&self, workspace_id: &str) -> Result<Option<Snapshot>, StoreError> {
        read_json(self.document_path(workspace_id)?)
    }

    fn save(&self, workspace_id: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let p = self.document_path(workspace_id)?;
        write_atomic(&p, serde_json::to_string_pretty(snapshot)?.as_bytes())
    }
}

/// Workspace ids become file and directory names.
pub fn check_workspace_id(workspace_id: &str) -> Result<(), StoreError> {
    let valid = !workspace_id.is_empty()
        && workspace_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(StoreError::InvalidWorkspaceId(workspace_id.to_string()));
    }
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(p: PathBuf) -> Result<Option<T>, StoreError> {
    if !p.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&p)?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: p.display().to_string(),
            source,
        })
}

/// On-device keys. Drafts and calendar lists live under `<dir>/<workspace_id>/`;
/// the theme string is shared by every workspace.
pub struct DeviceStore {
    dir: PathBuf,
}

impl DeviceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_home() -> Result<Self, StoreError> {
        Ok(Self::new(data_dir()?.join("device")))
    }

    fn posts_dir(&self, workspace_id: &str) -> Result<PathBuf, StoreError> {
        check_workspace_id(workspace_id)?;
        Ok(self.dir.join(workspace_id))
    }

    fn write_key<T: Serialize>(dir: &Path, key: &str, value: &T) -> Result<(), StoreError> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(key), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn read_drafts(&self, workspace_id: &str) -> Result<Vec<Post>, StoreError> {
        let p = self.posts_dir(workspace_id)?.join(DRAFTS_KEY);
        Ok(read_json(p)?.unwrap_or_default())
    }

    pub fn read_calendar(&self, workspace_id: &str) -> Result<Vec<Post>, StoreError> {
        let p = self.posts_dir(workspace_id)?.join(CALENDAR_KEY);
        Ok(read_json(p)?.unwrap_or_default())
    }

    pub fn write_posts(&self, workspace_id: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let dir = self.posts_dir(workspace_id)?;
        Self::write_key(&dir, DRAFTS_KEY, &snapshot.drafts)?;
        Self::write_key(&dir, CALENDAR_KEY, &snapshot.calendar_posts)
    }

    pub fn read_theme(&self) -> Theme {
        let raw = std::fs::read_to_string(self.dir.join(THEME_KEY)).unwrap_or_default();
        match raw.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn write_theme(&self, theme: Theme) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(THEME_KEY), theme.to_string())?;
        Ok(())
    }
}

/// Loads the workspace document, falling back to the device keys when the
/// document is absent or unreadable. Derived summaries are recomputed.
pub fn load_workspace(
    docs: &dyn DocumentStore,
    device: &DeviceStore,
    workspace_id: &str,
    config: &ModerationConfig,
) -> Snapshot {
    let mut snapshot = match docs.load(workspace_id) {
        Ok(Some(s)) => s,
        Ok(None) => seed_from_device(device, workspace_id),
        Err(e) => {
            tracing::warn!(
                workspace = workspace_id,
                error = %e,
                "workspace load failed; using device state"
            );
            seed_from_device(device, workspace_id)
        }
    };
    reevaluate_all(&mut snapshot, config);
    snapshot
}

fn seed_from_device(device: &DeviceStore, workspace_id: &str) -> Snapshot {
    let drafts = device.read_drafts(workspace_id).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "device drafts unreadable");
        Vec::new()
    });
    let calendar_posts = device.read_calendar(workspace_id).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "device calendar unreadable");
        Vec::new()
    });
    Snapshot {
        drafts,
        calendar_posts,
        review_posts: Vec::new(),
    }
}

/// Writes the device keys, then replaces the workspace document. A failed
/// document save is logged and otherwise ignored.
pub fn persist_workspace(
    docs: &dyn DocumentStore,
    device: &DeviceStore,
    workspace_id: &str,
    snapshot: &Snapshot,
) -> Result<(), StoreError> {
    device.write_posts(workspace_id, snapshot)?;
    if let Err(e) = docs.save(workspace_id, snapshot) {
        tracing::warn!(workspace = workspace_id, error = %e, "workspace save failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_workspace, persist_workspace, DeviceStore, DocumentStore, FileDocumentStore,
        StoreError,
    };
    use crate::domain::models::{
        MediaAttachment, MediaKind, ModerationConfig, Platform, PostContent, PostStatus,
        Snapshot, Theme,
    };
    use crate::services::workspace::new_post;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let cfg = ModerationConfig::default();
        let t = Utc.with_ymd_and_hms(2026, 4, 2, 13, 45, 7).unwrap();
        let draft = new_post(
            PostContent {
                title: "Chrome tips".into(),
                caption: "Chrome powder 101!".into(),
                hashtags: vec!["#chrome".into()],
                platforms: [Platform::Tiktok].into_iter().collect(),
                media: vec![MediaAttachment {
                    kind: MediaKind::Video,
                    url: "https://cdn.example.com/chrome.mp4".into(),
                }],
                ..PostContent::default()
            },
            &cfg,
            t,
        );
        let mut scheduled = draft.clone();
        scheduled.id = "cal-1".into();
        scheduled.status = PostStatus::Scheduled;
        scheduled.scheduled_at = Some(Utc.with_ymd_and_hms(2026, 4, 9, 18, 0, 0).unwrap());
        let mut review = draft.clone();
        review.id = "rev-1".into();
        review.status = PostStatus::InReview;
        Snapshot {
            drafts: vec![draft],
            calendar_posts: vec![scheduled],
            review_posts: vec![review],
        }
    }

    #[test]
    fn snapshot_round_trips_by_value() {
        let tmp = TempDir::new().expect("temp dir");
        let store = FileDocumentStore::new(tmp.path());
        let snap = sample_snapshot();
        store.save("team", &snap).expect("save");
        let loaded = store.load("team").expect("load").expect("present");
        assert_eq!(loaded, snap);
        assert_eq!(
            loaded.calendar_posts[0].scheduled_at,
            snap.calendar_posts[0].scheduled_at
        );
        assert!(!tmp.path().join("team.json.tmp").exists());
    }

    #[test]
    fn missing_document_is_absent() {
        let tmp = TempDir::new().expect("temp dir");
        let store = FileDocumentStore::new(tmp.path());
        assert!(store.load("fresh").expect("load").is_none());
    }

    #[test]
    fn workspace_ids_cannot_escape_the_store() {
        let tmp = TempDir::new().expect("temp dir");
        let store = FileDocumentStore::new(tmp.path());
        let err = store.load("../etc").expect_err("rejected");
        assert!(matches!(err, StoreError::InvalidWorkspaceId(_)));
    }

    #[test]
    fn device_keys_seed_workspace_when_document_missing() {
        let tmp = TempDir::new().expect("temp dir");
        let docs = FileDocumentStore::new(tmp.path().join("docs"));
        let device = DeviceStore::new(tmp.path().join("device"));
        let snap = sample_snapshot();
        device.write_posts("team", &snap).expect("write device");

        let loaded = load_workspace(&docs, &device, "team", &ModerationConfig::default());
        assert_eq!(loaded.drafts, snap.drafts);
        assert_eq!(loaded.calendar_posts, snap.calendar_posts);
        assert!(loaded.review_posts.is_empty());
    }

    #[test]
    fn corrupt_document_falls_back_to_device_state() {
        let tmp = TempDir::new().expect("temp dir");
        let docs = FileDocumentStore::new(tmp.path().join("docs"));
        let device = DeviceStore::new(tmp.path().join("device"));
        let snap = sample_snapshot();
        persist_workspace(&docs, &device, "team", &snap).expect("persist");
        std::fs::write(tmp.path().join("docs/team.json"), "{not json").expect("corrupt");

        let loaded = load_workspace(&docs, &device, "team", &ModerationConfig::default());
        assert_eq!(loaded.drafts.len(), 1);
        assert!(loaded.review_posts.is_empty());
    }

    #[test]
    fn device_keys_are_scoped_per_workspace() {
        let tmp = TempDir::new().expect("temp dir");
        let docs = FileDocumentStore::new(tmp.path().join("docs"));
        let device = DeviceStore::new(tmp.path().join("device"));
        persist_workspace(&docs, &device, "team", &sample_snapshot()).expect("persist");
        assert!(tmp.path().join("device/team/drafts.json").exists());

        let other = load_workspace(&docs, &device, "other", &ModerationConfig::default());
        assert_eq!(other, Snapshot::default());
        assert!(matches!(
            device.read_drafts("../team"),
            Err(StoreError::InvalidWorkspaceId(_))
        ));
    }

    struct ReadOnlyDocs;

    impl DocumentStore for ReadOnlyDocs {
        fn load(&self, _workspace_id: &str) -> Result<Option<Snapshot>, StoreError> {
            Ok(None)
        }

        fn save(&self, _workspace_id: &str, _snapshot: &Snapshot) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only volume",
            )))
        }
    }

    #[test]
    fn failed_document_save_still_writes_device_keys() {
        let tmp = TempDir::new().expect("temp dir");
        let device = DeviceStore::new(tmp.path());
        let snap = sample_snapshot();
        persist_workspace(&ReadOnlyDocs, &device, "team", &snap).expect("save failure tolerated");
        assert!(tmp.path().join("team/drafts.json").exists());
        assert_eq!(device.read_drafts("team").expect("drafts"), snap.drafts);
        assert_eq!(device.read_calendar("team").expect("calendar"), snap.calendar_posts);
    }

    #[test]
    fn theme_defaults_to_light() {
        let tmp = TempDir::new().expect("temp dir");
        let device = DeviceStore::new(tmp.path());
        assert_eq!(device.read_theme(), Theme::Light);
        device.write_theme(Theme::Dark).expect("write theme");
        assert_eq!(device.read_theme(), Theme::Dark);
    }
}
