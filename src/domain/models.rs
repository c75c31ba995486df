use crate::domain::constants::DEFAULT_WORKSPACE_ID;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
    Linkedin,
    X,
    Youtube,
    Pinterest,
}

impl Platform {
    /// Longest caption the platform accepts, in characters.
    pub fn caption_limit(self) -> usize {
        match self {
            Platform::X => 280,
            Platform::Pinterest => 500,
            Platform::Instagram | Platform::Tiktok => 2200,
            Platform::Linkedin => 3000,
            Platform::Youtube => 5000,
            Platform::Facebook => 63206,
        }
    }

    pub fn supports(self, format: PostFormat) -> bool {
        use PostFormat::*;
        match self {
            Platform::Instagram => matches!(format, FeedImage | Reel | Carousel | Story),
            Platform::Tiktok => matches!(format, Reel | Carousel),
            Platform::Facebook => true,
            Platform::Linkedin => matches!(format, FeedImage | Reel | Carousel | Text),
            Platform::X => matches!(format, FeedImage | Reel | Text),
            Platform::Youtube => matches!(format, Reel),
            Platform::Pinterest => matches!(format, FeedImage | Reel | Carousel),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Instagram => "Instagram",
            Platform::Tiktok => "TikTok",
            Platform::Facebook => "Facebook",
            Platform::Linkedin => "LinkedIn",
            Platform::X => "X",
            Platform::Youtube => "YouTube",
            Platform::Pinterest => "Pinterest",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PostFormat {
    #[default]
    FeedImage,
    Reel,
    Carousel,
    Story,
    Text,
}

impl fmt::Display for PostFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostFormat::FeedImage => "feed image",
            PostFormat::Reel => "reel",
            PostFormat::Carousel => "carousel",
            PostFormat::Story => "story",
            PostFormat::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    pub url: String,
}

/// Editable fields of a post. Everything else on [`Post`] is lifecycle or derived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub cta: String,
    pub platforms: BTreeSet<Platform>,
    #[serde(default)]
    pub format: PostFormat,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    ReadyToReview,
    InReview,
    NeedsFix,
    Approved,
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    pub fn collection(self) -> Collection {
        match self {
            PostStatus::Draft => Collection::Drafts,
            PostStatus::ReadyToReview
            | PostStatus::InReview
            | PostStatus::NeedsFix
            | PostStatus::Approved => Collection::Review,
            PostStatus::Scheduled | PostStatus::Published | PostStatus::Failed => {
                Collection::Calendar
            }
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::ReadyToReview => "READY_TO_REVIEW",
            PostStatus::InReview => "IN_REVIEW",
            PostStatus::NeedsFix => "NEEDS_FIX",
            PostStatus::Approved => "APPROVED",
            PostStatus::Scheduled => "SCHEDULED",
            PostStatus::Published => "PUBLISHED",
            PostStatus::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Drafts,
    Review,
    Calendar,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Drafts => "drafts",
            Collection::Review => "review",
            Collection::Calendar => "calendar",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessState {
    #[default]
    Ready,
    NeedsAttention,
    Blocked,
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReadinessState::Ready => "READY",
            ReadinessState::NeedsAttention => "NEEDS_ATTENTION",
            ReadinessState::Blocked => "BLOCKED",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    pub state: ReadinessState,
    pub missing: Vec<String>,
    pub blockers: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthLabel {
    #[default]
    Strong,
    Average,
    Risky,
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthLabel::Strong => "STRONG",
            HealthLabel::Average => "AVERAGE",
            HealthLabel::Risky => "RISKY",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub label: HealthLabel,
    pub score: i32,
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewNote {
    pub author: String,
    pub note: String,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(flatten)]
    pub content: PostContent,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_notes: Vec<ReviewNote>,
    /// Derived; recomputed on every edit and on load.
    #[serde(default)]
    pub readiness: ReadinessSummary,
    /// Derived; recomputed on every edit and on load.
    #[serde(default)]
    pub health: HealthSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whole-workspace document. Saved and loaded as one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub drafts: Vec<Post>,
    #[serde(default)]
    pub calendar_posts: Vec<Post>,
    #[serde(default)]
    pub review_posts: Vec<Post>,
}

impl Snapshot {
    pub fn collection(&self, c: Collection) -> &Vec<Post> {
        match c {
            Collection::Drafts => &self.drafts,
            Collection::Review => &self.review_posts,
            Collection::Calendar => &self.calendar_posts,
        }
    }

    pub fn collection_mut(&mut self, c: Collection) -> &mut Vec<Post> {
        match c {
            Collection::Drafts => &mut self.drafts,
            Collection::Review => &mut self.review_posts,
            Collection::Calendar => &mut self.calendar_posts,
        }
    }

    pub fn all_posts(&self) -> impl Iterator<Item = &Post> {
        self.drafts
            .iter()
            .chain(self.review_posts.iter())
            .chain(self.calendar_posts.iter())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckId {
    BrandVoice,
    Compliance,
    AudienceFit,
    MediaPresence,
    HashtagLimit,
}

impl CheckId {
    pub fn label(self) -> &'static str {
        match self {
            CheckId::BrandVoice => "Brand voice",
            CheckId::Compliance => "Compliance",
            CheckId::AudienceFit => "Audience fit",
            CheckId::MediaPresence => "Media",
            CheckId::HashtagLimit => "Hashtags",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub id: CheckId,
    pub label: String,
    pub status: CheckStatus,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModerationResult {
    pub verdict: CheckStatus,
    pub score: i32,
    pub checks: Vec<CheckResult>,
}

/// Check toggles. An absent `[moderation]` table enables everything; inside a
/// present table an omitted toggle is off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationConfig {
    #[serde(default)]
    pub brand_voice: bool,
    #[serde(default)]
    pub compliance: bool,
    #[serde(default)]
    pub audience_fit: bool,
    #[serde(default)]
    pub media_presence: bool,
    #[serde(default)]
    pub hashtag_limit: bool,
    #[serde(default)]
    pub extra_risk_terms: Vec<String>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            brand_voice: true,
            compliance: true,
            audience_fit: true,
            media_presence: true,
            hashtag_limit: true,
            extra_risk_terms: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSection {
    #[serde(default = "default_workspace_id")]
    pub id: String,
}

fn default_workspace_id() -> String {
    DEFAULT_WORKSPACE_ID.to_string()
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        Self {
            id: default_workspace_id(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub workspace: WorkspaceSection,
    #[serde(default)]
    pub moderation: ModerationConfig,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Reviewer,
}

impl Role {
    pub fn can_approve(self) -> bool {
        matches!(self, Role::Admin | Role::Reviewer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Reviewer => "reviewer",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

#[derive(Serialize)]
pub struct CheckReport {
    pub post_id: Option<String>,
    pub result: ModerationResult,
    pub readiness: ReadinessSummary,
    pub health: HealthSummary,
}

#[derive(Debug, Serialize)]
pub struct TransitionReport {
    pub id: String,
    pub from: PostStatus,
    pub to: PostStatus,
    pub collection: Collection,
}

#[derive(Serialize)]
pub struct RemovedReport {
    pub id: String,
    pub collection: Collection,
}

#[derive(Serialize)]
pub struct WorkspaceStatus {
    pub workspace: String,
    pub document_present: bool,
    pub drafts: usize,
    pub review_posts: usize,
    pub calendar_posts: usize,
    pub blocked: usize,
}

#[derive(Serialize)]
pub struct AiStatus {
    pub host: String,
    pub credential_selected: bool,
}

#[derive(Serialize)]
pub struct TeamMember {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub primary: bool,
}
