use crate::domain::models::{Platform, PostFormat, PostStatus, Theme};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "poststudio", version, about = "Social content studio CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Workspace id (overrides workspace.id from config.toml)"
    )]
    pub workspace: Option<String>,
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "More log output on stderr"
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Run the quality/moderation checks on a saved post or ad-hoc content
    Check(CheckArgs),
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub caption: Option<String>,
    #[arg(long = "hashtag", help = "Hashtag, with or without '#'; repeatable")]
    pub hashtags: Vec<String>,
    #[arg(long)]
    pub cta: Option<String>,
    #[arg(long = "platform", value_enum, help = "Target platform; repeatable")]
    pub platforms: Vec<Platform>,
    #[arg(long, value_enum)]
    pub format: Option<PostFormat>,
    #[arg(
        long = "media",
        help = "image:<url>, video:<url> or a bare url; repeatable"
    )]
    pub media: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum DraftCommands {
    Create {
        #[command(flatten)]
        content: ContentArgs,
    },
    List {
        #[arg(long)]
        query: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    Show {
        id: String,
    },
    Edit {
        id: String,
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long, default_value_t = false, help = "Remove all hashtags")]
        clear_hashtags: bool,
        #[arg(long, default_value_t = false, help = "Remove all media")]
        clear_media: bool,
    },
    Duplicate {
        id: String,
    },
    Remove {
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Saved post id (or unique prefix); omit to check the content flags instead
    pub id: Option<String>,
    #[command(flatten)]
    pub content: ContentArgs,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    List {
        #[arg(long, value_enum)]
        status: Option<PostStatus>,
    },
    Submit {
        id: String,
    },
    Start {
        id: String,
    },
    RequestChanges {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
    Resubmit {
        id: String,
    },
    Approve {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    List {
        #[arg(long, value_enum)]
        platform: Option<Platform>,
        #[arg(long, help = "RFC 3339 lower bound (inclusive)")]
        from: Option<DateTime<Utc>>,
        #[arg(long, help = "RFC 3339 upper bound (exclusive)")]
        to: Option<DateTime<Utc>>,
    },
    Schedule {
        id: String,
        #[arg(long, help = "Publish time, RFC 3339")]
        at: DateTime<Utc>,
    },
    Publish {
        id: String,
    },
    Fail {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommands {
    Status,
    Export,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long, env = "POSTSTUDIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    SignOut,
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    List,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    Show,
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
}

#[derive(Subcommand, Debug)]
pub enum AiCommands {
    Status,
    Select,
}
