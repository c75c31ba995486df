use crate::*;
use anyhow::Context;
use chrono::Utc;

/// Per-command context: active config, acting session and the stores.
pub struct Studio {
    pub config: StudioConfig,
    pub workspace_id: String,
    pub session: Session,
    pub docs: FileDocumentStore,
    pub device: DeviceStore,
}

impl Studio {
    pub fn open(cli: &Cli, config: StudioConfig, session: Session) -> anyhow::Result<Self> {
        let workspace_id = cli
            .workspace
            .clone()
            .unwrap_or_else(|| config.workspace.id.clone());
        let docs = FileDocumentStore::from_home()?;
        docs.document_path(&workspace_id)?;
        Ok(Self {
            config,
            workspace_id,
            session,
            docs,
            device: DeviceStore::from_home()?,
        })
    }

    pub fn load(&self) -> Snapshot {
        load_workspace(
            &self.docs,
            &self.device,
            &self.workspace_id,
            &self.config.moderation,
        )
    }

    pub fn persist(
        &self,
        snapshot: &Snapshot,
        action: &str,
        data: serde_json::Value,
    ) -> anyhow::Result<()> {
        persist_workspace(&self.docs, &self.device, &self.workspace_id, snapshot)
            .context("saving workspace")?;
        audit(action, &self.session.user.id, data);
        Ok(())
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn headline(p: &Post) -> &str {
    if !p.content.title.is_empty() {
        &p.content.title
    } else {
        &p.content.caption
    }
}

fn post_row(p: &Post) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        short_id(&p.id),
        p.status,
        p.readiness.state,
        p.health.score,
        headline(p)
    )
}

fn content_from_args(args: &ContentArgs) -> anyhow::Result<PostContent> {
    Ok(PostContent {
        title: args.title.clone().unwrap_or_default(),
        caption: args.caption.clone().unwrap_or_default(),
        hashtags: args.hashtags.clone(),
        cta: args.cta.clone().unwrap_or_default(),
        platforms: args.platforms.iter().copied().collect(),
        format: args.format.unwrap_or_default(),
        media: parse_media_args(&args.media)?,
    })
}

fn parse_media_args(raw: &[String]) -> anyhow::Result<Vec<MediaAttachment>> {
    raw.iter()
        .map(|m| parse_media(m).map_err(|e| anyhow::Error::from(WorkspaceError::InvalidInput(e))))
        .collect()
}

fn patch_from_args(
    args: &ContentArgs,
    clear_hashtags: bool,
    clear_media: bool,
) -> anyhow::Result<PostPatch> {
    let hashtags = if clear_hashtags {
        Some(Vec::new())
    } else if args.hashtags.is_empty() {
        None
    } else {
        Some(args.hashtags.clone())
    };
    let media = if clear_media {
        Some(Vec::new())
    } else if args.media.is_empty() {
        None
    } else {
        Some(parse_media_args(&args.media)?)
    };
    Ok(PostPatch {
        title: args.title.clone(),
        caption: args.caption.clone(),
        hashtags,
        cta: args.cta.clone(),
        platforms: (!args.platforms.is_empty())
            .then(|| args.platforms.iter().copied().collect()),
        format: args.format,
        media,
    })
}

fn content_args_empty(args: &ContentArgs) -> bool {
    args.title.is_none()
        && args.caption.is_none()
        && args.hashtags.is_empty()
        && args.cta.is_none()
        && args.platforms.is_empty()
        && args.format.is_none()
        && args.media.is_empty()
}

fn print_post(json: bool, post: Post) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: post
            })?
        );
        return Ok(());
    }
    println!("id: {}", post.id);
    println!("status: {}", post.status);
    println!("title: {}", post.content.title);
    println!("caption: {}", post.content.caption);
    if !post.content.hashtags.is_empty() {
        println!("hashtags: {}", post.content.hashtags.join(" "));
    }
    if !post.content.cta.is_empty() {
        println!("cta: {}", post.content.cta);
    }
    let platforms: Vec<String> = post.content.platforms.iter().map(|p| p.to_string()).collect();
    println!("platforms: {}", platforms.join(", "));
    println!("format: {}", post.content.format);
    for m in &post.content.media {
        println!("media: {} {}", m.kind, m.url);
    }
    if let Some(at) = post.scheduled_at {
        println!("scheduled_at: {}", at.to_rfc3339());
    }
    println!(
        "readiness: {}{}",
        post.readiness.state,
        if post.readiness.missing.is_empty() {
            String::new()
        } else {
            format!(" (missing: {})", post.readiness.missing.join(", "))
        }
    );
    for b in &post.readiness.blockers {
        println!("blocker: {}", b);
    }
    println!("health: {} {}", post.health.label, post.health.score);
    for n in &post.review_notes {
        println!("note: {} ({}): {}", n.author, n.at.to_rfc3339(), n.note);
    }
    Ok(())
}

fn print_transition(json: bool, report: TransitionReport) -> anyhow::Result<()> {
    print_one(json, report, |r| {
        format!("{} {} -> {} ({})", short_id(&r.id), r.from, r.to, r.collection)
    })
}

fn check_report(
    content: &PostContent,
    post_id: Option<String>,
    config: &ModerationConfig,
) -> CheckReport {
    let result = evaluate(content, config);
    CheckReport {
        post_id,
        readiness: readiness_summary(content, &result),
        health: health_summary(&result),
        result,
    }
}

pub fn handle_post_commands(cli: &Cli, studio: &Studio) -> anyhow::Result<()> {
    let moderation = &studio.config.moderation;
    let now = Utc::now();
    let mut snapshot = studio.load();

    match &cli.command {
        Commands::Draft { command } => match command {
            DraftCommands::Create { content } => {
                let content = content_from_args(content)?;
                let post = create_draft(&mut snapshot, content, moderation, now)?;
                studio.persist(&snapshot, "draft.create", serde_json::json!({"id": post.id}))?;
                print_post(cli.json, post)?;
            }
            DraftCommands::List { query } => {
                let drafts: Vec<Post> = list_drafts(&snapshot, query.as_deref())
                    .into_iter()
                    .cloned()
                    .collect();
                print_out(cli.json, &drafts, post_row)?;
            }
        },
        Commands::Post { command } => match command {
            PostCommands::Show { id } => {
                let post = find_post(&snapshot, id)?.clone();
                print_post(cli.json, post)?;
            }
            PostCommands::Edit {
                id,
                content,
                clear_hashtags,
                clear_media,
            } => {
                let patch = patch_from_args(content, *clear_hashtags, *clear_media)?;
                let post = edit_post(&mut snapshot, id, patch, moderation, now)?;
                studio.persist(&snapshot, "post.edit", serde_json::json!({"id": post.id}))?;
                print_post(cli.json, post)?;
            }
            PostCommands::Duplicate { id } => {
                let post = duplicate_post(&mut snapshot, id, moderation, now)?;
                studio.persist(
                    &snapshot,
                    "post.duplicate",
                    serde_json::json!({"source": id, "id": post.id}),
                )?;
                print_post(cli.json, post)?;
            }
            PostCommands::Remove { id } => {
                let removed = delete_post(&mut snapshot, id)?;
                studio.persist(
                    &snapshot,
                    "post.remove",
                    serde_json::json!({"id": removed.id, "collection": removed.collection}),
                )?;
                print_one(cli.json, removed, |r| {
                    format!("removed {} from {}", short_id(&r.id), r.collection)
                })?;
            }
        },
        Commands::Check(args) => {
            let report = match &args.id {
                Some(id) => {
                    if !content_args_empty(&args.content) {
                        return Err(WorkspaceError::InvalidInput(
                            "pass either a post id or content flags, not both".to_string(),
                        )
                        .into());
                    }
                    let post = find_post(&snapshot, id)?;
                    check_report(&post.content, Some(post.id.clone()), moderation)
                }
                None => {
                    let mut content = content_from_args(&args.content)?;
                    content.hashtags = normalize_hashtags(&content.hashtags);
                    if content.platforms.is_empty() {
                        content.platforms.insert(Platform::Instagram);
                    }
                    check_report(&content, None, moderation)
                }
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                for c in &report.result.checks {
                    println!("{}\t{}\t{}", c.status, c.label, c.message);
                }
                println!(
                    "verdict: {} score: {} readiness: {}",
                    report.result.verdict, report.result.score, report.readiness.state
                );
            }
        }
        Commands::Review { command } => {
            let (id, transition, action) = match command {
                ReviewCommands::List { status } => {
                    let posts: Vec<Post> = list_review(&snapshot, *status)
                        .into_iter()
                        .cloned()
                        .collect();
                    return print_out(cli.json, &posts, post_row);
                }
                ReviewCommands::Submit { id } => (id, Transition::Submit, "review.submit"),
                ReviewCommands::Start { id } => (id, Transition::StartReview, "review.start"),
                ReviewCommands::RequestChanges { id, note } => (
                    id,
                    Transition::RequestChanges { note: note.clone() },
                    "review.request_changes",
                ),
                ReviewCommands::Resubmit { id } => (id, Transition::Resubmit, "review.resubmit"),
                ReviewCommands::Approve { id } => (id, Transition::Approve, "review.approve"),
            };
            let report = transition_post(&mut snapshot, id, &transition, &studio.session, now)?;
            studio.persist(
                &snapshot,
                action,
                serde_json::json!({"id": report.id, "from": report.from, "to": report.to}),
            )?;
            print_transition(cli.json, report)?;
        }
        Commands::Calendar { command } => {
            let (id, transition, action) = match command {
                CalendarCommands::List { platform, from, to } => {
                    let filter = CalendarFilter {
                        platform: *platform,
                        from: *from,
                        to: *to,
                    };
                    let posts: Vec<Post> = list_calendar(&snapshot, &filter)
                        .into_iter()
                        .cloned()
                        .collect();
                    return print_out(cli.json, &posts, |p| {
                        let at = p
                            .scheduled_at
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_else(|| "-".to_string());
                        format!("{}\t{}", at, post_row(p))
                    });
                }
                CalendarCommands::Schedule { id, at } => {
                    (id, Transition::Schedule { at: *at }, "calendar.schedule")
                }
                CalendarCommands::Publish { id } => (id, Transition::Publish, "calendar.publish"),
                CalendarCommands::Fail { id } => (id, Transition::Fail, "calendar.fail"),
            };
            let report = transition_post(&mut snapshot, id, &transition, &studio.session, now)?;
            studio.persist(
                &snapshot,
                action,
                serde_json::json!({"id": report.id, "from": report.from, "to": report.to}),
            )?;
            print_transition(cli.json, report)?;
        }
        Commands::Workspace { command } => match command {
            WorkspaceCommands::Status => {
                let document_present =
                    matches!(studio.docs.load(&studio.workspace_id), Ok(Some(_)));
                let status = WorkspaceStatus {
                    workspace: studio.workspace_id.clone(),
                    document_present,
                    drafts: snapshot.drafts.len(),
                    review_posts: snapshot.review_posts.len(),
                    calendar_posts: snapshot.calendar_posts.len(),
                    blocked: snapshot
                        .all_posts()
                        .filter(|p| p.readiness.state == ReadinessState::Blocked)
                        .count(),
                };
                print_one(cli.json, status, |s| {
                    format!(
                        "workspace={} drafts={} review={} calendar={} blocked={}",
                        s.workspace, s.drafts, s.review_posts, s.calendar_posts, s.blocked
                    )
                })?;
            }
            WorkspaceCommands::Export => {
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&JsonOut {
                            ok: true,
                            data: &snapshot
                        })?
                    );
                } else {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                }
            }
        },
        _ => anyhow::bail!("not a workspace command"),
    }

    Ok(())
}
