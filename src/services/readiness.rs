use crate::domain::constants::{AVERAGE_SCORE, STRONG_SCORE};
use crate::domain::models::{
    CheckStatus, HealthLabel, HealthSummary, ModerationConfig, ModerationResult, Post,
    PostContent, ReadinessState, ReadinessSummary,
};
use crate::services::evaluator::evaluate;

pub fn readiness_summary(content: &PostContent, result: &ModerationResult) -> ReadinessSummary {
    let mut missing = Vec::new();
    if content.title.trim().is_empty() {
        missing.push("title".to_string());
    }
    if content.caption.trim().is_empty() {
        missing.push("caption".to_string());
    }
    if content.cta.trim().is_empty() {
        missing.push("call to action".to_string());
    }
    if content.hashtags.is_empty() {
        missing.push("hashtags".to_string());
    }
    if content.media.is_empty() {
        missing.push("media".to_string());
    }

    let blockers: Vec<String> = result
        .checks
        .iter()
        .filter(|c| c.status == CheckStatus::Fail)
        .map(|c| c.message.clone())
        .collect();

    let state = if !blockers.is_empty() {
        ReadinessState::Blocked
    } else if !missing.is_empty() || result.verdict == CheckStatus::Warn {
        ReadinessState::NeedsAttention
    } else {
        ReadinessState::Ready
    };

    ReadinessSummary {
        state,
        missing,
        blockers,
    }
}

pub fn health_summary(result: &ModerationResult) -> HealthSummary {
    let label = if result.score >= STRONG_SCORE {
        HealthLabel::Strong
    } else if result.score >= AVERAGE_SCORE {
        HealthLabel::Average
    } else {
        HealthLabel::Risky
    };
    HealthSummary {
        label,
        score: result.score,
        reasons: result
            .checks
            .iter()
            .filter(|c| c.status != CheckStatus::Pass)
            .map(|c| c.message.clone())
            .collect(),
    }
}

/// Recomputes the derived summaries of `post` from its current content.
pub fn refresh(post: &mut Post, config: &ModerationConfig) {
    let result = evaluate(&post.content, config);
    post.readiness = readiness_summary(&post.content, &result);
    post.health = health_summary(&result);
}

#[cfg(test)]
mod tests {
    use super::{health_summary, readiness_summary};
    use crate::domain::models::{
        HealthLabel, MediaAttachment, MediaKind, ModerationConfig, Platform, PostContent,
        ReadinessState,
    };
    use crate::services::evaluator::evaluate;

    fn complete() -> PostContent {
        PostContent {
            title: "Gel week".into(),
            caption: "Gel week is here!".into(),
            hashtags: vec!["#gel".into()],
            cta: "Book today".into(),
            platforms: [Platform::Instagram].into_iter().collect(),
            media: vec![MediaAttachment {
                kind: MediaKind::Image,
                url: "https://cdn.example.com/gel.jpg".into(),
            }],
            ..PostContent::default()
        }
    }

    #[test]
    fn complete_post_is_ready_and_strong() {
        let c = complete();
        let r = evaluate(&c, &ModerationConfig::default());
        let ready = readiness_summary(&c, &r);
        assert_eq!(ready.state, ReadinessState::Ready);
        assert!(ready.missing.is_empty());
        let health = health_summary(&r);
        assert_eq!(health.label, HealthLabel::Strong);
        assert_eq!(health.score, 100);
        assert!(health.reasons.is_empty());
    }

    #[test]
    fn missing_cta_needs_attention() {
        let mut c = complete();
        c.cta.clear();
        let r = evaluate(&c, &ModerationConfig::default());
        let ready = readiness_summary(&c, &r);
        assert_eq!(ready.state, ReadinessState::NeedsAttention);
        assert_eq!(ready.missing, vec!["call to action".to_string()]);
    }

    #[test]
    fn failed_checks_block() {
        let mut c = complete();
        c.caption = "Guaranteed growth!".into();
        c.media.clear();
        let r = evaluate(&c, &ModerationConfig::default());
        let ready = readiness_summary(&c, &r);
        assert_eq!(ready.state, ReadinessState::Blocked);
        assert_eq!(ready.blockers.len(), 2);
        let health = health_summary(&r);
        assert_eq!(health.score, 30);
        assert_eq!(health.label, HealthLabel::Risky);
        assert_eq!(health.reasons.len(), 2);
    }

    #[test]
    fn flat_caption_stays_strong_but_needs_attention() {
        let mut c = complete();
        c.caption = "Gel week is here".into();
        let r = evaluate(&c, &ModerationConfig::default());
        assert_eq!(health_summary(&r).label, HealthLabel::Strong);
        assert_eq!(
            readiness_summary(&c, &r).state,
            ReadinessState::NeedsAttention
        );
    }
}
