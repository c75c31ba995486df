//! Fixed-penalty quality/moderation scoring.
//!
//! Checks run in a fixed order and each non-passing check subtracts its
//! penalty from [`BASE_SCORE`]. The result depends only on the content and
//! the config, so evaluating twice yields identical output.

use crate::domain::constants::{
    AUDIENCE_FIT_PENALTY, BASE_SCORE, BRAND_VOICE_PENALTY, COMPLIANCE_PENALTY, ENERGY_GLYPH,
    HASHTAG_MAX, HASHTAG_MIN, HASHTAG_PENALTY, MEDIA_PENALTY, RISK_TERMS,
};
use crate::domain::models::{
    CheckId, CheckResult, CheckStatus, ModerationConfig, ModerationResult, PostContent,
};

pub fn evaluate(content: &PostContent, config: &ModerationConfig) -> ModerationResult {
    let mut checks = Vec::new();
    if config.brand_voice {
        checks.push(check_brand_voice(content));
    }
    if config.compliance {
        checks.push(check_compliance(content, &config.extra_risk_terms));
    }
    if config.audience_fit {
        checks.push(check_audience_fit(content));
    }
    if config.media_presence {
        checks.push(check_media(content));
    }
    if config.hashtag_limit {
        checks.push(check_hashtags(content));
    }

    let penalty: i32 = checks
        .iter()
        .filter(|c| c.status != CheckStatus::Pass)
        .map(|c| penalty_for(c.id))
        .sum();
    let verdict = checks
        .iter()
        .map(|c| c.status)
        .max()
        .unwrap_or(CheckStatus::Pass);

    ModerationResult {
        verdict,
        score: (BASE_SCORE - penalty).clamp(0, BASE_SCORE),
        checks,
    }
}

fn penalty_for(id: CheckId) -> i32 {
    match id {
        CheckId::BrandVoice => BRAND_VOICE_PENALTY,
        CheckId::Compliance => COMPLIANCE_PENALTY,
        CheckId::AudienceFit => AUDIENCE_FIT_PENALTY,
        CheckId::MediaPresence => MEDIA_PENALTY,
        CheckId::HashtagLimit => HASHTAG_PENALTY,
    }
}

fn result(id: CheckId, status: CheckStatus, message: impl Into<String>) -> CheckResult {
    CheckResult {
        id,
        label: id.label().to_string(),
        status,
        message: message.into(),
    }
}

fn check_brand_voice(content: &PostContent) -> CheckResult {
    if content.caption.contains('!') || content.caption.contains(ENERGY_GLYPH) {
        result(
            CheckId::BrandVoice,
            CheckStatus::Pass,
            "Caption matches the brand's energetic voice",
        )
    } else {
        result(
            CheckId::BrandVoice,
            CheckStatus::Warn,
            format!("Caption sounds flat: add '!' or {ENERGY_GLYPH} to match the brand voice"),
        )
    }
}

fn check_compliance(content: &PostContent, extra_terms: &[String]) -> CheckResult {
    let caption = content.caption.to_lowercase();
    let hit = RISK_TERMS
        .iter()
        .map(|t| t.to_string())
        .chain(extra_terms.iter().map(|t| t.trim().to_lowercase()))
        .filter(|t| !t.is_empty())
        .find(|t| caption.contains(t.as_str()));

    match hit {
        Some(term) => result(
            CheckId::Compliance,
            CheckStatus::Fail,
            format!("Caption makes a risky claim: \"{term}\""),
        ),
        None => result(
            CheckId::Compliance,
            CheckStatus::Pass,
            "No risky claims found",
        ),
    }
}

fn check_audience_fit(content: &PostContent) -> CheckResult {
    if content.platforms.is_empty() {
        return result(
            CheckId::AudienceFit,
            CheckStatus::Warn,
            "No target platform selected",
        );
    }
    if let Some(p) = content
        .platforms
        .iter()
        .find(|p| !p.supports(content.format))
    {
        return result(
            CheckId::AudienceFit,
            CheckStatus::Warn,
            format!("{} posts are not supported on {}", content.format, p),
        );
    }

    let len = content.caption.chars().count();
    let tightest = content
        .platforms
        .iter()
        .min_by_key(|p| p.caption_limit())
        .copied();
    match tightest {
        Some(p) if len > p.caption_limit() => result(
            CheckId::AudienceFit,
            CheckStatus::Warn,
            format!(
                "Caption is {} characters; {} allows {}",
                len,
                p,
                p.caption_limit()
            ),
        ),
        _ => result(
            CheckId::AudienceFit,
            CheckStatus::Pass,
            "Caption and format fit every target platform",
        ),
    }
}

fn check_media(content: &PostContent) -> CheckResult {
    match content.media.len() {
        0 => result(
            CheckId::MediaPresence,
            CheckStatus::Fail,
            "No media attached",
        ),
        1 => result(
            CheckId::MediaPresence,
            CheckStatus::Pass,
            "1 media attachment",
        ),
        n => result(
            CheckId::MediaPresence,
            CheckStatus::Pass,
            format!("{n} media attachments"),
        ),
    }
}

fn check_hashtags(content: &PostContent) -> CheckResult {
    let n = content.hashtags.len();
    if n < HASHTAG_MIN {
        result(
            CheckId::HashtagLimit,
            CheckStatus::Warn,
            "No hashtags: add at least one",
        )
    } else if n > HASHTAG_MAX {
        result(
            CheckId::HashtagLimit,
            CheckStatus::Warn,
            format!("{n} hashtags exceeds the limit of {HASHTAG_MAX}"),
        )
    } else {
        result(
            CheckId::HashtagLimit,
            CheckStatus::Pass,
            format!("{n} of {HASHTAG_MAX} hashtags used"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::domain::models::{
        CheckId, CheckStatus, MediaAttachment, MediaKind, ModerationConfig, Platform, PostContent,
        PostFormat,
    };

    fn four_checks() -> ModerationConfig {
        ModerationConfig {
            audience_fit: false,
            ..ModerationConfig::default()
        }
    }

    fn nail_post(caption: &str) -> PostContent {
        PostContent {
            title: "Spring set".to_string(),
            caption: caption.to_string(),
            hashtags: vec!["#nails".into(), "#spring".into(), "#manicure".into()],
            cta: "Book now".to_string(),
            platforms: [Platform::Instagram].into_iter().collect(),
            format: PostFormat::FeedImage,
            media: vec![MediaAttachment {
                kind: MediaKind::Image,
                url: "https://cdn.example.com/nails.jpg".to_string(),
            }],
        }
    }

    fn status_of(content: &PostContent, config: &ModerationConfig, id: CheckId) -> CheckStatus {
        evaluate(content, config)
            .checks
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| c.status)
            .expect("check present")
    }

    #[test]
    fn energetic_post_passes_everything() {
        let r = evaluate(&nail_post("Nail tips!"), &four_checks());
        assert_eq!(r.verdict, CheckStatus::Pass);
        assert_eq!(r.score, 100);
        assert_eq!(r.checks.len(), 4);
        assert!(r.checks.iter().all(|c| c.status == CheckStatus::Pass));
    }

    #[test]
    fn risky_flat_caption_fails_with_both_penalties() {
        let r = evaluate(
            &nail_post("This cream will cure your nails"),
            &four_checks(),
        );
        assert_eq!(r.verdict, CheckStatus::Fail);
        assert_eq!(r.score, 50);
        assert_eq!(r.checks[0].id, CheckId::BrandVoice);
        assert_eq!(r.checks[0].status, CheckStatus::Warn);
        assert_eq!(r.checks[1].id, CheckId::Compliance);
        assert_eq!(r.checks[1].status, CheckStatus::Fail);
    }

    #[test]
    fn risky_terms_match_in_any_case() {
        let only_compliance = ModerationConfig {
            brand_voice: false,
            compliance: true,
            audience_fit: false,
            media_presence: false,
            hashtag_limit: false,
            extra_risk_terms: vec![],
        };
        let r = evaluate(&nail_post("Results GuArAnTeEd!"), &only_compliance);
        assert_eq!(r.checks[0].status, CheckStatus::Fail);
        assert_eq!(r.score, 60);
        assert!(r.checks[0].message.contains("guaranteed"));
    }

    #[test]
    fn risky_terms_match_inside_words() {
        let r = evaluate(&nail_post("Book your manicure today!"), &four_checks());
        assert_eq!(r.verdict, CheckStatus::Fail);
        assert_eq!(r.score, 60);
        assert!(r.checks[1].message.contains("\"cure\""));

        let tagged_only = nail_post("Fresh spring set!");
        assert!(tagged_only.hashtags.contains(&"#manicure".to_string()));
        assert_eq!(
            status_of(&tagged_only, &four_checks(), CheckId::Compliance),
            CheckStatus::Pass
        );
    }

    #[test]
    fn extra_risk_terms_extend_the_denylist() {
        let cfg = ModerationConfig {
            extra_risk_terms: vec!["Detox".to_string()],
            ..four_checks()
        };
        assert_eq!(
            status_of(&nail_post("Detox your cuticles!"), &cfg, CheckId::Compliance),
            CheckStatus::Fail
        );
    }

    #[test]
    fn energy_glyph_counts_as_brand_voice() {
        assert_eq!(
            status_of(&nail_post("Fresh set ✨"), &four_checks(), CheckId::BrandVoice),
            CheckStatus::Pass
        );
    }

    #[test]
    fn missing_media_fails() {
        let mut post = nail_post("Nail tips!");
        post.media.clear();
        let r = evaluate(&post, &four_checks());
        assert_eq!(
            status_of(&post, &four_checks(), CheckId::MediaPresence),
            CheckStatus::Fail
        );
        assert_eq!(r.verdict, CheckStatus::Fail);
        assert_eq!(r.score, 70);
    }

    #[test]
    fn hashtag_boundaries() {
        let cfg = four_checks();
        for (count, expected) in [
            (0, CheckStatus::Warn),
            (1, CheckStatus::Pass),
            (30, CheckStatus::Pass),
            (31, CheckStatus::Warn),
        ] {
            let mut post = nail_post("Nail tips!");
            post.hashtags = (0..count).map(|i| format!("#tag{i}")).collect();
            assert_eq!(
                status_of(&post, &cfg, CheckId::HashtagLimit),
                expected,
                "{count} hashtags"
            );
        }
    }

    #[test]
    fn hashtag_warnings_name_the_problem() {
        let cfg = four_checks();
        let mut none = nail_post("Nail tips!");
        none.hashtags.clear();
        let mut many = nail_post("Nail tips!");
        many.hashtags = (0..31).map(|i| format!("#t{i}")).collect();

        let msg = |p: &PostContent| {
            evaluate(p, &cfg)
                .checks
                .into_iter()
                .find(|c| c.id == CheckId::HashtagLimit)
                .map(|c| c.message)
                .unwrap_or_default()
        };
        assert_ne!(msg(&none), msg(&many));
        assert_eq!(evaluate(&none, &cfg).score, 95);
        assert_eq!(evaluate(&many, &cfg).score, 95);
    }

    #[test]
    fn verdict_is_worst_status_for_every_combination() {
        let cfg = four_checks();
        for mask in 0u8..16 {
            let mut post = nail_post("Nail tips!");
            if mask & 1 != 0 {
                post.caption = "Nail tips".to_string();
            }
            if mask & 2 != 0 {
                post.caption.push_str(" guaranteed");
            }
            if mask & 4 != 0 {
                post.media.clear();
            }
            if mask & 8 != 0 {
                post.hashtags.clear();
            }
            let r = evaluate(&post, &cfg);
            let any_fail = r.checks.iter().any(|c| c.status == CheckStatus::Fail);
            let any_warn = r.checks.iter().any(|c| c.status == CheckStatus::Warn);
            let expected = if any_fail {
                CheckStatus::Fail
            } else if any_warn {
                CheckStatus::Warn
            } else {
                CheckStatus::Pass
            };
            assert_eq!(r.verdict, expected, "mask {mask:04b}");
        }
    }

    #[test]
    fn disabled_checks_are_skipped() {
        let cfg = ModerationConfig {
            brand_voice: false,
            compliance: false,
            audience_fit: false,
            media_presence: false,
            hashtag_limit: false,
            extra_risk_terms: vec![],
        };
        let r = evaluate(&PostContent::default(), &cfg);
        assert!(r.checks.is_empty());
        assert_eq!(r.verdict, CheckStatus::Pass);
        assert_eq!(r.score, 100);
    }

    #[test]
    fn audience_fit_flags_long_captions_for_x() {
        let cfg = ModerationConfig::default();
        let mut post = nail_post(&format!("{}!", "a".repeat(300)));
        post.platforms = [Platform::Instagram, Platform::X].into_iter().collect();
        let check = evaluate(&post, &cfg)
            .checks
            .into_iter()
            .find(|c| c.id == CheckId::AudienceFit)
            .expect("audience fit check");
        assert_eq!(check.status, CheckStatus::Warn);
        assert!(check.message.contains("X allows 280"));
    }

    #[test]
    fn audience_fit_flags_unsupported_format() {
        let mut post = nail_post("Nail tips!");
        post.format = PostFormat::Text;
        assert_eq!(
            status_of(&post, &ModerationConfig::default(), CheckId::AudienceFit),
            CheckStatus::Warn
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let post = nail_post("This cream will cure your nails");
        let cfg = ModerationConfig::default();
        let a = serde_json::to_string(&evaluate(&post, &cfg)).expect("serialize");
        let b = serde_json::to_string(&evaluate(&post, &cfg)).expect("serialize");
        assert_eq!(a, b);
    }
}
