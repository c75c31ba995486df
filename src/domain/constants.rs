pub const DEFAULT_WORKSPACE_ID: &str = "default";

pub const BASE_SCORE: i32 = 100;
pub const BRAND_VOICE_PENALTY: i32 = 10;
pub const COMPLIANCE_PENALTY: i32 = 40;
pub const AUDIENCE_FIT_PENALTY: i32 = 10;
pub const MEDIA_PENALTY: i32 = 30;
pub const HASHTAG_PENALTY: i32 = 5;

pub const HASHTAG_MIN: usize = 1;
pub const HASHTAG_MAX: usize = 30;

/// Glyph accepted in place of `!` by the brand-voice check.
pub const ENERGY_GLYPH: char = '✨';

/// Matched case-insensitively as substrings of the caption.
pub const RISK_TERMS: &[&str] = &[
    "guaranteed",
    "cure",
    "miracle",
    "risk-free",
    "100% safe",
    "instant results",
];

pub const STRONG_SCORE: i32 = 80;
pub const AVERAGE_SCORE: i32 = 50;

pub const MAX_FAILED_SIGN_INS: u32 = 5;
pub const SIGN_IN_WINDOW_MINUTES: i64 = 10;

pub const GENAI_KEY_ENV: &str = "POSTSTUDIO_GENAI_KEY";

pub const DRAFTS_KEY: &str = "drafts.json";
pub const CALENDAR_KEY: &str = "calendar.json";
pub const THEME_KEY: &str = "theme";
