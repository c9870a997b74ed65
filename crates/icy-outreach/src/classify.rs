//! Keyword heuristics that turn a raw channel into influencer attributes.

use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_CATEGORY: &str = "lifestyle";

/// Tested in order; the first set with any hit decides the category.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    (
        "tech",
        "tech|technology|programming|coding|software|ai|artificial intelligence|computer|developer|review|gadget|phone|iphone|android|laptop",
    ),
    ("beauty", "beauty|makeup|skincare|cosmetic|fashion|style|hair|nails|tutorial"),
    ("fitness", "fitness|workout|exercise|gym|health|nutrition|diet|muscle|training|yoga"),
    ("travel", "travel|adventure|explore|destination|vacation|journey|trip|world|country|city"),
    ("food", "food|cooking|recipe|chef|kitchen|restaurant|meal|cuisine|baking|eating"),
    ("gaming", "gaming|game|gamer|play|stream|esports|minecraft|fortnite|xbox|playstation"),
    ("education", "education|learn|study|tutorial|course|lesson|teach|academic|school|university"),
];

static CATEGORY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let re = Regex::new(&format!("(?i){keywords}")).expect("category keywords form a valid pattern");
            (*category, re)
        })
        .collect()
});

/// Substring match, case-insensitive, over `title + " " + description`.
pub fn classify_category(title: &str, description: &str) -> &'static str {
    let text = format!("{title} {description}");
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&text))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// `@` + the platform short name, else `@` + the title squashed to lower case.
pub fn derive_handle(custom_url: Option<&str>, title: &str) -> String {
    match custom_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("@{}", url.trim_start_matches('@')),
        None => {
            let squashed: String = title.chars().filter(|c| !c.is_whitespace()).collect();
            format!("@{}", squashed.to_lowercase())
        }
    }
}

/// Rough engagement estimate: 5% of followers. Not a measurement.
pub fn estimate_avg_views(followers: i64) -> i64 {
    (followers as f64 * 0.05).round() as i64
}

pub fn content_themes(category: &str) -> Vec<String> {
    let themes: [&str; 4] = match category {
        "tech" => ["product reviews", "tech tutorials", "software demos", "gadget unboxings"],
        "beauty" => ["makeup tutorials", "skincare routines", "product reviews", "beauty tips"],
        "fitness" => ["workout routines", "nutrition advice", "fitness challenges", "health tips"],
        "travel" => ["destination guides", "travel vlogs", "cultural experiences", "adventure stories"],
        "food" => ["recipe tutorials", "restaurant reviews", "cooking tips", "food challenges"],
        "gaming" => ["gameplay videos", "game reviews", "streaming highlights", "gaming tutorials"],
        "education" => ["educational content", "tutorials", "explanations", "learning resources"],
        _ => ["lifestyle content", "daily vlogs", "personal stories", "recommendations"],
    };
    themes.iter().map(|t| t.to_string()).collect()
}

/// Canned search phrases a category expands into during discovery.
pub fn search_phrases(category: &str) -> &'static [&'static str] {
    match category {
        "tech" => &["tech review", "technology channel", "programming tutorial", "gadget review", "ai technology"],
        "beauty" => &["makeup tutorial", "beauty channel", "skincare routine", "beauty review", "cosmetics"],
        "fitness" => &["fitness channel", "workout routine", "health fitness", "gym training", "nutrition"],
        "travel" => &["travel vlog", "travel guide", "adventure travel", "world travel", "destination"],
        "food" => &["cooking channel", "recipe tutorial", "food review", "chef", "cooking show"],
        "gaming" => &["gaming channel", "game review", "gameplay", "gaming tutorial", "esports"],
        "education" => &["educational channel", "learning", "tutorial", "how to", "explained"],
        _ => &["lifestyle vlog", "daily life", "personal channel"],
    }
}
