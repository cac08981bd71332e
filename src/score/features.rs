use crate::types::config::ScoringConfig;
use crate::types::score::SurfaceFeatures;
use once_cell::sync::Lazy;
use regex::Regex;

// A number directly annotated with a unit ("15%", "$2.8B", "10x") as opposed
// to a bare digit somewhere in the text.
static METRIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+[%$MBK]|\$\d+|\d+x").expect("metric pattern should compile"));

pub fn extract(text: &str, cfg: &ScoringConfig) -> SurfaceFeatures {
    let lowered = text.to_lowercase();
    let char_count = text.chars().count();
    let word_count = text.split_whitespace().count();

    let crypto_keyword_count = cfg
        .crypto_keywords
        .iter()
        .filter(|keyword| lowered.contains(keyword.as_str()))
        .count();
    let generic_phrase_count = cfg
        .generic_phrases
        .iter()
        .filter(|phrase| lowered.contains(phrase.as_str()))
        .count();

    SurfaceFeatures {
        char_count,
        word_count,
        is_optimal_length: (cfg.optimal_min..=cfg.optimal_max).contains(&char_count),
        meets_minimum_length: char_count >= cfg.min_length,
        contains_digit: text.chars().any(|ch| ch.is_ascii_digit()),
        matches_metric_pattern: METRIC_PATTERN.is_match(text),
        contains_question_mark: text.contains('?'),
        contains_call_to_action: cfg
            .call_to_action
            .iter()
            .any(|word| lowered.contains(word.as_str())),
        contains_engagement_bait: cfg
            .engagement_bait
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str())),
        crypto_keyword_count,
        has_domain_focus: crypto_keyword_count >= 1,
        is_keyword_stuffed: crypto_keyword_count > cfg.keyword_stuffing_above,
        generic_phrase_count,
        is_original: generic_phrase_count < cfg.generic_phrases_above,
        has_repeating_character_spam: has_repeat_run(text, 4),
        mention_count: text
            .split_whitespace()
            .filter(|token| token.starts_with('@') && token.len() > 1)
            .count(),
        hashtag_count: text
            .split_whitespace()
            .filter(|token| token.starts_with('#') && token.len() > 1)
            .count(),
        link_count: lowered.matches("http").count(),
    }
}

/// Detects the same character repeating `run` or more times in a row. Hand
/// loop because the regex crate has no backreferences.
fn has_repeat_run(text: &str, run: usize) -> bool {
    let mut previous = None;
    let mut length = 0usize;
    for ch in text.chars() {
        if previous == Some(ch) {
            length += 1;
            if length >= run {
                return true;
            }
        } else {
            previous = Some(ch);
            length = 1;
        }
    }
    false
}

/// Recognized high-scoring content formats, by surface markers.
pub fn content_types(text: &str, features: &SurfaceFeatures) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut types = Vec::new();
    if lowered.contains("tvl") || lowered.contains("revenue") {
        types.push("Protocol analysis".to_string());
    }
    if features.matches_metric_pattern && (lowered.contains("vs") || lowered.contains("compare")) {
        types.push("Comparison analysis".to_string());
    }
    if lowered.contains("airdrop") && lowered.contains("risk") {
        types.push("Airdrop strategy".to_string());
    }
    if lowered.contains("thread") || lowered.contains("1/") {
        types.push("Thread format".to_string());
    }
    types
}
