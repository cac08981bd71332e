pub mod features;

use crate::types::config::ScoringConfig;
use crate::types::score::{ScoreBreakdown, SubScores, SurfaceFeatures};

const MAX_SUB_SCORE: f64 = 10.0;
pub const WELL_OPTIMIZED: &str = "Content is well-optimized";

/// Scores a text snippet against the reverse-engineered YAPS heuristics.
/// Pure function of the text and config; total over all inputs, including
/// the empty string (which scores at the floor).
pub fn score(text: &str, cfg: &ScoringConfig) -> ScoreBreakdown {
    let features = features::extract(text, cfg);
    let content_types = features::content_types(text, &features);

    let sub_scores = SubScores {
        optimization: optimization_score(&features),
        engagement: engagement_score(&features),
        quality: quality_score(&features),
    };

    let raw_total = sub_scores.optimization * cfg.weights.optimization
        + sub_scores.engagement * cfg.weights.engagement
        + sub_scores.quality * cfg.weights.quality;
    let total = (raw_total * 10.0).round() / 10.0;

    let estimated_yaps = (total * cfg.yaps_factor * cfg.yaps_multiplier).round() as i64;
    let rating = rating_for(total, cfg);
    let penalties = penalties(&features, cfg);
    let mut suggestions = suggestions(&features, &content_types, cfg);

    let well_optimized = penalties.is_empty() && suggestions.is_empty();
    if well_optimized {
        suggestions.push(WELL_OPTIMIZED.to_string());
    }

    ScoreBreakdown {
        sub_scores,
        total,
        rating,
        estimated_yaps,
        features,
        content_types,
        penalties,
        suggestions,
        well_optimized,
    }
}

fn optimization_score(features: &SurfaceFeatures) -> f64 {
    let mut score: f64 = 0.0;
    if features.meets_minimum_length {
        score += 2.0;
    }
    if features.is_optimal_length {
        score += 3.0;
    }
    if features.has_domain_focus {
        score += 3.0;
    }
    if features.is_original {
        score += 2.0;
    }
    score.clamp(0.0, MAX_SUB_SCORE)
}

fn engagement_score(features: &SurfaceFeatures) -> f64 {
    let mut score: f64 = 0.0;
    if features.contains_question_mark {
        score += 4.0;
    }
    if features.contains_digit {
        score += 3.0;
    }
    if features.contains_call_to_action {
        score += 3.0;
    }
    score.clamp(0.0, MAX_SUB_SCORE)
}

fn quality_score(features: &SurfaceFeatures) -> f64 {
    let mut score: f64 = 0.0;
    if features.matches_metric_pattern {
        score += 4.0;
    }
    if features.word_count > 15 {
        score += 3.0;
    }
    if !features.has_repeating_character_spam {
        score += 3.0;
    }
    score.clamp(0.0, MAX_SUB_SCORE)
}

fn rating_for(total: f64, cfg: &ScoringConfig) -> String {
    let mut tiers = cfg.tiers.clone();
    tiers.sort_by(|a, b| {
        b.min_score
            .partial_cmp(&a.min_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    tiers
        .iter()
        .find(|tier| total >= tier.min_score)
        .or_else(|| tiers.last())
        .map(|tier| tier.label.clone())
        .unwrap_or_default()
}

fn penalties(features: &SurfaceFeatures, cfg: &ScoringConfig) -> Vec<String> {
    let mut flags = Vec::new();
    if features.is_keyword_stuffed {
        flags.push("Keyword stuffing detected".to_string());
    }
    if features.mention_count > cfg.max_mentions {
        flags.push(format!(
            "Too many mentions ({} tags, max {})",
            features.mention_count, cfg.max_mentions
        ));
    }
    if features.generic_phrase_count > cfg.generic_phrases_above {
        flags.push("Too many generic phrases".to_string());
    }
    if features.contains_engagement_bait {
        flags.push("Engagement farming detected".to_string());
    }
    if !features.meets_minimum_length {
        flags.push(format!("Too short (min {} chars)", cfg.min_length));
    }
    if !features.has_domain_focus {
        flags.push("No crypto-specific topic".to_string());
    }
    if features.link_count > cfg.max_links {
        flags.push("Multiple links reduce reach".to_string());
    }
    if features.hashtag_count > cfg.max_hashtags {
        flags.push(format!("Too many hashtags (max {})", cfg.max_hashtags));
    }
    flags
}

fn suggestions(
    features: &SurfaceFeatures,
    content_types: &[String],
    cfg: &ScoringConfig,
) -> Vec<String> {
    let mut suggestions = Vec::new();
    if !features.contains_question_mark {
        suggestions.push("Add a question to drive discussion".to_string());
    }
    if !features.contains_digit {
        suggestions.push("Include metrics or data for credibility".to_string());
    }
    // Only texts below the optimal range are asked to grow; running long is
    // not the same shortfall.
    if features.char_count < cfg.optimal_min {
        suggestions.push("Expand to the optimal character range".to_string());
    }
    if content_types.is_empty() {
        suggestions.push("Try a protocol deep-dive or comparison format".to_string());
    }
    if !features.is_original {
        suggestions.push("Add personal analysis or a unique insight".to_string());
    }
    if !features.contains_call_to_action {
        suggestions.push("Add a call-to-action to invite conversation".to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::{TierSpec, YapConfig};

    fn cfg() -> ScoringConfig {
        YapConfig::default().scoring_config()
    }

    #[test]
    fn sub_scores_stay_within_bounds_and_total_matches_weights() {
        let cfg = cfg();
        let samples = [
            "",
            "gm wagmi lfg",
            "DeFi TVL hit $2.8B this week, up 15%. What's driving this growth?",
            &"a".repeat(300),
        ];
        for text in samples {
            let breakdown = score(text, &cfg);
            for sub in [
                breakdown.sub_scores.optimization,
                breakdown.sub_scores.engagement,
                breakdown.sub_scores.quality,
            ] {
                assert!((0.0..=10.0).contains(&sub), "sub-score out of range: {sub}");
            }
            let expected = breakdown.sub_scores.optimization * 0.3
                + breakdown.sub_scores.engagement * 0.5
                + breakdown.sub_scores.quality * 0.2;
            let expected = (expected * 10.0).round() / 10.0;
            assert!((breakdown.total - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let cfg = cfg();
        let text = "Monad TVL naik 40% minggu ini. Menurut kalian kenapa?";
        let first = score(text, &cfg);
        let second = score(text, &cfg);
        assert_eq!(first.total, second.total);
        assert_eq!(first.penalties, second.penalties);
        assert_eq!(first.suggestions, second.suggestions);
        assert_eq!(first.estimated_yaps, second.estimated_yaps);
    }

    #[test]
    fn strong_sample_scores_high_on_every_axis() {
        let cfg = cfg();
        let text = "DeFi TVL hit $2.8B this week, up 15%. What's driving this growth?";
        let breakdown = score(text, &cfg);
        assert!(breakdown.features.contains_digit);
        assert!(breakdown.features.matches_metric_pattern);
        assert!(breakdown.features.contains_question_mark);
        assert!(breakdown.features.has_domain_focus);
        // Minimum length +2, domain focus +3, original +2; the sample is
        // well short of the 150-char optimal bonus.
        assert!((breakdown.sub_scores.optimization - 7.0).abs() < f64::EPSILON);
        assert!((breakdown.sub_scores.engagement - 10.0).abs() < f64::EPSILON);
        assert!(breakdown.sub_scores.quality >= 7.0);
    }

    #[test]
    fn low_effort_sample_scores_at_the_floor() {
        let cfg = cfg();
        let breakdown = score("gm wagmi lfg", &cfg);
        assert!(!breakdown.features.meets_minimum_length);
        assert!(!breakdown.features.is_original);
        assert!(breakdown.total < 5.0);
        assert_eq!(breakdown.rating, "Needs improvement - optimize further");
        assert!(breakdown
            .penalties
            .iter()
            .any(|flag| flag.contains("Too short")));
    }

    #[test]
    fn empty_string_scores_without_error() {
        let cfg = cfg();
        let breakdown = score("", &cfg);
        assert!(breakdown.total >= 0.0);
        assert!(!breakdown.well_optimized);
        assert!(!breakdown.penalties.is_empty());
    }

    #[test]
    fn estimated_yaps_follows_the_linear_projection() {
        let cfg = cfg();
        let breakdown = score("DeFi TVL hit $2.8B this week, up 15%. What's driving this growth?", &cfg);
        let expected = (breakdown.total * 0.7 * 75.0).round() as i64;
        assert_eq!(breakdown.estimated_yaps, expected);
    }

    #[test]
    fn rating_tiers_pick_the_highest_matching_tier() {
        let mut cfg = cfg();
        cfg.tiers = vec![
            TierSpec {
                min_score: 0.0,
                label: "low".to_string(),
            },
            TierSpec {
                min_score: 5.0,
                label: "mid".to_string(),
            },
            TierSpec {
                min_score: 9.0,
                label: "top".to_string(),
            },
        ];
        assert_eq!(rating_for(9.5, &cfg), "top");
        assert_eq!(rating_for(6.0, &cfg), "mid");
        assert_eq!(rating_for(1.0, &cfg), "low");
    }

    #[test]
    fn well_optimized_content_gets_a_single_confirmation() {
        let cfg = cfg();
        // Long enough, domain-focused, metric-bearing, question plus CTA.
        let text = "DeFi lending is quietly compounding: protocol revenue up 32% QoQ while TVL \
                    pushed past $4.1B. The spread between borrow demand and emissions is widening. \
                    What happens to yield when incentives dry up?";
        let breakdown = score(text, &cfg);
        assert!(breakdown.penalties.is_empty(), "{:?}", breakdown.penalties);
        assert_eq!(breakdown.suggestions, vec![WELL_OPTIMIZED.to_string()]);
        assert!(breakdown.well_optimized);
    }

    #[test]
    fn each_penalty_has_a_triggering_input() {
        let cfg = cfg();

        let stuffed = score(
            "defi layer tvl airdrop protocol chain token staking yield bridge",
            &cfg,
        );
        assert!(stuffed
            .penalties
            .iter()
            .any(|flag| flag.contains("Keyword stuffing")));

        let mentions = score("@a1 @b2 @c3 @d4 thoughts?", &cfg);
        assert!(mentions
            .penalties
            .iter()
            .any(|flag| flag.contains("mentions")));

        let links = score(
            "check https://a.example and https://b.example for the defi dashboard",
            &cfg,
        );
        assert!(links.penalties.iter().any(|flag| flag.contains("links")));

        let hashtags = score("#defi #tvl #zk protocol update", &cfg);
        assert!(hashtags
            .penalties
            .iter()
            .any(|flag| flag.contains("hashtags")));

        let generic = score("gm ser, lfg to the moon, wagmi", &cfg);
        assert!(generic
            .penalties
            .iter()
            .any(|flag| flag.contains("generic phrases")));

        let bait = score("like if you agree with this defi take, then follow", &cfg);
        assert!(bait
            .penalties
            .iter()
            .any(|flag| flag.contains("Engagement farming")));
    }

    #[test]
    fn over_length_text_is_not_asked_to_expand() {
        let cfg = cfg();
        let filler = "Liquidity keeps rotating between the major venues. ".repeat(6);
        let text = format!(
            "{filler}DeFi TVL grew 12% while protocol revenue held steady. What breaks first?"
        );
        let breakdown = score(&text, &cfg);
        assert!(breakdown.features.char_count > cfg.optimal_max);
        assert!(!breakdown
            .suggestions
            .iter()
            .any(|suggestion| suggestion.contains("Expand")));
    }

    #[test]
    fn custom_weights_flow_through_the_total() {
        let mut cfg = cfg();
        cfg.weights.optimization = 1.0;
        cfg.weights.engagement = 0.0;
        cfg.weights.quality = 0.0;
        let breakdown = score("gm", &cfg);
        assert!((breakdown.total - breakdown.sub_scores.optimization).abs() < 1e-9);
    }
}
