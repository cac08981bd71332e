use serde::Serialize;

/// Surface features derived by direct inspection of the text. All booleans
/// and counts; no external calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SurfaceFeatures {
    pub char_count: usize,
    pub word_count: usize,
    pub is_optimal_length: bool,
    pub meets_minimum_length: bool,
    pub contains_digit: bool,
    pub matches_metric_pattern: bool,
    pub contains_question_mark: bool,
    pub contains_call_to_action: bool,
    pub contains_engagement_bait: bool,
    pub crypto_keyword_count: usize,
    pub has_domain_focus: bool,
    pub is_keyword_stuffed: bool,
    pub generic_phrase_count: usize,
    pub is_original: bool,
    pub has_repeating_character_spam: bool,
    pub mention_count: usize,
    pub hashtag_count: usize,
    pub link_count: usize,
}

/// The three sub-scores, each clamped to [0, 10].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubScores {
    pub optimization: f64,
    pub engagement: f64,
    pub quality: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub sub_scores: SubScores,
    /// Weighted total, rounded to one decimal place.
    pub total: f64,
    pub rating: String,
    pub estimated_yaps: i64,
    pub features: SurfaceFeatures,
    pub content_types: Vec<String>,
    pub penalties: Vec<String>,
    pub suggestions: Vec<String>,
    /// True when neither penalties nor suggestions applied.
    pub well_optimized: bool,
}
