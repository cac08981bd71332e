use crate::error::YapError;
use serde::Deserialize;
use std::collections::HashMap;

/// Merged view of yapscan.toml. Every section is optional; a missing file
/// resolves to the compiled-in defaults through the accessor methods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YapConfig {
    pub scoring: Option<ScoringSection>,
    pub vocabulary: Option<VocabularySection>,
    pub penalties: Option<PenaltySection>,
    pub tiers: Option<Vec<TierSpec>>,
    pub aggregate: Option<AggregateSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSection {
    pub weights: Option<HashMap<String, f64>>,
    pub min_length: Option<usize>,
    pub optimal_min: Option<usize>,
    pub optimal_max: Option<usize>,
    pub yaps_factor: Option<f64>,
    pub yaps_multiplier: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularySection {
    pub crypto_keywords: Option<Vec<String>>,
    pub generic_phrases: Option<Vec<String>>,
    pub call_to_action: Option<Vec<String>>,
    pub engagement_bait: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenaltySection {
    pub keyword_stuffing_above: Option<usize>,
    pub generic_phrases_above: Option<usize>,
    pub max_mentions: Option<usize>,
    pub max_hashtags: Option<usize>,
    pub max_links: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TierSpec {
    pub min_score: f64,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregateSection {
    pub distribution_markers: Option<Vec<String>>,
    pub distribution_preview: Option<usize>,
    pub percentiles: Option<Vec<u8>>,
}

/// Score weights for the three sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub optimization: f64,
    pub engagement: f64,
    pub quality: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            optimization: 0.30,
            engagement: 0.50,
            quality: 0.20,
        }
    }
}

/// Fully resolved scorer configuration.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: Weights,
    pub min_length: usize,
    pub optimal_min: usize,
    pub optimal_max: usize,
    pub yaps_factor: f64,
    pub yaps_multiplier: f64,
    pub crypto_keywords: Vec<String>,
    pub generic_phrases: Vec<String>,
    pub call_to_action: Vec<String>,
    pub engagement_bait: Vec<String>,
    pub keyword_stuffing_above: usize,
    pub generic_phrases_above: usize,
    pub max_mentions: usize,
    pub max_hashtags: usize,
    pub max_links: usize,
    pub tiers: Vec<TierSpec>,
}

fn default_crypto_keywords() -> Vec<String> {
    [
        "defi",
        "layer",
        "l2",
        "ai",
        "rwa",
        "tvl",
        "airdrop",
        "protocol",
        "chain",
        "token",
        "nft",
        "dao",
        "staking",
        "yield",
        "bridge",
        "zk",
        "rollup",
        "evm",
        "smart contract",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_generic_phrases() -> Vec<String> {
    [
        "to the moon",
        "lfg",
        "gm",
        "ser",
        "ngmi",
        "wagmi",
        "bullish",
        "bearish",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// English prompt words plus their Indonesian counterparts; the secondary
// language is plain configuration, not a code path.
fn default_call_to_action() -> Vec<String> {
    [
        "what",
        "how",
        "why",
        "thoughts",
        "think",
        "opinion",
        "apa",
        "menurut",
        "kalian",
        "kenapa",
        "bagaimana",
        "mengapa",
        "gimana",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// Substring matches, so "rt" also catches retweet begging mid-sentence.
fn default_engagement_bait() -> Vec<String> {
    ["follow", "rt", "like if"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_tiers() -> Vec<TierSpec> {
    vec![
        TierSpec {
            min_score: 9.0,
            label: "Excellent - high YAPS potential".to_string(),
        },
        TierSpec {
            min_score: 7.0,
            label: "Good - solid content".to_string(),
        },
        TierSpec {
            min_score: 5.0,
            label: "Fair - needs improvement".to_string(),
        },
        TierSpec {
            min_score: 0.0,
            label: "Needs improvement - optimize further".to_string(),
        },
    ]
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            min_length: 50,
            optimal_min: 150,
            optimal_max: 280,
            // Empirical constants reverse-engineered from on-chain point
            // data; opaque configuration, not derived here.
            yaps_factor: 0.7,
            yaps_multiplier: 75.0,
            crypto_keywords: default_crypto_keywords(),
            generic_phrases: default_generic_phrases(),
            call_to_action: default_call_to_action(),
            engagement_bait: default_engagement_bait(),
            keyword_stuffing_above: 5,
            generic_phrases_above: 2,
            max_mentions: 3,
            max_hashtags: 2,
            max_links: 1,
            tiers: default_tiers(),
        }
    }
}

/// Resolved aggregator configuration.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub distribution_markers: Vec<String>,
    pub distribution_preview: usize,
    pub percentiles: Vec<u8>,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            distribution_markers: vec!["point".to_string(), "score".to_string()],
            distribution_preview: 10,
            percentiles: vec![10, 25, 50, 75, 90, 95, 99],
        }
    }
}

impl YapConfig {
    pub fn scoring_config(&self) -> ScoringConfig {
        let mut resolved = ScoringConfig::default();

        if let Some(scoring) = &self.scoring {
            if let Some(weights) = &scoring.weights {
                resolved.weights = Weights {
                    optimization: *weights
                        .get("optimization")
                        .unwrap_or(&resolved.weights.optimization),
                    engagement: *weights
                        .get("engagement")
                        .unwrap_or(&resolved.weights.engagement),
                    quality: *weights.get("quality").unwrap_or(&resolved.weights.quality),
                };
            }
            resolved.min_length = scoring.min_length.unwrap_or(resolved.min_length);
            resolved.optimal_min = scoring.optimal_min.unwrap_or(resolved.optimal_min);
            resolved.optimal_max = scoring.optimal_max.unwrap_or(resolved.optimal_max);
            resolved.yaps_factor = scoring.yaps_factor.unwrap_or(resolved.yaps_factor);
            resolved.yaps_multiplier = scoring.yaps_multiplier.unwrap_or(resolved.yaps_multiplier);
        }

        if let Some(vocabulary) = &self.vocabulary {
            if let Some(keywords) = &vocabulary.crypto_keywords {
                resolved.crypto_keywords = keywords.clone();
            }
            if let Some(phrases) = &vocabulary.generic_phrases {
                resolved.generic_phrases = phrases.clone();
            }
            if let Some(words) = &vocabulary.call_to_action {
                resolved.call_to_action = words.clone();
            }
            if let Some(phrases) = &vocabulary.engagement_bait {
                resolved.engagement_bait = phrases.clone();
            }
        }

        if let Some(penalties) = &self.penalties {
            resolved.keyword_stuffing_above = penalties
                .keyword_stuffing_above
                .unwrap_or(resolved.keyword_stuffing_above);
            resolved.generic_phrases_above = penalties
                .generic_phrases_above
                .unwrap_or(resolved.generic_phrases_above);
            resolved.max_mentions = penalties.max_mentions.unwrap_or(resolved.max_mentions);
            resolved.max_hashtags = penalties.max_hashtags.unwrap_or(resolved.max_hashtags);
            resolved.max_links = penalties.max_links.unwrap_or(resolved.max_links);
        }

        if let Some(tiers) = &self.tiers {
            if !tiers.is_empty() {
                resolved.tiers = tiers.clone();
            }
        }

        resolved
    }

    pub fn aggregate_config(&self) -> AggregateConfig {
        let mut resolved = AggregateConfig::default();
        if let Some(aggregate) = &self.aggregate {
            if let Some(markers) = &aggregate.distribution_markers {
                resolved.distribution_markers = markers.clone();
            }
            resolved.distribution_preview = aggregate
                .distribution_preview
                .unwrap_or(resolved.distribution_preview);
            if let Some(percentiles) = &aggregate.percentiles {
                resolved.percentiles = percentiles.clone();
            }
        }
        resolved
    }

    pub fn validate(&self) -> Result<(), YapError> {
        let scoring = self.scoring_config();

        let weights = [
            ("optimization", scoring.weights.optimization),
            ("engagement", scoring.weights.engagement),
            ("quality", scoring.weights.quality),
        ];
        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(YapError::ConfigParse(format!(
                    "scoring.weights.{name} must be between 0.0 and 1.0"
                )));
            }
        }
        let weight_sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(YapError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if let Some(section) = &self.scoring {
            if let Some(weight_map) = &section.weights {
                const ALLOWED_WEIGHT_KEYS: [&str; 3] = ["optimization", "engagement", "quality"];
                let unknown = weight_map
                    .keys()
                    .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                    .cloned()
                    .collect::<Vec<_>>();
                if !unknown.is_empty() {
                    return Err(YapError::ConfigParse(format!(
                        "scoring.weights contains unknown key(s): {}",
                        unknown.join(", ")
                    )));
                }
            }
        }

        if scoring.optimal_min > scoring.optimal_max {
            return Err(YapError::ConfigParse(format!(
                "scoring.optimal_min ({}) exceeds scoring.optimal_max ({})",
                scoring.optimal_min, scoring.optimal_max
            )));
        }

        if scoring.yaps_factor <= 0.0 || scoring.yaps_multiplier <= 0.0 {
            return Err(YapError::ConfigParse(
                "scoring.yaps_factor and scoring.yaps_multiplier must be positive".to_string(),
            ));
        }

        if scoring.tiers.is_empty() {
            return Err(YapError::ConfigParse(
                "tiers must contain at least one entry".to_string(),
            ));
        }
        for tier in &scoring.tiers {
            if tier.label.trim().is_empty() {
                return Err(YapError::ConfigParse(
                    "tiers entries must carry a non-empty label".to_string(),
                ));
            }
        }

        let aggregate = self.aggregate_config();
        if aggregate.percentiles.iter().any(|p| *p > 100) {
            return Err(YapError::ConfigParse(
                "aggregate.percentiles values must be between 0 and 100".to_string(),
            ));
        }
        if aggregate.distribution_preview == 0 {
            return Err(YapError::ConfigParse(
                "aggregate.distribution_preview must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
