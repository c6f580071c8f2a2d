//! Heuristic pillar scoring
//!
//! Every pillar starts from the same deterministic baseline derived from
//! [`TextFeatures`], then gets an independent perturbation from a
//! [`NoiseSource`]. The result is clamped to `[MIN_SCORE, MAX_SCORE]` and
//! rounded to one decimal.
//!
//! | feature                  | bonus |
//! |--------------------------|-------|
//! | words > 300              | +0.5  |
//! | words > 500              | +0.5  |
//! | complex ratio > 0.15     | +0.3  |
//! | sentences > 20           | +0.2  |

use tracing::debug;

use crate::features::TextFeatures;
use crate::model::{AnalysisResult, PillarScore};
use crate::noise::{NoiseSource, MAX_PERTURBATION};
use crate::pillars::Pillar;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

const BASE_SCORE: f64 = 2.5;
const LONG_ESSAY_WORDS: usize = 300;
const VERY_LONG_ESSAY_WORDS: usize = 500;
const LENGTH_BONUS: f64 = 0.5;
const COMPLEX_RATIO_THRESHOLD: f64 = 0.15;
const COMPLEXITY_BONUS: f64 = 0.3;
const MANY_SENTENCES: usize = 20;
const SENTENCE_BONUS: f64 = 0.2;

/// Maps text features to pillar scores
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic score before perturbation, clamping, and rounding
    pub fn baseline(&self, features: &TextFeatures) -> f64 {
        let mut score = BASE_SCORE;

        // Cumulative: an essay over 500 words gets both length bonuses
        if features.word_count > LONG_ESSAY_WORDS {
            score += LENGTH_BONUS;
        }
        if features.word_count > VERY_LONG_ESSAY_WORDS {
            score += LENGTH_BONUS;
        }
        if features.complex_word_ratio > COMPLEX_RATIO_THRESHOLD {
            score += COMPLEXITY_BONUS;
        }
        if features.sentence_count > MANY_SENTENCES {
            score += SENTENCE_BONUS;
        }

        score
    }

    /// Score every pillar, drawing one perturbation per pillar
    pub fn score_pillars<N: NoiseSource + ?Sized>(
        &self,
        features: &TextFeatures,
        noise: &mut N,
    ) -> Vec<PillarScore> {
        let baseline = self.baseline(features);

        Pillar::ALL
            .iter()
            .map(|&pillar| {
                let perturbation = noise
                    .perturbation()
                    .clamp(-MAX_PERTURBATION, MAX_PERTURBATION);
                let score =
                    round_one_decimal((baseline + perturbation).clamp(MIN_SCORE, MAX_SCORE));
                PillarScore {
                    name: pillar,
                    score,
                    description: pillar.description().to_string(),
                }
            })
            .collect()
    }

    /// Full heuristic result: pillars, overall mean, and essay length
    pub fn score<N: NoiseSource + ?Sized>(
        &self,
        features: &TextFeatures,
        noise: &mut N,
    ) -> AnalysisResult {
        let pillars = self.score_pillars(features, noise);
        let overall_score = overall_score(&pillars);

        debug!(
            "Heuristic score: baseline={:.1}, overall={:.1}, words={}",
            self.baseline(features),
            overall_score,
            features.word_count
        );

        AnalysisResult {
            pillars,
            overall_score,
            essay_length: features.word_count,
        }
    }
}

/// Mean of the pillar scores, rounded to one decimal
pub fn overall_score(pillars: &[PillarScore]) -> f64 {
    if pillars.is_empty() {
        return 0.0;
    }
    let sum: f64 = pillars.iter().map(|p| p.score).sum();
    round_one_decimal(sum / pillars.len() as f64)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FixedNoise, NoNoise};
    use pretty_assertions::assert_eq;

    fn features(word_count: usize, sentence_count: usize, ratio: f64) -> TextFeatures {
        TextFeatures {
            word_count,
            sentence_count,
            complex_word_ratio: ratio,
        }
    }

    #[test]
    fn test_baseline_without_bonuses() {
        let scorer = HeuristicScorer::new();
        assert_eq!(scorer.baseline(&features(100, 5, 0.1)), 2.5);
    }

    #[test]
    fn test_length_bonuses_are_cumulative() {
        let scorer = HeuristicScorer::new();
        assert_eq!(scorer.baseline(&features(300, 1, 0.0)), 2.5);
        assert_eq!(scorer.baseline(&features(301, 1, 0.0)), 3.0);
        assert_eq!(scorer.baseline(&features(500, 1, 0.0)), 3.0);
        assert_eq!(scorer.baseline(&features(501, 1, 0.0)), 3.5);
    }

    #[test]
    fn test_all_bonuses() {
        let scorer = HeuristicScorer::new();
        let b = scorer.baseline(&features(600, 21, 0.2));
        assert!((b - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let scorer = HeuristicScorer::new();
        assert_eq!(scorer.baseline(&features(10, 20, 0.15)), 2.5);
    }

    #[test]
    fn test_no_noise_gives_baseline_for_every_pillar() {
        let scorer = HeuristicScorer::new();
        let result = scorer.score(&features(400, 10, 0.0), &mut NoNoise);
        assert_eq!(result.pillars.len(), 5);
        for pillar in &result.pillars {
            assert_eq!(pillar.score, 3.0);
        }
        assert_eq!(result.overall_score, 3.0);
        assert_eq!(result.essay_length, 400);
    }

    #[test]
    fn test_pillars_in_enumeration_order() {
        let scorer = HeuristicScorer::new();
        let result = scorer.score(&features(1, 1, 0.0), &mut NoNoise);
        let names: Vec<_> = result.pillars.iter().map(|p| p.name).collect();
        assert_eq!(names, Pillar::ALL.to_vec());
        assert_eq!(
            result.pillars[0].description,
            Pillar::CriticalThinking.description()
        );
    }

    #[test]
    fn test_each_pillar_gets_its_own_perturbation() {
        let scorer = HeuristicScorer::new();
        let mut noise = FixedNoise::new(vec![0.1, -0.2, 0.3, -0.4, 0.5]);
        let result = scorer.score(&features(10, 1, 0.0), &mut noise);
        let scores: Vec<f64> = result.pillars.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![2.6, 2.3, 2.8, 2.1, 3.0]);
        // (2.6 + 2.3 + 2.8 + 2.1 + 3.0) / 5 = 2.56
        assert_eq!(result.overall_score, 2.6);
    }

    #[test]
    fn test_out_of_range_noise_is_bounded() {
        let scorer = HeuristicScorer::new();
        let mut noise = FixedNoise::new(vec![10.0, -10.0]);
        let pillars = scorer.score_pillars(&features(10, 1, 0.0), &mut noise);
        assert_eq!(pillars[0].score, 3.1);
        assert_eq!(pillars[1].score, 1.9);
    }

    #[test]
    fn test_overall_score_rounds_mean() {
        let pillars: Vec<PillarScore> = [3.1, 3.1, 3.2, 3.2, 3.2]
            .iter()
            .zip(Pillar::ALL)
            .map(|(&score, name)| PillarScore {
                name,
                score,
                description: String::new(),
            })
            .collect();
        // mean 3.16
        assert_eq!(overall_score(&pillars), 3.2);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(2.449), 2.4);
        assert_eq!(round_one_decimal(2.45), 2.5);
        assert_eq!(round_one_decimal(4.96), 5.0);
    }
}
