//! Result shapes produced by the two analysis modes
//!
//! Heuristic mode yields an [`AnalysisResult`] on a 1-5 scale; remote mode
//! yields an [`EssayAnalysisResponse`] on a 0-100 scale. The two are kept
//! as separate types with no conversion between them.

use serde::{Deserialize, Serialize};

use crate::pillars::Pillar;

/// Score for one pillar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub name: Pillar,
    /// 1.0 to 5.0, one decimal
    pub score: f64,
    pub description: String,
}

/// Heuristic analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// One entry per pillar, in [`Pillar::ALL`] order
    pub pillars: Vec<PillarScore>,
    /// Mean of the pillar scores, one decimal
    pub overall_score: f64,
    /// Word count of the analyzed essay
    pub essay_length: usize,
}

impl AnalysisResult {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarScore> {
        self.pillars.iter().find(|p| p.name == pillar)
    }
}

/// Remote analyzer feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayAnalysisResponse {
    pub grammar_feedback: String,
    pub structure_feedback: String,
    pub content_feedback: String,
    pub spelling_feedback: String,
    /// 0 to 100
    pub overall_score: f64,

    // Per-dimension star ratings, 0 to 5, when the backend supplies them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling_rating: Option<f64>,

    /// Backend session that produced this analysis
    #[serde(
        rename = "session_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,
}
