//! Analysis strategies behind one interface

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::features::TextFeatures;
use crate::gateway::{rejected_payload, RemoteAnalyzer};
use crate::model::{AnalysisResult, EssayAnalysisResponse};
use crate::noise::{NoiseSource, SeededNoise};
use crate::scoring::HeuristicScorer;
use crate::text::EssayText;
use crate::validate::{validate_analysis_result, validate_remote};

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Heuristic,
    Remote,
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMode::Heuristic => f.write_str("heuristic"),
            AnalysisMode::Remote => f.write_str("remote"),
        }
    }
}

/// An essay analysis strategy
///
/// Each strategy has its own validated output shape; the two are not
/// interchangeable.
#[async_trait]
pub trait EssayAnalyzer: Send + Sync {
    type Output: Send;

    fn mode(&self) -> AnalysisMode;

    /// Analyze already validated text
    async fn analyze(&self, text: &EssayText) -> Result<Self::Output>;
}

/// Validate `raw` at the boundary, then dispatch to `analyzer`
///
/// Invalid input is rejected before the analyzer is touched.
pub async fn analyze_essay<A>(analyzer: &A, raw: &str) -> Result<A::Output>
where
    A: EssayAnalyzer + ?Sized,
{
    let text = EssayText::parse(raw)?;
    info!(
        "Starting {} essay analysis ({} chars)",
        analyzer.mode(),
        text.char_count()
    );
    let output = analyzer.analyze(&text).await?;
    info!("{} essay analysis completed", analyzer.mode());
    Ok(output)
}

/// Local feature-based scoring
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer {
    scorer: HeuristicScorer,
    seed: Option<u64>,
}

impl HeuristicAnalyzer {
    /// Unseeded: every call draws fresh OS entropy for its perturbations
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible: every call replays the same perturbation sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            scorer: HeuristicScorer::new(),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Score `text` with an explicit noise source
    pub fn analyze_with<N: NoiseSource + ?Sized>(
        &self,
        text: &EssayText,
        noise: &mut N,
    ) -> Result<AnalysisResult> {
        let features = TextFeatures::extract(text.as_str());
        let result = self.scorer.score(&features, noise);
        validate_analysis_result(&result)
    }
}

#[async_trait]
impl EssayAnalyzer for HeuristicAnalyzer {
    type Output = AnalysisResult;

    fn mode(&self) -> AnalysisMode {
        AnalysisMode::Heuristic
    }

    async fn analyze(&self, text: &EssayText) -> Result<AnalysisResult> {
        let mut noise = match self.seed {
            Some(seed) => SeededNoise::from_seed(seed),
            None => SeededNoise::from_entropy(),
        };
        self.analyze_with(text, &mut noise)
    }
}

#[async_trait]
impl EssayAnalyzer for RemoteAnalyzer {
    type Output = EssayAnalysisResponse;

    fn mode(&self) -> AnalysisMode {
        AnalysisMode::Remote
    }

    async fn analyze(&self, text: &EssayText) -> Result<EssayAnalysisResponse> {
        let payload = self.fetch_raw(text).await?;
        validate_remote(&payload).map_err(|e| rejected_payload(e, self.backend_url()))
    }
}
