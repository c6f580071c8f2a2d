//! Essay analysis pipeline
//!
//! Turns raw essay text into structured feedback using one of two
//! strategies:
//!
//! - **Heuristic**: local scoring of five pillars from lexical statistics
//!   ([`HeuristicAnalyzer`])
//! - **Remote**: delegation to an external AI analysis backend over HTTP
//!   ([`RemoteAnalyzer`])
//!
//! Both sit behind [`EssayAnalyzer`]. Every path validates input at the
//! boundary ([`EssayText`]), validates output against its shape
//! ([`validate`]), and reports failures as an [`AnalysisError`] with a
//! closed [`ErrorKind`].

pub mod analyzer;
pub mod classify;
pub mod client;
pub mod error;
pub mod features;
pub mod gateway;
pub mod model;
pub mod noise;
pub mod pillars;
pub mod scoring;
pub mod text;
pub mod validate;

pub use analyzer::{analyze_essay, AnalysisMode, EssayAnalyzer, HeuristicAnalyzer};
pub use client::EssayAnalysisClient;
pub use error::{AnalysisError, ErrorKind, Result};
pub use features::TextFeatures;
pub use gateway::RemoteAnalyzer;
pub use model::{AnalysisResult, EssayAnalysisResponse, PillarScore};
pub use noise::{NoNoise, NoiseSource, SeededNoise};
pub use pillars::Pillar;
pub use scoring::HeuristicScorer;
pub use text::{EssayText, MAX_ESSAY_CHARS};
