//! Preflight: readiness analysis for A/B test proposals
//!
//! Decides whether a proposed experiment is sound enough to launch. Three
//! independent analyses run over a [`TestProposal`] and an aggregator folds
//! them into a [`ReadinessStatus`].
//!
//! # Architecture
//!
//! ```text
//!                   ┌──────────────────────┐
//!              ┌───►│ StatisticalAnalyzer  │───┐
//!              │    └──────────────────────┘   │
//! ┌──────────┐ │    ┌──────────────────────┐   │   ┌─────────────────────┐
//! │ Proposal │─┼───►│ HypothesisScorer     │───┼──►│ ReadinessAggregator │──► AnalysisResult
//! └──────────┘ │    └──────────────────────┘   │   └─────────────────────┘
//!              │    ┌──────────────────────┐   │
//!              └───►│ DesignValidator      │───┘
//!                   └──────────────────────┘
//! ```
//!
//! The engine is a pure computation: no I/O, no shared state, and the same
//! proposal always produces the same result.
//!
//! # Example
//!
//! ```
//! use preflight::prelude::*;
//!
//! let proposal = TestProposal::new("", 0.15, 0.05, 1000, "signup rate");
//! let result = ReadinessEngine::default().analyze(&proposal).unwrap();
//! assert_eq!(result.readiness_status, ReadinessStatus::NotReady);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod design;
pub mod engine;
pub mod hypothesis;
pub mod ordered_set;
pub mod proposal;
pub mod readiness;
mod result;
pub mod statistical;
pub mod text;

pub use config::{DesignConfig, EngineConfig, HypothesisConfig, ReadinessThresholds, StatisticalConfig};
pub use design::{DesignAnalysis, DesignValidator};
pub use engine::ReadinessEngine;
pub use hypothesis::{Dimension, HypothesisAnalysis, HypothesisScorer, RuleOutcome, ScoringRule};
pub use ordered_set::OrderedSet;
pub use proposal::TestProposal;
pub use readiness::{AnalysisResult, ReadinessAggregator, ReadinessStatus};
pub use result::{PreflightError, PreflightResult};
pub use statistical::{SamplePlan, StatisticalAnalysis, StatisticalAnalyzer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisResult, EngineConfig, PreflightError, PreflightResult, ReadinessEngine,
        ReadinessStatus, TestProposal,
    };
}
