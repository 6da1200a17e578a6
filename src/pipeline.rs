//! The per-request analysis pipeline.
//!
//! Every request walks `Idle → Prompting → AwaitingModel → Extracting →
//! Validating` and ends in exactly one of `Success` or `Failed`. Nothing is
//! shared between requests except the provider handle, so many analyses can
//! run concurrently on one [`NutritionAnalyzer`].

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::timeout;

use crate::builder::NutritionAnalyzerBuilder;
use crate::description::RecipeDescription;
use crate::error::{NutritionError, MSG_DESCRIPTION_REQUIRED};
use crate::extraction::extract_candidate;
use crate::model::NutritionReport;
use crate::prompt::build_nutrition_prompt;
use crate::providers::LlmProvider;
use crate::validation::validate;

/// Default wall-clock ceiling for one request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a request is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Idle,
    Prompting,
    AwaitingModel,
    Extracting,
    Validating,
    Success,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Success | PipelineStage::Failed)
    }
}

/// Outcome of one request together with the stages it went through
#[derive(Debug)]
pub struct Analysis {
    pub outcome: Result<NutritionReport, NutritionError>,
    pub stages: Vec<PipelineStage>,
}

impl Analysis {
    /// The terminal stage reached by the request
    pub fn terminal_stage(&self) -> PipelineStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(PipelineStage::Idle)
    }
}

/// Forward-only record of stage transitions
struct StageTrail {
    stages: Vec<PipelineStage>,
}

impl StageTrail {
    fn new() -> Self {
        StageTrail {
            stages: vec![PipelineStage::Idle],
        }
    }

    fn current(&self) -> PipelineStage {
        self.stages[self.stages.len() - 1]
    }

    fn advance(&mut self, next: PipelineStage) {
        debug_assert!(next > self.current(), "stage transitions only move forward");
        debug!("Pipeline stage {:?} -> {:?}", self.current(), next);
        self.stages.push(next);
    }

    fn finish(mut self, outcome: &Result<NutritionReport, NutritionError>) -> Vec<PipelineStage> {
        let terminal = match outcome {
            Ok(_) => PipelineStage::Success,
            Err(_) => PipelineStage::Failed,
        };
        self.advance(terminal);
        self.stages
    }
}

/// Turns recipe descriptions into validated nutrition reports
#[derive(Clone)]
pub struct NutritionAnalyzer {
    // A provider that failed to configure is kept as its error message so
    // the failure surfaces per request, after input validation.
    provider: Result<Arc<dyn LlmProvider>, String>,
    timeout: Duration,
}

impl NutritionAnalyzer {
    /// Creates a new builder for configuring an analyzer
    ///
    /// # Example
    /// ```
    /// use recipe_nutrition::NutritionAnalyzer;
    ///
    /// let builder = NutritionAnalyzer::builder();
    /// ```
    pub fn builder() -> NutritionAnalyzerBuilder {
        NutritionAnalyzerBuilder::default()
    }

    /// Analyzer backed by an already constructed provider
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        NutritionAnalyzer {
            provider: Ok(provider),
            timeout,
        }
    }

    pub(crate) fn unconfigured(reason: String, timeout: Duration) -> Self {
        NutritionAnalyzer {
            provider: Err(reason),
            timeout,
        }
    }

    /// Wall-clock ceiling applied to the model call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Name of the backing provider, if one is configured
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().ok().map(|p| p.provider_name())
    }

    /// Analyze a recipe description
    ///
    /// # Errors
    /// - `InvalidInput` for an empty or whitespace-only description
    /// - `Configuration` when no backend credential is available
    /// - `Upstream` / `Timeout` when the model call fails or exceeds the ceiling
    /// - `Extraction` / `Validation` when the reply holds no usable record
    pub async fn analyze(
        &self,
        description: &RecipeDescription,
    ) -> Result<NutritionReport, NutritionError> {
        self.run(description).await.outcome
    }

    /// Analyze a recipe description and keep the stage trail
    pub async fn run(&self, description: &RecipeDescription) -> Analysis {
        let mut trail = StageTrail::new();
        let outcome = self.execute(description, &mut trail).await;

        match &outcome {
            Ok(report) => info!("Analyzed recipe '{}'", report.recipe.title),
            Err(e) => error!("Error analyzing recipe: {}", e),
        }

        Analysis {
            stages: trail.finish(&outcome),
            outcome,
        }
    }

    async fn execute(
        &self,
        description: &RecipeDescription,
        trail: &mut StageTrail,
    ) -> Result<NutritionReport, NutritionError> {
        if description.is_blank() {
            return Err(NutritionError::InvalidInput(
                MSG_DESCRIPTION_REQUIRED.to_string(),
            ));
        }

        let provider = self
            .provider
            .as_ref()
            .map_err(|reason| NutritionError::Configuration(reason.clone()))?;

        trail.advance(PipelineStage::Prompting);
        let prompt = build_nutrition_prompt(description);

        trail.advance(PipelineStage::AwaitingModel);
        debug!(
            "Requesting nutrition analysis from {} (timeout {:?})",
            provider.provider_name(),
            self.timeout
        );
        let raw = match timeout(self.timeout, provider.complete(&prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "{} did not answer within {:?}",
                    provider.provider_name(),
                    self.timeout
                );
                return Err(NutritionError::Timeout(self.timeout));
            }
        };

        trail.advance(PipelineStage::Extracting);
        let candidate = extract_candidate(&raw);

        trail.advance(PipelineStage::Validating);
        validate(&candidate.text, &raw)
    }
}
