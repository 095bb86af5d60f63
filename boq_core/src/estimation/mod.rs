//! # Material Estimation
//!
//! Turns free-text BOQ items and site parameters into suggested material
//! and purchase quantities by asking a text-generation service.
//!
//! ## Flow
//!
//! ```text
//! EstimationRequest ──validate──> render_prompt ──> TextGenerator::generate ──> EstimationResult
//!                                                          │
//!                                                          └─ any failure ──> CalcError::GenerationFailed
//! ```
//!
//! The generated Markdown is returned exactly as received. There is no
//! retry and no caching: two identical requests make two calls and may get
//! different text back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boq_core::config::GeneratorConfig;
//! use boq_core::estimation::{create_generator, EstimationRequest, MaterialEstimator};
//!
//! # async fn run() -> boq_core::CalcResult<()> {
//! let generator = create_generator(&GeneratorConfig::default())?;
//! let estimator = MaterialEstimator::new(generator);
//!
//! let request = EstimationRequest::new(
//!     "RCC M25: 100 cubic meters; Brickwork 230mm: 500 sq meters",
//!     "Built-up area: 3000 sq ft per floor; G+2; consider 10% extra for bricks",
//! )?;
//! let result = estimator.estimate(&request).await?;
//! println!("{}", result.material_estimations);
//! # Ok(())
//! # }
//! ```

pub mod generator;
pub mod prompt;
pub mod request;

pub use generator::{
    create_generator, GenerationError, OllamaGenerator, OpenAiGenerator, SharedGenerator,
    TextGenerator,
};
pub use prompt::{render_prompt, PROMPT_TEMPLATE};
pub use request::{EstimationRequest, EstimationResult, MAX_FIELD_CHARS, MIN_FIELD_CHARS};

use std::time::Instant;

use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Orchestrates one estimation per call against a text generator.
pub struct MaterialEstimator<G: ?Sized = dyn TextGenerator> {
    generator: std::sync::Arc<G>,
}

impl<G: TextGenerator + ?Sized> MaterialEstimator<G> {
    pub fn new(generator: std::sync::Arc<G>) -> Self {
        MaterialEstimator { generator }
    }

    /// Estimate material quantities for a request.
    ///
    /// # Returns
    ///
    /// * `Ok(EstimationResult)` - The generated text, unmodified
    /// * `Err(CalcError::InvalidInput)` - A field is outside 10-5000 characters
    /// * `Err(CalcError::GenerationFailed)` - The generator failed or returned nothing
    pub async fn estimate(&self, request: &EstimationRequest) -> CalcResult<EstimationResult> {
        request.validate()?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "material_estimation",
            %request_id,
            provider = self.generator.name(),
            model = self.generator.model(),
        );

        async {
            let prompt = render_prompt(request);
            info!("Estimating material quantities");
            debug!(prompt_chars = prompt.chars().count(), "Rendered estimation prompt");

            let start_time = Instant::now();
            match self.generator.generate(&prompt).await {
                Ok(text) => {
                    info!(
                        elapsed_ms = start_time.elapsed().as_millis() as u64,
                        response_chars = text.chars().count(),
                        "Material estimation complete"
                    );
                    Ok(EstimationResult {
                        material_estimations: text,
                    })
                }
                Err(err) => {
                    warn!(error = %err, "Material estimation failed");
                    Err(CalcError::generation_failed(
                        self.generator.name(),
                        err.to_string(),
                    ))
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Validate the two text fields and estimate in one step.
pub async fn estimate_material_quantities<G: TextGenerator + ?Sized>(
    estimator: &MaterialEstimator<G>,
    boq_items: &str,
    site_parameters: &str,
) -> CalcResult<EstimationResult> {
    let request = EstimationRequest::new(boq_items, site_parameters)?;
    estimator.estimate(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Replays scripted outcomes and records every prompt it sees
    struct MockGenerator {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        outcome: fn(usize) -> Result<String, GenerationError>,
    }

    impl MockGenerator {
        fn new(outcome: fn(usize) -> Result<String, GenerationError>) -> Arc<Self> {
            Arc::new(MockGenerator {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                outcome,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.outcome)(call)
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-1"
        }
    }

    fn request() -> EstimationRequest {
        EstimationRequest::new(
            "RCC M25: 100 cubic meters; Brickwork 230mm: 500 sq meters",
            "Built-up area: 3000 sq ft per floor; Number of floors: G+2",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_generated_text_unmodified() {
        let text = "**Item: RCC M25**\n  - Estimated Quantity: 100 cubic meters\n\n---\n";
        let generator = MockGenerator::new(|_| {
            Ok("**Item: RCC M25**\n  - Estimated Quantity: 100 cubic meters\n\n---\n".to_string())
        });
        let estimator = MaterialEstimator::new(generator.clone());

        let result = estimator.estimate(&request()).await.unwrap();
        assert_eq!(result.material_estimations, text);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_request() {
        let generator = MockGenerator::new(|_| Ok("estimate".to_string()));
        let estimator = MaterialEstimator::new(generator.clone());
        estimator.estimate(&request()).await.unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], render_prompt(&request()));
        assert!(prompts[0].contains("Brickwork 230mm: 500 sq meters"));
    }

    #[tokio::test]
    async fn test_failure_surfaces_once_without_retry() {
        let generator =
            MockGenerator::new(|_| Err(GenerationError::Transport("connection reset".to_string())));
        let estimator = MaterialEstimator::new(generator.clone());

        let err = estimator.estimate(&request()).await.unwrap_err();
        assert_eq!(err.error_code(), "GENERATION_FAILED");
        assert!(
            matches!(err, CalcError::GenerationFailed { ref provider, .. } if provider == "mock")
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_response_is_generation_failure() {
        let generator = MockGenerator::new(|_| Err(GenerationError::EmptyResponse));
        let estimator = MaterialEstimator::new(generator);
        let err = estimator.estimate(&request()).await.unwrap_err();
        assert_eq!(err.error_code(), "GENERATION_FAILED");
    }

    #[tokio::test]
    async fn test_identical_requests_call_twice() {
        let generator = MockGenerator::new(|call| Ok(format!("estimate #{}", call)));
        let estimator = MaterialEstimator::new(generator.clone());

        let first = estimator.estimate(&request()).await.unwrap();
        let second = estimator.estimate(&request()).await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_short_field_never_reaches_generator() {
        let generator = MockGenerator::new(|_| Ok("unused".to_string()));
        let estimator = MaterialEstimator::new(generator.clone());

        let err = estimate_material_quantities(&estimator, "123456789", "Ground floor only")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_works_through_shared_trait_object() {
        let generator: SharedGenerator = MockGenerator::new(|_| Ok("ok text".to_string()));
        let estimator = MaterialEstimator::new(generator);
        let result = estimate_material_quantities(
            &estimator,
            "Plastering 12mm: 1000 sq meters",
            "Consider 5% extra for plaster",
        )
        .await
        .unwrap();
        assert_eq!(result.material_estimations, "ok text");
    }

    #[tokio::test]
    async fn test_http_status_becomes_generation_failure() {
        use crate::config::GeneratorConfig;
        use generator::test_server::serve_once;

        let (base, served) = serve_once(503, r#"{"error":"overloaded"}"#.to_string()).await;
        let generator = create_generator(&GeneratorConfig {
            api_key: Some("sk-test".to_string()),
            api_base: Some(base),
            ..GeneratorConfig::default()
        })
        .unwrap();
        let estimator = MaterialEstimator::new(generator);

        let err = estimator.estimate(&request()).await.unwrap_err();
        match err {
            CalcError::GenerationFailed { provider, reason } => {
                assert_eq!(provider, "openai");
                assert!(reason.contains("503"));
            }
            other => panic!("expected generation failure, got {:?}", other),
        }
        assert!(served.await.unwrap().contains("Brickwork 230mm"));
    }
}
