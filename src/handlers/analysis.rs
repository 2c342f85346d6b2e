use std::sync::Arc;

use crate::error::AnalysisError;
use crate::models::StagedImage;
use crate::services::{ingestion, VisionService};

/// Fixed instruction sent with every meal photo. Never mutated per call.
pub const NUTRITION_PROMPT: &str = "\
You are a nutrition expert analyzing an image of food uploaded by the user. \
Your task is to identify the food items present in the image and provide a \
detailed nutritional breakdown for each item. Please include the following \
information in a clear and organized format:

1. **Food Items Identified**:
   - List each food item detected in the image.

2. **Caloric Information**:
   - Provide the calorie count for each food item.

3. **Nutritional Breakdown**:
   - For each food item, detail the approximate content of the following nutrients:
     - Carbohydrates (in grams)
     - Proteins (in grams)
     - Fats (in grams)
     - Saturated Fats (in grams)
     - Vitamins (specify types and amounts)
     - Minerals (specify types and amounts)
     - Roughages/Fiber (in grams)

4. **Health Assessment**:
   - Assess the overall healthiness of the meal based on the nutritional \
information provided. Use a simple rating system (e.g., \"Healthy,\" \
\"Moderate,\" \"Unhealthy\") and provide a brief explanation for your assessment.

5. **Summary Statistics**:
   - At the end of your response, calculate and summarize the percentage \
contribution of each macronutrient (Carbohydrates, Proteins, Fats) to the \
total caloric content of the meal.

   - Present the information in a neat, structured format, using bullet \
points, headings, and sections for clarity.";

/// Runs one submission end to end: ingestion, then a single inference call.
pub struct AnalysisHandler {
    vision: Arc<dyn VisionService>,
}

impl AnalysisHandler {
    pub fn new(vision: Arc<dyn VisionService>) -> Self {
        Self { vision }
    }

    /// Convert the staged upload into a payload and ask the model about it.
    /// The reply text is returned unmodified.
    pub async fn analyze_upload(
        &self,
        staged: Option<StagedImage>,
    ) -> Result<String, AnalysisError> {
        let payload = ingestion::prepare_payload(staged)?;

        log::info!(
            "📸 Analyzing meal image ({}, {} bytes)",
            payload.mime_type,
            payload.data.len()
        );

        let text = self.vision.describe_image(NUTRITION_PROMPT, &payload).await?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::models::{ImageFormat, ImagePayload};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Stub that derives its reply from exactly what it was given.
    struct EchoVision;

    #[async_trait::async_trait]
    impl VisionService for EchoVision {
        async fn describe_image(
            &self,
            prompt: &str,
            image: &ImagePayload,
        ) -> Result<String, RemoteError> {
            Ok(format!(
                "echo:{}:{}:{}",
                prompt.len(),
                image.mime_type,
                image.data.len()
            ))
        }
    }

    /// Stub that records every prompt it receives.
    struct RecordingVision {
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl RecordingVision {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl VisionService for RecordingVision {
        async fn describe_image(
            &self,
            prompt: &str,
            _image: &ImagePayload,
        ) -> Result<String, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("ok".to_string())
        }
    }

    fn staged(bytes: &[u8]) -> StagedImage {
        StagedImage {
            format: ImageFormat::Jpeg,
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_returns_stub_echo_exactly() {
        let handler = AnalysisHandler::new(Arc::new(EchoVision));

        let text = handler
            .analyze_upload(Some(staged(b"fake jpeg bytes")))
            .await
            .unwrap();

        let expected = format!("echo:{}:image/jpeg:15", NUTRITION_PROMPT.len());
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn test_prompt_is_identical_across_submissions() {
        let vision = Arc::new(RecordingVision::new());
        let handler = AnalysisHandler::new(vision.clone());

        handler.analyze_upload(Some(staged(b"first"))).await.unwrap();
        handler.analyze_upload(Some(staged(b"second"))).await.unwrap();

        let prompts = vision.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].as_bytes(), prompts[1].as_bytes());
        assert_eq!(prompts[0], NUTRITION_PROMPT);
    }

    #[tokio::test]
    async fn test_missing_upload_never_reaches_the_model() {
        let vision = Arc::new(RecordingVision::new());
        let handler = AnalysisHandler::new(vision.clone());

        let result = handler.analyze_upload(None).await;

        assert!(matches!(result, Err(AnalysisError::NoImage)));
        assert_eq!(vision.calls.load(Ordering::SeqCst), 0);
    }
}
