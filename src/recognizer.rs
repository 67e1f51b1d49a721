use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, info};

use crate::error::{ClassifyError, PreprocessError, Result};
use crate::inference::Classifier;
use crate::interpret::{InterpreterConfig, interpret};
use crate::models::{PredictionResult, RawImage};
use crate::pipeline::{Pipeline, Preprocessed};
use crate::preprocess::{PreprocessConfig, build_standard_pipeline};

/// All tunables of a recognizer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizerConfig {
    pub preprocess: PreprocessConfig,
    pub interpreter: InterpreterConfig,
}

/// Capture → preprocess → classify → interpret, one attempt at a time.
///
/// The classifier is injected already loaded. `None` means loading failed;
/// every attempt then ends with [`ClassifyError::ModelNotLoaded`].
pub struct DigitRecognizer {
    pipeline: Pipeline,
    interpreter: InterpreterConfig,
    classifier: Option<Arc<dyn Classifier>>,
}

impl DigitRecognizer {
    pub fn new(config: RecognizerConfig, classifier: Option<Arc<dyn Classifier>>) -> Self {
        Self {
            pipeline: build_standard_pipeline(&config.preprocess),
            interpreter: config.interpreter,
            classifier,
        }
    }

    /// Use a custom pipeline, e.g. one with debug output enabled
    pub fn with_pipeline(
        pipeline: Pipeline,
        interpreter: InterpreterConfig,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Self {
        Self {
            pipeline,
            interpreter,
            classifier,
        }
    }

    pub fn has_model(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn preprocess(&self, raw: &RawImage) -> std::result::Result<Preprocessed, PreprocessError> {
        self.pipeline.run(raw)
    }

    /// Run one full classification attempt
    pub fn classify(&self, raw: &RawImage) -> Result<PredictionResult> {
        let preprocessed = self.pipeline.run(raw)?;

        let classifier = self.classifier.as_ref().ok_or(ClassifyError::ModelNotLoaded)?;
        let scores = classifier.classify(&preprocessed.tensor)?;
        debug!(?scores, "Classifier scores");

        let prediction = interpret(&scores, &self.interpreter);
        info!(
            label = %prediction.label(),
            confidence = %prediction.confidence_text(),
            "Classification finished"
        );

        Ok(PredictionResult {
            prediction,
            display_image: preprocessed.display_image,
        })
    }

    /// Handle whatever the capture source delivered. No image is not an error.
    pub fn handle_capture(&self, capture: Option<RawImage>) -> Result<Option<PredictionResult>> {
        match capture {
            Some(raw) => self.classify(&raw).map(Some),
            None => {
                debug!("No image captured, skipping prediction");
                Ok(None)
            }
        }
    }

    /// Handle a capture on a worker thread. The receiver yields exactly one result.
    pub fn handle_capture_in_background(
        self: &Arc<Self>,
        capture: Option<RawImage>,
    ) -> Receiver<Result<Option<PredictionResult>>> {
        let (sender, receiver) = mpsc::channel();
        let recognizer = Arc::clone(self);

        std::thread::spawn(move || {
            let result = recognizer.handle_capture(capture);
            let _ = sender.send(result);
        });

        receiver
    }
}
