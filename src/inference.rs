use rten::Model;
use rten_tensor::prelude::*;
use rten_tensor::{NdTensor, Tensor};
use std::path::Path;
use tracing::{debug, info};

use crate::error::InferenceError;
use crate::interpret::{NUM_CLASSES, ScoreVector};
use crate::preprocess::tensor::InputTensor;

/// Black-box digit classifier: one tensor in, ten class scores out.
///
/// Implementations are loaded once and shared read-only, so they must be
/// usable from a worker thread.
pub trait Classifier: Send + Sync {
    fn classify(&self, input: &InputTensor) -> Result<ScoreVector, InferenceError>;
}

/// Memory layout the model expects for its single-channel input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputLayout {
    /// `[1, 1, H, W]`, the usual ONNX export
    #[default]
    Nchw,
    /// `[1, H, W, 1]`, as produced by TFLite/Keras conversions
    Nhwc,
}

impl InputLayout {
    pub fn shape(&self, width: usize, height: usize) -> [usize; 4] {
        match self {
            InputLayout::Nchw => [1, 1, height, width],
            InputLayout::Nhwc => [1, height, width, 1],
        }
    }
}

/// Classifier backed by an `.rten` model file
pub struct RtenClassifier {
    model: Model,
    layout: InputLayout,
}

impl RtenClassifier {
    /// Load the model from disk. Done once; the handle is then injected where needed.
    pub fn load(path: impl AsRef<Path>, layout: InputLayout) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let load_error = |reason: String| InferenceError::ModelLoad {
            path: path.display().to_string(),
            reason,
        };

        if !path.exists() {
            return Err(load_error("file not found".to_string()));
        }

        let model = Model::load_file(path).map_err(|e| load_error(e.to_string()))?;
        info!(path = %path.display(), ?layout, "Loaded digit model");

        Ok(Self { model, layout })
    }
}

impl Classifier for RtenClassifier {
    fn classify(&self, input: &InputTensor) -> Result<ScoreVector, InferenceError> {
        let shape = self.layout.shape(input.width() as usize, input.height() as usize);
        let tensor = NdTensor::from_data(shape, input.as_slice().to_vec());

        let output = self
            .model
            .run_one(tensor.view().into(), None)
            .map_err(|e| InferenceError::Invocation(e.to_string()))?;
        let scores = Tensor::<f32>::try_from(output)
            .map_err(|e| InferenceError::Invocation(format!("unexpected output type: {}", e)))?;

        let scores = scores.to_vec();
        debug!(?scores, "Model output");

        // An empty output is left for the interpreter to report as "no prediction"
        if !scores.is_empty() && scores.len() != NUM_CLASSES {
            return Err(InferenceError::UnexpectedOutput {
                expected: NUM_CLASSES,
                actual: scores.len(),
            });
        }

        Ok(scores)
    }
}
