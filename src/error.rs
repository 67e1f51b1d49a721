use thiserror::Error;

/// A preprocessing stage could not produce output.
/// Whatever the earlier stages produced is discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("Image has no pixels: width={width}, height={height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid target size: {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },

    #[error("Tensor extraction expected {expected} samples, got {actual}")]
    TensorShape { expected: usize, actual: usize },
}

/// Failure inside the inference adapter.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to load model {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("Model invocation failed: {0}")]
    Invocation(String),

    #[error("Model produced {actual} scores, expected {expected}")]
    UnexpectedOutput { expected: usize, actual: usize },
}

/// Why a single classification attempt ended without a prediction.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Image preprocessing failed: {0}")]
    Preprocessing(#[from] PreprocessError),

    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
