pub mod capture;
pub mod error;
pub mod inference;
pub mod interpret;
pub mod logger;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;

pub use capture::{CaptureSource, FileCapture};
pub use error::{ClassifyError, InferenceError, PreprocessError};
pub use inference::{Classifier, InputLayout, RtenClassifier};
pub use interpret::{Confidence, InterpreterConfig, Prediction, ScoreVector, interpret};
pub use models::{PredictionResult, RawImage};
pub use pipeline::{Pipeline, PipelineData, PipelineStep, Preprocessed};
pub use preprocess::tensor::InputTensor;
pub use preprocess::{PolarityMode, PreprocessConfig, build_standard_pipeline, preprocess};
pub use recognizer::{DigitRecognizer, RecognizerConfig};
