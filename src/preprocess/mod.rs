pub mod steps;
pub mod tensor;
pub mod transforms;

use image::imageops::FilterType;

use crate::error::PreprocessError;
use crate::models::RawImage;
use crate::pipeline::{Pipeline, Preprocessed};

/// How ink and paper are mapped before resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PolarityMode {
    /// Two levels: ink 255, paper 0
    #[default]
    #[value(name = "binary")]
    InvertedBinary,
    /// Continuous tones, inverted
    #[value(name = "grayscale")]
    InvertedGrayscale,
}

/// Preprocessing parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessConfig {
    /// Luma strictly above this is background
    pub threshold: u8,
    pub target_width: u32,
    pub target_height: u32,
    /// Must interpolate; nearest-neighbour drops thin strokes
    pub filter: FilterType,
    pub polarity: PolarityMode,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            target_width: 28,
            target_height: 28,
            filter: FilterType::Triangle,
            polarity: PolarityMode::InvertedBinary,
        }
    }
}

/// Build the standard preprocessing pipeline:
/// orientation → grayscale/binarize/invert → resize
pub fn build_standard_pipeline(config: &PreprocessConfig) -> Pipeline {
    use crate::preprocess::steps::*;

    let pipeline = Pipeline::new().add_step_boxed(Box::new(OrientationStep));

    let pipeline = match config.polarity {
        PolarityMode::InvertedBinary => pipeline.add_step_boxed(Box::new(InvertedBinarizeStep {
            threshold: config.threshold,
        })),
        PolarityMode::InvertedGrayscale => pipeline.add_step_boxed(Box::new(InvertedGrayscaleStep)),
    };

    pipeline.add_step_boxed(Box::new(ResizeStep {
        width: config.target_width,
        height: config.target_height,
        filter: config.filter,
    }))
}

/// One-shot preprocessing with the standard pipeline
pub fn preprocess(raw: &RawImage, config: &PreprocessConfig) -> Result<Preprocessed, PreprocessError> {
    build_standard_pipeline(config).run(raw)
}
