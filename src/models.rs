use image::metadata::Orientation;
use image::{DynamicImage, GrayImage, ImageDecoder, ImageReader, ImageResult};
use std::path::Path;

use crate::interpret::Prediction;

/// A captured photo exactly as the capture source handed it over.
///
/// The pixel buffer is stored as the device wrote it; `orientation` says how
/// it has to be transformed to appear upright. Never mutated.
#[derive(Debug, Clone)]
pub struct RawImage {
    image: DynamicImage,
    orientation: Orientation,
}

impl RawImage {
    pub fn new(image: DynamicImage, orientation: Orientation) -> Self {
        Self { image, orientation }
    }

    /// Wrap an image whose stored buffer is already upright
    pub fn upright(image: DynamicImage) -> Self {
        Self::new(image, Orientation::NoTransforms)
    }

    /// Decode an image file, keeping the EXIF orientation reported by the decoder
    pub fn open(path: impl AsRef<Path>) -> ImageResult<Self> {
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = decoder.orientation()?;
        let image = DynamicImage::from_decoder(decoder)?;
        Ok(Self { image, orientation })
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Outcome of one classification attempt, ready for display
#[derive(Debug, Clone)]
pub struct PredictionResult {
    pub prediction: Prediction,
    /// The resized model input, shown to the user next to the prediction
    pub display_image: GrayImage,
}
