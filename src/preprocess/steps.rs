use crate::error::PreprocessError;
use crate::pipeline::{PipelineData, PipelineStep};
use crate::preprocess::transforms;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::DynamicImage;
use std::borrow::Cow;

/// Apply the capture's orientation tag to the pixel buffer
pub struct OrientationStep;

impl PipelineStep for OrientationStep {
    fn process<'a>(&self, data: PipelineData<'a>) -> Result<PipelineData<'a>, PreprocessError> {
        let image = transforms::correct_orientation(data.image, data.orientation)?;
        Ok(PipelineData {
            image,
            orientation: Orientation::NoTransforms,
        })
    }

    fn name(&self) -> &str {
        "Orientation Correction"
    }
}

/// Grayscale, threshold and invert in one pass
pub struct InvertedBinarizeStep {
    pub threshold: u8,
}

impl PipelineStep for InvertedBinarizeStep {
    fn process<'a>(&self, data: PipelineData<'a>) -> Result<PipelineData<'a>, PreprocessError> {
        let binary = transforms::to_inverted_binary(&data.image, self.threshold);
        Ok(data.with_image(DynamicImage::ImageLuma8(binary)))
    }

    fn name(&self) -> &str {
        "Inverted Binarization"
    }
}

/// Grayscale and invert, keeping the continuous tones
pub struct InvertedGrayscaleStep;

impl PipelineStep for InvertedGrayscaleStep {
    fn process<'a>(&self, data: PipelineData<'a>) -> Result<PipelineData<'a>, PreprocessError> {
        let inverted = transforms::to_inverted_grayscale(&data.image);
        Ok(data.with_image(DynamicImage::ImageLuma8(inverted)))
    }

    fn name(&self) -> &str {
        "Inverted Grayscale"
    }
}

/// Resample to the classifier's input resolution
pub struct ResizeStep {
    pub width: u32,
    pub height: u32,
    pub filter: FilterType,
}

impl PipelineStep for ResizeStep {
    fn process<'a>(&self, data: PipelineData<'a>) -> Result<PipelineData<'a>, PreprocessError> {
        let resized = {
            let gray = match data.image.as_luma8() {
                Some(gray) => Cow::Borrowed(gray),
                None => Cow::Owned(data.image.to_luma8()),
            };
            transforms::resize_to(&gray, self.width, self.height, self.filter)?
        };
        Ok(data.with_image(DynamicImage::ImageLuma8(resized)))
    }

    fn name(&self) -> &str {
        "Resize"
    }
}
