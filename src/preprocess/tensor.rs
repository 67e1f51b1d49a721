use image::GrayImage;

use crate::error::PreprocessError;

/// Single-channel model input: `width * height` values in [0, 1], row-major
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl InputTensor {
    /// Build a tensor from raw values. Values outside [0, 1] are clamped.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, PreprocessError> {
        let expected = width as usize * height as usize;
        if expected == 0 || values.len() != expected {
            return Err(PreprocessError::TensorShape {
                expected,
                actual: values.len(),
            });
        }

        let values = values.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(Self { width, height, values })
    }

    /// Each 8-bit sample divided by 255
    pub fn from_gray(image: &GrayImage) -> Result<Self, PreprocessError> {
        let values = image
            .as_raw()
            .iter()
            .map(|&v| f32::from(v) / 255.0)
            .collect();

        Self::new(image.width(), image.height(), values)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }
}
