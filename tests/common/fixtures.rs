use digitscan::{Classifier, InferenceError, InputTensor, RawImage, ScoreVector};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb};
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([10, 10, 10]);

/// A white "sheet of paper" with a thick dark vertical stroke, like a drawn "1".
/// The stroke covers x in [0.43, 0.57) and y in [0.15, 0.85) of the side length.
pub fn digit_photo(size: u32) -> DynamicImage {
    let x0 = size * 43 / 100;
    let x1 = size * 57 / 100;
    let y0 = size * 15 / 100;
    let y1 = size * 85 / 100;
    let img = ImageBuffer::from_fn(size, size, |x, y| {
        if x >= x0 && x < x1 && y >= y0 && y < y1 { INK } else { WHITE }
    });
    DynamicImage::ImageRgb8(img)
}

/// Horizontal luma ramp 0..=255 over a 256x4 image
pub fn luma_ramp() -> DynamicImage {
    let img: GrayImage = ImageBuffer::from_fn(256, 4, |x, _| Luma([x as u8]));
    DynamicImage::ImageLuma8(img)
}

/// Writes `image` to a temporary PNG that lives as long as the handle
pub fn write_temp_png(image: &DynamicImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    image
        .save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

pub fn upright_digit_capture() -> RawImage {
    RawImage::upright(digit_photo(280))
}

/// Classifier that answers with fixed scores and remembers what it was given
pub struct StubClassifier {
    scores: ScoreVector,
    pub seen: Mutex<Vec<InputTensor>>,
}

impl StubClassifier {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, input: &InputTensor) -> Result<ScoreVector, InferenceError> {
        self.seen.lock().unwrap().push(input.clone());
        Ok(self.scores.clone())
    }
}

/// Classifier whose invocation always fails
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _input: &InputTensor) -> Result<ScoreVector, InferenceError> {
        Err(InferenceError::Invocation("backend exploded".to_string()))
    }
}

/// Scores with all mass on one digit
pub fn one_hot(digit: usize, score: f32) -> Vec<f32> {
    let mut scores = vec![0.0; 10];
    scores[digit] = score;
    scores
}
