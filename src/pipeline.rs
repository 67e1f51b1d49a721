use image::metadata::Orientation;
use image::{DynamicImage, GrayImage};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::PreprocessError;
use crate::models::RawImage;
use crate::preprocess::tensor::InputTensor;

/// Data that flows through the pipeline
///
/// Steps that leave the image untouched hand the borrowed buffer on, so an
/// upright capture is never copied before the first real transform.
#[derive(Debug, Clone)]
pub struct PipelineData<'a> {
    /// Current image; borrowed from the capture until a step derives a new one
    pub image: Cow<'a, DynamicImage>,

    /// Transform still needed to make `image` upright
    pub orientation: Orientation,
}

impl<'a> PipelineData<'a> {
    /// Start from a captured image without copying it
    pub fn from_raw(raw: &'a RawImage) -> Self {
        Self {
            image: Cow::Borrowed(raw.image()),
            orientation: raw.orientation(),
        }
    }

    /// Replace the image with a derived one, keeping the orientation tag
    pub fn with_image(self, image: DynamicImage) -> Self {
        Self {
            image: Cow::Owned(image),
            orientation: self.orientation,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Output of a full pipeline run
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Model input, row-major, values in [0, 1]
    pub tensor: InputTensor,
    /// The same samples as a viewable image
    pub display_image: GrayImage,
}

/// Where intermediate images are written
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Derive the next image from `data`. A step never mutates its input buffer.
    fn process<'a>(&self, data: PipelineData<'a>) -> Result<PipelineData<'a>, PreprocessError>;

    /// Human-readable name for this step (used in logs and debug directory names)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            debug: None,
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> std::io::Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(std::io::Error::other(format!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step, then extract the model tensor from the last image.
    /// An image without pixels is rejected here even if no step checked it.
    pub fn run(&self, input: &RawImage) -> Result<Preprocessed, PreprocessError> {
        let data = self.run_steps(input, self.steps.len())?;

        let display_image = match data.image {
            Cow::Owned(image) => image.into_luma8(),
            Cow::Borrowed(image) => image.to_luma8(),
        };
        let (width, height) = display_image.dimensions();
        if width == 0 || height == 0 {
            return Err(PreprocessError::EmptyImage { width, height });
        }

        let tensor = InputTensor::from_gray(&display_image)?;
        debug!(
            width = tensor.width(),
            height = tensor.height(),
            "Extracted input tensor"
        );

        Ok(Preprocessed {
            tensor,
            display_image,
        })
    }

    /// Run the pipeline but stop at an intermediate step (useful for debugging)
    pub fn run_partial(&self, input: &RawImage, num_steps: usize) -> Result<DynamicImage, PreprocessError> {
        let data = self.run_steps(input, num_steps)?;
        Ok(data.image.into_owned())
    }

    fn run_steps<'a>(
        &self,
        input: &'a RawImage,
        num_steps: usize,
    ) -> Result<PipelineData<'a>, PreprocessError> {
        if let Some(debug_config) = &self.debug {
            save_debug_image(&debug_config.output_dir, "00_input", input.image());
        }

        let mut data = PipelineData::from_raw(input);

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            debug!(
                step = step.name(),
                width = data.width(),
                height = data.height(),
                "Running step"
            );

            data = step.process(data)?;

            if let Some(debug_config) = &self.debug {
                let step_dir_name = format!(
                    "{:02}_{}",
                    step_idx + 1,
                    step.name().to_lowercase().replace(' ', "_")
                );
                save_debug_image(&debug_config.output_dir, &step_dir_name, &data.image);
            }
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug dumps never fail a run; a write error is only logged
fn save_debug_image(root: &Path, dir_name: &str, image: &DynamicImage) {
    let step_dir = root.join(dir_name);
    if let Err(e) = std::fs::create_dir_all(&step_dir) {
        warn!(dir = %step_dir.display(), error = %e, "Failed to create debug directory");
        return;
    }

    let output_path = step_dir.join("01.png");
    match image.save(&output_path) {
        Ok(()) => debug!("Debug: saved {}/01.png", dir_name),
        Err(e) => warn!(path = %output_path.display(), error = %e, "Failed to save debug image"),
    }
}
