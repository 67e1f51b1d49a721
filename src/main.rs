use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use digitscan::logger::{self, info, warn};
use digitscan::{
    CaptureSource, Classifier, DigitRecognizer, FileCapture, InputLayout, InterpreterConfig,
    PolarityMode, Prediction, PreprocessConfig, RtenClassifier, build_standard_pipeline,
};

#[derive(Parser)]
#[command(name = "digitscan")]
#[command(about = "Classify a photo of a single handwritten digit")]
struct Cli {
    /// Path to the captured photo
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Digit classifier in .rten format
    #[arg(short, long, value_name = "MODEL", default_value = "mnist_model.rten")]
    model: PathBuf,

    /// Input layout the model expects
    #[arg(long, value_enum, default_value_t = InputLayout::Nchw)]
    layout: InputLayout,

    /// Luma above this value counts as background
    #[arg(long, default_value_t = 128)]
    threshold: u8,

    /// How ink and paper are mapped before resizing
    #[arg(long, value_enum, default_value_t = PolarityMode::InvertedBinary)]
    polarity: PolarityMode,

    /// Reject predictions whose confidence (percent) is below this
    #[arg(long, default_value_t = 20.0)]
    min_confidence: f32,

    /// Decimal places for the confidence
    #[arg(long, default_value_t = 2)]
    precision: usize,

    /// Write the 28x28 model input as an image
    #[arg(long, value_name = "PATH")]
    save_preprocessed: Option<PathBuf>,

    /// Save every preprocessing stage to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report {
    image: String,
    prediction: Option<Prediction>,
    label: String,
    confidence: String,
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logger::init(if args.verbose { "debug" } else { "info" });

    let preprocess_config = PreprocessConfig {
        threshold: args.threshold,
        polarity: args.polarity,
        ..Default::default()
    };
    let interpreter_config = InterpreterConfig {
        min_confidence: args.min_confidence,
        precision: args.precision,
    };

    // Load the model once; a failure is reported per attempt as "model not loaded"
    let classifier: Option<Arc<dyn Classifier>> = match RtenClassifier::load(&args.model, args.layout) {
        Ok(classifier) => Some(Arc::new(classifier)),
        Err(e) => {
            warn!(error = %e, "Continuing without a model");
            None
        }
    };

    let mut pipeline = build_standard_pipeline(&preprocess_config);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }
    let recognizer = Arc::new(DigitRecognizer::with_pipeline(
        pipeline,
        interpreter_config,
        classifier,
    ));
    if !recognizer.has_model() {
        warn!("No model loaded, classification will fail");
    }

    let capture = FileCapture::new(&args.image_path);
    let captured = capture.capture().recv()?;
    if captured.is_none() && args.image_path.exists() {
        // The file is there, so this is corrupt input rather than a cancelled capture
        anyhow::bail!("Failed to decode image: {}", args.image_path.display());
    }

    let outcome = recognizer.handle_capture_in_background(captured).recv()?;

    let report = match &outcome {
        Ok(Some(result)) => {
            if let Some(path) = &args.save_preprocessed {
                result
                    .display_image
                    .save(path)
                    .map_err(|e| anyhow::anyhow!("Failed to save preprocessed image: {}", e))?;
            }
            Report {
                image: args.image_path.display().to_string(),
                prediction: Some(result.prediction.clone()),
                label: result.prediction.label(),
                confidence: result.prediction.confidence_text(),
                error: None,
            }
        }
        Ok(None) => {
            info!("No image captured");
            return Ok(());
        }
        Err(e) => Report {
            image: args.image_path.display().to_string(),
            prediction: None,
            label: format!("Error: {}", e),
            confidence: String::new(),
            error: Some(e.to_string()),
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.label);
        if !report.confidence.is_empty() {
            println!("{}", report.confidence);
        }
    }

    if outcome.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
