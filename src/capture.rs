use image::ImageError;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, error, warn};

use crate::models::RawImage;

/// Something that produces one photo per request.
///
/// The receiver yields exactly one message: `Some(image)` on success, `None`
/// when the user cancelled or no capture device was available.
pub trait CaptureSource {
    fn capture(&self) -> Receiver<Option<RawImage>>;
}

/// Capture source that "takes" a photo by decoding a file
pub struct FileCapture {
    path: PathBuf,
}

impl FileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CaptureSource for FileCapture {
    fn capture(&self) -> Receiver<Option<RawImage>> {
        let (sender, receiver) = mpsc::channel();
        let path = self.path.clone();

        std::thread::spawn(move || {
            let image = match RawImage::open(&path) {
                Ok(raw) => {
                    debug!(
                        path = %path.display(),
                        width = raw.width(),
                        height = raw.height(),
                        orientation = ?raw.orientation(),
                        "Captured image"
                    );
                    Some(raw)
                }
                Err(ImageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "Capture unavailable");
                    None
                }
                Err(e) => {
                    error!(
                        path = %path.display(),
                        error = %e,
                        "Captured image could not be decoded"
                    );
                    None
                }
            };
            // The requester may have gone away; the capture is simply dropped then
            let _ = sender.send(image);
        });

        receiver
    }
}
