mod common;

use common::*;
use digitscan::{CaptureSource, FileCapture, RawImage};
use image::metadata::Orientation;
use std::time::Duration;

#[test]
fn file_capture_delivers_the_decoded_image() {
    let file = write_temp_png(&digit_photo(64));

    let receiver = FileCapture::new(file.path()).capture();
    let raw = receiver
        .recv_timeout(Duration::from_secs(10))
        .unwrap()
        .expect("image should be captured");

    assert_eq!((raw.width(), raw.height()), (64, 64));
    assert!(matches!(raw.orientation(), Orientation::NoTransforms));
    assert_eq!(raw.image().to_rgb8(), digit_photo(64).to_rgb8());
}

#[test]
fn missing_file_means_no_image() {
    let dir = tempfile::TempDir::new().unwrap();
    let receiver = FileCapture::new(dir.path().join("nothing.png")).capture();

    assert!(receiver.recv_timeout(Duration::from_secs(10)).unwrap().is_none());
}

#[test]
fn undecodable_file_means_no_image() {
    let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    std::fs::write(file.path(), b"definitely not a png").unwrap();

    let receiver = FileCapture::new(file.path()).capture();
    assert!(receiver.recv_timeout(Duration::from_secs(10)).unwrap().is_none());
}

#[test]
fn open_reads_pixels_and_orientation() {
    let file = write_temp_png(&luma_ramp());
    let raw = RawImage::open(file.path()).unwrap();

    assert_eq!((raw.width(), raw.height()), (256, 4));
    assert!(matches!(raw.orientation(), Orientation::NoTransforms));
}
