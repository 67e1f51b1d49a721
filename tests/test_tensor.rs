mod common;

use common::*;
use digitscan::preprocess::transforms::{resize_to, to_inverted_binary};
use digitscan::{InputTensor, PreprocessError};
use image::imageops::FilterType;
use image::{GrayImage, ImageBuffer, Luma};

#[test]
fn resize_hits_target_resolution() {
    let binary = to_inverted_binary(&digit_photo(280), 128);
    let resized = resize_to(&binary, 28, 28, FilterType::Triangle).unwrap();
    assert_eq!(resized.dimensions(), (28, 28));

    let tall: GrayImage = ImageBuffer::from_pixel(5, 300, Luma([255]));
    let resized = resize_to(&tall, 28, 28, FilterType::Triangle).unwrap();
    assert_eq!(resized.dimensions(), (28, 28));
}

#[test]
fn interpolation_softens_binary_edges() {
    // Stroke edges that do not fall on the 10px sampling grid
    let img: GrayImage = ImageBuffer::from_fn(280, 280, |x, _| {
        if (133..147).contains(&x) { Luma([255]) } else { Luma([0]) }
    });
    let resized = resize_to(&img, 28, 28, FilterType::Triangle).unwrap();

    assert!(resized.pixels().any(|p| p[0] > 0 && p[0] < 255));
}

#[test]
fn zero_target_is_rejected() {
    let img: GrayImage = ImageBuffer::from_pixel(10, 10, Luma([0]));
    assert_eq!(
        resize_to(&img, 0, 28, FilterType::Triangle).unwrap_err(),
        PreprocessError::InvalidTargetSize { width: 0, height: 28 }
    );
}

#[test]
fn tensor_is_samples_over_255_in_row_major_order() {
    let img: GrayImage = ImageBuffer::from_fn(28, 28, |x, y| Luma([((x * 9 + y * 3) % 256) as u8]));
    let tensor = InputTensor::from_gray(&img).unwrap();

    assert_eq!(tensor.len(), 784);
    assert_eq!((tensor.width(), tensor.height()), (28, 28));

    for (i, value) in tensor.as_slice().iter().enumerate() {
        let (x, y) = ((i % 28) as u32, (i / 28) as u32);
        assert_eq!(*value, img.get_pixel(x, y)[0] as f32 / 255.0);
        assert!((0.0..=1.0).contains(value));
    }
}

#[test]
fn tensor_endpoints() {
    let img: GrayImage = ImageBuffer::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 255 }]));
    let tensor = InputTensor::from_gray(&img).unwrap();
    assert_eq!(tensor.as_slice(), &[0.0, 1.0]);
}

#[test]
fn explicit_tensor_checks_length_and_clamps() {
    let err = InputTensor::new(28, 28, vec![0.5; 100]).unwrap_err();
    assert_eq!(err, PreprocessError::TensorShape { expected: 784, actual: 100 });

    let tensor = InputTensor::new(2, 1, vec![-0.5, 1.5]).unwrap();
    assert_eq!(tensor.into_vec(), vec![0.0, 1.0]);
}

#[test]
fn empty_gray_image_has_no_tensor() {
    let img = GrayImage::new(0, 0);
    assert_eq!(
        InputTensor::from_gray(&img).unwrap_err(),
        PreprocessError::TensorShape { expected: 0, actual: 0 }
    );
}
