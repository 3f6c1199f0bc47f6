//! Integration tests for file-based hashing.
//!
//! These tests verify end-to-end behavior including:
//! - Directory scanning
//! - Extension/content cross-checking on real files
//! - Per-file failure isolation

use assert_fs::prelude::*;
use image::{DynamicImage, ImageBuffer, Rgb, Rgba};
use image_blockhash::core::decode::{self, DispatchConfig, DispatchNotice, ImageSource};
use image_blockhash::core::hasher::{HashMethod, HasherConfig};
use image_blockhash::core::pipeline::Pipeline;
use image_blockhash::core::{hamming_distance, ContainerFormat};
use image_blockhash::error::{BlockhashError, DecodeError};
use predicates::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;

fn encode(image: &DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

/// Dark left half, bright right half, with a soft horizontal band
fn split_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        let base: u8 = if x < width / 2 { 30 } else { 210 };
        let band = if y > height / 3 && y < height / 2 { 20 } else { 0 };
        Rgb([base + band, base + band, base + band])
    }))
}

#[test]
fn png_and_jpeg_of_same_picture_are_close() {
    let image = split_image(96, 96);
    let png = encode(&image, image::ImageFormat::Png);
    let jpeg = encode(&image, image::ImageFormat::Jpeg);

    let hasher = HasherConfig::new().bits(8).build().unwrap();
    let config = DispatchConfig::default();

    let from_png = hasher
        .hash_source(&ImageSource::buffer(png, Some("a.png".into())), &config)
        .unwrap();
    let from_jpeg = hasher
        .hash_source(&ImageSource::buffer(jpeg, Some("a.jpg".into())), &config)
        .unwrap();

    assert!(hamming_distance(&from_png, &from_jpeg).unwrap() <= 4);
}

#[test]
fn pipeline_hashes_a_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    let image = split_image(64, 64);

    temp.child("one.png")
        .write_binary(&encode(&image, image::ImageFormat::Png))
        .unwrap();
    temp.child("sub").create_dir_all().unwrap();
    temp.child("sub/two.jpg")
        .write_binary(&encode(&image, image::ImageFormat::Jpeg))
        .unwrap();
    temp.child("readme.txt").write_str("not an image").unwrap();
    temp.child("one.png").assert(predicate::path::exists());

    let result = Pipeline::builder()
        .paths(vec![temp.path().to_path_buf()])
        .bits(8)
        .method(HashMethod::Precise)
        .build()
        .run()
        .unwrap();

    assert_eq!(result.entries.len(), 2);
    assert_eq!(result.succeeded(), 2);
    assert_eq!(result.entries[1].format, Some(ContainerFormat::Jpeg));
    for entry in &result.entries {
        assert_eq!(entry.fingerprint.as_ref().map(|f| f.len()), Some(64));
    }
}

#[test]
fn mislabelled_file_is_a_format_mismatch() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("actually_png.jpg");
    file.write_binary(&encode(&split_image(16, 16), image::ImageFormat::Png))
        .unwrap();

    let result = decode::load(&ImageSource::path(file.path()), &DispatchConfig::default());
    match result {
        Err(DecodeError::FormatMismatch {
            extension,
            detected,
        }) => {
            assert_eq!(extension, "jpg");
            assert_eq!(detected, ContainerFormat::Png);
        }
        other => panic!("expected mismatch, got {:?}", other.map(|d| d.format)),
    }
}

#[test]
fn file_without_extension_is_sniffed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("upload");
    file.write_binary(&encode(&split_image(16, 16), image::ImageFormat::Png))
        .unwrap();

    let decoded =
        decode::load(&ImageSource::path(file.path()), &DispatchConfig::verbose(true)).unwrap();
    assert_eq!(decoded.format, ContainerFormat::Png);
    assert_eq!(decoded.notice, Some(DispatchNotice::ExtensionUnchecked));
}

#[test]
fn corrupt_file_fails_alone() {
    let temp = assert_fs::TempDir::new().unwrap();
    let image = split_image(32, 32);
    let mut truncated = encode(&image, image::ImageFormat::Png);
    truncated.truncate(40);

    temp.child("a_good.png")
        .write_binary(&encode(&image, image::ImageFormat::Png))
        .unwrap();
    temp.child("b_corrupt.png").write_binary(&truncated).unwrap();
    temp.child("c_junk.png").write_str("this is not a valid image file").unwrap();

    let result = Pipeline::builder()
        .paths(vec![temp.path().to_path_buf()])
        .bits(4)
        .build()
        .run()
        .unwrap();

    assert_eq!(result.entries.len(), 3);
    assert!(result.entries[0].is_ok());
    assert!(result.entries[1].error.is_some());
    assert!(result.entries[2].error.is_some());
}

#[test]
fn nonexistent_path_is_reported() {
    let result = Pipeline::builder()
        .paths(vec![PathBuf::from("/nonexistent/path/that/does/not/exist")])
        .build()
        .run()
        .unwrap();

    assert!(result.entries.is_empty());
    assert_eq!(result.scan_errors.len(), 1);
}

#[test]
fn hash_source_surfaces_decode_errors_unchanged() {
    let hasher = HasherConfig::new().build().unwrap();
    let source = ImageSource::buffer(b"definitely not an image".to_vec(), Some("x.webp".into()));

    let result = hasher.hash_source(&source, &DispatchConfig::default());
    assert!(matches!(
        result,
        Err(BlockhashError::Decode(DecodeError::Unsupported { .. }))
    ));
}

#[test]
fn transparent_png_hashes_like_white() {
    let transparent = DynamicImage::ImageRgba8(ImageBuffer::from_fn(32, 32, |x, _| {
        if x < 16 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([0, 0, 0, 255])
        }
    }));
    let white = DynamicImage::ImageRgba8(ImageBuffer::from_fn(32, 32, |x, _| {
        if x < 16 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    }));

    let hasher = HasherConfig::new().bits(4).build().unwrap();
    let config = DispatchConfig::default();
    let a = hasher
        .hash_source(
            &ImageSource::buffer(
                encode(&transparent, image::ImageFormat::Png),
                Some("t.png".into()),
            ),
            &config,
        )
        .unwrap();
    let b = hasher
        .hash_source(
            &ImageSource::buffer(encode(&white, image::ImageFormat::Png), Some("w.png".into())),
            &config,
        )
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_hex(), "cccc");
}

#[test]
fn webp_file_hashes_through_the_pipeline() {
    let temp = assert_fs::TempDir::new().unwrap();
    let image = split_image(48, 48);
    temp.child("photo.webp")
        .write_binary(&encode(&image, image::ImageFormat::WebP))
        .unwrap();
    temp.child("photo.png")
        .write_binary(&encode(&image, image::ImageFormat::Png))
        .unwrap();

    let result = Pipeline::builder()
        .paths(vec![temp.path().to_path_buf()])
        .bits(8)
        .build()
        .run()
        .unwrap();

    assert_eq!(result.succeeded(), 2);
    let formats: Vec<_> = result.entries.iter().map(|e| e.format).collect();
    assert_eq!(formats, vec![Some(ContainerFormat::Png), Some(ContainerFormat::WebP)]);
    // Lossless WebP carries the same pixels as the PNG
    assert_eq!(result.entries[0].fingerprint, result.entries[1].fingerprint);
}
