//! Prepares a raster for the tracer: grayscale, inverted binary threshold,
//! stroke-thickening dilation, and a final inversion so ink is black on
//! white. Also encodes the result as the uncompressed BMP the tracer reads
//! from its input stream.

use std::io::Cursor;

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

use crate::error::TraceError;

/// Gray level above which a pixel counts as background.
const INK_THRESHOLD: u8 = 120;
/// L-infinity radius of the stroke-thickening dilation.
const DILATE_RADIUS: u8 = 1;

pub fn prepare(source: &DynamicImage) -> GrayImage {
    let gray = source.to_luma8();
    // Dark ink becomes the white foreground the dilation operates on.
    let mask = threshold(&gray, INK_THRESHOLD, ThresholdType::BinaryInverted);
    let mut mask = dilate(&mask, Norm::LInf, DILATE_RADIUS);
    // The tracer expects black ink on white ground.
    image::imageops::colorops::invert(&mut mask);
    mask
}

pub fn encode_bmp(bitmap: &GrayImage) -> Result<Vec<u8>, TraceError> {
    let mut cursor = Cursor::new(Vec::new());
    bitmap
        .write_to(&mut cursor, image::ImageFormat::Bmp)
        .map_err(TraceError::BitmapEncode)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn dark_ink_maps_to_black_on_white() {
        let mut gray = GrayImage::from_pixel(7, 7, Luma([200u8]));
        gray.put_pixel(3, 3, Luma([50u8]));
        let prepared = prepare(&DynamicImage::ImageLuma8(gray));

        assert_eq!(prepared.get_pixel(3, 3), &Luma([0u8]));
        assert_eq!(prepared.get_pixel(0, 0), &Luma([255u8]));
        // Radius-1 dilation thickens the dot to a 3x3 block.
        assert_eq!(prepared.get_pixel(2, 2), &Luma([0u8]));
        assert_eq!(prepared.get_pixel(4, 4), &Luma([0u8]));
        assert_eq!(prepared.get_pixel(1, 1), &Luma([255u8]));
    }

    #[test]
    fn threshold_boundary() {
        // 120 is still ink, 121 is background. Samples sit further apart
        // than the dilation radius.
        let gray = GrayImage::from_fn(5, 1, |x, _| Luma([if x == 0 { 120 } else { 121 }]));
        let prepared = prepare(&DynamicImage::ImageLuma8(gray));
        assert_eq!(prepared.get_pixel(0, 0), &Luma([0u8]));
        assert_eq!(prepared.get_pixel(4, 0), &Luma([255u8]));
    }

    #[test]
    fn bmp_encoding_produces_a_bmp_header() {
        let bitmap = GrayImage::from_pixel(4, 4, Luma([255u8]));
        let bytes = encode_bmp(&bitmap).unwrap();
        assert_eq!(&bytes[..2], b"BM");
    }
}
