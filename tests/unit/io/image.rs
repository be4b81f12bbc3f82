//! Tests for array <-> image file conversion and PNG export

#[cfg(test)]
mod tests {
    use crate::io::error::PhantomError;
    use crate::io::image::{export_png, load_luma, luma_to_array, to_gray_image};
    use crate::registry::image::{ImageSize, TestImage};
    use image::{GrayImage, ImageBuffer, Luma};
    use ndarray::array;

    fn sample_image() -> TestImage {
        TestImage::new(
            "sample".to_string(),
            array![[0.0, 1.0], [2.0, 0.5], [4.0, 0.0]],
            ImageSize::new(3, 2),
        )
    }

    // Tests the first array axis maps to image x
    // Verified by transposing during conversion
    #[test]
    fn test_luma_to_array_orientation() {
        let mut luma = ImageBuffer::<Luma<f32>, Vec<f32>>::new(3, 2);
        luma.put_pixel(2, 0, Luma([0.75]));
        luma.put_pixel(0, 1, Luma([0.25]));

        let pixels = luma_to_array(&luma);
        assert_eq!(pixels.dim(), (3, 2));
        assert_eq!(pixels.get([2, 0]), Some(&0.75));
        assert_eq!(pixels.get([0, 1]), Some(&0.25));
        assert_eq!(pixels.get([1, 1]), Some(&0.0));
    }

    // Tests rendering scales the maximum to white
    // Verified by clamping instead of normalising
    #[test]
    fn test_gray_rendering_normalises_to_max() {
        let gray = to_gray_image(&sample_image());

        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.get_pixel(2, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 128);
        assert_eq!(gray.get_pixel(0, 0).0[0], 0);
    }

    // Tests an all-zero image renders black without dividing by zero
    // Verified by scaling with 255 / max unconditionally
    #[test]
    fn test_zero_image_renders_black() {
        let image = TestImage::new(
            "blank".to_string(),
            ndarray::Array2::zeros((4, 4)),
            ImageSize::new(4, 4),
        );
        let gray = to_gray_image(&image);
        assert!(gray.pixels().all(|p| p.0[0] == 0));
    }

    // Tests PNG export creates directories and reloads with the same layout
    // Verified by skipping parent directory creation
    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("sample.png");

        export_png(&sample_image(), &path).expect("export succeeds");
        let reloaded = load_luma(&path).expect("load succeeds");

        assert_eq!(reloaded.dim(), (3, 2));
        assert_eq!(reloaded.get([2, 0]), Some(&1.0));
        assert_eq!(reloaded.get([0, 0]), Some(&0.0));
    }

    // Tests loading a file that is not an image reports the path
    // Verified by returning an empty array on decode failure
    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").expect("write file");

        let error = load_luma(&path).expect_err("decode fails");
        assert!(matches!(error, PhantomError::ImageLoad { .. }));
        assert!(error.to_string().contains("broken.png"));
    }

    // Tests an 8-bit image loads into [0, 1]
    // Verified by keeping raw byte values
    #[test]
    fn test_load_scales_to_unit_range() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ramp.png");
        let ramp = GrayImage::from_fn(4, 1, |x, _| Luma([(x * 85) as u8]));
        ramp.save(&path).expect("save ramp");

        let pixels = load_luma(&path).expect("load succeeds");
        assert!(pixels.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(pixels.get([3, 0]), Some(&1.0));
    }
}
