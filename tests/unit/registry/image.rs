//! Tests for image size validation and test image accessors

#[cfg(test)]
mod tests {
    use crate::io::configuration::MAX_IMAGE_DIMENSION;
    use crate::io::error::PhantomError;
    use crate::registry::image::{ImageSize, TestImage};
    use ndarray::array;

    // Tests sizes within the limits validate and map to array shapes
    // Verified by swapping width and height in the shape
    #[test]
    fn test_valid_size() {
        let size = ImageSize::new(3, 5).validate().expect("valid size");
        assert_eq!(size.shape(), (3, 5));
        assert_eq!(size.to_string(), "3x5");
        assert_eq!(ImageSize::from((3, 5)), size);
    }

    // Tests zero and oversized extents are rejected naming the size
    // Verified by checking only the width
    #[test]
    fn test_invalid_sizes() {
        for size in [
            ImageSize::new(0, 4),
            ImageSize::new(4, 0),
            ImageSize::new(MAX_IMAGE_DIMENSION + 1, 1),
        ] {
            let error = size.validate().expect_err("invalid size");
            assert!(matches!(
                error,
                PhantomError::InvalidParameter { ref parameter, .. } if parameter == "size"
            ));
        }
    }

    // Tests accessors expose name, pixels and size, and ownership can be taken
    // Verified by returning a copy from into_pixels
    #[test]
    fn test_image_accessors() {
        let pixels = array![[0.0, 2.5], [1.0, 0.0]];
        let image = TestImage::new("ramp".to_string(), pixels.clone(), ImageSize::new(2, 2));

        assert_eq!(image.name(), "ramp");
        assert_eq!(image.size(), ImageSize::new(2, 2));
        assert_eq!(image.pixels(), &pixels);
        assert!((image.max_value() - 2.5).abs() < f64::EPSILON);
        assert_eq!(image.into_pixels(), pixels);
    }
}
