use ndarray::ArrayView3;

use crate::shared::constants::RGBA_CHANNELS;
use crate::shared::frame_error::FrameError;

/// One captured frame: RGBA bytes in row-major order, 4 channels per pixel.
///
/// Sources convert whatever they decode into this layout; the classifier
/// only ever borrows it for the duration of one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Result<Self, FrameError> {
        check_dimensions(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
            index,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Position of this frame in its source stream.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        rgba_view(&self.data, self.width, self.height)
            .expect("PixelBuffer length is validated at construction")
    }
}

/// Fails with [`FrameError::InvalidDimensions`] unless `len == width * height * 4`
/// and both dimensions are positive.
pub fn check_dimensions(len: usize, width: u32, height: u32) -> Result<(), FrameError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|p| p.checked_mul(RGBA_CHANNELS));
    if width == 0 || height == 0 || expected != Some(len) {
        return Err(FrameError::InvalidDimensions {
            width,
            height,
            actual: len,
        });
    }
    Ok(())
}

/// Borrows a raw RGBA slice as a `(height, width, 4)` array after validating it.
pub fn rgba_view(data: &[u8], width: u32, height: u32) -> Result<ArrayView3<'_, u8>, FrameError> {
    check_dimensions(data.len(), width, height)?;
    ArrayView3::from_shape((height as usize, width as usize, RGBA_CHANNELS), data).map_err(|_| {
        FrameError::InvalidDimensions {
            width,
            height,
            actual: data.len(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let frame = PixelBuffer::new(data.clone(), 2, 2, 5).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[rstest]
    #[case::short(2, 2, 15)]
    #[case::long(2, 2, 17)]
    #[case::rgb_sized(2, 2, 12)]
    #[case::zero_width(0, 4, 0)]
    #[case::zero_height(4, 0, 0)]
    fn test_rejects_mismatched_length(#[case] w: u32, #[case] h: u32, #[case] len: usize) {
        let err = PixelBuffer::new(vec![0u8; len], w, h, 0).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidDimensions {
                width: w,
                height: h,
                actual: len
            }
        );
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = PixelBuffer::new(vec![0u8; 32], 4, 2, 0).unwrap(); // 2 rows of 4
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 4]);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGBA: set pixel (row=1, col=0) green
        let mut data = vec![0u8; 16];
        data[9] = 200;
        let frame = PixelBuffer::new(data, 2, 2, 0).unwrap();
        let arr = frame.as_ndarray();
        assert_eq!(arr[[1, 0, 0]], 0);
        assert_eq!(arr[[1, 0, 1]], 200);
        assert_eq!(arr[[1, 0, 2]], 0);
    }

    #[test]
    fn test_huge_dimensions_do_not_overflow() {
        assert!(check_dimensions(16, u32::MAX, u32::MAX).is_err());
    }
}
