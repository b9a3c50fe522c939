use std::ops::Range;

/// Square of side `2 * radius` centred on the frame.
///
/// Carries the nominal (unclipped) geometry; [`SamplingWindow::clipped`]
/// yields the part that actually lies inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingWindow {
    pub center_x: i64,
    pub center_y: i64,
    pub radius: i64,
}

impl SamplingWindow {
    pub fn centered(width: u32, height: u32, radius: u32) -> Self {
        Self {
            center_x: i64::from(width / 2),
            center_y: i64::from(height / 2),
            radius: i64::from(radius),
        }
    }

    /// `(2 * radius)^2`, regardless of how much of the window is in bounds.
    pub fn nominal_area(&self) -> u64 {
        let side = (2 * self.radius) as u64;
        side * side
    }

    /// Column and row ranges of the window clipped to a `width` x `height` frame.
    pub fn clipped(&self, width: u32, height: u32) -> (Range<usize>, Range<usize>) {
        let cols = clip(self.center_x, self.radius, width);
        let rows = clip(self.center_y, self.radius, height);
        (cols, rows)
    }
}

fn clip(center: i64, radius: i64, limit: u32) -> Range<usize> {
    let limit = i64::from(limit);
    let start = (center - radius).clamp(0, limit);
    let end = (center + radius).clamp(start, limit);
    start as usize..end as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_nominal_area_ignores_frame() {
        let w = SamplingWindow::centered(10, 10, 60);
        assert_eq!(w.nominal_area(), 14_400);
    }

    #[test]
    fn test_center_uses_floor() {
        let w = SamplingWindow::centered(201, 99, 60);
        assert_eq!((w.center_x, w.center_y), (100, 49));
    }

    #[rstest]
    #[case::fully_inside(640, 480, 260..380, 180..300)]
    #[case::clipped_both(60, 60, 0..60, 0..60)]
    #[case::clipped_rows(640, 100, 260..380, 0..100)]
    #[case::single_pixel(1, 1, 0..1, 0..1)]
    fn test_clipped(
        #[case] width: u32,
        #[case] height: u32,
        #[case] cols: Range<usize>,
        #[case] rows: Range<usize>,
    ) {
        let w = SamplingWindow::centered(width, height, 60);
        assert_eq!(w.clipped(width, height), (cols, rows));
    }
}
