/// Display and drawing-buffer sizes of a render surface
use std::fmt;

/// Size of a drawing buffer in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// How large the surface is shown: CSS (logical) size plus the display's
/// device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl DisplaySize {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// Backing size in device pixels, truncated toward zero.
    pub fn drawing_buffer_size(&self) -> PixelSize {
        PixelSize {
            width: (self.css_width * self.device_pixel_ratio) as u32,
            height: (self.css_height * self.device_pixel_ratio) as u32,
        }
    }

    /// Width over height of the displayed element, `None` while it has no height.
    pub fn aspect(&self) -> Option<f32> {
        if self.css_height > 0.0 {
            Some((self.css_width / self.css_height) as f32)
        } else {
            None
        }
    }

    /// The buffer size to switch to, or `None` if `current` already matches.
    pub fn resize_from(&self, current: PixelSize) -> Option<PixelSize> {
        let wanted = self.drawing_buffer_size();
        (wanted != current).then_some(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_truncates() {
        let display = DisplaySize::new(333.0, 101.0, 1.5);
        // 499.5 x 151.5
        assert_eq!(display.drawing_buffer_size(), PixelSize::new(499, 151));
    }

    #[test]
    fn test_buffer_size_for_many_ratios() {
        for ratio in [0.5, 1.0, 1.25, 2.0, 2.625, 3.0] {
            for (w, h) in [(300.0, 150.0), (1.0, 1.0), (1023.5, 767.25)] {
                let display = DisplaySize::new(w, h, ratio);
                let size = display.drawing_buffer_size();
                assert_eq!(size.width, (w * ratio).trunc() as u32);
                assert_eq!(size.height, (h * ratio).trunc() as u32);
            }
        }
    }

    #[test]
    fn test_resize_only_when_different() {
        let display = DisplaySize::new(300.0, 150.0, 2.0);
        assert_eq!(display.resize_from(PixelSize::new(300, 150)), Some(PixelSize::new(600, 300)));
        assert_eq!(display.resize_from(PixelSize::new(600, 300)), None);
    }

    #[test]
    fn test_zero_height_has_no_aspect() {
        assert_eq!(DisplaySize::new(300.0, 0.0, 1.0).aspect(), None);
        assert_eq!(DisplaySize::new(300.0, 150.0, 1.0).aspect(), Some(2.0));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(PixelSize::new(640, 480).to_string(), "640x480");
    }
}
