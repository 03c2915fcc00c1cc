/// Pixel ratios above this render more pixels than they add clarity.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// The drawable surface description: logical size plus device pixel ratio.
///
/// The windowing environment is the source of truth; a `Viewport` is the
/// snapshot taken at a resize. All consumers (surface configuration, render
/// targets, camera projection) must be updated from one snapshot in one
/// synchronous batch, so none observes a stale combination of the three
/// fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Build from logical dimensions. Zero dimensions are clamped to 1;
    /// the pixel ratio is clamped to [1, `MAX_PIXEL_RATIO`].
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO),
        }
    }

    /// Build from a window's physical size and scale factor (the winit
    /// resize payload).
    pub fn from_physical(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        let scale = scale_factor.max(1.0);
        Self::new(
            (physical_width as f64 / scale).round() as u32,
            (physical_height as f64 / scale).round() as u32,
            scale as f32,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Width of the backing store in device pixels.
    pub fn physical_width(&self) -> u32 {
        ((self.width as f32 * self.pixel_ratio).round() as u32).max(1)
    }

    /// Height of the backing store in device pixels.
    pub fn physical_height(&self) -> u32 {
        ((self.height as f32 * self.pixel_ratio).round() as u32).max(1)
    }

    /// Width over height. What the camera projection consumes.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}

/// Bloom pass parameters, with the demo's deployment defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    /// Multiplier on the blurred glow at composite time.
    pub strength: f32,
    /// Blur spread, as a fraction of the glow target size.
    pub radius: f32,
    /// Luminance below this contributes nothing to the glow.
    pub threshold: f32,
    /// Soft-knee width around the threshold; 0 is a hard cut.
    pub smoothing: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: 2.0,
            radius: 0.4,
            threshold: 0.0,
            smoothing: 0.85,
        }
    }
}
