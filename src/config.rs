/// How the ends of a line are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// The line ends exactly at its endpoints.
    #[default]
    Butt,
    /// The line extends by half its width past each endpoint.
    Square,
}

/// Drawing defaults shared by every [`Painter`](crate::Painter) of a context.
///
/// # Example
///
/// ```
/// use ink2d::{DrawConfig, LineCap};
///
/// let config = DrawConfig::default()
///     .circle_segments(32)
///     .line_cap(LineCap::Square)
///     .global_alpha(0.8);
/// assert_eq!(config.circle_segments, 32);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DrawConfig {
    /// Segment count used by `add_circle`/`add_ellipse` when none is given
    pub circle_segments: u32,
    /// Stroke width used when a call passes `None`
    pub line_width: f32,
    pub line_cap: LineCap,
    /// Multiplied into the alpha of every resolved color
    pub global_alpha: f32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            circle_segments: 64,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            global_alpha: 1.0,
        }
    }
}

impl DrawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circle_segments(mut self, segments: u32) -> Self {
        self.circle_segments = segments;
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    pub fn global_alpha(mut self, alpha: f32) -> Self {
        self.global_alpha = alpha.clamp(0.0, 1.0);
        self
    }
}
