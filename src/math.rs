//! Resolution scaling math.

/// Factors mapping coordinates in the designed resolution to the back buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Horizontal factor.
    pub x: f32,
    /// Vertical factor.
    pub y: f32,
    /// Lowest of both axis ratios, used for anything that must never be distorted such as text.
    pub no_stretch: f32,
}

impl Scaling {
    /// Calculate the scaling from the designed resolution to the back buffer resolution.
    ///
    /// # Arguments
    ///
    /// * `(design_width, design_height)` - Resolution the game is designed for.
    /// * `(buffer_width, buffer_height)` - Resolution of the back buffer.
    /// * `stretch` - When `true` each axis fills the back buffer independently, when `false` both axes use the lowest ratio so the aspect ratio is preserved.
    ///
    /// # Example
    ///
    /// ```
    /// # use sprig::math::Scaling;
    /// let scaling = Scaling::new((1024, 768), (1280, 720), false);
    /// assert_eq!(scaling.x, 0.9375);
    /// assert_eq!(scaling.y, 0.9375);
    /// ```
    #[inline]
    #[must_use]
    pub fn new(
        (design_width, design_height): (u32, u32),
        (buffer_width, buffer_height): (u32, u32),
        stretch: bool,
    ) -> Self {
        let ratio_x = buffer_width as f32 / design_width as f32;
        let ratio_y = buffer_height as f32 / design_height as f32;
        let no_stretch = ratio_x.min(ratio_y);

        if stretch {
            Self {
                x: ratio_x,
                y: ratio_y,
                no_stretch,
            }
        } else {
            Self {
                x: no_stretch,
                y: no_stretch,
                no_stretch,
            }
        }
    }
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            no_stretch: 1.0,
        }
    }
}
