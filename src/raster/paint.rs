use image::Rgba;

/// How a stroke is laid down on the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgba<u8>,
    pub width: f32,
    /// Blend partial coverage at the stroke edge; otherwise pixels are fully
    /// painted or untouched.
    pub anti_alias: bool,
}

impl Paint {
    /// Thin black anti-aliased ink
    pub fn pen(width: f32) -> Self {
        Self {
            color: Rgba([0, 0, 0, 255]),
            width,
            anti_alias: true,
        }
    }

    /// Wide white hard-edged stroke with round caps and joins
    pub fn eraser(width: f32) -> Self {
        Self {
            color: Rgba([255, 255, 255, 255]),
            width,
            anti_alias: false,
        }
    }

    /// Fraction of a pixel covered at `distance` from the centre line
    pub fn coverage(&self, distance: f32) -> f32 {
        let half = self.width / 2.0;
        if self.anti_alias {
            (half + 0.5 - distance).clamp(0.0, 1.0)
        } else if distance <= half {
            1.0
        } else {
            0.0
        }
    }
}
