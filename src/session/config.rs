use crate::angle::AngleConvention;
use crate::math::Point2;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What a session does with its legs after a successful draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AfterDraw {
    /// Discard the legs and return to `Empty`.
    Clear,
    /// Keep the legs for further edits.
    #[default]
    Keep,
}

/// Settings for a [`super::TraverseSession`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Starting point of the traverse until the user picks another.
    pub base_point: Point2,
    /// Convention leg bearings are read in, and closure bearings reported in.
    pub convention: AngleConvention,
    /// Behaviour after the traverse has been committed.
    pub after_draw: AfterDraw,
    /// Decimal places used when formatting distances for display.
    pub display_decimals: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_point: Point2::origin(),
            convention: AngleConvention::AZIMUTH,
            after_draw: AfterDraw::default(),
            display_decimals: 3,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_base_point(mut self, base_point: Point2) -> Self {
        self.base_point = base_point;
        self
    }

    #[must_use]
    pub fn with_convention(mut self, convention: AngleConvention) -> Self {
        self.convention = convention;
        self
    }

    #[must_use]
    pub fn with_after_draw(mut self, after_draw: AfterDraw) -> Self {
        self.after_draw = after_draw;
        self
    }

    #[must_use]
    pub fn with_display_decimals(mut self, display_decimals: usize) -> Self {
        self.display_decimals = display_decimals;
        self
    }
}
