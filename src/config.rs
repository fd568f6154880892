use std::time::Duration;

use bon::Builder;

use crate::animation::Easing;
use crate::layout::Padding;
use crate::measure::MeasureSpec;
use crate::paint::Color;

/// How the widget asks its parent to size one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeRequest {
    /// As large as the widget wants, but no larger than the parent.
    #[default]
    WrapContent,
    /// Exactly the space the parent offers.
    MatchParent,
    /// A fixed pixel size.
    Fixed(u32),
    /// No bound at all, as inside a scrolling container.
    Unbounded,
}

impl SizeRequest {
    /// The constraint a parent with `available` pixels hands down for this request.
    pub fn to_spec(self, available: u32) -> MeasureSpec {
        match self {
            SizeRequest::WrapContent => MeasureSpec::at_most(available),
            SizeRequest::MatchParent => MeasureSpec::exactly(available),
            SizeRequest::Fixed(size) => MeasureSpec::exactly(size),
            SizeRequest::Unbounded => MeasureSpec::unspecified(),
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct MoonConfig {
    // Widget configuration
    #[builder(default = 80)]
    pub preferred_diameter_dp: u32,
    /// Pixels per dp. Falls back to the window scale factor, then 1.0.
    pub density: Option<f64>,
    #[builder(default)]
    pub padding: Padding,
    #[builder(default)]
    pub layout_width: SizeRequest,
    #[builder(default)]
    pub layout_height: SizeRequest,

    // Colors
    #[builder(default = Color::YELLOW)]
    pub fill_color: Color,
    #[builder(default = Color::DARK_GRAY)]
    pub outline_color: Color,
    #[builder(default = 1.0)]
    pub outline_width: f32,

    // Animation configuration
    #[builder(default = -90.0)]
    pub start_angle: f32,
    #[builder(default = 360.0)]
    pub target_sweep: f32,
    #[builder(default = Duration::from_millis(1000))]
    pub animation_duration: Duration,
    #[builder(default)]
    pub easing: Easing,

    // Window configuration
    #[builder(default = "Moon".to_string())]
    pub title: String,
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MeasureMode;

    #[test]
    fn defaults() {
        let config = MoonConfig::default();
        assert_eq!(config.preferred_diameter_dp, 80);
        assert_eq!(config.fill_color, Color::YELLOW);
        assert_eq!(config.outline_color, Color::DARK_GRAY);
        assert_eq!(config.animation_duration, Duration::from_millis(1000));
        assert_eq!(config.start_angle, -90.0);
        assert_eq!(config.target_sweep, 360.0);
        assert_eq!(config.easing, Easing::AccelerateDecelerate);
        assert_eq!(config.padding, Padding::ZERO);
        assert!(config.density.is_none());
    }

    #[test]
    fn builder_overrides() {
        let config = MoonConfig::builder()
            .preferred_diameter_dp(120)
            .fill_color(Color(0xFF00_FF00))
            .density(2.0)
            .easing(Easing::Linear)
            .build();
        assert_eq!(config.preferred_diameter_dp, 120);
        assert_eq!(config.fill_color, Color(0xFF00_FF00));
        assert_eq!(config.density, Some(2.0));
        assert_eq!(config.outline_color, Color::DARK_GRAY);
    }

    #[test]
    fn size_requests_map_to_specs() {
        assert_eq!(SizeRequest::WrapContent.to_spec(200).mode, MeasureMode::AtMost);
        assert_eq!(SizeRequest::MatchParent.to_spec(200), MeasureSpec::exactly(200));
        assert_eq!(SizeRequest::Fixed(64).to_spec(200), MeasureSpec::exactly(64));
        assert_eq!(SizeRequest::Unbounded.to_spec(200).mode, MeasureMode::Unspecified);
    }
}
