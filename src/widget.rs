use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::{AnimatorState, ValueAnimator};
use crate::canvas::{RectF, Surface};
use crate::config::MoonConfig;
use crate::error::Result;
use crate::layout::Bounds;
use crate::measure::{dp_to_px, measure_square, MeasureSpec, Size};
use crate::paint::{Color, Style};

/// Callback through which a widget asks its host for a future redraw.
pub type Invalidator = Box<dyn FnMut()>;

/// The lifecycle a host drives a widget through.
pub trait View {
    /// Resolves the widget's size for this layout pass.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size;
    /// Receives the final bounds, which may differ from the measured size.
    fn layout(&mut self, bounds: Bounds);
    fn render(&self, surface: &mut dyn Surface);
    fn on_attach(&mut self);
    fn on_detach(&mut self);
}

/// A circle revealed by a clockwise sweep from 12 o'clock.
pub struct MoonView {
    fill: Style,
    outline: Style,
    preferred_dp: u32,
    preferred_diameter: u32,
    measured: Option<Size>,
    diameter: i32,
    start_angle: f32,
    sweep_angle: f32,
    animator: ValueAnimator,
    attached: bool,
    invalidator: Option<Invalidator>,
}

impl MoonView {
    pub fn new(config: &MoonConfig) -> Self {
        let density = config.density.unwrap_or(1.0);
        let preferred_diameter = dp_to_px(config.preferred_diameter_dp, density);
        Self {
            fill: Style::fill(config.fill_color),
            outline: Style::stroke(config.outline_color, config.outline_width),
            preferred_dp: config.preferred_diameter_dp,
            preferred_diameter,
            measured: None,
            diameter: preferred_diameter as i32,
            start_angle: config.start_angle,
            sweep_angle: 0.0,
            animator: ValueAnimator::new(
                0.0,
                config.target_sweep,
                config.animation_duration,
                config.easing,
            ),
            attached: false,
            invalidator: None,
        }
    }

    pub fn with_invalidator<F>(mut self, invalidator: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.invalidator = Some(Box::new(invalidator));
        self
    }

    fn invalidate(&mut self) {
        if let Some(invalidate) = self.invalidator.as_mut() {
            invalidate();
        }
    }

    /// Rescales the preferred diameter. Takes effect on the next measure.
    pub fn set_density(&mut self, density: f64) {
        self.preferred_diameter = dp_to_px(self.preferred_dp, density);
        trace!(density, preferred = self.preferred_diameter, "density changed");
    }

    pub fn preferred_diameter(&self) -> u32 {
        self.preferred_diameter
    }

    /// Measures from packed specs, rejecting unrecognized mode bits.
    pub fn measure_packed(&mut self, width: u32, height: u32) -> Result<Size> {
        let width = MeasureSpec::unpack(width)?;
        let height = MeasureSpec::unpack(height)?;
        Ok(self.measure(width, height))
    }

    pub fn measured_size(&self) -> Option<Size> {
        self.measured
    }

    pub fn diameter(&self) -> i32 {
        self.diameter
    }

    pub fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    pub fn fill_color(&self) -> Color {
        self.fill.color
    }

    pub fn outline_color(&self) -> Color {
        self.outline.color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill.color = color;
        self.invalidate();
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.outline.color = color;
        self.invalidate();
    }

    fn set_sweep_angle(&mut self, angle: f32) {
        self.sweep_angle = angle;
        self.invalidate();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn animation_state(&self) -> AnimatorState {
        self.animator.state()
    }

    pub fn is_animating(&self) -> bool {
        self.attached && self.animator.is_running()
    }

    /// Delivers one animation frame, `elapsed` being the time since attach.
    /// Returns false when no frame was applied: detached, not started, or
    /// already finished.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.attached {
            return false;
        }
        match self.animator.tick(elapsed) {
            Some(angle) => {
                trace!(angle, ?elapsed, "sweep tick");
                self.set_sweep_angle(angle);
                true
            }
            None => false,
        }
    }
}

impl View for MoonView {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let size = measure_square(width, height, self.preferred_diameter);
        debug!(?width, ?height, side = size.width, "measured");
        self.measured = Some(size);
        size
    }

    fn layout(&mut self, bounds: Bounds) {
        self.diameter = bounds.diameter();
        debug!(?bounds, diameter = self.diameter, "laid out");
    }

    fn render(&self, surface: &mut dyn Surface) {
        let d = self.diameter as f32;
        let oval = RectF::new(0.0, 0.0, d, d);
        surface.draw_arc(oval, self.start_angle, self.sweep_angle, &self.fill);
        surface.draw_arc(oval, self.start_angle, self.sweep_angle, &self.outline);
    }

    fn on_attach(&mut self) {
        self.attached = true;
        if self.animator.state() == AnimatorState::Idle {
            self.animator.set_from(self.sweep_angle);
            self.animator.start();
        }
        debug!(state = ?self.animator.state(), "attached");
    }

    fn on_detach(&mut self) {
        self.attached = false;
        self.animator.cancel();
        debug!("detached");
    }
}

impl fmt::Debug for MoonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoonView")
            .field("fill", &self.fill)
            .field("outline", &self.outline)
            .field("diameter", &self.diameter)
            .field("sweep_angle", &self.sweep_angle)
            .field("animator", &self.animator.state())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}
