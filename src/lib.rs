// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod layout;
pub mod measure;
pub mod paint;
pub mod scene;
pub mod widget;

pub use animation::{AnimatorState, Easing, ValueAnimator};
pub use canvas::{Canvas, RectF, Surface};
pub use config::{MoonConfig, SizeRequest};
pub use error::{MoonError, Result};
pub use layout::{Bounds, Padding};
pub use measure::{MeasureMode, MeasureSpec, Size};
pub use paint::{Color, DrawStyle, Style};
pub use scene::{DrawCommand, Scene};
pub use widget::{MoonView, View};

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, error, info, warn};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// ============================================================================
// PUBLIC API - DESKTOP HOST
// ============================================================================

/// Style changes sent to a running window from any thread.
#[derive(Debug, Clone)]
pub enum MoonCommand {
    SetFillColor(Color),
    SetOutlineColor(Color),
}

/// Hosts a single `MoonView` in a native window.
#[derive(Debug, Clone)]
pub struct MoonWindow {
    config: MoonConfig,
}

impl MoonWindow {
    pub fn new(config: MoonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MoonConfig {
        &self.config
    }

    pub fn show(&self) -> Result<()> {
        self.run_window(None)
    }

    pub fn show_with_commands(&self, receiver: Receiver<MoonCommand>) -> Result<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(&self, receiver: Option<Receiver<MoonCommand>>) -> Result<()> {
        let frame_duration = frame_interval(self.config.max_framerate)?;
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width;
        let mut fb_height = size.height;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let redraw_target = window.clone();
        let mut view = MoonView::new(&self.config)
            .with_invalidator(move || redraw_target.request_redraw());
        if self.config.density.is_none() {
            view.set_density(window.scale_factor());
        }
        let mut origin = place_view(&mut view, &self.config, fb_width, fb_height);

        view.on_attach();
        let attached_at = Instant::now();
        info!(
            title = %self.config.title,
            width = fb_width,
            height = fb_height,
            diameter = view.diameter(),
            "moon window opened"
        );

        let mut scene = Scene::new();
        let mut last_frame = Instant::now();
        let config = &self.config;

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    view.on_detach();
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width;
                    fb_height = new_size.height;
                    if let Err(err) = pixels.resize_buffer(fb_width, fb_height) {
                        warn!(%err, "failed to resize frame buffer");
                    }
                    if let Err(err) = pixels.resize_surface(fb_width, fb_height) {
                        warn!(%err, "failed to resize surface");
                    }
                    origin = place_view(&mut view, config, fb_width, fb_height);
                    window_clone.request_redraw();
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    if config.density.is_none() {
                        view.set_density(scale_factor);
                    }
                }
                WindowEvent::RedrawRequested => {
                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width as usize, fb_height as usize);
                    paint_frame(&mut scene, &view, &mut canvas, origin, config.background_color);
                    if let Err(err) = pixels.render() {
                        error!(%err, "render failed");
                        view.on_detach();
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if let Some(ref receiver) = receiver {
                    apply_commands(&mut view, receiver);
                }
                if last_frame.elapsed() >= frame_duration {
                    if view.is_animating() {
                        view.advance(attached_at.elapsed());
                    }
                    last_frame = Instant::now();
                }
                window_target.set_control_flow(next_control_flow(
                    view.is_animating(),
                    receiver.is_some(),
                    last_frame + frame_duration,
                ));
            }
            _ => {}
        })?;

        Ok(())
    }
}

// ============================================================================
// INTERNAL IMPLEMENTATION
// ============================================================================

/// Runs a measure and layout pass for a window of `width` x `height` pixels
/// and returns where the widget sits, centered in the window.
fn place_view(view: &mut MoonView, config: &MoonConfig, width: u32, height: u32) -> (i32, i32) {
    let size = view.measure(
        config.layout_width.to_spec(width),
        config.layout_height.to_spec(height),
    );
    view.layout(Bounds::new(size.width as i32, size.height as i32, config.padding));
    let x = (width as i32 - size.width as i32) / 2;
    let y = (height as i32 - size.height as i32) / 2;
    debug!(x, y, side = size.width, "widget placed");
    (x, y)
}

/// Time between frames for `max_framerate`, which must be positive and finite.
fn frame_interval(max_framerate: f64) -> Result<Duration> {
    if !(max_framerate.is_finite() && max_framerate > 0.0) {
        return Err(MoonError::InvalidFramerate(max_framerate));
    }
    Ok(Duration::from_secs_f64(1.0 / max_framerate))
}

/// Wakes at frame cadence while something can change, otherwise sleeps
/// until the window system has an event.
fn next_control_flow(animating: bool, has_commands: bool, next_frame: Instant) -> ControlFlow {
    if animating || has_commands {
        ControlFlow::WaitUntil(next_frame)
    } else {
        ControlFlow::Wait
    }
}

/// Records the background and the widget into `scene`, then replays it with
/// the widget placed at `origin`.
fn paint_frame(
    scene: &mut Scene,
    view: &MoonView,
    canvas: &mut Canvas,
    origin: (i32, i32),
    background: Color,
) {
    scene.clear();
    scene.add_command(DrawCommand::Clear(background));
    view.render(scene);
    canvas.translate(origin.0, origin.1);
    scene.render(canvas);
}

fn apply_commands(view: &mut MoonView, receiver: &Receiver<MoonCommand>) {
    while let Ok(command) = receiver.try_recv() {
        match command {
            MoonCommand::SetFillColor(color) => view.set_fill_color(color),
            MoonCommand::SetOutlineColor(color) => view.set_outline_color(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn placement_centers_the_square() {
        let config = MoonConfig::default();
        let mut view = MoonView::new(&config);
        let origin = place_view(&mut view, &config, 300, 200);
        assert_eq!(origin, (110, 60));
        assert_eq!(view.diameter(), 80);
    }

    #[test]
    fn placement_honours_size_requests() {
        let config = MoonConfig::builder()
            .layout_width(SizeRequest::MatchParent)
            .layout_height(SizeRequest::MatchParent)
            .padding(Padding::uniform(20))
            .build();
        let mut view = MoonView::new(&config);
        let origin = place_view(&mut view, &config, 300, 200);
        assert_eq!(origin, (50, 0));
        assert_eq!(view.measured_size(), Some(Size::square(200)));
        assert_eq!(view.diameter(), 160);
    }

    #[test]
    fn frame_interval_rejects_non_positive_rates() {
        assert_eq!(frame_interval(4.0).unwrap(), Duration::from_millis(250));
        for rate in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(frame_interval(rate), Err(MoonError::InvalidFramerate(_))));
        }
    }

    #[test]
    fn idle_loop_waits_for_events() {
        let next = Instant::now() + Duration::from_millis(16);
        assert!(matches!(next_control_flow(false, false, next), ControlFlow::Wait));
        assert!(matches!(next_control_flow(true, false, next), ControlFlow::WaitUntil(t) if t == next));
        assert!(matches!(next_control_flow(false, true, next), ControlFlow::WaitUntil(t) if t == next));
    }

    #[test]
    fn paint_frame_clears_then_draws_the_widget() {
        let config = MoonConfig::default();
        let mut view = MoonView::new(&config);
        let origin = place_view(&mut view, &config, 100, 100);
        view.on_attach();
        view.advance(Duration::from_millis(1000));

        let mut scene = Scene::new();
        let mut frame = vec![0u8; 100 * 100 * 4];
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        paint_frame(&mut scene, &view, &mut canvas, origin, Color::WHITE);

        assert_eq!(scene.commands().len(), 3);
        assert_eq!(scene.commands()[0], DrawCommand::Clear(Color::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(50, 50), Some(Color::YELLOW));
        assert_eq!(canvas.pixel(50, 10), Some(Color::DARK_GRAY));
    }

    #[test]
    fn commands_update_styles() {
        let (sender, receiver) = mpsc::channel();
        let mut view = MoonView::new(&MoonConfig::default());
        sender.send(MoonCommand::SetFillColor(Color::BLACK)).unwrap();
        sender.send(MoonCommand::SetOutlineColor(Color::WHITE)).unwrap();
        apply_commands(&mut view, &receiver);
        assert_eq!(view.fill_color(), Color::BLACK);
        assert_eq!(view.outline_color(), Color::WHITE);
    }
}
