// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::canvas::{Canvas, RectF, Surface};
use crate::paint::{Color, Style};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Arc {
        oval: RectF,
        start_angle: f32,
        sweep_angle: f32,
        style: Style,
    },
}

/// Recorded draw commands, replayable onto a `Canvas`.
#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn render(&self, canvas: &mut Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    canvas.clear(*color);
                }
                DrawCommand::Arc {
                    oval,
                    start_angle,
                    sweep_angle,
                    style,
                } => {
                    canvas.draw_arc(*oval, *start_angle, *sweep_angle, style);
                }
            }
        }
    }
}

impl Surface for Scene {
    fn draw_arc(&mut self, oval: RectF, start_angle: f32, sweep_angle: f32, style: &Style) {
        self.add_command(DrawCommand::Arc {
            oval,
            start_angle,
            sweep_angle,
            style: *style,
        });
    }
}
