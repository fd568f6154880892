/// Padding on the four sides of the widget, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const ZERO: Padding = Padding::uniform(0);

    pub const fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Post-layout bounds assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub padding: Padding,
}

impl Bounds {
    pub const fn new(width: i32, height: i32, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Size left after subtracting padding. Not clamped: oversized padding
    /// yields negative extents.
    pub fn content_box(&self) -> (i32, i32) {
        let p = self.padding;
        (
            self.width - p.left - p.right,
            self.height - p.top - p.bottom,
        )
    }

    pub fn diameter(&self) -> i32 {
        let (w, h) = self.content_box();
        w.min(h)
    }
}
