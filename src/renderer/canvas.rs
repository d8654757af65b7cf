//! 2D drawing surface abstraction
//!
//! The scene is drawn through [`Canvas`] so the same code can target the
//! browser's 2D context or a recorded display list.

use glam::Vec2;

/// RGBA color (8-bit channels, float alpha like CSS)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient from `top` to `bottom` (y coordinates in current space)
    VerticalGradient {
        top: f32,
        bottom: f32,
        from: Color,
        to: Color,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Font description (always the sans-serif family)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }

    /// CSS font shorthand
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A 2D raster surface with a transform stack
pub trait Canvas {
    /// Push the transform and alpha
    fn save(&mut self);
    /// Pop the transform and alpha
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    /// Global alpha for subsequent fills
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, paint: &Paint);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, align: TextAlign, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0xf0, 0xf0, 0xf0);
    pub const INK: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const PLAYER_TOP: Color = Color::rgb(0x7c, 0xfc, 0x00);
    pub const PLAYER_BOTTOM: Color = Color::rgb(0x22, 0x8b, 0x22);
    pub const EYE: Color = Color::rgb(0, 0, 0);
    pub const CACTUS: Color = Color::rgb(0x22, 0x8b, 0x22);
    pub const CACTUS_SPINE: Color = Color::rgb(0x1a, 0x6b, 0x1a);
    pub const BIRD: Color = Color::rgb(0xff, 0x63, 0x47);
    pub const BIRD_WING: Color = Color::rgb(0xdc, 0x14, 0x3c);
    pub const PANEL: Color = Color::rgba(0, 0, 0, 0.7);
    pub const SCRIM: Color = Color::rgba(0, 0, 0, 0.5);
    pub const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);
    pub const MUTED: Color = Color::rgb(0xaa, 0xaa, 0xaa);
    pub const FPS: Color = Color::rgb(0x66, 0x66, 0x66);
}
