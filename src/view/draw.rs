//! Draw instructions handed to the external renderer.

use std::collections::HashMap;

use crate::tracker::ObjectClass;
use crate::view::projector::GridPoint;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const IDENTITY_PALETTE: [Color; 12] = [
    Color::rgb(232, 176, 59),
    Color::rgb(175, 208, 25),
    Color::rgb(102, 205, 105),
    Color::rgb(185, 0, 255),
    Color::rgb(99, 107, 252),
    Color::rgb(252, 225, 8),
    Color::rgb(167, 130, 141),
    Color::rgb(194, 72, 113),
    Color::rgb(0, 172, 237),
    Color::rgb(255, 136, 0),
    Color::rgb(49, 166, 76),
    Color::rgb(116, 85, 255),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Observer body and field-of-view rays
    pub const OBSERVER: Color = Color::rgb(44, 117, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Stable colour for a detector identity.
    pub fn for_identity(id: u32) -> Self {
        IDENTITY_PALETTE[id as usize % IDENTITY_PALETTE.len()]
    }
}

/// Shape drawn at an object's current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    /// Ring of `radius` with a stroke `thickness`
    Circle { radius: u32, thickness: u32 },
    /// Filled rectangle centred on the point
    FilledRect { half_width: u32, half_height: u32 },
}

/// Maps object classes to their marker.
///
/// Classes without an entry get no marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTable {
    shapes: HashMap<ObjectClass, MarkerShape>,
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self::empty()
            .with(
                ObjectClass::Person,
                MarkerShape::Circle {
                    radius: 5,
                    thickness: 5,
                },
            )
            .with(
                ObjectClass::Vehicle,
                MarkerShape::FilledRect {
                    half_width: 10,
                    half_height: 20,
                },
            )
    }
}

impl MarkerTable {
    pub fn empty() -> Self {
        Self {
            shapes: HashMap::new(),
        }
    }

    pub fn with(mut self, class: ObjectClass, shape: MarkerShape) -> Self {
        self.insert(class, shape);
        self
    }

    pub fn insert(&mut self, class: ObjectClass, shape: MarkerShape) -> Option<MarkerShape> {
        self.shapes.insert(class, shape)
    }

    pub fn remove(&mut self, class: ObjectClass) -> Option<MarkerShape> {
        self.shapes.remove(&class)
    }

    pub fn shape_for(&self, class: ObjectClass) -> Option<MarkerShape> {
        self.shapes.get(&class).copied()
    }
}

/// One rendering primitive on the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    Line {
        from: GridPoint,
        to: GridPoint,
        color: Color,
        thickness: u32,
    },
    Marker {
        at: GridPoint,
        shape: MarkerShape,
        color: Color,
    },
    Text {
        at: GridPoint,
        text: String,
        color: Color,
    },
}

impl DrawInstruction {
    pub fn line(from: GridPoint, to: GridPoint, color: Color, thickness: u32) -> Self {
        Self::Line {
            from,
            to,
            color,
            thickness,
        }
    }

    pub fn marker(at: GridPoint, shape: MarkerShape, color: Color) -> Self {
        Self::Marker { at, shape, color }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker { .. })
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Line { color, .. } | Self::Marker { color, .. } | Self::Text { color, .. } => {
                *color
            }
        }
    }
}
