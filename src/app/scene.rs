//! Display list produced by [`AppState::render`](super::AppState::render).
//!
//! Shapes are in logical coordinates and carry palette roles instead of
//! colours; the GUI maps both to the real window.

use crate::hit::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Background,
    Sidebar,
    Card,
    PlayerBar,
    TextPrimary,
    TextSecondary,
    Accent,
    /// Artwork of the album at this catalog index
    Artwork(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        paint: Paint,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        paint: Paint,
    },
    Triangle {
        points: [(f32, f32); 3],
        paint: Paint,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        content: String,
        paint: Paint,
    },
}

/// One frame, painted in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn rect(&mut self, rect: Rect, paint: Paint) {
        self.shapes.push(Shape::Rect { rect, paint });
    }

    pub fn circle(&mut self, x: f32, y: f32, radius: f32, paint: Paint) {
        self.shapes.push(Shape::Circle {
            x,
            y,
            radius,
            paint,
        });
    }

    pub fn triangle(&mut self, points: [(f32, f32); 3], paint: Paint) {
        self.shapes.push(Shape::Triangle { points, paint });
    }

    pub fn text(&mut self, x: f32, y: f32, size: f32, content: impl Into<String>, paint: Paint) {
        self.shapes.push(Shape::Text {
            x,
            y,
            size,
            content: content.into(),
            paint,
        });
    }

    /// All text content, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Whether any shape uses `paint`.
    pub fn uses(&self, paint: Paint) -> bool {
        self.shapes.iter().any(|s| match s {
            Shape::Rect { paint: p, .. }
            | Shape::Circle { paint: p, .. }
            | Shape::Triangle { paint: p, .. }
            | Shape::Text { paint: p, .. } => *p == paint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_keep_paint_order() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.rect(Rect::new(0.0, 0.0, 100.0, 100.0), Paint::Background);
        scene.text(5.0, 5.0, 16.0, "LIBRARY", Paint::TextSecondary);
        scene.circle(50.0, 50.0, 18.0, Paint::Accent);

        assert_eq!(scene.shapes().len(), 3);
        assert!(matches!(scene.shapes()[0], Shape::Rect { paint: Paint::Background, .. }));
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["LIBRARY"]);
        assert!(scene.uses(Paint::Accent));
        assert!(!scene.uses(Paint::Artwork(0)));
    }
}
