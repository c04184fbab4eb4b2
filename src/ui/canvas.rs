//! Paints a [`Scene`] onto an iced canvas and turns canvas mouse events
//! into [`InputEvent`]s.
//!
//! The scene is scaled uniformly to fit the canvas and anchored at the top
//! left, so a window position divided by the same scale is a logical one.

use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Geometry, Path};
use iced::{Color, Pixels, Point, Rectangle, Size, Theme, event};

use super::messages::Message;
use super::theme;
use crate::app::{InputEvent, PointerButton, Scene, Shape};

/// Window pixels per wheel notch for touchpads reporting pixel deltas.
const PIXELS_PER_NOTCH: f32 = 40.0;

pub struct ScenePainter<'a> {
    scene: &'a Scene,
    swatches: &'a [Option<Color>],
}

impl<'a> ScenePainter<'a> {
    pub fn new(scene: &'a Scene, swatches: &'a [Option<Color>]) -> Self {
        Self { scene, swatches }
    }
}

impl canvas::Program<Message> for ScenePainter<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Message>) {
        let canvas::Event::Mouse(mouse_event) = event else {
            return (event::Status::Ignored, None);
        };
        let Some(position) = cursor.position_in(bounds) else {
            return (event::Status::Ignored, None);
        };

        match pointer_event(mouse_event, position) {
            Some(input) => (
                event::Status::Captured,
                Some(Message::Canvas {
                    scale: fit_scale(bounds.size(), self.scene),
                    event: input,
                }),
            ),
            None => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let scale = fit_scale(bounds.size(), self.scene);
        let at = |x: f32, y: f32| Point::new(x * scale, y * scale);
        let mut frame = Frame::new(renderer, bounds.size());

        // Letterbox
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::color::SIDEBAR);

        for shape in self.scene.shapes() {
            match shape {
                Shape::Rect { rect, paint } => {
                    frame.fill_rectangle(
                        at(rect.x, rect.y),
                        Size::new(rect.width * scale, rect.height * scale),
                        theme::paint(*paint, self.swatches),
                    );
                }
                Shape::Circle {
                    x,
                    y,
                    radius,
                    paint,
                } => {
                    frame.fill(
                        &Path::circle(at(*x, *y), radius * scale),
                        theme::paint(*paint, self.swatches),
                    );
                }
                Shape::Triangle { points, paint } => {
                    let [a, b, c] = points.map(|(x, y)| at(x, y));
                    let path = Path::new(|builder| {
                        builder.move_to(a);
                        builder.line_to(b);
                        builder.line_to(c);
                        builder.close();
                    });
                    frame.fill(&path, theme::paint(*paint, self.swatches));
                }
                Shape::Text {
                    x,
                    y,
                    size,
                    content,
                    paint,
                } => {
                    frame.fill_text(canvas::Text {
                        content: content.clone(),
                        position: at(*x, *y),
                        color: theme::paint(*paint, self.swatches),
                        size: Pixels(size * scale),
                        ..canvas::Text::default()
                    });
                }
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Uniform scale that fits the scene's design size into `bounds`.
pub fn fit_scale(bounds: Size, scene: &Scene) -> f32 {
    if scene.width <= 0.0 || scene.height <= 0.0 {
        return 1.0;
    }
    (bounds.width / scene.width).min(bounds.height / scene.height)
}

/// Translate a canvas mouse event at `position` (window pixels relative to
/// the canvas).
fn pointer_event(event: mouse::Event, position: Point) -> Option<InputEvent> {
    match event {
        mouse::Event::ButtonPressed(button) => Some(InputEvent::PointerDown {
            x: position.x,
            y: position.y,
            button: match button {
                mouse::Button::Left => PointerButton::Left,
                mouse::Button::Right => PointerButton::Right,
                mouse::Button::Middle => PointerButton::Middle,
                _ => PointerButton::Other,
            },
        }),
        mouse::Event::WheelScrolled { delta } => {
            let notches = match delta {
                mouse::ScrollDelta::Lines { y, .. } => -y,
                mouse::ScrollDelta::Pixels { y, .. } => -y / PIXELS_PER_NOTCH,
            };
            (notches != 0.0).then_some(InputEvent::Wheel {
                x: position.x,
                y: position.y,
                delta: notches,
            })
        }
        _ => None,
    }
}
