//! Message types for the shelf window.

use iced::keyboard;

use crate::app::InputEvent;

#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer input from the canvas, with the window-to-logical scale the
    /// scene was painted at
    Canvas { scale: f32, event: InputEvent },
    KeyPressed(keyboard::Key, keyboard::Modifiers),
    /// Drain engine events
    Tick,
}
