// SPDX-License-Identifier: MPL-2.0
//! Viewer pane: a canvas that draws the backdrop and the page strip, and
//! turns raw mouse and touch events into gesture recognizer messages.
//!
//! Positions published by the pane are relative to the canvas origin.

use crate::config::WHEEL_PIXELS_PER_LINE;
use crate::ui::viewer::component::Message;
use crate::ui::viewer::subcomponents::gesture::{self, FingerId, MOUSE_FINGER};
use iced::advanced::image::{FilterMethod, Handle, Image};
use iced::widget::canvas::{self, Frame, Text};
use iced::widget::Action;
use iced::{mouse, touch, Color, Point, Rectangle, Size, Vector};
use std::time::Instant;

const LOADING_SIZE: f32 = 16.0;
const LOADING_HALF_WIDTH: f32 = 32.0;

/// One page drawn by the pane.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Position in the strip relative to the selected page (-1, 0 or 1).
    pub shift: i8,
    /// The decoded image and where it sits in the viewport, when loaded.
    pub image: Option<(Handle, Rectangle)>,
}

/// Canvas program rendering the viewer.
#[derive(Debug, Clone)]
pub struct Pane {
    pub slots: Vec<Slot>,
    pub swipe_offset: f32,
    pub drag_offset: Vector,
    pub backdrop_opacity: f32,
    pub loading_label: String,
}

/// Canvas-local state.
#[derive(Debug, Default)]
pub struct State {
    bounds: Option<Size>,
    mouse_down: bool,
}

/// Touch ids are shifted by one so they never collide with the mouse.
fn touch_finger(finger: touch::Finger) -> FingerId {
    finger.0.saturating_add(1)
}

fn relative(position: Point, bounds: Rectangle) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}

impl Pane {
    /// Offset of a slot from its resting place in the strip.
    ///
    /// Only the selected page follows the dismiss drag, and only vertically.
    fn slot_offset(&self, slot: &Slot, width: f32) -> Vector {
        let mut offset = Vector::new(f32::from(slot.shift) * width + self.swipe_offset, 0.0);
        if slot.shift == 0 {
            offset.y += self.drag_offset.y;
        }
        offset
    }
}

impl State {
    /// Records the canvas size; returns it when it changed.
    fn measure(&mut self, size: Size) -> Option<Size> {
        if self.bounds == Some(size) {
            return None;
        }
        self.bounds = Some(size);
        Some(size)
    }

    /// Maps a raw event to a viewer message.
    fn translate(
        &mut self,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
        at: Instant,
    ) -> Option<Message> {
        let pointer = |msg| Some(Message::Pointer(msg));
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                self.mouse_down = true;
                pointer(gesture::Message::Pressed {
                    finger: MOUSE_FINGER,
                    position,
                    at,
                })
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) if self.mouse_down => {
                pointer(gesture::Message::Moved {
                    finger: MOUSE_FINGER,
                    position: relative(*position, bounds),
                    at,
                })
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if self.mouse_down =>
            {
                self.mouse_down = false;
                match cursor.position() {
                    Some(position) => pointer(gesture::Message::Released {
                        finger: MOUSE_FINGER,
                        position: relative(position, bounds),
                        at,
                    }),
                    None => pointer(gesture::Message::Lost {
                        finger: MOUSE_FINGER,
                        at,
                    }),
                }
            }
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = cursor.position_in(bounds)?;
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / WHEEL_PIXELS_PER_LINE,
                };
                Some(Message::WheelScrolled { lines, position })
            }
            iced::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                pointer(gesture::Message::Pressed {
                    finger: touch_finger(*id),
                    position: relative(*position, bounds),
                    at,
                })
            }
            iced::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                pointer(gesture::Message::Moved {
                    finger: touch_finger(*id),
                    position: relative(*position, bounds),
                    at,
                })
            }
            iced::Event::Touch(touch::Event::FingerLifted { id, position }) => {
                pointer(gesture::Message::Released {
                    finger: touch_finger(*id),
                    position: relative(*position, bounds),
                    at,
                })
            }
            iced::Event::Touch(touch::Event::FingerLost { id, .. }) => {
                pointer(gesture::Message::Lost {
                    finger: touch_finger(*id),
                    at,
                })
            }
            _ => None,
        }
    }
}

/// Combines a size change with the message of the event that revealed it.
///
/// Returns the message to publish and whether the event is captured.
fn merge(measured: Option<Size>, message: Option<Message>) -> Option<(Message, bool)> {
    match (measured, message) {
        (None, None) => None,
        (None, Some(message)) => Some((message, true)),
        (Some(size), None) => Some((Message::ViewportMeasured(size), false)),
        (Some(size), Some(message)) => Some((
            Message::Resized {
                size,
                then: Box::new(message),
            },
            true,
        )),
    }
}

impl canvas::Program<Message> for Pane {
    type State = State;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let measured = state.measure(bounds.size());
        let message = state.translate(event, bounds, cursor, Instant::now());
        let (message, captured) = merge(measured, message)?;
        let action = Action::publish(message);
        Some(if captured { action.and_capture() } else { action })
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let width = bounds.width;

        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color {
                a: self.backdrop_opacity,
                ..Color::BLACK
            },
        );

        for slot in &self.slots {
            let shift = self.slot_offset(slot, width);

            match &slot.image {
                Some((handle, rect)) => {
                    let placed = Rectangle::new(rect.position() + shift, rect.size());
                    frame.draw_image(
                        placed,
                        Image {
                            handle: handle.clone(),
                            filter_method: FilterMethod::Linear,
                            rotation: iced::Radians(0.0),
                            opacity: 1.0,
                            snap: true,
                            border_radius: iced::border::Radius::default(),
                        },
                    );
                }
                None => {
                    frame.fill_text(Text {
                        content: self.loading_label.clone(),
                        position: Point::new(
                            width / 2.0 - LOADING_HALF_WIDTH + shift.x,
                            bounds.height / 2.0 - LOADING_SIZE / 2.0 + shift.y,
                        ),
                        color: Color::WHITE,
                        size: LOADING_SIZE.into(),
                        ..Text::default()
                    });
                }
            }
        }

        vec![frame.into_geometry()]
    }
}
