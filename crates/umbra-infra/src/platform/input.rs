// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Translation from `winit` window events to [`InputEvent`]s.

use umbra_core::platform::input::{InputEvent, MouseButton};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

/// Pixel-precise wheel deltas are divided by this to express them in notches.
pub const PIXELS_PER_NOTCH: f32 = 100.0;

/// Converts a `winit` window event into an [`InputEvent`].
///
/// Returns `None` for events that are not pointer input (resizes, focus,
/// keyboard) and for zero-length scrolls.
pub fn translate_winit_input(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            Some(match state {
                ElementState::Pressed => InputEvent::MouseButtonPressed { button },
                ElementState::Released => InputEvent::MouseButtonReleased { button },
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (delta_x, delta_y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(pos) => (
                    pos.x as f32 / PIXELS_PER_NOTCH,
                    pos.y as f32 / PIXELS_PER_NOTCH,
                ),
            };
            (delta_x != 0.0 || delta_y != 0.0).then_some(InputEvent::MouseWheelScrolled { delta_x, delta_y })
        }
        _ => None,
    }
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, TouchPhase};

    #[test]
    fn test_map_mouse_buttons() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }

    #[test]
    fn test_translate_button_press_and_release() {
        let press = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Right,
        };
        assert_eq!(
            translate_winit_input(&press),
            Some(InputEvent::MouseButtonPressed {
                button: MouseButton::Right
            })
        );
        let release = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Released,
            button: WinitMouseButton::Left,
        };
        assert_eq!(
            translate_winit_input(&release),
            Some(InputEvent::MouseButtonReleased {
                button: MouseButton::Left
            })
        );
    }

    #[test]
    fn test_translate_cursor_moved() {
        let event = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(100.5, 200.75),
        };
        assert_eq!(
            translate_winit_input(&event),
            Some(InputEvent::MouseMoved { x: 100.5, y: 200.75 })
        );
    }

    #[test]
    fn test_translate_wheel_lines_and_pixels() {
        let lines = WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 2.0),
            phase: TouchPhase::Moved,
        };
        assert_eq!(
            translate_winit_input(&lines),
            Some(InputEvent::MouseWheelScrolled {
                delta_x: 0.0,
                delta_y: 2.0
            })
        );
        let pixels = WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -50.0)),
            phase: TouchPhase::Moved,
        };
        assert_eq!(
            translate_winit_input(&pixels),
            Some(InputEvent::MouseWheelScrolled {
                delta_x: 0.0,
                delta_y: -0.5
            })
        );
    }

    #[test]
    fn test_zero_scroll_and_non_input_are_ignored() {
        let zero = WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 0.0),
            phase: TouchPhase::Moved,
        };
        assert_eq!(translate_winit_input(&zero), None);
        assert_eq!(translate_winit_input(&WindowEvent::Resized(PhysicalSize::new(800, 600))), None);
        assert_eq!(translate_winit_input(&WindowEvent::CloseRequested), None);
    }
}
