//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like TogglePause, SelectBody, etc.
//! Flight keys (WASD, arrows, QERF) are NOT mapped here - in cockpit mode they
//! go directly to the ShipController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not ship flight)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Pause or resume the simulation (Space)
    TogglePause,
    /// Show or hide orbital trails (T)
    ToggleTrails,
    /// Enter or leave cockpit free-roam mode (C)
    ToggleFreeRoam,
    /// Step the speed slider down (Minus)
    SpeedDown,
    /// Step the speed slider up (Equal)
    SpeedUp,
    /// Fly the camera to the n-th catalog body (Digit1-Digit9)
    SelectBody(usize),
    /// Stop following (Digit0)
    Deselect,
    /// Toggle fullscreen mode (F, outside cockpit mode)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
///
/// In free-roam mode F belongs to the ship (pitch down), so fullscreen is
/// suppressed there; every other binding is mode-independent.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for flight keys
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        free_roam: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Space => Some(InputAction::TogglePause),
            KeyCode::KeyT => Some(InputAction::ToggleTrails),
            KeyCode::KeyC => Some(InputAction::ToggleFreeRoam),
            KeyCode::Minus => Some(InputAction::SpeedDown),
            KeyCode::Equal => Some(InputAction::SpeedUp),
            KeyCode::Digit0 => Some(InputAction::Deselect),
            KeyCode::Digit1 => Some(InputAction::SelectBody(0)),
            KeyCode::Digit2 => Some(InputAction::SelectBody(1)),
            KeyCode::Digit3 => Some(InputAction::SelectBody(2)),
            KeyCode::Digit4 => Some(InputAction::SelectBody(3)),
            KeyCode::Digit5 => Some(InputAction::SelectBody(4)),
            KeyCode::Digit6 => Some(InputAction::SelectBody(5)),
            KeyCode::Digit7 => Some(InputAction::SelectBody(6)),
            KeyCode::Digit8 => Some(InputAction::SelectBody(7)),
            KeyCode::Digit9 => Some(InputAction::SelectBody(8)),
            KeyCode::KeyF if !free_roam => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None, // Flight keys handled by the ship controller
        }
    }
}
