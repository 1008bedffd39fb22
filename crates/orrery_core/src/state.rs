//! Global simulation state
//!
//! One explicit struct passed by reference into each per-tick update, instead
//! of ambient shared flags. The keyboard snapshot lives with the input layer;
//! everything the simulation itself consults is here.

use crate::body::BodyKey;

/// Process-wide animation state
#[derive(Clone, Copy, Debug)]
pub struct SimState {
    /// Orbital and rotational motion halts while set
    pub paused: bool,
    /// Positive scalar applied to every angular increment
    pub speed_modifier: f32,
    /// Master visibility for orbital trails
    pub trails_visible: bool,
    /// Cockpit mode: free-roam ship control, orbit camera disabled
    pub free_roam: bool,
    /// Currently followed body; a weak reference, the registry owns the body
    pub followed: Option<BodyKey>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            paused: false,
            speed_modifier: 1.0,
            trails_visible: true,
            free_roam: false,
            followed: None,
        }
    }
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Map a UI slider value to the speed modifier
///
/// Exponential mapping: each slider unit doubles (or halves) the speed.
#[inline]
pub fn speed_from_slider(value: f32) -> f32 {
    2f32.powf(value)
}
