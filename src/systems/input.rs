use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use glam::Vec2;

use crate::config::InputMode;

bitflags! {
    /// Buttons currently held down, as reported by the input provider.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        const ARROW_UP = 1 << 0;
        const ARROW_DOWN = 1 << 1;
        const ARROW_LEFT = 1 << 2;
        const ARROW_RIGHT = 1 << 3;
        const W = 1 << 4;
        const A = 1 << 5;
        const S = 1 << 6;
        const D = 1 << 7;
        /// The dedicated fire key.
        const FIRE = 1 << 8;

        const ARROWS = Self::ARROW_UP.bits() | Self::ARROW_DOWN.bits() | Self::ARROW_LEFT.bits() | Self::ARROW_RIGHT.bits();
        const WASD = Self::W.bits() | Self::A.bits() | Self::S.bits() | Self::D.bits();
    }
}

/// The latest input snapshot. Written by the driver once per frame, read by the player systems.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub buttons: Buttons,
    /// Pointer position in world coordinates.
    pub pointer: Vec2,
    pub pointer_down: bool,
}

impl InputState {
    /// The movement intent for `mode`, as a sign vector (each axis in `-1..=1`, not normalized).
    pub fn movement(&self, mode: InputMode) -> Vec2 {
        let (up, down, left, right) = match mode {
            InputMode::Keyboard => (Buttons::ARROW_UP, Buttons::ARROW_DOWN, Buttons::ARROW_LEFT, Buttons::ARROW_RIGHT),
            InputMode::Mouse => (Buttons::W, Buttons::S, Buttons::A, Buttons::D),
        };
        let axis = |negative: Buttons, positive: Buttons| {
            (self.buttons.contains(positive) as i8 - self.buttons.contains(negative) as i8) as f32
        };
        Vec2::new(axis(left, right), axis(up, down))
    }

    /// Whether the player is asking to fire in `mode`.
    pub fn trigger_held(&self, mode: InputMode) -> bool {
        let fire_key = self.buttons.contains(Buttons::FIRE);
        match mode {
            InputMode::Keyboard => fire_key,
            InputMode::Mouse => fire_key || self.pointer_down,
        }
    }

    /// Releases the fire key and pointer button, so a pause never leaves the trigger stuck.
    pub fn release_trigger(&mut self) {
        self.buttons.remove(Buttons::FIRE);
        self.pointer_down = false;
    }
}
