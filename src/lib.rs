//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
#![deny(missing_docs)]
//! `retained-editbox` provides a retained-mode, single-line edit box widget together with the small amount of
//! widget plumbing needed to host it: input snapshots, font measurement, recorded draw commands and audio cues.
//! Rendering, audio playback and focus ordering stay with the host; the crate only records what should happen.

mod audio;
mod draw_context;
mod font;
mod widget;
mod widgets;

pub use audio::*;
pub use draw_context::*;
pub use font::*;
pub use rs_math3d::*;
pub use widget::*;
pub use widgets::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Numeric identifier value.
pub struct Id(usize);

impl Id {
    /// Creates an ID from a caller-supplied numeric value.
    /// On 32-bit platforms the value is truncated to fit in a `usize`.
    pub fn new(value: u64) -> Self { Self(value as usize) }

    /// Creates a stable ID from a string label using FNV-1a hashing.
    pub fn from_str(label: &str) -> Self {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;
        let mut hash = FNV_OFFSET_BASIS;
        for byte in label.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self::new(hash)
    }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> usize { self.0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// State bits returned by widgets to describe their interaction outcome.
    pub struct ResourceState : u32 {
        /// Editing was abandoned (e.g. Escape).
        const CANCEL = 8;
        /// Indicates that the widget's data changed.
        const CHANGE = 4;
        /// Indicates that the widget was submitted (e.g. Return pressed).
        const SUBMIT = 2;
        /// Indicates that the widget is currently active.
        const ACTIVE = 1;
        /// Indicates no interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Returns `true` if the widget changed its bound value.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the widget signaled submission.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if the widget signaled cancellation.
    pub fn is_cancelled(&self) -> bool { self.intersects(Self::CANCEL) }
    /// Returns `true` if the widget is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Returns `true` if the state contains no flags.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier key state tracked by the input system.
    pub struct KeyMode : u32 {
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Navigation and editing keys handled by the widgets.
    pub struct KeyCode : u32 {
        /// Tab key.
        const TAB = 2048;
        /// Escape key.
        const ESCAPE = 1024;
        /// Return/Enter key (main or keypad).
        const RETURN = 512;
        /// Backspace key.
        const BACKSPACE = 256;
        /// Insert key.
        const INSERT = 128;
        /// Home key.
        const HOME = 64;
        /// Delete key.
        const DELETE = 32;
        /// End key.
        const END = 16;
        /// Right arrow key.
        const RIGHT = 8;
        /// Left arrow key.
        const LEFT = 4;
        /// Down arrow key.
        const DOWN = 2;
        /// Up arrow key.
        const UP = 1;
        /// No keys pressed.
        const NONE = 0;
    }
}

impl KeyCode {
    /// Returns `true` if no key is pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Tab is pressed.
    pub fn is_tab(&self) -> bool { self.intersects(Self::TAB) }
    /// Returns `true` if Escape is pressed.
    pub fn is_escape(&self) -> bool { self.intersects(Self::ESCAPE) }
    /// Returns `true` if Return is pressed.
    pub fn is_return(&self) -> bool { self.intersects(Self::RETURN) }
    /// Returns `true` if Backspace is pressed.
    pub fn is_backspace(&self) -> bool { self.intersects(Self::BACKSPACE) }
    /// Returns `true` if Insert is pressed.
    pub fn is_insert(&self) -> bool { self.intersects(Self::INSERT) }
    /// Returns `true` if Home is pressed.
    pub fn is_home(&self) -> bool { self.intersects(Self::HOME) }
    /// Returns `true` if Delete is pressed.
    pub fn is_delete(&self) -> bool { self.intersects(Self::DELETE) }
    /// Returns `true` if End is pressed.
    pub fn is_end(&self) -> bool { self.intersects(Self::END) }
    /// Returns `true` if up is pressed.
    pub fn is_up(&self) -> bool { self.intersects(Self::UP) }
    /// Returns `true` if down is pressed.
    pub fn is_down(&self) -> bool { self.intersects(Self::DOWN) }
    /// Returns `true` if left is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if right is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
}

#[derive(Clone, Debug)]
/// Snapshot of the per-frame input state handed to widgets.
pub struct InputSnapshot {
    /// Absolute mouse position in screen coordinates.
    pub mouse_pos: Vec2i,
    /// Currently held mouse buttons.
    pub mouse_down: MouseButton,
    /// Mouse buttons pressed this frame.
    pub mouse_pressed: MouseButton,
    /// Active modifier keys.
    pub key_mods: KeyMode,
    /// Keys currently held.
    pub key_codes: KeyCode,
    /// Keys pressed this frame.
    pub key_pressed: KeyCode,
    /// UTF-8 text input collected this frame.
    pub text_input: String,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            key_mods: KeyMode::NONE,
            key_codes: KeyCode::NONE,
            key_pressed: KeyCode::NONE,
            text_input: String::new(),
        }
    }
}

#[derive(Clone, Debug)]
/// Aggregates raw input collected by the host during the current frame.
pub struct Input {
    mouse_pos: Vec2i,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
    key_mods: KeyMode,
    key_down: KeyCode,
    key_pressed: KeyCode,
    input_text: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            key_mods: KeyMode::NONE,
            key_down: KeyCode::NONE,
            key_pressed: KeyCode::NONE,
            input_text: String::default(),
        }
    }
}

impl Input {
    /// Returns the state of all modifier keys.
    pub fn key_mods(&self) -> KeyMode { self.key_mods }

    /// Returns the state of all held keys.
    pub fn key_codes(&self) -> KeyCode { self.key_down }

    /// Returns the accumulated UTF-8 text entered this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Returns the currently held mouse buttons.
    pub fn get_mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
    }

    /// Records that a modifier key was pressed.
    pub fn modifier_down(&mut self, mode: KeyMode) { self.key_mods |= mode; }

    /// Records that a modifier key was released.
    pub fn modifier_up(&mut self, mode: KeyMode) { self.key_mods &= !mode; }

    /// Records that a key was pressed.
    pub fn keydown(&mut self, code: KeyCode) {
        self.key_pressed |= code;
        self.key_down |= code;
    }

    /// Records that a key was released.
    pub fn keyup(&mut self, code: KeyCode) { self.key_down &= !code; }

    /// Appends UTF-8 text to the input buffer.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    /// Captures the current frame's input for widgets.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            mouse_pos: self.mouse_pos,
            mouse_down: self.mouse_down,
            mouse_pressed: self.mouse_pressed,
            key_mods: self.key_mods,
            key_codes: self.key_down,
            key_pressed: self.key_pressed,
            text_input: self.input_text.clone(),
        }
    }

    /// Clears the per-frame transitions once every widget has run.
    pub fn end_frame(&mut self) {
        self.key_pressed = KeyCode::NONE;
        self.input_text.clear();
        self.mouse_pressed = MouseButton::NONE;
    }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

#[derive(Copy, Clone, Debug)]
/// Layout, timing and palette constants shared by the widgets.
pub struct Style {
    /// Horizontal gap between the box edge and its text.
    pub x_gap: i32,
    /// Vertical gap between the box edge and its text.
    pub y_gap: i32,
    /// Width of the overwrite cursor when it sits past the last character.
    pub cursor_size: i32,
    /// Duration of one cursor blink phase, in milliseconds.
    pub blink_rate_ms: u32,
    /// Number of characters the window jumps back when the cursor leaves it on the left.
    pub char_jump: usize,
    /// Text and cursor color.
    pub text_color: Color,
    /// Color of the placeholder text.
    pub placeholder_color: Color,
    /// Text color used while the widget is disabled.
    pub disabled_color: Color,
    /// Border color used while the widget is highlighted.
    pub highlight_color: Color,
    /// Color of the insert/overwrite indicator.
    pub mode_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x_gap: 4,
            y_gap: 2,
            cursor_size: 8,
            blink_rate_ms: 800,
            char_jump: 6,
            text_color: Color { r: 230, g: 230, b: 230, a: 255 },
            placeholder_color: Color { r: 140, g: 140, b: 140, a: 255 },
            disabled_color: Color { r: 95, g: 95, b: 95, a: 255 },
            highlight_color: Color { r: 255, g: 255, b: 255, a: 255 },
            mode_color: Color { r: 200, g: 200, b: 80, a: 255 },
        }
    }
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }
