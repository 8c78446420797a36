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
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Mouse key that triggered a click.
pub enum WidgetKey {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Secondary (usually right) button.
    Secondary,
}

/// Per-frame context passed to widget hooks.
pub struct WidgetContext<'a> {
    input: &'a InputSnapshot,
    x_offset: i32,
    y_offset: i32,
    time_ms: u32,
    focus_requested: bool,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context for widgets whose parent sits at `(x_offset, y_offset)` in screen space.
    pub fn new(input: &'a InputSnapshot, x_offset: i32, y_offset: i32, time_ms: u32) -> Self {
        Self {
            input,
            x_offset,
            y_offset,
            time_ms,
            focus_requested: false,
        }
    }

    /// Returns the input snapshot for the current frame.
    pub fn input(&self) -> &InputSnapshot { self.input }

    /// Returns the parent's horizontal screen offset.
    pub fn x_offset(&self) -> i32 { self.x_offset }

    /// Returns the parent's vertical screen offset.
    pub fn y_offset(&self) -> i32 { self.y_offset }

    /// Returns the frame time in milliseconds.
    pub fn time_ms(&self) -> u32 { self.time_ms }

    /// Returns the mouse position relative to the top-left corner of `rect`.
    pub fn mouse_in(&self, rect: Recti) -> Vec2i {
        vec2(self.input.mouse_pos.x - self.x_offset - rect.x, self.input.mouse_pos.y - self.y_offset - rect.y)
    }

    /// Returns `true` if the mouse lies within `rect`.
    pub fn mouse_over(&self, rect: Recti) -> bool {
        let m = self.mouse_in(rect);
        m.x >= 0 && m.y >= 0 && m.x < rect.width && m.y < rect.height
    }

    /// Asks the host to give keyboard focus to the widget being processed.
    pub fn request_focus(&mut self) { self.focus_requested = true; }

    /// Returns `true` if a widget asked for focus through this context.
    pub fn focus_requested(&self) -> bool { self.focus_requested }
}

/// Base contract shared by retained widgets.
///
/// The host owns layout and focus ordering; it forwards pointer and focus
/// transitions to these hooks, calls [`Widget::run`] once per frame for the
/// widget holding focus, and [`Widget::display`] for every visible widget.
pub trait Widget {
    /// Returns the widget identifier.
    fn id(&self) -> Id;

    /// Returns the widget rectangle relative to its parent.
    fn geometry(&self) -> Recti;

    /// Moves/resizes the widget; implementations call [`Widget::geometry_changed`].
    fn set_geometry(&mut self, rect: Recti);

    /// The pointer clicked the widget.
    fn clicked(&mut self, _ctx: &mut WidgetContext<'_>, _key: WidgetKey) {}

    /// The pointer started hovering the widget.
    fn highlight(&mut self, _ctx: &mut WidgetContext<'_>) {}

    /// The pointer stopped hovering the widget.
    fn highlight_lost(&mut self) {}

    /// Keyboard focus moved to another widget.
    fn focus_lost(&mut self) {}

    /// Per-frame update.
    fn run(&mut self, _ctx: &mut WidgetContext<'_>) -> ResourceState { ResourceState::NONE }

    /// Records draw commands for the widget, offset by the parent's screen position.
    fn display(&self, draw: &mut DrawList, x_offset: i32, y_offset: i32);

    /// The widget rectangle changed.
    fn geometry_changed(&mut self) {}

    /// Returns the widget's text content.
    fn get_string(&self) -> String { String::new() }

    /// Replaces the widget's text content.
    fn set_string(&mut self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_position_is_relative_to_widget() {
        let input = InputSnapshot {
            mouse_pos: vec2(115, 47),
            ..Default::default()
        };
        let ctx = WidgetContext::new(&input, 100, 40, 0);
        let r = rect(10, 5, 20, 10);
        let m = ctx.mouse_in(r);
        assert_eq!((m.x, m.y), (5, 2));
        assert!(ctx.mouse_over(r));
        assert!(!ctx.mouse_over(rect(0, 0, 5, 5)));
    }

    #[test]
    fn focus_request_is_recorded() {
        let input = InputSnapshot::default();
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        assert!(!ctx.focus_requested());
        ctx.request_focus();
        assert!(ctx.focus_requested());
    }
}
