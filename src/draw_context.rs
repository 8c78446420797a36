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

static UNCLIPPED_RECT: Recti = Recti {
    x: 0,
    y: 0,
    width: i32::MAX,
    height: i32::MAX,
};

#[derive(Clone, Debug)]
/// Draw command recorded by widgets and replayed by the host renderer.
pub enum Command {
    /// Sets the scissor rectangle for the following commands.
    Clip {
        /// Rect to clip against.
        rect: Recti,
    },
    /// Draws a solid rectangle.
    Rect {
        /// Target rectangle.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Draws text.
    Text {
        /// Font to use.
        font: FontId,
        /// Top-left text position.
        pos: Vec2i,
        /// Text color.
        color: Color,
        /// UTF-8 string to render.
        text: String,
    },
}

/// Recorded command list with a clip stack.
pub struct DrawList {
    commands: Vec<Command>,
    clip_stack: Vec<Recti>,
}

impl Default for DrawList {
    fn default() -> Self { Self::new() }
}

impl DrawList {
    /// Creates an empty command list.
    pub fn new() -> Self { Self { commands: Vec::new(), clip_stack: Vec::new() } }

    /// Returns the commands recorded so far.
    pub fn commands(&self) -> &[Command] { &self.commands }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<Command> { std::mem::take(&mut self.commands) }

    /// Returns the strings of the recorded text commands, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the clip rectangle currently in effect.
    pub fn current_clip_rect(&self) -> Recti { self.clip_stack.last().copied().unwrap_or(UNCLIPPED_RECT) }

    /// Pushes a new clip rectangle, intersected with the current one.
    pub fn push_clip_rect(&mut self, rect: Recti) {
        let last = self.current_clip_rect();
        self.clip_stack.push(rect.intersect(&last).unwrap_or_default());
    }

    /// Pops the current clip rectangle.
    pub fn pop_clip_rect(&mut self) { self.clip_stack.pop(); }

    /// Executes `f` with the provided clip rect applied.
    pub fn with_clip<F: FnOnce(&mut Self)>(&mut self, rect: Recti, f: F) {
        self.push_clip_rect(rect);
        f(self);
        self.pop_clip_rect();
    }

    fn push_command(&mut self, cmd: Command) { self.commands.push(cmd); }

    fn set_clip(&mut self, rect: Recti) { self.push_command(Command::Clip { rect }); }

    fn is_fully_inside(r: Recti, cr: Recti) -> bool {
        r.x >= cr.x && r.x + r.width <= cr.x.saturating_add(cr.width) && r.y >= cr.y && r.y + r.height <= cr.y.saturating_add(cr.height)
    }

    fn is_outside(r: Recti, cr: Recti) -> bool {
        r.x > cr.x.saturating_add(cr.width) || r.x + r.width < cr.x || r.y > cr.y.saturating_add(cr.height) || r.y + r.height < cr.y
    }

    /// Draws a solid rectangle, clipped to the current clip rect.
    pub fn draw_rect(&mut self, rect: Recti, color: Color) {
        let rect = rect.intersect(&self.current_clip_rect()).unwrap_or_default();
        if rect.width > 0 && rect.height > 0 {
            self.push_command(Command::Rect { rect, color });
        }
    }

    /// Draws a 1-pixel box outline using the supplied color.
    pub fn draw_box(&mut self, r: Recti, color: Color) { self.draw_shadow_box(r, color, color); }

    /// Draws a 1-pixel outline with `first` on the top/left edges and `second`
    /// on the bottom/right edges.
    pub fn draw_shadow_box(&mut self, r: Recti, first: Color, second: Color) {
        self.draw_rect(rect(r.x + 1, r.y, r.width - 2, 1), first);
        self.draw_rect(rect(r.x, r.y, 1, r.height), first);
        self.draw_rect(rect(r.x + 1, r.y + r.height - 1, r.width - 2, 1), second);
        self.draw_rect(rect(r.x + r.width - 1, r.y, 1, r.height), second);
    }

    /// Records `text` at `pos`; `size` is the measured extent used for clipping.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2i, size: Dimensioni, color: Color) {
        if text.is_empty() {
            return;
        }
        let r = rect(pos.x, pos.y, size.width, size.height);
        let clip = self.current_clip_rect();
        if Self::is_outside(r, clip) {
            return;
        }
        let partial = !Self::is_fully_inside(r, clip);
        if partial {
            self.set_clip(clip);
        }
        self.push_command(Command::Text {
            text: String::from(text),
            pos,
            color,
            font,
        });
        if partial {
            self.set_clip(UNCLIPPED_RECT);
        }
    }
}
