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
use std::rc::Rc;

use super::edit_state::*;
use super::text_edit::*;
use crate::*;

/// Default maximum number of characters an edit box accepts.
pub const DEFAULT_MAX_STRING_SIZE: usize = 72;

const MODE_TEXT_INSERT: &str = "INS";
const MODE_TEXT_OVERWRITE: &str = "OVR";

/// Handler invoked on return, escape and editing-stopped events.
pub type EditBoxHandler = Box<dyn FnMut(&mut EditBox)>;

/// Handler invoked on Tab; returning `true` ends input processing for the frame.
pub type EditBoxTabHandler = Box<dyn FnMut(&mut EditBox) -> bool>;

/// Replaces the default background drawing; receives the box rectangle in screen space.
pub type BoxDisplay = Rc<dyn Fn(&EditBox, &mut DrawList, Recti)>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Colours of the default box background.
pub struct BoxColours {
    /// Top/left edge.
    pub first: Color,
    /// Bottom/right edge.
    pub second: Color,
    /// Fill.
    pub background: Color,
}

impl Default for BoxColours {
    fn default() -> Self {
        Self {
            first: color(115, 115, 115, 255),
            second: color(25, 25, 25, 255),
            background: color(30, 30, 30, 255),
        }
    }
}

#[derive(Clone)]
/// Construction parameters for an [`EditBox`].
pub struct EditBoxInit {
    /// Widget identifier.
    pub id: Id,
    /// Rectangle relative to the parent.
    pub rect: Recti,
    /// Font used for the text.
    pub font: FontId,
    /// Initial content; truncated to `max_string_size`.
    pub text: String,
    /// Text shown while the box is empty and not being edited.
    pub placeholder: String,
    /// Maximum number of characters.
    pub max_string_size: usize,
    /// Default background colours.
    pub colours: BoxColours,
    /// Starts the box disabled.
    pub disabled: bool,
    /// Sound effects requested by the box.
    pub audio_cues: AudioCues,
    /// Layout and timing constants.
    pub style: Style,
}

impl Default for EditBoxInit {
    fn default() -> Self {
        Self {
            id: Id::default(),
            rect: rect(0, 0, 100, 20),
            font: FontId::default(),
            text: String::new(),
            placeholder: String::new(),
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            colours: BoxColours::default(),
            disabled: false,
            audio_cues: AudioCues::default(),
            style: Style::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct DisplayCache {
    text: String,
    placeholder: String,
    mode_text: &'static str,
}

#[derive(Copy, Clone)]
enum HandlerSlot {
    Return,
    Escape,
    EditingStopped,
}

/// Single-line text entry widget.
///
/// The box shows the window `[print_start, print_start + print_chars)` of its
/// text. While editing, the insertion point always lies inside that window
/// (the right edge included).
pub struct EditBox {
    id: Id,
    rect: Recti,
    state: EditBoxState,
    text: String,
    placeholder: String,
    font: FontId,
    metrics: Rc<dyn TextMetrics>,
    style: Style,
    blink_offset: u32,
    cursor_visible: bool,
    max_string_size: usize,
    ins_pos: usize,
    print_start: usize,
    print_chars: usize,
    print_width: i32,
    colours: BoxColours,
    box_display: Option<BoxDisplay>,
    audio_cues: AudioCues,
    audio_callback: Option<AudioCallback>,
    display_cache: DisplayCache,
    on_return: Option<EditBoxHandler>,
    on_escape: Option<EditBoxHandler>,
    on_editing_stopped: Option<EditBoxHandler>,
    on_tab: Option<EditBoxTabHandler>,
}

impl EditBox {
    /// Creates an edit box measuring its text with `metrics`.
    pub fn new(init: EditBoxInit, metrics: Rc<dyn TextMetrics>) -> Self {
        let mut text = init.text;
        truncate_chars(&mut text, init.max_string_size);
        let ins_pos = char_len(&text);
        let mut edit_box = Self {
            id: init.id,
            rect: init.rect,
            state: EditBoxState {
                mode: EditMode::Fixed,
                highlighted: false,
                disabled: init.disabled,
            },
            text,
            placeholder: init.placeholder,
            font: init.font,
            metrics,
            style: init.style,
            blink_offset: 0,
            cursor_visible: false,
            max_string_size: init.max_string_size,
            ins_pos,
            print_start: 0,
            print_chars: 0,
            print_width: 0,
            colours: init.colours,
            box_display: None,
            audio_cues: init.audio_cues,
            audio_callback: None,
            display_cache: DisplayCache::default(),
            on_return: None,
            on_escape: None,
            on_editing_stopped: None,
            on_tab: None,
        };
        edit_box.reset_window();
        edit_box
    }

    /// Returns the current state.
    pub fn state(&self) -> EditBoxState { self.state }

    /// Returns the current editing mode.
    pub fn mode(&self) -> EditMode { self.state.mode }

    /// Returns `true` while the box is in insert or overwrite mode.
    pub fn is_editing(&self) -> bool { self.state.mode.is_editing() }

    /// Returns the insertion point, in characters.
    pub fn cursor(&self) -> usize { self.ins_pos }

    /// Returns the index of the first visible character.
    pub fn print_start(&self) -> usize { self.print_start }

    /// Returns the number of visible characters.
    pub fn print_chars(&self) -> usize { self.print_chars }

    /// Returns the pixel width of the visible characters.
    pub fn print_width(&self) -> i32 { self.print_width }

    /// Returns the visible part of the text.
    pub fn visible_text(&self) -> &str { &self.display_cache.text }

    /// Returns the insert/overwrite indicator text (empty when not editing).
    pub fn mode_text(&self) -> &str { self.display_cache.mode_text }

    /// Returns `true` while the blinking cursor is in its visible phase.
    pub fn cursor_visible(&self) -> bool { self.cursor_visible }

    /// Returns the placeholder text.
    pub fn placeholder(&self) -> &str { &self.placeholder }

    /// Returns the maximum number of characters accepted.
    pub fn max_string_size(&self) -> usize { self.max_string_size }

    /// Returns the font used by the box.
    pub fn font(&self) -> FontId { self.font }

    /// Returns the default background colours.
    pub fn box_colours(&self) -> BoxColours { self.colours }

    /// Installs the callback used to play sound effects.
    pub fn set_audio_callback(&mut self, callback: Option<AudioCallback>) { self.audio_callback = callback; }

    /// Replaces the sound effects requested by the box.
    pub fn set_audio_cues(&mut self, cues: AudioCues) { self.audio_cues = cues; }

    /// Replaces the default background with a custom drawing callback.
    pub fn set_box_display(&mut self, display: Option<BoxDisplay>) { self.box_display = display; }

    /// Sets the text shown while the box is empty and not being edited.
    pub fn set_placeholder(&mut self, value: &str) {
        self.placeholder = value.to_string();
        self.refresh_display_cache();
    }

    /// Sets the maximum number of characters, truncating the current text if needed.
    pub fn set_max_string_size(&mut self, size: usize) {
        self.max_string_size = size;
        if truncate_chars(&mut self.text, size) {
            tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), size, "text truncated to new maximum");
            self.ins_pos = self.ins_pos.min(size);
            self.refit();
        }
    }

    /// Sets the colours of the default background.
    pub fn set_box_colours(&mut self, first: Color, second: Color, background: Color) { self.colours = BoxColours { first, second, background }; }

    /// Registers the handler invoked when Return finishes editing.
    pub fn set_on_return_handler(&mut self, handler: impl FnMut(&mut EditBox) + 'static) { self.on_return = Some(Box::new(handler)); }

    /// Registers the handler invoked when Escape abandons editing.
    pub fn set_on_escape_handler(&mut self, handler: impl FnMut(&mut EditBox) + 'static) { self.on_escape = Some(Box::new(handler)); }

    /// Registers the handler invoked whenever editing stops.
    pub fn set_on_editing_stopped_handler(&mut self, handler: impl FnMut(&mut EditBox) + 'static) {
        self.on_editing_stopped = Some(Box::new(handler));
    }

    /// Registers the Tab handler. Returning `true` ends input processing for the current frame.
    pub fn set_on_tab_handler(&mut self, handler: impl FnMut(&mut EditBox) -> bool + 'static) { self.on_tab = Some(Box::new(handler)); }

    /// Simulates a click: starts editing with the cursor at the end of the text.
    pub fn simulate_click(&mut self, ctx: &mut WidgetContext<'_>, silence_audio: bool, key: WidgetKey) {
        if self.state.disabled || key != WidgetKey::Primary {
            return;
        }
        self.begin_editing(ctx);
        self.ins_pos = char_len(&self.text);
        self.fit_string_end();
        self.refresh_display_cache();
        if !silence_audio {
            self.play(AudioCue::Click);
        }
    }

    /// Leaves editing mode, invoking the editing-stopped handler if the box was editing.
    pub fn stop_editing(&mut self) {
        if !self.state.mode.is_editing() {
            return;
        }
        self.state.mode = EditMode::Fixed;
        self.cursor_visible = false;
        self.reset_window();
        tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), "editing stopped");
        self.call_handler(HandlerSlot::EditingStopped);
    }

    /// Overwrites the state. Entering an editing mode puts the cursor at the end;
    /// a disabled box is forced out of editing. Handlers are not invoked.
    pub fn set_state(&mut self, state: EditBoxState) {
        let state = state.normalized();
        let was_editing = self.state.mode.is_editing();
        self.state = state;
        tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), bits = state.to_bits(), "state set");
        match (was_editing, state.mode.is_editing()) {
            (false, true) => {
                self.ins_pos = char_len(&self.text);
                self.cursor_visible = true;
                self.refit();
            }
            (true, false) => {
                self.cursor_visible = false;
                self.reset_window();
            }
            _ => self.refresh_display_cache(),
        }
    }

    /// Overwrites the state from a legacy bitmask.
    pub fn set_state_bits(&mut self, bits: u32) -> Result<(), StateError> {
        let state = EditBoxState::from_bits(bits)?;
        self.set_state(state);
        Ok(())
    }

    fn begin_editing(&mut self, ctx: &mut WidgetContext<'_>) {
        ctx.request_focus();
        self.blink_offset = ctx.time_ms();
        self.cursor_visible = true;
        if !self.state.mode.is_editing() {
            self.state.mode = EditMode::Insert;
            tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), "editing started");
        }
    }

    fn play(&self, cue: AudioCue) { self.audio_cues.play(self.audio_callback.as_ref(), cue); }

    fn slot(&mut self, slot: HandlerSlot) -> &mut Option<EditBoxHandler> {
        match slot {
            HandlerSlot::Return => &mut self.on_return,
            HandlerSlot::Escape => &mut self.on_escape,
            HandlerSlot::EditingStopped => &mut self.on_editing_stopped,
        }
    }

    // The handler is taken out of its slot while it runs; a replacement
    // installed from inside the handler wins.
    fn call_handler(&mut self, slot: HandlerSlot) {
        if let Some(mut handler) = self.slot(slot).take() {
            handler(self);
            let current = self.slot(slot);
            if current.is_none() {
                *current = Some(handler);
            }
        }
    }

    fn call_tab_handler(&mut self) -> bool {
        let Some(mut handler) = self.on_tab.take() else {
            return false;
        };
        let done = handler(self);
        if self.on_tab.is_none() {
            self.on_tab = Some(handler);
        }
        done
    }

    fn available_width(&self) -> i32 { (self.rect.width - 2 * self.style.x_gap).max(0) }

    /// Shows as many characters as fit, starting at `print_start`.
    fn fit_string_start(&mut self) {
        let avail = self.available_width();
        self.print_start = self.print_start.min(char_len(&self.text));
        let mut width = 0;
        let mut count = 0;
        for ch in self.text.chars().skip(self.print_start) {
            let w = self.metrics.char_width(self.font, ch);
            if width + w > avail {
                break;
            }
            width += w;
            count += 1;
        }
        self.print_chars = count;
        self.print_width = width;
    }

    /// Shows the longest tail of the text that fits.
    fn fit_string_end(&mut self) {
        let len = char_len(&self.text);
        let (start, width) = self.fit_before(len);
        self.print_start = start;
        self.print_chars = len - start;
        self.print_width = width;
    }

    // Start index and width of the widest run ending at `end` that fits.
    fn fit_before(&self, end: usize) -> (usize, i32) {
        let avail = self.available_width();
        let len = char_len(&self.text);
        let mut width = 0;
        let mut start = end;
        for ch in self.text.chars().rev().skip(len - end) {
            let w = self.metrics.char_width(self.font, ch);
            if width + w > avail {
                break;
            }
            width += w;
            start -= 1;
        }
        (start, width)
    }

    /// Moves the window so that it contains the insertion point.
    fn refit(&mut self) {
        let len = char_len(&self.text);
        self.ins_pos = self.ins_pos.min(len);
        if !self.state.mode.is_editing() {
            self.reset_window();
            return;
        }
        if self.ins_pos < self.print_start {
            self.print_start = self.ins_pos.saturating_sub(self.style.char_jump);
        }
        self.fit_string_start();
        if self.ins_pos > self.print_start + self.print_chars {
            self.print_start = self.fit_before(self.ins_pos).0;
            self.fit_string_start();
        } else if self.print_start > 0 && self.print_start + self.print_chars == len {
            self.fit_string_end();
        }
        tracing::trace!(
            target: "retained_editbox::edit_box",
            ins_pos = self.ins_pos,
            print_start = self.print_start,
            print_chars = self.print_chars,
            "window refit"
        );
        self.refresh_display_cache();
    }

    fn reset_window(&mut self) {
        self.print_start = 0;
        self.fit_string_start();
        self.refresh_display_cache();
    }

    fn refresh_display_cache(&mut self) {
        let avail = self.available_width();
        let mut width = 0;
        let placeholder: String = self
            .placeholder
            .chars()
            .take_while(|ch| {
                width += self.metrics.char_width(self.font, *ch);
                width <= avail
            })
            .collect();
        self.display_cache = DisplayCache {
            text: slice_chars(&self.text, self.print_start, self.print_chars).to_string(),
            placeholder,
            mode_text: match self.state.mode {
                EditMode::Fixed => "",
                EditMode::Insert => MODE_TEXT_INSERT,
                EditMode::Overwrite => MODE_TEXT_OVERWRITE,
            },
        };
    }

    /// Maps an x coordinate relative to the box to the nearest character boundary.
    fn set_cursor_pos_pixels(&mut self, x: i32) {
        let target = x - self.style.x_gap;
        let mut acc = 0;
        let mut pos = self.print_start;
        for ch in self.text.chars().skip(self.print_start).take(self.print_chars) {
            let w = self.metrics.char_width(self.font, ch);
            if target < acc + w {
                if target >= acc + w / 2 {
                    pos += 1;
                }
                break;
            }
            acc += w;
            pos += 1;
        }
        self.ins_pos = pos;
    }

    fn type_char(&mut self, ch: char) -> bool {
        let accepted = match self.state.mode {
            EditMode::Overwrite => overwrite_char(&mut self.text, &mut self.ins_pos, ch, self.max_string_size),
            _ => insert_char(&mut self.text, &mut self.ins_pos, ch, self.max_string_size),
        };
        if !accepted {
            tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), max = self.max_string_size, "input rejected, text full");
            self.play(AudioCue::Error);
        }
        accepted
    }

    fn update_blink(&mut self, time_ms: u32) {
        let elapsed = time_ms.wrapping_sub(self.blink_offset);
        self.cursor_visible = (elapsed / self.style.blink_rate_ms.max(1)) % 2 == 0;
    }
}

impl Widget for EditBox {
    fn id(&self) -> Id { self.id }

    fn geometry(&self) -> Recti { self.rect }

    fn set_geometry(&mut self, rect: Recti) {
        self.rect = rect;
        self.geometry_changed();
    }

    fn clicked(&mut self, ctx: &mut WidgetContext<'_>, key: WidgetKey) {
        if self.state.disabled || key != WidgetKey::Primary {
            return;
        }
        let local = ctx.mouse_in(self.rect);
        self.begin_editing(ctx);
        self.set_cursor_pos_pixels(local.x);
        self.refit();
        self.play(AudioCue::Click);
    }

    fn highlight(&mut self, _ctx: &mut WidgetContext<'_>) {
        self.state.highlighted = true;
        if !self.state.disabled {
            self.play(AudioCue::Highlight);
        }
    }

    fn highlight_lost(&mut self) { self.state.highlighted = false; }

    fn focus_lost(&mut self) { self.stop_editing(); }

    fn run(&mut self, ctx: &mut WidgetContext<'_>) -> ResourceState {
        if self.state.disabled || !self.state.mode.is_editing() {
            return ResourceState::NONE;
        }
        self.update_blink(ctx.time_ms());

        let input = ctx.input();
        if input.mouse_pressed.is_left() && !ctx.mouse_over(self.rect) {
            self.stop_editing();
            return ResourceState::NONE;
        }

        let mut res = ResourceState::ACTIVE;
        let mut changed = false;
        for ch in input.text_input.chars().filter(|ch| is_editable(*ch)) {
            if !self.type_char(ch) {
                break;
            }
            changed = true;
        }

        let keys = input.key_pressed;
        if keys.is_backspace() && delete_prev(&mut self.text, &mut self.ins_pos) {
            changed = true;
        }
        if keys.is_delete() && delete_next(&mut self.text, self.ins_pos) {
            changed = true;
        }
        let len = char_len(&self.text);
        if keys.is_left() && self.ins_pos > 0 {
            self.ins_pos -= 1;
        }
        if keys.is_right() && self.ins_pos < len {
            self.ins_pos += 1;
        }
        if keys.is_home() {
            self.ins_pos = 0;
            self.print_start = 0;
        }
        if keys.is_end() {
            self.ins_pos = len;
        }
        if keys.is_insert() {
            self.state.mode = self.state.mode.toggled();
            tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), mode = ?self.state.mode, "edit mode toggled");
        }
        self.refit();
        if changed {
            res |= ResourceState::CHANGE;
        }

        if keys.is_tab() && self.call_tab_handler() {
            return res;
        }
        if keys.is_return() {
            self.stop_editing();
            self.call_handler(HandlerSlot::Return);
            res.remove(ResourceState::ACTIVE);
            return res | ResourceState::SUBMIT;
        }
        if keys.is_escape() {
            self.stop_editing();
            self.call_handler(HandlerSlot::Escape);
            res.remove(ResourceState::ACTIVE);
            return res | ResourceState::CANCEL;
        }
        res
    }

    fn display(&self, draw: &mut DrawList, x_offset: i32, y_offset: i32) {
        let r = rect(x_offset + self.rect.x, y_offset + self.rect.y, self.rect.width, self.rect.height);
        match &self.box_display {
            Some(display) => display(self, draw, r),
            None => {
                draw.draw_rect(r, self.colours.background);
                if self.state.highlighted {
                    draw.draw_box(r, self.style.highlight_color);
                } else {
                    draw.draw_shadow_box(r, self.colours.first, self.colours.second);
                }
            }
        }

        let editing = self.state.mode.is_editing();
        let line_height = self.metrics.line_height(self.font);
        let text_x = r.x + self.style.x_gap;
        let text_y = r.y + ((r.height - line_height) / 2).max(0);
        let (text, text_color) = if self.text.is_empty() && !editing && !self.placeholder.is_empty() {
            (self.display_cache.placeholder.as_str(), self.style.placeholder_color)
        } else if self.state.disabled {
            (self.display_cache.text.as_str(), self.style.disabled_color)
        } else {
            (self.display_cache.text.as_str(), self.style.text_color)
        };

        draw.with_clip(expand_rect(r, -1), |draw| {
            draw.draw_text(self.font, text, vec2(text_x, text_y), self.metrics.text_size(self.font, text), text_color);
            if !editing || !self.cursor_visible {
                return;
            }
            let before = slice_chars(&self.text, self.print_start, self.ins_pos.saturating_sub(self.print_start));
            let cursor_x = text_x + self.metrics.text_width(self.font, before);
            let top = r.y + self.style.y_gap;
            let height = (r.height - 2 * self.style.y_gap).max(1);
            match self.state.mode {
                EditMode::Overwrite => {
                    let width = self.text.chars().nth(self.ins_pos).map(|ch| self.metrics.char_width(self.font, ch)).unwrap_or(self.style.cursor_size);
                    // keep the underline inside the clip when the text fills the box
                    let x = cursor_x.min(r.x + r.width - 1 - width).max(r.x + 1);
                    draw.draw_rect(rect(x, top + height - 2, width, 2), self.style.text_color);
                }
                _ => draw.draw_rect(rect(cursor_x, top, 1, height), self.style.text_color),
            }
        });

        if editing {
            let mode_text = self.display_cache.mode_text;
            let pos = vec2(r.x + r.width + self.style.x_gap, text_y);
            draw.draw_text(self.font, mode_text, pos, self.metrics.text_size(self.font, mode_text), self.style.mode_color);
        }
    }

    fn geometry_changed(&mut self) { self.refit(); }

    fn get_string(&self) -> String { self.text.clone() }

    fn set_string(&mut self, text: &str) {
        self.text = text.to_string();
        if truncate_chars(&mut self.text, self.max_string_size) {
            tracing::debug!(target: "retained_editbox::edit_box", id = self.id.raw(), max = self.max_string_size, "string truncated");
        }
        self.ins_pos = char_len(&self.text);
        self.refit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn make_metrics() -> Rc<dyn TextMetrics> {
        let mut book = FontBook::new();
        book.add_monospace("mono", 8, 12);
        Rc::new(book)
    }

    // 8px glyphs and 4px gaps: a width of 48 shows exactly five characters.
    fn make_box(text: &str, width: i32) -> EditBox {
        let init = EditBoxInit {
            id: Id::from_str("name"),
            rect: rect(0, 0, width, 20),
            text: text.to_string(),
            ..Default::default()
        };
        EditBox::new(init, make_metrics())
    }

    fn run_frame(edit_box: &mut EditBox, time_ms: u32, f: impl FnOnce(&mut Input)) -> ResourceState {
        let mut input = Input::default();
        f(&mut input);
        let snapshot = input.snapshot();
        let mut ctx = WidgetContext::new(&snapshot, 0, 0, time_ms);
        edit_box.run(&mut ctx)
    }

    fn start_editing(edit_box: &mut EditBox) {
        let snapshot = InputSnapshot::default();
        let mut ctx = WidgetContext::new(&snapshot, 0, 0, 0);
        edit_box.simulate_click(&mut ctx, true, WidgetKey::Primary);
    }

    fn assert_invariants(edit_box: &EditBox) {
        let len = edit_box.get_string().chars().count();
        assert!(edit_box.cursor() <= len);
        assert!(len <= edit_box.max_string_size());
        assert!(edit_box.print_start() + edit_box.print_chars() <= len);
        if edit_box.is_editing() {
            assert!(edit_box.print_start() <= edit_box.cursor());
            assert!(edit_box.cursor() <= edit_box.print_start() + edit_box.print_chars());
        }
    }

    fn recording_audio(edit_box: &mut EditBox) -> Rc<RefCell<Vec<AudioId>>> {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = played.clone();
        edit_box.set_audio_callback(Some(Rc::new(move |id| sink.borrow_mut().push(id))));
        edit_box.set_audio_cues(AudioCues {
            click: Some(AudioId::new(1)),
            highlight: Some(AudioId::new(2)),
            error: Some(AudioId::new(3)),
        });
        played
    }

    #[test]
    fn set_string_round_trips_and_truncates() {
        let mut edit_box = make_box("", 100);
        edit_box.set_string("hello world");
        assert_eq!(edit_box.get_string(), "hello world");
        assert_eq!(edit_box.cursor(), 11);

        edit_box.set_max_string_size(5);
        assert_eq!(edit_box.get_string(), "hello");
        edit_box.set_string("abcdefgh");
        assert_eq!(edit_box.get_string(), "abcde");
        assert_invariants(&edit_box);
    }

    #[test]
    fn window_follows_cursor_at_end() {
        let mut edit_box = make_box("HELLOWORLD", 48);
        assert_eq!(edit_box.visible_text(), "HELLO");

        start_editing(&mut edit_box);
        assert_eq!(edit_box.cursor(), 10);
        assert_eq!(edit_box.visible_text(), "WORLD");

        let res = run_frame(&mut edit_box, 0, |input| input.text("!"));
        assert!(res.is_changed());
        assert!(res.is_active());
        assert_eq!(edit_box.get_string(), "HELLOWORLD!");
        assert_eq!(edit_box.visible_text(), "ORLD!");
        assert_eq!(edit_box.print_width(), 40);
        assert_invariants(&edit_box);
    }

    #[test]
    fn full_box_rejects_input_with_error_cue() {
        let mut edit_box = make_box("abc", 100);
        edit_box.set_max_string_size(3);
        let played = recording_audio(&mut edit_box);
        start_editing(&mut edit_box);

        let res = run_frame(&mut edit_box, 0, |input| input.text("xy"));
        assert!(!res.is_changed());
        assert_eq!(edit_box.get_string(), "abc");
        assert_eq!(*played.borrow(), vec![AudioId::new(3)]);

        // overwriting inside the text never grows it
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::HOME | KeyCode::INSERT));
        assert_eq!(edit_box.mode(), EditMode::Overwrite);
        let res = run_frame(&mut edit_box, 0, |input| input.text("z"));
        assert!(res.is_changed());
        assert_eq!(edit_box.get_string(), "zbc");
        assert_eq!(played.borrow().len(), 1);
    }

    #[test]
    fn focus_lost_stops_editing_once() {
        let mut edit_box = make_box("abc", 100);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        edit_box.set_on_editing_stopped_handler(move |_| counter.set(counter.get() + 1));

        edit_box.focus_lost();
        assert_eq!(calls.get(), 0);

        start_editing(&mut edit_box);
        assert!(edit_box.is_editing());
        edit_box.focus_lost();
        edit_box.focus_lost();
        assert_eq!(calls.get(), 1);
        assert_eq!(edit_box.mode(), EditMode::Fixed);
        assert_eq!(edit_box.print_start(), 0);
    }

    #[test]
    fn click_places_cursor_at_nearest_boundary() {
        let mut edit_box = make_box("abcdef", 100);
        let played = recording_audio(&mut edit_box);

        let input = InputSnapshot {
            mouse_pos: vec2(4 + 16 + 5, 10),
            mouse_pressed: MouseButton::LEFT,
            ..Default::default()
        };
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        edit_box.clicked(&mut ctx, WidgetKey::Primary);
        assert!(ctx.focus_requested());
        assert_eq!(edit_box.mode(), EditMode::Insert);
        assert_eq!(edit_box.cursor(), 3);
        assert_eq!(*played.borrow(), vec![AudioId::new(1)]);

        let input = InputSnapshot {
            mouse_pos: vec2(4 + 16 + 2, 10),
            ..Default::default()
        };
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        edit_box.clicked(&mut ctx, WidgetKey::Primary);
        assert_eq!(edit_box.cursor(), 2);

        let input = InputSnapshot {
            mouse_pos: vec2(95, 10),
            ..Default::default()
        };
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        edit_box.clicked(&mut ctx, WidgetKey::Secondary);
        assert_eq!(edit_box.cursor(), 2);
        edit_box.clicked(&mut ctx, WidgetKey::Primary);
        assert_eq!(edit_box.cursor(), 6);
    }

    #[test]
    fn simulated_click_can_be_silent() {
        let mut edit_box = make_box("abc", 100);
        let played = recording_audio(&mut edit_box);
        let input = InputSnapshot::default();
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        edit_box.simulate_click(&mut ctx, true, WidgetKey::Primary);
        assert!(played.borrow().is_empty());
        edit_box.stop_editing();
        edit_box.simulate_click(&mut ctx, false, WidgetKey::Primary);
        assert_eq!(*played.borrow(), vec![AudioId::new(1)]);
    }

    #[test]
    fn cursor_leaving_window_on_the_left_jumps_back() {
        // ten characters visible
        let mut edit_box = make_box("abcdefghijklmnopqrst", 88);
        start_editing(&mut edit_box);
        assert_eq!(edit_box.print_start(), 10);

        for _ in 0..10 {
            run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::LEFT));
            assert_invariants(&edit_box);
        }
        assert_eq!(edit_box.cursor(), 10);
        assert_eq!(edit_box.print_start(), 10);

        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::LEFT));
        assert_eq!(edit_box.cursor(), 9);
        assert_eq!(edit_box.print_start(), 3);
        assert_eq!(edit_box.visible_text(), "defghijklm");

        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::HOME));
        assert_eq!((edit_box.cursor(), edit_box.print_start()), (0, 0));
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::END));
        assert_eq!((edit_box.cursor(), edit_box.print_start()), (20, 10));
    }

    #[test]
    fn deletes_refill_the_window() {
        let mut edit_box = make_box("HELLOWORLD", 48);
        start_editing(&mut edit_box);

        let res = run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::BACKSPACE));
        assert!(res.is_changed());
        assert_eq!(edit_box.get_string(), "HELLOWORL");
        assert_eq!(edit_box.visible_text(), "OWORL");

        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::HOME));
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::DELETE));
        assert_eq!(edit_box.get_string(), "ELLOWORL");
        assert_eq!(edit_box.visible_text(), "ELLOW");
        assert_invariants(&edit_box);

        let res = run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::LEFT | KeyCode::UP));
        assert!(!res.is_changed());
        assert_eq!(edit_box.cursor(), 0);
    }

    #[test]
    fn return_submits_and_stops_editing() {
        let mut edit_box = make_box("abc", 100);
        let log = Rc::new(RefCell::new(Vec::new()));
        let stopped = log.clone();
        edit_box.set_on_editing_stopped_handler(move |_| stopped.borrow_mut().push("stopped"));
        let returned = log.clone();
        edit_box.set_on_return_handler(move |b| returned.borrow_mut().push(if b.get_string() == "abcd" { "return" } else { "wrong" }));
        start_editing(&mut edit_box);

        let res = run_frame(&mut edit_box, 0, |input| {
            input.text("d");
            input.keydown(KeyCode::RETURN);
        });
        assert!(res.is_submitted());
        assert!(res.is_changed());
        assert!(!res.is_active());
        assert!(!edit_box.is_editing());
        assert_eq!(*log.borrow(), vec!["stopped", "return"]);
    }

    #[test]
    fn escape_cancels() {
        let mut edit_box = make_box("abc", 100);
        let escaped = Rc::new(Cell::new(false));
        let flag = escaped.clone();
        edit_box.set_on_escape_handler(move |_| flag.set(true));
        start_editing(&mut edit_box);

        let res = run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::ESCAPE));
        assert!(res.is_cancelled());
        assert!(escaped.get());
        assert_eq!(edit_box.mode(), EditMode::Fixed);
    }

    #[test]
    fn tab_handler_can_short_circuit() {
        let mut edit_box = make_box("abc", 100);
        let returned = Rc::new(Cell::new(false));
        let flag = returned.clone();
        edit_box.set_on_return_handler(move |_| flag.set(true));
        edit_box.set_on_tab_handler(|b| {
            b.set_string("tabbed");
            true
        });
        start_editing(&mut edit_box);

        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::TAB | KeyCode::RETURN));
        assert!(!returned.get());
        assert!(edit_box.is_editing());
        assert_eq!(edit_box.get_string(), "tabbed");

        edit_box.set_on_tab_handler(|_| false);
        let res = run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::TAB | KeyCode::RETURN));
        assert!(res.is_submitted());
        assert!(returned.get());
    }

    #[test]
    fn handler_may_replace_itself() {
        let mut edit_box = make_box("abc", 100);
        let hits = Rc::new(Cell::new(0));
        let first = hits.clone();
        edit_box.set_on_editing_stopped_handler(move |b| {
            first.set(first.get() + 1);
            let second = first.clone();
            b.set_on_editing_stopped_handler(move |_| second.set(second.get() + 10));
        });
        start_editing(&mut edit_box);
        edit_box.stop_editing();
        start_editing(&mut edit_box);
        edit_box.stop_editing();
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn click_outside_stops_editing() {
        let mut edit_box = make_box("abc", 100);
        start_editing(&mut edit_box);
        let res = run_frame(&mut edit_box, 0, |input| input.mousedown(300, 10, MouseButton::LEFT));
        assert!(res.is_none());
        assert!(!edit_box.is_editing());
    }

    #[test]
    fn disabled_box_ignores_input() {
        let mut edit_box = make_box("abc", 100);
        start_editing(&mut edit_box);
        edit_box.set_state(EditBoxState {
            mode: EditMode::Insert,
            highlighted: false,
            disabled: true,
        });
        assert_eq!(edit_box.mode(), EditMode::Fixed);

        start_editing(&mut edit_box);
        assert!(!edit_box.is_editing());
        let res = run_frame(&mut edit_box, 0, |input| input.text("x"));
        assert!(res.is_none());
        assert_eq!(edit_box.get_string(), "abc");

        assert_eq!(edit_box.set_state_bits(0x0007), Err(StateError::InvalidMode(7)));
        assert!(edit_box.set_state_bits(EDIT_BITS_OVERWRITE).is_ok());
        assert_eq!(edit_box.mode(), EditMode::Overwrite);
        assert_eq!(edit_box.cursor(), 3);
        assert_eq!(edit_box.mode_text(), "OVR");
    }

    #[test]
    fn highlight_toggles_flag_and_plays_cue() {
        let mut edit_box = make_box("abc", 100);
        let played = recording_audio(&mut edit_box);
        let input = InputSnapshot::default();
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        edit_box.highlight(&mut ctx);
        assert!(edit_box.state().highlighted);
        edit_box.highlight_lost();
        assert!(!edit_box.state().highlighted);
        assert_eq!(edit_box.get_string(), "abc");
        assert_eq!(*played.borrow(), vec![AudioId::new(2)]);
    }

    #[test]
    fn geometry_change_keeps_cursor_visible() {
        let mut edit_box = make_box("abcdefghij", 88);
        start_editing(&mut edit_box);
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::HOME));
        for _ in 0..7 {
            run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::RIGHT));
        }
        assert_eq!(edit_box.print_start(), 0);

        edit_box.set_geometry(rect(0, 0, 28, 20));
        assert_invariants(&edit_box);
        assert_eq!(edit_box.print_chars(), 2);
        assert_eq!(edit_box.visible_text(), "fg");

        edit_box.set_geometry(rect(0, 0, 4, 20));
        assert_invariants(&edit_box);
        assert_eq!(edit_box.print_chars(), 0);
    }

    #[test]
    fn geometry_change_while_idle_shows_text_from_start() {
        let mut edit_box = make_box("HELLOWORLD", 88);
        edit_box.set_geometry(rect(0, 0, 32, 20));
        assert!(!edit_box.is_editing());
        assert_eq!(edit_box.print_start(), 0);
        assert_eq!(edit_box.visible_text(), "HEL");
        assert_invariants(&edit_box);
    }

    #[test]
    fn invariants_hold_over_mixed_editing() {
        let mut edit_box = make_box("", 48);
        edit_box.set_max_string_size(12);
        start_editing(&mut edit_box);
        let keys = [
            KeyCode::NONE,
            KeyCode::LEFT,
            KeyCode::BACKSPACE,
            KeyCode::INSERT,
            KeyCode::HOME,
            KeyCode::RIGHT,
            KeyCode::DELETE,
            KeyCode::END,
        ];
        for step in 0..64usize {
            let key = keys[step % keys.len()];
            let text = if step % 3 == 0 { "xyz" } else { "q" };
            run_frame(&mut edit_box, 0, |input| {
                input.text(text);
                input.keydown(key);
            });
            assert_invariants(&edit_box);
        }
    }

    #[test]
    fn cursor_blinks_with_time() {
        let mut edit_box = make_box("abc", 100);
        start_editing(&mut edit_box);
        run_frame(&mut edit_box, 100, |_| {});
        assert!(edit_box.cursor_visible());
        run_frame(&mut edit_box, 900, |_| {});
        assert!(!edit_box.cursor_visible());
        run_frame(&mut edit_box, 1700, |_| {});
        assert!(edit_box.cursor_visible());
    }

    #[test]
    fn display_shows_placeholder_when_idle() {
        let mut edit_box = make_box("", 100);
        edit_box.set_placeholder("Enter name");
        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 10, 10);
        assert_eq!(draw.texts(), vec!["Enter name"]);
        let placeholder_color = Style::default().placeholder_color;
        assert!(draw.commands().iter().any(|c| matches!(c, Command::Text { color, .. } if *color == placeholder_color)));

        start_editing(&mut edit_box);
        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 10, 10);
        assert_eq!(draw.texts(), vec!["INS"]);
    }

    #[test]
    fn display_draws_visible_text_cursor_and_mode() {
        let mut edit_box = make_box("HELLOWORLD", 48);
        start_editing(&mut edit_box);
        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 0, 0);
        assert_eq!(draw.texts(), vec!["WORLD", "INS"]);

        // caret sits after "WORLD", at the right edge of the text area
        let caret = draw.commands().iter().any(|c| match c {
            Command::Rect { rect, .. } => rect.x == 44 && rect.width == 1,
            _ => false,
        });
        assert!(caret);
    }

    fn underline(draw: &DrawList) -> Option<(i32, i32, i32, i32)> {
        draw.commands().iter().find_map(|c| match c {
            Command::Rect { rect, .. } if rect.height == 2 => Some((rect.x, rect.y, rect.width, rect.height)),
            _ => None,
        })
    }

    #[test]
    fn overwrite_cursor_underlines_current_character() {
        let mut edit_box = make_box("HELLOWORLD", 48);
        start_editing(&mut edit_box);
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::HOME));
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::RIGHT));
        run_frame(&mut edit_box, 0, |input| input.keydown(KeyCode::RIGHT));
        assert!(edit_box.set_state_bits(EDIT_BITS_OVERWRITE).is_ok());
        assert_eq!(edit_box.cursor(), 2);

        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 0, 0);
        assert_eq!(draw.texts(), vec!["HELLO", "OVR"]);
        assert_eq!(underline(&draw), Some((20, 16, 8, 2)));
    }

    #[test]
    fn overwrite_cursor_at_end_stays_inside_full_box() {
        let mut edit_box = make_box("HELLOWORLD", 32);
        start_editing(&mut edit_box);
        assert!(edit_box.set_state_bits(EDIT_BITS_OVERWRITE).is_ok());
        assert_eq!(edit_box.visible_text(), "RLD");

        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 0, 0);
        let width = Style::default().cursor_size;
        assert_eq!(underline(&draw), Some((32 - 1 - width, 16, width, 2)));
    }

    #[test]
    fn disabled_box_draws_dimmed_text() {
        let mut edit_box = make_box("HELLOWORLD", 32);
        edit_box.set_state(EditBoxState {
            mode: EditMode::Fixed,
            highlighted: false,
            disabled: true,
        });
        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 0, 0);
        let disabled_color = Style::default().disabled_color;
        let dimmed = draw.commands().iter().any(|c| matches!(c, Command::Text { text, color, .. } if text == "HEL" && *color == disabled_color));
        assert!(dimmed);
    }

    #[test]
    fn highlighted_box_draws_highlight_border() {
        let mut edit_box = make_box("abc", 100);
        let first = color(1, 1, 1, 255);
        let second = color(2, 2, 2, 255);
        edit_box.set_box_colours(first, second, color(3, 3, 3, 255));
        let borders = |draw: &DrawList, wanted: Color| {
            draw.commands()
                .iter()
                .filter(|c| matches!(c, Command::Rect { color, .. } if *color == wanted))
                .count()
        };

        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 0, 0);
        assert_eq!(borders(&draw, first), 2);
        assert_eq!(borders(&draw, second), 2);

        let input = InputSnapshot::default();
        let mut ctx = WidgetContext::new(&input, 0, 0, 0);
        edit_box.highlight(&mut ctx);
        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 0, 0);
        assert_eq!(borders(&draw, Style::default().highlight_color), 4);
        assert_eq!(borders(&draw, first), 0);
        assert_eq!(borders(&draw, second), 0);
    }

    #[test]
    fn custom_box_display_replaces_background() {
        let mut edit_box = make_box("abc", 100);
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        edit_box.set_box_display(Some(Rc::new(move |b: &EditBox, _draw: &mut DrawList, r: Recti| {
            flag.set(b.get_string() == "abc" && r.x == 5);
        })));
        let mut draw = DrawList::new();
        edit_box.display(&mut draw, 5, 0);
        assert!(seen.get());
        assert_eq!(draw.commands().len(), 1);
        edit_box.set_box_colours(color(1, 1, 1, 255), color(2, 2, 2, 255), color(3, 3, 3, 255));
        assert_eq!(edit_box.box_colours().background, color(3, 3, 3, 255));
    }
}
