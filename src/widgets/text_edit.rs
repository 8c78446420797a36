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
//! Character-indexed editing primitives. Cursor positions count `char`s, not bytes.

pub(crate) fn char_len(buf: &str) -> usize { buf.chars().count() }

pub(crate) fn byte_offset(buf: &str, pos: usize) -> usize { buf.char_indices().nth(pos).map(|(idx, _)| idx).unwrap_or(buf.len()) }

pub(crate) fn slice_chars(buf: &str, start: usize, count: usize) -> &str {
    let begin = byte_offset(buf, start);
    let end = begin + byte_offset(&buf[begin..], count);
    &buf[begin..end]
}

pub(crate) fn is_editable(ch: char) -> bool { !ch.is_control() }

pub(crate) fn truncate_chars(buf: &mut String, max: usize) -> bool {
    let end = byte_offset(buf, max);
    if end < buf.len() {
        buf.truncate(end);
        return true;
    }
    false
}

pub(crate) fn insert_char(buf: &mut String, cursor: &mut usize, ch: char, max: usize) -> bool {
    if char_len(buf) >= max {
        return false;
    }
    let at = byte_offset(buf, *cursor);
    buf.insert(at, ch);
    *cursor += 1;
    true
}

pub(crate) fn overwrite_char(buf: &mut String, cursor: &mut usize, ch: char, max: usize) -> bool {
    let start = byte_offset(buf, *cursor);
    let Some(old) = buf[start..].chars().next() else {
        return insert_char(buf, cursor, ch, max);
    };
    let mut tmp = [0u8; 4];
    buf.replace_range(start..start + old.len_utf8(), ch.encode_utf8(&mut tmp));
    *cursor += 1;
    true
}

pub(crate) fn delete_prev(buf: &mut String, cursor: &mut usize) -> bool {
    if *cursor == 0 || buf.is_empty() {
        return false;
    }
    *cursor -= 1;
    let at = byte_offset(buf, *cursor);
    buf.remove(at);
    true
}

pub(crate) fn delete_next(buf: &mut String, cursor: usize) -> bool {
    let at = byte_offset(buf, cursor);
    if at >= buf.len() {
        return false;
    }
    buf.remove(at);
    true
}
