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
use std::collections::HashMap;
use std::path::PathBuf;

use crate::Dimensioni;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a font face registered with a [`FontBook`] (or any other [`TextMetrics`] provider).
pub struct FontId(usize);

impl FontId {
    /// Wraps a raw face index.
    pub fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw face index.
    pub fn raw(self) -> usize { self.0 }
}

/// Errors raised while loading font faces.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("Cannot read font file '{path}': {source}")]
    Io {
        /// Path of the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The font data could not be parsed.
    #[error("Cannot parse font '{name}': {message}")]
    Parse {
        /// Name the face was registered under.
        name: String,
        /// Parser message.
        message: String,
    },
}

/// Measurement service used by widgets to lay out text.
///
/// Widgets only ever measure; rasterising glyphs is left to whatever replays the draw commands.
pub trait TextMetrics {
    /// Returns the horizontal advance of `text` in pixels.
    fn text_width(&self, font: FontId, text: &str) -> i32;

    /// Returns the distance between two baselines in pixels.
    fn line_height(&self, font: FontId) -> i32;

    /// Returns the offset from the top of a line to its baseline.
    fn baseline(&self, font: FontId) -> i32 { self.line_height(font) }

    /// Returns the horizontal advance of a single character.
    fn char_width(&self, font: FontId, ch: char) -> i32 {
        let mut buf = [0u8; 4];
        self.text_width(font, ch.encode_utf8(&mut buf))
    }

    /// Returns the size of a single line of `text`.
    fn text_size(&self, font: FontId, text: &str) -> Dimensioni { Dimensioni::new(self.text_width(font, text), self.line_height(font)) }
}

#[derive(Clone, Debug)]
struct FontFace {
    line_size: i32,
    baseline: i32,
    fallback_advance: i32,
    advances: HashMap<char, i32>,
}

impl FontFace {
    fn advance(&self, ch: char) -> i32 { self.advances.get(&ch).copied().unwrap_or(self.fallback_advance) }
}

#[derive(Clone, Debug, Default)]
/// Table of named font faces storing per-character advances and line metrics.
pub struct FontBook {
    faces: Vec<(String, FontFace)>,
}

impl FontBook {
    /// Creates an empty font book.
    pub fn new() -> Self { Self::default() }

    /// Registers a face where every character advances by `advance` pixels.
    pub fn add_monospace(&mut self, name: &str, advance: i32, line_size: i32) -> FontId {
        self.push_face(
            name,
            FontFace {
                line_size,
                baseline: line_size,
                fallback_advance: advance,
                advances: HashMap::new(),
            },
        )
    }

    /// Registers a face from an explicit advance table. Characters missing from
    /// `entries` advance by `fallback_advance`.
    pub fn add_glyphs(&mut self, name: &str, line_size: i32, baseline: i32, fallback_advance: i32, entries: &[(char, i32)]) -> FontId {
        self.push_face(
            name,
            FontFace {
                line_size,
                baseline,
                fallback_advance,
                advances: entries.iter().copied().collect(),
            },
        )
    }

    /// Returns the identifier of the face registered under `name`.
    pub fn find(&self, name: &str) -> Option<FontId> { self.faces.iter().position(|(n, _)| n == name).map(FontId) }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize { self.faces.len() }

    /// Returns `true` if no face has been registered.
    pub fn is_empty(&self) -> bool { self.faces.is_empty() }

    /// Returns a mapping from face names to their identifiers.
    pub fn clone_font_table(&self) -> Vec<(String, FontId)> { self.faces.iter().enumerate().map(|(i, face)| (face.0.clone(), FontId(i))).collect() }

    fn push_face(&mut self, name: &str, face: FontFace) -> FontId {
        let id = self.faces.len();
        tracing::debug!(target: "retained_editbox::font", name, id, line_size = face.line_size, "registered font face");
        self.faces.push((name.to_string(), face));
        FontId(id)
    }

    fn face(&self, font: FontId) -> &FontFace { &self.faces[font.0].1 }
}

/// # Panics
///
/// Every method panics if `font` was not returned by this book.
impl TextMetrics for FontBook {
    fn text_width(&self, font: FontId, text: &str) -> i32 {
        let face = self.face(font);
        text.chars().map(|ch| face.advance(ch)).sum()
    }

    fn line_height(&self, font: FontId) -> i32 { self.face(font).line_size }

    fn baseline(&self, font: FontId) -> i32 { self.face(font).baseline }

    fn char_width(&self, font: FontId, ch: char) -> i32 { self.face(font).advance(ch) }
}

#[cfg(feature = "builder")]
mod builder {
    use super::*;
    use fontdue::FontSettings;
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    impl FontBook {
        /// Loads a TrueType/OpenType face from memory and records the advances of
        /// printable ASCII at the requested pixel size.
        pub fn add_font_bytes(&mut self, name: &str, data: &[u8], size: usize) -> Result<FontId, FontError> {
            let font = fontdue::Font::from_bytes(data, FontSettings::default()).map_err(|error| FontError::Parse {
                name: name.to_string(),
                message: error.to_string(),
            })?;

            let px = size as f32;
            let mut advances = HashMap::new();
            for i in 32..127u8 {
                let ch = i as char;
                let metrics = font.metrics(ch, px);
                advances.insert(ch, metrics.advance_width.round() as i32);
            }

            let line_metrics = font.horizontal_line_metrics(px);
            let line_size = line_metrics.as_ref().map(|m| m.new_line_size.round() as i32).unwrap_or(size as i32);
            let baseline = line_metrics.as_ref().map(|m| m.ascent.round() as i32).unwrap_or(line_size);
            let fallback_advance = advances.get(&'?').copied().unwrap_or(size as i32 / 2);

            Ok(self.push_face(
                name,
                FontFace {
                    line_size,
                    baseline,
                    fallback_advance,
                    advances,
                },
            ))
        }

        /// Loads a face from disk, naming it after the file stem.
        pub fn add_font_file(&mut self, path: &str, size: usize) -> Result<FontId, FontError> {
            let mut data = Vec::new();
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut data))
                .map_err(|source| FontError::Io { path: PathBuf::from(path), source })?;
            let name = Path::new(path).file_stem().and_then(|n| n.to_str()).unwrap_or(path).to_string();
            self.add_font_bytes(&name, &data, size)
        }
    }
}
