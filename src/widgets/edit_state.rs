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
/// Legacy bit for the non-editing mode.
pub const EDIT_BITS_FIXED: u32 = 0x0001;
/// Legacy bit pattern for insertion editing.
pub const EDIT_BITS_INSERT: u32 = 0x0002;
/// Legacy bit pattern for overwrite editing.
pub const EDIT_BITS_OVERWRITE: u32 = 0x0003;
/// Mask selecting the mode nibble.
pub const EDIT_BITS_MODE_MASK: u32 = 0x000f;
/// Legacy highlight bit.
pub const EDIT_BITS_HIGHLIGHT: u32 = 0x0010;
/// Legacy disable bit.
pub const EDIT_BITS_DISABLE: u32 = 0x0020;

const EDIT_BITS_ALL: u32 = EDIT_BITS_MODE_MASK | EDIT_BITS_HIGHLIGHT | EDIT_BITS_DISABLE;

/// Errors raised when decoding a legacy state bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The mode nibble does not name fixed, insert or overwrite.
    #[error("Invalid edit mode 0x{0:x} in state bits")]
    InvalidMode(u32),
    /// Bits outside the known mask are set.
    #[error("Unknown state bits 0x{0:x}")]
    UnknownBits(u32),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Exclusive editing mode of an edit box.
pub enum EditMode {
    /// No editing is going on.
    #[default]
    Fixed,
    /// Typed characters are inserted at the cursor.
    Insert,
    /// Typed characters replace the character under the cursor.
    Overwrite,
}

impl EditMode {
    /// Returns `true` for [`EditMode::Insert`] and [`EditMode::Overwrite`].
    pub fn is_editing(self) -> bool { !matches!(self, Self::Fixed) }

    /// Switches between insert and overwrite; fixed stays fixed.
    pub fn toggled(self) -> Self {
        match self {
            Self::Insert => Self::Overwrite,
            Self::Overwrite => Self::Insert,
            Self::Fixed => Self::Fixed,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// Complete interaction state of an edit box.
pub struct EditBoxState {
    /// Current editing mode.
    pub mode: EditMode,
    /// The pointer hovers the widget.
    pub highlighted: bool,
    /// The widget ignores clicks and keyboard input.
    pub disabled: bool,
}

impl EditBoxState {
    /// Decodes a legacy bitmask, rejecting unknown bits and mode values.
    pub fn from_bits(bits: u32) -> Result<Self, StateError> {
        let unknown = bits & !EDIT_BITS_ALL;
        if unknown != 0 {
            return Err(StateError::UnknownBits(unknown));
        }
        let mode = match bits & EDIT_BITS_MODE_MASK {
            EDIT_BITS_FIXED => EditMode::Fixed,
            EDIT_BITS_INSERT => EditMode::Insert,
            EDIT_BITS_OVERWRITE => EditMode::Overwrite,
            other => return Err(StateError::InvalidMode(other)),
        };
        Ok(Self {
            mode,
            highlighted: bits & EDIT_BITS_HIGHLIGHT != 0,
            disabled: bits & EDIT_BITS_DISABLE != 0,
        })
    }

    /// Encodes the state as a legacy bitmask.
    pub fn to_bits(self) -> u32 {
        let mut bits = match self.mode {
            EditMode::Fixed => EDIT_BITS_FIXED,
            EditMode::Insert => EDIT_BITS_INSERT,
            EditMode::Overwrite => EDIT_BITS_OVERWRITE,
        };
        if self.highlighted {
            bits |= EDIT_BITS_HIGHLIGHT;
        }
        if self.disabled {
            bits |= EDIT_BITS_DISABLE;
        }
        bits
    }

    /// Returns the state with a disabled box forced out of editing.
    pub fn normalized(mut self) -> Self {
        if self.disabled {
            self.mode = EditMode::Fixed;
        }
        self
    }
}
