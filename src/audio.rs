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

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Identifier of a sound effect owned by the host audio system.
pub struct AudioId(i16);

impl AudioId {
    /// Wraps a host sound identifier.
    pub fn new(id: i16) -> Self { Self(id) }

    /// Returns the host sound identifier.
    pub fn raw(self) -> i16 { self.0 }
}

/// Callback the host installs to play sound effects.
pub type AudioCallback = Rc<dyn Fn(AudioId)>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Sound effects a widget can request.
pub struct AudioCues {
    /// Played when the widget is clicked.
    pub click: Option<AudioId>,
    /// Played when the pointer starts hovering the widget.
    pub highlight: Option<AudioId>,
    /// Played when input is rejected.
    pub error: Option<AudioId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Selects one of the cues in [`AudioCues`].
pub enum AudioCue {
    /// See [`AudioCues::click`].
    Click,
    /// See [`AudioCues::highlight`].
    Highlight,
    /// See [`AudioCues::error`].
    Error,
}

impl AudioCues {
    /// Returns the identifier configured for `cue`, if any.
    pub fn get(&self, cue: AudioCue) -> Option<AudioId> {
        match cue {
            AudioCue::Click => self.click,
            AudioCue::Highlight => self.highlight,
            AudioCue::Error => self.error,
        }
    }

    /// Dispatches `cue` through `callback` when both are configured.
    pub fn play(&self, callback: Option<&AudioCallback>, cue: AudioCue) {
        if let (Some(callback), Some(id)) = (callback, self.get(cue)) {
            callback(id);
        }
    }
}
