//! Color utilities for UI rendering
//!
//! Maps the renderer-neutral [`Tone`] and [`LineKind`] of transcript lines
//! onto the green-on-black terminal palette.

use crate::models::{LineKind, Tone};
use eframe::egui::Color32;

/// Terminal palette
#[derive(Debug, Clone, PartialEq)]
pub struct UiColors {
    pub background: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub accent: Color32,
    pub hint: Color32,
    pub headline: Color32,
    /// Text color of the highlighted access code
    pub highlight: Color32,
    /// Background behind the highlighted access code
    pub highlight_background: Color32,
    /// Decryption monitor text
    pub monitor: Color32,
    /// Destroyed screen text
    pub destroyed: Color32,
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            background: Color32::BLACK,
            foreground: Color32::from_rgb(34, 197, 94),
            muted: Color32::from_rgb(107, 114, 128),
            warning: Color32::from_rgb(234, 179, 8),
            error: Color32::from_rgb(239, 68, 68),
            accent: Color32::from_rgb(96, 165, 250),
            hint: Color32::from_rgb(156, 163, 175),
            headline: Color32::from_rgb(134, 239, 172),
            highlight: Color32::WHITE,
            highlight_background: Color32::from_rgb(20, 83, 45),
            monitor: Color32::from_rgb(74, 222, 128),
            destroyed: Color32::from_rgb(220, 38, 38),
        }
    }
}

impl UiColors {
    /// Base color for a line kind
    pub fn line(&self, kind: LineKind) -> Color32 {
        match kind {
            LineKind::Error => self.error,
            LineKind::Input | LineKind::Output | LineKind::System => self.foreground,
        }
    }

    /// Color for styled text; `Plain` keeps the line's base color
    pub fn tone(&self, tone: Tone, base: Color32) -> Color32 {
        match tone {
            Tone::Plain => base,
            Tone::Muted => self.muted,
            Tone::Warning => self.warning,
            Tone::Danger => self.error,
            Tone::Accent => self.accent,
            Tone::Hint => self.hint,
            Tone::Headline => self.headline,
            Tone::Highlight => self.highlight,
        }
    }
}
