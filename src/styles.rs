//! Built-in style presets referenced by `AppState::active_style_id`.

use serde::Serialize;

/// Id of the neutral preset. Selecting it adds nothing to the prompt.
pub const DEFAULT_STYLE_ID: &str = "none";

/// A named style the user can pick from the style gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub id: &'static str,
    pub name: &'static str,
    /// Prompt fragment describing the style.
    pub descriptor: &'static str,
}

pub const PRESETS: &[StylePreset] = &[
    StylePreset {
        id: DEFAULT_STYLE_ID,
        name: "No Style",
        descriptor: "",
    },
    StylePreset {
        id: "modern-minimal",
        name: "Modern Minimal",
        descriptor: "modern minimalist architecture with clean lines and restrained palette",
    },
    StylePreset {
        id: "brutalist",
        name: "Brutalist",
        descriptor: "brutalist architecture with raw board-formed concrete and heavy massing",
    },
    StylePreset {
        id: "scandinavian",
        name: "Scandinavian",
        descriptor: "Scandinavian architecture with pale timber, soft daylight and simple forms",
    },
    StylePreset {
        id: "parametric",
        name: "Parametric",
        descriptor: "parametric architecture with flowing curved surfaces and patterned skins",
    },
    StylePreset {
        id: "biophilic",
        name: "Biophilic",
        descriptor: "biophilic architecture with planted terraces and living facades",
    },
    StylePreset {
        id: "industrial",
        name: "Industrial",
        descriptor: "industrial architecture with exposed steel, brick and large glazing",
    },
    StylePreset {
        id: "mediterranean",
        name: "Mediterranean",
        descriptor: "Mediterranean architecture with whitewashed walls and terracotta roofs",
    },
];

/// Look up a preset by id.
pub fn find(id: &str) -> Option<&'static StylePreset> {
    PRESETS.iter().find(|p| p.id == id)
}
