//! Workflow modes.

use serde::{Deserialize, Serialize};

/// One of the mutually exclusive editing workflows. Exactly one is active.
///
/// Serialized with the kebab-case names the front-end uses
/// (`"render-3d"`, `"img-to-cad"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "render-3d")]
    Render3d,
    #[serde(rename = "render-cad")]
    RenderCad,
    #[serde(rename = "masterplan")]
    Masterplan,
    #[serde(rename = "visual-edit")]
    VisualEdit,
    #[serde(rename = "exploded")]
    Exploded,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "render-sketch")]
    RenderSketch,
    #[serde(rename = "upscale")]
    Upscale,
    #[serde(rename = "img-to-cad")]
    ImgToCad,
    #[serde(rename = "img-to-3d")]
    ImgTo3d,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "generate-text")]
    GenerateText,
}

impl Mode {
    pub const ALL: [Mode; 12] = [
        Mode::Render3d,
        Mode::RenderCad,
        Mode::Masterplan,
        Mode::VisualEdit,
        Mode::Exploded,
        Mode::Section,
        Mode::RenderSketch,
        Mode::Upscale,
        Mode::ImgToCad,
        Mode::ImgTo3d,
        Mode::Video,
        Mode::GenerateText,
    ];

    /// Human-readable label for toolbars and log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Render3d => "3D Render",
            Self::RenderCad => "CAD Render",
            Self::Masterplan => "Masterplan",
            Self::VisualEdit => "Visual Edit",
            Self::Exploded => "Exploded View",
            Self::Section => "Section Cut",
            Self::RenderSketch => "Sketch to Render",
            Self::Upscale => "Upscale",
            Self::ImgToCad => "Image to CAD",
            Self::ImgTo3d => "Image to 3D",
            Self::Video => "Video",
            Self::GenerateText => "Generate Text",
        }
    }

    /// Which shared setting groups feed the prompt in this mode.
    pub fn shared_groups(self) -> SharedGroups {
        match self {
            Self::Render3d | Self::RenderCad | Self::RenderSketch => SharedGroups::ALL,
            Self::Masterplan => SharedGroups {
                lighting: true,
                context: true,
                output: true,
                ..SharedGroups::NONE
            },
            Self::VisualEdit | Self::Upscale => SharedGroups {
                output: true,
                ..SharedGroups::NONE
            },
            Self::Exploded | Self::Section => SharedGroups {
                materials: true,
                output: true,
                ..SharedGroups::NONE
            },
            Self::ImgToCad | Self::ImgTo3d | Self::Video | Self::GenerateText => {
                SharedGroups::NONE
            }
        }
    }
}

/// Flags selecting the shared setting groups relevant to a [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedGroups {
    pub geometry: bool,
    pub camera: bool,
    pub lighting: bool,
    pub materials: bool,
    pub context: bool,
    pub output: bool,
}

impl SharedGroups {
    pub const ALL: SharedGroups = SharedGroups {
        geometry: true,
        camera: true,
        lighting: true,
        materials: true,
        context: true,
        output: true,
    };

    pub const NONE: SharedGroups = SharedGroups {
        geometry: false,
        camera: false,
        lighting: false,
        materials: false,
        context: false,
        output: false,
    };
}
