//! Cross-cutting setting groups shared by the render-style modes.
//!
//! Each group is an independent slice of [`crate::state::AppState`] with its
//! own `UPDATE_*` action. A group's `Default` is its neutral configuration:
//! the prompt generator emits nothing for a field left at that value.

use serde::{Deserialize, Serialize};

use super::patch::settings_group;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// How much architectural detail the generator should add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Low,
    #[default]
    Standard,
    High,
    Ultra,
}

impl DetailLevel {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Low => "simplified massing with minimal detail",
            Self::Standard => "standard architectural detail",
            Self::High => "high architectural detail",
            Self::Ultra => "ultra-fine architectural detail down to joints and fixings",
        }
    }
}

settings_group! {
    /// Geometry fidelity settings.
    pub struct GeometrySettings, patch GeometryPatch {
        /// Keep the massing and openings of the source image untouched.
        pub preserve_geometry: bool = false,
        /// Adherence to the source outlines, 0–100.
        pub adherence: u8 = 50,
        pub detail_level: DetailLevel = DetailLevel::Standard,
        /// Softening applied to hard edges, 0–100.
        pub edge_softness: u8 = 0,
    }
}

// ── Camera ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraView {
    /// Keep the viewpoint of the uploaded image.
    #[default]
    Original,
    EyeLevel,
    Aerial,
    BirdsEye,
    WormsEye,
    Interior,
}

impl CameraView {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Original => "original viewpoint",
            Self::EyeLevel => "eye-level perspective",
            Self::Aerial => "aerial perspective",
            Self::BirdsEye => "bird's-eye view",
            Self::WormsEye => "worm's-eye view",
            Self::Interior => "interior perspective",
        }
    }
}

settings_group! {
    /// Virtual camera settings.
    pub struct CameraSettings, patch CameraPatch {
        pub view: CameraView = CameraView::Original,
        /// Equivalent focal length in millimetres.
        pub focal_length: u16 = 35,
        /// Two-point perspective correction of converging verticals.
        pub vertical_correction: bool = false,
        pub depth_of_field: bool = false,
    }
}

// ── Lighting ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Original,
    Dawn,
    Morning,
    Noon,
    GoldenHour,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Original => "original lighting",
            Self::Dawn => "dawn light",
            Self::Morning => "soft morning light",
            Self::Noon => "high noon sun",
            Self::GoldenHour => "golden hour light",
            Self::Dusk => "dusk with blue-hour sky",
            Self::Night => "night scene",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    #[default]
    Original,
    Clear,
    PartlyCloudy,
    Overcast,
    Dramatic,
}

impl SkyCondition {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Original => "original sky",
            Self::Clear => "clear sky",
            Self::PartlyCloudy => "partly cloudy sky",
            Self::Overcast => "overcast sky",
            Self::Dramatic => "dramatic clouds",
        }
    }
}

settings_group! {
    /// Lighting and sky settings.
    pub struct LightingSettings, patch LightingPatch {
        pub time_of_day: TimeOfDay = TimeOfDay::Original,
        pub sky: SkyCondition = SkyCondition::Original,
        /// Sun intensity, 0–100.
        pub sun_intensity: u8 = 50,
        /// Switch on interior lighting visible through glazing.
        pub interior_lights: bool = false,
    }
}

// ── Materials ─────────────────────────────────────────────────────────────────

settings_group! {
    /// Material overrides. Empty strings leave the source materials alone.
    pub struct MaterialSettings, patch MaterialPatch {
        pub facade: String = String::new(),
        pub glazing: String = String::new(),
        pub roofing: String = String::new(),
        /// Weathering and patina, 0–100.
        pub weathering: u8 = 0,
        /// Surface reflectivity, 0–100.
        pub reflectivity: u8 = 50,
    }
}

// ── Context ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Original,
    Urban,
    Suburban,
    Rural,
    Coastal,
    Forest,
    Desert,
    Mountain,
}

impl Environment {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Original => "original surroundings",
            Self::Urban => "dense urban surroundings",
            Self::Suburban => "suburban neighbourhood",
            Self::Rural => "open rural landscape",
            Self::Coastal => "coastal setting",
            Self::Forest => "forest clearing",
            Self::Desert => "desert landscape",
            Self::Mountain => "mountain setting",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Original,
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Original => "original season",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter with snow cover",
        }
    }
}

settings_group! {
    /// Site context and entourage.
    pub struct ContextSettings, patch ContextPatch {
        pub environment: Environment = Environment::Original,
        pub season: Season = Season::Original,
        /// Amount of planting, 0–100.
        pub vegetation: u8 = 0,
        pub people: bool = false,
        pub vehicles: bool = false,
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Sd,
    #[default]
    Hd,
    #[serde(rename = "4k")]
    FourK,
    #[serde(rename = "8k")]
    EightK,
}

impl Resolution {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Sd => "SD",
            Self::Hd => "HD",
            Self::FourK => "4K",
            Self::EightK => "8K",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "3:2")]
    ThreeTwo,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Square => "1:1",
            Self::FourThree => "4:3",
            Self::ThreeTwo => "3:2",
            Self::Widescreen => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Tiff,
}

impl ImageFormat {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Webp => "WebP",
            Self::Tiff => "TIFF",
        }
    }
}

settings_group! {
    /// Output format settings.
    pub struct OutputSettings, patch OutputPatch {
        pub resolution: Resolution = Resolution::Hd,
        pub aspect_ratio: AspectRatio = AspectRatio::Original,
        pub format: ImageFormat = ImageFormat::Png,
        /// Number of variations per generation.
        pub variations: u8 = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overwrites_present_fields_only() {
        let base = LightingSettings::default();
        let next = base.merged(LightingPatch {
            time_of_day: Some(TimeOfDay::GoldenHour),
            ..Default::default()
        });
        assert_eq!(next.time_of_day, TimeOfDay::GoldenHour);
        assert_eq!(next.sky, base.sky);
        assert_eq!(next.sun_intensity, base.sun_intensity);
        assert_eq!(next.interior_lights, base.interior_lights);
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = MaterialPatch::default();
        assert!(patch.is_empty());
        let base = MaterialSettings {
            facade: "board-formed concrete".to_string(),
            ..Default::default()
        };
        assert_eq!(base.merged(patch), base);
    }

    #[test]
    fn patch_json_is_camel_case_and_sparse() {
        let patch: CameraPatch =
            serde_json::from_str(r#"{"focalLength": 24, "view": "aerial"}"#).expect("deserialize");
        assert_eq!(patch.focal_length, Some(24));
        assert_eq!(patch.view, Some(CameraView::Aerial));
        assert!(patch.depth_of_field.is_none());

        let value = serde_json::to_value(&patch).expect("serialize");
        assert!(value.get("verticalCorrection").is_none());
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let result = serde_json::from_str::<GeometryPatch>(r#"{"detail": "high"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn output_wire_names() {
        let value = serde_json::to_value(OutputSettings {
            resolution: Resolution::FourK,
            aspect_ratio: AspectRatio::Widescreen,
            ..Default::default()
        })
        .expect("serialize");
        assert_eq!(value["resolution"], "4k");
        assert_eq!(value["aspectRatio"], "16:9");
        assert_eq!(value["format"], "png");
    }
}
