//! Per-mode workflow settings.
//!
//! [`WorkflowSettings`] holds one record per [`Mode`](super::Mode) plus the
//! shared document sub-workflows. Records of inactive modes keep their values
//! when the user switches mode, so every workflow can be configured in
//! parallel.
//!
//! `UPDATE_WORKFLOW` carries a [`WorkflowPatch`]: every record key present in
//! the patch is shallow-merged field by field; vectors and nested records
//! inside a record patch replace the stored value whole.

use serde::{Deserialize, Serialize};

use super::patch::settings_group;
use super::video::{VideoPatch, VideoState};

// ── render-3d ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    #[default]
    Neutral,
    Warm,
    Cool,
    Moody,
    Vibrant,
    Serene,
}

impl Atmosphere {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Moody => "moody",
            Self::Vibrant => "vibrant",
            Self::Serene => "serene",
        }
    }
}

settings_group! {
    /// Photorealistic 3D render of a model screenshot or massing image.
    pub struct Render3dSettings, patch Render3dPatch {
        /// Photorealism strength, 0–100.
        pub realism: u8 = 75,
        pub atmosphere: Atmosphere = Atmosphere::Neutral,
        /// Cinematic grading, bloom and lens effects.
        pub post_processing: bool = false,
    }
}

// ── render-cad / img-to-cad ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingType {
    #[default]
    Plan,
    Elevation,
    Section,
    Axonometric,
}

impl DrawingType {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Plan => "a floor plan",
            Self::Elevation => "an elevation",
            Self::Section => "a section",
            Self::Axonometric => "an axonometric drawing",
        }
    }
}

/// A layer of the uploaded CAD drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CadLayer {
    pub name: String,
    pub visible: bool,
    /// CSS colour used in the layer list swatch.
    pub color: String,
}

impl CadLayer {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            color: color.to_string(),
        }
    }
}

fn default_cad_layers() -> Vec<CadLayer> {
    vec![
        CadLayer::new("Walls", "#1f2937"),
        CadLayer::new("Windows", "#38bdf8"),
        CadLayer::new("Doors", "#f59e0b"),
        CadLayer::new("Furniture", "#10b981"),
        CadLayer::new("Annotations", "#ef4444"),
    ]
}

settings_group! {
    /// Render of a 2D CAD drawing.
    pub struct RenderCadSettings, patch RenderCadPatch {
        pub drawing_type: DrawingType = DrawingType::Plan,
        pub layers: Vec<CadLayer> = default_cad_layers(),
        /// Furnish and finish rooms instead of rendering bare floors.
        pub fill_rooms: bool = false,
        /// Linework emphasis, 0–100.
        pub line_emphasis: u8 = 50,
    }
}

impl RenderCadSettings {
    /// Names of the layers currently hidden, in layer order.
    pub fn hidden_layers(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|l| !l.visible)
            .map(|l| l.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadFormat {
    #[default]
    Dxf,
    Dwg,
    Svg,
    Pdf,
}

impl CadFormat {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Dxf => "DXF",
            Self::Dwg => "DWG",
            Self::Svg => "SVG",
            Self::Pdf => "PDF",
        }
    }
}

settings_group! {
    /// Vectorize an image into a CAD drawing.
    pub struct ImgToCadSettings, patch ImgToCadPatch {
        pub output_format: CadFormat = CadFormat::Dxf,
        pub drawing_type: DrawingType = DrawingType::Plan,
        /// Line detection sensitivity, 0–100.
        pub line_detection: u8 = 50,
        pub include_dimensions: bool = false,
        /// Split walls, openings and furniture onto separate layers.
        pub separate_layers: bool = true,
    }
}

// ── masterplan ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MpOutputType {
    #[default]
    Illustrative,
    Photorealistic,
    Diagrammatic,
    Watercolor,
}

impl MpOutputType {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Illustrative => "illustrative",
            Self::Photorealistic => "photorealistic",
            Self::Diagrammatic => "diagrammatic",
            Self::Watercolor => "watercolour",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MpView {
    #[default]
    TopDown,
    Axonometric,
    Perspective,
}

impl MpView {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::Axonometric => "axonometric",
            Self::Perspective => "aerial perspective",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneUse {
    Residential,
    Commercial,
    MixedUse,
    Civic,
    GreenSpace,
    Water,
    Infrastructure,
}

impl ZoneUse {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::MixedUse => "mixed use",
            Self::Civic => "civic",
            Self::GreenSpace => "green space",
            Self::Water => "water",
            Self::Infrastructure => "infrastructure",
        }
    }
}

/// A land-use zone painted on the masterplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MasterplanZone {
    pub name: String,
    pub zone_use: ZoneUse,
    pub color: String,
}

settings_group! {
    /// Urban masterplan rendering.
    pub struct MasterplanSettings, patch MasterplanPatch {
        pub output_type: MpOutputType = MpOutputType::Illustrative,
        pub view: MpView = MpView::TopDown,
        pub zones: Vec<MasterplanZone> = Vec::new(),
        pub show_labels: bool = false,
        /// Target share of planted area, 0–100.
        pub green_coverage: u8 = 0,
    }
}

// ── visual-edit ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Add,
    Remove,
    #[default]
    Replace,
    Restyle,
}

impl EditKind {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Remove => "Remove",
            Self::Replace => "Replace",
            Self::Restyle => "Restyle",
        }
    }
}

settings_group! {
    /// Masked, instruction-driven edit of the uploaded image.
    pub struct VisualEditSettings, patch VisualEditPatch {
        pub edit_kind: EditKind = EditKind::Replace,
        pub instruction: String = String::new(),
        /// Mask edge feathering, 0–100.
        pub mask_feather: u8 = 0,
        pub preserve_unmasked: bool = true,
    }
}

// ── exploded ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplodeDirection {
    #[default]
    Vertical,
    Horizontal,
    Radial,
}

impl ExplodeDirection {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Radial => "radial",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplodedStyle {
    #[default]
    Technical,
    Diagrammatic,
    Realistic,
}

impl ExplodedStyle {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Technical => "technical line",
            Self::Diagrammatic => "colour-coded diagrammatic",
            Self::Realistic => "realistic material",
        }
    }
}

/// A building component shown in the exploded view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExplodedComponent {
    pub name: String,
    /// Stacking position; lower values sit closer to the base.
    pub order: u32,
}

settings_group! {
    /// Exploded axonometric of the building's components.
    pub struct ExplodedSettings, patch ExplodedPatch {
        pub direction: ExplodeDirection = ExplodeDirection::Vertical,
        /// Gap between components, 0–100.
        pub separation: u8 = 50,
        pub components: Vec<ExplodedComponent> = Vec::new(),
        pub view_style: ExplodedStyle = ExplodedStyle::Technical,
        pub show_labels: bool = false,
    }
}

impl ExplodedSettings {
    /// Components sorted by `order`; ties keep their list position.
    pub fn ordered_components(&self) -> Vec<&ExplodedComponent> {
        let mut components: Vec<&ExplodedComponent> = self.components.iter().collect();
        components.sort_by_key(|c| c.order);
        components
    }
}

// ── section ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPlane {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PocheStyle {
    #[default]
    Solid,
    Hatched,
    Colored,
}

impl PocheStyle {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Hatched => "hatched",
            Self::Colored => "coloured",
        }
    }
}

settings_group! {
    /// Perspective section cut through the building.
    pub struct SectionSettings, patch SectionPatch {
        pub cut_plane: SectionPlane = SectionPlane::Vertical,
        /// Cut position through the building depth, 0–100.
        pub cut_position: u8 = 50,
        pub poche: PocheStyle = PocheStyle::Solid,
        pub show_interior: bool = true,
        pub annotations: bool = false,
    }
}

// ── render-sketch ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SketchMedium {
    #[default]
    Pencil,
    Ink,
    Marker,
    Watercolor,
    Digital,
}

impl SketchMedium {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Ink => "ink",
            Self::Marker => "marker",
            Self::Watercolor => "watercolour",
            Self::Digital => "digital",
        }
    }
}

settings_group! {
    /// Turn a hand sketch into a render.
    pub struct RenderSketchSettings, patch RenderSketchPatch {
        pub medium: SketchMedium = SketchMedium::Pencil,
        /// Faithfulness to the sketch lines, 0–100.
        pub sketch_fidelity: u8 = 50,
        /// Keep the sketch linework visible over the render.
        pub preserve_linework: bool = false,
        pub colorize: bool = true,
    }
}

// ── upscale ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpscaleFactor {
    #[default]
    #[serde(rename = "2x")]
    X2,
    #[serde(rename = "4x")]
    X4,
    #[serde(rename = "8x")]
    X8,
}

impl UpscaleFactor {
    pub fn multiplier(self) -> u8 {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpscaleStatus {
    Queued,
    Processing,
    Done,
}

/// One image in the upscale batch queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpscaleItem {
    pub id: String,
    pub name: String,
    pub status: UpscaleStatus,
}

settings_group! {
    /// Super-resolution of one image or a batch.
    pub struct UpscaleSettings, patch UpscalePatch {
        pub factor: UpscaleFactor = UpscaleFactor::X2,
        /// Sharpening, 0–100.
        pub sharpness: u8 = 50,
        /// Noise reduction, 0–100.
        pub denoise: u8 = 0,
        pub batch: Vec<UpscaleItem> = Vec::new(),
    }
}

impl UpscaleSettings {
    /// First queued item in batch order.
    pub fn next_queued(&self) -> Option<&UpscaleItem> {
        self.batch
            .iter()
            .find(|item| item.status == UpscaleStatus::Queued)
    }

    /// Items not yet done.
    pub fn pending_count(&self) -> usize {
        self.batch
            .iter()
            .filter(|item| item.status != UpscaleStatus::Done)
            .count()
    }

    /// Copy of the batch with item `id` set to `status`, ready to dispatch in
    /// an [`UpscalePatch`]. Unknown ids leave the batch unchanged.
    pub fn batch_with_status(&self, id: &str, status: UpscaleStatus) -> Vec<UpscaleItem> {
        self.batch
            .iter()
            .map(|item| {
                if item.id == id {
                    UpscaleItem {
                        status,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect()
    }
}

// ── img-to-3d ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshResolution {
    Low,
    #[default]
    Medium,
    High,
}

impl MeshResolution {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    #[default]
    Glb,
    Obj,
    Fbx,
    Usdz,
}

impl ModelFormat {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Glb => "GLB",
            Self::Obj => "OBJ",
            Self::Fbx => "FBX",
            Self::Usdz => "USDZ",
        }
    }
}

settings_group! {
    /// Reconstruct a 3D model from an image.
    pub struct ImgTo3dSettings, patch ImgTo3dPatch {
        pub mesh_resolution: MeshResolution = MeshResolution::Medium,
        pub output_format: ModelFormat = ModelFormat::Glb,
        pub textured: bool = true,
        /// Assume bilateral symmetry for occluded sides.
        pub symmetry: bool = false,
    }
}

// ── generate-text and document tools ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTask {
    #[default]
    Description,
    DesignStatement,
    MarketingCopy,
    Specification,
}

impl TextTask {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Description => "a description of the image",
            Self::DesignStatement => "a design statement",
            Self::MarketingCopy => "marketing copy",
            Self::Specification => "an outline specification",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    #[default]
    Professional,
    Technical,
    Poetic,
    Casual,
}

impl TextTone {
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Technical => "technical",
            Self::Poetic => "poetic",
            Self::Casual => "casual",
        }
    }
}

settings_group! {
    /// Text generated from the uploaded image.
    pub struct GenerateTextSettings, patch GenerateTextPatch {
        pub task: TextTask = TextTask::Description,
        pub tone: TextTone = TextTone::Professional,
        /// Word limit; 0 means unlimited.
        pub word_limit: u16 = 0,
        /// Output language; empty keeps the default.
        pub language: String = String::new(),
    }
}

settings_group! {
    /// Document translation tool state.
    pub struct DocumentTranslationSettings, patch DocumentTranslationPatch {
        /// Empty means auto-detect.
        pub source_language: String = String::new(),
        pub target_language: String = String::new(),
        pub preserve_formatting: bool = true,
        /// Name of the document currently loaded in the tool.
        pub file_name: String = String::new(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionLevel {
    Low,
    #[default]
    Balanced,
    Strong,
}

settings_group! {
    /// PDF compression tool state.
    pub struct PdfCompressionSettings, patch PdfCompressionPatch {
        pub level: CompressionLevel = CompressionLevel::Balanced,
        pub downsample_images: bool = true,
        pub image_dpi: u16 = 150,
        pub grayscale: bool = false,
    }
}

// ── WorkflowSettings ──────────────────────────────────────────────────────────

/// All per-mode parameter groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkflowSettings {
    pub render3d: Render3dSettings,
    pub render_cad: RenderCadSettings,
    pub masterplan: MasterplanSettings,
    pub visual_edit: VisualEditSettings,
    pub exploded: ExplodedSettings,
    pub section: SectionSettings,
    pub render_sketch: RenderSketchSettings,
    pub upscale: UpscaleSettings,
    pub img_to_cad: ImgToCadSettings,
    pub img_to3d: ImgTo3dSettings,
    pub video: VideoState,
    pub generate_text: GenerateTextSettings,
    pub document_translation: DocumentTranslationSettings,
    pub pdf_compression: PdfCompressionSettings,
}

/// Payload of `UPDATE_WORKFLOW`.
///
/// ```json
/// { "masterplan": { "outputType": "photorealistic" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkflowPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render3d: Option<Render3dPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_cad: Option<RenderCadPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masterplan: Option<MasterplanPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_edit: Option<VisualEditPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploded: Option<ExplodedPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_sketch: Option<RenderSketchPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upscale: Option<UpscalePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_to_cad: Option<ImgToCadPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_to3d: Option<ImgTo3dPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_text: Option<GenerateTextPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_translation: Option<DocumentTranslationPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_compression: Option<PdfCompressionPatch>,
}

impl WorkflowSettings {
    /// Shallow-merge `patch` into `self`.
    pub fn apply(&mut self, patch: WorkflowPatch) {
        let WorkflowPatch {
            render3d,
            render_cad,
            masterplan,
            visual_edit,
            exploded,
            section,
            render_sketch,
            upscale,
            img_to_cad,
            img_to3d,
            video,
            generate_text,
            document_translation,
            pdf_compression,
        } = patch;

        if let Some(p) = render3d {
            self.render3d.apply(p);
        }
        if let Some(p) = render_cad {
            self.render_cad.apply(p);
        }
        if let Some(p) = masterplan {
            self.masterplan.apply(p);
        }
        if let Some(p) = visual_edit {
            self.visual_edit.apply(p);
        }
        if let Some(p) = exploded {
            self.exploded.apply(p);
        }
        if let Some(p) = section {
            self.section.apply(p);
        }
        if let Some(p) = render_sketch {
            self.render_sketch.apply(p);
        }
        if let Some(p) = upscale {
            self.upscale.apply(p);
        }
        if let Some(p) = img_to_cad {
            self.img_to_cad.apply(p);
        }
        if let Some(p) = img_to3d {
            self.img_to3d.apply(p);
        }
        if let Some(p) = video {
            self.video.apply(p);
        }
        if let Some(p) = generate_text {
            self.generate_text.apply(p);
        }
        if let Some(p) = document_translation {
            self.document_translation.apply(p);
        }
        if let Some(p) = pdf_compression {
            self.pdf_compression.apply(p);
        }
    }

    /// Return a copy of `self` with `patch` applied.
    pub fn merged(&self, patch: WorkflowPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masterplan_patch_leaves_everything_else_alone() {
        let base = WorkflowSettings::default();
        let next = base.merged(WorkflowPatch {
            masterplan: Some(MasterplanPatch {
                output_type: Some(MpOutputType::Photorealistic),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(next.masterplan.output_type, MpOutputType::Photorealistic);
        assert_eq!(
            WorkflowSettings {
                masterplan: MasterplanSettings {
                    output_type: MpOutputType::Illustrative,
                    ..next.masterplan.clone()
                },
                ..next.clone()
            },
            base
        );
    }

    #[test]
    fn vectors_in_patch_replace_whole() {
        let base = WorkflowSettings::default();
        assert_eq!(base.render_cad.layers.len(), 5);

        let next = base.merged(WorkflowPatch {
            render_cad: Some(RenderCadPatch {
                layers: Some(vec![CadLayer {
                    name: "Site".to_string(),
                    visible: false,
                    color: "#000000".to_string(),
                }]),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(next.render_cad.layers.len(), 1);
        assert_eq!(next.render_cad.hidden_layers(), vec!["Site"]);
    }

    #[test]
    fn patch_from_json() {
        let patch: WorkflowPatch =
            serde_json::from_str(r#"{"masterplan": {"outputType": "photorealistic"}}"#)
                .expect("deserialize");
        assert_eq!(
            patch.masterplan.and_then(|m| m.output_type),
            Some(MpOutputType::Photorealistic)
        );
        assert!(patch.video.is_none());
    }

    #[test]
    fn workflow_json_keys_are_camel_case() {
        let value = serde_json::to_value(WorkflowSettings::default()).expect("serialize");
        assert!(value.get("renderCad").is_some());
        assert!(value.get("imgTo3d").is_some());
        assert!(value.get("pdfCompression").is_some());
        assert_eq!(value["masterplan"]["outputType"], "illustrative");
        assert_eq!(value["upscale"]["factor"], "2x");
    }

    #[test]
    fn exploded_components_sort_by_order() {
        let settings = ExplodedSettings {
            components: vec![
                ExplodedComponent {
                    name: "Roof".to_string(),
                    order: 3,
                },
                ExplodedComponent {
                    name: "Foundation".to_string(),
                    order: 0,
                },
                ExplodedComponent {
                    name: "Structure".to_string(),
                    order: 1,
                },
            ],
            ..Default::default()
        };
        let names: Vec<&str> = settings
            .ordered_components()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Foundation", "Structure", "Roof"]);
    }

    #[test]
    fn upscale_queue_helpers() {
        let settings = UpscaleSettings {
            batch: vec![
                UpscaleItem {
                    id: "a".to_string(),
                    name: "front.png".to_string(),
                    status: UpscaleStatus::Done,
                },
                UpscaleItem {
                    id: "b".to_string(),
                    name: "rear.png".to_string(),
                    status: UpscaleStatus::Queued,
                },
                UpscaleItem {
                    id: "c".to_string(),
                    name: "side.png".to_string(),
                    status: UpscaleStatus::Queued,
                },
            ],
            ..Default::default()
        };
        assert_eq!(settings.next_queued().map(|i| i.id.as_str()), Some("b"));
        assert_eq!(settings.pending_count(), 2);

        let batch = settings.batch_with_status("b", UpscaleStatus::Processing);
        assert_eq!(batch[1].status, UpscaleStatus::Processing);
        assert_eq!(batch[2].status, UpscaleStatus::Queued);
        assert_eq!(settings.batch_with_status("zzz", UpscaleStatus::Done), settings.batch);
    }
}
