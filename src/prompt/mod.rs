//! Prompt generation.
//!
//! [`generate_prompt`] projects the session state into the instruction text
//! handed to a generation back-end. It is a pure function of its input: the
//! same state always yields the same string.
//!
//! Clause order is fixed: style preset, the active mode's own settings, the
//! shared groups relevant to that mode (geometry, camera, lighting,
//! materials, context, output) and finally the user's free text. A field at
//! its neutral value contributes nothing, so a fully neutral state with no
//! free text produces an empty string.

pub mod watch;

use crate::models::settings::{
    AspectRatio, CameraView, DetailLevel, Environment, ImageFormat, Resolution, Season,
    SkyCondition, TimeOfDay,
};
use crate::models::video::{MotionSpeed, MotionType};
use crate::models::workflow::*;
use crate::models::{
    CameraSettings, ContextSettings, GeometrySettings, LightingSettings, MaterialSettings, Mode,
    OutputSettings, VideoState,
};
use crate::state::AppState;
use crate::styles::{self, DEFAULT_STYLE_ID};

const CLAUSE_SEPARATOR: &str = ". ";

/// Build the prompt for `state`'s active mode.
pub fn generate_prompt(state: &AppState) -> String {
    let mut clauses = Clauses::default();

    style_clause(&state.active_style_id, &mut clauses);
    mode_clauses(state.mode, &state.workflow, &mut clauses);

    let groups = state.mode.shared_groups();
    if groups.geometry {
        geometry_clauses(&state.geometry, &mut clauses);
    }
    if groups.camera {
        camera_clauses(&state.camera, &mut clauses);
    }
    if groups.lighting {
        lighting_clauses(&state.lighting, &mut clauses);
    }
    if groups.materials {
        material_clauses(&state.materials, &mut clauses);
    }
    if groups.context {
        context_clauses(&state.context, &mut clauses);
    }
    if groups.output {
        output_clauses(&state.output, &mut clauses);
    }

    let free_text = state.prompt.trim();
    if !free_text.is_empty() {
        clauses.push(free_text);
    }

    clauses.join()
}

/// Ordered clause accumulator.
#[derive(Default)]
struct Clauses(Vec<String>);

impl Clauses {
    fn push(&mut self, clause: impl Into<String>) {
        self.0.push(clause.into());
    }

    fn push_if(&mut self, cond: bool, clause: impl FnOnce() -> String) {
        if cond {
            self.0.push(clause());
        }
    }

    fn join(self) -> String {
        self.0.join(CLAUSE_SEPARATOR)
    }
}

fn style_clause(style_id: &str, out: &mut Clauses) {
    if style_id.is_empty() || style_id == DEFAULT_STYLE_ID {
        return;
    }
    match styles::find(style_id) {
        Some(preset) if !preset.descriptor.is_empty() => {
            out.push(format!("Style: {}", preset.descriptor))
        }
        Some(_) => {}
        None => out.push(format!("Style: {style_id}")),
    }
}

fn mode_clauses(mode: Mode, workflow: &WorkflowSettings, out: &mut Clauses) {
    match mode {
        Mode::Render3d => render3d_clauses(&workflow.render3d, out),
        Mode::RenderCad => render_cad_clauses(&workflow.render_cad, out),
        Mode::Masterplan => masterplan_clauses(&workflow.masterplan, out),
        Mode::VisualEdit => visual_edit_clauses(&workflow.visual_edit, out),
        Mode::Exploded => exploded_clauses(&workflow.exploded, out),
        Mode::Section => section_clauses(&workflow.section, out),
        Mode::RenderSketch => render_sketch_clauses(&workflow.render_sketch, out),
        Mode::Upscale => upscale_clauses(&workflow.upscale, out),
        Mode::ImgToCad => img_to_cad_clauses(&workflow.img_to_cad, out),
        Mode::ImgTo3d => img_to3d_clauses(&workflow.img_to3d, out),
        Mode::Video => video_clauses(&workflow.video, out),
        Mode::GenerateText => generate_text_clauses(&workflow.generate_text, out),
    }
}

// ── Per-mode clauses ──────────────────────────────────────────────────────────

fn render3d_clauses(s: &Render3dSettings, out: &mut Clauses) {
    let d = Render3dSettings::default();
    out.push_if(s.realism != d.realism, || format!("Photorealism {}%", s.realism));
    out.push_if(s.atmosphere != Atmosphere::Neutral, || {
        format!("{} atmosphere", capitalize(s.atmosphere.phrase()))
    });
    out.push_if(s.post_processing, || {
        "Cinematic post-processing with colour grading and bloom".to_string()
    });
}

fn render_cad_clauses(s: &RenderCadSettings, out: &mut Clauses) {
    let d = RenderCadSettings::default();
    out.push_if(s.drawing_type != DrawingType::Plan, || {
        format!("Interpret the drawing as {}", s.drawing_type.phrase())
    });
    if s.layers.is_empty() {
        out.push("The drawing has no layers");
    } else if layers_restyled(&s.layers, &d.layers) {
        let key: Vec<String> = s
            .layers
            .iter()
            .filter(|l| l.visible)
            .map(|l| format!("{} {}", l.name, l.color))
            .collect();
        out.push_if(!key.is_empty(), || format!("Layer key: {}", key.join(", ")));
    }
    let hidden = s.hidden_layers();
    out.push_if(!hidden.is_empty(), || {
        let noun = if hidden.len() == 1 { "layer" } else { "layers" };
        format!("Ignore the {} {noun}", hidden.join(", "))
    });
    out.push_if(s.fill_rooms, || {
        "Furnish and finish every room".to_string()
    });
    out.push_if(s.line_emphasis != d.line_emphasis, || {
        format!("Linework emphasis {}%", s.line_emphasis)
    });
}

/// Whether layers were added, removed, renamed or recoloured. Visibility is
/// reported separately.
fn layers_restyled(layers: &[CadLayer], defaults: &[CadLayer]) -> bool {
    layers.len() != defaults.len()
        || layers
            .iter()
            .zip(defaults)
            .any(|(l, d)| l.name != d.name || l.color != d.color)
}

fn masterplan_clauses(s: &MasterplanSettings, out: &mut Clauses) {
    out.push_if(s.output_type != MpOutputType::Illustrative, || {
        format!("{} masterplan", capitalize(s.output_type.phrase()))
    });
    out.push_if(s.view != MpView::TopDown, || format!("{} view", capitalize(s.view.phrase())));
    out.push_if(!s.zones.is_empty(), || {
        let zones: Vec<String> = s
            .zones
            .iter()
            .map(|z| format!("{} ({})", z.name, z.zone_use.phrase()))
            .collect();
        format!("Zones: {}", zones.join(", "))
    });
    out.push_if(s.show_labels, || "Label each zone".to_string());
    out.push_if(s.green_coverage > 0, || {
        format!("{}% green coverage", s.green_coverage)
    });
}

fn visual_edit_clauses(s: &VisualEditSettings, out: &mut Clauses) {
    let instruction = s.instruction.trim();
    if !instruction.is_empty() {
        out.push(format!(
            "{} within the selected area: {instruction}",
            s.edit_kind.phrase()
        ));
    } else if s.edit_kind != EditKind::Replace {
        out.push(format!("{} within the selected area", s.edit_kind.phrase()));
    }
    out.push_if(s.mask_feather > 0, || {
        format!("Feather mask edges by {}%", s.mask_feather)
    });
    out.push_if(!s.preserve_unmasked, || {
        "Allow changes outside the selection".to_string()
    });
}

fn exploded_clauses(s: &ExplodedSettings, out: &mut Clauses) {
    let d = ExplodedSettings::default();
    out.push_if(s.direction != ExplodeDirection::Vertical, || {
        format!("{} explosion", capitalize(s.direction.phrase()))
    });
    out.push_if(s.separation != d.separation, || {
        format!("Component separation {}%", s.separation)
    });
    out.push_if(!s.components.is_empty(), || {
        let names: Vec<&str> = s
            .ordered_components()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        format!("Components from base to top: {}", names.join(", "))
    });
    out.push_if(s.view_style != ExplodedStyle::Technical, || {
        format!("{} presentation", capitalize(s.view_style.phrase()))
    });
    out.push_if(s.show_labels, || "Label each component".to_string());
}

fn section_clauses(s: &SectionSettings, out: &mut Clauses) {
    let d = SectionSettings::default();
    out.push_if(s.cut_plane == SectionPlane::Horizontal, || {
        "Horizontal section cut (plan cut)".to_string()
    });
    out.push_if(s.cut_position != d.cut_position, || {
        format!("Cut at {}% of the building depth", s.cut_position)
    });
    out.push_if(s.poche != PocheStyle::Solid, || {
        format!("{} poché", capitalize(s.poche.phrase()))
    });
    out.push_if(!s.show_interior, || "Hide interior furnishing".to_string());
    out.push_if(s.annotations, || "Annotate the spaces".to_string());
}

fn render_sketch_clauses(s: &RenderSketchSettings, out: &mut Clauses) {
    let d = RenderSketchSettings::default();
    out.push_if(s.medium != SketchMedium::Pencil, || {
        format!("Source is a {} sketch", s.medium.phrase())
    });
    out.push_if(s.sketch_fidelity != d.sketch_fidelity, || {
        format!("Sketch fidelity {}%", s.sketch_fidelity)
    });
    out.push_if(s.preserve_linework, || {
        "Keep the sketch linework visible".to_string()
    });
    out.push_if(!s.colorize, || "Keep the result monochrome".to_string());
}

fn upscale_clauses(s: &UpscaleSettings, out: &mut Clauses) {
    let d = UpscaleSettings::default();
    out.push_if(s.factor != UpscaleFactor::X2, || {
        format!("Upscale {}x", s.factor.multiplier())
    });
    out.push_if(s.sharpness != d.sharpness, || format!("Sharpness {}%", s.sharpness));
    out.push_if(s.denoise > 0, || format!("Noise reduction {}%", s.denoise));
    match s.batch.len() {
        0 => {}
        1 => out.push("Apply to a batch of 1 image"),
        n => out.push(format!("Apply to a batch of {n} images")),
    }
}

fn img_to_cad_clauses(s: &ImgToCadSettings, out: &mut Clauses) {
    let d = ImgToCadSettings::default();
    out.push_if(s.output_format != CadFormat::Dxf, || {
        format!("Export as {}", s.output_format.phrase())
    });
    out.push_if(s.drawing_type != DrawingType::Plan, || {
        format!("Trace the image as {}", s.drawing_type.phrase())
    });
    out.push_if(s.line_detection != d.line_detection, || {
        format!("Line detection sensitivity {}%", s.line_detection)
    });
    out.push_if(s.include_dimensions, || "Include dimensions".to_string());
    out.push_if(!s.separate_layers, || "Keep all linework on one layer".to_string());
}

fn img_to3d_clauses(s: &ImgTo3dSettings, out: &mut Clauses) {
    out.push_if(s.mesh_resolution != MeshResolution::Medium, || {
        format!("{} resolution mesh", capitalize(s.mesh_resolution.phrase()))
    });
    out.push_if(s.output_format != ModelFormat::Glb, || {
        format!("Export as {}", s.output_format.phrase())
    });
    out.push_if(!s.textured, || "Untextured geometry only".to_string());
    out.push_if(s.symmetry, || "Assume bilateral symmetry".to_string());
}

// `unlocked` gates access to the mode and never reaches the prompt.
fn video_clauses(s: &VideoState, out: &mut Clauses) {
    let d = VideoState::default();
    let camera = &s.camera;
    let moved = camera.motion != MotionType::Static
        || camera.direction != d.camera.direction
        || camera.speed != MotionSpeed::Normal;
    if moved {
        let mut clause = capitalize(camera.motion.phrase());
        if camera.direction != d.camera.direction {
            clause.push_str(&format!(" heading {}°", camera.direction));
        }
        if camera.speed != MotionSpeed::Normal {
            clause.push_str(&format!(" at {} speed", camera.speed.phrase()));
        }
        out.push(clause);
    }
    out.push_if(camera.smoothness != d.camera.smoothness, || {
        format!("Motion smoothing {}%", camera.smoothness)
    });
    out.push_if(!s.keyframes.is_empty(), || {
        format!(
            "Interpolate {} keyframes over {:.1} s",
            s.keyframes.len(),
            s.total_keyframe_duration_ms() as f64 / 1000.0
        )
    });
    out.push_if(s.duration_seconds != d.duration_seconds, || {
        format!("{}-second clip", s.duration_seconds)
    });
}

fn generate_text_clauses(s: &GenerateTextSettings, out: &mut Clauses) {
    out.push_if(s.task != TextTask::Description, || {
        format!("Write {}", s.task.phrase())
    });
    out.push_if(s.tone != TextTone::Professional, || {
        format!("{} tone", capitalize(s.tone.phrase()))
    });
    out.push_if(s.word_limit > 0, || format!("At most {} words", s.word_limit));
    let language = s.language.trim();
    out.push_if(!language.is_empty(), || format!("Write in {language}"));
}

// ── Shared groups ─────────────────────────────────────────────────────────────

fn geometry_clauses(g: &GeometrySettings, out: &mut Clauses) {
    let d = GeometrySettings::default();
    out.push_if(g.preserve_geometry, || {
        "Strictly preserve the existing geometry".to_string()
    });
    out.push_if(g.adherence != d.adherence, || {
        format!("Geometry adherence {}%", g.adherence)
    });
    out.push_if(g.detail_level != DetailLevel::Standard, || {
        capitalize(g.detail_level.phrase())
    });
    out.push_if(g.edge_softness > 0, || format!("Edge softening {}%", g.edge_softness));
}

fn camera_clauses(c: &CameraSettings, out: &mut Clauses) {
    let d = CameraSettings::default();
    out.push_if(c.view != CameraView::Original, || capitalize(c.view.phrase()));
    out.push_if(c.focal_length != d.focal_length, || {
        format!("{}mm lens", c.focal_length)
    });
    out.push_if(c.vertical_correction, || {
        "Two-point perspective with corrected verticals".to_string()
    });
    out.push_if(c.depth_of_field, || "Shallow depth of field".to_string());
}

fn lighting_clauses(l: &LightingSettings, out: &mut Clauses) {
    let d = LightingSettings::default();
    out.push_if(l.time_of_day != TimeOfDay::Original, || {
        capitalize(l.time_of_day.phrase())
    });
    out.push_if(l.sky != SkyCondition::Original, || capitalize(l.sky.phrase()));
    out.push_if(l.sun_intensity != d.sun_intensity, || {
        format!("Sun intensity {}%", l.sun_intensity)
    });
    out.push_if(l.interior_lights, || "Interior lights switched on".to_string());
}

fn material_clauses(m: &MaterialSettings, out: &mut Clauses) {
    let d = MaterialSettings::default();
    for (label, value) in [
        ("Facade", &m.facade),
        ("Glazing", &m.glazing),
        ("Roofing", &m.roofing),
    ] {
        let value = value.trim();
        out.push_if(!value.is_empty(), || format!("{label}: {value}"));
    }
    out.push_if(m.weathering > 0, || format!("Weathering {}%", m.weathering));
    out.push_if(m.reflectivity != d.reflectivity, || {
        format!("Surface reflectivity {}%", m.reflectivity)
    });
}

fn context_clauses(c: &ContextSettings, out: &mut Clauses) {
    out.push_if(c.environment != Environment::Original, || {
        format!("Set in a {}", c.environment.phrase())
    });
    out.push_if(c.season != Season::Original, || {
        capitalize(c.season.phrase())
    });
    out.push_if(c.vegetation > 0, || format!("Vegetation density {}%", c.vegetation));
    match (c.people, c.vehicles) {
        (true, true) => out.push("Add people and vehicles"),
        (true, false) => out.push("Add people"),
        (false, true) => out.push("Add vehicles"),
        (false, false) => {}
    }
}

fn output_clauses(o: &OutputSettings, out: &mut Clauses) {
    let d = OutputSettings::default();
    out.push_if(o.resolution != Resolution::Hd, || {
        format!("{} resolution", o.resolution.phrase())
    });
    out.push_if(o.aspect_ratio != AspectRatio::Original, || {
        format!("{} aspect ratio", o.aspect_ratio.phrase())
    });
    out.push_if(o.format != ImageFormat::Png, || {
        format!("{} output", o.format.phrase())
    });
    out.push_if(o.variations != d.variations, || {
        format!("{} variations", o.variations)
    });
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
