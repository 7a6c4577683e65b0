pub mod history;
pub mod mode;
pub(crate) mod patch;
pub mod settings;
pub mod video;
pub mod workflow;

pub use history::{HistoryEntry, HISTORY_CAPACITY};
pub use mode::{Mode, SharedGroups};
pub use settings::{
    CameraPatch, CameraSettings, ContextPatch, ContextSettings, GeometryPatch, GeometrySettings,
    LightingPatch, LightingSettings, MaterialPatch, MaterialSettings, OutputPatch, OutputSettings,
};
pub use video::{VideoCamera, VideoPatch, VideoState};
pub use workflow::{WorkflowPatch, WorkflowSettings};
