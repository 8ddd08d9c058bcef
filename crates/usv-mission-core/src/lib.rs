pub mod types;
pub mod validation;
pub mod wire;

pub use types::{
    param_labels, Mission, MissionFrame, MissionMetadata, NavCommand, Waypoint,
    DEFAULT_ACCEPTANCE_RADIUS_M,
};
pub use validation::{
    missions_equivalent, normalize_for_compare, validate_mission, CompareTolerance, IssueSeverity,
    MissionIssue,
};
pub use wire::{items_for_wire_upload, mission_from_wire_download};
