use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default acceptance radius for a surface vehicle, in meters.
pub const DEFAULT_ACCEPTANCE_RADIUS_M: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NavCommand {
    #[default]
    Waypoint,
    LoiterUnlimited,
    LoiterTurns,
    LoiterTime,
    ReturnToLaunch,
}

impl NavCommand {
    /// MAV_CMD value carried on the wire.
    pub fn wire_value(self) -> u16 {
        match self {
            NavCommand::Waypoint => 16,
            NavCommand::LoiterUnlimited => 17,
            NavCommand::LoiterTurns => 18,
            NavCommand::LoiterTime => 19,
            NavCommand::ReturnToLaunch => 20,
        }
    }

    pub fn from_wire(value: u16) -> Option<Self> {
        match value {
            16 => Some(NavCommand::Waypoint),
            17 => Some(NavCommand::LoiterUnlimited),
            18 => Some(NavCommand::LoiterTurns),
            19 => Some(NavCommand::LoiterTime),
            20 => Some(NavCommand::ReturnToLaunch),
            _ => None,
        }
    }
}

/// Presentation-time labels for the four generic param slots.
///
/// The slots themselves stay untyped `f32`; their interpretation is selected
/// by the command tag only when rendering, never baked into the stored shape.
pub fn param_labels(command: NavCommand) -> [&'static str; 4] {
    match command {
        NavCommand::Waypoint => [
            "Hold time (s)",
            "Acceptance radius (m)",
            "Pass radius (m)",
            "Yaw (deg)",
        ],
        NavCommand::LoiterUnlimited => ["", "", "Radius (m)", "Yaw (deg)"],
        NavCommand::LoiterTurns => [
            "Turns",
            "Heading required",
            "Radius (m)",
            "Crosstrack exit (deg)",
        ],
        NavCommand::LoiterTime => [
            "Loiter time (s)",
            "Heading required",
            "Radius (m)",
            "Crosstrack exit (deg)",
        ],
        NavCommand::ReturnToLaunch => ["", "", "", ""],
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissionFrame {
    Mission,
    GlobalInt,
    GlobalRelativeAltInt,
    GlobalTerrainAltInt,
    LocalNed,
    Other,
}

impl MissionFrame {
    pub fn is_global_position(self) -> bool {
        matches!(
            self,
            MissionFrame::GlobalInt
                | MissionFrame::GlobalRelativeAltInt
                | MissionFrame::GlobalTerrainAltInt
        )
    }
}

/// One navigation command in a mission.
///
/// `x` is latitude in degrees and `y` is longitude in degrees. The inverted
/// axis naming matches the MAVLink MISSION_ITEM field layout and must stay
/// as-is for wire compatibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub seq: u16,
    pub frame: MissionFrame,
    pub command: NavCommand,
    pub current: bool,
    pub autocontinue: bool,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    pub x: f64,
    pub y: f64,
    pub z: f32,
}

impl Waypoint {
    /// Build a waypoint with surface-vehicle defaults.
    ///
    /// The caller supplies `seq`, latitude and longitude; inputs are taken
    /// as-is. Coordinate-range checking is a UI concern, see
    /// [`crate::validation::validate_mission`].
    pub fn new(seq: u16, lat: f64, lon: f64) -> Self {
        Waypoint {
            seq,
            frame: MissionFrame::GlobalRelativeAltInt,
            command: NavCommand::Waypoint,
            current: false,
            autocontinue: true,
            param1: 0.0,
            param2: DEFAULT_ACCEPTANCE_RADIUS_M,
            param3: 0.0,
            param4: 0.0,
            x: lat,
            y: lon,
            z: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An ordered waypoint collection plus metadata.
///
/// Every operation returns a new `Mission` value; nothing mutates in place.
/// `current_waypoint_index` is advisory display state owned by the frontend.
/// It is never synchronized with the vehicle's actual execution state, which
/// is reported separately through mission-progress telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mission {
    pub waypoints: Vec<Waypoint>,
    pub current_waypoint_index: u16,
    pub metadata: MissionMetadata,
}

impl Mission {
    pub fn empty() -> Self {
        Self::named("New Mission")
    }

    pub fn named(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Mission {
            waypoints: Vec::new(),
            current_waypoint_index: 0,
            metadata: MissionMetadata {
                name: name.into(),
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Return a new mission with one more waypoint appended at the next
    /// contiguous `seq`. `updated_at` is refreshed; all other metadata is
    /// carried over.
    pub fn with_waypoint(&self, lat: f64, lon: f64) -> Mission {
        let mut waypoints = self.waypoints.clone();
        waypoints.push(Waypoint::new(waypoints.len() as u16, lat, lon));
        Mission {
            waypoints,
            current_waypoint_index: self.current_waypoint_index,
            metadata: MissionMetadata {
                updated_at: Utc::now(),
                ..self.metadata.clone()
            },
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
