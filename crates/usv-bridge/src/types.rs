use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use usv_mission_core::Mission;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionUploadRequest {
    pub mission: Mission,
    /// Ask the vehicle to switch to waypoint 0 once the upload is accepted.
    #[serde(default)]
    pub set_as_current: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionUploadResult {
    pub success: bool,
    pub accepted_waypoint_count: u16,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl MissionUploadResult {
    pub fn accepted(count: u16) -> Self {
        MissionUploadResult {
            success: true,
            accepted_waypoint_count: count,
            error_code: None,
            error_message: None,
            warnings: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        MissionUploadResult {
            success: false,
            accepted_waypoint_count: 0,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
            warnings: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// A full fetch when both bounds are `None`, otherwise the inclusive
/// `start_seq..=end_seq` slice of the onboard mission.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionFetchRequest {
    pub start_seq: Option<u16>,
    pub end_seq: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionFetchResponse {
    pub mission: Mission,
    /// Vehicle-authoritative, distinct from any locally held index.
    pub current_waypoint_index: u16,
    pub timestamp: DateTime<Utc>,
}

/// Vehicle-authoritative mission execution state. `eta_to_waypoint` is the
/// only derived field; the bridge computes it from distance and current
/// speed before delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionProgress {
    pub current_waypoint_seq: u16,
    pub total_waypoints: u16,
    /// Meters.
    pub distance_to_waypoint: Option<f64>,
    /// Seconds.
    pub eta_to_waypoint: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl MissionProgress {
    /// ETA a bridge reports alongside progress. The vehicle sends distance
    /// only; the bridge derives ETA from it and the current groundspeed.
    pub fn eta_from(distance_m: f64, groundspeed_mps: f64) -> Option<f64> {
        (groundspeed_mps > 0.0).then(|| distance_m / groundspeed_mps)
    }
}

/// All values pre-scaled to human units: degrees, meters, meters/second.
/// Fixed-point wire scaling is handled in [`crate::wire`] before any of
/// these fields are populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehiclePosition {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub heading: f64,
    pub groundspeed: f64,
    pub vertical_speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    #[default]
    Unknown,
    Boot,
    Calibrating,
    Standby,
    Active,
    Critical,
    Emergency,
    Poweroff,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleStatus {
    pub armed: bool,
    pub mode: String,
    pub system_status: SystemStatus,
    pub failsafe: bool,
    /// Volts.
    pub battery_voltage: Option<f64>,
    pub battery_percent: Option<f64>,
    /// Amps.
    pub battery_current: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    Udp,
    Tcp,
    Serial,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub connection_type: Option<ConnectionType>,
    pub last_heartbeat: Option<DateTime<Utc>>,
    /// Seconds since the last heartbeat.
    pub heartbeat_age: Option<f64>,
}
