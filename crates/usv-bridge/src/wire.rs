//! Wire-format scaling and MISSION_ITEM_INT mapping.
//!
//! Unit conversion between MAVLink's fixed-point wire encodings and the
//! human-unit types in this crate happens here and nowhere else; neither
//! the mission model nor UI code may scale values.

use mavlink::common::{self, MavFrame, MavState};
use num_traits::FromPrimitive;
use usv_mission_core::{MissionFrame, NavCommand, Waypoint};

use crate::error::BridgeError;
use crate::types::SystemStatus;

/// Degrees to the 1e7 fixed-point encoding used for lat/lon.
pub fn deg_to_wire(deg: f64) -> i32 {
    (deg * 1e7).round() as i32
}

pub fn wire_to_deg(raw: i32) -> f64 {
    raw as f64 / 1e7
}

/// Meters to wire millimeters.
pub fn m_to_mm(m: f64) -> i32 {
    (m * 1000.0).round() as i32
}

pub fn mm_to_m(raw: i32) -> f64 {
    raw as f64 / 1000.0
}

/// Meters/second to wire centimeters/second.
pub fn mps_to_cmps(mps: f64) -> i16 {
    (mps * 100.0).round() as i16
}

pub fn cmps_to_mps(raw: i16) -> f64 {
    raw as f64 / 100.0
}

/// Wire millivolts to volts.
pub fn volts_from_mv(raw: u16) -> f64 {
    raw as f64 / 1000.0
}

/// Wire centiamps to amps.
pub fn amps_from_ca(raw: i16) -> f64 {
    raw as f64 / 100.0
}

pub fn to_mav_frame(frame: MissionFrame) -> MavFrame {
    match frame {
        MissionFrame::Mission => MavFrame::MAV_FRAME_MISSION,
        MissionFrame::GlobalInt => MavFrame::MAV_FRAME_GLOBAL,
        MissionFrame::GlobalRelativeAltInt => MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT,
        MissionFrame::GlobalTerrainAltInt => MavFrame::MAV_FRAME_GLOBAL_TERRAIN_ALT,
        MissionFrame::LocalNed => MavFrame::MAV_FRAME_LOCAL_NED,
        MissionFrame::Other => MavFrame::MAV_FRAME_MISSION,
    }
}

#[allow(deprecated)]
pub fn from_mav_frame(frame: MavFrame) -> MissionFrame {
    match frame {
        MavFrame::MAV_FRAME_MISSION => MissionFrame::Mission,
        MavFrame::MAV_FRAME_GLOBAL | MavFrame::MAV_FRAME_GLOBAL_INT => MissionFrame::GlobalInt,
        MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT
        | MavFrame::MAV_FRAME_GLOBAL_RELATIVE_ALT_INT => MissionFrame::GlobalRelativeAltInt,
        MavFrame::MAV_FRAME_GLOBAL_TERRAIN_ALT
        | MavFrame::MAV_FRAME_GLOBAL_TERRAIN_ALT_INT => MissionFrame::GlobalTerrainAltInt,
        MavFrame::MAV_FRAME_LOCAL_NED => MissionFrame::LocalNed,
        _ => MissionFrame::Other,
    }
}

pub fn system_status_from_mav(status: MavState) -> SystemStatus {
    match status {
        MavState::MAV_STATE_BOOT => SystemStatus::Boot,
        MavState::MAV_STATE_CALIBRATING => SystemStatus::Calibrating,
        MavState::MAV_STATE_STANDBY => SystemStatus::Standby,
        MavState::MAV_STATE_ACTIVE => SystemStatus::Active,
        MavState::MAV_STATE_CRITICAL => SystemStatus::Critical,
        MavState::MAV_STATE_EMERGENCY => SystemStatus::Emergency,
        MavState::MAV_STATE_POWEROFF => SystemStatus::Poweroff,
        _ => SystemStatus::Unknown,
    }
}

/// Encode one waypoint as a MISSION_ITEM_INT payload.
///
/// `x`/`y` go from degrees to the 1e7 fixed-point encoding; `z` stays in
/// meters (the message carries altitude as float). The `current` flag is
/// taken as-is, so the caller is expected to pass items produced by
/// `items_for_wire_upload`, where only seq 0 carries it.
pub fn to_mission_item_int(
    item: &Waypoint,
    target_system: u8,
    target_component: u8,
) -> Result<common::MISSION_ITEM_INT_DATA, BridgeError> {
    let command = FromPrimitive::from_u16(item.command.wire_value()).ok_or_else(|| {
        BridgeError::Transfer {
            code: "unsupported_command".to_string(),
            message: format!("unsupported MAV_CMD value {}", item.command.wire_value()),
        }
    })?;

    Ok(common::MISSION_ITEM_INT_DATA {
        param1: item.param1,
        param2: item.param2,
        param3: item.param3,
        param4: item.param4,
        x: deg_to_wire(item.x),
        y: deg_to_wire(item.y),
        z: item.z,
        seq: item.seq,
        command,
        target_system,
        target_component,
        frame: to_mav_frame(item.frame),
        current: u8::from(item.current),
        autocontinue: u8::from(item.autocontinue),
        mission_type: common::MavMissionType::MAV_MISSION_TYPE_MISSION,
    })
}

/// Decode a received MISSION_ITEM_INT payload back into a waypoint.
pub fn waypoint_from_mission_item_int(
    data: &common::MISSION_ITEM_INT_DATA,
) -> Result<Waypoint, BridgeError> {
    let command =
        NavCommand::from_wire(data.command as u16).ok_or_else(|| BridgeError::Transfer {
            code: "unsupported_command".to_string(),
            message: format!("unsupported MAV_CMD value {}", data.command as u16),
        })?;

    Ok(Waypoint {
        seq: data.seq,
        frame: from_mav_frame(data.frame),
        command,
        current: data.current > 0,
        autocontinue: data.autocontinue > 0,
        param1: data.param1,
        param2: data.param2,
        param3: data.param3,
        param4: data.param4,
        x: wire_to_deg(data.x),
        y: wire_to_deg(data.y),
        z: data.z,
    })
}
