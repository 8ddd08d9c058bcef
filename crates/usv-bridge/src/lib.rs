pub mod bridge;
pub mod error;
pub mod mock;
pub mod subscribers;
pub mod transfer;
pub mod types;
pub mod wire;

pub use bridge::MavlinkBridge;
pub use error::BridgeError;
pub use mock::{MockBridge, UploadScript};
pub use subscribers::{SubscriberList, Subscription};
pub use transfer::{
    RetryPolicy, UploadError, UploadPhase, UploadStateMachine, ACK_ERROR_CODE,
    COUNT_MISMATCH_CODE, DISCONNECTED_CODE, TIMEOUT_CODE,
};
pub use types::{
    ConnectionStatus, ConnectionType, MissionFetchRequest, MissionFetchResponse, MissionProgress,
    MissionUploadRequest, MissionUploadResult, SystemStatus, VehiclePosition, VehicleStatus,
};
pub use wire::{
    amps_from_ca, cmps_to_mps, deg_to_wire, m_to_mm, mm_to_m, mps_to_cmps, to_mission_item_int,
    volts_from_mv, waypoint_from_mission_item_int, wire_to_deg,
};
