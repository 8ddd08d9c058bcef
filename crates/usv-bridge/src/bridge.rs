use crate::error::BridgeError;
use crate::subscribers::Subscription;
use crate::types::{
    ConnectionStatus, MissionFetchRequest, MissionFetchResponse, MissionProgress,
    MissionUploadRequest, MissionUploadResult, VehiclePosition, VehicleStatus,
};

/// Service surface a transport-layer MAVLink gateway exposes to the
/// frontend.
///
/// Implementations own the transport (socket, serial port, heartbeats) and
/// all wire-unit scaling; callers only ever see the human-unit types from
/// [`crate::types`]. Upload and fetch may be in flight concurrently with
/// any number of active telemetry subscriptions. Per stream, callbacks are
/// delivered in the timestamp order the vehicle produced them. In-flight
/// upload/fetch futures have no cancellation primitive in this contract.
#[allow(async_fn_in_trait)]
pub trait MavlinkBridge: Send + Sync {
    /// Snapshot of whether heartbeats are currently being received.
    fn is_connected(&self) -> bool;

    fn on_connection_status(
        &self,
        callback: impl Fn(&ConnectionStatus) + Send + Sync + 'static,
    ) -> Subscription;

    /// Run the upload exchange: clear-all, count, each item in wire order,
    /// acknowledgment, optional set-current.
    ///
    /// Always resolves. Protocol rejection and transport timeout come back
    /// as `success = false` with `error_code`/`error_message` populated so
    /// callers can branch on the result instead of catching faults.
    async fn upload_mission(&self, request: MissionUploadRequest) -> MissionUploadResult;

    /// Fetch the vehicle-side mission, in full or as the requested
    /// sequence range, and reassemble it into a `Mission` value. The
    /// returned current index is vehicle-authoritative.
    async fn fetch_mission(
        &self,
        request: MissionFetchRequest,
    ) -> Result<MissionFetchResponse, BridgeError>;

    /// Position stream, expected at 1-10 Hz.
    fn on_position(
        &self,
        callback: impl Fn(&VehiclePosition) + Send + Sync + 'static,
    ) -> Subscription;

    /// Status stream, expected at ~1 Hz.
    fn on_status(&self, callback: impl Fn(&VehicleStatus) + Send + Sync + 'static)
        -> Subscription;

    /// Event-driven: fires on waypoint change or mission edit.
    fn on_mission_progress(
        &self,
        callback: impl Fn(&MissionProgress) + Send + Sync + 'static,
    ) -> Subscription;
}
