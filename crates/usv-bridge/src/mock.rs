use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use usv_mission_core::{items_for_wire_upload, mission_from_wire_download, Waypoint};

use crate::bridge::MavlinkBridge;
use crate::error::BridgeError;
use crate::subscribers::{SubscriberList, Subscription};
use crate::transfer::{RetryPolicy, UploadStateMachine, DISCONNECTED_CODE};
use crate::types::{
    ConnectionStatus, ConnectionType, MissionFetchRequest, MissionFetchResponse, MissionProgress,
    MissionUploadRequest, MissionUploadResult, VehiclePosition, VehicleStatus,
};

/// Scripted outcome for the next `upload_mission` call.
#[derive(Debug, Clone)]
pub enum UploadScript {
    AcceptAll,
    Reject { code: String, message: String },
    TimeOut,
    PartialAccept { accepted: u16 },
}

/// Vehicle-side mission copy. Authoritative; the frontend never observes
/// it except through fetch and progress.
struct OnboardMission {
    items: Vec<Waypoint>,
    current_seq: u16,
}

/// In-memory bridge double for exercising the contract without a
/// transport.
///
/// Upload runs the real wire-order exchange through an
/// [`UploadStateMachine`]; telemetry subscribers are driven from tests via
/// the `push_*` methods.
pub struct MockBridge {
    connected: AtomicBool,
    script: Mutex<UploadScript>,
    policy: RetryPolicy,
    onboard: Mutex<Option<OnboardMission>>,
    last_heartbeat: Mutex<Option<DateTime<Utc>>>,
    position_subs: SubscriberList<VehiclePosition>,
    status_subs: SubscriberList<VehicleStatus>,
    progress_subs: SubscriberList<MissionProgress>,
    connection_subs: SubscriberList<ConnectionStatus>,
}

impl MockBridge {
    pub fn new() -> Self {
        Self::with_script(UploadScript::AcceptAll)
    }

    pub fn with_script(script: UploadScript) -> Self {
        MockBridge {
            connected: AtomicBool::new(true),
            script: Mutex::new(script),
            policy: RetryPolicy::default(),
            onboard: Mutex::new(None),
            last_heartbeat: Mutex::new(Some(Utc::now())),
            position_subs: SubscriberList::new(),
            status_subs: SubscriberList::new(),
            progress_subs: SubscriberList::new(),
            connection_subs: SubscriberList::new(),
        }
    }

    pub fn set_script(&self, script: UploadScript) {
        *self.script.lock().expect("script lock poisoned") = script;
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
        if connected {
            *self.last_heartbeat.lock().expect("heartbeat lock poisoned") = Some(Utc::now());
        }
        let snapshot = self.connection_snapshot();
        self.connection_subs.emit(&snapshot);
    }

    pub fn push_position(&self, position: VehiclePosition) {
        self.position_subs.emit(&position);
    }

    pub fn push_status(&self, status: VehicleStatus) {
        self.status_subs.emit(&status);
    }

    pub fn push_progress(&self, progress: MissionProgress) {
        self.progress_subs.emit(&progress);
    }

    pub fn onboard_waypoint_count(&self) -> Option<usize> {
        self.onboard
            .lock()
            .expect("onboard lock poisoned")
            .as_ref()
            .map(|onboard| onboard.items.len())
    }

    fn connection_snapshot(&self) -> ConnectionStatus {
        let last_heartbeat = *self.last_heartbeat.lock().expect("heartbeat lock poisoned");
        let heartbeat_age = last_heartbeat
            .map(|ts| (Utc::now() - ts).num_milliseconds().max(0) as f64 / 1000.0);
        ConnectionStatus {
            connected: self.connected.load(Ordering::SeqCst),
            connection_type: Some(ConnectionType::Udp),
            last_heartbeat,
            heartbeat_age,
        }
    }

    fn emit_progress_for(&self, current_seq: u16, total: u16) {
        self.progress_subs.emit(&MissionProgress {
            current_waypoint_seq: current_seq,
            total_waypoints: total,
            distance_to_waypoint: None,
            eta_to_waypoint: None,
            timestamp: Utc::now(),
        });
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MavlinkBridge for MockBridge {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn on_connection_status(
        &self,
        callback: impl Fn(&ConnectionStatus) + Send + Sync + 'static,
    ) -> Subscription {
        self.connection_subs.subscribe(callback)
    }

    async fn upload_mission(&self, request: MissionUploadRequest) -> MissionUploadResult {
        let wire_items = items_for_wire_upload(&request.mission);
        let total = wire_items.len() as u16;

        if !self.is_connected() {
            warn!(total, "mission upload attempted without heartbeat");
            return MissionUploadResult::failed(DISCONNECTED_CODE, "no heartbeat from vehicle");
        }

        let mut machine = UploadStateMachine::new(total, self.policy);
        machine.start();
        debug!(total, "mission upload started");

        // clear-all + count + each item in wire order
        for item in &wire_items {
            debug_assert_eq!(item.current, item.seq == 0);
            machine.on_item_sent();
        }

        let script = self.script.lock().expect("script lock poisoned").clone();
        match script {
            UploadScript::AcceptAll => {
                let mismatch = machine.on_ack(total);
                debug_assert!(mismatch.is_none());
                *self.onboard.lock().expect("onboard lock poisoned") = Some(OnboardMission {
                    items: wire_items,
                    current_seq: 0,
                });
                if request.set_as_current {
                    self.emit_progress_for(0, total);
                }
                debug!(total, "mission upload accepted");
                MissionUploadResult::accepted(total)
            }
            UploadScript::PartialAccept { accepted } => {
                let accepted = accepted.min(total);
                let mut warnings = Vec::new();
                if let Some(err) = machine.on_ack(accepted) {
                    warnings.push(err.message);
                }
                let kept: Vec<Waypoint> =
                    wire_items.into_iter().take(accepted as usize).collect();
                *self.onboard.lock().expect("onboard lock poisoned") = Some(OnboardMission {
                    items: kept,
                    current_seq: 0,
                });
                warn!(total, accepted, "mission upload partially accepted");
                MissionUploadResult {
                    success: true,
                    accepted_waypoint_count: accepted,
                    error_code: None,
                    error_message: None,
                    warnings,
                    timestamp: Utc::now(),
                }
            }
            UploadScript::Reject { code, message } => {
                let err = machine.on_reject(&code, &message);
                warn!(code = %err.code, "mission upload rejected");
                MissionUploadResult::failed(err.code, err.message)
            }
            UploadScript::TimeOut => {
                let err = loop {
                    tokio::time::sleep(Duration::from_millis(machine.timeout_ms())).await;
                    if let Some(err) = machine.on_timeout() {
                        break err;
                    }
                    debug!(retries = machine.retries_used(), "resending after deadline");
                };
                warn!(code = %err.code, "mission upload timed out");
                MissionUploadResult::failed(err.code, err.message)
            }
        }
    }

    async fn fetch_mission(
        &self,
        request: MissionFetchRequest,
    ) -> Result<MissionFetchResponse, BridgeError> {
        if !self.is_connected() {
            return Err(BridgeError::Disconnected);
        }

        let (items, current_seq) = {
            let onboard = self.onboard.lock().expect("onboard lock poisoned");
            match onboard.as_ref() {
                Some(onboard) => {
                    let start = request.start_seq.unwrap_or(0) as usize;
                    let end = request
                        .end_seq
                        .map(|seq| seq as usize + 1)
                        .unwrap_or(onboard.items.len())
                        .min(onboard.items.len());
                    let slice = if start >= end {
                        Vec::new()
                    } else {
                        onboard.items[start..end].to_vec()
                    };
                    (slice, onboard.current_seq)
                }
                None => (Vec::new(), 0),
            }
        };

        debug!(count = items.len(), "mission fetch served");
        Ok(MissionFetchResponse {
            mission: mission_from_wire_download(items),
            current_waypoint_index: current_seq,
            timestamp: Utc::now(),
        })
    }

    fn on_position(
        &self,
        callback: impl Fn(&VehiclePosition) + Send + Sync + 'static,
    ) -> Subscription {
        self.position_subs.subscribe(callback)
    }

    fn on_status(
        &self,
        callback: impl Fn(&VehicleStatus) + Send + Sync + 'static,
    ) -> Subscription {
        self.status_subs.subscribe(callback)
    }

    fn on_mission_progress(
        &self,
        callback: impl Fn(&MissionProgress) + Send + Sync + 'static,
    ) -> Subscription {
        self.progress_subs.subscribe(callback)
    }
}
