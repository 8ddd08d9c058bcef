use std::sync::{Arc, Mutex};

use chrono::Utc;
use usv_bridge::{
    MavlinkBridge, MissionFetchRequest, MissionUploadRequest, MockBridge, SystemStatus,
    UploadScript, VehiclePosition, VehicleStatus, ACK_ERROR_CODE, TIMEOUT_CODE,
};
use usv_mission_core::{missions_equivalent, CompareTolerance, Mission};

fn three_point_mission() -> Mission {
    Mission::empty()
        .with_waypoint(15.4909, 73.8278)
        .with_waypoint(15.4921, 73.8301)
        .with_waypoint(15.4935, 73.8322)
}

fn upload_request(mission: Mission) -> MissionUploadRequest {
    MissionUploadRequest {
        mission,
        set_as_current: false,
    }
}

fn sample_position(lat: f64) -> VehiclePosition {
    VehiclePosition {
        lat,
        lon: 73.8278,
        alt: 0.0,
        heading: 90.0,
        groundspeed: 1.8,
        vertical_speed: None,
        timestamp: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_accepts_full_mission() {
    let bridge = MockBridge::new();
    let result = bridge.upload_mission(upload_request(three_point_mission())).await;

    assert!(result.success);
    assert_eq!(result.accepted_waypoint_count, 3);
    assert!(result.error_code.is_none());
    assert!(result.warnings.is_empty());
    assert_eq!(bridge.onboard_waypoint_count(), Some(3));
}

#[tokio::test]
async fn upload_surfaces_rejection_as_result_value() {
    let bridge = MockBridge::with_script(UploadScript::Reject {
        code: ACK_ERROR_CODE.to_string(),
        message: "MAV_MISSION_NO_SPACE".to_string(),
    });
    let result = bridge.upload_mission(upload_request(three_point_mission())).await;

    assert!(!result.success);
    assert_eq!(result.accepted_waypoint_count, 0);
    assert_eq!(result.error_code.as_deref(), Some(ACK_ERROR_CODE));
    assert_eq!(result.error_message.as_deref(), Some("MAV_MISSION_NO_SPACE"));
    assert_eq!(bridge.onboard_waypoint_count(), None);
}

#[tokio::test(start_paused = true)]
async fn upload_resolves_with_timeout_code_after_retry_budget() {
    let bridge = MockBridge::with_script(UploadScript::TimeOut);
    let result = bridge.upload_mission(upload_request(three_point_mission())).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some(TIMEOUT_CODE));
    assert_eq!(result.accepted_waypoint_count, 0);
}

#[tokio::test]
async fn partial_acceptance_keeps_success_with_warnings() {
    let bridge = MockBridge::with_script(UploadScript::PartialAccept { accepted: 2 });
    let result = bridge.upload_mission(upload_request(three_point_mission())).await;

    assert!(result.success);
    assert_eq!(result.accepted_waypoint_count, 2);
    assert!(result.error_code.is_none());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("2 of 3"));
    assert_eq!(bridge.onboard_waypoint_count(), Some(2));
}

#[tokio::test]
async fn upload_without_heartbeat_fails_without_panicking() {
    let bridge = MockBridge::new();
    bridge.set_connected(false);
    let result = bridge.upload_mission(upload_request(three_point_mission())).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("bridge.disconnected"));
}

#[tokio::test]
async fn set_as_current_notifies_progress_subscribers() {
    let bridge = MockBridge::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut sub = bridge.on_mission_progress(move |progress| {
        sink.lock()
            .unwrap()
            .push((progress.current_waypoint_seq, progress.total_waypoints));
    });

    let result = bridge
        .upload_mission(MissionUploadRequest {
            mission: three_point_mission(),
            set_as_current: true,
        })
        .await;
    assert!(result.success);
    assert_eq!(*seen.lock().unwrap(), vec![(0, 3)]);
    sub.cancel();
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_uploaded_mission_with_clean_state() {
    let bridge = MockBridge::new();
    let sent = three_point_mission();
    assert!(bridge.upload_mission(upload_request(sent.clone())).await.success);

    let response = bridge
        .fetch_mission(MissionFetchRequest::default())
        .await
        .expect("fetch");

    assert!(missions_equivalent(
        &sent,
        &response.mission,
        CompareTolerance::default()
    ));
    assert!(response.mission.waypoints.iter().all(|wp| !wp.current));
    assert_eq!(response.current_waypoint_index, 0);
}

#[tokio::test]
async fn fetch_honors_partial_range() {
    let bridge = MockBridge::new();
    assert!(bridge.upload_mission(upload_request(three_point_mission())).await.success);

    let response = bridge
        .fetch_mission(MissionFetchRequest {
            start_seq: Some(1),
            end_seq: Some(2),
        })
        .await
        .expect("fetch");

    assert_eq!(response.mission.waypoints.len(), 2);
    // reassembled slice is resequenced from zero
    assert_eq!(response.mission.waypoints[0].seq, 0);
    assert_eq!(response.mission.waypoints[0].x, 15.4921);
    assert_eq!(response.mission.waypoints[1].x, 15.4935);
}

#[tokio::test]
async fn fetch_from_vehicle_without_mission_is_empty() {
    let bridge = MockBridge::new();
    let response = bridge
        .fetch_mission(MissionFetchRequest::default())
        .await
        .expect("fetch");
    assert!(response.mission.waypoints.is_empty());
    assert_eq!(response.current_waypoint_index, 0);
}

#[tokio::test]
async fn fetch_while_disconnected_errors() {
    let bridge = MockBridge::new();
    bridge.set_connected(false);
    let err = bridge
        .fetch_mission(MissionFetchRequest::default())
        .await
        .expect_err("disconnected");
    assert!(err.to_string().contains("disconnected"));
}

// ---------------------------------------------------------------------------
// Telemetry subscriptions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn position_stream_preserves_order_until_cancel() {
    let bridge = MockBridge::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut sub = bridge.on_position(move |position| sink.lock().unwrap().push(position.lat));

    bridge.push_position(sample_position(15.1));
    bridge.push_position(sample_position(15.2));
    bridge.push_position(sample_position(15.3));

    sub.cancel();
    sub.cancel();
    bridge.push_position(sample_position(15.4));

    assert_eq!(*seen.lock().unwrap(), vec![15.1, 15.2, 15.3]);
}

#[tokio::test]
async fn status_stream_delivers_battery_values() {
    let bridge = MockBridge::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = bridge.on_status(move |status| {
        sink.lock()
            .unwrap()
            .push((status.armed, status.battery_voltage));
    });

    bridge.push_status(VehicleStatus {
        armed: true,
        mode: "AUTO".to_string(),
        system_status: SystemStatus::Active,
        failsafe: false,
        battery_voltage: Some(12.6),
        battery_percent: Some(87.0),
        battery_current: Some(4.5),
        timestamp: Utc::now(),
    });

    assert_eq!(*seen.lock().unwrap(), vec![(true, Some(12.6))]);
}

#[tokio::test]
async fn connection_transitions_reach_subscribers() {
    let bridge = MockBridge::new();
    assert!(bridge.is_connected());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = bridge.on_connection_status(move |status| {
        sink.lock().unwrap().push(status.connected);
    });

    bridge.set_connected(false);
    assert!(!bridge.is_connected());
    bridge.set_connected(true);
    assert!(bridge.is_connected());

    assert_eq!(*seen.lock().unwrap(), vec![false, true]);
}
