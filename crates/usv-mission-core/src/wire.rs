use chrono::Utc;

use crate::types::{Mission, MissionMetadata, Waypoint};

/// Produce the MAVLink-ordered item list for a mission upload.
///
/// Every element is a copy of the stored waypoint except `current`, which is
/// recomputed: `true` for the element at position 0 and `false` everywhere
/// else, regardless of what the stored flags hold. The result is rebuilt on
/// every call so edits between calls are always reflected. The input mission
/// is not touched.
pub fn items_for_wire_upload(mission: &Mission) -> Vec<Waypoint> {
    mission
        .waypoints
        .iter()
        .enumerate()
        .map(|(i, wp)| Waypoint {
            current: i == 0,
            ..*wp
        })
        .collect()
}

/// Reassemble a mission from items fetched off the vehicle.
///
/// Items are resequenced from 0 in the order received and `current` is
/// forced back to `false` on every waypoint; the frontend-held copy never
/// persists the transient upload marker. Metadata is freshly timestamped.
pub fn mission_from_wire_download(wire_items: Vec<Waypoint>) -> Mission {
    let waypoints = wire_items
        .into_iter()
        .enumerate()
        .map(|(i, item)| Waypoint {
            seq: i as u16,
            current: false,
            ..item
        })
        .collect();

    let now = Utc::now();
    Mission {
        waypoints,
        current_waypoint_index: 0,
        metadata: MissionMetadata {
            name: String::from("Onboard mission"),
            created_at: now,
            updated_at: now,
        },
    }
}
