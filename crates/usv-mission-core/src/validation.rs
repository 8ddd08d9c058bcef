use serde::{Deserialize, Serialize};

use crate::types::{Mission, Waypoint};

pub const MAX_MISSION_ITEMS: usize = 4096;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionIssue {
    pub code: String,
    pub message: String,
    pub seq: Option<u16>,
    pub severity: IssueSeverity,
}

/// Advisory mission check for the UI layer.
///
/// The pure constructors never reject input; this is where out-of-range
/// coordinates and broken sequencing get reported before an upload attempt.
pub fn validate_mission(mission: &Mission) -> Vec<MissionIssue> {
    let mut issues = Vec::new();

    if mission.waypoints.len() > MAX_MISSION_ITEMS {
        issues.push(MissionIssue {
            code: "mission.too_many_items".to_string(),
            message: format!(
                "Mission exceeds maximum supported item count ({MAX_MISSION_ITEMS})"
            ),
            seq: None,
            severity: IssueSeverity::Error,
        });
    }

    for (expected, wp) in mission.waypoints.iter().enumerate() {
        let expected_seq = expected as u16;
        if wp.seq != expected_seq {
            issues.push(MissionIssue {
                code: "mission.non_contiguous_sequence".to_string(),
                message: format!("Expected sequence {} but found {}", expected_seq, wp.seq),
                seq: Some(wp.seq),
                severity: IssueSeverity::Error,
            });
        }

        for (name, value) in [
            ("param1", wp.param1),
            ("param2", wp.param2),
            ("param3", wp.param3),
            ("param4", wp.param4),
            ("z", wp.z),
        ] {
            if !value.is_finite() {
                issues.push(MissionIssue {
                    code: "item.non_finite_value".to_string(),
                    message: format!("{name} must be finite"),
                    seq: Some(wp.seq),
                    severity: IssueSeverity::Error,
                });
            }
        }

        if wp.frame.is_global_position() {
            if !(-90.0..=90.0).contains(&wp.x) {
                issues.push(MissionIssue {
                    code: "item.latitude_out_of_range".to_string(),
                    message: format!("Latitude {} is outside [-90, 90]", wp.x),
                    seq: Some(wp.seq),
                    severity: IssueSeverity::Error,
                });
            }

            if !(-180.0..=180.0).contains(&wp.y) {
                issues.push(MissionIssue {
                    code: "item.longitude_out_of_range".to_string(),
                    message: format!("Longitude {} is outside [-180, 180]", wp.y),
                    seq: Some(wp.seq),
                    severity: IssueSeverity::Error,
                });
            }
        }

        // Surface vehicles run at water level; a non-zero altitude usually
        // means the plan came from an aerial tool.
        if wp.z != 0.0 && wp.z.is_finite() {
            issues.push(MissionIssue {
                code: "item.nonzero_altitude".to_string(),
                message: format!("Altitude {} m on a surface-vehicle waypoint", wp.z),
                seq: Some(wp.seq),
                severity: IssueSeverity::Warning,
            });
        }
    }

    issues
}

#[derive(Debug, Clone, Copy)]
pub struct CompareTolerance {
    pub param_epsilon: f32,
    pub coord_epsilon_deg: f64,
    pub altitude_epsilon_m: f32,
}

impl Default for CompareTolerance {
    fn default() -> Self {
        Self {
            param_epsilon: 0.0001,
            // one count of the 1e7 fixed-point wire encoding
            coord_epsilon_deg: 1e-7,
            altitude_epsilon_m: 0.01,
        }
    }
}

pub fn normalize_for_compare(mission: &Mission) -> Mission {
    let mut normalized = mission.clone();
    for (index, wp) in normalized.waypoints.iter_mut().enumerate() {
        wp.seq = index as u16;
        wp.current = false;
        wp.param1 = round_to(wp.param1, 1e-4);
        wp.param2 = round_to(wp.param2, 1e-4);
        wp.param3 = round_to(wp.param3, 1e-4);
        wp.param4 = round_to(wp.param4, 1e-4);
        wp.z = round_to(wp.z, 1e-3);
    }
    normalized
}

/// Structural equivalence up to float tolerance, used to verify that an
/// uploaded mission read back from the vehicle matches what was sent.
/// Metadata and the advisory current index are not compared.
pub fn missions_equivalent(lhs: &Mission, rhs: &Mission, tolerance: CompareTolerance) -> bool {
    if lhs.waypoints.len() != rhs.waypoints.len() {
        return false;
    }

    lhs.waypoints
        .iter()
        .zip(&rhs.waypoints)
        .all(|(left, right)| waypoint_eq(left, right, tolerance))
}

fn waypoint_eq(left: &Waypoint, right: &Waypoint, tolerance: CompareTolerance) -> bool {
    left.seq == right.seq
        && left.command == right.command
        && left.frame == right.frame
        && left.autocontinue == right.autocontinue
        && float_eq(left.param1, right.param1, tolerance.param_epsilon)
        && float_eq(left.param2, right.param2, tolerance.param_epsilon)
        && float_eq(left.param3, right.param3, tolerance.param_epsilon)
        && float_eq(left.param4, right.param4, tolerance.param_epsilon)
        && (left.x - right.x).abs() <= tolerance.coord_epsilon_deg
        && (left.y - right.y).abs() <= tolerance.coord_epsilon_deg
        && float_eq(left.z, right.z, tolerance.altitude_epsilon_m)
}

fn float_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

fn round_to(value: f32, step: f32) -> f32 {
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mission() -> Mission {
        Mission::empty()
            .with_waypoint(15.4909, 73.8278)
            .with_waypoint(15.4921, 73.8301)
    }

    #[test]
    fn valid_surface_mission_has_no_issues() {
        assert!(validate_mission(&sample_mission()).is_empty());
    }

    #[test]
    fn detects_non_contiguous_sequence() {
        let mut mission = sample_mission();
        mission.waypoints[1].seq = 5;
        let issues = validate_mission(&mission);
        assert!(issues
            .iter()
            .any(|issue| issue.code == "mission.non_contiguous_sequence"));
    }

    #[test]
    fn detects_invalid_coordinates_and_nan() {
        let mut mission = sample_mission();
        mission.waypoints[0].x = 95.0;
        mission.waypoints[1].y = -200.0;
        mission.waypoints[1].param4 = f32::NAN;
        let issues = validate_mission(&mission);
        assert!(issues
            .iter()
            .any(|issue| issue.code == "item.latitude_out_of_range"));
        assert!(issues
            .iter()
            .any(|issue| issue.code == "item.longitude_out_of_range"));
        assert!(issues
            .iter()
            .any(|issue| issue.code == "item.non_finite_value"));
    }

    #[test]
    fn warns_on_nonzero_altitude() {
        let mut mission = sample_mission();
        mission.waypoints[0].z = 10.0;
        let issues = validate_mission(&mission);
        let issue = issues
            .iter()
            .find(|issue| issue.code == "item.nonzero_altitude")
            .expect("altitude warning");
        assert_eq!(issue.severity, IssueSeverity::Warning);
        assert_eq!(issue.seq, Some(0));
    }

    #[test]
    fn equivalence_tolerates_small_float_drift() {
        let lhs = sample_mission();
        let mut rhs = lhs.clone();
        rhs.waypoints[0].param2 += 0.00005;
        rhs.waypoints[1].z += 0.005;
        rhs.waypoints[1].x += 5e-8;
        assert!(missions_equivalent(&lhs, &rhs, CompareTolerance::default()));

        rhs.waypoints[1].y += 0.001;
        assert!(!missions_equivalent(&lhs, &rhs, CompareTolerance::default()));
    }

    #[test]
    fn normalize_resequences_and_drops_current_marker() {
        let mut mission = sample_mission();
        mission.waypoints[0].current = true;
        mission.waypoints[1].seq = 9;
        let normalized = normalize_for_compare(&mission);
        assert!(!normalized.waypoints[0].current);
        assert_eq!(normalized.waypoints[1].seq, 1);
    }
}
