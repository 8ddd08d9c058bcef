use serde::{Deserialize, Serialize};

pub const TIMEOUT_CODE: &str = "transfer.timeout";
pub const ACK_ERROR_CODE: &str = "transfer.ack_error";
pub const COUNT_MISMATCH_CODE: &str = "transfer.count_mismatch";
pub const DISCONNECTED_CODE: &str = "bridge.disconnected";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    Idle,
    Uploading,
    Accepted,
    Rejected,
    TimedOut,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryPolicy {
    pub ack_timeout_ms: u64,
    pub item_timeout_ms: u64,
    pub max_retries: u8,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            ack_timeout_ms: 1500,
            item_timeout_ms: 250,
            max_retries: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadError {
    pub code: String,
    pub message: String,
}

/// Tracks one mission upload from submission to a terminal acknowledgment.
///
/// `Rejected` and `TimedOut` are terminal-with-retry: the caller may submit
/// a fresh upload, which gets a fresh machine. There is no automatic retry
/// of the whole exchange, only per-message retries inside the deadline
/// budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStateMachine {
    phase: UploadPhase,
    total_waypoints: u16,
    sent_waypoints: u16,
    retries_used: u8,
    policy: RetryPolicy,
}

impl UploadStateMachine {
    pub fn new(total_waypoints: u16, policy: RetryPolicy) -> Self {
        Self {
            phase: UploadPhase::Idle,
            total_waypoints,
            sent_waypoints: 0,
            retries_used: 0,
            policy,
        }
    }

    pub fn start(&mut self) {
        if self.phase == UploadPhase::Idle {
            self.phase = UploadPhase::Uploading;
        }
    }

    pub fn on_item_sent(&mut self) {
        if self.phase == UploadPhase::Uploading && self.sent_waypoints < self.total_waypoints {
            self.sent_waypoints += 1;
        }
    }

    /// Positive acknowledgment from the vehicle. Accepted only when the
    /// acknowledged count matches the request; anything else is flagged as
    /// a count mismatch and the phase moves to `Rejected`, leaving the
    /// caller to decide whether a short count is tolerable.
    pub fn on_ack(&mut self, accepted_count: u16) -> Option<UploadError> {
        if self.phase != UploadPhase::Uploading {
            return None;
        }
        if accepted_count == self.total_waypoints {
            self.phase = UploadPhase::Accepted;
            None
        } else {
            self.phase = UploadPhase::Rejected;
            Some(UploadError {
                code: COUNT_MISMATCH_CODE.to_string(),
                message: format!(
                    "vehicle acknowledged {accepted_count} of {} waypoints",
                    self.total_waypoints
                ),
            })
        }
    }

    /// Negative acknowledgment (malformed item, capacity exceeded,
    /// out-of-range coordinate).
    pub fn on_reject(&mut self, code: &str, message: &str) -> UploadError {
        if !self.is_terminal() {
            self.phase = UploadPhase::Rejected;
        }
        UploadError {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Deadline expired without an acknowledgment. Returns an error once
    /// the retry budget is spent; before that the caller should resend and
    /// keep waiting.
    pub fn on_timeout(&mut self) -> Option<UploadError> {
        if self.is_terminal() {
            return None;
        }

        self.retries_used = self.retries_used.saturating_add(1);
        if self.retries_used > self.policy.max_retries {
            self.phase = UploadPhase::TimedOut;
            return Some(UploadError {
                code: TIMEOUT_CODE.to_string(),
                message: "mission upload timed out after maximum retries".to_string(),
            });
        }

        None
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            UploadPhase::Accepted | UploadPhase::Rejected | UploadPhase::TimedOut
        )
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn total_waypoints(&self) -> u16 {
        self.total_waypoints
    }

    pub fn sent_waypoints(&self) -> u16 {
        self.sent_waypoints
    }

    pub fn retries_used(&self) -> u8 {
        self.retries_used
    }

    pub fn timeout_ms(&self) -> u64 {
        if self.phase == UploadPhase::Uploading && self.sent_waypoints < self.total_waypoints {
            self.policy.item_timeout_ms
        } else {
            self.policy.ack_timeout_ms
        }
    }
}
