#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bridge disconnected")]
    Disconnected,
    #[error("operation timed out")]
    Timeout,
    #[error("mission transfer failed: [{code}] {message}")]
    Transfer { code: String, message: String },
}
