#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Key not found")]
    KeyNotFound,

    #[error("Invariant violated: {}", .0)]
    InvariantViolation(String),
}
