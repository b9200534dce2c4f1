#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Arbor(#[from] arbor::error::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid key {:?}: {}", .0, .1)]
    InvalidKey(String, std::num::ParseIntError),
}
