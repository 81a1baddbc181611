use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid trigger target: {0}")]
    InvalidTarget(String),

    #[error("Media playback rejected by the runtime")]
    PlaybackRejected,
}

pub type Result<T> = std::result::Result<T, Error>;
