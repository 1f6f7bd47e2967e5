//! Backend I/O errors, classified into [`lumensync_core::Error`] at the crate boundary.

use lumensync_core::DeviceId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Protocol(String),

    #[error("no devices discovered within the scan window")]
    NoDevicesFound,

    #[error("verb '{0}' is unsupported by this device")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a backend-local error into the pipeline-wide taxonomy.
    pub fn into_core(self, id: DeviceId) -> lumensync_core::Error {
        match self {
            Error::Http(_) | Error::Io(_) | Error::NoDevicesFound => lumensync_core::Error::DeviceUnreachable(id),
            Error::Protocol(detail) => lumensync_core::Error::DeviceProtocol { id, detail },
            Error::Unsupported(verb) => lumensync_core::Error::DeviceUnsupported { id, verb },
        }
    }
}
