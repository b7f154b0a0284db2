use std::io;
use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Clap(#[from] clap::Error),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Precis(#[from] precis_core::Error),
    #[error("{0}")]
    Set(#[from] precis_set::Error),
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Return true if this error was caused by writing to a closed pipe.
    pub fn is_broken_pipe(&self) -> bool {
        match *self {
            Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe => true,
            _ => false,
        }
    }
}

impl From<precis_core::Rejection> for Error {
    fn from(err: precis_core::Rejection) -> Error {
        Error::Precis(precis_core::Error::from(err))
    }
}
