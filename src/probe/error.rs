use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("No data to inspect")]
    Empty,

    #[error("Unrecognized media format")]
    Unrecognized,

    #[error("Data ends inside the {0}")]
    Truncated(&'static str),

    #[error("Malformed media: {0}")]
    Malformed(String),

    #[error("Demuxer rejected the data: {0}")]
    Demux(#[from] symphonia::core::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
