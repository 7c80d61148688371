/// Failures at the generation-service boundary.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("unable to reach generation service")]
    Transport(#[from] isahc::Error),

    #[error("invalid generation request")]
    Request(#[from] isahc::http::Error),

    #[error("unable to read generation response")]
    Read(#[from] std::io::Error),

    #[error("malformed generation response")]
    Response(#[from] serde_json::Error),

    #[error(
        "minimum length {min_length} not reached after {continuations} continuations \
         (got {length} characters)"
    )]
    MaxRetriesExceeded {
        continuations: usize,
        length: usize,
        min_length: usize,
    },
}
