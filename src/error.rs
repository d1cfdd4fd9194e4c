use crate::wire::Word;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("unrecognized command word {0}")]
    UnrecognizedCommand(Word),

    #[error("protocol framing violated: {0}")]
    Framing(&'static str),

    #[error("failed to spawn solver process: {0}")]
    Spawn(std::io::Error),

    #[error("no model available, last solve did not report SAT")]
    NoModelAvailable,

    #[error("variable {0} out of range, model covers variables 1..={1}")]
    VariableOutOfRange(u32, u32),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
