use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("word {0:#o} does not fit in 12 bits")]
    WordOutOfRange(u16),
    #[error("switch index {0} is outside the 12-switch bank")]
    SwitchIndexOutOfRange(usize),
    #[error("memory snapshot must hold {expected} words, got {actual}")]
    SnapshotLength { expected: usize, actual: usize },
    #[error("unknown {kind} id '{id}'")]
    UnknownId { kind: &'static str, id: String },
}
