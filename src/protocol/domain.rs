use crate::core::MoveError;

/// Wire form of [`MoveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MoveRejection {
    OutOfBounds { row: usize, col: usize },
    Occupied { row: usize, col: usize },
    NoFlips { row: usize, col: usize },
}

impl From<MoveError> for MoveRejection {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::OutOfBounds { row, col } => MoveRejection::OutOfBounds { row, col },
            MoveError::Occupied { row, col } => MoveRejection::Occupied { row, col },
            MoveError::NoFlips { row, col } => MoveRejection::NoFlips { row, col },
        }
    }
}

impl From<MoveRejection> for MoveError {
    fn from(reason: MoveRejection) -> Self {
        match reason {
            MoveRejection::OutOfBounds { row, col } => MoveError::OutOfBounds { row, col },
            MoveRejection::Occupied { row, col } => MoveError::Occupied { row, col },
            MoveRejection::NoFlips { row, col } => MoveError::NoFlips { row, col },
        }
    }
}
