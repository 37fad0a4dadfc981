// Ficheiro: src/error.rs
// Descrição: Erros tipados da biblioteca. A busca em si nunca falha.

use crate::core::{Role, Square};
use thiserror::Error;

/// Diagrama de tabuleiro mal formado.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 10 rows, found {0}")]
    RowCount(usize),
    #[error("row {row}: expected 10 columns, found {found}")]
    ColumnCount { row: usize, found: usize },
    #[error("unknown glyph {glyph:?} at ({row}, {col})")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
    #[error("expected 4 {role} queens, found {found}")]
    QueenCount { role: Role, found: usize },
}

/// Lance externo rejeitado pela validação.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square {0} is outside the board")]
    OutOfBounds(Square),
    #[error("no {role} queen found at {square}")]
    NoQueen { role: Role, square: Square },
    #[error("invalid queen direction {from} -> {to}")]
    QueenDirection { from: Square, to: Square },
    #[error("the queen's path to {0} is not clear")]
    QueenPathBlocked(Square),
    #[error("invalid arrow direction {from} -> {to}")]
    ArrowDirection { from: Square, to: Square },
    #[error("the arrow's path to {0} is not clear")]
    ArrowPathBlocked(Square),
    #[error("it is not {0}'s turn")]
    OutOfTurn(Role),
}

/// Notação de lance ilegível.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("missing arrow in {0:?}")]
    MissingArrow(String),
    #[error("missing queen destination in {0:?}")]
    MissingDestination(String),
    #[error("invalid square {0:?}")]
    InvalidSquare(String),
}
