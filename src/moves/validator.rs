// Ficheiro: src/moves/validator.rs
// Descrição: Validação de lances vindos de fora (adversário ou entrada manual).
// Lances gerados internamente são confiáveis e não passam por aqui.

use crate::core::*;
use crate::error::MoveError;

/// Passo unitário de `from` até `to`, se estiverem na mesma linha de dama.
fn line_step(from: Square, to: Square) -> Option<(i8, i8)> {
    let (dr, dc) = (to.row - from.row, to.col - from.col);
    if (dr, dc) == (0, 0) || (dr != 0 && dc != 0 && dr.abs() != dc.abs()) {
        return None;
    }
    Some((dr.signum(), dc.signum()))
}

/// Confirma que `mv` é jogável em `board`: há uma dama de `mv.role` na
/// origem, o caminho da dama está livre e o da flecha também (podendo
/// atravessar a origem que a dama deixou).
pub fn validate(board: &Board, mv: &Move) -> Result<(), MoveError> {
    for square in [mv.origin, mv.destination, mv.arrow] {
        if !board.in_bounds(square) {
            return Err(MoveError::OutOfBounds(square));
        }
    }

    if !board.queen_at(mv.role, mv.origin) {
        return Err(MoveError::NoQueen { role: mv.role, square: mv.origin });
    }

    // caminha até à posição final da dama
    let step = line_step(mv.origin, mv.destination)
        .ok_or(MoveError::QueenDirection { from: mv.origin, to: mv.destination })?;
    let mut square = mv.origin;
    while square != mv.destination {
        square = square.step(step);
        if !board.pos_free(square) {
            return Err(MoveError::QueenPathBlocked(square));
        }
    }

    // e daí até à flecha
    let step = line_step(mv.destination, mv.arrow)
        .ok_or(MoveError::ArrowDirection { from: mv.destination, to: mv.arrow })?;
    let mut square = mv.destination;
    while square != mv.arrow {
        square = square.step(step);
        if !board.pos_free(square) && square != mv.origin {
            return Err(MoveError::ArrowPathBlocked(square));
        }
    }

    Ok(())
}
