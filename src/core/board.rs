// Ficheiro: src/core/board.rs
// Descrição: Módulo que contém a struct Board e os seus métodos principais.

use super::types::*;
use crate::error::BoardError;
use crate::search::evaluation;
use std::fmt;

/// Posições iniciais das damas de cada lado, na ordem em que são guardadas.
const WHITE_START: [Square; QUEENS_PER_SIDE] = [
    Square::new(3, 0), Square::new(0, 3), Square::new(0, 6), Square::new(3, 9),
];
const BLACK_START: [Square; QUEENS_PER_SIDE] = [
    Square::new(6, 0), Square::new(9, 3), Square::new(9, 6), Square::new(6, 9),
];

// A struct principal do tabuleiro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],

    // Posições das damas, indexadas por Role::index().
    queens: [[Square; QUEENS_PER_SIDE]; 2],

    // Número de flechas disparadas (= turnos jogados).
    marked: u8,
}

impl Board {
    /// Cria um tabuleiro vazio com as damas nas posições iniciais.
    pub fn new() -> Self {
        let mut board = Board {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            queens: [WHITE_START, BLACK_START],
            marked: 0,
        };
        for role in [Role::White, Role::Black] {
            for queen in board.queens[role.index()] {
                board.set(queen, role.queen());
            }
        }
        board
    }

    /// Cria um tabuleiro a partir de um diagrama de 10 linhas (linha i = row i).
    /// `.` vazio, `W` dama branca, `B` dama preta, `X` flecha.
    pub fn from_diagram(diagram: &str) -> Result<Self, BoardError> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mut white = Vec::with_capacity(QUEENS_PER_SIDE);
        let mut black = Vec::with_capacity(QUEENS_PER_SIDE);
        let mut arrows = 0u8;

        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(BoardError::ColumnCount { row: r, found: row.len() });
            }
            for (c, &ch) in row.iter().enumerate() {
                let cell = Cell::from_glyph(ch).ok_or(BoardError::UnknownGlyph { row: r, col: c, glyph: ch })?;
                let square = Square::new(r as i8, c as i8);
                match cell {
                    Cell::WhiteQueen => white.push(square),
                    Cell::BlackQueen => black.push(square),
                    Cell::Arrow => arrows += 1,
                    Cell::Empty => {}
                }
                grid[r][c] = cell;
            }
        }

        let white: [Square; QUEENS_PER_SIDE] = white
            .try_into()
            .map_err(|found: Vec<Square>| BoardError::QueenCount { role: Role::White, found: found.len() })?;
        let black: [Square; QUEENS_PER_SIDE] = black
            .try_into()
            .map_err(|found: Vec<Square>| BoardError::QueenCount { role: Role::Black, found: found.len() })?;

        Ok(Board { grid, queens: [white, black], marked: arrows })
    }

    /// Número de casas marcadas por flechas (contador de turnos).
    #[inline(always)]
    pub fn marked_positions(&self) -> u8 {
        self.marked
    }

    #[inline(always)]
    pub fn in_bounds(&self, square: Square) -> bool {
        square.in_bounds()
    }

    /// Se não há dama nem flecha na casa. A casa tem de estar no tabuleiro.
    #[inline(always)]
    pub fn pos_free(&self, square: Square) -> bool {
        self.mark_at(square) == Cell::Empty
    }

    /// `in_bounds` e `pos_free` num só teste, para os deslizes.
    #[inline(always)]
    pub fn is_open(&self, square: Square) -> bool {
        square.in_bounds() && self.pos_free(square)
    }

    #[inline(always)]
    pub fn mark_at(&self, square: Square) -> Cell {
        self.grid[square.row as usize][square.col as usize]
    }

    #[inline(always)]
    pub fn queen_at(&self, role: Role, square: Square) -> bool {
        self.mark_at(square) == role.queen()
    }

    #[inline(always)]
    pub fn queens(&self, role: Role) -> &[Square; QUEENS_PER_SIDE] {
        &self.queens[role.index()]
    }

    /// Todas as casas com o respetivo conteúdo, em ordem row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        (0..NUM_SQUARES).map(move |index| {
            let square = Square::from_index(index);
            (square, self.mark_at(square))
        })
    }

    #[inline(always)]
    fn set(&mut self, square: Square, cell: Cell) {
        self.grid[square.row as usize][square.col as usize] = cell;
    }

    /// Executa um lance no próprio tabuleiro.
    /// A dama de `mv.role` tem de estar em `mv.origin`.
    pub fn apply(&mut self, mv: &Move) {
        let queens = &mut self.queens[mv.role.index()];
        let slot = queens.iter().position(|&queen| queen == mv.origin);
        debug_assert!(slot.is_some(), "no {} queen at {}", mv.role, mv.origin);
        if let Some(slot) = slot {
            queens[slot] = mv.destination;
        }

        self.set(mv.origin, Cell::Empty);
        self.set(mv.destination, mv.role.queen());
        self.set(mv.arrow, Cell::Arrow);

        self.marked += 1;
    }

    /// Desfaz o lance aplicado imediatamente antes (ordem LIFO).
    pub fn undo(&mut self, mv: &Move) {
        let queens = &mut self.queens[mv.role.index()];
        let slot = queens.iter().position(|&queen| queen == mv.destination);
        debug_assert!(slot.is_some(), "no {} queen at {}", mv.role, mv.destination);
        if let Some(slot) = slot {
            queens[slot] = mv.origin;
        }

        self.set(mv.destination, Cell::Empty);
        self.set(mv.arrow, Cell::Empty);
        self.set(mv.origin, mv.role.queen());

        self.marked -= 1;
    }

    /// Se nenhuma casa é alcançável pelos dois lados (territórios separados).
    pub fn is_enclosed(&self) -> bool {
        evaluation::is_enclosed(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
