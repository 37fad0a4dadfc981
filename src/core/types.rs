// Ficheiro: src/core/types.rs
// Descrição: Módulo para as definições de tipos de dados fundamentais do jogo.

use crate::error::ParseMoveError;
use std::fmt;

// Um Bitboard de 128 bits: cada bit representa uma casa do tabuleiro 10x10.
// Bit 0 = (0,0), Bit 1 = (0,1), ..., Bit 99 = (9,9).
pub type Bitboard = u128;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const QUEENS_PER_SIDE: usize = 4;

/// As 8 direções de deslize de uma dama: 4 diagonais e 4 ortogonais.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 1), (-1, 1), (1, -1), (-1, -1),
    (0, 1), (0, -1), (1, 0), (-1, 0),
];

// Enum para representar o lado de um jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    White,
    Black,
}

impl Role {
    /// O lado adversário. White -> Black e Black -> White.
    #[inline(always)]
    pub fn other(self) -> Role {
        match self {
            Role::White => Role::Black,
            Role::Black => Role::White,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Role::White => 0,
            Role::Black => 1,
        }
    }

    /// Marcador de dama deste lado no tabuleiro.
    #[inline(always)]
    pub fn queen(self) -> Cell {
        match self {
            Role::White => Cell::WhiteQueen,
            Role::Black => Cell::BlackQueen,
        }
    }
}

impl std::ops::Not for Role {
    type Output = Role;

    fn not(self) -> Self::Output {
        self.other()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::White => write!(f, "W"),
            Role::Black => write!(f, "B"),
        }
    }
}

// Conteúdo de uma casa do tabuleiro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    WhiteQueen,
    BlackQueen,
    Arrow,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::WhiteQueen => 'W',
            Cell::BlackQueen => 'B',
            Cell::Arrow => 'X',
        }
    }

    pub fn from_glyph(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            'W' => Some(Cell::WhiteQueen),
            'B' => Some(Cell::BlackQueen),
            'X' => Some(Cell::Arrow),
            _ => None,
        }
    }
}

/// Coordenada (linha, coluna). Com sinal para que os passos de deslize
/// possam sair do tabuleiro antes do teste de limites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline(always)]
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    #[inline(always)]
    pub fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE as i8 && self.col >= 0 && self.col < BOARD_SIZE as i8
    }

    /// Índice row-major. Só faz sentido para casas dentro do tabuleiro.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline(always)]
    pub fn bit(self) -> Bitboard {
        1u128 << self.index()
    }

    #[inline(always)]
    pub fn step(self, (dr, dc): (i8, i8)) -> Square {
        Square::new(self.row + dr, self.col + dc)
    }

    pub fn from_index(index: usize) -> Square {
        Square::new((index / BOARD_SIZE) as i8, (index % BOARD_SIZE) as i8)
    }

    fn parse(text: &str) -> Option<Square> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?.to_digit(10)?;
        if chars.next().is_some() || !('a'..='j').contains(&file) {
            return None;
        }
        Some(Square::new(rank as i8, (file as u8 - b'a') as i8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row)
    }
}

/// Um lance completo: deslize da dama seguido do disparo da flecha.
///
/// `score` serve apenas para ordenar candidatos e não faz parte da
/// identidade do lance.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub role: Role,
    pub origin: Square,
    pub destination: Square,
    pub arrow: Square,
    pub score: i32,
}

impl Move {
    pub fn new(role: Role, origin: Square, destination: Square, arrow: Square) -> Self {
        Move { role, origin, destination, arrow, score: 0 }
    }

    /// Lê a notação `d0-d4/d5` (coluna a..j, linha 0..9).
    pub fn parse(role: Role, text: &str) -> Result<Move, ParseMoveError> {
        let text = text.trim();
        let (queen, arrow) = text
            .split_once('/')
            .ok_or_else(|| ParseMoveError::MissingArrow(text.to_string()))?;
        let (origin, destination) = queen
            .split_once('-')
            .ok_or_else(|| ParseMoveError::MissingDestination(text.to_string()))?;

        let square = |part: &str| {
            Square::parse(part).ok_or_else(|| ParseMoveError::InvalidSquare(part.to_string()))
        };

        Ok(Move::new(role, square(origin)?, square(destination)?, square(arrow)?))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role
            && self.origin == other.origin
            && self.destination == other.destination
            && self.arrow == other.arrow
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}/{}", self.origin, self.destination, self.arrow)
    }
}

/// Par (valor, lance) produzido por um ramo da busca.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Move,
}

impl SearchResult {
    pub fn new(score: i32, best_move: Move) -> Self {
        SearchResult { score, best_move }
    }

    /// Mantém o operando de valor estritamente maior; no empate fica o primeiro.
    pub fn max(self, other: SearchResult) -> SearchResult {
        if other.score > self.score { other } else { self }
    }

    /// Versão de `max` que aceita um acumulador ainda vazio.
    pub fn combine(best: Option<SearchResult>, other: SearchResult) -> Option<SearchResult> {
        Some(match best {
            Some(best) => best.max(other),
            None => other,
        })
    }
}
