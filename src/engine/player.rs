// Ficheiro: src/engine/player.rs
// Descrição: Sessão de jogo de um lado: mantém o tabuleiro, valida os lances
// do adversário e escolhe entre a busca minimax e a de um só agente.
// O transporte dos lances é responsabilidade de quem chama.

use crate::core::*;
use crate::engine::EngineConfig;
use crate::error::MoveError;
use crate::moves::validate;
use crate::search::{CutoffTest, MinimaxSearch, StateSpaceSearch};
use log::{info, warn};

pub struct Player {
    role: Role,
    board: Board,
    minimax: MinimaxSearch,
    state_space: StateSpaceSearch,
    end_game_turn: u8,
    enclosed: bool,
    my_turn: bool,
}

impl Player {
    pub fn new(role: Role, config: &EngineConfig) -> Self {
        let cutoff = CutoffTest::new(config.min_free_memory, config.search_time);
        Self::with_cutoff(role, config, cutoff)
    }

    pub fn with_cutoff(role: Role, config: &EngineConfig, cutoff: CutoffTest) -> Self {
        Self::from_board(role, config, cutoff, Board::new())
    }

    /// Sessão a partir de uma posição já jogada. As brancas jogam com um
    /// número par de flechas no tabuleiro.
    pub fn from_board(role: Role, config: &EngineConfig, cutoff: CutoffTest, board: Board) -> Self {
        let enclosed = board.is_enclosed();
        let white_to_move = board.marked_positions() % 2 == 0;
        // só a busca minimax herda a profundidade inicial
        let mut state_space = StateSpaceSearch::with_cutoff(config, cutoff.clone());
        state_space.set_cutoff_depth(1);
        Player {
            role,
            board,
            minimax: MinimaxSearch::with_cutoff(config, cutoff),
            state_space,
            end_game_turn: config.end_game_turn,
            enclosed,
            my_turn: white_to_move == (role == Role::White),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_enclosed(&self) -> bool {
        self.enclosed
    }

    pub fn is_my_turn(&self) -> bool {
        self.my_turn
    }

    pub fn minimax(&self) -> &MinimaxSearch {
        &self.minimax
    }

    pub fn state_space(&self) -> &StateSpaceSearch {
        &self.state_space
    }

    /// Valida e aplica o lance do adversário. Um erro aqui é fatal para a
    /// sessão: o tabuleiro fica intacto e cabe a quem chama terminar o jogo.
    pub fn handle_opponent_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let mv = Move { role: self.role.other(), ..mv };
        let checked = if self.my_turn {
            Err(MoveError::OutOfTurn(mv.role))
        } else {
            validate(&self.board, &mv)
        };
        if let Err(err) = checked {
            warn!("opponent made an invalid move {}: {}", mv, err);
            return Err(err);
        }
        self.board.apply(&mv);
        self.my_turn = true;
        Ok(())
    }

    /// Procura e aplica o nosso lance. `None` significa abandono.
    pub fn make_move(&mut self) -> Option<Move> {
        if self.board.marked_positions() == self.end_game_turn {
            info!("{} moves have passed, switching to the end game evaluation", self.end_game_turn);
            // a nova avaliação é mais cara: recomeçar as profundidades
            self.minimax.set_cutoff_depth(1);
            self.state_space.set_cutoff_depth(1);
        }

        // com todas as damas fechadas o jogo passa a ser de um só jogador
        let next = if self.enclosed {
            info!("board is enclosed, using state space search");
            self.state_space.decide(self.role, &self.board)
        } else {
            self.state_space.set_cutoff_depth(1);
            self.minimax.decide(self.role, self.role.other(), &self.board)
        };

        let Some(mv) = next else {
            warn!("{} has no moves left and resigns after {} arrows", self.role, self.board.marked_positions());
            return None;
        };

        info!("making move {}", mv);
        self.board.apply(&mv);
        self.my_turn = false;
        if self.board.marked_positions() == self.end_game_turn {
            self.minimax.set_cutoff_depth(1);
        }
        self.enclosed = self.board.is_enclosed();
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick_config() -> EngineConfig {
        EngineConfig {
            max_threads: 2,
            min_free_memory: 0,
            search_time: Duration::ZERO,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_invalid_opponent_move_leaves_board_untouched() {
        let mut player = Player::new(Role::Black, &quick_config());
        // a dama branca em (3,0) esbarra na preta em (6,0)
        let bogus = Move::new(Role::White, Square::new(3, 0), Square::new(7, 0), Square::new(8, 0));
        assert_eq!(
            player.handle_opponent_move(bogus),
            Err(MoveError::QueenPathBlocked(Square::new(6, 0)))
        );
        assert_eq!(player.board(), &Board::new());
        assert!(!player.is_my_turn());
    }

    #[test]
    fn test_opponent_role_is_forced() {
        let mut player = Player::new(Role::Black, &quick_config());
        // notação lida sem saber o lado: o jogador atribui-o
        let mv = Move::parse(Role::Black, "a3-a4/a5").unwrap();
        assert_eq!(player.handle_opponent_move(mv), Ok(()));
        assert!(player.board().queen_at(Role::White, Square::new(4, 0)));
        assert_eq!(player.board().marked_positions(), 1);
        assert!(player.is_my_turn());
    }

    #[test]
    fn test_opponent_cannot_move_twice() {
        // as brancas começam: um lance preto agora está fora de vez
        let mut white = Player::new(Role::White, &quick_config());
        assert!(white.is_my_turn());
        let early = Move::parse(Role::Black, "a6-a5/a4").unwrap();
        assert_eq!(white.handle_opponent_move(early), Err(MoveError::OutOfTurn(Role::Black)));
        assert_eq!(white.board(), &Board::new());

        let mut black = Player::new(Role::Black, &quick_config());
        let first = Move::parse(Role::White, "a3-a4/a5").unwrap();
        let second = Move::parse(Role::White, "j3-j4/j5").unwrap();
        assert_eq!(black.handle_opponent_move(first), Ok(()));
        assert_eq!(black.handle_opponent_move(second), Err(MoveError::OutOfTurn(Role::White)));
        assert_eq!(black.board().marked_positions(), 1);
    }

    #[test]
    fn test_turn_follows_arrow_parity() {
        let mut board = Board::new();
        board.apply(&Move::parse(Role::White, "a3-a4/a5").unwrap());

        let config = quick_config();
        let cutoff = CutoffTest::new(config.min_free_memory, config.search_time);
        assert!(Player::from_board(Role::Black, &config, cutoff.clone(), board.clone()).is_my_turn());
        assert!(!Player::from_board(Role::White, &config, cutoff, board).is_my_turn());
    }

    #[test]
    fn test_only_minimax_takes_initial_depth() {
        let config = EngineConfig { initial_depth: 3, ..quick_config() };
        let player = Player::new(Role::White, &config);
        assert_eq!(player.minimax().cutoff_depth(), 3);
        assert_eq!(player.state_space().cutoff_depth(), 1);
    }

    #[test]
    fn test_make_move_applies_it() {
        let config = EngineConfig { initial_depth: 3, ..quick_config() };
        let mut player = Player::new(Role::White, &config);
        let mv = player.make_move().expect("white has moves at the start");
        assert_eq!(mv.role, Role::White);
        assert!(player.board().queen_at(Role::White, mv.destination));
        assert_eq!(player.board().marked_positions(), 1);
        assert!(!player.is_my_turn());
        // primeira ronda cortada: a profundidade recua um
        assert_eq!(player.minimax().cutoff_depth(), 2);
        assert_eq!(player.state_space().cutoff_depth(), 1);
    }
}
