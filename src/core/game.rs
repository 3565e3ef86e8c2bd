use alloc::vec::Vec;

use crate::core::{
    board::{Board, Cell, Position},
    common::{CellMask, MoveError, MoveOutcome},
    config::{DIRECTIONS, FIRST_PLAYER},
    player::Player,
};

/// Piece counts for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Scores {
    pub black: usize,
    pub white: usize,
}

/// Externally observable game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: Board,
    pub current_turn: Player,
    pub game_over: bool,
    pub black_score: usize,
    pub white_score: usize,
}

impl GameSnapshot {
    /// Side ahead on pieces, `None` on a tie.
    pub fn leader(&self) -> Option<Player> {
        leader(self.black_score, self.white_score)
    }
}

fn leader(black: usize, white: usize) -> Option<Player> {
    use core::cmp::Ordering;
    match black.cmp(&white) {
        Ordering::Greater => Some(Player::Black),
        Ordering::Less => Some(Player::White),
        Ordering::Equal => None,
    }
}

/// Rules engine for one game: owns the board and decides turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    current_turn: Player,
    game_over: bool,
}

impl GameEngine {
    /// Start a game from the opening position with Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: FIRST_PLAYER,
            game_over: false,
        }
    }

    /// Continue a game from an arbitrary position.
    ///
    /// If `to_move` has no legal move the turn passes to the other side, and
    /// if neither side can move the game is over.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut engine = Self {
            board,
            current_turn: to_move,
            game_over: false,
        };
        if engine.legal_moves(to_move).is_empty() {
            if engine.legal_moves(to_move.opponent()).is_empty() {
                engine.game_over = true;
            } else {
                engine.current_turn = to_move.opponent();
            }
        }
        engine
    }

    /// Rebuild an engine from an observed snapshot. Scores and game-over are
    /// recomputed from the board rather than trusted.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Self {
        Self::from_board(snapshot.board, snapshot.current_turn)
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Piece counts, always taken from the board.
    pub fn scores(&self) -> Scores {
        Scores {
            black: self.board.count(Player::Black),
            white: self.board.count(Player::White),
        }
    }

    /// Side with more pieces, `None` on a tie.
    pub fn winner(&self) -> Option<Player> {
        let scores = self.scores();
        leader(scores.black, scores.white)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let scores = self.scores();
        GameSnapshot {
            board: self.board,
            current_turn: self.current_turn,
            game_over: self.game_over,
            black_score: scores.black,
            white_score: scores.white,
        }
    }

    /// Legal targets for the side to move, row-major.
    pub fn valid_moves(&self) -> Vec<Position> {
        self.legal_moves(self.current_turn)
            .iter_set_bits()
            .map(Position::from)
            .collect()
    }

    /// Whether `pos` is a legal target for the side to move.
    pub fn is_valid_move(&self, pos: Position) -> bool {
        !self.flips(pos, self.current_turn).is_empty()
    }

    /// Mask of legal targets for `player` on the current board.
    pub fn legal_moves(&self, player: Player) -> CellMask {
        let mut mask = CellMask::new();
        for pos in Board::positions() {
            if !self.flips(pos, player).is_empty() {
                // positions() stays on the board
                let _ = mask.set(pos.row, pos.col);
            }
        }
        mask
    }

    /// Play `pos` for the side to move. Returns `false` and changes nothing
    /// when the move is illegal.
    pub fn make_move(&mut self, pos: Position) -> bool {
        self.try_move(pos).is_ok()
    }

    /// Play `pos` for the side to move, reporting why an illegal move was
    /// refused.
    pub fn try_move(&mut self, pos: Position) -> Result<MoveOutcome, MoveError> {
        let Position { row, col } = pos;
        match self.board.get(pos) {
            None => return Err(MoveError::OutOfBounds { row, col }),
            Some(Cell::Empty) => {}
            Some(_) => return Err(MoveError::Occupied { row, col }),
        }
        let mover = self.current_turn;
        let flipped = self.flips(pos, mover);
        if flipped.is_empty() {
            return Err(MoveError::NoFlips { row, col });
        }

        self.board.set(pos, Cell::from(mover));
        for cell in flipped.iter_set_bits() {
            self.board.set(Position::from(cell), Cell::from(mover));
        }

        self.current_turn = mover.opponent();
        let opponent_skipped = self.resolve_turn(mover);
        Ok(MoveOutcome {
            mover,
            flipped,
            opponent_skipped,
            game_over: self.game_over,
        })
    }

    /// Decide who moves next after `mover` played. Returns `true` when the
    /// opponent had to pass.
    fn resolve_turn(&mut self, mover: Player) -> bool {
        if !self.legal_moves(self.current_turn).is_empty() {
            return false;
        }
        if self.legal_moves(mover).is_empty() {
            self.game_over = true;
            false
        } else {
            self.current_turn = mover;
            true
        }
    }

    /// Every opponent piece `player` would flip by playing `pos`. Empty when
    /// the move is illegal.
    fn flips(&self, pos: Position, player: Player) -> CellMask {
        if self.board.get(pos) != Some(Cell::Empty) {
            return CellMask::new();
        }
        DIRECTIONS
            .iter()
            .fold(CellMask::new(), |acc, &dir| acc | self.run(pos, dir, player))
    }

    /// Opponent run flanked by `player` starting next to `pos` along `dir`.
    fn run(&self, pos: Position, dir: (isize, isize), player: Player) -> CellMask {
        let mine = Cell::from(player);
        let theirs = Cell::from(player.opponent());
        let mut run = CellMask::new();
        let mut cursor = pos;
        while let Some(next) = cursor.step(dir) {
            match self.board.get(next) {
                Some(cell) if cell == theirs => {
                    let _ = run.set(next.row, next.col);
                    cursor = next;
                }
                Some(cell) if cell == mine => return run,
                _ => break,
            }
        }
        CellMask::new()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
#[async_trait::async_trait]
impl crate::protocol::GameApi for GameEngine {
    async fn new_game(&mut self) -> anyhow::Result<GameSnapshot> {
        *self = GameEngine::new();
        Ok(self.snapshot())
    }

    async fn get_board_state(&mut self) -> anyhow::Result<GameSnapshot> {
        Ok(self.snapshot())
    }

    async fn get_valid_moves(&mut self) -> anyhow::Result<Vec<Position>> {
        Ok(self.valid_moves())
    }

    async fn make_move(&mut self, position: Position) -> anyhow::Result<GameSnapshot> {
        self.try_move(position)?;
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_initial_state() {
        let game = GameEngine::new();
        let state = game.snapshot();
        assert_eq!(state.current_turn, Player::Black);
        assert_eq!(state.black_score, 2);
        assert_eq!(state.white_score, 2);
        assert!(!state.game_over);
        assert_eq!(state.board, Board::new());
    }

    #[test]
    fn test_opening_moves() {
        let game = GameEngine::new();
        assert_eq!(
            game.valid_moves(),
            vec![p(0, 1), p(1, 0), p(2, 3), p(3, 2)]
        );
    }

    #[test]
    fn test_flip_single_run() {
        let mut game = GameEngine::new();
        let outcome = game.try_move(p(1, 0)).unwrap();
        assert_eq!(outcome.mover, Player::Black);
        assert_eq!(outcome.flipped.iter_set_bits().collect::<Vec<_>>(), vec![(1, 1)]);
        assert!(!outcome.opponent_skipped);
        assert_eq!(game.board().get(p(1, 1)), Some(Cell::Black));
        assert_eq!(game.current_turn(), Player::White);
        assert_eq!(game.scores(), Scores { black: 4, white: 1 });
    }

    #[test]
    fn test_flip_multiple_directions() {
        // B plays (0,1), W plays (0,2), then B at (2,3) flips along
        // the west run and the north-west diagonal at once.
        let mut game = GameEngine::new();
        assert!(game.make_move(p(0, 1)));
        assert!(game.make_move(p(0, 2)));
        let outcome = game.try_move(p(2, 3)).unwrap();
        assert_eq!(
            outcome.flipped.iter_set_bits().collect::<Vec<_>>(),
            vec![(1, 2), (2, 2)]
        );
        assert_eq!(game.scores(), Scores { black: 6, white: 1 });
    }

    #[test]
    fn test_rejections_in_order() {
        let mut game = GameEngine::new();
        assert_eq!(
            game.try_move(p(4, 1)),
            Err(MoveError::OutOfBounds { row: 4, col: 1 })
        );
        assert_eq!(
            game.try_move(p(1, 1)),
            Err(MoveError::Occupied { row: 1, col: 1 })
        );
        assert_eq!(
            game.try_move(p(0, 0)),
            Err(MoveError::NoFlips { row: 0, col: 0 })
        );
        assert_eq!(game, GameEngine::new());
    }

    #[test]
    fn test_run_needs_closing_piece() {
        // White run on row 0 reaches the edge without a Black piece behind it.
        let board = Board::from_rows([
            [Cell::Empty, Cell::White, Cell::White, Cell::White],
            [Cell::Empty, Cell::Black, Cell::Empty, Cell::Empty],
            [Cell::Empty; 4],
            [Cell::Empty; 4],
        ]);
        let game = GameEngine::from_board(board, Player::Black);
        assert!(game.legal_moves(Player::Black).is_empty());
        assert_eq!(game.current_turn(), Player::White);
    }

    #[test]
    fn test_from_board_passes_stuck_side() {
        let board = Board::from_rows([
            [Cell::White, Cell::White, Cell::White, Cell::Empty],
            [Cell::Empty, Cell::Black, Cell::Black, Cell::Empty],
            [Cell::Empty, Cell::Black, Cell::Black, Cell::Black],
            [Cell::Empty; 4],
        ]);
        let game = GameEngine::from_board(board, Player::Black);
        assert_eq!(game.current_turn(), Player::White);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_from_board_game_over() {
        let board = Board::from_rows([
            [Cell::Black, Cell::Black, Cell::Empty, Cell::Empty],
            [Cell::Black, Cell::Empty, Cell::Empty, Cell::Empty],
            [Cell::Empty; 4],
            [Cell::Empty; 4],
        ]);
        let game = GameEngine::from_board(board, Player::White);
        assert!(game.is_game_over());
        assert!(game.valid_moves().is_empty());
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn test_winner_tie() {
        let game = GameEngine::new();
        assert_eq!(game.winner(), None);
        assert_eq!(game.snapshot().leader(), None);
    }
}
