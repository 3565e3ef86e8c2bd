use super::player::Player;

pub const BOARD_SIZE: u8 = 4;

/// Number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Compass steps scanned by the flip rule, as `(d_row, d_col)`.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Pieces on the board when a game starts.
pub const INITIAL_PIECES: [(usize, usize, Player); 4] = [
    (1, 1, Player::White),
    (1, 2, Player::Black),
    (2, 1, Player::Black),
    (2, 2, Player::White),
];

/// Side that moves first.
pub const FIRST_PLAYER: Player = Player::Black;
