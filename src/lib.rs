//! Checkers AI Engine
//!
//! 8x8 跳棋引擎 - 走法生成、强制吃子、连跳、升王、胜负判定和 AI 对手

pub mod ai;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod test_positions;
pub mod types;

pub use ai::{
    evaluate_board, get_ai_move, minimax, AIConfig, AIEngine, AIStrategy, MinimaxAI, RandomAI,
    ScoredMove, WIN_SCORE,
};
pub use board::{create_initial_board, Board, Piece};
pub use error::{CheckersError, CheckersResult};
pub use fen::{apply_move_to_fen, get_legal_moves_from_fen, parse_fen, FenState, INITIAL_FEN};
pub use game::{ClickOutcome, GameMode, GameSession};
pub use types::{is_valid_position, Color, Difficulty, Move, Position, Rank, BOARD_SIZE};
