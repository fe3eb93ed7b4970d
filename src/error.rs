//! 错误类型
//!
//! 规则引擎本身不报错（非法输入返回空集合或原样棋盘），
//! 这里的错误只用于记谱解析、对局会话和命令行等外层接口。

use thiserror::Error;

use crate::types::{Color, Position};

/// 外层接口的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    /// 局面记谱格式错误
    #[error("Invalid board notation: {0}")]
    InvalidNotation(String),

    /// 坐标在棋盘外
    #[error("Square {0} is off the board")]
    OffBoard(Position),

    /// 棋子放在了浅色格上
    #[error("Piece on light square {0}")]
    PieceOnLightSquare(Position),

    /// 走法字符串无法解析
    #[error("Invalid move string: {0}")]
    InvalidMove(String),

    /// 走法不在当前合法走法中
    #[error("Illegal move for {color}: {mv}")]
    IllegalMove { mv: String, color: Color },

    /// 起点没有棋子
    #[error("No piece at {0}")]
    NoPieceAt(Position),

    /// 选中了对方的棋子
    #[error("Piece at {pos} belongs to {owner}, not {expected}")]
    NotYourPiece {
        pos: Position,
        owner: Color,
        expected: Color,
    },

    /// 选中的棋子没有合法走法
    #[error("Piece at {0} has no legal moves")]
    NoLegalMoves(Position),

    /// 对局已经结束
    #[error("Game is over, {winner} won")]
    GameOver { winner: Color },

    /// 未知难度
    #[error("Unknown difficulty: {0}. Available: easy, medium, hard")]
    UnknownDifficulty(String),
}

/// 外层接口的 Result 别名
pub type CheckersResult<T> = Result<T, CheckersError>;
