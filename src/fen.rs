//! 局面记谱解析和生成
//!
//! 格式: `<棋盘> <回合>`
//!
//! 棋盘从 row 0 到 row 7，行之间用 `/` 分隔：
//! - 深色方：d(兵) D(王)
//! - 浅色方：l(兵) L(王)
//! - 空格：数字 (1-8)
//!
//! 回合：`l` 浅色方行棋，`d` 深色方行棋

use crate::board::{Board, Piece};
use crate::error::{CheckersError, CheckersResult};
use crate::types::{Color, Move, Position, Rank, BOARD_SIZE};

/// 初始局面
pub const INITIAL_FEN: &str = "1d1d1d1d/d1d1d1d1/1d1d1d1d/8/8/l1l1l1l1/1l1l1l1l/l1l1l1l1 l";

/// 解析后的局面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenState {
    pub board: Board,
    pub turn: Color,
}

impl FenState {
    /// 生成记谱字符串
    pub fn to_fen(&self) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE as usize);

        for row in 0..BOARD_SIZE {
            let mut row_str = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE {
                match self.board.get_piece(Position::new(row, col)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            row_str.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        row_str.push(piece_to_char(piece));
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                row_str.push_str(&empty_count.to_string());
            }
            rows.push(row_str);
        }

        format!("{} {}", rows.join("/"), self.turn.to_fen_char())
    }
}

/// 棋子对应的记谱字符
pub fn piece_to_char(piece: &Piece) -> char {
    let ch = piece.color.to_fen_char();
    match piece.rank {
        Rank::Man => ch,
        Rank::King => ch.to_ascii_uppercase(),
    }
}

/// 解析记谱字符串
pub fn parse_fen(fen: &str) -> CheckersResult<FenState> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(CheckersError::InvalidNotation(format!(
            "expected '<board> <turn>', got: {}",
            fen
        )));
    }

    let board = parse_board(parts[0])?;

    let mut turn_chars = parts[1].chars();
    let turn = match (turn_chars.next().and_then(Color::from_fen_char), turn_chars.next()) {
        (Some(color), None) => color,
        _ => {
            return Err(CheckersError::InvalidNotation(format!(
                "invalid turn: {}",
                parts[1]
            )))
        }
    };

    Ok(FenState { board, turn })
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> CheckersResult<Board> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(CheckersError::InvalidNotation(format!(
            "expected {} rows, got {}",
            BOARD_SIZE,
            rows.len()
        )));
    }

    let mut board = Board::empty();

    for (row_idx, row_str) in rows.iter().enumerate() {
        let row = row_idx as i8;
        let mut col: i8 = 0;

        for ch in row_str.chars() {
            if col >= BOARD_SIZE {
                return Err(CheckersError::InvalidNotation(format!(
                    "row {} is longer than {} squares",
                    row, BOARD_SIZE
                )));
            }

            if let Some(skip) = ch.to_digit(10) {
                if skip == 0 || skip > BOARD_SIZE as u32 {
                    return Err(CheckersError::InvalidNotation(format!(
                        "invalid empty count '{}' in row {}",
                        ch, row
                    )));
                }
                col += skip as i8;
                continue;
            }

            let color = Color::from_fen_char(ch.to_ascii_lowercase()).ok_or_else(|| {
                CheckersError::InvalidNotation(format!("invalid character in board: {}", ch))
            })?;
            let rank = if ch.is_ascii_uppercase() {
                Rank::King
            } else {
                Rank::Man
            };

            let pos = Position::new(row, col);
            if !pos.is_dark_square() {
                return Err(CheckersError::PieceOnLightSquare(pos));
            }
            board.set_piece(Piece::new(color, rank, pos));
            col += 1;
        }

        if col != BOARD_SIZE {
            return Err(CheckersError::InvalidNotation(format!(
                "row {} has {} columns, expected {}",
                row, col, BOARD_SIZE
            )));
        }
    }

    Ok(board)
}

/// 在记谱局面上执行走法，返回新的记谱字符串
///
/// 走法必须是行棋方的合法走法（含全局强制吃子）。
pub fn apply_move_to_fen(fen: &str, move_str: &str) -> CheckersResult<String> {
    let state = parse_fen(fen)?;
    let requested = Move::from_fen_str(move_str)
        .ok_or_else(|| CheckersError::InvalidMove(move_str.to_string()))?;

    match state.board.get_piece(requested.from) {
        None => return Err(CheckersError::NoPieceAt(requested.from)),
        Some(piece) if piece.color != state.turn => {
            return Err(CheckersError::NotYourPiece {
                pos: requested.from,
                owner: piece.color,
                expected: state.turn,
            })
        }
        Some(_) => {}
    }

    let mv = state
        .board
        .get_legal_moves(state.turn)
        .into_iter()
        .find(|m| *m == requested)
        .ok_or_else(|| CheckersError::IllegalMove {
            mv: move_str.to_string(),
            color: state.turn,
        })?;

    Ok(FenState {
        board: state.board.apply_move(&mv),
        turn: state.turn.opposite(),
    }
    .to_fen())
}

/// 从记谱获取行棋方的所有合法走法
pub fn get_legal_moves_from_fen(fen: &str) -> CheckersResult<Vec<String>> {
    let state = parse_fen(fen)?;
    Ok(state.board.get_legal_moves_str(state.turn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_initial_fen() {
        let state = parse_fen(INITIAL_FEN).unwrap();
        assert_eq!(state.board, Board::initial());
        assert_eq!(state.turn, Color::Light);
    }

    #[test]
    fn test_fen_roundtrip() {
        let fen = "8/2L5/8/d1d5/8/4l3/8/D7 d";
        let state = parse_fen(fen).unwrap();
        assert_eq!(state.to_fen(), fen);
        assert_eq!(Board::initial().to_fen(Color::Light), INITIAL_FEN);
    }

    #[test]
    fn test_parse_kings() {
        let state = parse_fen("8/2L5/8/8/8/8/8/D7 d").unwrap();
        let light = state.board.get_piece(Position::new(1, 2)).unwrap();
        assert_eq!(light.color, Color::Light);
        assert_eq!(light.rank, Rank::King);
        let dark = state.board.get_piece(Position::new(7, 0)).unwrap();
        assert_eq!(dark.color, Color::Dark);
        assert_eq!(dark.rank, Rank::King);
        assert_eq!(state.turn, Color::Dark);
    }

    #[test]
    fn test_reject_bad_fen() {
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8 l"),
            Err(CheckersError::InvalidNotation(_))
        ));
        assert!(matches!(
            parse_fen("d7/8/8/8/8/8/8/8 l"),
            Err(CheckersError::PieceOnLightSquare(_))
        ));
        assert!(parse_fen("8/8/8/8/8/8/8/9 l").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/7 l").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 x").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8").is_err());
        assert!(parse_fen("1q6/8/8/8/8/8/8/8 l").is_err());
    }

    #[test]
    fn test_apply_move() {
        let new_fen = apply_move_to_fen(INITIAL_FEN, "a5b4").unwrap();
        assert_eq!(
            new_fen,
            "1d1d1d1d/d1d1d1d1/1d1d1d1d/8/1l6/2l1l1l1/1l1l1l1l/l1l1l1l1 d"
        );
    }

    #[test]
    fn test_apply_move_errors() {
        assert!(matches!(
            apply_move_to_fen(INITIAL_FEN, "b2a3"),
            Err(CheckersError::NotYourPiece { .. })
        ));
        assert!(matches!(
            apply_move_to_fen(INITIAL_FEN, "b4c3"),
            Err(CheckersError::NoPieceAt(_))
        ));
        assert!(matches!(
            apply_move_to_fen(INITIAL_FEN, "a5a4"),
            Err(CheckersError::IllegalMove { .. })
        ));
        assert!(matches!(
            apply_move_to_fen(INITIAL_FEN, "nonsense"),
            Err(CheckersError::InvalidMove(_))
        ));
    }

    #[test]
    fn test_apply_forced_capture() {
        // 深色兵 c3 可以吃 d4（浅色兵），不能走普通步
        let fen = "8/8/8/2d5/3l4/8/8/8 d";
        assert!(matches!(
            apply_move_to_fen(fen, "c3b4"),
            Err(CheckersError::IllegalMove { .. })
        ));
        let new_fen = apply_move_to_fen(fen, "c3xe5").unwrap();
        assert_eq!(new_fen, "8/8/8/8/8/4d3/8/8 l");
    }

    #[test]
    fn test_legal_moves_from_fen() {
        let moves = get_legal_moves_from_fen(INITIAL_FEN).unwrap();
        assert_eq!(moves.len(), 7);
        assert!(moves.contains(&"a5b4".to_string()));
    }
}
