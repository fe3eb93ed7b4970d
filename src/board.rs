//! 跳棋棋盘
//!
//! 棋盘按值传递：`apply_move` 总是返回新棋盘，输入棋盘保持不变。
//! 走法生成见 `movegen` 模块。

use std::fmt;

use crate::fen::FenState;
use crate::types::{Color, Move, Position, Rank, BOARD_SIZE};

const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// 棋子
///
/// `position` 始终等于它所在格子的坐标，移动时由棋盘负责改写。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
    pub position: Position,
}

impl Piece {
    pub fn new(color: Color, rank: Rank, position: Position) -> Self {
        Piece {
            color,
            rank,
            position,
        }
    }

    pub fn man(color: Color, position: Position) -> Self {
        Piece::new(color, Rank::Man, position)
    }

    pub fn king(color: Color, position: Position) -> Self {
        Piece::new(color, Rank::King, position)
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }
}

/// 8×8 棋盘
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Board {
        Board {
            squares: [None; SQUARE_COUNT],
        }
    }

    /// 初始局面：深色兵占 row 0-2 的深色格，浅色兵占 row 5-7 的深色格
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let color = match row {
                0..=2 => Color::Dark,
                5..=7 => Color::Light,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if pos.is_dark_square() {
                    board.set_piece(Piece::man(color, pos));
                }
            }
        }
        board
    }

    /// 生成记谱字符串
    pub fn to_fen(&self, turn: Color) -> String {
        FenState {
            board: self.clone(),
            turn,
        }
        .to_fen()
    }

    /// 获取某位置的棋子
    #[inline]
    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()].as_ref()
    }

    /// 检查位置是否为空（棋盘外视为不可落子）
    #[inline]
    pub fn is_empty_square(&self, pos: Position) -> bool {
        pos.is_valid() && self.squares[pos.to_index()].is_none()
    }

    /// 在棋子自身的 `position` 上放置棋子，返回原来的占用者
    pub fn set_piece(&mut self, piece: Piece) -> Option<Piece> {
        if !piece.position.is_valid() {
            return None;
        }
        self.squares[piece.position.to_index()].replace(piece)
    }

    /// 移除某位置的棋子
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()].take()
    }

    /// 获取所有棋子（按行优先顺序）
    pub fn get_all_pieces(&self, color: Option<Color>) -> Vec<&Piece> {
        self.squares
            .iter()
            .filter_map(|p| p.as_ref())
            .filter(|p| color.map_or(true, |c| p.color == c))
            .collect()
    }

    /// 某方剩余棋子数
    pub fn count(&self, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|p| p.color == color)
            .count()
    }

    /// 执行走法，返回新棋盘
    ///
    /// 移除所有被吃子，把棋子移到 `to` 并改写其位置，到达对方底线的兵升变为王。
    /// 起点没有棋子时原样返回副本。
    pub fn apply_move(&self, mv: &Move) -> Board {
        let mut next = self.clone();

        let mut piece = match next.remove_piece(mv.from) {
            Some(p) => p,
            None => return next,
        };

        for &pos in &mv.captured {
            next.remove_piece(pos);
        }

        piece.position = mv.to;
        if mv.to.row == piece.color.promotion_row() {
            piece.rank = Rank::King;
        }
        next.set_piece(piece);

        next
    }

    /// 判断胜负
    ///
    /// 一方没有棋子即负；否则 `current_player`（即将行棋的一方）没有任何走法也判负。
    /// 这里检查的是原始走法，不考虑全局强制吃子。
    pub fn check_winner(&self, current_player: Color) -> Option<Color> {
        if self.count(Color::Light) == 0 {
            return Some(Color::Dark);
        }
        if self.count(Color::Dark) == 0 {
            return Some(Color::Light);
        }

        let has_moves = self
            .get_all_pieces(Some(current_player))
            .into_iter()
            .any(|piece| !self.get_valid_moves(piece, false).is_empty());

        if has_moves {
            None
        } else {
            Some(current_player.opposite())
        }
    }
}

/// 创建初始棋盘
pub fn create_initial_board() -> Board {
    Board::initial()
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen(Color::Light))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{} ", row)?;
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                let ch = match self.get_piece(pos) {
                    Some(p) => crate::fen::piece_to_char(p),
                    None if pos.is_dark_square() => '.',
                    None => ' ',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = create_initial_board();

        assert_eq!(board.count(Color::Light), 12);
        assert_eq!(board.count(Color::Dark), 12);

        for piece in board.get_all_pieces(None) {
            assert!(piece.position.is_dark_square());
            assert_eq!(piece.rank, Rank::Man);
            assert_eq!(board.get_piece(piece.position), Some(piece));
        }

        for piece in board.get_all_pieces(Some(Color::Dark)) {
            assert!((0..=2).contains(&piece.position.row));
        }
        for piece in board.get_all_pieces(Some(Color::Light)) {
            assert!((5..=7).contains(&piece.position.row));
        }
    }

    #[test]
    fn test_apply_quiet_move() {
        let board = Board::initial();
        let mv = Move::quiet(Position::new(5, 0), Position::new(4, 1));
        let next = board.apply_move(&mv);

        assert!(next.get_piece(Position::new(5, 0)).is_none());
        let moved = next.get_piece(Position::new(4, 1)).unwrap();
        assert_eq!(moved.color, Color::Light);
        assert_eq!(moved.rank, Rank::Man);
        assert_eq!(moved.position, Position::new(4, 1));
        assert_eq!(next.check_winner(Color::Dark), None);

        // 输入棋盘不变
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_apply_capture_removes_pieces() {
        let mut board = Board::empty();
        board.set_piece(Piece::man(Color::Dark, Position::new(3, 3)));
        board.set_piece(Piece::man(Color::Light, Position::new(2, 2)));
        board.set_piece(Piece::man(Color::Light, Position::new(6, 6)));

        let mv = Move::capture(
            Position::new(3, 3),
            Position::new(1, 1),
            vec![Position::new(2, 2)],
        );
        let next = board.apply_move(&mv);

        assert!(next.get_piece(Position::new(2, 2)).is_none());
        assert!(next.get_piece(Position::new(3, 3)).is_none());
        assert_eq!(next.count(Color::Light), 1);
        assert_eq!(board.count(Color::Light), 2);
    }

    #[test]
    fn test_promotion() {
        let mut board = Board::empty();
        board.set_piece(Piece::man(Color::Light, Position::new(1, 2)));
        board.set_piece(Piece::man(Color::Dark, Position::new(6, 3)));

        let next = board.apply_move(&Move::quiet(Position::new(1, 2), Position::new(0, 1)));
        assert_eq!(next.get_piece(Position::new(0, 1)).unwrap().rank, Rank::King);

        let next = next.apply_move(&Move::quiet(Position::new(6, 3), Position::new(7, 4)));
        assert_eq!(next.get_piece(Position::new(7, 4)).unwrap().rank, Rank::King);

        // 未到底线不升变
        let next = board.apply_move(&Move::quiet(Position::new(6, 3), Position::new(5, 4)));
        assert_eq!(next.get_piece(Position::new(5, 4)).unwrap().rank, Rank::Man);
    }

    #[test]
    fn test_apply_from_empty_square_is_noop() {
        let board = Board::initial();
        let mv = Move::quiet(Position::new(4, 1), Position::new(3, 2));
        assert_eq!(board.apply_move(&mv), board);
    }

    #[test]
    fn test_winner_no_pieces() {
        let mut board = Board::empty();
        board.set_piece(Piece::man(Color::Light, Position::new(5, 0)));
        assert_eq!(board.check_winner(Color::Light), Some(Color::Light));
        assert_eq!(board.check_winner(Color::Dark), Some(Color::Light));

        let mut board = Board::empty();
        board.set_piece(Piece::king(Color::Dark, Position::new(3, 4)));
        assert_eq!(board.check_winner(Color::Light), Some(Color::Dark));
        assert_eq!(board.check_winner(Color::Dark), Some(Color::Dark));
    }

    #[test]
    fn test_winner_blocked_side() {
        // 浅色兵在 a7 被堵死：b6 有深色兵，c5 也被占
        let mut board = Board::empty();
        board.set_piece(Piece::man(Color::Light, Position::new(7, 0)));
        board.set_piece(Piece::man(Color::Dark, Position::new(6, 1)));
        board.set_piece(Piece::man(Color::Dark, Position::new(5, 2)));

        assert_eq!(board.check_winner(Color::Light), Some(Color::Dark));
        // 深色方还能走
        assert_eq!(board.check_winner(Color::Dark), None);
    }

    #[test]
    fn test_display_marks_pieces() {
        let text = Board::initial().to_string();
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains('d'));
        assert!(text.contains('l'));
    }
}
