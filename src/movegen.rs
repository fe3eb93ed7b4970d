//! 走法生成
//!
//! - 单个棋子有吃子时只能吃子（与 `must_capture` 无关）
//! - 连跳在假想棋盘上递归展开，被吃子先移除，不会重复吃
//! - 兵只能向前走，但四个斜向都能吃；王四向均可
//! - 全局强制吃子（己方任一棋子能吃则必须吃）由调用方通过 `must_capture` 传入

use crate::board::{Board, Piece};
use crate::types::{Color, Move, Position};

const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const LIGHT_STEP_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const DARK_STEP_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const LIGHT_CAPTURE_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const DARK_CAPTURE_DIRECTIONS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

/// 普通走法的方向
fn step_directions(piece: &Piece) -> &'static [(i8, i8)] {
    if piece.is_king() {
        return &KING_DIRECTIONS;
    }
    match piece.color {
        Color::Light => &LIGHT_STEP_DIRECTIONS,
        Color::Dark => &DARK_STEP_DIRECTIONS,
    }
}

/// 吃子方向（兵也能向后吃）
fn capture_directions(piece: &Piece) -> &'static [(i8, i8); 4] {
    if piece.is_king() {
        return &KING_DIRECTIONS;
    }
    match piece.color {
        Color::Light => &LIGHT_CAPTURE_DIRECTIONS,
        Color::Dark => &DARK_CAPTURE_DIRECTIONS,
    }
}

impl Board {
    /// 获取单个棋子的合法走法
    ///
    /// 有吃子时返回全部吃子走法；否则 `must_capture` 为真（己方其他棋子能吃）时返回空，
    /// 为假时返回普通走法。
    pub fn get_valid_moves(&self, piece: &Piece, must_capture: bool) -> Vec<Move> {
        let captures = self.get_capture_moves(piece);
        if !captures.is_empty() {
            return captures;
        }
        if must_capture {
            return Vec::new();
        }

        let from = piece.position;
        step_directions(piece)
            .iter()
            .map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|&to| self.is_empty_square(to))
            .map(|to| Move::quiet(from, to))
            .collect()
    }

    /// 获取单个棋子的全部吃子走法
    ///
    /// 穷举吃子树上的每一条路径，每个终点都是一个独立的候选走法（不只是最长的一条）。
    /// 连跳途中不升变。
    pub fn get_capture_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let from = piece.position;

        for &(dr, dc) in capture_directions(piece) {
            let jumped = from.offset(dr, dc);
            let landing = from.offset(2 * dr, 2 * dc);

            if !self.can_jump(piece, jumped, landing) {
                continue;
            }

            // 假想棋盘：移除被吃子，棋子移到落点
            let mut next = self.clone();
            next.remove_piece(from);
            next.remove_piece(jumped);
            let moved = Piece {
                position: landing,
                ..*piece
            };
            next.set_piece(moved);

            let continuations = next.get_capture_moves(&moved);
            if continuations.is_empty() {
                moves.push(Move::capture(from, landing, vec![jumped]));
                continue;
            }

            for cont in continuations {
                let mut captured = Vec::with_capacity(cont.captured.len() + 1);
                captured.push(jumped);
                captured.extend(cont.captured);
                moves.push(Move::capture(from, cont.to, captured));
            }
        }

        moves
    }

    /// 能否跳过 `jumped` 落到 `landing`
    #[inline]
    fn can_jump(&self, piece: &Piece, jumped: Position, landing: Position) -> bool {
        if !self.is_empty_square(landing) {
            return false;
        }
        matches!(self.get_piece(jumped), Some(target) if target.color != piece.color)
    }

    /// 是否有单跳可吃（有单跳即有吃子走法，无需展开连跳）
    fn has_single_jump(&self, piece: &Piece) -> bool {
        let from = piece.position;
        capture_directions(piece)
            .iter()
            .any(|&(dr, dc)| self.can_jump(piece, from.offset(dr, dc), from.offset(2 * dr, 2 * dc)))
    }

    /// 某方是否有任一棋子可以吃子
    pub fn has_capture_moves(&self, color: Color) -> bool {
        self.get_all_pieces(Some(color))
            .into_iter()
            .any(|piece| self.has_single_jump(piece))
    }

    /// 某方所有棋子的走法（不施加全局强制吃子）
    pub fn get_all_moves(&self, color: Color) -> Vec<Move> {
        self.collect_moves(color, false)
    }

    /// 某方的合法走法（施加全局强制吃子）
    pub fn get_legal_moves(&self, color: Color) -> Vec<Move> {
        let must_capture = self.has_capture_moves(color);
        self.collect_moves(color, must_capture)
    }

    fn collect_moves(&self, color: Color, must_capture: bool) -> Vec<Move> {
        let mut moves = Vec::with_capacity(16);
        for piece in self.get_all_pieces(Some(color)) {
            moves.extend(self.get_valid_moves(piece, must_capture));
        }
        moves
    }

    /// 选中某格棋子后可落子的目标格（用于界面高亮）
    pub fn valid_destinations(&self, pos: Position, must_capture: bool) -> Vec<Position> {
        match self.get_piece(pos) {
            Some(piece) => self
                .get_valid_moves(piece, must_capture)
                .into_iter()
                .map(|mv| mv.to)
                .collect(),
            None => Vec::new(),
        }
    }

    /// 走法字符串列表
    pub fn get_legal_moves_str(&self, color: Color) -> Vec<String> {
        self.get_legal_moves(color)
            .iter()
            .map(|m| m.to_fen_str())
            .collect()
    }
}
