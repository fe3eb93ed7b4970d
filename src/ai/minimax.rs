//! Minimax AI 策略（medium / hard）

use super::{candidate_moves, sort_and_truncate, AIConfig, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::types::{Color, Rank};
use log::{debug, trace};
use std::cell::Cell;
use std::time::Instant;

/// 胜负分数
pub const WIN_SCORE: f64 = 10000.0;

/// 兵每离开升变行一格的位置分
const MAN_ROW_BONUS: f64 = 0.5;

/// 静态评估
///
/// 子力（王 5、兵 3）加兵的位置分 `0.5 * |row - 升变行|`，
/// `ai_color` 一方为正，对方为负。王没有位置分。
pub fn evaluate_board(board: &Board, ai_color: Color) -> f64 {
    let mut score = 0.0;

    for piece in board.get_all_pieces(None) {
        let position_bonus = match piece.rank {
            Rank::King => 0.0,
            Rank::Man => {
                (piece.position.row - piece.color.promotion_row()).abs() as f64 * MAN_ROW_BONUS
            }
        };
        let value = piece.rank.value() + position_bonus;

        if piece.color == ai_color {
            score += value;
        } else {
            score -= value;
        }
    }

    score
}

/// Minimax 搜索（带 Alpha-Beta 剪枝），AI 同样遵守全局强制吃子
pub fn minimax(
    board: &Board,
    depth: u32,
    alpha: f64,
    beta: f64,
    maximizing: bool,
    ai_color: Color,
) -> f64 {
    let ai = MinimaxAI::new(&AIConfig {
        depth,
        ..AIConfig::default()
    });
    ai.search(board, depth, alpha, beta, maximizing, ai_color)
}

/// Minimax AI - 使用 Alpha-Beta 剪枝
pub struct MinimaxAI {
    depth: u32,
    forced_capture: bool,
    nodes: Cell<u64>,
}

impl MinimaxAI {
    pub fn new(config: &AIConfig) -> Self {
        MinimaxAI {
            depth: config.depth,
            forced_capture: config.forced_capture,
            nodes: Cell::new(0),
        }
    }

    /// 静态评估一个棋盘局面（不搜索）
    pub fn evaluate_static(board: &Board, color: Color) -> f64 {
        evaluate_board(board, color)
    }

    fn search(
        &self,
        board: &Board,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        ai_color: Color,
    ) -> f64 {
        self.nodes.set(self.nodes.get() + 1);

        let to_move = if maximizing {
            ai_color
        } else {
            ai_color.opposite()
        };

        // 终止条件：行棋方没有子或没有走法
        if let Some(winner) = board.check_winner(to_move) {
            return if winner == ai_color {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }

        if depth == 0 {
            return evaluate_board(board, ai_color);
        }

        let moves = candidate_moves(board, to_move, self.forced_capture);

        if maximizing {
            let mut max_eval = f64::NEG_INFINITY;
            for mv in &moves {
                let child = board.apply_move(mv);
                let eval = self.search(&child, depth - 1, alpha, beta, false, ai_color);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break; // Beta 剪枝
                }
            }
            max_eval
        } else {
            let mut min_eval = f64::INFINITY;
            for mv in &moves {
                let child = board.apply_move(mv);
                let eval = self.search(&child, depth - 1, alpha, beta, true, ai_color);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break; // Alpha 剪枝
                }
            }
            min_eval
        }
    }
}

impl AIStrategy for MinimaxAI {
    fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove> {
        self.nodes.set(0);
        let start = Instant::now();

        let moves = candidate_moves(board, side, self.forced_capture);

        // 每个根走法独立搜索（窗口不共享），从对手视角开始
        let mut scored: Vec<ScoredMove> = moves
            .into_iter()
            .map(|mv| {
                let child = board.apply_move(&mv);
                let score = self.search(
                    &child,
                    self.depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    false,
                    side,
                );
                trace!("{} {}: {:.2}", side, mv, score);
                ScoredMove { mv, score }
            })
            .collect();

        sort_and_truncate(&mut scored, n);

        if let Some(best) = scored.first() {
            debug!(
                "minimax depth={} side={} best={} score={:.2} nodes={} elapsed={:?}",
                self.depth,
                side,
                best.mv,
                best.score,
                self.nodes.get(),
                start.elapsed()
            );
        }

        scored
    }

    fn nodes_searched(&self) -> u64 {
        self.nodes.get()
    }
}
