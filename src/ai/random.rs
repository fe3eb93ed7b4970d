//! 随机 AI 策略（easy）

use super::{candidate_moves, sort_and_truncate, AIConfig, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::types::{Color, Move};
use rand::prelude::*;
use std::cell::RefCell;

/// 随机 AI - 随机选择合法走法
pub struct RandomAI {
    rng: RefCell<StdRng>,
    forced_capture: bool,
}

impl RandomAI {
    pub fn new(config: &AIConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI {
            rng: RefCell::new(rng),
            forced_capture: config.forced_capture,
        }
    }

    /// 用外部随机源均匀选择一步
    pub fn pick<R: Rng + ?Sized>(
        board: &Board,
        side: Color,
        forced_capture: bool,
        rng: &mut R,
    ) -> Option<Move> {
        candidate_moves(board, side, forced_capture)
            .choose(rng)
            .cloned()
    }
}

impl AIStrategy for RandomAI {
    fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove> {
        let moves = candidate_moves(board, side, self.forced_capture);
        let mut rng = self.rng.borrow_mut();

        let mut scored: Vec<ScoredMove> = moves
            .into_iter()
            .map(|mv| ScoredMove {
                mv,
                score: rng.gen::<f64>(),
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }
}
