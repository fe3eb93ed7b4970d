//! AI 策略模块
//!
//! 按难度提供两种策略：easy 随机走子，medium/hard 使用带 Alpha-Beta 剪枝的 Minimax

mod minimax;
mod random;

pub use minimax::{evaluate_board, minimax, MinimaxAI, WIN_SCORE};
pub use random::RandomAI;

use crate::board::Board;
use crate::error::CheckersResult;
use crate::fen::parse_fen;
use crate::types::{Color, Difficulty, Move};
use rand::Rng;
use std::cmp::Ordering;

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度（根走法之后的层数，0 表示随机走子）
    pub depth: u32,
    /// 随机种子
    pub seed: Option<u64>,
    /// AI 是否同样遵守全局强制吃子
    pub forced_capture: bool,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig::for_difficulty(Difficulty::Medium)
    }
}

impl AIConfig {
    /// 按难度生成配置
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        AIConfig {
            depth: difficulty.search_depth(),
            seed: None,
            forced_capture: true,
        }
    }
}

/// 候选走法：是否施加全局强制吃子
pub(crate) fn candidate_moves(board: &Board, side: Color, forced_capture: bool) -> Vec<Move> {
    if forced_capture {
        board.get_legal_moves(side)
    } else {
        board.get_all_moves(side)
    }
}

/// 走法评分
#[derive(Debug, Clone)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
}

/// AI 策略接口
pub trait AIStrategy {
    /// 选择走法（返回带评分的走法列表，分数高的在前）
    fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove>;

    /// 选择最佳走法
    fn select_best_move(&self, board: &Board, side: Color) -> Option<Move> {
        self.select_moves(board, side, 1)
            .into_iter()
            .next()
            .map(|sm| sm.mv)
    }

    /// 上一次搜索访问的节点数
    fn nodes_searched(&self) -> u64 {
        0
    }
}

/// 排序辅助函数
///
/// 稳定排序：同分时保留原始枚举顺序，先出现的走法优先。
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(n);
}

/// 为 `side` 选择一步棋
///
/// easy 在全部合法走法中均匀随机选择（随机源由调用方注入），
/// medium/hard 对每个根走法做 Minimax 搜索，取最高分，同分取先出现者。
/// 没有走法时返回 `None`，即该方已经输了。
pub fn get_ai_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    side: Color,
    rng: &mut R,
) -> Option<Move> {
    let config = AIConfig::for_difficulty(difficulty);
    if config.depth == 0 {
        return RandomAI::pick(board, side, config.forced_capture, rng);
    }
    MinimaxAI::new(&config).select_best_move(board, side)
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(config)),
        }
    }

    /// 创建 Minimax AI
    pub fn minimax(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(MinimaxAI::new(config)),
        }
    }

    /// 按配置的深度创建（0 为随机）
    pub fn from_config(config: &AIConfig) -> Self {
        if config.depth == 0 {
            Self::random(config)
        } else {
            Self::minimax(config)
        }
    }

    /// 按难度创建
    pub fn from_difficulty(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let config = AIConfig {
            seed,
            ..AIConfig::for_difficulty(difficulty)
        };
        Self::from_config(&config)
    }

    /// 从难度名称创建
    pub fn from_strategy(name: &str, seed: Option<u64>) -> CheckersResult<Self> {
        let difficulty: Difficulty = name.parse()?;
        Ok(Self::from_difficulty(difficulty, seed))
    }

    pub fn select_moves(&self, board: &Board, side: Color, n: usize) -> Vec<ScoredMove> {
        self.strategy.select_moves(board, side, n)
    }

    pub fn select_best_move(&self, board: &Board, side: Color) -> Option<Move> {
        self.strategy.select_best_move(board, side)
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.strategy.nodes_searched()
    }

    /// 从记谱选择走法（返回带评分的走法字符串）
    pub fn select_moves_fen(&self, fen: &str, n: usize) -> CheckersResult<Vec<(String, f64)>> {
        let state = parse_fen(fen)?;
        let moves = self.strategy.select_moves(&state.board, state.turn, n);
        Ok(moves
            .into_iter()
            .map(|sm| (sm.mv.to_fen_str(), sm.score))
            .collect())
    }

    /// 从记谱选择最佳走法
    pub fn select_best_move_fen(&self, fen: &str) -> CheckersResult<Option<String>> {
        let state = parse_fen(fen)?;
        Ok(self
            .strategy
            .select_best_move(&state.board, state.turn)
            .map(|m| m.to_fen_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::error::CheckersError;
    use crate::fen::INITIAL_FEN;
    use crate::types::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_ai() {
        let config = AIConfig {
            seed: Some(42),
            ..AIConfig::for_difficulty(Difficulty::Easy)
        };
        let ai = AIEngine::random(&config);
        let moves = ai.select_moves_fen(INITIAL_FEN, 5).unwrap();
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn test_minimax_ai_ranks_all_moves() {
        let ai = AIEngine::from_difficulty(Difficulty::Medium, None);
        let moves = ai.select_moves_fen(INITIAL_FEN, 100).unwrap();
        assert_eq!(moves.len(), 7);
        for pair in moves.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        assert!(ai.nodes_searched() > 0);
    }

    #[test]
    fn test_capture_preference() {
        // 深色方可以白吃一子
        let fen = "8/8/8/2d5/3l4/8/8/6l1 d";
        let ai = AIEngine::from_difficulty(Difficulty::Hard, None);
        let best = ai.select_best_move_fen(fen).unwrap().unwrap();
        assert_eq!(best, "c3xe5");
    }

    #[test]
    fn test_get_ai_move_is_legal() {
        let board = Board::initial();
        let legal = board.get_legal_moves(Color::Dark);
        let mut rng = StdRng::seed_from_u64(7);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mv = get_ai_move(&board, difficulty, Color::Dark, &mut rng).unwrap();
            assert!(legal.contains(&mv), "{} returned {}", difficulty, mv);
            assert_eq!(board.get_piece(mv.from).unwrap().color, Color::Dark);
        }
    }

    #[test]
    fn test_easy_is_deterministic_with_seed() {
        let board = Board::initial();
        let a = get_ai_move(&board, Difficulty::Easy, Color::Light, &mut StdRng::seed_from_u64(3));
        let b = get_ai_move(&board, Difficulty::Easy, Color::Light, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let mut board = Board::empty();
        board.set_piece(Piece::man(Color::Dark, Position::new(7, 0)));
        board.set_piece(Piece::man(Color::Light, Position::new(5, 0)));
        let mut rng = StdRng::seed_from_u64(1);
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            assert!(get_ai_move(&board, difficulty, Color::Dark, &mut rng).is_none());
        }
    }

    #[test]
    fn test_all_strategies_from_name() {
        for name in ["easy", "medium", "hard"] {
            assert!(AIEngine::from_strategy(name, Some(1)).is_ok(), "{}", name);
        }
        assert!(matches!(
            AIEngine::from_strategy("insane", None),
            Err(CheckersError::UnknownDifficulty(_))
        ));
    }
}
