//! 对局会话
//!
//! 把界面层的回合循环显式化：选子、高亮目标格、落子、AI 回合、胜负判定。
//! 所有状态都在 `GameSession` 里，规则计算全部委托给棋盘的纯函数。

use log::info;
use rand::Rng;

use crate::ai::get_ai_move;
use crate::board::Board;
use crate::error::{CheckersError, CheckersResult};
use crate::types::{Color, Difficulty, Move, Position};

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// 双人对局
    PlayerVsPlayer,
    /// 人机对局
    PlayerVsAi { difficulty: Difficulty, ai_side: Color },
}

impl GameMode {
    /// 人机对局，AI 执深色（后手）
    pub fn vs_ai(difficulty: Difficulty) -> Self {
        GameMode::PlayerVsAi {
            difficulty,
            ai_side: Color::Dark,
        }
    }
}

/// 点击棋盘的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 选中棋子，返回可落子的目标格
    Selected(Vec<Position>),
    /// 走了一步
    Moved(Move),
    /// 取消选择
    Deselected,
}

/// 对局会话
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    board: Board,
    current_player: Color,
    selected: Option<Position>,
    valid_moves: Vec<Move>,
    winner: Option<Color>,
}

impl GameSession {
    /// 新对局，浅色方先行
    pub fn new(mode: GameMode) -> Self {
        GameSession {
            mode,
            board: Board::initial(),
            current_player: Color::Light,
            selected: None,
            valid_moves: Vec::new(),
            winner: None,
        }
    }

    /// 从指定局面开始
    pub fn from_position(mode: GameMode, board: Board, current_player: Color) -> Self {
        let mut session = GameSession {
            mode,
            board,
            current_player,
            selected: None,
            valid_moves: Vec::new(),
            winner: None,
        };
        session.winner = session.board.check_winner(current_player);
        session
    }

    /// 重新开始
    pub fn reset(&mut self) {
        *self = GameSession::new(self.mode);
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// 当前选中棋子的目标格
    pub fn highlighted(&self) -> Vec<Position> {
        self.valid_moves.iter().map(|m| m.to).collect()
    }

    /// 是否轮到 AI 行棋
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PlayerVsAi { ai_side, .. } => {
                self.winner.is_none() && self.current_player == ai_side
            }
            GameMode::PlayerVsPlayer => false,
        }
    }

    /// 行棋方当前的全部合法走法（含全局强制吃子）
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        self.board.get_legal_moves(self.current_player)
    }

    fn ensure_playing(&self) -> CheckersResult<()> {
        match self.winner {
            Some(winner) => Err(CheckersError::GameOver { winner }),
            None => Ok(()),
        }
    }

    /// 处理一次点击
    ///
    /// 已选中棋子且点击的是高亮格时走子；点击己方棋子时选中；否则取消选择。
    pub fn click(&mut self, pos: Position) -> CheckersResult<ClickOutcome> {
        self.ensure_playing()?;

        if self.selected.is_some() && self.valid_moves.iter().any(|m| m.to == pos) {
            return self.play_to(pos).map(ClickOutcome::Moved);
        }

        if matches!(self.board.get_piece(pos), Some(p) if p.color == self.current_player) {
            return self.select(pos).map(ClickOutcome::Selected);
        }

        self.clear_selection();
        Ok(ClickOutcome::Deselected)
    }

    /// 选中棋子，返回可落子的目标格
    ///
    /// 己方有棋子能吃时，只有能吃子的棋子可以选中。
    pub fn select(&mut self, pos: Position) -> CheckersResult<Vec<Position>> {
        self.ensure_playing()?;
        if !pos.is_valid() {
            return Err(CheckersError::OffBoard(pos));
        }

        let piece = *self
            .board
            .get_piece(pos)
            .ok_or(CheckersError::NoPieceAt(pos))?;
        if piece.color != self.current_player {
            return Err(CheckersError::NotYourPiece {
                pos,
                owner: piece.color,
                expected: self.current_player,
            });
        }

        let must_capture = self.board.has_capture_moves(self.current_player);
        let moves = self.board.get_valid_moves(&piece, must_capture);
        if moves.is_empty() {
            return Err(CheckersError::NoLegalMoves(pos));
        }

        self.selected = Some(pos);
        self.valid_moves = moves;
        Ok(self.highlighted())
    }

    /// 把选中的棋子走到目标格
    pub fn play_to(&mut self, dest: Position) -> CheckersResult<Move> {
        self.ensure_playing()?;
        if !dest.is_valid() {
            return Err(CheckersError::OffBoard(dest));
        }

        // 未选中棋子时 valid_moves 为空
        let mv = self
            .valid_moves
            .iter()
            .find(|m| m.to == dest)
            .cloned()
            .ok_or_else(|| CheckersError::IllegalMove {
                mv: match self.selected {
                    Some(from) => format!("{}{}", from, dest),
                    None => dest.to_string(),
                },
                color: self.current_player,
            })?;

        self.commit(mv.clone());
        Ok(mv)
    }

    /// 直接执行一步走法（必须是当前合法走法）
    pub fn play_move(&mut self, mv: &Move) -> CheckersResult<()> {
        self.ensure_playing()?;

        if !self.legal_moves().contains(mv) {
            return Err(CheckersError::IllegalMove {
                mv: mv.to_fen_str(),
                color: self.current_player,
            });
        }
        self.commit(mv.clone());
        Ok(())
    }

    /// AI 行棋
    ///
    /// 只有人机模式且轮到 AI 时才会走；返回 AI 走的棋。`&mut self` 保证同一时刻只有一次 AI 调用。
    pub fn ai_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Move> {
        let difficulty = match self.mode {
            GameMode::PlayerVsAi { difficulty, .. } if self.is_ai_turn() => difficulty,
            _ => return None,
        };

        let mv = get_ai_move(&self.board, difficulty, self.current_player, rng)?;
        self.commit(mv.clone());
        Some(mv)
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    fn commit(&mut self, mv: Move) {
        info!("{} plays {}", self.current_player, mv);

        self.board = self.board.apply_move(&mv);
        self.clear_selection();

        let next = self.current_player.opposite();
        self.winner = self.board.check_winner(next);
        match self.winner {
            Some(winner) => info!("{} wins", winner),
            None => self.current_player = next,
        }
    }
}
