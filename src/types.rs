//! 跳棋核心类型定义
//!
//! 定义 8×8 跳棋中所有基础数据类型

use std::fmt;
use std::str::FromStr;

use crate::error::CheckersError;

/// 棋盘边长
pub const BOARD_SIZE: i8 = 8;

/// 棋子颜色/阵营
///
/// 浅色方从棋盘下方（row 5-7）出发、先行，向 row 减小的方向前进；
/// 深色方从上方（row 0-2）出发，向 row 增大的方向前进。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// 兵的前进方向（行增量）
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// 升变行：到达这一行的兵成为王
    #[inline]
    pub fn promotion_row(&self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => BOARD_SIZE - 1,
        }
    }

    /// 从记谱字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'l' => Some(Color::Light),
            'd' => Some(Color::Dark),
            _ => None,
        }
    }

    /// 转换为记谱字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Light => 'l',
            Color::Dark => 'd',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "Light"),
            Color::Dark => write!(f, "Dark"),
        }
    }
}

/// 棋子等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// 普通兵
    Man,
    /// 王（升变后）
    King,
}

impl Rank {
    /// 子力价值
    pub fn value(&self) -> f64 {
        match self {
            Rank::Man => 3.0,
            Rank::King => 5.0,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Man => write!(f, "Man"),
            Rank::King => write!(f, "King"),
        }
    }
}

/// 棋盘位置 (row, col)
///
/// row: 0-7 (0 是深色方底线，7 是浅色方底线)
/// col: 0-7 (从左到右)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// 是否为深色格（只有深色格上能放棋子）
    #[inline]
    pub fn is_dark_square(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 转换为数组下标（调用方保证位置合法）
    #[inline]
    pub fn to_index(&self) -> usize {
        (self.row * BOARD_SIZE + self.col) as usize
    }

    /// 从记谱坐标解析（如 "a5"）
    pub fn from_fen_str(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = match bytes[0] {
            b'a'..=b'h' => (bytes[0] - b'a') as i8,
            _ => return None,
        };
        let row = match bytes[1] {
            b'0'..=b'7' => (bytes[1] - b'0') as i8,
            _ => return None,
        };
        Some(Position { row, col })
    }

    /// 转换为记谱坐标（如 "a5"），棋盘外的位置写成 `(row,col)`
    pub fn to_fen_str(&self) -> String {
        if !self.is_valid() {
            return format!("({},{})", self.row, self.col);
        }
        let col_char = (b'a' + self.col as u8) as char;
        format!("{}{}", col_char, self.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_str())
    }
}

/// 检查位置是否在棋盘范围内
pub fn is_valid_position(pos: Position) -> bool {
    pos.is_valid()
}

/// 走法
///
/// `captured` 非空时为吃子走法（可能是连跳），`to` 是整条连跳的最终落点。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// 按跳吃顺序排列的被吃棋子位置
    pub captured: Vec<Position>,
}

impl Move {
    /// 创建普通走法
    pub fn quiet(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            captured: Vec::new(),
        }
    }

    /// 创建吃子走法
    pub fn capture(from: Position, to: Position, captured: Vec<Position>) -> Self {
        Move { from, to, captured }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// 连跳经过的每个落点（最后一个等于 `to`）
    ///
    /// 每一跳的落点是上一个落点关于被吃子的对称点。普通走法只返回 `to`。
    pub fn landings(&self) -> Vec<Position> {
        if self.captured.is_empty() {
            return vec![self.to];
        }
        let mut current = self.from;
        self.captured
            .iter()
            .map(|jumped| {
                current = Position::new(2 * jumped.row - current.row, 2 * jumped.col - current.col);
                current
            })
            .collect()
    }

    /// 从走法字符串解析
    ///
    /// 格式：
    /// - 普通走法：`a5b4`
    /// - 吃子走法：`c5xa3`，连跳依次写出每个落点：`c5xa3xc1`
    pub fn from_fen_str(s: &str) -> Option<Move> {
        let s = s.trim();

        if !s.contains('x') {
            if s.len() != 4 {
                return None;
            }
            let from = Position::from_fen_str(s.get(0..2)?)?;
            let to = Position::from_fen_str(s.get(2..4)?)?;
            return Some(Move::quiet(from, to));
        }

        let mut parts = s.split('x');
        let from = Position::from_fen_str(parts.next()?)?;
        let mut current = from;
        let mut captured = Vec::new();

        for part in parts {
            let landing = Position::from_fen_str(part)?;
            let dr = landing.row - current.row;
            let dc = landing.col - current.col;
            // 每一跳必须恰好斜跨两格
            if dr.abs() != 2 || dc.abs() != 2 {
                return None;
            }
            captured.push(current.offset(dr / 2, dc / 2));
            current = landing;
        }

        if captured.is_empty() {
            return None;
        }

        Some(Move::capture(from, current, captured))
    }

    /// 转换为走法字符串
    pub fn to_fen_str(&self) -> String {
        if self.captured.is_empty() {
            return format!("{}{}", self.from.to_fen_str(), self.to.to_fen_str());
        }
        let mut s = self.from.to_fen_str();
        for landing in self.landings() {
            s.push('x');
            s.push_str(&landing.to_fen_str());
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_str())
    }
}

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// 随机走子
    Easy,
    /// Minimax 深度 2
    Medium,
    /// Minimax 深度 4
    Hard,
}

impl Difficulty {
    /// 对应的搜索深度（0 表示随机选择）
    pub fn search_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 2,
            Difficulty::Hard => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CheckersError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_fen_str() {
        assert_eq!(Position::from_fen_str("a0"), Some(Position::new(0, 0)));
        assert_eq!(Position::from_fen_str("b4"), Some(Position::new(4, 1)));
        assert_eq!(Position::from_fen_str("h7"), Some(Position::new(7, 7)));
        assert_eq!(Position::from_fen_str("i0"), None);
        assert_eq!(Position::from_fen_str("a8"), None);
    }

    #[test]
    fn test_off_board_position_display() {
        assert_eq!(Position::new(4, -1).to_string(), "(4,-1)");
        assert_eq!(Position::new(-3, 2).to_fen_str(), "(-3,2)");
        assert_eq!(Position::new(8, 8).to_string(), "(8,8)");
        assert_eq!(Position::new(2, 7).to_string(), "h2");
    }

    #[test]
    fn test_position_validity() {
        assert!(is_valid_position(Position::new(0, 0)));
        assert!(is_valid_position(Position::new(7, 7)));
        assert!(!is_valid_position(Position::new(-1, 3)));
        assert!(!is_valid_position(Position::new(3, 8)));
    }

    #[test]
    fn test_position_index() {
        let mut seen = [false; 64];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let idx = Position::new(row, col).to_index();
                assert_eq!(idx, (row * BOARD_SIZE + col) as usize);
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_quiet_move_notation() {
        let mv = Move::from_fen_str("a5b4").unwrap();
        assert_eq!(mv.from, Position::new(5, 0));
        assert_eq!(mv.to, Position::new(4, 1));
        assert!(!mv.is_capture());
        assert_eq!(mv.to_fen_str(), "a5b4");
    }

    #[test]
    fn test_capture_chain_notation() {
        let mv = Move::from_fen_str("c5xa3xc1").unwrap();
        assert_eq!(mv.from, Position::new(5, 2));
        assert_eq!(mv.to, Position::new(1, 2));
        assert_eq!(mv.captured, vec![Position::new(4, 1), Position::new(2, 1)]);
        assert_eq!(mv.landings(), vec![Position::new(3, 0), Position::new(1, 2)]);
        assert_eq!(mv.to_fen_str(), "c5xa3xc1");
    }

    #[test]
    fn test_invalid_move_notation() {
        assert!(Move::from_fen_str("a5").is_none());
        assert!(Move::from_fen_str("c5xb4").is_none());
        assert!(Move::from_fen_str("c5x").is_none());
        assert!(Move::from_fen_str("z5b4").is_none());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::Medium.search_depth(), 2);
        assert!("brutal".parse::<Difficulty>().is_err());
    }
}
