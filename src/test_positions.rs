//! 跳棋测试局面库
//!
//! 提供命名的记谱测试局面，方便测试和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - EARLY_n: 开局后 1-2 步
//! - CAPTURE_n: 吃子/连跳
//! - END_n: 残局
//! - WIN_n: 已分胜负

use crate::fen::INITIAL_FEN;

// =============================================================================
// 开局 (START / EARLY)
// =============================================================================

/// 初始局面，浅色方先行
pub const START: &str = INITIAL_FEN;

/// 浅色方第一步: a5b4
pub const EARLY_1: &str = "1d1d1d1d/d1d1d1d1/1d1d1d1d/8/1l6/2l1l1l1/1l1l1l1l/l1l1l1l1 d";

/// 深色方回应: b2a3
pub const EARLY_2: &str = "1d1d1d1d/d1d1d1d1/3d1d1d/d7/1l6/2l1l1l1/1l1l1l1l/l1l1l1l1 l";

/// 浅色方第一步: e5f4
pub const EARLY_3: &str = "1d1d1d1d/d1d1d1d1/1d1d1d1d/8/5l2/l1l3l1/1l1l1l1l/l1l1l1l1 d";

// =============================================================================
// 吃子 (CAPTURE)
// =============================================================================

/// 深色兵 c3 必须吃 d4: c3xe5
pub const CAPTURE_1: &str = "8/8/8/2d5/3l4/8/8/6l1 d";

/// 浅色兵连跳: c5xa3xc1
pub const CAPTURE_2: &str = "8/8/1d6/8/1d6/2l5/8/8 l";

/// 第一跳后分叉: d6xf4xd2 或 d6xf4xh2
pub const CAPTURE_3: &str = "8/8/8/4d1d1/8/4d3/3l4/8 l";

/// 浅色王向后连跳: d2xf4xd6
pub const CAPTURE_4: &str = "8/8/3L4/4d3/8/4d3/8/8 l";

// =============================================================================
// 残局 (END)
// =============================================================================

/// 浅色王对深色兵
pub const END_1: &str = "8/d7/8/2L5/8/8/8/8 d";

/// 双方各一王
pub const END_2: &str = "1D6/8/8/8/8/8/8/6L1 l";

/// 深色双王对浅色三兵
pub const END_3: &str = "8/8/3D4/8/1D6/l1l5/8/l7 l";

// =============================================================================
// 胜负已分 (WIN)
// =============================================================================

/// 深色方无子，浅色胜
pub const WIN_1: &str = "8/8/8/8/8/l7/8/8 d";

/// 浅色兵被堵死无路可走，深色胜
pub const WIN_2: &str = "8/8/8/8/8/2d5/1d6/l7 l";

// =============================================================================
// 分类数组
// =============================================================================

pub const EARLY_POSITIONS: [&str; 3] = [EARLY_1, EARLY_2, EARLY_3];

pub const CAPTURE_POSITIONS: [&str; 4] = [CAPTURE_1, CAPTURE_2, CAPTURE_3, CAPTURE_4];

pub const END_POSITIONS: [&str; 3] = [END_1, END_2, END_3];

pub const WIN_POSITIONS: [&str; 2] = [WIN_1, WIN_2];
