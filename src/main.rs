//! Checkers AI CLI
//!
//! 命令行界面，用于测试 AI 和人机对弈
//!
//! 支持三种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Play 模式：终端里人执浅色对 AI
//! 3. Server 模式：长驻进程，通过 stdin/stdout 通信

use checkers_ai::{
    apply_move_to_fen, get_legal_moves_from_fen, parse_fen, AIEngine, CheckersError, Color,
    Difficulty, GameMode, GameSession, MinimaxAI, Move,
};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "checkers-ai")]
#[command(about = "Checkers AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// 局面记谱
        #[arg(long)]
        fen: String,
    },

    /// 选择最佳走法
    Best {
        /// 局面记谱
        #[arg(long)]
        fen: String,

        /// AI 难度 (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数
    Score {
        /// 局面记谱
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 人机对弈（人执浅色）
    Play {
        /// AI 难度 (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    score: f64,
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveResult>,
    total: usize,
    nodes: u64,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct ScoreResponse<'a> {
    fen: &'a str,
    color: String,
    score: f64,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default, rename = "move")]
    mv: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // eval 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    // apply 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    // winner 命令的字段，null 表示未分胜负
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<Option<String>>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<MoveResult>, nodes: u64, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            nodes: Some(nodes),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(eval: f64, color: Color) -> Self {
        Self {
            ok: true,
            eval: Some(eval),
            color: Some(color.to_string()),
            ..Default::default()
        }
    }

    fn success_fen(fen: String) -> Self {
        Self {
            ok: true,
            fen: Some(fen),
            ..Default::default()
        }
    }

    fn success_winner(winner: Option<Color>) -> Self {
        Self {
            ok: true,
            winner: Some(winner.map(|c| c.to_string())),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn exit_with(e: CheckersError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"{}\"}}", e))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen } => match get_legal_moves_from_fen(&fen) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Best {
            fen,
            difficulty,
            n,
            seed,
            json,
        } => {
            let ai = AIEngine::from_strategy(&difficulty, seed).unwrap_or_else(|e| exit_with(e));

            let start = Instant::now();
            match ai.select_moves_fen(&fen, n) {
                Ok(moves) => {
                    let elapsed = elapsed_ms(start);
                    let nodes = ai.nodes_searched();

                    if json {
                        let response = MovesResponse {
                            total: moves.len(),
                            moves: moves
                                .into_iter()
                                .map(|(mv, score)| MoveResult { mv, score })
                                .collect(),
                            nodes,
                            elapsed_ms: elapsed,
                        };
                        println!("{}", to_json(&response, true));
                    } else {
                        println!("Best moves (difficulty={}):", difficulty);
                        for (mv, score) in moves {
                            println!("  {} (score: {:.2})", mv, score);
                        }
                        println!("\nStats: nodes={}, time={:.3}ms", nodes, elapsed);
                    }
                }
                Err(e) => exit_with(e),
            }
        }

        Commands::Score { fen, json } => match parse_fen(&fen) {
            Ok(state) => {
                let score = MinimaxAI::evaluate_static(&state.board, state.turn);
                if json {
                    let response = ScoreResponse {
                        fen: &fen,
                        color: state.turn.to_string(),
                        score,
                    };
                    println!("{}", to_json(&response, false));
                } else {
                    println!("Evaluation ({} to move): {:.2}", state.turn, score);
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Play { difficulty, seed } => {
            let difficulty: Difficulty = difficulty.parse().unwrap_or_else(|e| exit_with(e));
            run_play(difficulty, seed);
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// Play 模式主循环
/// 人输入走法记谱（如 `a5b4`、`c5xa3xc1`），AI 自动应对
fn run_play(difficulty: Difficulty, seed: Option<u64>) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut session = GameSession::new(GameMode::vs_ai(difficulty));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", session.board());

        if let Some(winner) = session.winner() {
            println!("{} wins!", winner);
            break;
        }

        if session.is_ai_turn() {
            match session.ai_turn(&mut rng) {
                Some(mv) => println!("AI plays {}", mv),
                None => break,
            }
            continue;
        }

        let legal: Vec<String> = session.legal_moves().iter().map(Move::to_fen_str).collect();
        print!("{} to move [{}] > ", session.current_player(), legal.join(" "));
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(l)) => l,
            _ => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" {
            break;
        }

        let result = Move::from_fen_str(input)
            .ok_or_else(|| CheckersError::InvalidMove(input.to_string()))
            .and_then(|mv| session.play_move(&mv));
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response, false));
                let _ = stdout.flush();
                continue;
            }
        };

        // 处理命令
        let response = match request.cmd.as_str() {
            "moves" => handle_moves_request(&request),
            "best" => handle_best_request(&request),
            "eval" => handle_eval_request(&request),
            "apply" => handle_apply_request(&request),
            "winner" => handle_winner_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        // 返回响应
        println!("{}", to_json(&response, false));
        let _ = stdout.flush();
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_fen(&request.fen) {
        Ok(moves) => ServerResponse::success_legal_moves(moves),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let difficulty = request.difficulty.as_deref().unwrap_or("medium");
    let ai = match AIEngine::from_strategy(difficulty, request.seed) {
        Ok(ai) => ai,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };

    let start = Instant::now();
    match ai.select_moves_fen(&request.fen, request.n.unwrap_or(1)) {
        Ok(moves) => ServerResponse::success_moves(
            moves
                .into_iter()
                .map(|(mv, score)| MoveResult { mv, score })
                .collect(),
            ai.nodes_searched(),
            elapsed_ms(start),
        ),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 eval 命令
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(&request.fen) {
        Ok(state) => ServerResponse::success_eval(
            MinimaxAI::evaluate_static(&state.board, state.turn),
            state.turn,
        ),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 apply 命令
fn handle_apply_request(request: &ServerRequest) -> ServerResponse {
    let Some(mv) = request.mv.as_deref() else {
        return ServerResponse::error("Missing field: move");
    };
    match apply_move_to_fen(&request.fen, mv) {
        Ok(fen) => ServerResponse::success_fen(fen),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 winner 命令
fn handle_winner_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(&request.fen) {
        Ok(state) => ServerResponse::success_winner(state.board.check_winner(state.turn)),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}
