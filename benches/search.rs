use checkers_ai::test_positions::{CAPTURE_POSITIONS, EARLY_POSITIONS, END_POSITIONS, START};
use checkers_ai::{evaluate_board, parse_fen, AIConfig, AIStrategy, Board, Color, Difficulty, MinimaxAI};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn corpus() -> Vec<(Board, Color)> {
    std::iter::once(START)
        .chain(EARLY_POSITIONS)
        .chain(CAPTURE_POSITIONS)
        .chain(END_POSITIONS)
        .filter_map(|fen| parse_fen(fen).ok())
        .map(|state| (state.board, state.turn))
        .collect()
}

fn bench_movegen(c: &mut Criterion) {
    let positions = corpus();
    c.bench_function("movegen/legal_moves", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (board, turn) in &positions {
                total += board.get_legal_moves(*turn).len();
            }
            black_box(total)
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let positions = corpus();
    c.bench_function("eval/static", |b| {
        b.iter(|| {
            let mut acc = 0f64;
            for (board, turn) in &positions {
                acc += evaluate_board(board, *turn);
            }
            black_box(acc)
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let board = Board::initial();
    for difficulty in [Difficulty::Medium, Difficulty::Hard] {
        let ai = MinimaxAI::new(&AIConfig::for_difficulty(difficulty));
        c.bench_function(&format!("search/{}", difficulty), |b| {
            b.iter(|| black_box(ai.select_best_move(&board, Color::Light)))
        });
    }
}

criterion_group!(search, bench_movegen, bench_evaluate, bench_search);
criterion_main!(search);
