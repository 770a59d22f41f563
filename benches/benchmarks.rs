use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wizard_chess::board::Board;
use wizard_chess::game::GameState;
use wizard_chess::movegen::{compute_status, is_checkmate, is_stalemate, legal_moves};
use wizard_chess::types::Color;

// busy middlegame with both sides still holding most pieces
const MIDDLEGAME_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
const MATE_FEN: &str = "r3k3/8/8/8/8/8/6PP/r6K";
const STALEMATE_FEN: &str = "kb6/p1p5/P1P5/8/8/8/8/7K";

pub fn bench_legal_moves_from_start(c: &mut Criterion) {
    let bo = Board::new();
    c.bench_function("legal moves from start", |b| {
        b.iter(|| legal_moves(black_box(&bo), black_box(Color::Black)))
    });
}

pub fn bench_legal_moves_from_middlegame(c: &mut Criterion) {
    let bo = Board::from_fen(MIDDLEGAME_FEN).unwrap();
    c.bench_function("legal moves from middlegame", |b| {
        b.iter(|| legal_moves(black_box(&bo), black_box(Color::White)))
    });
}

pub fn bench_terminal_search(c: &mut Criterion) {
    let mate = Board::from_fen(MATE_FEN).unwrap();
    let stalemate = Board::from_fen(STALEMATE_FEN).unwrap();
    let start = Board::new();

    c.bench_function("checkmate search on a mate", |b| {
        b.iter(|| is_checkmate(black_box(&mate), black_box(Color::White)))
    });
    c.bench_function("stalemate search on a stalemate", |b| {
        b.iter(|| is_stalemate(black_box(&stalemate), black_box(Color::Black)))
    });
    c.bench_function("position status from start", |b| {
        b.iter(|| compute_status(black_box(&start), black_box(Color::White)))
    });
}

pub fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat-sampling");
    group.sample_size(10);
    group.sampling_mode(SamplingMode::Flat);
    group.bench_function("random playout 100 plies", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(black_box(5));
            let mut state = GameState::new_game();
            while !state.is_over() && state.history().len() < 100 {
                state = match state.play_automated(&mut rng) {
                    Ok(next) => next,
                    // human side: let the same mover answer through the move path
                    Err(_) => {
                        let mv = wizard_chess::engine::choose_move(
                            state.board(),
                            state.turn(),
                            &mut rng,
                        )
                        .unwrap();
                        let next = state.attempt_move(mv.from, mv.to).unwrap();
                        match mv.promotion {
                            Some(choice) => next.resolve_promotion(choice).unwrap(),
                            None => next,
                        }
                    }
                };
            }
            state
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves_from_start,
    bench_legal_moves_from_middlegame,
    bench_terminal_search,
    bench_random_playout,
);
criterion_main!(benches);
