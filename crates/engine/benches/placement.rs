use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hatetris_core::{Board, Piece, WellConfig};
use hatetris_engine::{choose, expand, placements};

fn stacked_board() -> Board {
    let mut rows = [0u16; 20];
    for (y, row) in rows.iter_mut().enumerate().skip(12) {
        *row = 0x3FF & !(1 << (y % 7));
    }
    Board::from_rows(&WellConfig::hatetris(), &rows)
}

fn bench_placements(c: &mut Criterion) {
    let board = Board::empty(&WellConfig::hatetris());

    for piece in Piece::ALL {
        c.bench_function(&format!("placements_{}", piece), |b| {
            b.iter(|| placements(black_box(&board), black_box(piece)))
        });
    }
}

fn bench_adversary(c: &mut Criterion) {
    let empty = Board::empty(&WellConfig::hatetris());
    let stacked = stacked_board();

    c.bench_function("choose_empty", |b| b.iter(|| choose(black_box(&empty))));
    c.bench_function("choose_stacked", |b| b.iter(|| choose(black_box(&stacked))));
    c.bench_function("expand_stacked", |b| b.iter(|| expand(black_box(&stacked))));
}

criterion_group!(benches, bench_placements, bench_adversary);
criterion_main!(benches);
