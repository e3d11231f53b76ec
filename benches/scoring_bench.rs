use criterion::{criterion_group, criterion_main, Criterion};
use tensu::parser::parse_hand;
use tensu::types::{Conditions, Wind, WinType};
use tensu::{agari, score_hand};

fn bench_decompose_flush(c: &mut Criterion) {
    // A pure-flush shape with several overlapping readings.
    let (tiles, _) = parse_hand("22334455667788s").unwrap();
    let hand = tensu::types::Hand::from_tiles136(&tiles);

    c.bench_function("decompose_flush", |b| {
        b.iter(|| agari::decompose(&hand));
    });
}

fn bench_score_hand(c: &mut Criterion) {
    let (tiles, melds) = parse_hand("123456789m111p66s").unwrap();
    let cond = Conditions {
        win_type: WinType::Tsumo,
        win_tile: tensu::parser::parse_tile("1p").unwrap(),
        round_wind: Wind::South,
        seat_wind: Wind::South,
        dora_indicators: vec![tensu::parser::parse_tile("5s").unwrap()],
        ..Conditions::default()
    };

    c.bench_function("score_hand_straight_1000x", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                let _ = score_hand(&tiles, &melds, &cond);
            }
        });
    });
}

criterion_group!(benches, bench_decompose_flush, bench_score_hand);
criterion_main!(benches);
