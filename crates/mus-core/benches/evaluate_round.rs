use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mus_core::game::round::MusRound;
use mus_core::rules::{Lance, evaluate_round};

fn evaluate_round_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_round");
    for (seed, players) in [(7u64, 2usize), (1040u64, 4usize), (1145u64, 6usize)] {
        let round = MusRound::with_seed(seed, players, 0).expect("valid table");
        group.bench_function(format!("round_{players}p_{seed}"), |b| {
            b.iter(|| black_box(evaluate_round(black_box(round.hands()), 0)))
        });
        group.bench_function(format!("pares_{players}p_{seed}"), |b| {
            b.iter(|| black_box(Lance::Pares.evaluate(black_box(round.hands()), 0)))
        });
    }
    group.finish();
}

criterion_group!(benches, evaluate_round_bench);
criterion_main!(benches);
