use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use skillforge::aggregator::{Session, StatRow};
use skillforge::classifier::classify;
use skillforge::keys::Skill;
use skillforge::leaderboard::{build_leaderboard, PlayerHistory};
use skillforge::reference::ReferenceTable;
use skillforge::store::Player;
use std::hint::black_box;

fn synthetic_histories(players: usize, sessions: usize) -> Vec<PlayerHistory> {
    (0..players)
        .map(|p| PlayerHistory {
            player: Player {
                id: format!("p{}", p),
                name: format!("Player {}", p),
            },
            sessions: (0..sessions)
                .map(|s| Session {
                    id: format!("p{}-s{}", p, s),
                    player_id: format!("p{}", p),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1 + s as u32).unwrap(),
                    rows: Skill::all()
                        .into_iter()
                        .map(|skill| {
                            let v = ((p * 7 + s * 3) % 35) as f64;
                            StatRow::with_components(
                                skill.as_ref(),
                                Some(v),
                                Some(v + 1.0),
                                None,
                                Some(v * 0.5),
                                Some(v),
                            )
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    // Force the lazy table outside the measured loop.
    let table = ReferenceTable::builtin();

    c.bench_function("classify (string keys)", |b| {
        b.iter(|| classify(black_box(" Fore Hand "), black_box("spin"), black_box(23.7)))
    });

    let histories = synthetic_histories(200, 12);
    c.bench_function("leaderboard (200 players x 12 sessions)", |b| {
        b.iter(|| build_leaderboard(table, black_box(&histories), 3.0))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
