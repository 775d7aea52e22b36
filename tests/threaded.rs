use std::sync::Arc;
use std::thread;

use qfy::{Condition, FactKey, MapFact, Qualifier, QualifierConfig};

const COUNTRY: FactKey = FactKey::new(1);
const BROWSER: FactKey = FactKey::new(2);

fn qualifier(config: QualifierConfig) -> Qualifier {
    let mut qualifier = Qualifier::with_config(config);
    for country in 0..50_i64 {
        qualifier
            .feed(
                country,
                vec![
                    (COUNTRY, Condition::one_of([country, country + 1])),
                    (BROWSER, Condition::none_of([3_i64])),
                ],
            )
            .unwrap();
    }
    qualifier
}

#[test]
fn select_across_threads() {
    let qualifier = Arc::new(qualifier(QualifierConfig::default()));

    let handles: Vec<_> = (0..8_i64)
        .map(|t| {
            let qualifier = Arc::clone(&qualifier);
            thread::spawn(move || {
                for i in 0..200_i64 {
                    let country = (t * 7 + i) % 50;
                    let browser = i % 5;
                    let fact = MapFact::new().set(COUNTRY, country).set(BROWSER, browser);

                    let expected = match (browser, country) {
                        (3, _) => vec![],
                        (_, 0) => vec![0],
                        (_, c) => vec![c - 1, c],
                    };
                    assert_eq!(qualifier.select(&fact), expected, "country {country}");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn small_pool_still_serves_every_thread() {
    let qualifier = Arc::new(qualifier(QualifierConfig::default().with_max_pooled_states(1)));

    thread::scope(|scope| {
        for t in 0..4_i64 {
            let qualifier = &qualifier;
            scope.spawn(move || {
                for _ in 0..100 {
                    let fact = MapFact::new().set(COUNTRY, t + 10);
                    assert_eq!(qualifier.select(&fact), vec![t + 9, t + 10]);
                }
            });
        }
    });
}
