use std::sync::Arc;
use std::thread;

use qfy::{Condition, FactKey, MapFact, Qualifier};

const AGE: FactKey = FactKey::new(1);
const SEGMENTS: FactKey = FactKey::new(2);

fn main() {
    let mut qualifier = Qualifier::new();
    qualifier.resolve(AGE.must_be(Condition::greater_or_equal(18_i64)), 100);
    qualifier.resolve(
        AGE.must_be(Condition::greater_or_equal(18_i64))
            .and(SEGMENTS.must_be(Condition::none_of([7_i64]))),
        200,
    );
    let qualifier = Arc::new(qualifier);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let q = Arc::clone(&qualifier);
            thread::spawn(move || {
                let fact = MapFact::new()
                    .set(AGE, 16_i64 + i64::from(i))
                    .set(SEGMENTS, vec![i64::from(i) + 5]);

                let result = q.select(&fact);
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
