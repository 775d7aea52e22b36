use qfy::{Condition, Fact, FactKey, FactValue, Qualifier};
use tracing_subscriber::EnvFilter;

const COUNTRY: FactKey = FactKey::new(1);
const BID_FLOOR: FactKey = FactKey::new(2);
const DOMAINS: FactKey = FactKey::new(3);

/// A bid request as an exchange adapter might hold it.
struct BidRequest {
    country: u16,
    bid_floor: f32,
    domains: Vec<u32>,
}

impl Fact for BidRequest {
    fn get_qualifiable(&self, key: FactKey) -> Option<FactValue<'_>> {
        match key {
            COUNTRY => Some(self.country.into()),
            BID_FLOOR => Some(self.bid_floor.into()),
            DOMAINS => Some(self.domains.as_slice().into()),
            _ => None,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut qualifier = Qualifier::new();
    let feeds = [
        (
            91,
            vec![
                (COUNTRY, Condition::one_of([1_i64])),
                (BID_FLOOR, Condition::less_than(2.5)),
            ],
        ),
        (
            92,
            vec![
                (COUNTRY, Condition::none_of([2_i64])),
                (DOMAINS, Condition::one_of([20_i64, 21])),
            ],
        ),
        (93, vec![(BID_FLOOR, Condition::between(3.0, 1.0))]),
        (94, vec![]),
    ];

    for (outcome, checks) in feeds {
        match qualifier.feed(outcome, checks) {
            Ok(()) => println!("registered {outcome}"),
            Err(err) => println!("rejected: {err}"),
        }
    }

    let request = BidRequest {
        country: 1,
        bid_floor: 1.75,
        domains: vec![21, 30],
    };
    println!("{qualifier} selected {:?}", qualifier.select(&request));
}
