use qfy::{Condition, FactKey, MapFact, Qualifier};
use tracing_subscriber::EnvFilter;

const COUNTRY: FactKey = FactKey::new(1);
const BROWSER: FactKey = FactKey::new(2);
const DOMAINS: FactKey = FactKey::new(3);

// dictionary-encoded values
const US: i64 = 1;
const IE: i64 = 10;
const A_COM: i64 = 20;
const B_COM: i64 = 21;

fn main() {
    // RUST_LOG=qfy=debug shows registrations
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut qualifier = Qualifier::new();
    qualifier.resolve(
        COUNTRY
            .must_be(Condition::one_of([US]))
            .and(BROWSER.must_be(Condition::none_of([IE]))),
        1,
    );
    qualifier.resolve(
        COUNTRY
            .must_be(Condition::one_of([US]))
            .and(DOMAINS.must_be(Condition::one_of([A_COM, B_COM]))),
        2,
    );

    println!("{qualifier}");
    for target in qualifier.targets() {
        println!("  {} => {}", target.outcome(), target.rule());
    }

    let fact = MapFact::new()
        .set(COUNTRY, US)
        .set(DOMAINS, vec![B_COM]);
    println!("Selected: {:?}", qualifier.select(&fact));
}
