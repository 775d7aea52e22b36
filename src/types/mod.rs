pub(crate) mod condition;
mod fact;
mod ints64;
mod qualifier;
mod rule;
mod state;
mod value;

pub use condition::{Condition, ConditionKind};
pub use fact::{Fact, FactKey, FactValue, MapFact};
pub use ints64::Ints64;
pub use qualifier::{Qualifier, Target};
pub use rule::{Rule, RuleKind};
pub use state::{Outcome, State};
pub use value::{Number, Value};
