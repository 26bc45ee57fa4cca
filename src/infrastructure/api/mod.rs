mod just_ask;

pub use just_ask::*;
