pub mod expression;
pub mod operators;

pub use expression::{Expression, YieldColumn};
pub use operators::{AggregateFunction, BinaryOperator, UnaryOperator};
