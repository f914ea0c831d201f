pub mod alert;

pub use alert::{Alert, Condition, NewAlert};
