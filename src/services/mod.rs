pub mod db_init;

pub mod alert_store;
pub mod sql_store;

pub use alert_store::{AlertStore, MemoryAlertStore};
pub use sql_store::SqlAlertStore;
