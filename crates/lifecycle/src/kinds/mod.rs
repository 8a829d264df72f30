//! Built-in resource kinds

pub mod compute_instance;
pub mod mysql_database;

pub use compute_instance::ComputeInstance;
pub use mysql_database::MysqlDatabase;
