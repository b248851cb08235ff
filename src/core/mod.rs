pub mod calculator;
pub mod errors;
pub mod models;
pub mod optimizer;
pub mod presenter;
pub mod services;
