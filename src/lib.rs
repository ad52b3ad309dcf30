pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod guard;
pub mod models;
pub mod report;
pub mod session;
