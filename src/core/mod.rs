//! Configuration and the request/response data shapes shared by both Lambdas

pub mod config;
pub mod models;
