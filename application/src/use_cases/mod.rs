//! Use cases for the application layer

pub mod query_model;
pub mod query_models;
pub mod run_challenge;
pub mod run_critique;
pub mod run_debate;
