//! Shared fixtures for labelscope scenario tests

#![allow(dead_code, unused_imports)]

pub mod fixtures;

pub use fixtures::{assign, dataset, init_tracing, user_with};
