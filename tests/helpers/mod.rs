//! Test helpers module
//!
//! This module provides utilities and helpers for testing CompanyBot.
//! It includes an in-memory store, a recording transport, a mock Bot API
//! server and a Postgres container helper.

#![allow(dead_code)]

pub mod database_helper;
pub mod memory_gateway;
pub mod recording_transport;
pub mod telegram_mock;
pub mod test_data;

pub use database_helper::*;
pub use memory_gateway::*;
pub use recording_transport::*;
pub use telegram_mock::*;
pub use test_data::*;
