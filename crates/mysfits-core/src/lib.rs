//! Core types and trait definitions for the Mysfits service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The server, the store backends and the stream processor all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod error;
pub mod mysfit;
pub mod store;

pub use client::MysfitClient;
pub use error::{Error, Result};
