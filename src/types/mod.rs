//! Common types used across the obsrv client library.

pub mod common;

pub use common::*;
