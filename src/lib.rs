//! InvenTree inventory library
//!
//! Part catalog, bills of materials, stock locations and items with a full
//! tracking history, and build orders, persisted with sea-orm.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod admin;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod services;
pub mod tree;

pub use errors::ServiceError;
pub use services::ServiceContainer;
