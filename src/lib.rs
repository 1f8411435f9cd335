//! Library exports for the URL shortener application
//!
//! This module exposes internal components for the binary and the tests.

pub mod config;
pub mod database;
pub mod error;
pub mod generator;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
pub mod store;
