//! Library subscription service
//!
//! Computes subscription expiration and overdue fines for library users, on top of injected
//! ports for user, book and clock access.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod ports;
