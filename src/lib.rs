//! realtime-keyword - trending keywords read API and contact mailer
//!
//! Serves per-country keyword trends from MongoDB to a static front end and
//! relays contact form submissions over SMTP.

pub mod cli;
pub mod config;
pub mod contact;
pub mod http_server;
pub mod observability;
pub mod trends;
