//! # Game Poll Bot
//!
//! A Telegram bot that asks a fixed roster whether they are playing tonight.
//!
//! ## Features
//! - Admin-controlled voting rounds with a non-anonymous poll
//! - Votes from poll answers or standalone `+` / `-` in chat
//! - A single reminder to everybody one hour before the daily deadline
//! - All-time attendance per participant, kept in a flat roster file

/// Telegram command parsing and update handlers
pub mod bot;
/// Configuration from environment variables
pub mod config;
/// Outbound sending, the session coordinator, deadline notifier and health endpoint
pub mod services;
/// Roster file persistence
pub mod storage;
/// Logging, time and chat text helpers
pub mod utils;
/// Votes, the ledger and the session state machine
pub mod voting;
