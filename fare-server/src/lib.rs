//! Bus fare server.
//!
//! Answers "how much is the bus from here to there?" for the stage fare
//! network, and the same for highway (expressway) services, from tables
//! loaded once at startup.

pub mod config;
pub mod domain;
pub mod fares;
pub mod network;
pub mod web;
