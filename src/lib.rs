//! UseSend webhook verification.
//!
//! A library for confirming that inbound webhook deliveries were signed
//! by UseSend, rejecting stale or replayed requests, and parsing the
//! verified body into a typed event.

pub mod config;
pub mod time;
pub mod webhook;
