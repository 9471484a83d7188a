//! Auction House - bidding service with live offer updates.
//!
//! Offers are written through a small REST API. Every committed create or
//! delete is pushed over WebSocket to the clients watching that item.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
