//! Client side of the business outreach platform: typed REST access plus the
//! page logic the GTK front end renders.

pub mod api;
pub mod config;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod views;
