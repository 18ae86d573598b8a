//! Pilgrim Site Library
//!
//! Config-driven landing page for a pilgrimage travel agency: the site
//! config store with its one-shot remote refresh, the booking countdown,
//! video source classification, HTML rendering and the web server.

// Module declarations
pub mod branding;
pub mod config;
pub mod constants;
pub mod models;
pub mod render;
pub mod services;

#[cfg(feature = "web")]
pub mod web;
