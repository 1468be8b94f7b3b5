// Smolder: Reddit trend intelligence.
//
// This is the library root. Each module corresponds to one stage of the
// trending-topics pipeline, plus the web surface that exposes it.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reddit;
pub mod scoring;
pub mod topics;
pub mod web;
