//! augur: a terminal analyst desk for security & edge earnings, with
//! strategic analysis generated by a remote text-generation endpoint.

pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod dashboard;
pub mod dataset;
pub mod desk;
pub mod error;
pub mod events;
pub mod generator;
pub mod prompts;
pub mod resilience;
pub mod session;
pub mod spinner;
