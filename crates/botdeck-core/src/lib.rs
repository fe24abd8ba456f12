//! Core botdeck library (session lifecycle, directory client, collection views, config).

pub mod auth;
pub mod config;
pub mod demo;
pub mod directory;
pub mod models;
pub mod stats;
pub mod view;
