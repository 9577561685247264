//! `campus-site` library crate.
//!
//! Fetches the programs, events, and news CSV files behind the site pages and
//! renders them into HTML cards, calendar widget data, and modal content.
//! The page chrome (scroll effects, counters, widgets, form gating) is modelled
//! as plain state so it can be driven and tested without a browser.
//!
//! The binary (`site`) is a thin wrapper around this library.

pub mod app;
pub mod calendar;
pub mod chrome;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod modal;
pub mod page;
pub mod render;
pub mod report;
