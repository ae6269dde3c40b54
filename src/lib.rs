//! Cross-tabulated rent statistics over listing data, plus a fixed-rate
//! currency reference table.
//!
//! The [`data`] layer loads listings and computes min / average / max per
//! location × property type. [`ui`] renders those tables and drives the
//! text menu.

pub mod config;
pub mod currency;
pub mod data;
pub mod state;
pub mod ui;
