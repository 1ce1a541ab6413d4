//! Terminal front end for the risk register
//!
//! The binary builds one [`risk_core::RiskDataService`] per run and renders
//! the requested view with [`terminal_ui`].

pub mod session;
pub mod terminal_ui;
