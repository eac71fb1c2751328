//! Startup configuration for the drone telemetry relay.
//!
//! The relay bridges MAVLink links (UDP, TCP, serial) to any number of
//! downstream sinks. This crate only deals with loading that configuration:
//! see [`Configuration::load_from_path`].

pub mod configuration;

pub use configuration::*;
