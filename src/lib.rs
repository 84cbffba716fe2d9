//! Client and atelier portal services for a made-to-measure couture studio.
//!
//! The domain modules are pure and synchronous; everything that talks to the
//! outside world (HTTP, persistence, notifications) goes through the traits
//! in [`orders`], [`fitting`], and [`concierge`].

pub mod concierge;
pub mod config;
pub mod error;
pub mod fitting;
pub mod orders;
pub mod production;
pub mod telemetry;
pub mod worksheet;
