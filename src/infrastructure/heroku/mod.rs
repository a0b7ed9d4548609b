//! # Heroku Adapter
//!
//! Implements `HerokuApi` over the Heroku Platform API and the `ClientFactory`
//! strategies that decide whose credentials a request runs under.

pub mod client;
pub mod factory;

pub use client::{HttpHerokuClient, http_client};
pub use factory::{GlobalKeyFactory, PerUserFactory};
