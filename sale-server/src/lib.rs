//! Garage-sale trip planner server.
//!
//! A web service that answers: "which sales near me are worth
//! visiting, and in what order should I drive to them?"

pub mod domain;
pub mod filter;
pub mod route;
pub mod store;
pub mod web;
