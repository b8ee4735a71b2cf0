//! # SessionKeep API
//!
//! Thin actix-web binding over `sk_core`: Bearer authentication middleware,
//! refresh tokens carried in an HTTP-only cookie, and the account
//! confirmation and password reset endpoints.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
