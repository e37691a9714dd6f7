//! Library crate for lala-game-back, exposing modules for the server binary and tooling.

pub mod catalog;
pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
