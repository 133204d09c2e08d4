//! Skirmish server library.
//!
//! This module exposes the server components for use in tests and binaries.

pub mod config;
pub mod fighter;
pub mod game_loop;
pub mod geometry;
pub mod physics;
pub mod protocol;
pub mod scheduler;
pub mod state;
pub mod vec2;
pub mod world;
pub mod ws;
