//! Types shared between the skirmish server and its clients.

pub mod config;
pub mod protocol;
pub mod vec2;
