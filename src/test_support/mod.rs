//! Helpers shared by unit tests.

pub mod socket_guard;
pub mod trickle_server;
