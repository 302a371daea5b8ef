//! TCP listener and per-connection task supervision.

pub mod listener;
