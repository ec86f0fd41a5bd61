//! Core utilities shared by the valuation and scheduling layers

pub mod time;
