//! Built-in documentation sources.

pub mod klipper;
