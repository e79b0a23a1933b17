// ABOUTME: Configuration constants shared by the Escopo packages
// ABOUTME: Environment variable names, worksheet names and their defaults

pub mod constants;

pub use constants::*;
