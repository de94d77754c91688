//! Command implementations for the pychub CLI

pub mod build;
