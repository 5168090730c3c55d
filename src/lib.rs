// ABOUTME: Library root for robotutor: re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod ask;
pub mod config;
pub mod tui;
