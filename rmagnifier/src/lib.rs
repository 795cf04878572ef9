//! rmagnifier: a full-screen magnifier over a snapshot of the whole desktop.
//!
//! The binary captures every monitor once, opens a window over the selected monitor and
//! lets the user pan (drag) and zoom (wheel, anchored on the pointer) over the capture.

pub mod app;
pub mod args;
pub mod config;
pub mod fullscreen;
pub mod ui;
