//! A Flappy Bird arcade clone for the terminal.
//!
//! [`game::Game`] holds the rules and performs no I/O; [`app::App`] wires it to
//! the terminal, the sound device and the high-score file.

pub mod app;
pub mod audio;
pub mod bird;
pub mod config;
pub mod font;
pub mod game;
pub mod geometry;
pub mod highscore;
pub mod input;
pub mod logging;
pub mod pipe;
pub mod render;
pub mod scene;
pub mod synth;
