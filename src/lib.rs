//! Spritekit - Library for editing multi-frame pixel sprites
//!
//! This library provides functionality to:
//! - Hold square sprites of up to 64x64 pixels with any number of frames
//! - Edit frames with pen, eraser, flood fill and eyedropper tools
//! - Preview animations by cycling through frames
//! - Save and load projects in the `.ssp` JSON format
//! - Export frames as PNG, animations as GIF, and spritesheets

pub mod animation;
pub mod cli;
pub mod color;
pub mod command;
pub mod config;
pub mod edit;
pub mod export;
pub mod frame;
pub mod project;
pub mod session;
pub mod sprite;
