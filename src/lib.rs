//! TCALC - Terminal Calculator Library
//!
//! A keypad calculator for the terminal that evaluates a single binary
//! operation at a time, with carry-over of the previous result.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
