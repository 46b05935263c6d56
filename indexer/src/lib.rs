// src/lib.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod util;

pub mod layout;
pub mod index;
pub mod scan;

pub mod commands;

pub use error::{IndexError, Result};
pub use index::Index;
pub use layout::{Layout, Shape};
pub use scan::{build_index, scan, Match, Matches, ScanOptions};
