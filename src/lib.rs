#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod board;
mod common;
mod config;
mod game;
mod ship;
pub mod sim;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
