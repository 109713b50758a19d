pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod score_store;
pub mod snapshot;
pub mod wave;

pub use error::{GameError, Result};
