pub mod client;
pub mod config;
pub mod drawer;
pub mod error;
pub mod header;
pub mod hover;
pub mod html;
pub mod index;
pub mod io;
pub mod links;
pub mod model;
pub mod panel;
pub mod paths;
pub mod payload;
pub mod render;
pub mod scroll_lock;

pub use error::{NavError, Result};
