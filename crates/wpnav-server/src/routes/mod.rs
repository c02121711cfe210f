pub mod config;
pub mod fragments;
pub mod header;
pub mod health;
pub mod lookup;
