#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

pub mod categories;
pub mod export;
pub mod server;
pub mod suggest;
pub mod util;
pub mod youtube;
