//! sshalias: manage aliased `Host` entries in an SSH client config.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
