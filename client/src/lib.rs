#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod config;
pub mod ngp;
pub mod outcome;
pub mod payload;
pub mod revmsg;
pub mod soap;
pub mod validation;
