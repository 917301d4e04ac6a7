#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod config;
mod constants;
mod driver;
mod error;

pub use config::Config;
pub use constants::{
    command, command_byte, Access, Channel, ExcitationCurrent, Mode, Register, UpdateRate, Variant, MODE,
};
pub use driver::Ad779x;
pub use error::Ad779xError;
