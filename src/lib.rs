pub mod cli;
pub mod commands;
pub mod icons;
pub mod utils;
