pub mod private;
pub mod public;
pub mod rest;

pub mod builder;
pub mod parser;
