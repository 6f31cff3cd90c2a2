pub mod exchange;
pub mod protocol;
