pub mod enums;
pub mod error;
pub mod instruments;

pub mod deserialization;
pub mod ledger;
pub mod record;
pub mod source;
pub mod summary;
