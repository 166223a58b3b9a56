pub mod identity_record;

pub use identity_record::*;
