//! 영속 엔티티

pub mod identities;

pub use identities::*;
