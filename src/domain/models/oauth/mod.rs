pub mod discord_user;

pub use discord_user::*;
