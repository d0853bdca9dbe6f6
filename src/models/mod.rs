pub mod auth;
pub mod error;
pub mod game;

pub use auth::*;
pub use error::*;
pub use game::*;
