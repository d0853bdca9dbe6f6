pub mod auth_service;
pub mod cookie_cache;
pub mod game_service;
pub mod http_client;
pub mod profile_scraper;

pub use auth_service::*;
pub use cookie_cache::*;
pub use game_service::*;
pub use http_client::*;
pub use profile_scraper::*;
