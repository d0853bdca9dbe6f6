pub mod cli;
pub mod models;
pub mod services;
pub mod settings;
pub mod utils;

pub use models::{AppError, AppResult, GameInfo};
pub use services::get_games_info;
pub use settings::Settings;
