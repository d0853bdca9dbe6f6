use crate::models::AppError;

pub fn validate_url(url: &str) -> Result<(), AppError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::InvalidUrl(url.to_string()));
    }

    Ok(())
}

pub fn validate_player_name(player: &str) -> Result<(), AppError> {
    if player.trim().is_empty() {
        return Err(AppError::ValidationError("Player name cannot be empty".to_string()));
    }

    Ok(())
}
