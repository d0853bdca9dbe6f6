use crate::models::{AppError, AppResult, Credentials, GameInfo, RawGame, VisitStamp};
use crate::services::{AuthService, CookieCache, WargearClient};
use crate::settings::Settings;
use crate::utils::iso_timestamp;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct GameService {
    http_client: Arc<WargearClient>,
    auth_service: AuthService,
    credentials: Credentials,
}

impl GameService {
    pub fn new(
        http_client: Arc<WargearClient>,
        auth_service: AuthService,
        credentials: Credentials,
    ) -> Self {
        Self {
            http_client,
            auth_service,
            credentials,
        }
    }

    /// Live games for the configured user, exactly as the API returned them.
    /// Authorizes on every call.
    pub async fn get_games(&self) -> AppResult<Value> {
        self.auth_service
            .authorize(&self.http_client, &self.credentials)
            .await?;

        self.http_client
            .fetch_game_list(&self.credentials.username)
            .await
    }

    pub async fn get_games_info(&self) -> AppResult<Vec<GameInfo>> {
        let games = self.get_games().await?;
        let shaped = shape_games(&games)?;
        debug!(count = shaped.len(), "Shaped game list");
        Ok(shaped)
    }
}

/// Builds the client, authenticator and game service from settings and runs one fetch.
pub async fn get_games_info(settings: &Settings) -> AppResult<Vec<GameInfo>> {
    let http_client = Arc::new(WargearClient::new(&settings.base_url)?);
    let auth_service = AuthService::new(CookieCache::new(settings.cookie_path.clone()));
    let service = GameService::new(http_client, auth_service, settings.credentials());
    service.get_games_info().await
}

/// Shapes every record of a game-list body, keeping input order.
pub fn shape_games(games: &Value) -> AppResult<Vec<GameInfo>> {
    let records = games.as_array().ok_or_else(|| {
        AppError::UnexpectedShape(format!("expected a list of games, got {}", kind(games)))
    })?;

    records
        .iter()
        .map(|record| shape_game(&RawGame::deserialize(record)?))
        .collect()
}

/// `name` may be missing or of any JSON type; the three timestamp fields must be present.
pub fn shape_game(game: &RawGame) -> AppResult<GameInfo> {
    let msgstamp = game
        .msgstamp
        .as_ref()
        .ok_or(AppError::MissingField("msgstamp"))?;
    let turnstamp = game
        .turnstamp
        .as_ref()
        .ok_or(AppError::MissingField("turnstamp"))?;
    let visitstamps = game
        .visitstamps
        .as_ref()
        .ok_or(AppError::MissingField("visitstamps"))?;

    Ok(GameInfo {
        game_name: game.name.clone(),
        message_timestamp: iso_timestamp(msgstamp)?,
        turn_timestamp: iso_timestamp(turnstamp)?,
        visit_timestamps: shape_visits(visitstamps)?,
    })
}

fn shape_visits(visitstamps: &Value) -> AppResult<Vec<VisitStamp>> {
    match visitstamps {
        Value::Object(players) => players
            .iter()
            .map(|(player, stamp)| {
                Ok(VisitStamp {
                    player: player.clone(),
                    timestamp: iso_timestamp(stamp)?,
                })
            })
            .collect(),
        // An empty PHP array is encoded as `[]` rather than `{}`.
        Value::Array(items) if items.is_empty() => Ok(Vec::new()),
        Value::Null => Err(AppError::MissingField("visitstamps")),
        other => Err(AppError::UnexpectedShape(format!(
            "expected visitstamps object, got {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
