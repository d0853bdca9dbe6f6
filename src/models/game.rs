use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One game as returned by `/rest/GetGameList/my`. Only the fields we shape are kept.
///
/// `name` is passed through untouched, whatever its JSON type; missing reads as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGame {
    #[serde(default)]
    pub name: Value,
    pub msgstamp: Option<Value>,
    pub turnstamp: Option<Value>,
    pub visitstamps: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameInfo {
    #[serde(rename = "game name")]
    pub game_name: Value,
    #[serde(rename = "message timestamp")]
    pub message_timestamp: String,
    #[serde(rename = "turn timestamp")]
    pub turn_timestamp: String,
    #[serde(rename = "visit timestamps")]
    pub visit_timestamps: Vec<VisitStamp>,
}

/// Serialized as a single-entry object `{ player: timestamp }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitStamp {
    pub player: String,
    pub timestamp: String,
}

impl Serialize for VisitStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.player, &self.timestamp)?;
        map.end()
    }
}
