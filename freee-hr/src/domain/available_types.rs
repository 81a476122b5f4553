use serde::Deserialize;

use super::ClockType;

/// `GET /employees/{id}/time_clocks/available_types`. Older responses use
/// `types` instead of `available_types`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableTypes {
    #[serde(default)]
    pub available_types: Option<Vec<ClockType>>,
    #[serde(default)]
    pub types: Option<Vec<ClockType>>,
}

impl AvailableTypes {
    pub fn into_types(self) -> Vec<ClockType> {
        self.available_types.or(self.types).unwrap_or_default()
    }
}
