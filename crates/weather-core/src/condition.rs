//! WeatherCondition — one row of the weather catalog.

use serde::{Deserialize, Serialize};

/// A fixed-shape weather record. Every field is required; a row is either
/// absent or fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherCondition {
  /// Caller-assigned primary key.
  pub id:          i64,
  /// Label such as `"Sunny"` or `"Clear Night"`.
  pub condition:   String,
  /// Degrees Celsius; may be negative.
  pub temperature: i64,
  /// Short display glyph.
  pub emoji:       String,
  pub mood:        String,
}

impl WeatherCondition {
  pub fn new(
    id:          i64,
    condition:   impl Into<String>,
    temperature: i64,
    emoji:       impl Into<String>,
    mood:        impl Into<String>,
  ) -> Self {
    Self {
      id,
      condition: condition.into(),
      temperature,
      emoji: emoji.into(),
      mood: mood.into(),
    }
  }
}

/// The built-in catalog used to seed an empty store.
pub fn default_conditions() -> Vec<WeatherCondition> {
  vec![
    WeatherCondition::new(1, "Sunny", 25, "☀️", "energetic"),
    WeatherCondition::new(2, "Rainy", 15, "🌧️", "cozy"),
    WeatherCondition::new(3, "Cloudy", 18, "☁️", "contemplative"),
    WeatherCondition::new(4, "Snowy", -2, "❄️", "serene"),
    WeatherCondition::new(5, "Foggy", 12, "🌫️", "mysterious"),
    WeatherCondition::new(6, "Partly Cloudy", 22, "⛅", "balanced"),
    WeatherCondition::new(7, "Stormy", 16, "⛈️", "intense"),
    WeatherCondition::new(8, "Clear Night", 10, "🌙", "romantic"),
    WeatherCondition::new(9, "Windy", 14, "💨", "restless"),
    WeatherCondition::new(10, "Hot", 35, "🔥", "passionate"),
    WeatherCondition::new(11, "Crisp", 5, "🍂", "refreshing"),
    WeatherCondition::new(12, "Humid", 28, "💧", "sluggish"),
  ]
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn default_catalog_has_unique_ascending_ids() {
    let catalog = default_conditions();
    assert_eq!(catalog.len(), 12);

    let ids: Vec<i64> = catalog.iter().map(|c| c.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
  }

  #[test]
  fn json_field_names_match_columns() {
    let sunny = WeatherCondition::new(1, "Sunny", 72, "☀️", "Cheerful");
    let value = serde_json::to_value(&sunny).unwrap();

    assert_eq!(value["id"], 1);
    assert_eq!(value["condition"], "Sunny");
    assert_eq!(value["temperature"], 72);
    assert_eq!(value["emoji"], "☀️");
    assert_eq!(value["mood"], "Cheerful");
  }

  #[test]
  fn missing_field_is_rejected() {
    let err = serde_json::from_str::<WeatherCondition>(
      r#"{"id":1,"condition":"Sunny","temperature":72,"emoji":"x"}"#,
    );
    assert!(err.is_err());
  }
}
