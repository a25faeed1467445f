//! Per-user settings document stored by the settings service.

use serde::{Deserialize, Serialize};

use crate::RecencyList;

/// The parts of the remote settings document the selector reads.
///
/// Other fields in the document are ignored on read and untouched on write
/// because writes only ever send a [`SettingsUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub recent_fulfiller_ids: RecencyList,
}

/// Partial update merged into the remote document. Absent fields are not
/// serialized so the server leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_fulfiller_ids: Option<RecencyList>,
}

impl SettingsUpdate {
    pub fn recent_fulfiller_ids(ids: RecencyList) -> Self {
        Self {
            recent_fulfiller_ids: Some(ids),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recent_fulfiller_ids.is_none()
    }

    /// Merge this update into `settings`, field by field.
    pub fn apply_to(&self, settings: &mut UserSettings) {
        if let Some(ids) = &self.recent_fulfiller_ids {
            settings.recent_fulfiller_ids = ids.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_recent_ids_deserialize_as_empty() {
        let settings: UserSettings = serde_json::from_value(json!({"theme": "dark"})).unwrap();
        assert!(settings.recent_fulfiller_ids.is_empty());
    }

    #[test]
    fn empty_update_serializes_without_fields() {
        let body = serde_json::to_value(SettingsUpdate::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn update_serializes_recent_ids() {
        let update = SettingsUpdate::recent_fulfiller_ids(RecencyList::new(vec!["B".into(), "A".into()]));
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, json!({"recentFulfillerIds": ["B", "A"]}));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut settings = UserSettings {
            recent_fulfiller_ids: RecencyList::new(vec!["A".into()]),
        };
        SettingsUpdate::default().apply_to(&mut settings);
        assert_eq!(settings.recent_fulfiller_ids.ids(), ["A"]);

        SettingsUpdate::recent_fulfiller_ids(RecencyList::new(vec!["C".into()])).apply_to(&mut settings);
        assert_eq!(settings.recent_fulfiller_ids.ids(), ["C"]);
    }
}
