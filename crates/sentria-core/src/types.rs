// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Sentria workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Structured description of a crisis, as submitted by the caller.
///
/// Every field is optional; absent fields are omitted when the input is
/// serialized for the generator (mirroring the caller's form, where most
/// fields are blank most of the time).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrisisInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_locales: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_sentiment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_tone: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_style: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kb_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels_context: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_horizon_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_sensitivity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_implications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_involved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Snapshot of the crisis fields currently visible to the chat caller.
///
/// Supplied per chat request; used only to build the grounding context,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibleValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_locales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kb_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Latest generated plan/article text, if the caller has one on screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_plan: Option<String>,
}

/// Which output contract the report generator follows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportMode {
    /// Free-form prose in the input's language.
    Narrative,
    /// A single validated JSON document following the fixed schema.
    Structured,
}

/// A persisted crisis report, as stored in the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Internal auto-increment row id.
    pub id: i64,
    /// Caller-assigned job identifier.
    pub request_id: i64,
    /// Owner of the report.
    pub user_id: i64,
    /// Most recently generated raw output.
    pub result: String,
    /// Possibly-edited copy; equals `result` at creation.
    pub edited_result: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
}

impl ReportRecord {
    /// Text a reader should see: the edited copy when one exists, else the raw
    /// result. Blank-after-trim text counts as absent.
    pub fn display_text(&self) -> Option<&str> {
        let edited = self.edited_result.trim();
        if !edited.is_empty() {
            return Some(edited);
        }
        let raw = self.result.trim();
        if !raw.is_empty() { Some(raw) } else { None }
    }
}

/// A request to the external text generator.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// System/instruction prompt.
    pub system: String,
    /// User message content.
    pub user: String,
    /// Sampling temperature; `None` uses the provider default.
    pub temperature: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn crisis_input_omits_absent_fields() {
        let input = CrisisInput {
            sector: Some("banking".into()),
            urgency_level: Some("high".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"sector\":\"banking\""));
        assert!(!json.contains("crisis_description"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn crisis_input_ignores_unknown_fields() {
        let json = r#"{"sector": "retail", "some_future_field": 1}"#;
        let input: CrisisInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.sector.as_deref(), Some("retail"));
    }

    #[test]
    fn report_mode_round_trips_through_strings() {
        for mode in [ReportMode::Narrative, ReportMode::Structured] {
            let s = mode.to_string();
            assert_eq!(ReportMode::from_str(&s).unwrap(), mode);
        }
        let parsed: ReportMode = serde_json::from_str("\"structured\"").unwrap();
        assert_eq!(parsed, ReportMode::Structured);
    }

    #[test]
    fn display_text_prefers_edited_result() {
        let mut record = ReportRecord {
            id: 1,
            request_id: 42,
            user_id: 7,
            result: "raw".into(),
            edited_result: "edited".into(),
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        assert_eq!(record.display_text(), Some("edited"));

        record.edited_result = "   ".into();
        assert_eq!(record.display_text(), Some("raw"));

        record.result = String::new();
        assert_eq!(record.display_text(), None);
    }
}
