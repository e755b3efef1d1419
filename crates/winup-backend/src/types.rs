use serde::{Deserialize, Deserializer, Serialize};

/// One unit of installable update metadata as reported by the update source.
///
/// Field names mirror the wire format of the query step (`Title` / `KB` /
/// `Size` / `IsDownloaded`), so the same type serves both response parsing
/// and the on-disk manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsUpdate {
    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "KB", default, deserialize_with = "lenient_text")]
    pub kb: Option<String>,

    #[serde(rename = "Size", default, deserialize_with = "lenient_bytes")]
    pub size: Option<u64>,

    #[serde(rename = "IsDownloaded", default)]
    pub is_downloaded: bool,
}

impl WindowsUpdate {
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Unknown"
        } else {
            &self.title
        }
    }
}

// The query tool is not consistent about scalar types: identifiers and sizes
// arrive as numbers or strings depending on the module version. Anything that
// cannot be read as the expected shape collapses to None instead of failing
// the whole record.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_bytes<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_u64(),
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Normalize a raw query response into an update list.
///
/// The query step emits `[]` when nothing is pending, a single JSON object
/// for exactly one update, and an array otherwise. Empty text, `null`, and
/// an empty object all count as "no updates".
///
/// # Errors
/// Returns an error when the response is not valid JSON or its records do
/// not have the expected shape.
pub fn parse_update_response(raw: &str) -> Result<Vec<WindowsUpdate>, serde_json::Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(items) => {
            items.into_iter().map(serde_json::from_value).collect()
        }
        serde_json::Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

/// Non-error result of asking the update source what is pending.
///
/// A response that clearly contains updates but cannot be parsed is reported
/// as `UpdatesUnparsed` rather than an error: the caller still knows work is
/// pending, just not what it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    UpToDate,
    Updates(Vec<WindowsUpdate>),
    UpdatesUnparsed,
}

impl QueryOutcome {
    #[must_use]
    pub fn from_response(raw: &str) -> Self {
        match parse_update_response(raw) {
            Ok(updates) if updates.is_empty() => Self::UpToDate,
            Ok(updates) => Self::Updates(updates),
            Err(_) => Self::UpdatesUnparsed,
        }
    }

    /// Number of pending updates, when known.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::UpToDate => Some(0),
            Self::Updates(updates) => Some(updates.len()),
            Self::UpdatesUnparsed => None,
        }
    }
}

/// What the install step should do about a pending reboot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebootPolicy {
    Auto,
    #[default]
    Suppress,
}

impl RebootPolicy {
    #[must_use]
    pub fn from_auto_reboot(auto_reboot: bool) -> Self {
        if auto_reboot { Self::Auto } else { Self::Suppress }
    }

    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Auto => "-AutoReboot",
            Self::Suppress => "-IgnoreReboot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_array_parses_to_zero_updates() {
        assert_eq!(parse_update_response("[]").expect("valid response"), vec![]);
    }

    #[test]
    fn empty_object_parses_to_zero_updates() {
        assert_eq!(parse_update_response("{}").expect("valid response"), vec![]);
    }

    #[test]
    fn blank_and_null_responses_parse_to_zero_updates() {
        assert_eq!(parse_update_response("").expect("valid response"), vec![]);
        assert_eq!(parse_update_response("  \n").expect("valid response"), vec![]);
        assert_eq!(parse_update_response("null").expect("valid response"), vec![]);
    }

    #[test]
    fn single_object_parses_to_one_update() {
        let raw = r#"{"Title": "Cumulative Update", "KB": "KB5034123", "Size": 104857600, "IsDownloaded": false}"#;

        let updates = parse_update_response(raw).expect("valid response");

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].title, "Cumulative Update");
        assert_eq!(updates[0].kb.as_deref(), Some("KB5034123"));
        assert_eq!(updates[0].size, Some(104_857_600));
        assert!(!updates[0].is_downloaded);
    }

    #[test]
    fn array_parses_to_matching_count() {
        let raw = r#"[
            {"Title": "Update A", "KB": "KB1", "Size": 1, "IsDownloaded": true},
            {"Title": "Update B", "KB": "KB2", "Size": 2, "IsDownloaded": false},
            {"Title": "Update C", "KB": "KB3", "Size": 3, "IsDownloaded": false}
        ]"#;

        let updates = parse_update_response(raw).expect("valid response");

        assert_eq!(updates.len(), 3);
        assert_eq!(updates[1].title, "Update B");
    }

    #[test]
    fn numeric_kb_and_string_size_are_tolerated() {
        let raw = r#"{"Title": "Update", "KB": 5034123, "Size": "2048"}"#;

        let updates = parse_update_response(raw).expect("valid response");

        assert_eq!(updates[0].kb.as_deref(), Some("5034123"));
        assert_eq!(updates[0].size, Some(2048));
    }

    #[test]
    fn non_numeric_size_collapses_to_none() {
        let raw = r#"{"Title": "Update", "Size": "250MB"}"#;

        let updates = parse_update_response(raw).expect("valid response");

        assert_eq!(updates[0].size, None);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_update_response("Get-WindowsUpdate : access denied").is_err());
    }

    #[test]
    fn manifest_round_trip_keeps_wire_field_names() {
        let update = WindowsUpdate {
            title: "Update".to_string(),
            kb: Some("KB5034123".to_string()),
            size: Some(512),
            is_downloaded: true,
        };

        let value = serde_json::to_value(&update).expect("update should serialize");

        assert_eq!(value["Title"], "Update");
        assert_eq!(value["KB"], "KB5034123");
        assert_eq!(value["Size"], 512);
        assert_eq!(value["IsDownloaded"], true);
    }

    #[test]
    fn display_title_substitutes_unknown_for_empty() {
        let update = WindowsUpdate {
            title: String::new(),
            kb: None,
            size: None,
            is_downloaded: false,
        };

        assert_eq!(update.display_title(), "Unknown");
    }

    #[test]
    fn query_outcome_classifies_response_shapes() {
        assert_eq!(QueryOutcome::from_response("[]"), QueryOutcome::UpToDate);
        assert_eq!(QueryOutcome::from_response("{}"), QueryOutcome::UpToDate);
        assert_eq!(
            QueryOutcome::from_response(r#"{"Title": "Update"}"#).count(),
            Some(1)
        );
        assert_eq!(
            QueryOutcome::from_response("not json at all"),
            QueryOutcome::UpdatesUnparsed
        );
        assert_eq!(QueryOutcome::from_response("not json at all").count(), None);
    }

    #[test]
    fn reboot_policy_maps_to_install_flags() {
        assert_eq!(RebootPolicy::from_auto_reboot(true).flag(), "-AutoReboot");
        assert_eq!(RebootPolicy::from_auto_reboot(false).flag(), "-IgnoreReboot");
        assert_eq!(RebootPolicy::default(), RebootPolicy::Suppress);
    }
}
