#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Road report record types and display mappings.
//!
//! This crate defines the canonical report record fetched from the hosted
//! backend, plus the severity/status string lookups used for color coding.
//! Reports are read-only from this system's perspective; unknown severity or
//! status strings degrade to neutral display values rather than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Wire severity value that marks a report as urgent.
pub const SEVERITY_URGENT: &str = "緊急";

/// Placeholder body shown when a report has no description.
pub const NO_DESCRIPTION: &str = "無描述";

/// Neutral display color for status values outside the known set.
pub const NEUTRAL_STATUS_COLOR: &str = "#64748B";

/// A single geolocated road incident report.
///
/// The `id` is stable across refreshes and is the value carried by the
/// hovered-report selection. `geom_wkt` is a well-known-text point geometry
/// in longitude/latitude order; it is kept as the raw wire string because
/// records with unparseable geometry must still appear in the list panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Backend primary key.
    pub id: i64,
    /// Well-known-text point geometry (longitude latitude).
    pub geom_wkt: String,
    /// Incident category label shown on the severity tag.
    #[serde(rename = "type")]
    pub report_type: String,
    /// Severity string; `緊急` renders with the urgent tone.
    pub severity: String,
    /// Free-text description. Empty or missing renders as [`NO_DESCRIPTION`].
    pub description: Option<String>,
    /// Workflow status string; see [`status_color`].
    pub status: String,
    /// When the report was filed. The store orders by this, newest first.
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Returns the display tone for this report's severity tag.
    #[must_use]
    pub fn severity_tone(&self) -> SeverityTone {
        SeverityTone::from_severity(&self.severity)
    }

    /// Returns the description body, falling back to [`NO_DESCRIPTION`] when
    /// the report has no usable description.
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }
}

/// Display tone for the severity tag on popups and list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityTone {
    /// `緊急` reports: red tag.
    Urgent,
    /// Everything else: orange tag.
    Standard,
}

impl SeverityTone {
    /// Maps a wire severity string to its display tone.
    #[must_use]
    pub fn from_severity(severity: &str) -> Self {
        if severity == SEVERITY_URGENT {
            Self::Urgent
        } else {
            Self::Standard
        }
    }

    /// Tag color for this tone.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Urgent => "#DC2626",
            Self::Standard => "#EA580C",
        }
    }
}

/// Known workflow statuses for a report.
///
/// The wire value is an open string; parse failures fall back to the neutral
/// color rather than erroring, since new statuses can appear backend-side
/// before this crate learns about them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
pub enum ReportStatus {
    /// Filed but not yet picked up.
    #[strum(serialize = "待處理")]
    Pending,
    /// A crew is working the report.
    #[strum(serialize = "處理中")]
    InProgress,
    /// Resolved and closed.
    #[strum(serialize = "已結案")]
    Closed,
}

impl ReportStatus {
    /// Display color for this status.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Pending => "#F59E0B",
            Self::InProgress => "#3B82F6",
            Self::Closed => "#22C55E",
        }
    }
}

/// Display color for a wire status value.
///
/// Unknown statuses map to [`NEUTRAL_STATUS_COLOR`].
#[must_use]
pub fn status_color(status: &str) -> &'static str {
    status
        .parse::<ReportStatus>()
        .map_or(NEUTRAL_STATUS_COLOR, ReportStatus::color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(severity: &str, description: Option<&str>) -> Report {
        Report {
            id: 1,
            geom_wkt: "POINT(121.5 25.1)".to_string(),
            report_type: "路面破損".to_string(),
            severity: severity.to_string(),
            description: description.map(ToString::to_string),
            status: "待處理".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn urgent_severity_maps_to_urgent_tone() {
        assert_eq!(report("緊急", None).severity_tone(), SeverityTone::Urgent);
        assert_eq!(report("一般", None).severity_tone(), SeverityTone::Standard);
        assert_eq!(report("", None).severity_tone(), SeverityTone::Standard);
    }

    #[test]
    fn description_falls_back_to_placeholder() {
        assert_eq!(report("一般", None).description_text(), NO_DESCRIPTION);
        assert_eq!(report("一般", Some("")).description_text(), NO_DESCRIPTION);
        assert_eq!(report("一般", Some("坑洞")).description_text(), "坑洞");
    }

    #[test]
    fn known_statuses_have_colors() {
        assert_eq!(status_color("待處理"), ReportStatus::Pending.color());
        assert_eq!(status_color("處理中"), ReportStatus::InProgress.color());
        assert_eq!(status_color("已結案"), ReportStatus::Closed.color());
    }

    #[test]
    fn unknown_status_is_neutral() {
        assert_eq!(status_color("轉介中"), NEUTRAL_STATUS_COLOR);
        assert_eq!(status_color(""), NEUTRAL_STATUS_COLOR);
    }

    #[test]
    fn report_serde_uses_wire_field_names() {
        let json = serde_json::to_value(report("緊急", Some("坑洞"))).unwrap();
        assert_eq!(json["type"], "路面破損");
        assert_eq!(json["id"], 1);
        assert!(json.get("report_type").is_none());
    }
}
