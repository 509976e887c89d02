//! Reusable hover popup.
//!
//! One popup exists per surface, created unanchored at initialize time and
//! re-anchored (or fully removed) on every selection change. Content is
//! rebuilt from scratch each time; there is no incremental update path.

use road_report_report_models::{Report, SeverityTone};

/// Behavioural options for the reusable popup, fixed at initialize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupOptions {
    /// Whether the popup shows a close button.
    pub close_button: bool,
    /// Whether clicking the map dismisses the popup.
    pub close_on_click: bool,
    /// Anchor offset in pixels.
    pub offset: u32,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            close_button: false,
            close_on_click: false,
            offset: 15,
        }
    }
}

/// Severity-tagged summary shown for the hovered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    /// Tag label (the report's incident type).
    pub tag: String,
    /// Tag tone derived from severity.
    pub tone: SeverityTone,
    /// Body text (description or placeholder).
    pub body: String,
}

impl PopupContent {
    /// Derives popup content from a report.
    #[must_use]
    pub fn for_report(report: &Report) -> Self {
        Self {
            tag: report.report_type.clone(),
            tone: report.severity_tone(),
            body: report.description_text().to_string(),
        }
    }

    /// Renders the markup snippet handed to the engine popup.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"report-popup\">\
             <span class=\"report-popup-tag\" style=\"color:{}\">{}</span>\
             <div class=\"report-popup-body\">{}</div>\
             </div>",
            self.tone.color(),
            self.tag,
            self.body,
        )
    }
}
