//! Advisory contrast check.
//!
//! This is a coarse heuristic rather than WCAG contrast: a foreground/background
//! pair passes when their OKLab lightness differs by at least
//! [`MIN_LIGHTNESS_DIFFERENCE`]. Nothing refuses to apply a failing theme.

use serde::Serialize;
use std::fmt;

use sabq_core::types::perceptual_lightness;

use super::types::ThemeConfiguration;

pub const MIN_LIGHTNESS_DIFFERENCE: f32 = 0.5;

/// (background role, foreground role)
pub const CONTRAST_PAIRS: [(&str, &str); 8] = [
    ("primary", "primaryForeground"),
    ("secondary", "secondaryForeground"),
    ("accent", "accentForeground"),
    ("background", "foreground"),
    ("card", "cardForeground"),
    ("popover", "popoverForeground"),
    ("muted", "mutedForeground"),
    ("destructive", "destructiveForeground"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IssueReason {
    InsufficientContrast { difference: f32 },
    MissingColor { role: String },
    UnparseableColor { role: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityIssue {
    pub background_role: String,
    pub foreground_role: String,
    pub reason: IssueReason,
}

impl fmt::Display for AccessibilityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: ", self.background_role, self.foreground_role)?;
        match &self.reason {
            IssueReason::InsufficientContrast { difference } => write!(
                f,
                "lightness difference {:.2} is below {:.2}",
                difference, MIN_LIGHTNESS_DIFFERENCE
            ),
            IssueReason::MissingColor { role } => write!(f, "'{}' has no color", role),
            IssueReason::UnparseableColor { role, value } => {
                write!(f, "'{}' has unreadable color '{}'", role, value)
            }
        }
    }
}

fn lightness_of(theme: &ThemeConfiguration, role: &str) -> Result<f32, IssueReason> {
    let value = theme
        .color(role)
        .ok_or_else(|| IssueReason::MissingColor { role: role.to_string() })?;
    perceptual_lightness(value).map_err(|_| IssueReason::UnparseableColor {
        role: role.to_string(),
        value: value.to_string(),
    })
}

/// Returns every failing pair of [`CONTRAST_PAIRS`], in that order.
pub fn validate_accessibility(theme: &ThemeConfiguration) -> Vec<AccessibilityIssue> {
    CONTRAST_PAIRS
        .iter()
        .filter_map(|(background, foreground)| {
            let reason = match (lightness_of(theme, background), lightness_of(theme, foreground)) {
                (Ok(bg), Ok(fg)) => {
                    let difference = (bg - fg).abs();
                    if difference >= MIN_LIGHTNESS_DIFFERENCE {
                        return None;
                    }
                    IssueReason::InsufficientContrast { difference }
                }
                (Err(reason), _) | (_, Err(reason)) => reason,
            };
            Some(AccessibilityIssue {
                background_role: background.to_string(),
                foreground_role: foreground.to_string(),
                reason,
            })
        })
        .collect()
}
