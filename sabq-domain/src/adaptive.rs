//! Context-aware accent adjustment.
//!
//! [`AdaptiveContext`] captures the reading conditions as plain values; every
//! field is populated when it is built. [`adapt`] derives a small accent
//! palette from a theme for that context and explains each adjustment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use sabq_core::types::Color;

use crate::theming::themes::fallback_color;
use crate::theming::ThemeConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbientLight {
    Dark,
    Dim,
    Normal,
    Bright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Morning 05-11, afternoon 12-16, evening 17-20, night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Light level assumed when no sensor reading is available.
    pub fn typical_ambient_light(self) -> AmbientLight {
        match self {
            TimeOfDay::Morning => AmbientLight::Normal,
            TimeOfDay::Afternoon => AmbientLight::Bright,
            TimeOfDay::Evening => AmbientLight::Dim,
            TimeOfDay::Night => AmbientLight::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserActivity {
    Reading,
    #[default]
    Browsing,
    Writing,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EyeStrain {
    Low,
    Medium,
    High,
}

impl EyeStrain {
    /// Under 30 minutes is low, under 90 medium. Night sessions count one
    /// level higher.
    pub fn estimate(session_length: Duration, time_of_day: TimeOfDay) -> Self {
        let minutes = session_length.as_secs() / 60;
        let base = match minutes {
            0..=29 => EyeStrain::Low,
            30..=89 => EyeStrain::Medium,
            _ => EyeStrain::High,
        };
        if time_of_day == TimeOfDay::Night {
            base.raised()
        } else {
            base
        }
    }

    fn raised(self) -> Self {
        match self {
            EyeStrain::Low => EyeStrain::Medium,
            EyeStrain::Medium | EyeStrain::High => EyeStrain::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveContext {
    pub ambient_light: AmbientLight,
    pub time_of_day: TimeOfDay,
    pub user_activity: UserActivity,
    pub eye_strain: EyeStrain,
    pub session_length: Duration,
}

impl AdaptiveContext {
    /// Eye strain is derived from `session_length` and `time_of_day`.
    pub fn new(
        ambient_light: AmbientLight,
        time_of_day: TimeOfDay,
        user_activity: UserActivity,
        session_length: Duration,
    ) -> Self {
        Self {
            ambient_light,
            time_of_day,
            user_activity,
            eye_strain: EyeStrain::estimate(session_length, time_of_day),
            session_length,
        }
    }

    /// Derives every bucket from the local hour (0-23).
    pub fn at(hour: u32, user_activity: UserActivity, session_length: Duration) -> Self {
        let time_of_day = TimeOfDay::from_hour(hour);
        Self::new(time_of_day.typical_ambient_light(), time_of_day, user_activity, session_length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptivePalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adaptation {
    pub colors: AdaptivePalette,
    pub reasoning: Vec<String>,
}

impl fmt::Display for Adaptation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reasoning.join("; "))
    }
}

fn role_color(theme: &ThemeConfiguration, role: &str) -> Color {
    let value = theme.color(role).or_else(|| fallback_color(role)).unwrap_or("black");
    Color::from_str(value).unwrap_or_else(|e| {
        warn!(
            "Theme color '{}' for {} is unreadable ({}); adapting from the fallback",
            value, role, e
        );
        fallback_color(role)
            .and_then(|fallback| Color::from_str(fallback).ok())
            .unwrap_or_default()
    })
}

/// Lightness shift for the whole palette, plus the accent-only shift.
fn lightness_deltas(context: &AdaptiveContext, reasoning: &mut Vec<String>) -> (f32, f32) {
    let mut delta = 0.0;
    match context.ambient_light {
        AmbientLight::Bright => {
            delta += 0.05;
            reasoning.push("Bright surroundings: colors lightened for visibility".to_string());
        }
        AmbientLight::Dim => {
            delta -= 0.04;
            reasoning.push("Dim surroundings: colors darkened slightly".to_string());
        }
        AmbientLight::Dark => {
            delta -= 0.08;
            reasoning.push("Dark surroundings: colors darkened to reduce glare".to_string());
        }
        AmbientLight::Normal => {}
    }
    if context.time_of_day == TimeOfDay::Night {
        delta -= 0.03;
        reasoning.push("Night time: colors softened".to_string());
    }
    match context.eye_strain {
        EyeStrain::High => {
            delta -= 0.05;
            reasoning.push("High eye strain: colors darkened to rest the eyes".to_string());
        }
        EyeStrain::Medium => {
            delta -= 0.02;
            reasoning.push("Moderate eye strain: colors softened slightly".to_string());
        }
        EyeStrain::Low => {}
    }

    let mut accent_delta = 0.0;
    if context.user_activity == UserActivity::Reading {
        accent_delta -= 0.03;
        reasoning.push("Reading: accent subdued to keep focus on the text".to_string());
    }
    (delta, accent_delta)
}

/// Derives primary, secondary and accent colors for `context` by shifting the
/// theme's OKLCH lightness. The theme itself is left untouched.
pub fn adapt(context: &AdaptiveContext, theme: &ThemeConfiguration) -> Adaptation {
    let mut reasoning = Vec::new();
    let (delta, accent_delta) = lightness_deltas(context, &mut reasoning);
    if reasoning.is_empty() {
        reasoning.push("Conditions are neutral: theme colors unchanged".to_string());
    }

    let shift = |role: &str, amount: f32| {
        role_color(theme, role)
            .adjust_lightness(amount)
            .to_oklch_string()
    };
    Adaptation {
        colors: AdaptivePalette {
            primary: shift("primary", delta),
            secondary: shift("secondary", delta),
            accent: shift("accent", delta + accent_delta),
        },
        reasoning,
    }
}
