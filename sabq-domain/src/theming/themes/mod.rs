//! Built-in theme presets.

pub mod high_contrast;
pub mod sabq_dark;
pub mod sabq_light;
pub mod sabq_sepia;

pub use high_contrast::HighContrastTheme;
pub use sabq_dark::SabqDarkTheme;
pub use sabq_light::SabqLightTheme;
pub use sabq_sepia::SabqSepiaTheme;

use super::types::ThemeConfiguration;

fn palette(id: &str, name: &str, name_ar: &str, colors: &[(&str, &str)]) -> ThemeConfiguration {
    colors
        .iter()
        .fold(ThemeConfiguration::new(id, name, name_ar), |theme, (role, value)| {
            theme.with_color(*role, *value)
        })
}

/// The hard-coded baseline palette.
pub fn default_theme() -> ThemeConfiguration {
    SabqLightTheme::create()
}

/// Value used for a known role a theme leaves out.
pub fn fallback_color(role: &str) -> Option<&'static str> {
    SabqLightTheme::COLORS
        .iter()
        .find(|(known, _)| *known == role)
        .map(|(_, value)| *value)
}

pub fn presets() -> Vec<ThemeConfiguration> {
    vec![
        SabqLightTheme::create(),
        SabqDarkTheme::create(),
        SabqSepiaTheme::create(),
        HighContrastTheme::create(),
    ]
}

pub fn preset(id: &str) -> Option<ThemeConfiguration> {
    presets().into_iter().find(|theme| theme.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theming::accessibility::validate_accessibility;
    use crate::theming::types::KNOWN_ROLES;

    #[test]
    fn test_every_preset_defines_every_known_role() {
        for theme in presets() {
            assert!(
                theme.missing_roles().is_empty(),
                "{} is missing {:?}",
                theme.id,
                theme.missing_roles()
            );
            assert_eq!(theme.extra_roles().count(), 0);
        }
    }

    #[test]
    fn test_presets_pass_accessibility_heuristic() {
        for theme in presets() {
            let issues = validate_accessibility(&theme);
            assert!(issues.is_empty(), "{}: {:?}", theme.id, issues);
        }
    }

    #[test]
    fn test_fallbacks_cover_known_roles() {
        for role in KNOWN_ROLES {
            assert_eq!(fallback_color(role), default_theme().color(role));
        }
        assert_eq!(fallback_color("chartPrimary"), None);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset("sabq-dark").map(|t| t.name), Some("Sabq Dark".to_string()));
        assert!(preset("nope").is_none());
        assert!(preset(SabqSepiaTheme::ID).and_then(|t| t.typography).is_some());
    }
}
