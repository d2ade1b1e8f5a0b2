//! Class token tables.
//!
//! Each element kind has its own size and leading scale; letter spacing is
//! shared. Headings render one weight step heavier and never use `font-light`.

use super::types::{
    ClassList, ElementKind, FontSize, FontWeight, LetterSpacing, LineHeight, TypographySettings,
};

/// Direction-aware alignment appended to every bundle.
pub const DIRECTIONAL_ALIGNMENT: [&str; 2] = ["rtl:text-right", "ltr:text-left"];

pub fn font_size_class(kind: ElementKind, size: FontSize) -> &'static str {
    use FontSize::*;
    match (kind, size) {
        (ElementKind::Heading, Small) => "text-xl",
        (ElementKind::Heading, Medium) => "text-2xl",
        (ElementKind::Heading, Large) => "text-3xl",
        (ElementKind::Heading, ExtraLarge) => "text-4xl",
        (ElementKind::Body, Small) => "text-sm",
        (ElementKind::Body, Medium) => "text-base",
        (ElementKind::Body, Large) => "text-lg",
        (ElementKind::Body, ExtraLarge) => "text-xl",
        (ElementKind::Summary, Small) => "text-xs",
        (ElementKind::Summary, Medium) => "text-sm",
        (ElementKind::Summary, Large) => "text-base",
        (ElementKind::Summary, ExtraLarge) => "text-lg",
        (ElementKind::Caption, Small) => "text-[0.6875rem]",
        (ElementKind::Caption, Medium) => "text-xs",
        (ElementKind::Caption, Large) => "text-sm",
        (ElementKind::Caption, ExtraLarge) => "text-base",
    }
}

pub fn line_height_class(kind: ElementKind, line_height: LineHeight) -> &'static str {
    use LineHeight::*;
    match (kind, line_height) {
        (ElementKind::Heading, Compact) => "leading-tight",
        (ElementKind::Heading, Normal) => "leading-snug",
        (ElementKind::Heading, Relaxed) => "leading-normal",
        (ElementKind::Heading, Loose) => "leading-relaxed",
        (ElementKind::Body, Compact) => "leading-normal",
        (ElementKind::Body, Normal) => "leading-relaxed",
        (ElementKind::Body, Relaxed) => "leading-loose",
        (ElementKind::Body, Loose) => "leading-[2.25]",
        (ElementKind::Summary, Compact) => "leading-snug",
        (ElementKind::Summary, Normal) => "leading-normal",
        (ElementKind::Summary, Relaxed) => "leading-relaxed",
        (ElementKind::Summary, Loose) => "leading-loose",
        (ElementKind::Caption, Compact) => "leading-tight",
        (ElementKind::Caption, Normal) => "leading-snug",
        (ElementKind::Caption, Relaxed) => "leading-normal",
        (ElementKind::Caption, Loose) => "leading-relaxed",
    }
}

pub fn letter_spacing_class(spacing: LetterSpacing) -> &'static str {
    match spacing {
        LetterSpacing::Tight => "tracking-tight",
        LetterSpacing::Normal => "tracking-normal",
        LetterSpacing::Wide => "tracking-wide",
    }
}

pub fn font_weight_class(kind: ElementKind, weight: FontWeight) -> &'static str {
    match (kind, weight) {
        (ElementKind::Heading, FontWeight::Light) => "font-medium",
        (ElementKind::Heading, FontWeight::Normal) => "font-semibold",
        (ElementKind::Heading, FontWeight::Medium | FontWeight::Semibold) => "font-bold",
        (_, FontWeight::Light) => "font-light",
        (_, FontWeight::Normal) => "font-normal",
        (_, FontWeight::Medium) => "font-medium",
        (_, FontWeight::Semibold) => "font-semibold",
    }
}

/// Size, leading, tracking, weight, then the directional alignment pair.
pub fn class_list(settings: &TypographySettings, kind: ElementKind) -> ClassList {
    let mut tokens = vec![
        font_size_class(kind, settings.font_size),
        line_height_class(kind, settings.line_height),
        letter_spacing_class(settings.letter_spacing),
        font_weight_class(kind, settings.font_weight),
    ];
    tokens.extend(DIRECTIONAL_ALIGNMENT);
    ClassList::new(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all_settings() -> Vec<TypographySettings> {
        let mut out = Vec::new();
        for &font_size in FontSize::ALL {
            for &line_height in LineHeight::ALL {
                for &letter_spacing in LetterSpacing::ALL {
                    for &font_weight in FontWeight::ALL {
                        out.push(TypographySettings {
                            font_size,
                            line_height,
                            letter_spacing,
                            font_weight,
                        });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_headings_never_use_light_weight() {
        for settings in all_settings() {
            let classes = class_list(&settings, ElementKind::Heading);
            assert!(!classes.contains("font-light"), "{:?} produced {}", settings, classes);
        }
    }

    #[test]
    fn test_heading_weight_remap() {
        assert_eq!(font_weight_class(ElementKind::Heading, FontWeight::Light), "font-medium");
        assert_eq!(font_weight_class(ElementKind::Heading, FontWeight::Normal), "font-semibold");
        assert_eq!(font_weight_class(ElementKind::Heading, FontWeight::Medium), "font-bold");
        assert_eq!(font_weight_class(ElementKind::Heading, FontWeight::Semibold), "font-bold");
        assert_eq!(font_weight_class(ElementKind::Caption, FontWeight::Light), "font-light");
    }

    #[test]
    fn test_default_body_bundle() {
        let classes = class_list(&TypographySettings::default(), ElementKind::Body);
        assert_eq!(
            classes.tokens(),
            &[
                "text-base",
                "leading-relaxed",
                "tracking-normal",
                "font-normal",
                "rtl:text-right",
                "ltr:text-left"
            ]
        );
        assert!(classes.contains(font_size_class(ElementKind::Body, FontSize::Medium)));
        assert!(classes.contains(line_height_class(ElementKind::Body, LineHeight::Normal)));
    }

    #[test]
    fn test_every_bundle_ends_with_directional_alignment() {
        for settings in all_settings() {
            for kind in ElementKind::ALL {
                let classes = class_list(&settings, kind);
                assert_eq!(classes.tokens().len(), 6);
                assert_eq!(&classes.tokens()[4..], &DIRECTIONAL_ALIGNMENT);
            }
        }
    }

    #[test]
    fn test_class_list_is_deterministic() {
        let settings = TypographySettings {
            font_size: FontSize::Large,
            ..TypographySettings::default()
        };
        assert_eq!(
            class_list(&settings, ElementKind::Summary).to_string(),
            class_list(&settings, ElementKind::Summary).to_string()
        );
        assert_eq!(
            class_list(&settings, ElementKind::Heading).to_string(),
            "text-3xl leading-snug tracking-normal font-semibold rtl:text-right ltr:text-left"
        );
    }
}
