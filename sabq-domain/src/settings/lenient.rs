//! Forgiving decoding of enumerated setting values.
//!
//! Persisted settings outlive the code that wrote them. An enumerated field
//! holding an unknown string (or a value of the wrong JSON type) decodes to
//! the field's default instead of failing the whole record.

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {type_name}")]
pub struct UnknownVariant {
    pub type_name: &'static str,
    pub value: String,
}

/// Lowercases and drops `-`, `_` and spaces, so `extra-large`, `extraLarge`
/// and `extra_large` compare equal.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn resolve<T: Default>(raw: &JsonValue, type_name: &str, parse: fn(&str) -> Option<T>) -> T {
    if let JsonValue::String(s) = raw {
        if let Some(value) = parse(s) {
            return value;
        }
    }
    warn!("Unknown {} value {}; falling back to the default", type_name, raw);
    T::default()
}

/// Declares a `Copy` enum with canonical kebab-case spellings, aliases and a
/// lenient `Deserialize`.
macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $canonical:literal $(| $alias:literal)*
            ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $canonical ),+
                }
            }

            pub fn parse_lenient(input: &str) -> Option<Self> {
                let normalized = $crate::settings::lenient::normalize(input);
                $(
                    if normalized == $crate::settings::lenient::normalize($canonical)
                        $( || normalized == $crate::settings::lenient::normalize($alias) )*
                    {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::settings::lenient::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_lenient(s).ok_or_else(|| $crate::settings::lenient::UnknownVariant {
                    type_name: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                Ok($crate::settings::lenient::resolve(
                    &raw,
                    stringify!($name),
                    $name::parse_lenient,
                ))
            }
        }
    };
}

pub(crate) use lenient_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    lenient_enum! {
        enum Shade {
            Pale => "pale" | "light",
            Deep => "deep",
        }
        default = Pale;
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Extra-Large"), "extralarge");
        assert_eq!(normalize("semi_bold"), "semibold");
        assert_eq!(normalize("extra large"), "extralarge");
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!("LIGHT".parse::<Shade>(), Ok(Shade::Pale));
        assert_eq!(Shade::parse_lenient("deep"), Some(Shade::Deep));
        assert_eq!(
            "murky".parse::<Shade>(),
            Err(UnknownVariant { type_name: "Shade", value: "murky".to_string() })
        );
    }

    #[test]
    fn test_unknown_values_deserialize_to_default() {
        assert_eq!(serde_json::from_value::<Shade>(json!("deep")).unwrap(), Shade::Deep);
        assert_eq!(serde_json::from_value::<Shade>(json!("murky")).unwrap(), Shade::Pale);
        assert_eq!(serde_json::from_value::<Shade>(json!(42)).unwrap(), Shade::Pale);
        assert_eq!(serde_json::from_value::<Shade>(json!(null)).unwrap(), Shade::Pale);
    }

    #[test]
    fn test_serializes_canonical_spelling() {
        assert_eq!(serde_json::to_value(Shade::Pale).unwrap(), json!("pale"));
        assert_eq!(Shade::ALL.len(), 2);
        assert_eq!(Shade::Deep.to_string(), "deep");
    }
}
