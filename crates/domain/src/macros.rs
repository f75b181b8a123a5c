//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Query parameters such as `grain=day` and config values such as
//! `backend = "file"` share the same lowercase string mapping.
//!
//! # Example
//!
//! ```rust
//! use ecotrack_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Grain {
//!     Day,
//!     Month,
//! }
//!
//! impl_wire_enum_conversions!(Grain {
//!     Day => "day",
//!     Month => "month",
//! });
//! ```

/// Implements `Display`, `FromStr` and `as_str` for fieldless enums
///
/// Parsing is case-insensitive; output is always the given string.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shade {
        Light,
        Dark,
    }

    impl_wire_enum_conversions!(Shade {
        Light => "light",
        Dark => "dark",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(Shade::Light.to_string(), "light");
        assert_eq!(Shade::Dark.as_str(), "dark");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(Shade::from_str("LIGHT").unwrap(), Shade::Light);
        assert_eq!(Shade::from_str(" Dark ").unwrap(), Shade::Dark);
    }

    #[test]
    fn test_fromstr_invalid() {
        let err = Shade::from_str("grey").unwrap_err();
        assert!(err.contains("Invalid Shade"));
    }
}
