//! Macro for mapping enums to the platform's wire strings
//!
//! Several request parameters are closed sets of lowercase strings (media
//! types, credential kinds). This macro generates `as_str`, `Display` and a
//! case-insensitive `FromStr` from a single mapping table.
//!
//! # Example
//!
//! ```rust
//! use workwx_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Sms,
//!     Mail,
//! }
//!
//! impl_wire_name_conversions!(Channel {
//!     Sms => "sms",
//!     Mail => "mail",
//! });
//!
//! assert_eq!(Channel::Mail.as_str(), "mail");
//! ```

/// Implements `as_str`, `Display` and `FromStr` for wire-name enums
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation sent to the platform
            #[must_use]
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
                match s.to_lowercase().as_str() {
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
    enum TestKind {
        Voice,
        Video,
    }

    impl_wire_name_conversions!(TestKind {
        Voice => "voice",
        Video => "video",
    });

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(TestKind::Voice.to_string(), "voice");
        assert_eq!(TestKind::Video.as_str(), "video");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestKind::from_str("VOICE").unwrap(), TestKind::Voice);
        assert_eq!(TestKind::from_str("ViDeO").unwrap(), TestKind::Video);
    }

    #[test]
    fn test_fromstr_rejects_unknown() {
        let err = TestKind::from_str("image").unwrap_err();
        assert!(err.contains("TestKind"));
    }
}
