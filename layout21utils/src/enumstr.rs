//!
//! # Enum-String Mapping Module
//!
//! Defines the [enumstr] macro and paired [EnumStr] trait,
//! mapping between a fieldless enum and a fixed set of strings.
//! Text-based layout formats commonly expose keywords and named values this way.
//!
//! Example:
//!
//! ```rust
//! use layout21utils::{enumstr, EnumStr};
//! use serde::{Deserialize, Serialize};
//!
//! enumstr!(
//!     /// # Record Keywords
//!     Keyword {
//!         Begin: "Begin Cell",
//!         End: "End Cell",
//!     }
//! );
//! assert_eq!(Keyword::from_str("End Cell"), Some(Keyword::End));
//! assert_eq!(Keyword::VARIANTS.len(), 2);
//! ```
//!

///
/// # String-Enumeration Trait
///
/// * `to_str(&self) -> &'static str` converts the enum to its string value.
/// * `from_str(&str) -> Option<Self>` does the opposite.
/// * `VARIANTS` lists every variant, in declaration order.
///
pub trait EnumStr: std::marker::Sized + 'static {
    const VARIANTS: &'static [Self];
    fn to_str(&self) -> &'static str;
    fn from_str(txt: &str) -> Option<Self>;
}

///
/// # Enum-String Pairing Macro
///
/// Creates an `enum` with paired string-values, implementing [EnumStr] and [std::fmt::Display].
/// All variants are fieldless, and derive the common traits including `serde::{Serialize, Deserialize}`,
/// which must be in scope at the invocation site.
///
#[macro_export]
macro_rules! enumstr {
    (   $(#[$meta: meta])*
        $enum_name: ident {
        $( $variant: ident : $strval: literal ),* $(,)?
    }) => {
        $(#[$meta])*
        #[allow(dead_code)]
        #[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $( #[doc=$strval]
                $variant ),*
        }
        impl $crate::EnumStr for $enum_name {
            const VARIANTS: &'static [Self] = &[$( Self::$variant ),*];
            /// Convert a variant to its paired (static) string value.
            fn to_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $strval),*,
                }
            }
            /// Create from one of the string-values. Case *sensitive*.
            fn from_str(txt: &str) -> Option<Self> {
                match txt {
                    $( $strval => Some(Self::$variant)),*,
                    _ => None,
                }
            }
        }
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", $crate::EnumStr::to_str(self))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    enumstr!(
        /// # Display Colors
        Shade {
            Light: "lightBlue",
            Dark: "navy",
        }
    );

    #[test]
    fn test_enumstr() {
        assert_eq!(Shade::Light.to_str(), "lightBlue");
        assert_eq!(Shade::Dark.to_string(), "navy");
        assert_eq!(Shade::from_str("navy"), Some(Shade::Dark));
        // Case sensitive
        assert_eq!(Shade::from_str("lightblue"), None);
        assert_eq!(Shade::VARIANTS, &[Shade::Light, Shade::Dark]);
    }
}
