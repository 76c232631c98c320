//! Closed vocabularies shared by entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when parsing a string that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $storage:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Lowercase storage form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $storage),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            /// Accepts the storage form and the wire form, ignoring case.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace('_', "");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().replace('_', "") == normalized)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

string_enum! {
    /// External social platforms an account can be linked to.
    Platform, "platform" {
        Instagram => "instagram",
        Twitter => "twitter",
        Youtube => "youtube",
        Linkedin => "linkedin",
        Facebook => "facebook",
        Tiktok => "tiktok",
    }
}

string_enum! {
    PostType, "post type" {
        Text => "text",
        Image => "image",
        Video => "video",
        Carousel => "carousel",
        Story => "story",
        Reel => "reel",
    }
}

string_enum! {
    InsightType, "insight type" {
        BestTime => "best_time",
        Content => "content",
        Audience => "audience",
        Hashtags => "hashtags",
        Trend => "trend",
        Performance => "performance",
    }
}

impl Default for PostType {
    fn default() -> Self {
        Self::Text
    }
}
