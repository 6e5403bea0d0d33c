use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Origin of a discovery observation.
///
/// The serialized names match the tags the collection adapters emit
/// (`"amazon-bestseller"`, `"youtube"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    Note,
    Youtube,
    Zenn,
    Hatena,
    AmazonBestseller,
    Kakaku,
    Makuake,
}

impl SourceType {
    pub const ALL: [SourceType; 7] = [
        SourceType::Note,
        SourceType::Youtube,
        SourceType::Zenn,
        SourceType::Hatena,
        SourceType::AmazonBestseller,
        SourceType::Kakaku,
        SourceType::Makuake,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Note => "note",
            SourceType::Youtube => "youtube",
            SourceType::Zenn => "zenn",
            SourceType::Hatena => "hatena",
            SourceType::AmazonBestseller => "amazon-bestseller",
            SourceType::Kakaku => "kakaku",
            SourceType::Makuake => "makuake",
        }
    }

    /// The social-score channel a seed score for this source is written to.
    ///
    /// Price-comparison and crowdfunding sources have no channel of their own.
    #[must_use]
    pub fn social_channel(self) -> Option<SocialChannel> {
        match self {
            SourceType::Note => Some(SocialChannel::Note),
            SourceType::Youtube => Some(SocialChannel::Youtube),
            SourceType::Zenn => Some(SocialChannel::Zenn),
            SourceType::Hatena => Some(SocialChannel::Hatena),
            SourceType::AmazonBestseller => Some(SocialChannel::Amazon),
            SourceType::Kakaku | SourceType::Makuake => None,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| CoreError::UnsupportedSourceKind(s.to_string()))
    }
}

/// A slot in [`crate::SocialScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialChannel {
    Twitter,
    Youtube,
    Amazon,
    Note,
    Zenn,
    Hatena,
}
