//! Media kinds that can be targeted by the codec filter.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Kind of media section (`m=<kind> ...`) a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Both kinds, in the order offers are filtered.
    pub const ALL: [MediaKind; 2] = [MediaKind::Audio, MediaKind::Video];

    /// The media token as it appears on an `m=` line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Prefix of a line that opens a section of this kind, e.g. `"m=audio "`.
    pub fn media_prefix(&self) -> &'static str {
        match self {
            Self::Audio => "m=audio ",
            Self::Video => "m=video ",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            other => Err(FilterError::UnknownMediaKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!("audio".parse::<MediaKind>().unwrap(), MediaKind::Audio);
        assert_eq!("video".parse::<MediaKind>().unwrap(), MediaKind::Video);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Audio".parse::<MediaKind>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        let err = "application".parse::<MediaKind>().unwrap_err();
        assert!(matches!(err, FilterError::UnknownMediaKind(ref k) if k == "application"));
        assert!("".parse::<MediaKind>().is_err());
    }

    #[test]
    fn prefix_includes_trailing_space() {
        assert_eq!(MediaKind::Audio.media_prefix(), "m=audio ");
        assert_eq!(MediaKind::Video.to_string(), "video");
    }
}
