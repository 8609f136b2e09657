//! Error types for the codec filter library.

use crate::media::MediaKind;
use crate::negotiation::SdpType;

/// Errors that can occur while preparing or negotiating an offer.
///
/// Variants map to specific failure modes across the stack:
///
/// - **Arguments**: [`EmptyCodecName`](Self::EmptyCodecName),
///   [`UnknownMediaKind`](Self::UnknownMediaKind) — caller-side precondition
///   violations, reported instead of silently producing a no-op filter.
/// - **Policy**: [`CodecUnavailable`](Self::CodecUnavailable) — the requested
///   codec is absent and the caller asked for that to be fatal.
/// - **Negotiation**: [`UnexpectedSdpType`](Self::UnexpectedSdpType),
///   [`Negotiation`](Self::Negotiation), [`Json`](Self::Json).
/// - **I/O**: [`Io`](Self::Io).
///
/// Filtering SDP text never fails on its own: malformed lines pass through.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Codec name was empty or whitespace only.
    #[error("codec name must not be empty")]
    EmptyCodecName,

    /// Media kind was not `audio` or `video`.
    #[error("unknown media kind: {0:?}")]
    UnknownMediaKind(String),

    /// Filtering left no payload types for this kind.
    #[error("codec {codec} not offered in any {kind} section")]
    CodecUnavailable { kind: MediaKind, codec: String },

    /// A session description of the wrong type was supplied or returned.
    #[error("expected {expected} description, got {actual}")]
    UnexpectedSdpType { expected: SdpType, actual: SdpType },

    /// The remote negotiation endpoint rejected the offer.
    #[error("negotiation failed: {0}")]
    Negotiation(String),

    /// Offer or answer JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, FilterError>`.
pub type Result<T> = std::result::Result<T, FilterError>;
