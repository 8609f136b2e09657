//! Offer preparation and the negotiation session context.
//!
//! The local peer produces an offer, codec preferences narrow it with
//! [`CodecFilter`], and the result is sent to a remote endpoint which
//! replies with an answer:
//!
//! ```text
//! local offer ──► prepare_offer ──► OfferRequest ──► Negotiator ──► answer
//!                 (audio, then video)                (HTTP, ...)
//! ```
//!
//! The transport behind [`Negotiator`] is not part of this crate.

pub mod description;

use parking_lot::Mutex;

use crate::error::{FilterError, Result};
use crate::media::MediaKind;
use crate::sdp::CodecFilter;
pub use description::{DEFAULT_VIDEO_TRANSFORM, OfferRequest, SdpType, SessionDescription};

/// Selection value meaning "leave this kind unfiltered".
pub const DEFAULT_CODEC_SELECTION: &str = "default";

/// Codec to keep per media kind. `None` leaves that kind untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecPreferences {
    pub audio: Option<String>,
    pub video: Option<String>,
}

impl CodecPreferences {
    /// Build preferences from selection strings, where `"default"` or an
    /// empty string means no filtering for that kind.
    pub fn from_selection(audio: &str, video: &str) -> Self {
        Self {
            audio: selected(audio),
            video: selected(video),
        }
    }

    pub fn codec_for(&self, kind: MediaKind) -> Option<&str> {
        match kind {
            MediaKind::Audio => self.audio.as_deref(),
            MediaKind::Video => self.video.as_deref(),
        }
    }
}

fn selected(selection: &str) -> Option<String> {
    let selection = selection.trim();
    if selection.is_empty() || selection == DEFAULT_CODEC_SELECTION {
        None
    } else {
        Some(selection.to_string())
    }
}

/// What to do when a preferred codec is missing from the offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCodecPolicy {
    /// Send the offer with an empty format list for that kind.
    #[default]
    Keep,
    /// Send that kind's sections as they were before filtering.
    Unfiltered,
    /// Fail with [`FilterError::CodecUnavailable`].
    Reject,
}

/// Apply `preferences` to an offer, audio first then video.
pub fn prepare_offer(
    offer: &SessionDescription,
    preferences: &CodecPreferences,
    policy: EmptyCodecPolicy,
) -> Result<SessionDescription> {
    if offer.sdp_type != SdpType::Offer {
        return Err(FilterError::UnexpectedSdpType {
            expected: SdpType::Offer,
            actual: offer.sdp_type,
        });
    }

    let mut sdp = offer.sdp.clone();
    for kind in MediaKind::ALL {
        let Some(codec) = preferences.codec_for(kind) else {
            continue;
        };
        let filtered = CodecFilter::new(kind, codec)?.apply(&sdp);
        if !filtered.is_codec_absent() {
            sdp = filtered.sdp;
            continue;
        }
        match policy {
            EmptyCodecPolicy::Keep => sdp = filtered.sdp,
            EmptyCodecPolicy::Unfiltered => {
                tracing::info!(%kind, codec, "codec not offered, sending unfiltered sections");
            }
            EmptyCodecPolicy::Reject => {
                return Err(FilterError::CodecUnavailable {
                    kind,
                    codec: codec.to_string(),
                });
            }
        }
    }

    Ok(SessionDescription::offer(sdp))
}

/// Exchanges an offer for an answer with a remote peer.
pub trait Negotiator {
    fn negotiate(&self, request: &OfferRequest) -> Result<SessionDescription>;
}

impl<F> Negotiator for F
where
    F: Fn(&OfferRequest) -> Result<SessionDescription>,
{
    fn negotiate(&self, request: &OfferRequest) -> Result<SessionDescription> {
        self(request)
    }
}

/// Negotiation settings held by a [`NegotiationSession`].
#[derive(Debug, Clone)]
pub struct NegotiationConfig {
    pub preferences: CodecPreferences,
    pub empty_codec_policy: EmptyCodecPolicy,
    /// Forwarded to the endpoint as `video_transform`.
    pub video_transform: String,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            preferences: CodecPreferences::default(),
            empty_codec_policy: EmptyCodecPolicy::default(),
            video_transform: DEFAULT_VIDEO_TRANSFORM.to_string(),
        }
    }
}

/// The offer as sent and the answer as received by the last negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub offer: SessionDescription,
    pub answer: SessionDescription,
}

/// Explicit context for one peer's negotiation.
///
/// Interior mutability via `Mutex` allows the session to be shared across
/// threads behind an `Arc`.
pub struct NegotiationSession<N> {
    negotiator: N,
    config: NegotiationConfig,
    last_exchange: Mutex<Option<Exchange>>,
}

impl<N: Negotiator> NegotiationSession<N> {
    pub fn new(negotiator: N, config: NegotiationConfig) -> Self {
        Self {
            negotiator,
            config,
            last_exchange: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    /// Filter `offer`, send it, and return the remote answer.
    pub fn negotiate(&self, offer: &SessionDescription) -> Result<SessionDescription> {
        let offer = prepare_offer(
            offer,
            &self.config.preferences,
            self.config.empty_codec_policy,
        )?;
        let request = OfferRequest::new(offer, &self.config.video_transform);

        tracing::debug!(video_transform = %request.video_transform, "sending offer");
        let answer = self.negotiator.negotiate(&request)?;

        if answer.sdp_type != SdpType::Answer {
            tracing::warn!(sdp_type = %answer.sdp_type, "negotiator returned a non-answer");
            return Err(FilterError::UnexpectedSdpType {
                expected: SdpType::Answer,
                actual: answer.sdp_type,
            });
        }

        tracing::info!("negotiation complete");
        *self.last_exchange.lock() = Some(Exchange {
            offer: request.description,
            answer: answer.clone(),
        });
        Ok(answer)
    }

    /// Returns a clone of the last successful exchange, if any.
    pub fn last_exchange(&self) -> Option<Exchange> {
        self.last_exchange.lock().clone()
    }

    /// Forget the last exchange (e.g. when the peer connection is closed).
    pub fn reset(&self) {
        *self.last_exchange.lock() = None;
    }
}
