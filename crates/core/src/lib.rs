pub mod error;
pub mod media;
pub mod negotiation;
pub mod sdp;

pub use error::{FilterError, Result};
pub use media::MediaKind;
pub use negotiation::{
    CodecPreferences, EmptyCodecPolicy, NegotiationConfig, NegotiationSession, Negotiator,
    OfferRequest, SdpType, SessionDescription, prepare_offer,
};
pub use sdp::{CodecFilter, FilteredSdp, PayloadType, filter_codec};
