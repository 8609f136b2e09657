use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default value of [`OfferRequest::video_transform`].
pub const DEFAULT_VIDEO_TRANSFORM: &str = "none";

/// Role of a session description in the offer/answer model (RFC 3264).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Pranswer,
    Answer,
    Rollback,
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Offer => "offer",
            Self::Pranswer => "pranswer",
            Self::Answer => "answer",
            Self::Rollback => "rollback",
        };
        f.write_str(s)
    }
}

/// A typed SDP document, serialized as `{"type":"offer","sdp":"v=0..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Body posted to the remote negotiation endpoint.
///
/// ```text
/// {"type":"offer","sdp":"v=0\r\n...","video_transform":"none"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRequest {
    #[serde(flatten)]
    pub description: SessionDescription,
    /// Server-side processing applied to the returned video track.
    #[serde(default = "default_video_transform")]
    pub video_transform: String,
}

impl OfferRequest {
    pub fn new(description: SessionDescription, video_transform: &str) -> Self {
        Self {
            description,
            video_transform: video_transform.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn default_video_transform() -> String {
    DEFAULT_VIDEO_TRANSFORM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_json_shape() {
        let offer = SessionDescription::offer("v=0\r\n");
        assert_eq!(offer.to_json().unwrap(), r#"{"type":"offer","sdp":"v=0\r\n"}"#);

        let answer = SessionDescription::from_json(r#"{"sdp":"v=0","type":"answer"}"#).unwrap();
        assert_eq!(answer, SessionDescription::answer("v=0"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(SessionDescription::from_json(r#"{"type":"bogus","sdp":""}"#).is_err());
    }

    #[test]
    fn offer_request_flattens_description() {
        let request = OfferRequest::new(SessionDescription::offer("v=0"), "edges");
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "offer");
        assert_eq!(value["sdp"], "v=0");
        assert_eq!(value["video_transform"], "edges");
    }

    #[test]
    fn offer_request_defaults_video_transform() {
        let request: OfferRequest =
            serde_json::from_str(r#"{"type":"offer","sdp":"v=0"}"#).unwrap();
        assert_eq!(request.video_transform, DEFAULT_VIDEO_TRANSFORM);
    }
}
