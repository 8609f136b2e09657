use crate::error::{FilterError, Result};
use crate::media::MediaKind;

use super::line::{PayloadType, SdpLine, split_lines};

/// Restricts the sections of one media kind to a single codec.
///
/// Filtering is two-phase. [`discover`](Self::discover) walks the whole
/// document and collects the allowed payload types; only then does the
/// rewrite pass drop `rtpmap`/`fmtp`/`rtcp-fb` lines for every other payload
/// type and replace the format list on the `m=` line.
///
/// RTX payloads (`a=fmtp:<pt> apt=<base>`) are kept only when their base was
/// already allowed at that point in the document, so an `apt` line that
/// precedes its base `rtpmap` is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecFilter {
    kind: MediaKind,
    codec: String,
}

/// Result of [`CodecFilter::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredSdp {
    /// Rewritten document.
    pub sdp: String,
    /// Payload types left on the target `m=` line(s), in discovery order.
    pub allowed: Vec<PayloadType>,
}

impl FilteredSdp {
    /// True when the requested codec was not found in any target section.
    ///
    /// The `m=` line then carries no payload types; callers decide whether
    /// to fall back to the unfiltered document.
    pub fn is_codec_absent(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl CodecFilter {
    /// Create a filter keeping `codec` (as named in `a=rtpmap`, case-sensitive)
    /// in sections of `kind`.
    pub fn new(kind: MediaKind, codec: &str) -> Result<Self> {
        if codec.trim().is_empty() {
            return Err(FilterError::EmptyCodecName);
        }
        Ok(Self {
            kind,
            codec: codec.to_string(),
        })
    }

    /// First pass: collect the payload types to keep, in first-seen order.
    pub fn discover(&self, sdp: &str) -> Vec<PayloadType> {
        let mut allowed = Vec::new();
        let mut in_section = false;

        for (line, _) in split_lines(sdp) {
            match SdpLine::classify(line) {
                SdpLine::Media(media) => in_section = media.opens(self.kind),
                _ if !in_section => {}
                SdpLine::Rtpmap {
                    payload_type,
                    encoding,
                } if encoding.starts_with(self.codec.as_str()) => {
                    allowed.push(payload_type);
                }
                SdpLine::FmtpApt {
                    payload_type,
                    associated,
                } if allowed.contains(&associated) => {
                    allowed.push(payload_type);
                }
                _ => {}
            }
        }

        allowed
    }

    /// Run both passes and return the rewritten document with the allowed set.
    pub fn apply(&self, sdp: &str) -> FilteredSdp {
        let allowed = self.discover(sdp);

        let mut out = String::with_capacity(sdp.len());
        let mut in_section = false;
        let mut dropped = 0usize;

        for (line, terminator) in split_lines(sdp) {
            let classified = SdpLine::classify(line);
            if let SdpLine::Media(media) = &classified {
                in_section = media.opens(self.kind);
            }

            if !in_section {
                out.push_str(line);
                out.push_str(terminator);
                continue;
            }

            match classified {
                SdpLine::Media(media) => {
                    let (prefix, _) = media.split_formats();
                    out.push_str(prefix);
                    for pt in &allowed {
                        out.push(' ');
                        out.push_str(&pt.to_string());
                    }
                }
                other => match other.keyed_payload_type() {
                    Some(pt) if !allowed.contains(&pt) => {
                        dropped += 1;
                        continue;
                    }
                    _ => out.push_str(line),
                },
            }
            out.push_str(terminator);
        }

        if allowed.is_empty() {
            tracing::warn!(kind = %self.kind, codec = %self.codec, "codec not found in offer");
        } else {
            tracing::debug!(
                kind = %self.kind,
                codec = %self.codec,
                ?allowed,
                dropped,
                "filtered SDP"
            );
        }

        FilteredSdp { sdp: out, allowed }
    }

    /// Rewrite `sdp` so sections of this filter's kind offer only its codec.
    pub fn filter(&self, sdp: &str) -> String {
        self.apply(sdp).sdp
    }
}

/// Filter `sdp` so that `kind` sections only offer `codec` (and its RTX).
///
/// Fails fast on an unknown `kind` or an empty `codec`; never fails on the
/// SDP text itself.
///
/// ```
/// let sdp = "m=audio 9 UDP/TLS/RTP/SAVPF 111 0\r\n\
///            a=rtpmap:111 opus/48000/2\r\n\
///            a=rtpmap:0 PCMU/8000\r\n";
/// let filtered = codecfilter::filter_codec(sdp, "audio", "opus").unwrap();
/// assert_eq!(filtered, "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\na=rtpmap:111 opus/48000/2\r\n");
/// ```
pub fn filter_codec(sdp: &str, kind: &str, codec: &str) -> Result<String> {
    let filter = CodecFilter::new(kind.parse::<MediaKind>()?, codec)?;
    Ok(filter.filter(sdp))
}
