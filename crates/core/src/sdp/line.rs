use crate::media::MediaKind;

/// RTP payload type number as it appears in SDP (RFC 3551 §6).
///
/// Dynamic types use 96–127. Wider numbers are still payload types so that
/// they are filtered like any other; values past `u32::MAX` saturate.
pub type PayloadType = u32;

/// Attributes keyed by a payload type (`a=<attr>:<pt> ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadAttribute {
    /// `a=fmtp:<pt>` format parameters (RFC 8866 §6.15).
    Fmtp,
    /// `a=rtcp-fb:<pt>` feedback capability (RFC 4585 §4.2).
    RtcpFb,
    /// `a=rtpmap:<pt>` encoding map (RFC 8866 §6.6).
    Rtpmap,
}

impl PayloadAttribute {
    const PREFIXES: [(&'static str, PayloadAttribute); 3] = [
        ("a=fmtp:", PayloadAttribute::Fmtp),
        ("a=rtcp-fb:", PayloadAttribute::RtcpFb),
        ("a=rtpmap:", PayloadAttribute::Rtpmap),
    ];
}

/// An `m=` line (RFC 8866 §5.14):
///
/// ```text
/// m=<media> <port> <proto> <fmt> ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLine<'a> {
    raw: &'a str,
    media: &'a str,
}

impl<'a> MediaLine<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let rest = raw.strip_prefix("m=")?;
        let media = rest.split_once(' ').map_or(rest, |(media, _)| media);
        Some(Self { raw, media })
    }

    /// Media token (`audio`, `video`, `application`, ...).
    pub fn media(&self) -> &'a str {
        self.media
    }

    /// Whether this line opens a section of `kind` (starts with `m=<kind> `).
    pub fn opens(&self, kind: MediaKind) -> bool {
        self.raw.starts_with(kind.media_prefix())
    }

    /// Split the line into its verbatim prefix and the trailing run of
    /// payload-type numbers.
    ///
    /// `m=audio 9 UDP/TLS/RTP/SAVPF 111 0 8` splits into
    /// `m=audio 9 UDP/TLS/RTP/SAVPF` and `[111, 0, 8]`. Numbers are taken from
    /// the end while they are separated by single spaces, so the port stays
    /// in the prefix. Trailing whitespace belongs to neither part.
    pub fn split_formats(&self) -> (&'a str, Vec<PayloadType>) {
        let trimmed = self.raw.trim_end();
        // The `m=<media> ` head is never part of the format list.
        let head_len = (2 + self.media.len() + 1).min(trimmed.len());
        let (head, mut fields) = trimmed.split_at(head_len);

        let mut formats = Vec::new();
        while let Some(pos) = fields.rfind(' ') {
            let Some(pt) = parse_payload_type(&fields[pos + 1..]) else {
                break;
            };
            formats.push(pt);
            fields = &fields[..pos];
        }
        formats.reverse();

        (&trimmed[..head.len() + fields.len()], formats)
    }
}

/// One SDP line, classified by the shapes the codec filter cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdpLine<'a> {
    /// `m=...`, a media section boundary.
    Media(MediaLine<'a>),
    /// `a=rtpmap:<pt> <encoding>`.
    Rtpmap {
        payload_type: PayloadType,
        encoding: &'a str,
    },
    /// `a=fmtp:<pt> apt=<associated>`, the RTX association (RFC 4588 §8.6).
    FmtpApt {
        payload_type: PayloadType,
        associated: PayloadType,
    },
    /// Any other payload-keyed `fmtp`, `rtcp-fb` or `rtpmap` attribute.
    PayloadAttribute {
        attribute: PayloadAttribute,
        payload_type: PayloadType,
    },
    /// Everything else; always copied through.
    Other,
}

impl<'a> SdpLine<'a> {
    /// Classify a line. `line` must not include its terminator.
    pub fn classify(line: &'a str) -> Self {
        if let Some(media) = MediaLine::parse(line) {
            return Self::Media(media);
        }

        for (prefix, attribute) in PayloadAttribute::PREFIXES {
            let Some(rest) = line.strip_prefix(prefix) else {
                continue;
            };
            let Some((payload_type, tail)) = leading_payload_type(rest) else {
                return Self::Other;
            };
            return match attribute {
                PayloadAttribute::Rtpmap => match tail.strip_prefix(' ') {
                    Some(encoding) => Self::Rtpmap {
                        payload_type,
                        encoding,
                    },
                    None => Self::PayloadAttribute {
                        attribute,
                        payload_type,
                    },
                },
                PayloadAttribute::Fmtp => match tail
                    .strip_prefix(" apt=")
                    .and_then(parse_payload_type)
                {
                    Some(associated) => Self::FmtpApt {
                        payload_type,
                        associated,
                    },
                    None => Self::PayloadAttribute {
                        attribute,
                        payload_type,
                    },
                },
                PayloadAttribute::RtcpFb => Self::PayloadAttribute {
                    attribute,
                    payload_type,
                },
            };
        }

        Self::Other
    }

    /// Payload type keyed by a `fmtp`, `rtcp-fb` or `rtpmap` attribute.
    pub fn keyed_payload_type(&self) -> Option<PayloadType> {
        match self {
            Self::Rtpmap { payload_type, .. }
            | Self::FmtpApt { payload_type, .. }
            | Self::PayloadAttribute { payload_type, .. } => Some(*payload_type),
            Self::Media(_) | Self::Other => None,
        }
    }
}

/// Split an SDP document into `(content, terminator)` pairs.
///
/// The terminator is `"\r\n"`, `"\n"`, or `""` for a final line without a
/// newline, so that rewritten documents keep their original line endings.
pub fn split_lines(sdp: &str) -> impl Iterator<Item = (&str, &str)> {
    sdp.split_inclusive('\n').map(|line| {
        if let Some(content) = line.strip_suffix("\r\n") {
            (content, "\r\n")
        } else if let Some(content) = line.strip_suffix('\n') {
            (content, "\n")
        } else {
            (line, "")
        }
    })
}

fn parse_payload_type(digits: &str) -> Option<PayloadType> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.bytes().fold(0, |pt: PayloadType, b| {
        pt.saturating_mul(10).saturating_add(PayloadType::from(b - b'0'))
    }))
}

/// Parse the run of digits at the start of `s`, returning it with the rest.
fn leading_payload_type(s: &str) -> Option<(PayloadType, &str)> {
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    let payload_type = parse_payload_type(&s[..end])?;
    Some((payload_type, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(line: &str) -> MediaLine<'_> {
        match SdpLine::classify(line) {
            SdpLine::Media(m) => m,
            other => panic!("expected media line, got {other:?}"),
        }
    }

    #[test]
    fn classify_rtpmap() {
        assert_eq!(
            SdpLine::classify("a=rtpmap:111 opus/48000/2"),
            SdpLine::Rtpmap {
                payload_type: 111,
                encoding: "opus/48000/2"
            }
        );
    }

    #[test]
    fn classify_rtx_association() {
        assert_eq!(
            SdpLine::classify("a=fmtp:97 apt=96"),
            SdpLine::FmtpApt {
                payload_type: 97,
                associated: 96
            }
        );
    }

    #[test]
    fn apt_must_end_the_line() {
        assert_eq!(
            SdpLine::classify("a=fmtp:97 apt=96;foo=1"),
            SdpLine::PayloadAttribute {
                attribute: PayloadAttribute::Fmtp,
                payload_type: 97
            }
        );
    }

    #[test]
    fn classify_other_payload_attributes() {
        assert_eq!(
            SdpLine::classify("a=fmtp:111 minptime=10;useinbandfec=1"),
            SdpLine::PayloadAttribute {
                attribute: PayloadAttribute::Fmtp,
                payload_type: 111
            }
        );
        assert_eq!(
            SdpLine::classify("a=rtcp-fb:96 nack pli"),
            SdpLine::PayloadAttribute {
                attribute: PayloadAttribute::RtcpFb,
                payload_type: 96
            }
        );
    }

    #[test]
    fn wildcard_feedback_is_not_payload_keyed() {
        assert_eq!(SdpLine::classify("a=rtcp-fb:* nack"), SdpLine::Other);
    }

    #[test]
    fn unrelated_lines() {
        for line in ["v=0", "a=mid:0", "a=sendrecv", "c=IN IP4 0.0.0.0", ""] {
            assert_eq!(SdpLine::classify(line), SdpLine::Other, "{line}");
        }
    }

    #[test]
    fn wide_payload_type_is_still_keyed() {
        assert_eq!(
            SdpLine::classify("a=rtpmap:70000 PCMU/8000"),
            SdpLine::Rtpmap {
                payload_type: 70000,
                encoding: "PCMU/8000"
            }
        );
        assert_eq!(
            SdpLine::classify("a=fmtp:99999999999999999999 apt=96"),
            SdpLine::FmtpApt {
                payload_type: PayloadType::MAX,
                associated: 96
            }
        );
    }

    #[test]
    fn split_formats_takes_wide_numbers() {
        let m = media("m=audio 9 UDP/TLS/RTP/SAVPF 111 70000");
        assert_eq!(
            m.split_formats(),
            ("m=audio 9 UDP/TLS/RTP/SAVPF", vec![111, 70000])
        );
    }

    #[test]
    fn media_line_opens_only_its_kind() {
        let m = media("m=audio 9 UDP/TLS/RTP/SAVPF 111 0 8");
        assert_eq!(m.media(), "audio");
        assert!(m.opens(MediaKind::Audio));
        assert!(!m.opens(MediaKind::Video));

        // No fields after the media token: a boundary, but opens nothing.
        assert!(!media("m=audio").opens(MediaKind::Audio));
    }

    #[test]
    fn split_formats_keeps_port_in_prefix() {
        let m = media("m=audio 9 UDP/TLS/RTP/SAVPF 111 0 8");
        assert_eq!(
            m.split_formats(),
            ("m=audio 9 UDP/TLS/RTP/SAVPF", vec![111, 0, 8])
        );
    }

    #[test]
    fn split_formats_without_payload_types() {
        let m = media("m=application 9 UDP/DTLS/SCTP webrtc-datachannel");
        assert_eq!(
            m.split_formats(),
            ("m=application 9 UDP/DTLS/SCTP webrtc-datachannel", vec![])
        );
        let m = media("m=audio 9 RTP/AVP ");
        assert_eq!(m.split_formats(), ("m=audio 9 RTP/AVP", vec![]));
    }

    #[test]
    fn split_lines_preserves_terminators() {
        let lines: Vec<_> = split_lines("v=0\r\ns=-\nt=0 0").collect();
        assert_eq!(lines, vec![("v=0", "\r\n"), ("s=-", "\n"), ("t=0 0", "")]);
        assert_eq!(split_lines("").count(), 0);
    }
}
