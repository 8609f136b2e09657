//! SDP codec filtering (RFC 8866, RTX per RFC 4588).
//!
//! A session description is a sequence of `<type>=<value>` lines. Media
//! sections start at an `m=` line and run until the next one:
//!
//! ```text
//! v=0
//! o=- 4611731400430051336 2 IN IP4 127.0.0.1
//! s=-
//! t=0 0
//! m=audio 9 UDP/TLS/RTP/SAVPF 111 0 8        ← formats offered
//! a=rtpmap:111 opus/48000/2                  ← payload type → codec
//! a=fmtp:111 minptime=10;useinbandfec=1
//! a=rtpmap:0 PCMU/8000
//! a=rtpmap:8 PCMA/8000
//! m=video 9 UDP/TLS/RTP/SAVPF 96 97
//! a=rtpmap:96 VP8/90000
//! a=rtcp-fb:96 nack pli
//! a=rtpmap:97 rtx/90000
//! a=fmtp:97 apt=96                           ← RTX for payload type 96
//! ```
//!
//! [`CodecFilter`] narrows the sections of one media kind to a single codec
//! and its retransmission payloads, leaving every other line untouched.
//! [`line`] holds the classifier both filter passes share.

pub mod filter;
pub mod line;

pub use filter::{CodecFilter, FilteredSdp, filter_codec};
pub use line::{MediaLine, PayloadAttribute, PayloadType, SdpLine};
