//! Percent-encoding for Graph URL path segments.
//!
//! Object ids are normally GUIDs, but ids read from payloads are still
//! encoded before being interpolated into a path so that a malformed value
//! cannot traverse to another resource or smuggle a query string.
//!
//! ```
//! use graph_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("a/b"), "a%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 reserved and unsafe characters, plus `%` so that
/// pre-encoded input is not double-decoded and `/` so that it cannot traverse.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
