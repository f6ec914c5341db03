//! Fixed value domains the mutators pick replacements from.

use http::{HeaderName, Method, header};

/// Request methods known to the generator
pub(crate) static METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
    Method::PATCH,
];

/// Header names conformance scripts commonly swap in and out
pub(crate) static HEADERS: [HeaderName; 20] = [
    header::ACCEPT,
    header::ACCEPT_ENCODING,
    header::AUTHORIZATION,
    header::CACHE_CONTROL,
    header::CONNECTION,
    header::CONTENT_ENCODING,
    header::CONTENT_LENGTH,
    header::CONTENT_TYPE,
    header::COOKIE,
    header::EXPECT,
    header::HOST,
    header::ORIGIN,
    header::PROXY_AUTHORIZATION,
    header::SET_COOKIE,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::USER_AGENT,
    header::WWW_AUTHENTICATE,
];

/// The only version the server under test accepts
pub const VALID_VERSION: &str = "HTTP/1.1";

/// Version strings that are malformed rather than merely unsupported
pub(crate) static MALFORMED_VERSIONS: [&str; 10] = [
    "HTTP/1",
    "HTTP/1.",
    "HTTP/.1",
    "HTTP/1.1.1",
    "HTTP 1.1",
    "HTTP\\1.1",
    "HTTP/1,1",
    "HTTPS/1.1",
    "HTP/1.1",
    "HTTP/ 1.1",
];
