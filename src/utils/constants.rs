//! Shared configuration constants for inline-resource
//!
//! Default values used by `InlineConfig` and the fetch transport.

/// Default include rule: scripts and stylesheets
pub const DEFAULT_INCLUDE_PATTERN: &str = r"\.(js|css)$";

/// Default exclude rule: images that should stay external
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"\.(svg|jpg)$";

/// Attributes that keep a reference external by default.
///
/// Async/deferred scripts and module graphs change meaning when inlined.
pub const DEFAULT_EXCLUDE_ATTR_TOKENS: &[&str] = &["async", "defer"];

/// Key/value attributes that keep a reference external by default
pub const DEFAULT_EXCLUDE_ATTR_PAIRS: &[(&str, &str)] =
    &[("type", "module"), ("rel", "modulepreload")];

/// Timeout for a single remote fetch: 30 seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted size of a remote resource: 2MB
///
/// Matches the stylesheet download ceiling; anything larger has no business
/// being inlined into a document.
pub const DEFAULT_MAX_REMOTE_SIZE: usize = 2 * 1024 * 1024;

/// Status codes accepted as a successful remote fetch
pub const ACCEPTED_FETCH_STATUS: [u16; 2] = [200, 204];

/// User agent sent with remote fetches
pub const FETCH_USER_AGENT: &str = concat!("kodegen-inline-resource/", env!("CARGO_PKG_VERSION"));

/// HTML boolean attributes, rendered bare when their value is empty
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];
