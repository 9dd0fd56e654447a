pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{
    is_remote_reference, join_base, normalize_url_for_cache, strip_leading_separator,
    to_fetchable_url,
};
