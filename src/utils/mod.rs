pub mod constants;
pub mod string_utils;
pub mod timeout;
pub mod url_template;
pub mod wait;

pub use constants::*;
pub use string_utils::{is_slug_shaped, normalize_slug, truncate_chars};
pub use timeout::{settle, with_timeout};
pub use url_template::{UrlTemplate, is_http_url};
pub use wait::{WaitConfig, wait_until};
