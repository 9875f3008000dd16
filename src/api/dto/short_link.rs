//! Short link payloads.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
