//! Startup controls read from the page's query string.

use serde::Serialize;
use tracing::trace;
use url::form_urlencoded;

/// Query-string controls. Every value is trimmed; an absent or empty
/// value leaves the corresponding behaviour disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StartupQuery {
    /// Index or id of the taxonomy to display initially.
    pub taxonomy: String,
    pub cat_ids: Vec<String>,
    pub feat_ids: Vec<String>,
    pub doc_path: String,
    pub drawing: bool,
    pub upload: bool,
    pub curr_loc: bool,
}

impl StartupQuery {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                "taxonomy" => parsed.taxonomy = value.to_string(),
                "catIds" => parsed.cat_ids = split_ids(value),
                "featIds" => parsed.feat_ids = split_ids(value),
                "docPath" => parsed.doc_path = value.to_string(),
                "drawing" => parsed.drawing = !value.is_empty(),
                "upload" => parsed.upload = !value.is_empty(),
                "currLoc" => parsed.curr_loc = !value.is_empty(),
                other => trace!(key = other, "ignoring query key"),
            }
        }
        parsed
    }
}

fn split_ids(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
