//! String surgery on upload URLs.
//!
//! All blogs of a network are assumed to share one upload directory layout, so a URL for one
//! blog is derived from another blog's URL by swapping prefixes and file names.

use crate::model::{Id, blog::BlogMarker};

pub const UPLOADS_SEGMENT: &str = "uploads/";

/// Inserts `sites/{blog}/` after the first `uploads/` in `url`.
///
/// Secondary blogs keep their media in a per-site directory. The URL is returned unchanged for
/// the primary blog and for URLs without an `uploads/` segment.
#[must_use]
pub fn add_site_path_to_thumb_url(url: &str, blog: Id<BlogMarker>) -> String {
    if blog.is_primary() {
        return url.to_owned();
    }

    match url.find(UPLOADS_SEGMENT) {
        Some(position) => {
            let (head, tail) = url.split_at(position + UPLOADS_SEGMENT.len());
            format!("{head}sites/{blog}/{tail}")
        }
        None => url.to_owned(),
    }
}

/// Replaces a leading `from` in `url` with `to`. The prefix is matched ASCII case-insensitively.
#[must_use]
pub fn replace_site_prefix(url: &str, from: &str, to: &str) -> String {
    match url.get(..from.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(from) => format!("{to}{}", &url[from.len()..]),
        _ => url.to_owned(),
    }
}

/// The last path component, ignoring trailing slashes.
#[must_use]
pub fn basename(path: &str) -> &str {
    let path = path.trim_end_matches(['/', '\\']);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Replaces the file name of `url` with the file name of `file`, keeping the directory.
#[must_use]
pub fn replace_basename(url: &str, file: &str) -> String {
    let directory = url.rfind('/').map_or("", |position| &url[..=position]);
    format!("{directory}{}", basename(file))
}
