use crate::model::{Id, blog::BlogMarker, image::Thumbnail};
use serde::{Deserialize, Serialize};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

pub const PUBLISH_STATUS: &str = "publish";
pub const POST_TYPE: &str = "post";

/// `May 5, 2021`
const POST_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long] [day padding:none], [year]");

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub blog: Id<BlogMarker>,
    pub author: u64,
    /// Publish time in the blog's local timezone.
    pub date: PrimitiveDateTime,
    pub date_gmt: PrimitiveDateTime,
    pub title: String,
    /// URL slug.
    pub name: String,
    pub excerpt: String,
    pub content: String,
    pub status: String,
    pub post_type: String,
}

impl Post {
    /// Whether the post is a published blog post, the only kind the network feed lists.
    #[must_use]
    pub fn is_published_post(&self) -> bool {
        self.status == PUBLISH_STATUS && self.post_type == POST_TYPE
    }

    pub fn formatted_date(&self) -> Result<String, time::error::Format> {
        self.date_gmt.format(POST_DATE_FORMAT)
    }
}

/// A post located somewhere in the network, as returned by the recent posts query.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PostRef {
    pub blog: Id<BlogMarker>,
    pub id: Id<PostMarker>,
    pub date: PrimitiveDateTime,
}

/// A post decorated for display in a network-wide listing.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct NetworkPost {
    pub post: Post,
    pub thumbnail: Option<Thumbnail>,
    pub permalink: Option<String>,
    pub time: String,
}
