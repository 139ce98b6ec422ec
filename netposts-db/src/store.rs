use crate::{
    client::Result,
    tables::{BlogPostTable, TablePrefix},
};
use netposts_common::model::{
    Id,
    blog::{Blog, BlogMarker},
    post::{Post, PostMarker, PostRef},
};
use std::num::NonZeroU32;

/// Read access to the shared network database.
///
/// Every lookup names the blog whose tables it reads, so there is no "current blog" state on
/// the store itself.
pub trait NetworkStore: Sync {
    fn table_prefix(&self) -> &TablePrefix;

    /// Blogs that are public and neither archived, mature, spam nor deleted.
    fn fetch_listed_blogs(&self) -> impl Future<Output = Result<Vec<Blog>>> + Send;

    /// The newest published posts of all `tables` combined, newest first, at most `limit`.
    fn fetch_recent_post_refs(
        &self,
        tables: &[BlogPostTable],
        limit: NonZeroU32,
    ) -> impl Future<Output = Result<Vec<PostRef>>> + Send;

    fn fetch_post(
        &self,
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
    ) -> impl Future<Output = Result<Option<Post>>> + Send;

    fn fetch_post_meta(
        &self,
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    fn fetch_option(
        &self,
        blog: Id<BlogMarker>,
        name: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}
