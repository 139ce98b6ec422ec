//! The network-wide list of recent posts.

use crate::{
    client::DbError,
    site::fetch_permalink,
    store::NetworkStore,
    tables::BlogPostTable,
    thumbnail::fetch_featured_image_src,
};
use netposts_common::{
    model::{
        image::{ImageSize, Thumbnail},
        network::Network,
        post::{NetworkPost, Post},
    },
    url::add_site_path_to_thumb_url,
};
use std::num::NonZeroU32;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_RECENT_POSTS_COUNT: NonZeroU32 = NonZeroU32::new(6).unwrap();

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Could not find blogs")]
    NoBlogs,
    #[error("Could not find the posts table of any blog")]
    NoBlogTables,
    #[error("No posts found")]
    NoPosts,
    #[error("Could not format the publish date: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error(transparent)]
    Database(#[from] DbError),
}

/// The `count` newest published posts across all listed blogs, newest first.
///
/// Each post comes with its featured image (rewritten to the blog's upload directory), its
/// permalink and its formatted publish date.
pub async fn fetch_recent_network_posts<S: NetworkStore>(
    store: &S,
    network: &Network,
    count: NonZeroU32,
) -> Result<Vec<NetworkPost>, FeedError> {
    let blogs = store.fetch_listed_blogs().await?;
    if blogs.is_empty() {
        return Err(FeedError::NoBlogs);
    }

    let table_prefix = store.table_prefix();
    let tables: Vec<_> = blogs
        .iter()
        .filter_map(|blog| {
            let table = BlogPostTable::resolve(table_prefix, blog.id);
            if table.is_none() {
                warn!(blog = %blog.id, "Blog has no posts table");
            }
            table
        })
        .collect();
    if tables.is_empty() {
        return Err(FeedError::NoBlogTables);
    }

    debug!(blogs = tables.len(), %count, "Fetching recent network posts");
    let post_refs = store.fetch_recent_post_refs(&tables, count).await?;
    if post_refs.is_empty() {
        return Err(FeedError::NoPosts);
    }

    let mut posts = Vec::with_capacity(post_refs.len());
    for post_ref in post_refs {
        let Some(post) = store.fetch_post(post_ref.blog, post_ref.id).await? else {
            warn!(blog = %post_ref.blog, post = %post_ref.id, "Listed post disappeared");
            continue;
        };
        posts.push(decorate_post(store, network, post).await?);
    }

    Ok(posts)
}

async fn decorate_post<S: NetworkStore>(
    store: &S,
    network: &Network,
    post: Post,
) -> Result<NetworkPost, FeedError> {
    let thumbnail =
        fetch_featured_image_src(store, network, post.id, Some(post.blog), &ImageSize::Full)
            .await?
            .map(|src| Thumbnail {
                url: add_site_path_to_thumb_url(&src.url, post.blog),
                width: src.width,
                height: src.height,
            });
    let permalink = fetch_permalink(store, &post).await?;
    let time = post.formatted_date()?;

    Ok(NetworkPost {
        post,
        thumbnail,
        permalink,
        time,
    })
}
