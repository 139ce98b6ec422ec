//! Featured image lookup for posts anywhere in the network.
//!
//! Every way of not finding an image (no featured image set, missing metadata, unknown upload
//! URL) ends up as `Ok(None)`. Errors are reserved for a failing database.

use crate::{
    client::Result,
    site::{derive_upload_base_url, fetch_upload_base_url},
    store::NetworkStore,
};
use netposts_common::{
    model::{
        Id,
        blog::BlogMarker,
        image::{ImageMetadata, ImageSize, ImageSrc},
        network::Network,
        post::PostMarker,
    },
    php::maybe_unserialize,
    url::replace_basename,
};
use tracing::debug;

pub const THUMBNAIL_ID_META_KEY: &str = "_thumbnail_id";
pub const ATTACHMENT_METADATA_META_KEY: &str = "_wp_attachment_metadata";
pub const ATTACHED_FILE_META_KEY: &str = "_wp_attached_file";

/// Resolves the featured image of `post` in `blog` (`None` meaning the current blog).
///
/// Posts of the current blog, and every post on a single-site install, go through the regular
/// attachment lookup. Posts of other blogs have their upload URL derived from the current
/// blog's, see [`resolve_image_src`].
pub async fn fetch_featured_image_src<S: NetworkStore>(
    store: &S,
    network: &Network,
    post: Id<PostMarker>,
    blog: Option<Id<BlogMarker>>,
    size: &ImageSize,
) -> Result<Option<ImageSrc>> {
    debug!(%post, ?blog, %size, "Resolving featured image");
    match blog {
        Some(blog) if !network.is_local(Some(blog)) => {
            fetch_network_image_src(store, network, post, blog, size).await
        }
        _ => fetch_local_image_src(store, network, post, size).await,
    }
}

/// Computes the image data of `metadata` in `size` below `base_url`.
///
/// Requesting [`ImageSize::Full`] or a size that was never generated yields the original. A
/// generated size shares the original's directory. It only counts as resized if both its width
/// and its height differ from the original's.
#[must_use]
pub fn resolve_image_src(
    base_url: &str,
    metadata: &ImageMetadata,
    size: &ImageSize,
) -> Option<ImageSrc> {
    let file = metadata.file.as_deref()?;
    let url = format!("{base_url}/{file}");

    let Some(record) = metadata.size(size) else {
        return Some(ImageSrc {
            url,
            width: metadata.width,
            height: metadata.height,
            resized: false,
        });
    };

    let size_file = record.file.as_deref()?;
    Some(ImageSrc {
        url: replace_basename(&url, size_file),
        width: record.width,
        height: record.height,
        resized: record.width != metadata.width && record.height != metadata.height,
    })
}

async fn fetch_thumbnail_id<S: NetworkStore>(
    store: &S,
    blog: Id<BlogMarker>,
    post: Id<PostMarker>,
) -> Result<Option<Id<PostMarker>>> {
    let value = store
        .fetch_post_meta(blog, post, THUMBNAIL_ID_META_KEY)
        .await?;

    Ok(value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|&id| id != 0)
        .map(Id::new))
}

async fn fetch_attachment_metadata<S: NetworkStore>(
    store: &S,
    blog: Id<BlogMarker>,
    attachment: Id<PostMarker>,
) -> Result<Option<ImageMetadata>> {
    let Some(raw) = store
        .fetch_post_meta(blog, attachment, ATTACHMENT_METADATA_META_KEY)
        .await?
    else {
        return Ok(None);
    };

    match maybe_unserialize(&raw) {
        Ok(value) => Ok(value.as_ref().and_then(ImageMetadata::from_php)),
        Err(error) => {
            debug!(%blog, %attachment, %error, "Attachment metadata could not be unserialized");
            Ok(None)
        }
    }
}

async fn fetch_local_image_src<S: NetworkStore>(
    store: &S,
    network: &Network,
    post: Id<PostMarker>,
    size: &ImageSize,
) -> Result<Option<ImageSrc>> {
    let blog = network.current_blog;

    let Some(attachment) = fetch_thumbnail_id(store, blog, post).await? else {
        debug!(%blog, %post, "Post has no featured image");
        return Ok(None);
    };
    let metadata = fetch_attachment_metadata(store, blog, attachment)
        .await?
        .unwrap_or_default();
    let attached_file = store
        .fetch_post_meta(blog, attachment, ATTACHED_FILE_META_KEY)
        .await?
        .filter(|file| !file.is_empty());

    let Some(file) = attached_file.or_else(|| metadata.file.clone()) else {
        debug!(%blog, %attachment, "Attachment has no file");
        return Ok(None);
    };
    let Some(base_url) = fetch_upload_base_url(store, network, blog).await? else {
        debug!(%blog, "Blog has no upload URL");
        return Ok(None);
    };

    let url = format!("{base_url}/{file}");
    let src = match metadata.size(size) {
        Some(record) => match &record.file {
            Some(size_file) => ImageSrc {
                url: replace_basename(&url, size_file),
                width: record.width,
                height: record.height,
                resized: true,
            },
            None => return Ok(None),
        },
        None => ImageSrc {
            url,
            width: metadata.width,
            height: metadata.height,
            resized: false,
        },
    };

    Ok(Some(src))
}

async fn fetch_network_image_src<S: NetworkStore>(
    store: &S,
    network: &Network,
    post: Id<PostMarker>,
    blog: Id<BlogMarker>,
    size: &ImageSize,
) -> Result<Option<ImageSrc>> {
    let Some(attachment) = fetch_thumbnail_id(store, blog, post).await? else {
        debug!(%blog, %post, "Post has no featured image");
        return Ok(None);
    };
    let Some(metadata) = fetch_attachment_metadata(store, blog, attachment).await? else {
        debug!(%blog, %attachment, "Attachment has no metadata");
        return Ok(None);
    };
    let Some(base_url) = derive_upload_base_url(store, network, blog).await? else {
        debug!(%blog, "Could not derive the blog's upload URL");
        return Ok(None);
    };

    Ok(resolve_image_src(&base_url, &metadata, size))
}
