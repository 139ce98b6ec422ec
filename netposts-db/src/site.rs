//! Per-blog URLs read from the blogs' options tables.

use crate::{client::Result, store::NetworkStore};
use netposts_common::{
    model::{Id, blog::BlogMarker, network::Network, post::Post},
    permalink::PermalinkStructure,
    url::replace_site_prefix,
};

pub const SITE_URL_OPTION: &str = "siteurl";
pub const HOME_OPTION: &str = "home";
pub const UPLOAD_URL_PATH_OPTION: &str = "upload_url_path";
pub const PERMALINK_STRUCTURE_OPTION: &str = "permalink_structure";

async fn fetch_url_option<S: NetworkStore>(
    store: &S,
    blog: Id<BlogMarker>,
    name: &str,
) -> Result<Option<String>> {
    let value = store.fetch_option(blog, name).await?;

    Ok(value
        .map(|url| url.trim().trim_end_matches('/').to_owned())
        .filter(|url| !url.is_empty()))
}

/// The URL the blog's files are served from, without a trailing slash.
pub async fn fetch_site_url<S: NetworkStore>(
    store: &S,
    blog: Id<BlogMarker>,
) -> Result<Option<String>> {
    fetch_url_option(store, blog, SITE_URL_OPTION).await
}

/// The URL the blog's pages are served from. Falls back to the site URL.
pub async fn fetch_home_url<S: NetworkStore>(
    store: &S,
    blog: Id<BlogMarker>,
) -> Result<Option<String>> {
    match fetch_url_option(store, blog, HOME_OPTION).await? {
        Some(home) => Ok(Some(home)),
        None => fetch_site_url(store, blog).await,
    }
}

/// Base URL of the blog's uploads: the `upload_url_path` option if set, otherwise the network
/// upload path below the site URL.
pub async fn fetch_upload_base_url<S: NetworkStore>(
    store: &S,
    network: &Network,
    blog: Id<BlogMarker>,
) -> Result<Option<String>> {
    if let Some(upload_url) = fetch_url_option(store, blog, UPLOAD_URL_PATH_OPTION).await? {
        return Ok(Some(upload_url));
    }

    let site_url = fetch_site_url(store, blog).await?;
    Ok(site_url.map(|site_url| {
        format!("{site_url}/{}", network.uploads_path.trim_matches('/'))
    }))
}

/// Upload base URL of another blog, derived from the current blog's one by swapping the site
/// URL prefix. Assumes all blogs lay out their uploads the same way.
pub async fn derive_upload_base_url<S: NetworkStore>(
    store: &S,
    network: &Network,
    blog: Id<BlogMarker>,
) -> Result<Option<String>> {
    let current_blog = network.current_blog;

    let Some(current_upload_url) = fetch_upload_base_url(store, network, current_blog).await?
    else {
        return Ok(None);
    };
    let Some(current_site_url) = fetch_site_url(store, current_blog).await? else {
        return Ok(None);
    };
    let Some(site_url) = fetch_site_url(store, blog).await? else {
        return Ok(None);
    };

    Ok(Some(replace_site_prefix(
        &current_upload_url,
        &current_site_url,
        &site_url,
    )))
}

/// The public URL of `post`, following its blog's permalink structure.
pub async fn fetch_permalink<S: NetworkStore>(store: &S, post: &Post) -> Result<Option<String>> {
    let Some(home) = fetch_home_url(store, post.blog).await? else {
        return Ok(None);
    };
    let structure = store
        .fetch_option(post.blog, PERMALINK_STRUCTURE_OPTION)
        .await?
        .map(|structure| PermalinkStructure::parse(&structure))
        .unwrap_or_default();

    Ok(Some(structure.render(&home, post)))
}

#[cfg(test)]
mod tests {
    use crate::{
        site::{
            PERMALINK_STRUCTURE_OPTION, UPLOAD_URL_PATH_OPTION, derive_upload_base_url,
            fetch_home_url, fetch_permalink, fetch_upload_base_url,
        },
        test_store::{TestStore, post},
    };
    use netposts_common::model::{Id, network::Network};
    use time::macros::datetime;

    fn store() -> TestStore {
        TestStore::default()
            .with_blog(1, "http://example.org/")
            .with_blog(3, "http://example.org/three")
    }

    #[tokio::test]
    async fn upload_base_urls() {
        let store = store().with_option(3, UPLOAD_URL_PATH_OPTION, "http://cdn.example.org/three");
        let network = Network::default();

        assert_eq!(
            fetch_upload_base_url(&store, &network, Id::new(1))
                .await
                .unwrap()
                .as_deref(),
            Some("http://example.org/wp-content/uploads")
        );
        assert_eq!(
            fetch_upload_base_url(&store, &network, Id::new(3))
                .await
                .unwrap()
                .as_deref(),
            Some("http://cdn.example.org/three")
        );
        assert_eq!(
            fetch_upload_base_url(&store, &network, Id::new(9))
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn derived_upload_base_url() {
        let store = store();
        let network = Network::default();

        assert_eq!(
            derive_upload_base_url(&store, &network, Id::new(3))
                .await
                .unwrap()
                .as_deref(),
            Some("http://example.org/three/wp-content/uploads")
        );
        assert_eq!(
            derive_upload_base_url(&store, &network, Id::new(9))
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn home_falls_back_to_site_url() {
        let store = store().with_option(1, "home", "http://www.example.org");

        assert_eq!(
            fetch_home_url(&store, Id::new(1)).await.unwrap().as_deref(),
            Some("http://www.example.org")
        );
        assert_eq!(
            fetch_home_url(&store, Id::new(3)).await.unwrap().as_deref(),
            Some("http://example.org/three")
        );
    }

    #[tokio::test]
    async fn permalinks() {
        let store = store().with_option(3, PERMALINK_STRUCTURE_OPTION, "/%year%/%postname%/");

        let pretty = post(3, 8, datetime!(2022-03-01 12:00));
        assert_eq!(
            fetch_permalink(&store, &pretty).await.unwrap().as_deref(),
            Some("http://example.org/three/2022/post-8/")
        );

        let plain = post(1, 8, datetime!(2022-03-01 12:00));
        assert_eq!(
            fetch_permalink(&store, &plain).await.unwrap().as_deref(),
            Some("http://example.org/?p=8")
        );

        let unknown_blog = post(9, 8, datetime!(2022-03-01 12:00));
        assert_eq!(fetch_permalink(&store, &unknown_blog).await.unwrap(), None);
    }
}
