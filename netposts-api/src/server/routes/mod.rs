use crate::server::ServerRouter;
use axum::Router;
use netposts_db::store::NetworkStore;

mod images;
mod posts;

pub fn routes<S: NetworkStore + Send + 'static>() -> ServerRouter<S> {
    Router::new()
        .merge(posts::routes::<S>())
        .merge(images::routes::<S>())
}

#[cfg(test)]
mod tests {
    use crate::server::{ServerState, routes};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use netposts_common::model::{
        Id,
        blog::{Blog, BlogMarker},
        network::Network,
        post::{Post, PostMarker, PostRef},
    };
    use netposts_db::{
        client::Result,
        store::NetworkStore,
        tables::{BlogPostTable, TablePrefix},
    };
    use serde_json::{Value, json};
    use std::{collections::HashMap, num::NonZeroU32, sync::Arc};
    use tower::ServiceExt;

    /// `photo.jpg`, 800x600, with a 150x150 `thumbnail` size.
    const PHOTO_METADATA: &str = concat!(
        r#"a:4:{s:5:"width";i:800;s:6:"height";i:600;s:4:"file";s:17:"2021/05/photo.jpg";"#,
        r#"s:5:"sizes";a:1:{s:9:"thumbnail";a:3:{s:4:"file";s:17:"photo-150x150.jpg";"#,
        r#"s:5:"width";i:150;s:6:"height";i:150;}}}"#,
    );

    /// A network without listed blogs whose current blog 1 has post 10 with attachment 20.
    #[derive(Debug, Default)]
    struct PhotoStore {
        table_prefix: TablePrefix,
        meta: HashMap<(u64, &'static str), &'static str>,
    }

    impl PhotoStore {
        fn new() -> Self {
            Self {
                table_prefix: TablePrefix::default(),
                meta: HashMap::from([
                    ((10, "_thumbnail_id"), "20"),
                    ((20, "_wp_attachment_metadata"), PHOTO_METADATA),
                ]),
            }
        }
    }

    impl NetworkStore for PhotoStore {
        fn table_prefix(&self) -> &TablePrefix {
            &self.table_prefix
        }

        async fn fetch_listed_blogs(&self) -> Result<Vec<Blog>> {
            Ok(Vec::new())
        }

        async fn fetch_recent_post_refs(
            &self,
            _tables: &[BlogPostTable],
            _limit: NonZeroU32,
        ) -> Result<Vec<PostRef>> {
            Ok(Vec::new())
        }

        async fn fetch_post(
            &self,
            _blog: Id<BlogMarker>,
            _post: Id<PostMarker>,
        ) -> Result<Option<Post>> {
            Ok(None)
        }

        async fn fetch_post_meta(
            &self,
            blog: Id<BlogMarker>,
            post: Id<PostMarker>,
            key: &str,
        ) -> Result<Option<String>> {
            if blog != Id::new(1) {
                return Ok(None);
            }
            Ok(self
                .meta
                .iter()
                .find(|((meta_post, meta_key), _)| *meta_post == post.get() && *meta_key == key)
                .map(|(_, value)| (*value).to_owned()))
        }

        async fn fetch_option(&self, blog: Id<BlogMarker>, name: &str) -> Result<Option<String>> {
            Ok((blog == Id::new(1) && name == "siteurl").then(|| "http://example.org".to_owned()))
        }
    }

    async fn get(uri: &str) -> Response {
        let state = ServerState {
            store: Arc::new(PhotoStore::new()),
            network: Arc::new(Network::default()),
        };

        routes::<PhotoStore>()
            .with_state(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn featured_image_full_size() {
        let response = get("/blogs/1/posts/10/featured-image?size=full").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({
                "url": "http://example.org/wp-content/uploads/2021/05/photo.jpg",
                "width": 800,
                "height": 600,
                "resized": false,
            })
        );
    }

    #[tokio::test]
    async fn featured_image_named_size() {
        let response = get("/blogs/0/posts/10/featured-image?size=thumbnail").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["url"],
            "http://example.org/wp-content/uploads/2021/05/photo-150x150.jpg"
        );
    }

    #[tokio::test]
    async fn featured_image_missing() {
        let response = get("/blogs/1/posts/11/featured-image").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({ "status": 404 }));
    }

    #[tokio::test]
    async fn featured_image_invalid_path() {
        let response = get("/blogs/one/posts/10/featured-image").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn recent_posts_zero_count() {
        let response = get("/posts/recent?count=0").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "status": 400 }));
    }

    #[tokio::test]
    async fn recent_posts_without_blogs() {
        let response = get("/posts/recent").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route() {
        let response = get("/nope").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
