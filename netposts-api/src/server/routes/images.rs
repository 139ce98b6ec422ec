use crate::server::{
    Result, ServerError, ServerRouter, ServerState, json::Json, query::Query,
};
use axum::{Router, extract::State};
use axum_extra::routing::{RouterExt, TypedPath};
use netposts_common::model::{
    Id,
    blog::BlogMarker,
    image::{ImageSize, ImageSrc},
    post::PostMarker,
};
use netposts_db::{store::NetworkStore, thumbnail::fetch_featured_image_src};
use serde::Deserialize;

pub fn routes<S: NetworkStore + Send + 'static>() -> ServerRouter<S> {
    Router::new().typed_get(get_featured_image::<S>)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/blogs/{blog_id}/posts/{post_id}/featured-image", rejection(ServerError))]
struct FeaturedImagePath {
    blog_id: Id<BlogMarker>,
    post_id: Id<PostMarker>,
}

#[derive(Deserialize)]
struct FeaturedImageQuery {
    size: Option<String>,
}

async fn get_featured_image<S: NetworkStore + Send + 'static>(
    FeaturedImagePath { blog_id, post_id }: FeaturedImagePath,
    State(ServerState { store, network }): State<ServerState<S>>,
    Query(FeaturedImageQuery { size }): Query<FeaturedImageQuery>,
) -> Result<Json<ImageSrc>> {
    let size = size.as_deref().map(ImageSize::from).unwrap_or_default();

    let src = fetch_featured_image_src(store.as_ref(), &network, post_id, Some(blog_id), &size)
        .await?
        .ok_or(ServerError::FeaturedImageNotFound {
            blog: blog_id,
            post: post_id,
        })?;

    Ok(Json(src))
}
