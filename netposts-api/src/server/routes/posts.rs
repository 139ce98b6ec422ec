use crate::server::{Result, ServerRouter, ServerState, json::Json, query::Query};
use axum::{Router, extract::State, routing::get};
use netposts_common::model::post::NetworkPost;
use netposts_db::{
    feed::{DEFAULT_RECENT_POSTS_COUNT, fetch_recent_network_posts},
    store::NetworkStore,
};
use serde::Deserialize;
use std::num::NonZeroU32;

pub fn routes<S: NetworkStore + Send + 'static>() -> ServerRouter<S> {
    Router::new().route("/posts/recent", get(get_recent_posts::<S>))
}

#[derive(Deserialize)]
struct RecentPostsQuery {
    count: Option<NonZeroU32>,
}

async fn get_recent_posts<S: NetworkStore + Send + 'static>(
    State(ServerState { store, network }): State<ServerState<S>>,
    Query(RecentPostsQuery { count }): Query<RecentPostsQuery>,
) -> Result<Json<Vec<NetworkPost>>> {
    let count = count.unwrap_or(DEFAULT_RECENT_POSTS_COUNT);
    let posts = fetch_recent_network_posts(store.as_ref(), &network, count).await?;

    Ok(Json(posts))
}
