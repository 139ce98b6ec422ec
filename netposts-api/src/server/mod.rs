use axum::{
    Router,
    extract::{
        Request,
        rejection::{PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use json::Json;
use netposts_common::model::{Id, blog::BlogMarker, network::Network, post::PostMarker};
use netposts_db::{
    client::{DbClient, DbError},
    feed::FeedError,
    store::NetworkStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

mod json;
mod query;
mod routes;

pub type ServerRouter<S = DbClient> = Router<ServerState<S>>;

#[derive(Debug)]
pub struct ServerState<S = DbClient> {
    pub store: Arc<S>,
    pub network: Arc<Network>,
}

impl<S> Clone for ServerState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            network: Arc::clone(&self.network),
        }
    }
}

pub fn routes<S: NetworkStore + Send + 'static>() -> ServerRouter<S> {
    routes::routes::<S>().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("Post {post} of blog {blog} has no featured image.")]
    FeaturedImageNotFound {
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
    },
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::FeaturedImageNotFound { .. }
            | ServerError::Feed(
                FeedError::NoBlogs | FeedError::NoBlogTables | FeedError::NoPosts,
            ) => StatusCode::NOT_FOUND,
            ServerError::QueryRejection(_) => StatusCode::BAD_REQUEST,
            ServerError::JsonResponse(_)
            | ServerError::Database(_)
            | ServerError::Feed(FeedError::DateFormat(_) | FeedError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
struct ErrorResponse {
    status: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            status: status.as_u16(),
        };
        (status, Json(error_response)).into_response()
    }
}
