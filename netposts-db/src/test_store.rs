use crate::{
    client::Result,
    site::SITE_URL_OPTION,
    store::NetworkStore,
    tables::{BlogPostTable, TablePrefix},
};
use netposts_common::model::{
    Id,
    blog::{Blog, BlogMarker},
    post::{POST_TYPE, PUBLISH_STATUS, Post, PostMarker, PostRef},
};
use std::{collections::HashMap, num::NonZeroU32, sync::Mutex};
use time::PrimitiveDateTime;

/// In-memory network. Records which options were read, in order.
#[derive(Debug, Default)]
pub(crate) struct TestStore {
    pub table_prefix: TablePrefix,
    pub blogs: Vec<Blog>,
    pub posts: Vec<Post>,
    pub meta: HashMap<(u64, u64, String), String>,
    pub options: HashMap<(u64, String), String>,
    option_lookups: Mutex<Vec<(u64, String)>>,
}

/// A published post named `post-{id}`.
pub(crate) fn post(blog: u64, id: u64, date: PrimitiveDateTime) -> Post {
    Post {
        id: Id::new(id),
        blog: Id::new(blog),
        author: 1,
        date,
        date_gmt: date,
        title: format!("Post {id}"),
        name: format!("post-{id}"),
        excerpt: String::new(),
        content: String::new(),
        status: PUBLISH_STATUS.to_owned(),
        post_type: POST_TYPE.to_owned(),
    }
}

impl TestStore {
    /// Adds a listed blog with the given site URL.
    pub fn with_blog(mut self, id: u64, site_url: &str) -> Self {
        self.blogs.push(Blog {
            id: Id::new(id),
            domain: "example.org".to_owned(),
            path: format!("/{id}/"),
            public: true,
            ..Blog::default()
        });
        self.with_option(id, SITE_URL_OPTION, site_url)
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_meta(mut self, blog: u64, post: u64, key: &str, value: &str) -> Self {
        self.meta
            .insert((blog, post, key.to_owned()), value.to_owned());
        self
    }

    pub fn with_option(mut self, blog: u64, name: &str, value: &str) -> Self {
        self.options
            .insert((blog, name.to_owned()), value.to_owned());
        self
    }

    pub fn option_lookups(&self) -> Vec<(u64, String)> {
        self.option_lookups.lock().unwrap().clone()
    }
}

impl NetworkStore for TestStore {
    fn table_prefix(&self) -> &TablePrefix {
        &self.table_prefix
    }

    async fn fetch_listed_blogs(&self) -> Result<Vec<Blog>> {
        Ok(self
            .blogs
            .iter()
            .filter(|blog| blog.is_listed())
            .cloned()
            .collect())
    }

    async fn fetch_recent_post_refs(
        &self,
        tables: &[BlogPostTable],
        limit: NonZeroU32,
    ) -> Result<Vec<PostRef>> {
        let mut posts: Vec<_> = self
            .posts
            .iter()
            .filter(|post| post.is_published_post())
            .filter(|post| tables.iter().any(|table| table.blog == post.blog))
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts
            .into_iter()
            .take(limit.get() as usize)
            .map(|post| PostRef {
                blog: post.blog,
                id: post.id,
                date: post.date,
            })
            .collect())
    }

    async fn fetch_post(
        &self,
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
    ) -> Result<Option<Post>> {
        Ok(self
            .posts
            .iter()
            .find(|candidate| candidate.blog == blog && candidate.id == post)
            .cloned())
    }

    async fn fetch_post_meta(
        &self,
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
        key: &str,
    ) -> Result<Option<String>> {
        Ok(self
            .meta
            .get(&(blog.get(), post.get(), key.to_owned()))
            .cloned())
    }

    async fn fetch_option(&self, blog: Id<BlogMarker>, name: &str) -> Result<Option<String>> {
        self.option_lookups
            .lock()
            .unwrap()
            .push((blog.get(), name.to_owned()));

        Ok(self.options.get(&(blog.get(), name.to_owned())).cloned())
    }
}
