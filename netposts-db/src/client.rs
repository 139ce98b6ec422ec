use crate::{
    query::recent_posts_query,
    record::{BlogRecord, PostRecord, PostRefRecord},
    store::NetworkStore,
    tables::{BlogPostTable, TablePrefix},
};
use netposts_common::model::{
    Id, ModelValidationError,
    blog::{Blog, BlogMarker},
    post::{Post, PostMarker, PostRef},
};
use sqlx::{MySqlPool, query_as, query_scalar};
use std::num::NonZeroU32;
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// [`NetworkStore`] over the MySQL database of a multisite network.
#[derive(Debug)]
pub struct DbClient {
    pool: MySqlPool,
    table_prefix: TablePrefix,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: MySqlPool, table_prefix: TablePrefix) -> Self {
        Self { pool, table_prefix }
    }
}

impl NetworkStore for DbClient {
    fn table_prefix(&self) -> &TablePrefix {
        &self.table_prefix
    }

    async fn fetch_listed_blogs(&self) -> Result<Vec<Blog>> {
        let sql = format!(
            "
            SELECT
                blog_id,
                domain,
                path,
                public,
                archived,
                mature,
                spam,
                deleted
            FROM
                {}
            WHERE
                public = 1 AND archived = 0 AND mature = 0 AND spam = 0 AND deleted = 0
            ORDER BY
                blog_id
            ",
            self.table_prefix.blogs_table(),
        );

        let records = query_as::<_, BlogRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let blogs = records
            .into_iter()
            .map(Blog::try_from)
            .collect::<Result<_, _>>()?;
        Ok(blogs)
    }

    async fn fetch_recent_post_refs(
        &self,
        tables: &[BlogPostTable],
        limit: NonZeroU32,
    ) -> Result<Vec<PostRef>> {
        if tables.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = recent_posts_query(tables, limit);
        let records = query
            .build_query_as::<PostRefRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(PostRef::from).collect())
    }

    async fn fetch_post(
        &self,
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
    ) -> Result<Option<Post>> {
        let Some(table) = self.table_prefix.posts_table(blog) else {
            return Ok(None);
        };
        let sql = format!(
            "
            SELECT
                ID,
                post_author,
                post_date,
                post_date_gmt,
                post_title,
                post_name,
                post_excerpt,
                post_content,
                post_status,
                post_type
            FROM
                {table}
            WHERE
                ID = ?
            "
        );

        let record = query_as::<_, PostRecord>(&sql)
            .bind(post.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(|record| record.into_post(blog)))
    }

    async fn fetch_post_meta(
        &self,
        blog: Id<BlogMarker>,
        post: Id<PostMarker>,
        key: &str,
    ) -> Result<Option<String>> {
        let Some(table) = self.table_prefix.postmeta_table(blog) else {
            return Ok(None);
        };
        let sql = format!(
            "
            SELECT
                meta_value
            FROM
                {table}
            WHERE
                meta_key = ? AND post_id = ?
            ORDER BY
                meta_id
            LIMIT 1
            "
        );

        let value = query_scalar::<_, Option<String>>(&sql)
            .bind(key)
            .bind(post.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.flatten())
    }

    async fn fetch_option(&self, blog: Id<BlogMarker>, name: &str) -> Result<Option<String>> {
        let Some(table) = self.table_prefix.options_table(blog) else {
            return Ok(None);
        };
        let sql = format!(
            "
            SELECT
                option_value
            FROM
                {table}
            WHERE
                option_name = ?
            "
        );

        let value = query_scalar::<_, String>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }
}
