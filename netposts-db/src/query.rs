use crate::tables::BlogPostTable;
use netposts_common::model::post::{POST_TYPE, PUBLISH_STATUS};
use sqlx::{MySql, QueryBuilder};
use std::num::NonZeroU32;

/// Builds the query for the newest published posts across `tables`.
///
/// Each blog contributes `(ID, post_date, blog_id)` rows. The blog id is a literal, so rows of
/// different blogs never collide and `UNION ALL` returns the same rows as `UNION`. Posts with the
/// same `post_date` come back in no particular order.
///
/// `tables` must not be empty.
#[must_use]
pub fn recent_posts_query(
    tables: &[BlogPostTable],
    limit: NonZeroU32,
) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new("");

    for (i, BlogPostTable { blog, table }) in tables.iter().enumerate() {
        if i > 0 {
            builder.push(" UNION ALL ");
        }
        builder.push(format_args!(
            "(SELECT ID, post_date, CAST({blog} AS UNSIGNED) AS blog_id FROM {table} \
            WHERE post_status = '{PUBLISH_STATUS}' AND post_type = '{POST_TYPE}')"
        ));
    }

    builder.push(" ORDER BY post_date DESC LIMIT ");
    builder.push_bind(limit.get());
    builder
}
