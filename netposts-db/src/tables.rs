use netposts_common::model::{
    Id,
    blog::{BlogMarker, PRIMARY_BLOG_ID},
};
use thiserror::Error;

pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Table prefix may only contain ASCII letters, digits and underscores: {0:?}")]
pub struct InvalidTablePrefixError(String);

/// The network's base table prefix, from which every blog's table names are derived.
///
/// Table names are spliced into SQL, so the prefix is restricted to identifier characters.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct TablePrefix(String);

impl TablePrefix {
    pub fn new(prefix: String) -> Result<Self, InvalidTablePrefixError> {
        if prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            Ok(Self(prefix))
        } else {
            Err(InvalidTablePrefixError(prefix))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    /// The network-wide blog registry.
    #[must_use]
    pub fn blogs_table(&self) -> String {
        format!("{}blogs", self.0)
    }

    /// `wp_` for the primary blog, `wp_{id}_` for every other one.
    ///
    /// Blog id 0 owns no tables.
    #[must_use]
    pub fn blog_prefix(&self, blog: Id<BlogMarker>) -> Option<String> {
        match blog.get() {
            0 => None,
            _ if blog == PRIMARY_BLOG_ID => Some(self.0.clone()),
            id => Some(format!("{}{id}_", self.0)),
        }
    }

    #[must_use]
    pub fn posts_table(&self, blog: Id<BlogMarker>) -> Option<String> {
        self.blog_table(blog, "posts")
    }

    #[must_use]
    pub fn postmeta_table(&self, blog: Id<BlogMarker>) -> Option<String> {
        self.blog_table(blog, "postmeta")
    }

    #[must_use]
    pub fn options_table(&self, blog: Id<BlogMarker>) -> Option<String> {
        self.blog_table(blog, "options")
    }

    fn blog_table(&self, blog: Id<BlogMarker>, table: &str) -> Option<String> {
        self.blog_prefix(blog).map(|prefix| prefix + table)
    }
}

impl Default for TablePrefix {
    fn default() -> Self {
        Self(DEFAULT_TABLE_PREFIX.to_owned())
    }
}

/// The posts table of one blog.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct BlogPostTable {
    pub blog: Id<BlogMarker>,
    pub table: String,
}

impl BlogPostTable {
    #[must_use]
    pub fn resolve(prefix: &TablePrefix, blog: Id<BlogMarker>) -> Option<Self> {
        prefix
            .posts_table(blog)
            .map(|table| Self { blog, table })
    }
}
