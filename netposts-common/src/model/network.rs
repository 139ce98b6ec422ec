use crate::model::{
    Id,
    blog::{BlogMarker, PRIMARY_BLOG_ID},
};

pub const DEFAULT_UPLOADS_PATH: &str = "wp-content/uploads";

/// The blog a request runs as, plus the conventions of its network.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Network {
    pub current_blog: Id<BlogMarker>,
    pub multisite: bool,
    /// Upload directory relative to a blog's site URL.
    pub uploads_path: String,
}

impl Network {
    #[must_use]
    pub fn new(current_blog: Id<BlogMarker>) -> Self {
        Self {
            current_blog,
            multisite: true,
            uploads_path: DEFAULT_UPLOADS_PATH.to_owned(),
        }
    }

    /// Whether data of `blog` can be read through the current blog alone.
    ///
    /// `None` and blog id 0 stand for "the current blog".
    #[must_use]
    pub fn is_local(&self, blog: Option<Id<BlogMarker>>) -> bool {
        !self.multisite
            || blog.is_none_or(|blog| blog.get() == 0 || blog == self.current_blog)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new(PRIMARY_BLOG_ID)
    }
}
