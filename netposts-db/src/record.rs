use netposts_common::model::{
    Id, ModelValidationError,
    blog::{Blog, BlogMarker},
    post::{Post, PostRef},
};
use sqlx::FromRow;
use time::PrimitiveDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct BlogRecord {
    pub blog_id: i64,
    pub domain: String,
    pub path: String,
    pub public: i8,
    pub archived: i8,
    pub mature: i8,
    pub spam: i8,
    pub deleted: i8,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct PostRefRecord {
    #[sqlx(rename = "ID")]
    pub id: u64,
    pub post_date: PrimitiveDateTime,
    pub blog_id: u64,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct PostRecord {
    #[sqlx(rename = "ID")]
    pub id: u64,
    pub post_author: u64,
    pub post_date: PrimitiveDateTime,
    pub post_date_gmt: PrimitiveDateTime,
    pub post_title: String,
    pub post_name: String,
    pub post_excerpt: String,
    pub post_content: String,
    pub post_status: String,
    pub post_type: String,
}

impl TryFrom<BlogRecord> for Blog {
    type Error = ModelValidationError;

    fn try_from(value: BlogRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.blog_id.try_into()?,
            domain: value.domain,
            path: value.path,
            public: value.public != 0,
            archived: value.archived != 0,
            mature: value.mature != 0,
            spam: value.spam != 0,
            deleted: value.deleted != 0,
        })
    }
}

impl From<PostRefRecord> for PostRef {
    fn from(value: PostRefRecord) -> Self {
        Self {
            blog: value.blog_id.into(),
            id: value.id.into(),
            date: value.post_date,
        }
    }
}

impl PostRecord {
    /// Post rows don't carry their blog; it is implied by the table they were read from.
    pub fn into_post(self, blog: Id<BlogMarker>) -> Post {
        Post {
            id: self.id.into(),
            blog,
            author: self.post_author,
            date: self.post_date,
            date_gmt: self.post_date_gmt,
            title: self.post_title,
            name: self.post_name,
            excerpt: self.post_excerpt,
            content: self.post_content,
            status: self.post_status,
            post_type: self.post_type,
        }
    }
}
