use crate::model::Id;
use serde::{Deserialize, Serialize};

/// The primary blog of a network. Its tables and uploads are unprefixed.
pub const PRIMARY_BLOG_ID: Id<BlogMarker> = Id::new(1);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct BlogMarker;

impl Id<BlogMarker> {
    /// Whether this blog stores its media directly under the network upload path.
    #[must_use]
    pub fn is_primary(self) -> bool {
        self <= PRIMARY_BLOG_ID
    }
}

/// One site of the network as listed in the blogs registry.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Blog {
    pub id: Id<BlogMarker>,
    pub domain: String,
    pub path: String,
    pub public: bool,
    pub archived: bool,
    pub mature: bool,
    pub spam: bool,
    pub deleted: bool,
}

impl Blog {
    /// Whether the blog may show up in network-wide listings.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.public && !self.archived && !self.mature && !self.spam && !self.deleted
    }
}
