pub mod blog;
pub mod image;
pub mod network;
pub mod post;

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The id is out of range: {0}")]
pub struct InvalidIdError(pub i64);

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Id(#[from] InvalidIdError),
}

/// A row id scoped by a marker type, so blog ids and post ids cannot be mixed up.
///
/// Post ids are only unique within their blog.
#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<Marker>(u64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

impl<Marker> TryFrom<i64> for Id<Marker> {
    type Error = InvalidIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Id::new)
            .map_err(|_| InvalidIdError(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, InvalidIdError, blog::BlogMarker, post::PostMarker};

    #[test]
    fn signed_ids() {
        assert_eq!(Id::<BlogMarker>::try_from(7_i64), Ok(Id::new(7)));
        assert_eq!(Id::<PostMarker>::try_from(-1_i64), Err(InvalidIdError(-1)));
    }

    #[test]
    fn display_is_the_raw_number() {
        assert_eq!(Id::<PostMarker>::new(42).to_string(), "42");
    }
}
