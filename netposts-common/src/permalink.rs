use crate::model::post::Post;

/// A blog's `permalink_structure` option, e.g. `/%year%/%monthnum%/%postname%/`.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum PermalinkStructure {
    /// `?p={id}` links.
    #[default]
    Plain,
    Pretty(Vec<Segment>),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Segment {
    Literal(String),
    Tag(Tag),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Tag {
    Year,
    MonthNum,
    Day,
    Hour,
    Minute,
    Second,
    PostId,
    PostName,
}

impl Tag {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "year" => Self::Year,
            "monthnum" => Self::MonthNum,
            "day" => Self::Day,
            "hour" => Self::Hour,
            "minute" => Self::Minute,
            "second" => Self::Second,
            "post_id" => Self::PostId,
            "postname" => Self::PostName,
            _ => return None,
        })
    }

    fn render(self, post: &Post) -> String {
        let date = post.date;
        match self {
            Self::Year => format!("{:04}", date.year()),
            Self::MonthNum => format!("{:02}", u8::from(date.month())),
            Self::Day => format!("{:02}", date.day()),
            Self::Hour => format!("{:02}", date.hour()),
            Self::Minute => format!("{:02}", date.minute()),
            Self::Second => format!("{:02}", date.second()),
            Self::PostId => post.id.to_string(),
            Self::PostName => post.name.clone(),
        }
    }
}

impl PermalinkStructure {
    /// Parses a structure. Structures using tags other than the date, id and slug tags
    /// (`%category%`, `%author%`, ...) need lookups this crate doesn't do and fall back to
    /// [`PermalinkStructure::Plain`].
    #[must_use]
    pub fn parse(structure: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = structure.trim();

        while let Some(start) = rest.find('%') {
            let Some(len) = rest[start + 1..].find('%') else {
                break;
            };
            let Some(tag) = Tag::from_name(&rest[start + 1..start + 1 + len]) else {
                return Self::Plain;
            };

            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_owned()));
            }
            segments.push(Segment::Tag(tag));
            rest = &rest[start + len + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        if segments.is_empty() {
            Self::Plain
        } else {
            Self::Pretty(segments)
        }
    }

    /// The permalink of `post` below the blog's `home` URL.
    #[must_use]
    pub fn render(&self, home: &str, post: &Post) -> String {
        let home = home.trim_end_matches('/');

        let segments = match self {
            Self::Pretty(segments)
                if post.name.is_empty()
                    && segments.contains(&Segment::Tag(Tag::PostName)) =>
            {
                return plain_permalink(home, post);
            }
            Self::Pretty(segments) => segments,
            Self::Plain => return plain_permalink(home, post),
        };

        let mut path = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Tag(tag) => path.push_str(&tag.render(post)),
            }
        }

        if path.starts_with('/') {
            format!("{home}{path}")
        } else {
            format!("{home}/{path}")
        }
    }
}

fn plain_permalink(home: &str, post: &Post) -> String {
    format!("{home}/?p={}", post.id)
}
