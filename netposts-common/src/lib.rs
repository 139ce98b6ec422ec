pub mod model;
pub mod permalink;
pub mod php;
pub mod url;
