pub mod client;
pub mod feed;
pub mod query;
mod record;
pub mod site;
pub mod store;
pub mod tables;
pub mod thumbnail;

#[cfg(test)]
mod test_store;
