pub mod popular;
pub mod quotes;
pub mod sources;
pub mod votes;
