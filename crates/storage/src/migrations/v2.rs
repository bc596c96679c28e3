//! Migration v2: ranking and listing indexes

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_sources_title ON sources(title);
CREATE INDEX IF NOT EXISTS idx_quotes_created ON quotes(created_at DESC);
";
