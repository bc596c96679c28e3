use serde::Deserialize;

/// Body of `POST /like/{id}/`.
#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}
