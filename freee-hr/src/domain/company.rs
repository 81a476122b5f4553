use serde::Deserialize;

/// The authenticated user, as returned by `GET /users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Me {
    #[serde(default)]
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}
