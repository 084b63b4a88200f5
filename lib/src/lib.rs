use serde::{Deserialize, Serialize};

/// A category as it appears on the wire.
///
/// `id` is assigned by the server. It may be left out of request bodies, in which case it
/// defaults to `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
