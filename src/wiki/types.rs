use serde::{Deserialize, Serialize};

/// Storage representation name for wiki page bodies.
pub const STORAGE_REPRESENTATION: &str = "storage";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVersion {
    pub number: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBody {
    pub value: String,
    #[serde(default)]
    pub representation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBody {
    pub storage: StorageBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Path of the page in the web UI, relative to the wiki base
    #[serde(default)]
    pub webui: String,
}

/// Wiki page with its current version and storage body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub version: PageVersion,
    #[serde(default)]
    pub body: PageBody,
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
}

#[derive(Debug, Deserialize)]
pub struct PageSearchResponse {
    pub results: Vec<Page>,
}

#[derive(Debug, Serialize)]
pub struct SpaceKey {
    pub key: String,
}

/// Body of a page update. The version number must be one above the
/// current version.
#[derive(Debug, Serialize)]
pub struct PageUpdate {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub space: SpaceKey,
    pub version: PageVersion,
    pub body: PageBody,
}
