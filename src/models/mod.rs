use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One uploaded picture, already resized and inlined as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub id: String,
    pub name: String,
    pub data_url: String,
}

/// What the organizer shares: the image set plus the per-person budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub images: Vec<ImageFile>,
    pub votes_per_person: u32,
}

/// What a participant sends back. The image list travels along so the
/// aggregator never needs the original session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsData {
    pub images: Vec<ImageFile>,
    pub user_votes: BTreeMap<String, u32>,
}

/// An image with its vote total across every submitted code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedImage {
    #[serde(flatten)]
    pub image: ImageFile,
    pub votes: u64,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("{}-{}-{}", name, Utc::now().timestamp_millis(), Uuid::new_v4()),
            name,
            data_url: data_url.into(),
        }
    }
}

impl SessionData {
    pub fn new(images: Vec<ImageFile>, votes_per_person: u32) -> Self {
        Self {
            images,
            votes_per_person,
        }
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.images.iter().any(|image| image.id == image_id)
    }
}

impl ResultsData {
    pub fn total_votes(&self) -> u64 {
        self.user_votes.values().map(|&count| u64::from(count)).sum()
    }
}
