use serde::{Deserialize, Serialize};

/// A topic belongs to exactly one subject.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i32,
    pub subject_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    pub subject_id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl NewTopic {
    pub fn into_topic(self, id: i32) -> Topic {
        Topic {
            id,
            subject_id: self.subject_id,
            name: self.name,
            description: self.description,
        }
    }
}
