use serde::{Deserialize, Serialize};

/// Root taxonomy node. Seeded once, effectively immutable afterward.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub name: String,
    pub description: Option<String>,
}

impl NewSubject {
    pub fn into_subject(self, id: i32) -> Subject {
        Subject {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
