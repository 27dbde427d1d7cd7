use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// User-defined label. One tag may back any number of items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub title: String,
}

impl Tag {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }
}

impl Identifiable for Tag {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Titled for Tag {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Displayable for Tag {
    fn display_label(&self) -> String {
        format!("#{}", self.title)
    }
}
