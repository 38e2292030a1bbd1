use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::board::BoardId;
use crate::property::PropertyValue;

pub type CardId = String;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFields {
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub board_id: BoardId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub modified_by: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub fields: CardFields,
}

impl Card {
    pub fn new(board_id: BoardId, title: String) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            board_id,
            title,
            created_by: String::new(),
            modified_by: String::new(),
            create_at: now,
            update_at: now,
            fields: CardFields::default(),
        }
    }

    pub fn property(&self, template_id: &str) -> Option<&PropertyValue> {
        self.fields.properties.get(template_id)
    }

    pub fn set_property(&mut self, template_id: impl Into<String>, value: impl Into<PropertyValue>) {
        self.fields.properties.insert(template_id.into(), value.into());
    }

    pub fn with_property(
        mut self,
        template_id: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.set_property(template_id, value);
        self
    }
}
