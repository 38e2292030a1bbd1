use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::property::{find_template, PropertyTemplate, PropertyValue};

pub type BoardId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardType {
    #[serde(rename = "O")]
    Open,
    #[default]
    #[serde(rename = "P")]
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Viewer,
    Commenter,
    Editor,
    Admin,
    #[default]
    #[serde(rename = "")]
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub modified_by: String,
    #[serde(rename = "type", default)]
    pub board_type: BoardType,
    #[serde(default)]
    pub minimum_role: MemberRole,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub show_description: bool,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub template_version: i32,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
    #[serde(default)]
    pub card_properties: Vec<PropertyTemplate>,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
}

impl Board {
    pub fn new(title: String) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            team_id: String::new(),
            channel_id: String::new(),
            created_by: String::new(),
            modified_by: String::new(),
            board_type: BoardType::Private,
            minimum_role: MemberRole::None,
            title,
            description: String::new(),
            icon: String::new(),
            show_description: false,
            is_template: false,
            template_version: 0,
            properties: BTreeMap::new(),
            card_properties: Vec::new(),
            create_at: now,
            update_at: now,
            delete_at: 0,
        }
    }

    pub fn with_card_properties(mut self, card_properties: Vec<PropertyTemplate>) -> Self {
        self.card_properties = card_properties;
        self
    }

    pub fn find_card_property(&self, id: &str) -> Option<&PropertyTemplate> {
        find_template(&self.card_properties, id)
    }
}
