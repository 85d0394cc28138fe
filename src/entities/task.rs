use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Task priority, stored as its upper-case name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[sea_orm(string_value = "HIGH")]
    High,
    #[default]
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "LOW")]
    Low,
}

impl Priority {
    /// Display label, e.g. "High"
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    /// Auto-assigned unless the caller supplies one
    #[sea_orm(primary_key)]
    pub task_no: i32,
    pub list_id: i32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub story_points: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::list::Entity",
        from = "Column::ListId",
        to = "super::list::Column::Id",
        on_delete = "Cascade"
    )]
    List,
}

impl Related<super::list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::List.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        super::task_label::Relation::Label.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::task_label::Relation::Task.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
