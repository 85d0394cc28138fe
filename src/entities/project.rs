use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

use crate::utils::slug::SlugStyle;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub description: String,
    pub image: Option<String>, // path or URL, the file itself lives elsewhere
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::board::Entity")]
    Boards,
    #[sea_orm(has_many = "super::label::Entity")]
    Labels,
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Boards.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Fill in the slug from the title when none is set.
    ///
    /// A slug that is already present is left alone, so saving the same
    /// project again never changes it.
    pub fn ensure_slug(&mut self, style: SlugStyle) {
        let has_slug = match &self.slug {
            ActiveValue::Set(slug) | ActiveValue::Unchanged(slug) => !slug.is_empty(),
            ActiveValue::NotSet => false,
        };
        if has_slug {
            return;
        }
        if let ActiveValue::Set(title) | ActiveValue::Unchanged(title) = &self.title {
            self.slug = ActiveValue::Set(style.apply(title));
        }
    }
}
