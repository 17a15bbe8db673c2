//! Mentee profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::{MenteeProfile, Tags};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mentee_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub goals: String,
    pub interests: String,
    pub location: String,
    pub education: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MenteeProfile {
    fn from(model: Model) -> Self {
        MenteeProfile {
            id: model.id,
            user_id: model.user_id,
            bio: model.bio,
            goals: Tags::from_stored(&model.goals),
            interests: Tags::from_stored(&model.interests),
            location: model.location,
            education: model.education,
            created_at: model.created_at,
        }
    }
}
