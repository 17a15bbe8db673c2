//! Mentor profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::{MentorProfile, Tags};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mentor_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    /// Comma-joined tags
    pub expertise: String,
    /// Comma-joined tags
    pub languages: String,
    pub availability: String,
    #[sea_orm(column_type = "Text")]
    pub experience: String,
    pub education: String,
    pub location: String,
    pub is_approved: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

impl From<Model> for MentorProfile {
    fn from(model: Model) -> Self {
        MentorProfile {
            id: model.id,
            user_id: model.user_id,
            bio: model.bio,
            expertise: Tags::from_stored(&model.expertise),
            languages: Tags::from_stored(&model.languages),
            availability: model.availability,
            experience: model.experience,
            education: model.education,
            location: model.location,
            is_approved: model.is_approved,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
