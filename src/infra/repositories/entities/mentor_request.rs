//! Mentorship request entity.

use sea_orm::entity::prelude::*;

use crate::domain::MentorRequest;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mentor_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mentee_id: Uuid,
    pub mentor_id: Uuid,
    /// PENDING, ACCEPTED or REJECTED
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MenteeId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Mentee,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MentorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Mentor,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for MentorRequest {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(|_| {
            AppError::internal(format!("Unknown stored request status: {}", model.status))
        })?;

        Ok(MentorRequest {
            id: model.id,
            mentee_id: model.mentee_id,
            mentor_id: model.mentor_id,
            status,
            message: model.message,
            response: model.response,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
