//! Migration: Create mentor and mentee profile tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MentorProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MentorProfiles::Bio).text().not_null())
                    .col(ColumnDef::new(MentorProfiles::Expertise).string().not_null())
                    .col(ColumnDef::new(MentorProfiles::Languages).string().not_null())
                    .col(
                        ColumnDef::new(MentorProfiles::Availability)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorProfiles::Experience).text().not_null())
                    .col(ColumnDef::new(MentorProfiles::Education).string().not_null())
                    .col(ColumnDef::new(MentorProfiles::Location).string().not_null())
                    .col(
                        ColumnDef::new(MentorProfiles::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentor_profiles_user")
                            .from(MentorProfiles::Table, MentorProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenteeProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenteeProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MenteeProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MenteeProfiles::Bio).text().not_null())
                    .col(ColumnDef::new(MenteeProfiles::Goals).string().not_null())
                    .col(ColumnDef::new(MenteeProfiles::Interests).string().not_null())
                    .col(ColumnDef::new(MenteeProfiles::Location).string().not_null())
                    .col(ColumnDef::new(MenteeProfiles::Education).string().not_null())
                    .col(
                        ColumnDef::new(MenteeProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentee_profiles_user")
                            .from(MenteeProfiles::Table, MenteeProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenteeProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MentorProfiles {
    Table,
    Id,
    UserId,
    Bio,
    Expertise,
    Languages,
    Availability,
    Experience,
    Education,
    Location,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MenteeProfiles {
    Table,
    Id,
    UserId,
    Bio,
    Goals,
    Interests,
    Location,
    Education,
    CreatedAt,
}
