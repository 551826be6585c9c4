use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    // Primary key is the upstream catalog id, never generated locally.
                    .col(integer(Movie::Id).primary_key())
                    .col(string(Movie::Title))
                    .col(text_null(Movie::Description))
                    .col(string_null(Movie::ImageUrl))
                    .col(double(Movie::Rating))
                    .col(integer(Movie::Year))
                    .col(string(Movie::Genres))
                    .col(big_integer(Movie::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserPreference::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPreference::Id))
                    .col(string(UserPreference::UserId))
                    .col(integer(UserPreference::MovieId))
                    .col(integer(UserPreference::Rating))
                    .col(big_integer(UserPreference::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Backs the atomic on-conflict upsert: at most one row per (user, movie).
        manager
            .create_index(
                Index::create()
                    .name("idx_user_preference_unique")
                    .table(UserPreference::Table)
                    .col(UserPreference::UserId)
                    .col(UserPreference::MovieId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_preference_user_id")
                    .table(UserPreference::Table)
                    .col(UserPreference::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserPreference::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    Rating,
    Year,
    Genres,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserPreference {
    Table,
    Id,
    UserId,
    MovieId,
    Rating,
    CreatedAt,
}
