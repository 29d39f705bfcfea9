//! Create `drawing` table.
//! One row per saved canvas; `canvas_state` holds the serialized JSON document.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drawing::Table)
                    .if_not_exists()
                    .col(string(Drawing::Id).primary_key())
                    .col(string(Drawing::Name).not_null())
                    .col(text(Drawing::PreviewImage).not_null())
                    .col(text(Drawing::CanvasState).not_null())
                    .col(timestamp_with_time_zone(Drawing::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Drawing::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // List is always ordered by recency
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_drawing_updated_at")
                    .table(Drawing::Table)
                    .col(Drawing::UpdatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Drawing::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Drawing {
    Table,
    Id,
    Name,
    PreviewImage,
    CanvasState,
    CreatedAt,
    UpdatedAt,
}
