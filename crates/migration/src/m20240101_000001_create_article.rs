//! Create `article` table.
//!
//! `path` is the public slug of an article and carries a unique index.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(pk_auto(Article::Id))
                    .col(string_len(Article::Title, 250).not_null())
                    .col(text(Article::ShortDescription).not_null())
                    .col(text(Article::Description).not_null())
                    .col(text(Article::Category).not_null())
                    .col(text(Article::Source).not_null())
                    .col(string_len(Article::Path, 512).not_null())
                    .col(timestamp_with_time_zone(Article::PublishedDate).not_null())
                    .col(text(Article::Author).not_null())
                    .col(text(Article::ImageUrl).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_article_path_unique")
                    .table(Article::Table)
                    .col(Article::Path)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Article::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Article {
    Table,
    Id,
    Title,
    ShortDescription,
    Description,
    Category,
    Source,
    Path,
    PublishedDate,
    Author,
    ImageUrl,
}
