//! Create `documents`: one JSONB row per entity, grouped by collection.
//!
//! `seq` preserves insertion order for stable listings; `id` is the native
//! string identity handed back to callers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Documents::Collection, 64).not_null())
                    .col(
                        ColumnDef::new(Documents::Id)
                            .text()
                            .not_null()
                            .default(Expr::cust("gen_random_uuid()::text")),
                    )
                    .col(json_binary(Documents::Doc).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_documents_collection_id")
                    .table(Documents::Table)
                    .col(Documents::Collection)
                    .col(Documents::Id)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_documents_collection")
                    .table(Documents::Table)
                    .col(Documents::Collection)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Documents::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Seq,
    Collection,
    Id,
    Doc,
}
