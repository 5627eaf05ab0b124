use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `specs` table and its columns.
#[derive(DeriveIden)]
enum Specs {
    Table,
    Id,
    DealId,
    Name,
    Value,
    Position,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Deals {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Specs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Specs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Specs::DealId).uuid().not_null())
                    .col(ColumnDef::new(Specs::Name).string().not_null())
                    .col(ColumnDef::new(Specs::Value).text().not_null())
                    .col(ColumnDef::new(Specs::Position).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Specs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_specs_deal_id")
                            .from(Specs::Table, Specs::DealId)
                            .to(Deals::Table, Deals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Specs::Table).to_owned())
            .await
    }
}
