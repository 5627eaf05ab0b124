use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Deals {
    Table,
    BrandId,
    CategoryId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Specs {
    Table,
    DealId,
    Position,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    ParentId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Newest-first deal listings
        manager
            .create_index(
                Index::create()
                    .name("idx_deals_created_at")
                    .table(Deals::Table)
                    .col(Deals::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Deal listings filtered by brand
        manager
            .create_index(
                Index::create()
                    .name("idx_deals_brand_id")
                    .table(Deals::Table)
                    .col(Deals::BrandId)
                    .to_owned(),
            )
            .await?;

        // Deal listings filtered by category
        manager
            .create_index(
                Index::create()
                    .name("idx_deals_category_id")
                    .table(Deals::Table)
                    .col(Deals::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Specs of a deal in display order
        manager
            .create_index(
                Index::create()
                    .name("idx_specs_deal_id_position")
                    .table(Specs::Table)
                    .col(Specs::DealId)
                    .col(Specs::Position)
                    .to_owned(),
            )
            .await?;

        // Child categories
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_parent_id")
                    .table(Categories::Table)
                    .col(Categories::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_deals_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_deals_brand_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_deals_category_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_specs_deal_id_position").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_categories_parent_id").to_owned())
            .await?;

        Ok(())
    }
}
