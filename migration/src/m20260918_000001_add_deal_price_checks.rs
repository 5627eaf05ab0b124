use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE deals ADD CONSTRAINT chk_deals_price_non_negative CHECK (price >= 0 AND (original_price IS NULL OR original_price >= 0))",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE deals DROP CONSTRAINT IF EXISTS chk_deals_price_non_negative")
            .await?;

        Ok(())
    }
}
