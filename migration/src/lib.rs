pub use sea_orm_migration::prelude::*;

mod m20260904_000001_create_brands_table;
mod m20260904_000002_create_categories_table;
mod m20260904_000003_create_deals_table;
mod m20260904_000004_create_specs_table;
mod m20260904_000005_create_uploads_table;
mod m20260911_000001_add_catalogue_indexes;
mod m20260918_000001_add_deal_price_checks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260904_000001_create_brands_table::Migration),
            Box::new(m20260904_000002_create_categories_table::Migration),
            Box::new(m20260904_000003_create_deals_table::Migration),
            Box::new(m20260904_000004_create_specs_table::Migration),
            Box::new(m20260904_000005_create_uploads_table::Migration),
            Box::new(m20260911_000001_add_catalogue_indexes::Migration),
            Box::new(m20260918_000001_add_deal_price_checks::Migration),
        ]
    }
}
