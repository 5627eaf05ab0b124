pub mod brands;
pub mod categories;
pub mod deals;
pub mod specs;
pub mod uploads;

use async_graphql::MaybeUndefined;
use futures_util::future::try_join;
use sea_orm::{
    Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select,
};

use crate::error::AppResult;
use crate::pagination::{PageMeta, Paginated, PaginationArgs};

/// Create a SeaORM database connection pool.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Run `select` for the page described by `args` and attach its [`PageMeta`].
pub async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    args: &PaginationArgs,
) -> AppResult<Paginated<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    let page = args.page()?;
    let limit = args.limit()?;
    let offset = args.offset()?;

    let counter = select.clone().paginate(db, limit);
    let rows = select.offset(offset).limit(limit).all(db);
    let (total, items) = try_join(counter.num_items(), rows).await?;

    Ok(Paginated::new(items, PageMeta::new(total, page, limit)?))
}

/// `Some(value)` when an update field was sent, `value` being `None` for an
/// explicit null. `None` leaves the column untouched.
pub(crate) fn provided<T>(field: MaybeUndefined<T>) -> Option<Option<T>> {
    field.into()
}
