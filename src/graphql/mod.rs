pub mod context;
pub mod mutation;
pub mod query;
pub mod types;

use actix_web::{HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, MergedObject, Schema, SchemaBuilder};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::auth::middleware::AuthenticatedUser;
use mutation::{BrandMutation, CategoryMutation, DealMutation, SpecMutation, UploadMutation};
use query::{BrandQuery, CategoryQuery, DealQuery, SpecQuery, UploadQuery};

pub use context::ApiContext;

#[derive(MergedObject, Default)]
pub struct RootQuery(BrandQuery, CategoryQuery, DealQuery, SpecQuery, UploadQuery);

#[derive(MergedObject, Default)]
pub struct RootMutation(
    BrandMutation,
    CategoryMutation,
    DealMutation,
    SpecMutation,
    UploadMutation,
);

pub type AppSchema = Schema<RootQuery, RootMutation, EmptySubscription>;

/// Schema without data attached; `main` adds the [`ApiContext`].
pub fn build_schema() -> SchemaBuilder<RootQuery, RootMutation, EmptySubscription> {
    Schema::build(
        RootQuery::default(),
        RootMutation::default(),
        EmptySubscription,
    )
}

/// POST /graphql: queries, mutations and multipart uploads. A valid bearer
/// token is attached to the request so mutations can check the caller.
pub async fn graphql_handler(
    schema: web::Data<AppSchema>,
    user: Option<AuthenticatedUser>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(user) = user {
        request = request.data(user);
    }
    schema.execute(request).await.into()
}

/// GET /graphql: GraphiQL playground.
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
