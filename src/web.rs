use std::{convert::Infallible, net::SocketAddr, path::PathBuf};

use async_graphql::http::GraphiQLSource;
use async_graphql_warp::GraphQLResponse;
use tracing::info;
use warp::{http::Response, Filter};

use crate::api::Schema;

/// Certificate and key paths for serving over HTTPS.
pub(crate) struct Tls {
    pub(crate) cert: PathBuf,
    pub(crate) key: PathBuf,
}

/// Serves the GraphQL endpoint at `POST /` and GraphiQL at `GET /`.
pub(crate) async fn serve(schema: Schema, addr: SocketAddr, tls: Option<Tls>) {
    let graphql = async_graphql_warp::graphql(schema).and_then(
        |(schema, request): (Schema, async_graphql::Request)| async move {
            Ok::<_, Infallible>(GraphQLResponse::from(schema.execute(request).await))
        },
    );
    let graphiql = warp::path::end().and(warp::get()).map(|| {
        Response::builder()
            .header("content-type", "text/html")
            .body(GraphiQLSource::build().endpoint("/").finish())
    });
    let routes = graphiql.or(graphql);

    if let Some(tls) = tls {
        info!("Listening on https://{addr}");
        warp::serve(routes)
            .tls()
            .cert_path(tls.cert)
            .key_path(tls.key)
            .run(addr)
            .await;
    } else {
        info!("Listening on http://{addr}");
        warp::serve(routes).run(addr).await;
    }
}
