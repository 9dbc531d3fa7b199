use crate::data::student::StudentParams;
use axum::{
    extract::{Form, FromRequest, Query, Request},
    http::Method,
};
use std::convert::Infallible;

type Pairs = Vec<(String, String)>;

/// Reads the whitelisted fields from the query string, then from a urlencoded body.
/// Body values win. Input that can't be read counts as not supplied.
impl<S> FromRequest<S> for StudentParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = match Query::<Pairs>::try_from_uri(req.uri()) {
            Ok(Query(pairs)) => Self::from_pairs(pairs),
            Err(rejection) => {
                debug!(%rejection, "Ignoring unreadable query string");
                Self::default()
            }
        };

        //`Form` reads the query string again for these
        if matches!(*req.method(), Method::GET | Method::HEAD) {
            return Ok(query);
        }

        let body = match Form::<Pairs>::from_request(req, state).await {
            Ok(Form(pairs)) => Self::from_pairs(pairs),
            Err(rejection) => {
                debug!(%rejection, "Ignoring unreadable form body");
                Self::default()
            }
        };

        Ok(query.overridden_by(body))
    }
}
