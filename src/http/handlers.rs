//! Route handlers for the shared list and the session list.
//!
//! Both follow the same cycle: GET renders, POST appends the submitted
//! `item` and redirects back so a refresh does not resubmit the form.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::http::views::{SessionPage, SharedPage};
use crate::items::{Item, SharedItemList};
use crate::observability::metrics::{self, Scope};
use crate::session::{Session, SetSession};

const ITEM_FIELD: &str = "item";

/// The `item` field of a submitted form.
///
/// Accepts url-encoded and multipart bodies; the first `item` value wins.
/// A body without the field, or one that is not a form at all, yields the
/// missing marker.
#[derive(Debug)]
pub struct SubmittedItem(pub Item);

impl<S> FromRequest<S> for SubmittedItem
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/x-www-form-urlencoded" => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                let value = fields
                    .into_iter()
                    .find(|(name, _)| name == ITEM_FIELD)
                    .map(|(_, value)| value);
                Ok(Self(Item::from(value)))
            }
            "multipart/form-data" => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                while let Some(field) = multipart
                    .next_field()
                    .await
                    .map_err(IntoResponse::into_response)?
                {
                    // File uploads are not form values.
                    if field.name() == Some(ITEM_FIELD) && field.file_name().is_none() {
                        let value = field.text().await.map_err(IntoResponse::into_response)?;
                        return Ok(Self(Item::new(value)));
                    }
                }
                Ok(Self(Item::missing()))
            }
            _ => Ok(Self(Item::missing())),
        }
    }
}

fn render(page: &impl Template) -> Response {
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn show_shared(State(shared): State<Arc<SharedItemList>>) -> Response {
    let items = shared.snapshot();
    render(&SharedPage { items: &items })
}

pub async fn add_shared(
    State(shared): State<Arc<SharedItemList>>,
    SubmittedItem(item): SubmittedItem,
) -> Redirect {
    tracing::debug!(item = %item, missing = item.is_missing(), "Adding item to shared list");
    let len = shared.push(item);
    metrics::record_item_appended(Scope::Shared);
    metrics::set_shared_items(len);

    Redirect::to("/")
}

pub async fn show_session(session: Session) -> (Option<SetSession>, Response) {
    if session.is_fresh() {
        tracing::debug!("Starting new session");
    }
    let page = render(&SessionPage {
        items: session.data().items(),
    });
    (session.persist_if_fresh(), page)
}

pub async fn add_session(
    session: Session,
    SubmittedItem(item): SubmittedItem,
) -> (SetSession, Redirect) {
    tracing::debug!(item = %item, missing = item.is_missing(), "Adding item to session list");
    let updated = session.data().with_item(item);
    metrics::record_item_appended(Scope::Session);

    (session.replace(&updated), Redirect::to("/session"))
}

pub async fn healthz() -> &'static str {
    "ok"
}
