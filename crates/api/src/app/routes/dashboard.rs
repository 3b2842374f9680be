use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Form, Query,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use stockwatch_inventory::{Dataset, DashboardView};

use crate::app::{dto, errors, render};
use crate::context::SessionContext;

pub async fn page(
    Extension(session): Extension<SessionContext>,
    query: Result<Query<dto::DashboardQuery>, QueryRejection>,
) -> Response {
    let (dataset, view) = match load_view(&session, query) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    Html(render::page(&view, &dataset)).into_response()
}

pub async fn view_json(
    Extension(session): Extension<SessionContext>,
    query: Result<Query<dto::DashboardQuery>, QueryRejection>,
) -> Response {
    let (dataset, view) = match load_view(&session, query) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    (
        StatusCode::OK,
        Json(dto::DashboardResponse::new(session.session_id(), &dataset, view)),
    )
        .into_response()
}

pub async fn regenerate_json(Extension(session): Extension<SessionContext>) -> Response {
    session.dataset().invalidate();
    let dataset = match session.dataset().get() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(dto::RegenerateResponse {
            session_id: session.session_id().to_string(),
            generation: dataset.generation(),
            total_skus: dataset.items().len(),
        }),
    )
        .into_response()
}

/// Form variant of regenerate: back to the page with the same counts
/// (303 so the browser issues a GET).
pub async fn regenerate_form(
    Extension(session): Extension<SessionContext>,
    form: Result<Form<dto::DashboardQuery>, FormRejection>,
) -> Response {
    let Form(counts) = match form {
        Ok(f) => f,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_form", e.body_text()),
    };

    session.dataset().invalidate();
    Redirect::to(&counts.page_location()).into_response()
}

fn load_view(
    session: &SessionContext,
    query: Result<Query<dto::DashboardQuery>, QueryRejection>,
) -> Result<(Arc<Dataset>, DashboardView), Response> {
    let Query(q) = query.map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", e.body_text())
    })?;

    let dataset = session
        .dataset()
        .get()
        .map_err(errors::domain_error_to_response)?;

    let view = DashboardView::build(dataset.items(), q.n_under, q.n_over);

    tracing::debug!(
        session = %session.session_id(),
        generation = dataset.generation(),
        total_skus = view.total_skus,
        out_of_bounds = view.out_of_bounds,
        n_under = view.n_under,
        n_over = view.n_over,
        "rendered dashboard"
    );

    Ok((dataset, view))
}
