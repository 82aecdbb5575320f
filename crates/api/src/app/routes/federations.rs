//! CRUD handlers for `/federations`.
//!
//! Each handler decodes (writes only), acquires the repository, runs one
//! repository operation and encodes the result.

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Extension, Path},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    response::Response,
    routing::MethodFilter,
};

use fedsvc_core::{Federation, FederationId};

use crate::app::codec::{self, Reply};
use crate::app::errors;
use crate::app::route_group::RouteGroup;
use crate::app::AppState;

pub fn register(group: &mut RouteGroup) {
    group.handle(MethodFilter::POST, "", create_federation);
    group.handle(MethodFilter::GET, "/:id", get_federation);
    group.handle(MethodFilter::GET, "", list_federations);
    group.handle(MethodFilter::PUT, "/:id", update_federation);
    group.handle(MethodFilter::DELETE, "/:id", delete_federation);
}

pub async fn create_federation(Extension(state): Extension<AppState>, body: Body) -> Response {
    let federation: Federation = match codec::read_json(body).await {
        Ok(v) => v,
        Err(e) => return errors::bad_request(e),
    };

    let repo = match state.acquire() {
        Ok(r) => r,
        Err(e) => return errors::backend_unavailable(e),
    };

    errors::write_result_to_response(repo.add(federation))
}

pub async fn get_federation(
    Extension(state): Extension<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let repo = match state.acquire() {
        Ok(r) => r,
        Err(e) => return errors::backend_unavailable(e),
    };

    let Some(federation) = repo.get(id) else {
        return errors::not_found(id);
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    codec::respond(Reply::ok(federation), Some(&headers))
}

pub async fn list_federations(Extension(state): Extension<AppState>) -> Response {
    let repo = match state.acquire() {
        Ok(r) => r,
        Err(e) => return errors::backend_unavailable(e),
    };

    codec::respond(Reply::ok(repo.list()), None)
}

pub async fn update_federation(
    Extension(state): Extension<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Body,
) -> Response {
    let mut federation: Federation = match codec::read_json(body).await {
        Ok(v) => v,
        Err(e) => return errors::bad_request(e),
    };

    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // The path is authoritative over any id in the body.
    federation.id = id;

    let repo = match state.acquire() {
        Ok(r) => r,
        Err(e) => return errors::backend_unavailable(e),
    };

    errors::write_result_to_response(repo.update(federation))
}

pub async fn delete_federation(
    Extension(state): Extension<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let repo = match state.acquire() {
        Ok(r) => r,
        Err(e) => return errors::backend_unavailable(e),
    };

    errors::write_result_to_response(repo.delete(id))
}

/// Path segment to identifier; undecodable segments and non-integers are both 400.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<FederationId, Response> {
    let Path(raw) = path.map_err(errors::bad_request)?;
    raw.parse::<FederationId>().map_err(errors::bad_request)
}
