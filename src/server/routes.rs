use crate::access::Identity;
use crate::catalog::query::{self, ALL_ROOMS};
use crate::catalog::types::lenient_int;
use crate::catalog::{Direction, FilterCriteria, FilterParams};
use crate::error::{AppError, SubmissionError};
use crate::server::params::first_values;
use crate::server::AppState;
use crate::submissions::{validate_contact, validate_newsletter, ContactForm, NewsletterForm};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn home(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Response {
    let catalog = state.store.load();
    let featured = query::featured(&catalog);

    Json(json!({
        "featured": featured,
        "index": 0,
        "isAuthenticated": identity.is_authenticated(),
    }))
    .into_response()
}

pub async fn list_properties(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params: FilterParams = first_values(pairs);
    let catalog = state.store.load();
    let properties = query::filter(&catalog, &FilterCriteria::from(&params));

    Json(json!({
        "properties": properties,
        "filters": params,
        "isAuthenticated": identity.is_authenticated(),
    }))
    .into_response()
}

/// Grid-only variant of the listing for partial page swaps
pub async fn filter_properties(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params: FilterParams = first_values(pairs);
    let catalog = state.store.load();
    Json(query::filter(&catalog, &FilterCriteria::from(&params))).into_response()
}

pub async fn property_detail(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let catalog = state.store.load();
    let property = query::find_by_slug(&catalog, &slug)?;

    Ok(Json(json!({
        "property": property,
        "typeLabel": property.type_label(),
        "bedroomText": property.bedroom_text(),
        "bathroomText": property.bathroom_text(),
        "fullAddress": property.full_address(),
        "rooms": query::unique_rooms(property)
            .into_iter()
            .map(|room| json!({ "room": room, "label": room.label() }))
            .collect::<Vec<_>>(),
        "isAuthenticated": identity.is_authenticated(),
    }))
    .into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryParams {
    room: Option<String>,
    index: Option<String>,
}

pub async fn property_gallery(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let params: GalleryParams = first_values(pairs);
    let catalog = state.store.load();
    let room = params.room.as_deref().filter(|r| *r != ALL_ROOMS);
    let view = query::gallery(&catalog, &slug, room, params.index.as_deref())?;
    Ok(Json(view).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct CarouselParams {
    index: Option<String>,
}

pub async fn carousel_next(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    rotate(&state, Direction::Next, first_values(pairs))
}

pub async fn carousel_prev(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    rotate(&state, Direction::Previous, first_values(pairs))
}

fn rotate(state: &AppState, direction: Direction, params: CarouselParams) -> Result<Response, AppError> {
    let catalog = state.store.load();
    let override_index = lenient_int(params.index.as_deref());
    let rotation = state.cursor.advance(&catalog, direction, override_index)?;
    Ok(Json(rotation).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactPageParams {
    property: Option<String>,
}

pub async fn contact_page(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params: ContactPageParams = first_values(pairs);
    let catalog = state.store.load();
    let view = query::contact_page(&catalog, params.property.as_deref());

    Json(json!({
        "properties": view.properties,
        "selected": view.selected,
        "isAuthenticated": identity.is_authenticated(),
    }))
    .into_response()
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form: ContactForm = first_values(pairs);
    let record = {
        let catalog = state.store.load();
        validate_contact(&form, &catalog)?
    };
    let inquiry = record.inquiry_type;

    let id = state.sink.append_contact(record).await.map_err(|e| {
        warn!("Failed to store contact submission: {e}");
        SubmissionError::from(e)
    })?;
    info!(id, "Contact submission accepted");

    Ok(Json(json!({
        "success": true,
        "id": id,
        "inquiryType": inquiry,
        "message": "Thank you! We'll get back to you within 24 hours.",
    }))
    .into_response())
}

pub async fn newsletter(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form: NewsletterForm = first_values(pairs);
    let record = validate_newsletter(&form)?;

    let id = state.sink.append_subscriber(record).await.map_err(|e| {
        warn!("Failed to store newsletter signup: {e}");
        SubmissionError::from(e)
    })?;
    info!(id, "Newsletter signup accepted");

    Ok(Json(json!({
        "success": true,
        "id": id,
        "message": "Successfully subscribed!",
    }))
    .into_response())
}

pub async fn about(Extension(identity): Extension<Identity>) -> Response {
    Json(json!({ "isAuthenticated": identity.is_authenticated() })).into_response()
}

pub async fn dashboard(Extension(identity): Extension<Identity>) -> Response {
    Json(json!({ "userId": identity.user_id() })).into_response()
}

pub async fn sign_in(State(state): State<AppState>) -> Response {
    Json(json!({ "publishableKey": &*state.publishable_key })).into_response()
}

pub async fn sign_up(State(state): State<AppState>) -> Response {
    Json(json!({ "publishableKey": &*state.publishable_key })).into_response()
}
