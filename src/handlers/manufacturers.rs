//! Manufacturer HTTP handlers: bind the route surface to the service.

use crate::context::RequestContext;
use crate::error::AppError;
use crate::model::{LookupKey, ManufacturerPatch, Page, SearchQuery, Status};
use crate::response::{MetaCount, SuccessMany, SuccessOne};
use crate::service::ManufacturerService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub status: Option<Status>,
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl SearchParams {
    /// No paging params means the full result set; either one alone gets a
    /// default for the other.
    fn page(&self) -> Option<Page> {
        if self.limit.is_none() && self.skip.is_none() {
            return None;
        }
        Some(Page {
            skip: self.skip.unwrap_or(0),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        })
    }
}

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid id".into()))
}

pub async fn search(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = SearchQuery {
        status: params.status,
        name: params.name.clone(),
    };
    let page = params.page();
    let result =
        ManufacturerService::search(state.store.as_ref(), &query, page.as_ref(), &ctx).await?;
    Ok((
        StatusCode::OK,
        Json(SuccessMany {
            data: result.items,
            meta: MetaCount {
                count: result.count,
            },
        }),
    ))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(body): Json<ManufacturerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let entity = ManufacturerService::create(state.store.as_ref(), body, &ctx).await?;
    Ok((StatusCode::CREATED, Json(SuccessOne { data: entity })))
}

/// GET by path segment: a UUID resolves by id, anything else by business
/// code (case-insensitive).
pub async fn get(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let key = LookupKey::parse(&id_str);
    let entity = ManufacturerService::get(state.store.as_ref(), &key, &ctx)
        .await?
        .ok_or(AppError::NotFound(id_str))?;
    Ok((StatusCode::OK, Json(SuccessOne { data: entity })))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id_str): Path<String>,
    Json(body): Json<ManufacturerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let entity = ManufacturerService::update(state.store.as_ref(), id, body, &ctx).await?;
    Ok((StatusCode::OK, Json(SuccessOne { data: entity })))
}

pub async fn remove(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    ManufacturerService::remove(state.store.as_ref(), id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
