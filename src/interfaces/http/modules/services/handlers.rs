use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::AppState;

use super::dto::{CreateServiceRequest, ServiceDto, UpdateServiceRequest};

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// List the guest service catalog
#[utoipa::path(
    get,
    path = "/api/v1/services",
    responses(
        (status = 200, description = "All services", body = ApiResponse<Vec<ServiceDto>>)
    ),
    tag = "services"
)]
pub async fn list_services(State(state): State<AppState>) -> HandlerResult<Vec<ServiceDto>> {
    let services = state
        .repos
        .services()
        .find_all()
        .await
        .map_err(domain_error)?;
    let dtos: Vec<ServiceDto> = services.iter().map(ServiceDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Get a service by id
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service found", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HandlerResult<ServiceDto> {
    let service = state
        .repos
        .services()
        .find_by_id(id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Service", "id", id)))?;
    Ok(Json(ApiResponse::success(ServiceDto::from(&service))))
}

/// Add a service to the catalog
#[utoipa::path(
    post,
    path = "/api/v1/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<ServiceDto>),
        (status = 422, description = "Validation failed")
    ),
    tag = "services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDto>>), (StatusCode, Json<ApiResponse<ServiceDto>>)>
{
    let service = state
        .repos
        .services()
        .save(body.into_domain())
        .await
        .map_err(domain_error)?;
    info!(service_id = service.id, name = %service.name, "Service created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ServiceDto::from(&service))),
    ))
}

/// Update a service. Price changes never touch issued invoices.
#[utoipa::path(
    put,
    path = "/api/v1/services/{id}",
    params(("id" = i32, Path, description = "Service id")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateServiceRequest>,
) -> HandlerResult<ServiceDto> {
    let mut service = state
        .repos
        .services()
        .find_by_id(id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Service", "id", id)))?;

    body.apply(&mut service);
    state
        .repos
        .services()
        .update(service.clone())
        .await
        .map_err(domain_error)?;
    info!(service_id = id, "Service updated");

    Ok(Json(ApiResponse::success(ServiceDto::from(&service))))
}
