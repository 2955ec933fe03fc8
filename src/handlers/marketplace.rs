// src/handlers/marketplace.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::marketplace::{
        CreateOrderPayload, Order, OrderDetail, Payment, PaymentPayload, Product, ProductFilter,
        ProductListing, ProductPayload, ProductReview, ReviewPayload, Shipping, ShippingPayload,
        Store, StorePayload, StoreReview, UpdateOrderPayload,
    },
};

// Filtro ?order= obrigatório nas listagens de pagamentos e fretes
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderScope {
    pub order: Uuid,
}

// Filtro opcional ?farm= na listagem de lojas
#[derive(Debug, Deserialize, IntoParams)]
pub struct StoreScope {
    pub farm: Option<Uuid>,
}

// ---
// Lojas
// ---

#[utoipa::path(
    get,
    path = "/api/marketplace/stores",
    tag = "Marketplace",
    params(StoreScope),
    responses((status = 200, body = [Store])),
    security(("api_jwt" = []))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<StoreScope>,
) -> Result<impl IntoResponse, AppError> {
    let stores = app_state
        .marketplace_repo
        .list_stores(user.id, scope.farm)
        .await?;
    Ok(Json(stores))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/stores/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Store), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_store(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let store = app_state
        .marketplace_repo
        .get_store(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Store"))?;
    Ok(Json(store))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/stores",
    tag = "Marketplace",
    request_body = StorePayload,
    responses((status = 201, body = Store)),
    security(("api_jwt" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let store = app_state
        .marketplace_repo
        .create_store(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(store)))
}

#[utoipa::path(
    put,
    path = "/api/marketplace/stores/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    request_body = StorePayload,
    responses((status = 200, body = Store), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_store(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let store = app_state
        .marketplace_repo
        .update_store(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Store"))?;
    Ok(Json(store))
}

#[utoipa::path(
    delete,
    path = "/api/marketplace/stores/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.marketplace_repo.delete_store(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Store"))
    }
}

// ---
// Catálogo de produtos (leitura pública)
// ---

#[utoipa::path(
    get,
    path = "/api/marketplace/products",
    tag = "Marketplace",
    params(ProductFilter),
    responses((status = 200, body = [ProductListing]))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.marketplace_repo.list_products(&filter).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/products/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = ProductListing), (status = 404))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .marketplace_repo
        .get_product(id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/products",
    tag = "Marketplace",
    request_body = ProductPayload,
    responses((status = 201, body = Product), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state
        .marketplace_repo
        .create_product(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/marketplace/products/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    request_body = ProductPayload,
    responses((status = 200, body = Product), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state
        .marketplace_repo
        .update_product(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/marketplace/products/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state
        .marketplace_repo
        .delete_product(id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Product"))
    }
}

// ---
// Pedidos
// ---

#[utoipa::path(
    get,
    path = "/api/marketplace/orders",
    tag = "Marketplace",
    responses((status = 200, body = [Order])),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.marketplace_repo.list_orders(user.id).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/orders/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = OrderDetail), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .marketplace_repo
        .get_order(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    let items = app_state.marketplace_repo.list_order_items(id).await?;
    Ok(Json(OrderDetail { order, items }))
}

// Criação transacional: valida estoque, grava itens e baixa o estoque.
#[utoipa::path(
    post,
    path = "/api/marketplace/orders",
    tag = "Marketplace",
    request_body = CreateOrderPayload,
    responses((status = 201, body = OrderDetail), (status = 400), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let detail = app_state
        .marketplace_service
        .create_order(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/marketplace/orders/{id}",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    request_body = UpdateOrderPayload,
    responses((status = 200, body = Order), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let order = app_state
        .marketplace_repo
        .update_order_status(
            id,
            user.id,
            &payload.status,
            payload.shipping_address.as_deref(),
            payload.transport_mode.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    Ok(Json(order))
}

// ---
// Pagamentos
// ---

#[utoipa::path(
    get,
    path = "/api/marketplace/payments",
    tag = "Marketplace",
    params(OrderScope),
    responses((status = 200, body = [Payment])),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<OrderScope>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .marketplace_repo
        .list_payments(scope.order, user.id)
        .await?;
    Ok(Json(payments))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/payments",
    tag = "Marketplace",
    request_body = PaymentPayload,
    responses((status = 201, body = Payment), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<PaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let payment = app_state
        .marketplace_repo
        .create_payment(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

// ---
// Fretes
// ---

#[utoipa::path(
    get,
    path = "/api/marketplace/shippings",
    tag = "Marketplace",
    params(OrderScope),
    responses((status = 200, body = [Shipping])),
    security(("api_jwt" = []))
)]
pub async fn list_shippings(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<OrderScope>,
) -> Result<impl IntoResponse, AppError> {
    let shippings = app_state
        .marketplace_repo
        .list_shippings(scope.order, user.id)
        .await?;
    Ok(Json(shippings))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/shippings",
    tag = "Marketplace",
    request_body = ShippingPayload,
    responses((status = 201, body = Shipping), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_shipping(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ShippingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let shipping = app_state
        .marketplace_repo
        .create_shipping(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(shipping)))
}

// ---
// Avaliações
// ---

#[utoipa::path(
    get,
    path = "/api/marketplace/stores/{id}/reviews",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = [StoreReview])),
    security(("api_jwt" = []))
)]
pub async fn list_store_reviews(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = app_state.marketplace_repo.list_store_reviews(id).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/stores/{id}/reviews",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    request_body = ReviewPayload,
    responses((status = 201, body = StoreReview), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_store_review(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if app_state.marketplace_repo.find_store(id).await?.is_none() {
        return Err(AppError::NotFound("Store"));
    }
    let review = app_state
        .marketplace_repo
        .create_store_review(id, user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/products/{id}/reviews",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = [ProductReview])),
    security(("api_jwt" = []))
)]
pub async fn list_product_reviews(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = app_state.marketplace_repo.list_product_reviews(id).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/products/{id}/reviews",
    tag = "Marketplace",
    params(("id" = Uuid, Path)),
    request_body = ReviewPayload,
    responses((status = 201, body = ProductReview), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_product_review(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if app_state.marketplace_repo.get_product(id).await?.is_none() {
        return Err(AppError::NotFound("Product"));
    }
    let review = app_state
        .marketplace_repo
        .create_product_review(id, user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}
