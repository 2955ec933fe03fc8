// src/handlers/communications.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::communications::{
        ChatFrame, ConversationDetail, ConversationPayload, Message, MessagePayload,
        StartProductChatPayload,
    },
};

// ---
// Conversas
// ---

#[utoipa::path(
    get,
    path = "/api/communications/conversations",
    tag = "Communications",
    responses((status = 200, body = [ConversationDetail])),
    security(("api_jwt" = []))
)]
pub async fn list_conversations(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let conversations = app_state.chat_repo.list_conversations(user.id).await?;
    Ok(Json(conversations))
}

#[utoipa::path(
    get,
    path = "/api/communications/conversations/{id}",
    tag = "Communications",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = ConversationDetail), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_conversation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let conversation = app_state
        .chat_repo
        .get_conversation(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Conversation"))?;
    Ok(Json(conversation))
}

// O criador entra automaticamente; os demais vêm em participant_ids.
#[utoipa::path(
    post,
    path = "/api/communications/conversations",
    tag = "Communications",
    request_body = ConversationPayload,
    responses((status = 201, body = ConversationDetail)),
    security(("api_jwt" = []))
)]
pub async fn create_conversation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ConversationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut tx = app_state.db_pool.begin().await?;
    let conversation = app_state
        .chat_repo
        .insert_conversation(&mut *tx, &payload.title, payload.product_id)
        .await?;
    app_state
        .chat_repo
        .add_participant(&mut *tx, conversation.id, user.id)
        .await?;
    for participant_id in &payload.participant_ids {
        if *participant_id != user.id {
            app_state
                .chat_repo
                .add_participant(&mut *tx, conversation.id, *participant_id)
                .await?;
        }
    }
    tx.commit().await?;

    let mut participants = vec![user.id];
    participants.extend(payload.participant_ids.iter().filter(|id| **id != user.id));

    Ok((
        StatusCode::CREATED,
        Json(ConversationDetail {
            conversation,
            participants,
        }),
    ))
}

// Abre (ou reaproveita) a conversa entre o comprador e o dono da loja
// de um produto do marketplace.
#[utoipa::path(
    post,
    path = "/api/communications/start-product-chat",
    tag = "Communications",
    request_body = StartProductChatPayload,
    responses((status = 200, body = ConversationDetail), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn start_product_chat(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<StartProductChatPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .marketplace_repo
        .get_product(payload.product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    let store = app_state
        .marketplace_repo
        .find_store(product.store_id)
        .await?
        .ok_or(AppError::NotFound("Store"))?;

    if store.owner_id == user.id {
        return Err(AppError::BadRequest(
            "You cannot start a chat about your own product.".into(),
        ));
    }

    let conversation = match app_state
        .chat_repo
        .find_product_conversation(product.id, user.id, store.owner_id)
        .await?
    {
        Some(existing) => existing,
        None => {
            let mut tx = app_state.db_pool.begin().await?;
            let conversation = app_state
                .chat_repo
                .insert_conversation(&mut *tx, &product.title, Some(product.id))
                .await?;
            app_state
                .chat_repo
                .add_participant(&mut *tx, conversation.id, user.id)
                .await?;
            app_state
                .chat_repo
                .add_participant(&mut *tx, conversation.id, store.owner_id)
                .await?;
            tx.commit().await?;
            conversation
        }
    };

    if let Some(content) = payload
        .initial_message
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        let message = app_state
            .chat_repo
            .insert_message(conversation.id, user.id, content)
            .await?;
        app_state.chat_hub.publish(ChatFrame {
            id: message.id,
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            created_at: message.created_at,
        });
    }

    Ok(Json(ConversationDetail {
        participants: vec![user.id, store.owner_id],
        conversation,
    }))
}

#[utoipa::path(
    post,
    path = "/api/communications/conversations/{id}/leave",
    tag = "Communications",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn leave_conversation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.chat_repo.leave_conversation(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Conversation"))
    }
}

// ---
// Mensagens
// ---

#[utoipa::path(
    get,
    path = "/api/communications/conversations/{id}/messages",
    tag = "Communications",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = [Message]), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.chat_repo.list_messages(id, user.id).await?;
    Ok(Json(messages))
}

// A mensagem gravada via REST também é difundida aos sockets da conversa.
#[utoipa::path(
    post,
    path = "/api/communications/conversations/{id}/messages",
    tag = "Communications",
    params(("id" = Uuid, Path)),
    request_body = MessagePayload,
    responses((status = 201, body = Message), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_message(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !app_state.chat_repo.is_participant(id, user.id).await? {
        return Err(AppError::NotFound("Conversation"));
    }

    let message = app_state
        .chat_repo
        .insert_message(id, user.id, &payload.content)
        .await?;
    app_state.chat_hub.publish(ChatFrame {
        id: message.id,
        conversation_id: message.conversation_id,
        sender_id: message.sender_id,
        content: message.content.clone(),
        created_at: message.created_at,
    });

    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    post,
    path = "/api/communications/conversations/{id}/read",
    tag = "Communications",
    params(("id" = Uuid, Path)),
    responses((status = 200, description = "Quantidade de mensagens marcadas"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.chat_repo.is_participant(id, user.id).await? {
        return Err(AppError::NotFound("Conversation"));
    }
    let updated = app_state.chat_repo.mark_read(id, user.id).await?;
    Ok(Json(json!({ "updated": updated })))
}
