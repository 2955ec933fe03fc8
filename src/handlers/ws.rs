// src/handlers/ws.rs

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::accounts::User,
    models::communications::{ChatFrame, InboundChatFrame},
};

// O handshake de WebSocket não carrega header Authorization nos
// navegadores, então o token de acesso vem na query string (?token=).
#[derive(Debug, Deserialize)]
pub struct WsAuth {
    pub token: String,
}

// GET /ws/conversations/{id}?token=...
pub async fn conversation_socket(
    State(app_state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Query(auth): Query<WsAuth>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let claims = app_state.auth_service.decode_token(&auth.token)?;
    if claims.token_type != "access" {
        return Err(AppError::InvalidToken);
    }
    let user = app_state
        .accounts_repo
        .find_by_id(claims.sub)
        .await?
        .ok_or(AppError::InvalidToken)?;

    if !app_state
        .chat_repo
        .is_participant(conversation_id, user.id)
        .await?
    {
        return Err(AppError::NotFound("Conversation"));
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(app_state, socket, conversation_id, user)))
}

async fn handle_socket(
    app_state: AppState,
    socket: WebSocket,
    conversation_id: Uuid,
    user: User,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut broadcast_rx = app_state.chat_hub.subscribe(conversation_id);

    tracing::debug!(conversation_id = %conversation_id, user_id = %user.id, "Socket conectado");

    // Difusão -> socket
    let mut send_task = tokio::spawn(async move {
        while let Ok(frame) = broadcast_rx.recv().await {
            let Ok(text) = serde_json::to_string(&frame) else {
                continue;
            };
            if sender.send(WsMessage::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Socket -> banco + difusão
    let recv_state = app_state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            let WsMessage::Text(text) = message else {
                continue;
            };
            let Ok(inbound) = serde_json::from_str::<InboundChatFrame>(&text) else {
                tracing::debug!("Quadro inválido ignorado");
                continue;
            };
            if inbound.content.trim().is_empty() {
                continue;
            }

            match recv_state
                .chat_repo
                .insert_message(conversation_id, user.id, &inbound.content)
                .await
            {
                Ok(message) => {
                    recv_state.chat_hub.publish(ChatFrame {
                        id: message.id,
                        conversation_id: message.conversation_id,
                        sender_id: message.sender_id,
                        content: message.content,
                        created_at: message.created_at,
                    });
                }
                Err(error) => {
                    tracing::error!(%error, "Falha ao gravar mensagem do socket");
                    break;
                }
            }
        }
    });

    // Encerra o par quando qualquer lado cai.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    app_state.chat_hub.prune(conversation_id);
    tracing::debug!(conversation_id = %conversation_id, "Socket encerrado");
}
