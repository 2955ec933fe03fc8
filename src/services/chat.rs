// src/services/chat.rs

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::communications::ChatFrame;

const CHANNEL_CAPACITY: usize = 128;

// Registro em memória de canais de broadcast, um por conversa.
// Cada socket conectado assina o canal da sua conversa; quem publica
// é o handler de WebSocket depois de persistir a mensagem.
#[derive(Clone, Default)]
pub struct ChatHub {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<ChatFrame>>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, conversation_id: Uuid) -> broadcast::Receiver<ChatFrame> {
        let mut channels = self.channels.lock().expect("chat hub lock poisoned");
        channels
            .entry(conversation_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub fn publish(&self, frame: ChatFrame) {
        let sender = {
            let channels = self.channels.lock().expect("chat hub lock poisoned");
            channels.get(&frame.conversation_id).cloned()
        };
        if let Some(sender) = sender {
            // Sem assinantes não é erro; a mensagem já está no banco.
            let _ = sender.send(frame);
        }
    }

    // Canal sem assinantes vivos pode ser removido quando o último sai.
    pub fn prune(&self, conversation_id: Uuid) {
        let mut channels = self.channels.lock().expect("chat hub lock poisoned");
        if let Some(sender) = channels.get(&conversation_id) {
            if sender.receiver_count() == 0 {
                channels.remove(&conversation_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn frame(conversation_id: Uuid, content: &str) -> ChatFrame {
        ChatFrame {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_frames() {
        let hub = ChatHub::new();
        let conversation = Uuid::new_v4();
        let mut rx = hub.subscribe(conversation);

        hub.publish(frame(conversation, "olá"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.content, "olá");
        assert_eq!(received.conversation_id, conversation);
    }

    #[tokio::test]
    async fn frames_do_not_cross_conversations() {
        let hub = ChatHub::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut rx_a = hub.subscribe(a);
        let _rx_b = hub.subscribe(b);

        hub.publish(frame(b, "só para b"));
        hub.publish(frame(a, "só para a"));

        let received = rx_a.recv().await.unwrap();
        assert_eq!(received.content, "só para a");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let hub = ChatHub::new();
        // Não deve entrar em pânico nem bloquear.
        hub.publish(frame(Uuid::new_v4(), "ninguém ouvindo"));
    }

    #[tokio::test]
    async fn prune_removes_empty_channels() {
        let hub = ChatHub::new();
        let conversation = Uuid::new_v4();
        let rx = hub.subscribe(conversation);
        drop(rx);
        hub.prune(conversation);
        assert!(hub.channels.lock().unwrap().is_empty());
    }
}
