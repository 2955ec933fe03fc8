// src/services/assistant.rs

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AiRepository,
    models::ai::{ChatPayload, ChatResponse, ChatTurn},
};

const MODEL: &str = "llama3-8b-8192";
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 700;
// Quantas interações antigas entram como memória e quantas mensagens
// do histórico do cliente são mantidas.
const MEMORY_LOGS: i64 = 5;
const HISTORY_LIMIT: usize = 6;

const SYSTEM_PROMPT: &str = "You are an agricultural assistant for farmers. \
Answer practically and concisely, using the context provided about the \
user's farm when it is relevant. If you are unsure, say so.";

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionUsage {
    #[serde(default)]
    total_tokens: i32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    usage: Option<CompletionUsage>,
}

// Proxy fino sobre a API OpenAI-compatível da Groq. A chave nunca
// chega ao frontend; cada turno vira um AiLog.
#[derive(Clone)]
pub struct AssistantService {
    http: reqwest::Client,
    ai_repo: AiRepository,
    api_key: String,
    base_url: String,
}

// Monta a lista de mensagens do turno: sistema, memória das últimas
// interações, histórico reenviado pelo cliente, contexto extra e o prompt.
pub fn build_messages(
    memory: &[(String, String)],
    history: &[ChatTurn],
    context: Option<&str>,
    prompt: &str,
) -> Vec<serde_json::Value> {
    let mut messages = vec![json!({ "role": "system", "content": SYSTEM_PROMPT })];

    // Memória vem do banco em ordem decrescente; invertemos para a cronológica.
    for (question, answer) in memory.iter().rev() {
        messages.push(json!({ "role": "user", "content": question }));
        messages.push(json!({ "role": "assistant", "content": answer }));
    }

    let start = history.len().saturating_sub(HISTORY_LIMIT);
    for turn in &history[start..] {
        messages.push(json!({ "role": &turn.role, "content": &turn.content }));
    }

    if let Some(context) = context {
        messages.push(json!({
            "role": "system",
            "content": format!("Additional context from the user's app: {context}"),
        }));
    }

    messages.push(json!({ "role": "user", "content": prompt }));
    messages
}

impl AssistantService {
    pub fn new(ai_repo: AiRepository, api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            ai_repo,
            api_key,
            base_url,
        }
    }

    pub async fn chat(
        &self,
        user_id: Uuid,
        payload: &ChatPayload,
    ) -> Result<ChatResponse, AppError> {
        let context_type = payload.context_type.as_deref().unwrap_or("general");
        let context_id = payload.context_id.as_deref().unwrap_or("");

        let memory: Vec<(String, String)> = self
            .ai_repo
            .recent_logs(user_id, context_type, MEMORY_LOGS)
            .await?
            .into_iter()
            .map(|log| (log.prompt, log.response))
            .collect();

        let messages = build_messages(
            &memory,
            &payload.history,
            payload.context.as_deref(),
            &payload.prompt,
        );

        let body = json!({
            "model": MODEL,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AiUpstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::AiUpstream(format!("{status}: {detail}")));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiUpstream(e.to_string()))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::AiUpstream("empty completion".into()))?;
        let tokens_used = completion.usage.map(|u| u.total_tokens).unwrap_or(0);

        let log = self
            .ai_repo
            .insert_log(
                user_id,
                context_type,
                context_id,
                &payload.prompt,
                &reply,
                MODEL,
                tokens_used,
            )
            .await?;

        Ok(ChatResponse {
            reply,
            log_id: log.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> ChatTurn {
        ChatTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn messages_start_with_system_and_end_with_prompt() {
        let messages = build_messages(&[], &[], None, "Quando plantar milho?");
        assert_eq!(messages[0]["role"], "system");
        let last = messages.last().unwrap();
        assert_eq!(last["role"], "user");
        assert_eq!(last["content"], "Quando plantar milho?");
    }

    #[test]
    fn memory_is_replayed_in_chronological_order() {
        // A memória chega na ordem do banco (mais recente primeiro).
        let memory = vec![
            ("pergunta 2".to_string(), "resposta 2".to_string()),
            ("pergunta 1".to_string(), "resposta 1".to_string()),
        ];
        let messages = build_messages(&memory, &[], None, "pergunta 3");
        assert_eq!(messages[1]["content"], "pergunta 1");
        assert_eq!(messages[2]["content"], "resposta 1");
        assert_eq!(messages[3]["content"], "pergunta 2");
    }

    #[test]
    fn history_is_truncated_to_the_limit() {
        let history: Vec<ChatTurn> = (0..10)
            .map(|i| turn(if i % 2 == 0 { "user" } else { "assistant" }, &format!("m{i}")))
            .collect();
        let messages = build_messages(&[], &history, None, "fim");
        // sistema + 6 do histórico + prompt
        assert_eq!(messages.len(), 1 + HISTORY_LIMIT + 1);
        assert_eq!(messages[1]["content"], "m4");
    }

    #[test]
    fn context_is_injected_before_the_prompt() {
        let messages = build_messages(&[], &[], Some("farm: Sítio Boa Vista"), "pergunta");
        let context = &messages[messages.len() - 2];
        assert_eq!(context["role"], "system");
        assert!(context["content"]
            .as_str()
            .unwrap()
            .contains("Sítio Boa Vista"));
    }
}
