//! Conversation thread bookkeeping.
//!
//! Threads are held in process memory, bucketed per user (or one shared
//! guest bucket). Each thread keeps a capped message list; sending a
//! message forwards a trailing context window to the completion client and
//! appends the reply. A failed send rolls the thread back and hands the
//! unsent text to the caller so the input can be restored.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::chat::client::{ChatCompletionClient, CompletionRequest};
use crate::content::normalize::safe_trim;
use crate::error::AppError;

/// Fixed greeting every new thread opens with.
pub const STARTER_ASSISTANT_MESSAGE: &str = "Halo, terima kasih sudah datang. Aku siap jadi ruang refleksi kamu. Mulai dari hal yang paling terasa hari ini ya.";

/// Title carried by threads before the first user message arrives.
pub const UNTITLED_THREAD: &str = "Percakapan baru";

/// Category assigned when the caller supplies none.
pub const DEFAULT_CATEGORY: &str = "general";

/// Most recent messages kept per thread.
const MESSAGE_CAP: usize = 100;
/// Trailing messages forwarded as completion context.
const CONTEXT_WINDOW: usize = 12;
/// Thread titles are cut to this many characters of the first user message.
const TITLE_MAX_CHARS: usize = 46;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// One conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationThread {
    pub id: String,
    pub title: String,
    pub category: String,
    pub updated_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

/// Bucket key: guest sessions share one bucket, authenticated users get
/// their own, keyed by the normalized user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadKey {
    Guest,
    User(String),
}

impl ThreadKey {
    /// Blank or absent ids fall back to the guest bucket.
    pub fn from_user_id(user_id: Option<&str>) -> Self {
        match user_id
            .map(|id| id.trim().to_lowercase())
            .filter(|id| !id.is_empty())
        {
            Some(id) => ThreadKey::User(id),
            None => ThreadKey::Guest,
        }
    }

    fn user_id(&self) -> Option<&str> {
        match self {
            ThreadKey::Guest => None,
            ThreadKey::User(id) => Some(id),
        }
    }
}

/// Derive a thread title from its first user message: whitespace collapsed,
/// truncated with an ellipsis.
pub fn title_from_message(text: &str) -> String {
    let compact = safe_trim(text);
    if compact.is_empty() {
        return UNTITLED_THREAD.to_string();
    }

    if compact.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = compact.chars().take(TITLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        compact
    }
}

/// A failed send: the upstream error plus the user's unsent text so the
/// caller can restore the input.
#[derive(Debug)]
pub struct SendFailure {
    pub draft: String,
    pub error: AppError,
}

pub struct SessionStore {
    client: Arc<dyn ChatCompletionClient>,
    threads: Mutex<HashMap<ThreadKey, Vec<ConversationThread>>>,
}

impl SessionStore {
    pub fn new(client: Arc<dyn ChatCompletionClient>) -> Self {
        Self {
            client,
            threads: Mutex::new(HashMap::new()),
        }
    }

    /// Threads in a bucket, most recently updated first.
    pub async fn list_threads(&self, key: &ThreadKey) -> Vec<ConversationThread> {
        let mut threads = self
            .threads
            .lock()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default();
        threads.sort_by_key(|thread| Reverse(thread.updated_at));
        threads
    }

    /// Open a new thread seeded with the starter assistant message.
    pub async fn open_thread(&self, key: &ThreadKey, category: &str) -> ConversationThread {
        let category = safe_trim(category);
        let thread = ConversationThread {
            id: format!("thread-{}", Uuid::new_v4()),
            title: UNTITLED_THREAD.to_string(),
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category
            },
            updated_at: Utc::now(),
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                text: STARTER_ASSISTANT_MESSAGE.to_string(),
            }],
        };

        self.threads
            .lock()
            .await
            .entry(key.clone())
            .or_default()
            .insert(0, thread.clone());
        thread
    }

    /// Append a user message, forward it with the trailing context window,
    /// and append the assistant reply. On upstream failure the thread is
    /// restored to its pre-send state.
    pub async fn send_message(
        &self,
        key: &ThreadKey,
        thread_id: &str,
        text: &str,
        share_anonymously: Option<bool>,
    ) -> Result<String, SendFailure> {
        // Stage the user message and capture what the upstream call needs,
        // without holding the lock across the network round trip.
        let (request, previous_title, previous_updated_at) = {
            let mut buckets = self.threads.lock().await;
            let Some(thread) = find_thread(&mut buckets, key, thread_id) else {
                return Err(SendFailure {
                    draft: text.to_string(),
                    error: AppError::NotFound("Thread not found".into()),
                });
            };

            let context: Vec<ChatMessage> = thread
                .messages
                .iter()
                .rev()
                .take(CONTEXT_WINDOW)
                .rev()
                .cloned()
                .collect();

            let previous_title = thread.title.clone();
            let previous_updated_at = thread.updated_at;

            let first_user_message =
                !thread.messages.iter().any(|m| m.role == ChatRole::User);
            thread.messages.push(ChatMessage {
                role: ChatRole::User,
                text: text.to_string(),
            });
            cap_messages(&mut thread.messages);
            if first_user_message {
                thread.title = title_from_message(text);
            }
            thread.updated_at = Utc::now();

            let request = CompletionRequest {
                message: text.to_string(),
                category: thread.category.clone(),
                conversation_history: context,
                user_id: key.user_id().map(str::to_string),
                share_anonymously,
            };
            (request, previous_title, previous_updated_at)
        };

        match self.client.complete(request).await {
            Ok(reply) => {
                let mut buckets = self.threads.lock().await;
                if let Some(thread) = find_thread(&mut buckets, key, thread_id) {
                    thread.messages.push(ChatMessage {
                        role: ChatRole::Assistant,
                        text: reply.clone(),
                    });
                    cap_messages(&mut thread.messages);
                    thread.updated_at = Utc::now();
                }
                Ok(reply)
            }
            Err(error) => {
                let mut buckets = self.threads.lock().await;
                if let Some(thread) = find_thread(&mut buckets, key, thread_id) {
                    if thread
                        .messages
                        .last()
                        .is_some_and(|m| m.role == ChatRole::User && m.text == text)
                    {
                        thread.messages.pop();
                    }
                    thread.title = previous_title;
                    thread.updated_at = previous_updated_at;
                }
                Err(SendFailure {
                    draft: text.to_string(),
                    error,
                })
            }
        }
    }
}

fn find_thread<'a>(
    buckets: &'a mut HashMap<ThreadKey, Vec<ConversationThread>>,
    key: &ThreadKey,
    thread_id: &str,
) -> Option<&'a mut ConversationThread> {
    buckets
        .get_mut(key)?
        .iter_mut()
        .find(|thread| thread.id == thread_id)
}

fn cap_messages(messages: &mut Vec<ChatMessage>) {
    if messages.len() > MESSAGE_CAP {
        let excess = messages.len() - MESSAGE_CAP;
        messages.drain(..excess);
    }
}
