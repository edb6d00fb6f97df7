//! Intent routing: exact-match canned replies, else the Gemini fallback.

use crate::api::ApiClient;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Arc;

pub const PRICE_QUERY: &str = "What is the current Ethereum price?";
pub const TX_STATUS_QUERY: &str = "Check transaction status";
pub const INVESTMENT_QUERY: &str = "Do you provide investment suggestions?";
pub const INVESTMENT_REPLY: &str =
    "Yes, we analyze market trends and provide AI-driven investment insights.";

/// Async lookup invoked with the user's text
pub type FetchFn = Arc<dyn Fn(String) -> BoxFuture<'static, String> + Send + Sync>;

/// What a canned query answers with
#[derive(Clone)]
pub enum Reply {
    Static(String),
    Fetch(FetchFn),
}

impl Reply {
    pub fn fetch<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = String> + Send + 'static,
    {
        Reply::Fetch(Arc::new(move |input| f(input).boxed()))
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Reply::Fetch(_) => f.write_str("Fetch(..)"),
        }
    }
}

/// Exact trigger phrase to reply. Matching is case and whitespace sensitive.
#[derive(Debug, Clone, Default)]
pub struct ResponseTable {
    entries: HashMap<String, Reply>,
}

impl ResponseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assistant's built-in queries, backed by `client`
    pub fn standard(client: &ApiClient) -> Self {
        let price_client = client.clone();
        let tx_client = client.clone();

        Self::new()
            .with(
                PRICE_QUERY,
                Reply::fetch(move |_| {
                    let client = price_client.clone();
                    async move { client.eth_price().await }
                }),
            )
            // The matched text itself is passed on as the hash.
            .with(
                TX_STATUS_QUERY,
                Reply::fetch(move |input| {
                    let client = tx_client.clone();
                    async move { client.transaction_status(&input).await }
                }),
            )
            .with(INVESTMENT_QUERY, Reply::Static(INVESTMENT_REPLY.to_string()))
    }

    pub fn with(mut self, query: impl Into<String>, reply: Reply) -> Self {
        self.entries.insert(query.into(), reply);
        self
    }

    pub fn get(&self, query: &str) -> Option<&Reply> {
        self.entries.get(query)
    }

    /// Trigger phrases, sorted for display
    pub fn queries(&self) -> Vec<&str> {
        let mut queries: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        queries.sort_unstable();
        queries
    }
}

/// Picks the source that answers a user message
#[derive(Clone)]
pub struct Router {
    table: Arc<ResponseTable>,
    fallback: FetchFn,
}

impl Router {
    pub fn new(table: ResponseTable, fallback: FetchFn) -> Self {
        Self {
            table: Arc::new(table),
            fallback,
        }
    }

    /// Standard table with Gemini as the fallback
    pub fn standard(client: &ApiClient) -> Self {
        let gemini = client.clone();
        let fallback: FetchFn = Arc::new(move |input: String| {
            let client = gemini.clone();
            async move { client.generate(&input).await }.boxed()
        });
        Self::new(ResponseTable::standard(client), fallback)
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Answer `user_input`. Never fails; fetchers degrade to fixed sentences.
    pub async fn route(&self, user_input: &str) -> String {
        match self.table.get(user_input) {
            Some(Reply::Static(text)) => {
                tracing::debug!(query = user_input, "canned reply");
                text.clone()
            }
            Some(Reply::Fetch(fetch)) => {
                tracing::debug!(query = user_input, "canned lookup");
                fetch(user_input.to_string()).await
            }
            None => {
                tracing::debug!("no canned match, asking the fallback");
                (self.fallback)(user_input.to_string()).await
            }
        }
    }
}
