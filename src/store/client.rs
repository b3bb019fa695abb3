use rusqlite::Connection;

use crate::store::{
    connection::{build_memory_pool, DbPool, StoreConfig},
    error::{Result, StoreError},
    operations, schema,
    types::{ChatCompletion, ChatRecord, NewChat, NewPrompt, PromptTemplate},
};

/// Handle to the prompt and chat log database
///
/// Cloning is cheap; clones share one connection pool. Queries run on the
/// blocking thread pool so callers can await them from request handlers.
#[derive(Clone)]
pub struct ChatStore {
    pool: DbPool,
}

impl ChatStore {
    /// Open (creating if needed) the database described by `config`
    ///
    /// Creates missing tables, applies column migrations and backfills chat
    /// snapshots before returning.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gemini_tool::store::{ChatStore, StoreConfig};
    ///
    /// let store = ChatStore::open(&StoreConfig::new("./gemini-tool.db"))?;
    /// # Ok::<(), gemini_tool::store::StoreError>(())
    /// ```
    pub fn open(config: &StoreConfig) -> Result<Self> {
        Self::from_pool(config.build_pool()?)
    }

    /// Open a private in-memory database with the full schema
    pub fn in_memory() -> Result<Self> {
        Self::from_pool(build_memory_pool()?)
    }

    fn from_pool(pool: DbPool) -> Result<Self> {
        let conn = pool.get()?;
        schema::initialize(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Run `f` with a pooled connection on the blocking thread pool
    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&*conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// Insert a prompt; fails with `DuplicateName` if the name is taken
    pub async fn create_prompt(&self, prompt: NewPrompt) -> Result<PromptTemplate> {
        self.run(move |conn| operations::create_prompt(conn, prompt))
            .await
    }

    /// All prompts, ordered by name
    pub async fn list_prompts(&self) -> Result<Vec<PromptTemplate>> {
        self.run(operations::list_prompts).await
    }

    pub async fn get_prompt(&self, id: i64) -> Result<Option<PromptTemplate>> {
        self.run(move |conn| operations::get_prompt(conn, id)).await
    }

    /// Overwrite the prompt with `prompt.id`
    pub async fn update_prompt(&self, prompt: PromptTemplate) -> Result<PromptTemplate> {
        self.run(move |conn| operations::update_prompt(conn, prompt))
            .await
    }

    /// Persist a new in-flight chat record
    pub async fn create_chat(&self, chat: NewChat) -> Result<ChatRecord> {
        self.run(move |conn| operations::create_chat(conn, chat)).await
    }

    /// Record the outcome of a chat's generation call
    pub async fn complete_chat(&self, id: i64, completion: ChatCompletion) -> Result<()> {
        self.run(move |conn| operations::complete_chat(conn, id, &completion))
            .await
    }

    /// All chats, most recent first
    pub async fn list_chats(&self) -> Result<Vec<ChatRecord>> {
        self.run(operations::list_chats).await
    }

    /// Re-run the chat snapshot backfill; returns the number of rows touched
    pub async fn backfill_chat_snapshots(&self) -> Result<usize> {
        self.run(schema::backfill_chat_snapshots).await
    }
}
