use rusqlite::{params, Connection, Row};

use crate::store::{
    error::{Result, StoreError},
    types::{ChatCompletion, ChatRecord, NewChat},
};

/// Parse a `chats` row selected in the column order used by `list_chats`
pub(crate) fn parse_chat_row(row: &Row<'_>) -> rusqlite::Result<ChatRecord> {
    Ok(ChatRecord {
        id: row.get(0)?,
        prompt_id: row.get(1)?,
        user_input: row.get(2)?,
        model_output: row.get(3)?,
        request_timestamp: row.get(4)?,
        response_timestamp: row.get(5)?,
        time_taken_ms: row.get(6)?,
        input_token_count: row.get(7)?,
        output_token_count: row.get(8)?,
        error_message: row.get(9)?,
        prompt_name: row.get(10)?,
        model_used: row.get(11)?,
    })
}

/// Initial chat write: persists the request and returns the in-flight record
pub fn create_chat(conn: &Connection, chat: NewChat) -> Result<ChatRecord> {
    conn.execute(
        "INSERT INTO chats (prompt_id, user_input, request_timestamp, prompt_name, model_used)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            chat.prompt_id,
            chat.user_input,
            chat.request_timestamp,
            chat.prompt_name,
            chat.model_used
        ],
    )?;

    Ok(ChatRecord {
        id: conn.last_insert_rowid(),
        prompt_id: chat.prompt_id,
        user_input: chat.user_input,
        model_output: None,
        request_timestamp: chat.request_timestamp,
        response_timestamp: None,
        time_taken_ms: None,
        input_token_count: None,
        output_token_count: None,
        error_message: None,
        prompt_name: chat.prompt_name,
        model_used: chat.model_used,
    })
}

/// Completion write: records the outcome of the generation call
pub fn complete_chat(conn: &Connection, id: i64, completion: &ChatCompletion) -> Result<()> {
    let (input_tokens, output_tokens) = completion.token_counts();
    let updated = conn.execute(
        "UPDATE chats SET
            model_output = ?1, response_timestamp = ?2, time_taken_ms = ?3,
            input_token_count = ?4, output_token_count = ?5, error_message = ?6
         WHERE id = ?7",
        params![
            completion.model_output(),
            completion.response_timestamp,
            completion.time_taken_ms,
            input_tokens,
            output_tokens,
            completion.error_message(),
            id
        ],
    )?;

    if updated == 0 {
        return Err(StoreError::NotFound(format!("chat {}", id)));
    }
    Ok(())
}

/// All chats, most recent request first
pub fn list_chats(conn: &Connection) -> Result<Vec<ChatRecord>> {
    let mut stmt = conn.prepare(
        "SELECT
            id, prompt_id, user_input, model_output, request_timestamp,
            response_timestamp, time_taken_ms, input_token_count, output_token_count,
            error_message, prompt_name, model_used
         FROM chats ORDER BY request_timestamp DESC, id DESC",
    )?;
    let chats = stmt
        .query_map([], parse_chat_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(chats)
}
