use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::store::{
    error::{classify_prompt_write, Result, StoreError},
    types::{NewPrompt, PromptTemplate},
};

const SELECT_PROMPT: &str = "SELECT id, name, prompt_text, separator, model FROM prompts";

fn parse_prompt_row(row: &Row<'_>) -> rusqlite::Result<PromptTemplate> {
    Ok(PromptTemplate {
        id: row.get(0)?,
        name: row.get(1)?,
        prompt_text: row.get(2)?,
        separator: row.get(3)?,
        model: row.get(4)?,
    })
}

/// Insert a prompt and return it with its assigned id
///
/// # Errors
///
/// * `StoreError::DuplicateName` - If a prompt with the same name exists
/// * `StoreError::Database` - For any other SQL error
pub fn create_prompt(conn: &Connection, prompt: NewPrompt) -> Result<PromptTemplate> {
    conn.execute(
        "INSERT INTO prompts (name, prompt_text, separator, model) VALUES (?1, ?2, ?3, ?4)",
        params![prompt.name, prompt.prompt_text, prompt.separator, prompt.model],
    )
    .map_err(|e| classify_prompt_write(e, &prompt.name))?;

    let id = conn.last_insert_rowid();
    Ok(prompt.with_id(id))
}

/// All prompts, ordered by name
pub fn list_prompts(conn: &Connection) -> Result<Vec<PromptTemplate>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY name", SELECT_PROMPT))?;
    let prompts = stmt
        .query_map([], parse_prompt_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(prompts)
}

pub fn get_prompt(conn: &Connection, id: i64) -> Result<Option<PromptTemplate>> {
    let prompt = conn
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_PROMPT),
            params![id],
            parse_prompt_row,
        )
        .optional()?;
    Ok(prompt)
}

/// Overwrite every field of the prompt with `prompt.id`
///
/// # Errors
///
/// * `StoreError::DuplicateName` - If the new name belongs to another prompt
/// * `StoreError::NotFound` - If no prompt has this id
pub fn update_prompt(conn: &Connection, prompt: PromptTemplate) -> Result<PromptTemplate> {
    let updated = conn
        .execute(
            "UPDATE prompts SET name = ?1, prompt_text = ?2, separator = ?3, model = ?4 WHERE id = ?5",
            params![
                prompt.name,
                prompt.prompt_text,
                prompt.separator,
                prompt.model,
                prompt.id
            ],
        )
        .map_err(|e| classify_prompt_write(e, &prompt.name))?;

    if updated == 0 {
        return Err(StoreError::NotFound(format!("prompt {}", prompt.id)));
    }
    Ok(prompt)
}
