use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator used when a prompt is created without one
pub const DEFAULT_SEPARATOR: &str = "---";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// A stored, reusable prompt template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Row id; zero means "not assigned" in request bodies
    #[serde(default)]
    pub id: i64,

    /// Unique display name
    pub name: String,

    /// Instruction text placed before the user's input
    pub prompt_text: String,

    /// Literal text inserted between the template and the user's input
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Model identifier the template targets
    pub model: String,
}

impl PromptTemplate {
    /// Build the text sent to the model: template, separator, then input,
    /// each on its own line.
    pub fn combine(&self, user_input: &str) -> String {
        format!("{}\n{}\n{}", self.prompt_text, self.separator, user_input)
    }
}

/// Prompt data for inserting a new template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPrompt {
    pub name: String,
    pub prompt_text: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    pub model: String,
}

impl NewPrompt {
    /// Create a new prompt with the default separator
    pub fn new(
        name: impl Into<String>,
        prompt_text: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt_text: prompt_text.into(),
            separator: default_separator(),
            model: model.into(),
        }
    }

    /// Set the separator (builder pattern)
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Attach the id assigned by the store
    pub fn with_id(self, id: i64) -> PromptTemplate {
        PromptTemplate {
            id,
            name: self.name,
            prompt_text: self.prompt_text,
            separator: self.separator,
            model: self.model,
        }
    }
}

/// A logged generation request and, once finished, its outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: i64,
    pub prompt_id: Option<i64>,
    pub user_input: String,
    pub model_output: Option<String>,
    pub request_timestamp: DateTime<Utc>,
    pub response_timestamp: Option<DateTime<Utc>>,
    pub time_taken_ms: Option<i64>,
    pub input_token_count: Option<i64>,
    pub output_token_count: Option<i64>,
    pub error_message: Option<String>,

    /// Prompt name at request time
    pub prompt_name: Option<String>,

    /// Model actually used, after any per-request override
    pub model_used: Option<String>,
}

/// Where a chat record is in its two-write lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    /// Initial write done, completion not yet recorded
    InFlight,
    Completed,
    Failed,
}

impl ChatRecord {
    pub fn status(&self) -> ChatStatus {
        if self.error_message.is_some() {
            ChatStatus::Failed
        } else if self.model_output.is_some() && self.response_timestamp.is_some() {
            ChatStatus::Completed
        } else {
            ChatStatus::InFlight
        }
    }

    /// Copy the completion fields onto this record
    pub fn apply_completion(&mut self, completion: &ChatCompletion) {
        self.response_timestamp = Some(completion.response_timestamp);
        self.time_taken_ms = Some(completion.time_taken_ms);
        match &completion.outcome {
            ChatOutcome::Completed {
                output,
                input_tokens,
                output_tokens,
            } => {
                self.model_output = Some(output.clone());
                self.input_token_count = Some(*input_tokens);
                self.output_token_count = Some(*output_tokens);
                self.error_message = None;
            }
            ChatOutcome::Failed { error } => {
                self.model_output = None;
                self.input_token_count = None;
                self.output_token_count = None;
                self.error_message = Some(error.clone());
            }
        }
    }
}

/// Fields persisted by the initial chat write
#[derive(Debug, Clone)]
pub struct NewChat {
    pub prompt_id: Option<i64>,
    pub user_input: String,
    pub request_timestamp: DateTime<Utc>,
    pub prompt_name: Option<String>,
    pub model_used: Option<String>,
}

impl NewChat {
    /// Start a chat against a stored prompt, snapshotting its name and the
    /// model that will be called.
    pub fn for_prompt(
        prompt: &PromptTemplate,
        user_input: impl Into<String>,
        model_used: impl Into<String>,
        request_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            prompt_id: Some(prompt.id),
            user_input: user_input.into(),
            request_timestamp,
            prompt_name: Some(prompt.name.clone()),
            model_used: Some(model_used.into()),
        }
    }
}

/// Result of the generation call for a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Completed {
        output: String,
        input_tokens: i64,
        output_tokens: i64,
    },
    Failed {
        error: String,
    },
}

/// Fields persisted by the completion write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub response_timestamp: DateTime<Utc>,
    pub time_taken_ms: i64,
    pub outcome: ChatOutcome,
}

impl ChatCompletion {
    pub fn new(outcome: ChatOutcome, response_timestamp: DateTime<Utc>, elapsed: Duration) -> Self {
        Self {
            response_timestamp,
            time_taken_ms: i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            outcome,
        }
    }

    pub(crate) fn model_output(&self) -> Option<&str> {
        match &self.outcome {
            ChatOutcome::Completed { output, .. } => Some(output),
            ChatOutcome::Failed { .. } => None,
        }
    }

    pub(crate) fn token_counts(&self) -> (Option<i64>, Option<i64>) {
        match &self.outcome {
            ChatOutcome::Completed {
                input_tokens,
                output_tokens,
                ..
            } => (Some(*input_tokens), Some(*output_tokens)),
            ChatOutcome::Failed { .. } => (None, None),
        }
    }

    pub(crate) fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ChatOutcome::Completed { .. } => None,
            ChatOutcome::Failed { error } => Some(error),
        }
    }
}
