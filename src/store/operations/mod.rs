pub mod chats;
pub mod prompts;

pub use chats::{complete_chat, create_chat, list_chats};
pub use prompts::{create_prompt, get_prompt, list_prompts, update_prompt};
