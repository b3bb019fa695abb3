//! Core types for the generation client

/// Text produced by a single generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Generated text of the first candidate
    pub text: String,
    /// Token accounting reported by the API
    pub usage: UsageMetadata,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, usage: UsageMetadata) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
}

impl UsageMetadata {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_metadata_new() {
        let usage = UsageMetadata::new(100, 50);
        assert_eq!(usage.input_tokens, 100);
        assert_eq!(usage.output_tokens, 50);
    }

    #[test]
    fn test_usage_metadata_default_is_zero() {
        assert_eq!(UsageMetadata::default(), UsageMetadata::new(0, 0));
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        let usage = UsageMetadata::new(u32::MAX, u32::MAX);
        assert_eq!(usage.input_tokens, u32::MAX);
        assert_eq!(usage.output_tokens, u32::MAX);
    }

    #[test]
    fn test_generation_result_new() {
        let result = GenerationResult::new("done", UsageMetadata::new(3, 1));
        assert_eq!(result.text, "done");
        assert_eq!(result.usage, UsageMetadata::new(3, 1));
    }
}
