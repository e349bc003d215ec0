//! Text generator backed by an OpenAI-compatible chat completion API.
//!
//! The sequencer only needs "prompt in, one line out". [`ChatCompletionGenerator`]
//! sends the prompt as a single user message, takes the first line of the
//! first choice and falls back to a configured text when the provider
//! answers with nothing.
//!
//! ```no_run
//! use vasari_interface::TextGenerator;
//! use vasari_models::{ChatCompletionGenerator, GeneratorConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::builder()
//!     .api_key(Some("sk-example".to_string()))
//!     .build()?;
//! let generator = ChatCompletionGenerator::new(config)?;
//! let line = generator.generate("Write a one sentence greeting.").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;

pub use chat::{
    ChatCompletionGenerator, ChatCompletionRequest, ChatCompletionResponse, Choice,
    ChoiceMessage, GeneratorConfig, GeneratorConfigBuilder, Message, Usage, first_line_or,
};
