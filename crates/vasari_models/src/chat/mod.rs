//! OpenAI-compatible chat completion generator.

mod client;
mod config;
mod dto;

pub use client::{ChatCompletionGenerator, first_line_or};
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use dto::{ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, Message, Usage};
