//! Taskdraft: AI-assisted task-list drafting
//!
//! Turns a goal, its end users and its constraints into exactly five
//! user-story/engineering-task pairs using an OpenAI-compatible
//! chat-completion provider. Model output is extracted, validated and
//! normalized before it reaches the caller.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod provider;
pub mod task;
pub mod types;
