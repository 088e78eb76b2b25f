//! Integration tests for task-list drafting

mod api_facade;
mod cli_binary;
mod generation_pipeline;
mod task_entity;
mod test_utils;
