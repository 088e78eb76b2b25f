pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod prompt;

pub use extract::extract_array;
pub use normalize::{normalize_to_five, normalize_with_policy, ShortListPolicy};
pub use pipeline::{task_list_from_output, TaskListGenerator};
pub use prompt::{build_prompt, GenerationRequest};
