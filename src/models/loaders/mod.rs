pub mod json_loader;

pub use json_loader::{load_questions, questions_to_json, save_questions};
