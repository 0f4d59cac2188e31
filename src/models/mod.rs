pub mod loaders;
pub mod question;

pub use loaders::{load_questions, save_questions};
pub use question::{Answer, Question};
