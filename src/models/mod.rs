pub mod category;
pub mod loaders;
pub mod question;

pub use category::{Category, CategoryMap, QuizCategory, QUIZ_ANY_CATEGORY};
pub use loaders::{load_question_bank, load_question_bank_or_empty, QuestionBank};
pub use question::{CreateQuestionInput, NewQuestion, Question, QuizOutcome, QuizQuestion};
