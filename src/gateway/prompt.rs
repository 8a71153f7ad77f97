//! Prompt and response-schema construction for the two gateway operations.
//!
//! Nothing here is validated beyond building the strings; all semantic
//! judgment (scoring, correctness) is delegated to the model behind the
//! gateway.

use serde_json::{Value, json};

use crate::session::task::Difficulty;

pub const DEFAULT_TOPIC: &str = "General Deep Learning concepts (PyTorch or TensorFlow)";

pub const GENERATION_SYSTEM_INSTRUCTION: &str = "You are an expert Deep Learning Tutor. \
    You generate clean, best-practice Python code (PyTorch/Keras). \
    You speak Korean for descriptions.";

/// Instruction for generating a fresh clone-coding exercise.
pub fn generation_prompt(difficulty: Difficulty, topic: Option<&str>) -> String {
    let topic = topic.filter(|t| !t.trim().is_empty()).unwrap_or(DEFAULT_TOPIC);
    format!(
        "Create a Deep Learning coding exercise for a student.\n\
         Difficulty Level: {difficulty}\n\
         Topic Focus: {topic}\n\
         \n\
         The code should be a self-contained snippet (e.g., a model definition, \
         a training loop, a data loader, or a specific layer implementation).\n\
         It should be roughly 15-40 lines of code.\n\
         \n\
         CRITICAL INSTRUCTIONS FOR CONTENT:\n\
         1. \"title\": Provide a title in Korean.\n\
         2. \"description\": Provide a description in Korean.\n\
         3. \"explanation\": Provide a VERY SHORT and CONCISE concept summary in Korean (maximum 1 sentence).\n\
         4. \"code\": Python code. Standard English comments are fine, or Korean if appropriate.\n\
         \n\
         Return the response in JSON format.",
        difficulty = difficulty.as_str(),
    )
}

/// Schema for the generation reply: five required fields, with `language`
/// pinned to the single value "python".
pub fn generation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "code": { "type": "STRING", "description": "The Python code snippet to clone." },
            "explanation": { "type": "STRING", "description": "Very short explanation in Korean." },
            "language": { "type": "STRING", "enum": ["python"] }
        },
        "required": ["title", "description", "code", "explanation", "language"]
    })
}

/// Instruction for scoring a retyped submission against its reference.
pub fn evaluation_prompt(original: &str, candidate: &str) -> String {
    format!(
        "Compare the User's Code against the Original Reference Code.\n\
         \n\
         Original Code:\n\
         ```python\n\
         {original}\n\
         ```\n\
         \n\
         User's Code:\n\
         ```python\n\
         {candidate}\n\
         ```\n\
         \n\
         Goal: The user is practicing \"Clone Coding\" (typing exactly or functionally identical code).\n\
         1. Check for typos that break syntax.\n\
         2. Check for missing lines.\n\
         3. Ignore whitespace differences or comments unless they matter.\n\
         4. Provide a score from 0 to 100 based on accuracy.\n\
         5. Provide specific feedback in Korean.\n\
         6. Provide suggestions in Korean.",
    )
}

/// Schema for the evaluation reply: score, correctness flag, feedback text,
/// and an ordered list of suggestions.
pub fn evaluation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "isCorrect": { "type": "BOOLEAN" },
            "feedback": { "type": "STRING" },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["score", "isCorrect", "feedback", "suggestions"]
    })
}
