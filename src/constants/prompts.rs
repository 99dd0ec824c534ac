//! Static prompt fragments for the question-generation pipeline. Kept in one
//! place so the exact wording sent to the model is reviewable without digging
//! through the builder.

pub const SYSTEM_ROLE: &str = "You are an expert educational content creator specializing in creating high-quality assessment questions.";

pub const DIFFICULTY_GUIDANCE: &str = "\
- Easy: Basic recall and understanding of fundamental concepts.
- Medium: Application of concepts and analysis of information.
- Hard: Complex problem-solving, evaluation, and synthesis of information.";

pub const EDUCATIONAL_GUIDELINES: &str = "\
Educational guidelines:
1. Each question should be clear, unambiguous, and directly relevant to the topics.
2. Multiple-choice options should be plausible and not contain obvious incorrect answers.
3. Correct answers should be distributed evenly (if generating multiple questions).
4. Explanations should be thorough and educational, helping the student understand why an answer is correct.
5. Questions should progress from simpler to more complex concepts within each topic.";

pub const MULTIPLE_CHOICE_FORMAT: &str = r#"Format each question as follows:
{
  "content": "The question text",
  "options": ["Option A", "Option B", "Option C", "Option D"],
  "correctAnswer": "The correct option letter (e.g., A, B, C, or D)",
  "explanation": "Explanation of why this answer is correct"
}"#;

pub const TRUE_FALSE_FORMAT: &str = r#"Format each question as follows:
{
  "content": "The question text (which must be answerable with True or False)",
  "options": ["True", "False"],
  "correctAnswer": "True or False",
  "explanation": "Explanation of why this answer is correct"
}"#;

pub const ESSAY_FORMAT: &str = r#"Format each question as follows:
{
  "content": "The essay question text",
  "correctAnswer": "Key points that should be included in the answer",
  "explanation": "More detailed explanation of what constitutes a good answer"
}"#;
