use crate::constants::prompts;
use crate::models::domain::{Difficulty, QuestionType};

/// Inputs for one prompt. Rendering is a pure function of this struct: the
/// same parameters always produce byte-identical output.
#[derive(Debug, Clone)]
pub struct PromptParams<'a> {
    pub subject: &'a str,
    pub topics: &'a [String],
    pub difficulty: Difficulty,
    pub count: u8,
    pub question_type: QuestionType,
    pub additional_context: &'a str,
}

fn question_type_label(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultipleChoice => "multiple_choice",
        QuestionType::TrueFalse => "true_false",
        QuestionType::Essay => "essay",
    }
}

fn format_block(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultipleChoice => prompts::MULTIPLE_CHOICE_FORMAT,
        QuestionType::TrueFalse => prompts::TRUE_FALSE_FORMAT,
        QuestionType::Essay => prompts::ESSAY_FORMAT,
    }
}

/// Renders the generation instruction. A blank `additional_context` omits the
/// context section entirely rather than emitting an empty header.
pub fn build_prompt(params: &PromptParams<'_>) -> String {
    let difficulty = params.difficulty.as_str();
    let mut prompt = format!(
        "{role}\n\n\
         Generate {count} {difficulty} level {question_type} questions about {subject}, \
         specifically focusing on these topics: {topics}.\n",
        role = prompts::SYSTEM_ROLE,
        count = params.count,
        difficulty = difficulty,
        question_type = question_type_label(params.question_type),
        subject = params.subject,
        topics = params.topics.join(", "),
    );

    if !params.additional_context.trim().is_empty() {
        prompt.push_str(&format!(
            "\nAdditional context to consider while generating questions:\n{}\n",
            params.additional_context
        ));
    }

    prompt.push_str(&format!(
        "\nFor {} difficulty:\n{}\n\n{}\n\n{}\n",
        difficulty,
        prompts::DIFFICULTY_GUIDANCE,
        format_block(params.question_type),
        prompts::EDUCATIONAL_GUIDELINES,
    ));

    prompt.push_str(&format!(
        "\nProvide the output as a JSON array of question objects. Each question should be \
         challenging but fair for the {} difficulty level.\n",
        difficulty
    ));

    prompt
}
