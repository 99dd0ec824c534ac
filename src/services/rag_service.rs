use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{NewQuestion, NewTest, QuestionType, Topic},
        dto::{GenerateTestRequest, GeneratedTestResponse},
    },
    repositories::{SubjectRepository, TestRepository, TopicRepository},
    services::{
        analytics_service::AnalyticsService,
        generation::QuestionGenerator,
        prompt_builder::{build_prompt, PromptParams},
        response_parser::parse_questions,
    },
};

/// Generated tests default to a one hour time box.
const DEFAULT_DURATION_MINUTES: i32 = 60;

/// Topic for the question at `index`, cycling through `topic_ids` in order.
/// The model is never asked to label questions by topic; assignment is this
/// deterministic rotation instead.
pub fn round_robin_topic(index: usize, topic_ids: &[i32]) -> i32 {
    topic_ids[index % topic_ids.len()]
}

/// Stable reorder putting weak topics first. Relative order inside each group
/// is preserved.
pub fn reorder_weak_first(mut topics: Vec<Topic>, weak_ids: &HashSet<i32>) -> Vec<Topic> {
    topics.sort_by_key(|t| !weak_ids.contains(&t.id));
    topics
}

/// Orchestrates the generation pipeline: resolve inputs, render the prompt,
/// call the model, parse its output and persist the assembled test. Nothing is
/// written to storage until a full set of questions has been parsed.
pub struct RagService {
    subjects: Arc<dyn SubjectRepository>,
    topics: Arc<dyn TopicRepository>,
    tests: Arc<dyn TestRepository>,
    generator: Arc<dyn QuestionGenerator>,
    analytics: Arc<AnalyticsService>,
}

impl RagService {
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        topics: Arc<dyn TopicRepository>,
        tests: Arc<dyn TestRepository>,
        generator: Arc<dyn QuestionGenerator>,
        analytics: Arc<AnalyticsService>,
    ) -> Self {
        Self {
            subjects,
            topics,
            tests,
            generator,
            analytics,
        }
    }

    pub async fn generate_test(
        &self,
        user_id: i32,
        request: GenerateTestRequest,
    ) -> AppResult<GeneratedTestResponse> {
        let subject = self
            .subjects
            .find_by_id(request.subject_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject {}", request.subject_id)))?;

        // Unknown topic ids are dropped rather than rejected; only a request
        // where none resolve is an error. Resolved topics keep the request's
        // order, which drives both the prompt and round-robin assignment.
        let resolved = self.topics.find_by_ids(&request.topic_ids).await?;
        let mut topics: Vec<Topic> = request
            .topic_ids
            .iter()
            .filter_map(|id| resolved.iter().find(|t| t.id == *id).cloned())
            .collect();
        if topics.is_empty() {
            return Err(AppError::ValidationError("No valid topics found".to_string()));
        }

        let mut additional_context = String::new();
        if request.focus_on_weak_areas {
            let weak = self.analytics.weak_topics(user_id, None).await?;
            let weak_ids: HashSet<i32> = weak.iter().map(|w| w.topic_id).collect();

            let weak_names: Vec<&str> = topics
                .iter()
                .filter(|t| weak_ids.contains(&t.id))
                .map(|t| t.name.as_str())
                .collect();

            if !weak_names.is_empty() {
                additional_context = format!(
                    "The student has shown weakness in the following topics: {}. \
                     Please ensure the questions for these topics are particularly \
                     thorough and educational.",
                    weak_names.join(", ")
                );
                topics = reorder_weak_first(topics, &weak_ids);
            }
        }

        let topic_names: Vec<String> = topics.iter().map(|t| t.name.clone()).collect();
        let prompt = build_prompt(&PromptParams {
            subject: &subject.name,
            topics: &topic_names,
            difficulty: request.difficulty,
            count: request.question_count,
            question_type: QuestionType::MultipleChoice,
            additional_context: &additional_context,
        });

        let response_text = self.generator.generate(&prompt).await?;
        let parsed = parse_questions(&response_text)?;

        log::info!(
            "Parsed {} questions for new test \"{}\" (requested {})",
            parsed.len(),
            request.title,
            request.question_count
        );

        let topic_ids: Vec<i32> = topics.iter().map(|t| t.id).collect();
        let questions: Vec<NewQuestion> = parsed
            .into_iter()
            .enumerate()
            .map(|(index, q)| NewQuestion {
                topic_id: round_robin_topic(index, &topic_ids),
                content: q.content,
                question_type: QuestionType::MultipleChoice,
                options: q.options,
                correct_answer: q.correct_answer,
                explanation: q.explanation,
                difficulty: request.difficulty,
            })
            .collect();

        let new_test = NewTest {
            title: request.title,
            description: request.description,
            subject_id: Some(subject.id),
            difficulty: request.difficulty,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        };

        let (test, test_questions) = self
            .tests
            .create_test_with_questions(new_test, questions)
            .await?;

        Ok(GeneratedTestResponse {
            test,
            question_count: test_questions.len(),
        })
    }
}
