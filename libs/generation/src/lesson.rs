use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    bullet_list, pipeline::run_generation, GenerationError, LanguageModel,
    Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonSuggestionsRequest {
    pub title: String,
    pub subject: String,
    pub grade: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonSuggestionsResponse {
    pub improvements: Vec<String>,
    pub additional_activities: Vec<String>,
    pub resources: Vec<String>,
    pub assessment_ideas: Vec<String>,
    pub next_lesson_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonImprovementsRequest {
    pub lesson_plan: LessonPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonPlan {
    pub title: String,
    pub subject: String,
    pub grade: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub assessment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonImprovementsResponse {
    pub overall_rating: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub objective_alignment: Vec<String>,
    pub activity_enhancements: Vec<String>,
    pub differentiation_strategies: Vec<String>,
    pub assessment_suggestions: Vec<String>,
    pub resource_recommendations: Vec<String>,
    pub time_management: String,
    pub engagement_tips: Vec<String>,
    pub cultural_relevance: Vec<String>,
    pub technology_integration: Vec<String>,
    pub extension_activities: Vec<String>,
    pub next_steps: Vec<String>,
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "- (none listed)".to_string()
    } else {
        bullet_list(items)
    }
}

pub fn suggestions_prompt(request: &LessonSuggestionsRequest) -> Prompt {
    format!(
        r#"You are a mentor teacher reviewing a lesson plan for an Indian classroom.
Lesson: {title}
Subject: {subject}
Grade: {grade}
Objectives:
{objectives}
Planned activities:
{activities}

Suggest practical, low-cost ways to improve this lesson. Respond ONLY with JSON in exactly this shape:
{{
  "improvements": ["improvement"],
  "additionalActivities": ["activity"],
  "resources": ["resource"],
  "assessmentIdeas": ["assessment idea"],
  "nextLessonTopics": ["topic"]
}}"#,
        title = request.title,
        subject = request.subject,
        grade = request.grade,
        objectives = or_none(&request.objectives),
        activities = or_none(&request.activities),
    )
    .into()
}

pub fn suggestions_fallback(_raw: &str) -> LessonSuggestionsResponse {
    LessonSuggestionsResponse {
        improvements: vec![
            "State the learning objective at the start of the lesson".to_string(),
            "Add a short recap at the end".to_string(),
            "Include examples from students' daily lives".to_string(),
        ],
        additional_activities: vec![
            "Think-pair-share discussion".to_string(),
            "Group activity with locally available materials".to_string(),
        ],
        resources: vec![
            "NCERT textbook chapter".to_string(),
            "DIKSHA e-content".to_string(),
            "Blackboard diagrams".to_string(),
        ],
        assessment_ideas: vec![
            "Exit ticket with one question".to_string(),
            "Quick oral quiz".to_string(),
        ],
        next_lesson_topics: vec![
            "Review of key concepts".to_string(),
            "Real-world applications".to_string(),
        ],
    }
}

pub fn improvements_prompt(request: &LessonImprovementsRequest) -> Prompt {
    let plan = &request.lesson_plan;
    format!(
        r#"You are an expert curriculum coach. Review this lesson plan in detail.
Title: {title}
Subject: {subject}
Grade: {grade}
Duration: {duration}
Objectives:
{objectives}
Activities:
{activities}
Resources:
{resources}
Assessment: {assessment}

Respond ONLY with JSON in exactly this shape:
{{
  "overallRating": "Excellent | Good | Needs Improvement",
  "strengths": ["..."],
  "improvements": ["..."],
  "objectiveAlignment": ["..."],
  "activityEnhancements": ["..."],
  "differentiationStrategies": ["..."],
  "assessmentSuggestions": ["..."],
  "resourceRecommendations": ["..."],
  "timeManagement": "How to split the {duration} lesson",
  "engagementTips": ["..."],
  "culturalRelevance": ["..."],
  "technologyIntegration": ["..."],
  "extensionActivities": ["..."],
  "nextSteps": ["..."]
}}"#,
        title = plan.title,
        subject = plan.subject,
        grade = plan.grade,
        duration = if plan.duration.trim().is_empty() {
            "unspecified"
        } else {
            plan.duration.as_str()
        },
        objectives = or_none(&plan.objectives),
        activities = or_none(&plan.activities),
        resources = or_none(&plan.resources),
        assessment = if plan.assessment.trim().is_empty() {
            "none listed"
        } else {
            plan.assessment.as_str()
        },
    )
    .into()
}

pub fn improvements_fallback(_raw: &str) -> LessonImprovementsResponse {
    let list = |items: &[&str]| {
        items.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    };

    LessonImprovementsResponse {
        overall_rating: "Good".to_string(),
        strengths: list(&["Clear lesson structure", "Relevant topic for the grade"]),
        improvements: list(&[
            "Make objectives measurable",
            "Add more student participation",
        ]),
        objective_alignment: list(&["Link each activity to one objective"]),
        activity_enhancements: list(&[
            "Add a hands-on activity",
            "Use group work for practice",
        ]),
        differentiation_strategies: list(&[
            "Provide simpler tasks for students who need support",
            "Offer challenge questions for advanced learners",
        ]),
        assessment_suggestions: list(&["Use exit tickets", "Add a short quiz"]),
        resource_recommendations: list(&[
            "NCERT textbook",
            "Locally available teaching materials",
        ]),
        time_management: "Spend about 10% on introduction, 60% on activities, 20% on practice and 10% on review".to_string(),
        engagement_tips: list(&["Start with a question or story", "Use real-life examples"]),
        cultural_relevance: list(&["Use local festivals, foods and places as examples"]),
        technology_integration: list(&["Show a short educational video if a device is available"]),
        extension_activities: list(&["Home project connected to the topic"]),
        next_steps: list(&["Revise the plan and try it with the class"]),
    }
}

pub async fn generate_lesson_suggestions<M: LanguageModel>(
    model: &M,
    request: &LessonSuggestionsRequest,
) -> Result<Value, GenerationError> {
    let result = run_generation(
        model,
        Operation::GenerateLessonSuggestions,
        suggestions_prompt(request),
        suggestions_fallback,
    )
    .await?;

    Ok(result.into_inner())
}

pub async fn generate_lesson_improvements<M: LanguageModel>(
    model: &M,
    request: &LessonImprovementsRequest,
) -> Result<Value, GenerationError> {
    let result = run_generation(
        model,
        Operation::GenerateLessonImprovements,
        improvements_prompt(request),
        improvements_fallback,
    )
    .await?;

    Ok(result.into_inner())
}
