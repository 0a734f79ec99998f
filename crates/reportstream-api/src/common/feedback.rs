//! User feedback payloads.
//!
//! Feedback arrives in one of two shapes that carry no explicit tag. Bodies
//! are matched against the variants in a fixed order:
//!
//! 1. [`AnswerFeedback`], which requires `llm_answer` (alias `answerText`),
//! 2. [`ReportFeedback`], which requires `report_id` and `report_title`.
//!
//! The first variant that matches wins, so a body carrying both an answer and
//! report fields is treated as answer feedback. Once parsed, the variant is
//! explicit in [`FeedbackRecord`].

use serde::{Deserialize, Serialize};

/// Feedback on a generated answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub query: String,
    #[serde(alias = "isRelevant")]
    pub is_relevant: bool,
    #[serde(alias = "llmAnswer", alias = "answer_text", alias = "answerText")]
    pub llm_answer: String,
}

/// Feedback on a single referenced report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFeedback {
    pub query: String,
    #[serde(alias = "isRelevant")]
    pub is_relevant: bool,
    #[serde(alias = "reportId")]
    pub report_id: String,
    #[serde(alias = "reportTitle")]
    pub report_title: String,
}

/// A feedback submission, in variant-match order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackRecord {
    Answer(AnswerFeedback),
    Report(ReportFeedback),
}

/// Discriminant of a [`FeedbackRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Answer,
    Report,
}

impl FeedbackKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::Report => "report",
        }
    }
}

impl FeedbackRecord {
    #[must_use]
    pub const fn kind(&self) -> FeedbackKind {
        match self {
            Self::Answer(_) => FeedbackKind::Answer,
            Self::Report(_) => FeedbackKind::Report,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Answer(feedback) => &feedback.query,
            Self::Report(feedback) => &feedback.query,
        }
    }

    #[must_use]
    pub const fn is_relevant(&self) -> bool {
        match self {
            Self::Answer(feedback) => feedback.is_relevant,
            Self::Report(feedback) => feedback.is_relevant,
        }
    }

    /// Builds the acknowledgment returned to the client for this submission.
    #[must_use]
    pub fn acknowledge(self) -> FeedbackAck {
        match self {
            Self::Answer(feedback) => FeedbackAck::Answer {
                message: FeedbackAck::ANSWER_MESSAGE.to_string(),
                query: feedback.query,
                is_relevant: feedback.is_relevant,
                llm_answer: feedback.llm_answer,
            },
            Self::Report(feedback) => FeedbackAck::Report {
                message: FeedbackAck::REPORT_MESSAGE.to_string(),
                query: feedback.query,
                is_relevant: feedback.is_relevant,
                report_id: feedback.report_id,
                report_title: feedback.report_title,
            },
        }
    }
}

/// Acknowledgment echoed back for an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackAck {
    Answer {
        message: String,
        query: String,
        is_relevant: bool,
        llm_answer: String,
    },
    Report {
        message: String,
        query: String,
        is_relevant: bool,
        report_id: String,
        report_title: String,
    },
}

impl FeedbackAck {
    pub const ANSWER_MESSAGE: &'static str = "LLM answer feedback received";
    pub const REPORT_MESSAGE: &'static str = "Single report feedback received";
}
