//! Prompt Templates
//!
//! Deterministic prompt text for the two assistant actions. Every prompt
//! embeds all five derived metrics.

use agent_core::Message;

use crate::model::DerivedMetrics;

/// System role for narrative summaries
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful financial assistant named Echelor.";

/// System role for free-form questions
pub const QUESTION_SYSTEM_PROMPT: &str =
    "You are a helpful financial analyst named Echelor who answers questions clearly and concisely.";

const SUMMARY_PREAMBLE: &str = "You are Echelor, a friendly CFO assistant. Based on the following financial data, \
write a brief summary of the company's financial health in plain, encouraging language.";

const SUMMARY_CLOSING: &str = "Highlight trends or concerns and suggest next steps.";

const QUESTION_PREAMBLE: &str = "The company has the following financial metrics:";

/// Which assistant action a prompt is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Summary,
    Question,
}

impl PromptKind {
    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptKind::Summary => SUMMARY_SYSTEM_PROMPT,
            PromptKind::Question => QUESTION_SYSTEM_PROMPT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Summary => "summary",
            PromptKind::Question => "question",
        }
    }
}

/// The metrics block shared by both prompts
pub fn metrics_context(metrics: &DerivedMetrics) -> String {
    format!(
        "- Cash on hand: ${}\n\
         - Monthly revenue: ${}\n\
         - Monthly expenses: ${}\n\
         - Burn rate: ${}\n\
         - Runway: {} months",
        metrics.cash, metrics.revenue, metrics.expenses, metrics.burn_rate, metrics.runway
    )
}

pub fn summary_prompt(metrics: &DerivedMetrics) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        SUMMARY_PREAMBLE,
        metrics_context(metrics),
        SUMMARY_CLOSING
    )
}

/// `question` is embedded verbatim; validation happens in the gateway.
pub fn question_prompt(metrics: &DerivedMetrics, question: &str) -> String {
    format!(
        "{}\n{}\n\nUser question: {}",
        QUESTION_PREAMBLE,
        metrics_context(metrics),
        question
    )
}

/// System + user messages for a summary request
pub fn summary_messages(metrics: &DerivedMetrics) -> Vec<Message> {
    vec![
        Message::system(PromptKind::Summary.system_prompt()),
        Message::user(summary_prompt(metrics)),
    ]
}

/// System + user messages for a question
pub fn question_messages(metrics: &DerivedMetrics, question: &str) -> Vec<Message> {
    vec![
        Message::system(PromptKind::Question.system_prompt()),
        Message::user(question_prompt(metrics, question)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Runway;
    use agent_core::Role;
    use rust_decimal_macros::dec;

    fn metrics() -> DerivedMetrics {
        DerivedMetrics {
            cash: dec!(120000),
            revenue: dec!(27000),
            expenses: dec!(35000),
            burn_rate: dec!(8000),
            runway: Runway::Months(dec!(15.0)),
        }
    }

    #[test]
    fn test_metrics_context() {
        assert_eq!(
            metrics_context(&metrics()),
            "- Cash on hand: $120000\n\
             - Monthly revenue: $27000\n\
             - Monthly expenses: $35000\n\
             - Burn rate: $8000\n\
             - Runway: 15.0 months"
        );
    }

    #[test]
    fn test_not_applicable_runway_in_context() {
        let mut m = metrics();
        m.revenue = dec!(40000);
        m.burn_rate = dec!(-5000);
        m.runway = Runway::NotApplicable;
        let context = metrics_context(&m);
        assert!(context.contains("- Burn rate: $-5000"));
        assert!(context.ends_with("- Runway: N/A months"));
    }

    #[test]
    fn test_summary_prompt() {
        let prompt = summary_prompt(&metrics());
        assert!(prompt.starts_with("You are Echelor, a friendly CFO assistant."));
        assert!(prompt.contains("plain, encouraging language"));
        assert!(prompt.contains("- Runway: 15.0 months"));
        assert!(prompt.ends_with("suggest next steps."));
    }

    #[test]
    fn test_question_prompt_embeds_question() {
        let prompt = question_prompt(&metrics(), "What if revenue drops 15% next month?");
        assert!(prompt.starts_with("The company has the following financial metrics:\n- Cash on hand"));
        assert!(prompt.ends_with("\n\nUser question: What if revenue drops 15% next month?"));
    }

    #[test]
    fn test_message_roles() {
        let messages = question_messages(&metrics(), "Are we ok?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, QUESTION_SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);

        let messages = summary_messages(&metrics());
        assert_eq!(messages[0].content, SUMMARY_SYSTEM_PROMPT);
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(summary_prompt(&metrics()), summary_prompt(&metrics()));
        assert_eq!(question_prompt(&metrics(), "q"), question_prompt(&metrics(), "q"));
    }
}
