//! Deterministic keyword classifier. Works without any model credentials and
//! always gives the same answer for the same text.

use async_trait::async_trait;
use tracing::info;

use super::sentiment::Sentiment;
use super::types::Verdict;
use super::{Classifier, ReplyRequest};
use crate::error::Result;

const LEAD_KEYWORDS: &[&str] = &[
    "pricing",
    "price",
    "cost",
    "how much",
    "demo",
    "trial",
    "quote",
    "interested",
    "enterprise",
    "compared",
    "alternative",
    "switch",
];

const SUPPORT_KEYWORDS: &[&str] = &[
    "help", "support", "problem", "broken", "bug", "issue", "error", "crash",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "love",
    "awesome",
    "amazing",
    "great",
    "thanks",
    "thank you",
    "recommend",
    "excellent",
    "fantastic",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "hate",
    "broken",
    "terrible",
    "worst",
    "disappointed",
    "bug",
    "crash",
    "problem",
    "awful",
    "useless",
];

pub struct RuleClassifier;

fn count_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

impl RuleClassifier {
    pub fn verdict_for(text: &str) -> Verdict {
        let lower = text.to_lowercase();

        let positive = count_hits(&lower, POSITIVE_KEYWORDS);
        let negative = count_hits(&lower, NEGATIVE_KEYWORDS);
        let sentiment = match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        };

        let is_lead = contains_any(&lower, LEAD_KEYWORDS);

        let suggested_action = if is_lead {
            "Create lead in CRM and reply with pricing/demo info."
        } else if contains_any(&lower, SUPPORT_KEYWORDS) {
            "Reply with a link to the support documentation or ask for more details."
        } else if sentiment == Sentiment::Positive {
            "Thank the user for their positive feedback."
        } else if sentiment == Sentiment::Negative {
            "Acknowledge the concern publicly and follow up in DMs."
        } else {
            "Monitor for further engagement."
        };

        Verdict::new(sentiment, is_lead, suggested_action)
    }

    pub fn reply_for(request: &ReplyRequest<'_>) -> String {
        let text = request.text.to_lowercase();
        let author = request.author.trim_start_matches('@');

        if request.is_lead && contains_any(&text, &["help", "support", "problem"]) {
            format!(
                "Hi @{author}! I'm sorry to hear you're having trouble. Let me connect you with our support team who can help resolve this quickly. Please DM us your order details and we'll get this sorted out! 🛠️"
            )
        } else if request.is_lead && contains_any(&text, &["pricing", "demo", "interested"]) {
            format!(
                "Thanks for your interest @{author}! I'd love to show you what our software can do. Would you like to schedule a quick 15-minute demo? Feel free to DM me your availability! 📅"
            )
        } else if request.sentiment == Sentiment::Positive
            && contains_any(&text, &["love", "awesome", "amazing"])
        {
            format!(
                "Thank you so much @{author}! 🙏 We're thrilled you're enjoying our product. Your feedback means the world to us. Mind sharing your experience with others who might benefit?"
            )
        } else if request.sentiment == Sentiment::Positive && text.contains("recommend") {
            format!(
                "@{author} Thank you for the recommendation! 🌟 It's customers like you who make what we do so rewarding. We really appreciate you spreading the word!"
            )
        } else {
            format!(
                "Hi @{author}! Thanks for reaching out. We're here to help - please let us know if you have any questions or if there's anything we can assist you with! 😊"
            )
        }
    }
}

#[async_trait]
impl Classifier for RuleClassifier {
    async fn classify(&self, text: &str, _author: &str) -> Result<Verdict> {
        Ok(Self::verdict_for(text))
    }

    async fn generate_reply(&self, request: &ReplyRequest<'_>) -> Result<String> {
        let reply = Self::reply_for(request);
        info!("Generated reply for @{}: {}", request.author, reply);
        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str, author: &str, sentiment: Sentiment, is_lead: bool) -> String {
        RuleClassifier::reply_for(&ReplyRequest {
            text,
            author,
            sentiment,
            is_lead,
            suggested_action: "",
        })
    }

    #[tokio::test]
    async fn pricing_question_is_a_lead_and_gets_sales_reply() {
        let text = "What's the pricing for your enterprise plan?";
        let verdict = RuleClassifier.classify(text, "buyer1").await.unwrap();
        assert!(verdict.is_lead);

        let out = RuleClassifier
            .generate_reply(&ReplyRequest {
                text,
                author: "buyer1",
                sentiment: verdict.sentiment,
                is_lead: verdict.is_lead,
                suggested_action: &verdict.suggested_action,
            })
            .await
            .unwrap();
        assert!(out.contains("@buyer1"));
        assert!(out.contains("15-minute demo"));
    }

    #[test]
    fn support_request_is_not_a_lead() {
        let v = RuleClassifier::verdict_for("My app is broken after the last update, can someone help?");
        assert!(!v.is_lead);
        assert_eq!(v.sentiment, Sentiment::Negative);
        assert!(v.suggested_action.contains("support documentation"));
    }

    #[test]
    fn praise_is_positive_and_not_a_lead() {
        let v = RuleClassifier::verdict_for("Just want to say thanks for this awesome project!");
        assert_eq!(v.sentiment, Sentiment::Positive);
        assert!(!v.is_lead);
    }

    #[test]
    fn generic_comment_is_neutral() {
        let v = RuleClassifier::verdict_for("Just making a comment, nothing special.");
        assert_eq!(v.sentiment, Sentiment::Neutral);
        assert!(!v.is_lead);
        assert_eq!(v.suggested_action, "Monitor for further engagement.");
    }

    #[test]
    fn lead_with_trouble_gets_support_reply() {
        let out = reply("Interested, but I have a problem with setup", "dev", Sentiment::Neutral, true);
        assert!(out.starts_with("Hi @dev! I'm sorry"));
    }

    #[test]
    fn gratitude_branches() {
        let love = reply("I love this tool", "fan", Sentiment::Positive, false);
        assert!(love.starts_with("Thank you so much @fan!"));

        let rec = reply("I recommend it to everyone", "fan", Sentiment::Positive, false);
        assert!(rec.starts_with("@fan Thank you for the recommendation!"));
    }

    #[test]
    fn sales_keywords_without_lead_flag_fall_through() {
        let out = reply("pricing?", "@someone", Sentiment::Neutral, false);
        assert!(out.starts_with("Hi @someone! Thanks for reaching out."));
    }
}
