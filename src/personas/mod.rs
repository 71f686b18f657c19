//! Per-platform assistant personas and the template annotator that flavors
//! analysis output with them. Everything here is static data plus pure
//! functions; nothing can fail.

pub mod table;

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::analysis::{Sentiment, Verdict};
use crate::mentions::{Mention, Platform, Urgency};

pub use table::Persona;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PersonaLookup {
    pub platform: Platform,
    pub persona: &'static Persona,
    /// `true` when the key was unrecognized and the default persona was used.
    pub is_default: bool,
}

/// Exact-match lookup; unknown keys get the twitter persona.
pub fn get_persona(key: &str) -> PersonaLookup {
    let (platform, is_default) = Platform::resolve(key);
    PersonaLookup {
        platform,
        persona: table::persona(platform),
        is_default,
    }
}

/// Persona block attached to an analyzed mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaAnnotation {
    pub persona_insight: String,
    pub persona_name: &'static str,
    pub persona_avatar: &'static str,
}

/// Verdict flags that drive template selection, plus the values available to
/// `{field}` placeholders.
#[derive(Debug, Clone)]
pub struct AnnotationContext {
    pub is_lead: bool,
    pub sentiment: Sentiment,
    pub support_urgency: Option<Urgency>,
    fields: BTreeMap<String, String>,
}

impl AnnotationContext {
    pub fn new(verdict: &Verdict) -> Self {
        let mut ctx = Self {
            is_lead: verdict.is_lead,
            sentiment: verdict.sentiment,
            support_urgency: None,
            fields: BTreeMap::new(),
        };
        ctx.set("sentiment", verdict.sentiment.label());
        ctx.set("is_lead", verdict.is_lead.to_string());
        ctx.set("suggested_action", verdict.suggested_action.as_str());
        ctx.set("action", verdict.suggested_action.as_str());
        ctx.set("priority", priority(verdict));
        ctx
    }

    pub fn from_mention(mention: &Mention, verdict: &Verdict) -> Self {
        let mut ctx = Self::new(verdict);
        ctx.set("username", mention.handle());
        ctx.set("issue", mention.text.as_str());

        if let Some(engagement) = &mention.engagement {
            ctx.set("followers", engagement.followers.to_string());
            ctx.set("is_verified", engagement.is_verified.to_string());
            for (key, value) in &engagement.attributes {
                ctx.set(key, value.as_str());
            }
            if let Some(urgency) = engagement.support_urgency {
                ctx = ctx.with_urgency(urgency);
            }
        }
        ctx
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.support_urgency = Some(urgency);
        self.set("support_urgency", urgency.as_str());
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    fn lookup(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => "unknown",
        }
    }
}

fn priority(verdict: &Verdict) -> &'static str {
    if verdict.is_lead || verdict.sentiment == Sentiment::Negative {
        "High"
    } else if verdict.sentiment == Sentiment::Positive {
        "Medium"
    } else {
        "Low"
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex"))
}

/// Picks the template for `platform` and fills its placeholders.
///
/// Precedence: lead template, then urgency template (High/Critical), then
/// sentiment template, then the general one. Unknown platforms use the
/// twitter templates, and missing or empty fields render as `unknown`.
pub fn annotate(platform: &str, ctx: &AnnotationContext) -> String {
    let (platform, _) = Platform::resolve(platform);
    let patterns = table::patterns(platform);

    let sentiment_template = match ctx.sentiment {
        Sentiment::Positive => patterns.positive,
        Sentiment::Negative => patterns.negative,
        Sentiment::Neutral => None,
    };

    let template = if ctx.is_lead {
        patterns.lead
    } else if ctx.support_urgency.is_some_and(|u| u.is_pressing()) {
        patterns.urgent.unwrap_or(patterns.general)
    } else if let Some(template) = sentiment_template {
        template
    } else {
        patterns.general
    };

    placeholder_re()
        .replace_all(template, |caps: &Captures| ctx.lookup(&caps[1]).to_string())
        .into_owned()
}

/// Annotation for one analyzed mention, using the persona of `platform`.
pub fn annotate_mention(platform: &str, mention: &Mention, verdict: &Verdict) -> PersonaAnnotation {
    let lookup = get_persona(platform);
    let ctx = AnnotationContext::from_mention(mention, verdict);
    PersonaAnnotation {
        persona_insight: annotate(platform, &ctx),
        persona_name: lookup.persona.name,
        persona_avatar: lookup.persona.avatar,
    }
}
