//! Hand-authored mentions for running the pipeline without live API calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::types::{Engagement, Mention, Platform, Urgency};
use super::MentionSource;
use crate::analysis::{EnrichedMention, Sentiment, Verdict};
use crate::error::Result;

/// 2025-07-13T00:00:00Z
const BASE_TS: i64 = 1_752_364_800;

fn at_minute(minute: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_TS + minute * 60, 0).unwrap_or_default()
}

struct Fixture {
    id: &'static str,
    text: &'static str,
    minute: i64,
    author_id: &'static str,
    username: &'static str,
    followers: u64,
    is_verified: bool,
    urgency: Option<Urgency>,
    attributes: &'static [(&'static str, &'static str)],
    sentiment: Sentiment,
    is_lead: bool,
    action: &'static str,
}

impl Fixture {
    fn build(&self, platform: Platform) -> Mention {
        let attributes: BTreeMap<String, String> = self
            .attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Mention {
            id: self.id.to_string(),
            text: self.text.to_string(),
            created_at: at_minute(self.minute),
            author_id: self.author_id.to_string(),
            author_username: Some(self.username.to_string()),
            platform,
            engagement: Some(Engagement {
                followers: self.followers,
                is_verified: self.is_verified,
                support_urgency: self.urgency,
                attributes,
            }),
            precomputed: Some(Verdict::new(self.sentiment, self.is_lead, self.action)),
        }
    }
}

static TWITTER: [Fixture; 3] = [
    Fixture {
        id: "1944001000000000001",
        text: "Hey @HackathonCrmT, what's the pricing for your enterprise plan? We're comparing you with two other CRMs.",
        minute: 42,
        author_id: "987654321",
        username: "potential_customer",
        followers: 1_840,
        is_verified: false,
        urgency: None,
        attributes: &[],
        sentiment: Sentiment::Neutral,
        is_lead: true,
        action: "Create lead in CRM and reply with pricing/demo info.",
    },
    Fixture {
        id: "1944001000000000002",
        text: "@HackathonCrmT the sync has been down for two hours and our whole sales team is blocked. Please help!",
        minute: 31,
        author_id: "667788990",
        username: "ops_lead_maria",
        followers: 12_300,
        is_verified: true,
        urgency: Some(Urgency::Critical),
        attributes: &[],
        sentiment: Sentiment::Negative,
        is_lead: false,
        action: "Escalate to support immediately and reply publicly with a status update.",
    },
    Fixture {
        id: "1944001000000000003",
        text: "Just want to say thanks to @HackathonCrmT for this awesome project! Keep up the great work. #dev",
        minute: 5,
        author_id: "112233445",
        username: "happy_developer",
        followers: 420,
        is_verified: false,
        urgency: None,
        attributes: &[],
        sentiment: Sentiment::Positive,
        is_lead: false,
        action: "Thank the user for their positive feedback.",
    },
];

static LINKEDIN: [Fixture; 3] = [
    Fixture {
        id: "urn:li:activity:7350000000000000001",
        text: "We're evaluating CRM platforms for a 400-seat rollout next quarter. Would love a demo of HackathonCrm's enterprise tier.",
        minute: 50,
        author_id: "li-5501",
        username: "daniel.okafor",
        followers: 8_900,
        is_verified: true,
        urgency: None,
        attributes: &[
            ("business_classification", "Enterprise"),
            ("job_title", "VP of Sales Operations"),
            ("company", "Northwind Logistics"),
            ("industry", "Logistics"),
        ],
        sentiment: Sentiment::Positive,
        is_lead: true,
        action: "Create lead in CRM and offer an executive demo.",
    },
    Fixture {
        id: "urn:li:activity:7350000000000000002",
        text: "Interesting write-up from the HackathonCrm team on social selling. Worth a read for anyone in B2B marketing.",
        minute: 22,
        author_id: "li-7712",
        username: "priya.raman",
        followers: 3_150,
        is_verified: false,
        urgency: None,
        attributes: &[
            ("business_classification", "Mid-Market"),
            ("job_title", "Marketing Director"),
            ("company", "Brightline Media"),
            ("industry", "Marketing"),
        ],
        sentiment: Sentiment::Positive,
        is_lead: false,
        action: "Thank them and invite them to connect.",
    },
    Fixture {
        id: "urn:li:activity:7350000000000000003",
        text: "Our team keeps hitting the API rate limit in HackathonCrm during month-end reporting. Anyone found a workaround?",
        minute: 9,
        author_id: "li-9034",
        username: "tomas.kral",
        followers: 640,
        is_verified: false,
        urgency: Some(Urgency::High),
        attributes: &[
            ("business_classification", "SMB"),
            ("job_title", "Data Engineer"),
            ("company", "Kral & Partners"),
            ("industry", "Finance"),
        ],
        sentiment: Sentiment::Negative,
        is_lead: false,
        action: "Reply with the rate limit documentation and offer a support call.",
    },
];

static INSTAGRAM: [Fixture; 3] = [
    Fixture {
        id: "ig-18000000000000001",
        text: "Obsessed with how @hackathoncrm keeps my brand deals organized 😍 are you open to creator partnerships?",
        minute: 47,
        author_id: "ig-3301",
        username: "studio.lumen",
        followers: 184_000,
        is_verified: true,
        urgency: None,
        attributes: &[
            ("influencer_tier", "Macro"),
            ("engagement_rate", "4.8%"),
            ("content_style", "Lifestyle"),
        ],
        sentiment: Sentiment::Positive,
        is_lead: true,
        action: "Create lead in CRM and propose a creator partnership.",
    },
    Fixture {
        id: "ig-18000000000000002",
        text: "New workspace setup tour is up! Spot the @hackathoncrm dashboard on the second monitor 👀",
        minute: 28,
        author_id: "ig-4410",
        username: "desk.diaries",
        followers: 23_500,
        is_verified: false,
        urgency: None,
        attributes: &[
            ("influencer_tier", "Micro"),
            ("engagement_rate", "6.1%"),
            ("content_style", "Workspace"),
        ],
        sentiment: Sentiment::Positive,
        is_lead: false,
        action: "Like and reshare the post to stories.",
    },
    Fixture {
        id: "ig-18000000000000003",
        text: "Posted from the @hackathoncrm booth at the design meetup tonight.",
        minute: 3,
        author_id: "ig-5520",
        username: "sam.sketches",
        followers: 2_100,
        is_verified: false,
        urgency: None,
        attributes: &[
            ("influencer_tier", "Nano"),
            ("engagement_rate", "3.2%"),
            ("content_style", "Illustration"),
        ],
        sentiment: Sentiment::Neutral,
        is_lead: false,
        action: "Monitor for further engagement.",
    },
];

static FACEBOOK: [Fixture; 3] = [
    Fixture {
        id: "fb-10150000000000001",
        text: "Our food bank is looking for a simple CRM to track volunteers. Does HackathonCrm offer nonprofit pricing?",
        minute: 55,
        author_id: "fb-2201",
        username: "Riverside Food Bank",
        followers: 5_600,
        is_verified: false,
        urgency: None,
        attributes: &[
            ("organization_type", "Nonprofit"),
            ("community_context", "local food security"),
            ("event_indicator", "volunteer drive"),
        ],
        sentiment: Sentiment::Positive,
        is_lead: true,
        action: "Create lead in CRM and share nonprofit pricing.",
    },
    Fixture {
        id: "fb-10150000000000002",
        text: "Thanks HackathonCrm for sponsoring the Saturday farmers market! Great turnout this week.",
        minute: 33,
        author_id: "fb-3307",
        username: "Oakdale Farmers Market",
        followers: 2_950,
        is_verified: false,
        urgency: None,
        attributes: &[
            ("organization_type", "Local Business"),
            ("community_context", "farmers market"),
            ("event_indicator", "Saturday market"),
        ],
        sentiment: Sentiment::Positive,
        is_lead: false,
        action: "Thank them and share photos from the event.",
    },
    Fixture {
        id: "fb-10150000000000003",
        text: "Posting in the small business group: has anyone here used HackathonCrm for a bakery?",
        minute: 14,
        author_id: "fb-4412",
        username: "Lena's Bakery",
        followers: 780,
        is_verified: false,
        urgency: None,
        attributes: &[
            ("organization_type", "Small Business"),
            ("community_context", "small business"),
            ("event_indicator", "group discussion"),
        ],
        sentiment: Sentiment::Neutral,
        is_lead: false,
        action: "Reply in the group with a short case study.",
    },
];

/// Fixture mentions for one platform, newest first.
pub fn mentions_for(platform: Platform) -> Vec<Mention> {
    let set: &[Fixture] = match platform {
        Platform::Twitter => &TWITTER,
        Platform::Linkedin => &LINKEDIN,
        Platform::Instagram => &INSTAGRAM,
        Platform::Facebook => &FACEBOOK,
    };
    set.iter().map(|f| f.build(platform)).collect()
}

/// Pre-analyzed batch served by the development mock endpoint.
pub fn sample_analyzed() -> Vec<EnrichedMention> {
    let rows = [
        (
            "1234567890123456789",
            "Hey @HackathonCrmT, this test application is amazing. How much does it cost? I'd like a demo.",
            10,
            "987654321",
            "potential_customer",
            Verdict::new(
                Sentiment::Positive,
                true,
                "Create lead in CRM and reply with pricing/demo info.",
            ),
        ),
        (
            "9988776655443322110",
            "Just want to say thanks to @HackathonCrmT for this awesome project! Keep up the great work. #dev",
            5,
            "112233445",
            "happy_developer",
            Verdict::new(
                Sentiment::Positive,
                false,
                "Thank the user for their positive feedback.",
            ),
        ),
        (
            "5555555555555555555",
            "My @HackathonCrmT app is broken after the last update, can someone help?",
            2,
            "667788990",
            "unhappy_user",
            Verdict::new(
                Sentiment::Negative,
                false,
                "Reply with a link to the support documentation or ask for more details.",
            ),
        ),
        (
            "4444444444444444444",
            "Just making a neutral comment about @HackathonCrmT, nothing special.",
            1,
            "333222111",
            "neutral_observer",
            Verdict::new(Sentiment::Neutral, false, "Monitor for further engagement."),
        ),
    ];

    rows.into_iter()
        .map(|(id, text, minute, author_id, username, verdict)| {
            let mention = Mention {
                id: id.to_string(),
                text: text.to_string(),
                created_at: at_minute(minute),
                author_id: author_id.to_string(),
                author_username: Some(username.to_string()),
                platform: Platform::Twitter,
                engagement: None,
                precomputed: None,
            };
            EnrichedMention::new(mention, verdict)
        })
        .collect()
}

/// Source that serves the fixture set for the requested platform. Never fails.
pub struct FixtureSource;

#[async_trait]
impl MentionSource for FixtureSource {
    async fn fetch(&self, platform: Platform) -> Result<Vec<Mention>> {
        Ok(mentions_for(platform))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
