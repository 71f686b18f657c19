use serde::Serialize;

use crate::mentions::Platform;

/// Presentation character for one platform's assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub avatar: &'static str,
    pub title: &'static str,
    pub personality: &'static str,
    pub expertise: &'static str,
    pub greeting: &'static str,
    pub communication_style: &'static str,
    pub specializations: &'static [&'static str],
    pub catchphrase: &'static str,
    pub background: &'static str,
}

/// Response templates for one platform. `{field}` placeholders are filled
/// from the annotation context.
#[derive(Debug)]
pub struct Patterns {
    pub lead: &'static str,
    pub urgent: Option<&'static str>,
    pub positive: Option<&'static str>,
    pub negative: Option<&'static str>,
    pub general: &'static str,
}

static TWITTER: Persona = Persona {
    name: "Echo",
    avatar: "🐦",
    title: "Real-Time Response Specialist",
    personality: "Fast, direct, and trend-aware",
    expertise: "Lightning-fast customer support, crisis management, and real-time engagement",
    greeting: "Hey there! I'm Echo, your Twitter guardian. I catch every mention in real-time and help you respond with perfect timing!",
    communication_style: "Brief, witty, and action-oriented",
    specializations: &[
        "Support ticket prioritization",
        "Crisis management and escalation",
        "Viral content detection",
        "Community sentiment monitoring",
        "Trending topic analysis",
    ],
    catchphrase: "Speed matters, and I've got your back! ⚡",
    background: "Born in the fast-paced world of Twitter, Echo has mastered the art of real-time communication. With lightning reflexes and a keen sense for what's trending, Echo ensures no mention goes unnoticed and every response hits the mark.",
};

static LINKEDIN: Persona = Persona {
    name: "Sterling",
    avatar: "👔",
    title: "B2B Lead Intelligence Expert",
    personality: "Professional, strategic, and business-savvy",
    expertise: "Executive outreach, enterprise sales, and professional networking intelligence",
    greeting: "Good day! I'm Sterling, your LinkedIn business intelligence specialist. I identify high-value prospects and strategic opportunities in the professional sphere.",
    communication_style: "Formal, insightful, and relationship-focused",
    specializations: &[
        "Enterprise lead qualification",
        "Executive influence mapping",
        "Industry trend analysis",
        "Professional networking optimization",
        "Business partnership identification",
    ],
    catchphrase: "Building bridges to business success! 🤝",
    background: "With an MBA in digital networking and years of experience in B2B sales, Sterling has an uncanny ability to spot decision-makers and identify lucrative business opportunities within professional conversations.",
};

static INSTAGRAM: Persona = Persona {
    name: "Vibe",
    avatar: "📸",
    title: "Brand Partnership & Influence Curator",
    personality: "Creative, trendy, and aesthetically minded",
    expertise: "Influencer collaboration, brand partnerships, and visual content strategy",
    greeting: "Hey beautiful! I'm Vibe, your Instagram influence whisperer. I spot the next big collaborations and help you ride the wave of visual storytelling!",
    communication_style: "Energetic, visual, and trend-conscious",
    specializations: &[
        "Influencer tier assessment",
        "Brand partnership valuation",
        "Visual content trend analysis",
        "Engagement rate optimization",
        "Creator collaboration opportunities",
    ],
    catchphrase: "Let's make it picture perfect! ✨",
    background: "A former fashion photographer turned digital strategist, Vibe has an eye for spotting the next big thing. With deep connections in the creator economy, Vibe knows how to turn followers into brand advocates.",
};

static FACEBOOK: Persona = Persona {
    name: "Harmony",
    avatar: "🤝",
    title: "Community Engagement Orchestrator",
    personality: "Warm, inclusive, and community-focused",
    expertise: "Community building, local business support, and grassroots engagement",
    greeting: "Hello friend! I'm Harmony, your Facebook community builder. I help you connect with local communities and build meaningful relationships that last!",
    communication_style: "Warm, inclusive, and community-oriented",
    specializations: &[
        "Local business outreach",
        "Community group management",
        "Nonprofit engagement strategies",
        "Event promotion and coordination",
        "Multi-generational communication",
    ],
    catchphrase: "Bringing people together, one post at a time! 🌟",
    background: "A community organizer at heart, Harmony has spent years building bridges between businesses and local communities. With a talent for bringing diverse groups together, Harmony turns social interactions into lasting relationships.",
};

static TWITTER_PATTERNS: Patterns = Patterns {
    lead: "💡 Echo spotted a hot lead! {username} is showing strong buying signals. Strike while the iron's hot!",
    urgent: Some("🚨 URGENT: Echo here! This needs immediate attention - {issue}. Recommended action: {action}"),
    positive: Some("🎉 Echo loves the positive vibes from {username}! Perfect opportunity to amplify this happiness."),
    negative: Some("⚠️ CRISIS MODE: Echo detecting negative sentiment spike. Deploying damage control protocols..."),
    general: "Echo's analysis: {sentiment} sentiment detected. Response priority: {priority}. Let's keep the conversation flowing!",
};

static LINKEDIN_PATTERNS: Patterns = Patterns {
    lead: "🎯 Sterling here with executive intelligence: {username} appears to be a {business_classification} decision-maker. High-value opportunity detected.",
    urgent: None,
    positive: None,
    negative: None,
    general: "Sterling's professional assessment: {sentiment} sentiment from a {business_classification} prospect. Recommended approach: {action}",
};

static INSTAGRAM_PATTERNS: Patterns = Patterns {
    lead: "✨ Vibe here! Just spotted a {influencer_tier} influencer! {username} has serious collaboration potential with {engagement_rate} engagement!",
    urgent: None,
    positive: None,
    negative: None,
    general: "Vibe's take: {sentiment} energy from {username}. Their {influencer_tier} status makes them worth watching! 📈",
};

static FACEBOOK_PATTERNS: Patterns = Patterns {
    lead: "🏠 Harmony here! Detected a wonderful community connection opportunity with {username}. They're passionate about {community_context}!",
    urgent: None,
    positive: None,
    negative: None,
    general: "Harmony's community wisdom: {sentiment} sentiment from {organization_type}. Let's nurture this {community_context} connection! 🤗",
};

pub fn persona(platform: Platform) -> &'static Persona {
    match platform {
        Platform::Twitter => &TWITTER,
        Platform::Linkedin => &LINKEDIN,
        Platform::Instagram => &INSTAGRAM,
        Platform::Facebook => &FACEBOOK,
    }
}

pub fn patterns(platform: Platform) -> &'static Patterns {
    match platform {
        Platform::Twitter => &TWITTER_PATTERNS,
        Platform::Linkedin => &LINKEDIN_PATTERNS,
        Platform::Instagram => &INSTAGRAM_PATTERNS,
        Platform::Facebook => &FACEBOOK_PATTERNS,
    }
}
