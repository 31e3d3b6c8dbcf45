use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Pricing data
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub monthly_cost: f64,
}

impl Expense {
    pub fn new(category: &str, monthly_cost: f64) -> Self {
        Expense {
            id: Uuid::new_v4().to_string(),
            category: category.to_string(),
            monthly_cost,
        }
    }
}

pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 12] = [
    "Housing",
    "Food",
    "Transport",
    "Health",
    "Internet",
    "Software",
    "AI Tooling",
    "Equipment",
    "Subscriptions",
    "Professional",
    "Leisure",
    "Misc",
];

pub fn default_expenses() -> Vec<Expense> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|c| Expense::new(c, 0.0))
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeSettings {
    pub tax_rate: f64,
    pub emergency_buffer: f64,
    pub reinvestment: f64,
    pub weeks_per_year: f64,
    pub days_per_week: f64,
    pub hours_per_day: f64,
}

impl Default for IncomeSettings {
    fn default() -> Self {
        IncomeSettings {
            tax_rate: 30.0,
            emergency_buffer: 20.0,
            reinvestment: 10.0,
            weeks_per_year: 48.0,
            days_per_week: 3.0,
            hours_per_day: 4.0,
        }
    }
}

/// "base" is the break-even foundation rate, "recommended" adds the fixed
/// 25% profit margin on top of it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateTier {
    Base,
    #[default]
    Recommended,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    #[default]
    Mid,
    Senior,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTerms {
    #[default]
    Standard,
    ExtraRevisions,
    Rush,
    RushRevisions,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    Wholesale,
    #[default]
    Retail,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UsageRights {
    Organic,
    PaidAd,
    Exclusive,
}

/// Per-platform audience metrics. The engagement rate is derived from these
/// fields and stored back onto the creator record in the same update, so the
/// stored value is always consistent with its inputs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "primaryPlatform")]
pub enum PlatformStats {
    #[serde(rename = "YouTube", rename_all = "camelCase")]
    YouTube {
        #[serde(default)]
        subscribers: u64,
        #[serde(default)]
        avg_views: u64,
        #[serde(default)]
        avg_watch_time_percent: f64,
    },
    #[serde(rename = "Instagram")]
    Instagram {
        #[serde(rename = "instagramFollowers", default)]
        followers: u64,
        #[serde(rename = "instagramAvgLikes", default)]
        avg_likes: u64,
        #[serde(rename = "instagramAvgComments", default)]
        avg_comments: u64,
    },
    #[serde(rename = "TikTok")]
    TikTok {
        #[serde(rename = "tiktokFollowers", default)]
        followers: u64,
        #[serde(rename = "tiktokAvgViews", default)]
        avg_views: u64,
        #[serde(rename = "tiktokAvgLikes", default)]
        avg_likes: u64,
        #[serde(rename = "tiktokAvgComments", default)]
        avg_comments: u64,
    },
    #[serde(rename = "Twitter/X")]
    Twitter {
        #[serde(rename = "twitterFollowers", default)]
        followers: u64,
        #[serde(rename = "twitterAvgImpressions", default)]
        avg_impressions: u64,
        #[serde(rename = "twitterAvgEngagements", default)]
        avg_engagements: u64,
    },
    #[serde(rename = "LinkedIn")]
    LinkedIn {
        #[serde(rename = "linkedinFollowers", default)]
        followers: u64,
        #[serde(rename = "linkedinAvgImpressions", default)]
        avg_impressions: u64,
        #[serde(rename = "linkedinAvgEngagements", default)]
        avg_engagements: u64,
    },
    #[serde(rename = "Blog/Newsletter")]
    Blog {
        #[serde(rename = "blogNewsletterSubscribers", default)]
        subscribers: u64,
        /// Percentage of emails opened by subscribers.
        #[serde(rename = "blogNewsletterOpenRate", default)]
        open_rate: f64,
        /// Percentage of opened emails that clicked a link.
        #[serde(rename = "blogNewsletterCTR", default)]
        click_through_rate: f64,
    },
}

impl PlatformStats {
    pub fn platform_name(&self) -> &'static str {
        match self {
            PlatformStats::YouTube { .. } => "YouTube",
            PlatformStats::Instagram { .. } => "Instagram",
            PlatformStats::TikTok { .. } => "TikTok",
            PlatformStats::Twitter { .. } => "Twitter/X",
            PlatformStats::LinkedIn { .. } => "LinkedIn",
            PlatformStats::Blog { .. } => "Blog/Newsletter",
        }
    }

    /// Follower/subscriber count that feeds the audience-size multiplier.
    pub fn audience_size(&self) -> u64 {
        match *self {
            PlatformStats::YouTube { subscribers, .. } => subscribers,
            PlatformStats::Instagram { followers, .. } => followers,
            PlatformStats::TikTok { followers, .. } => followers,
            PlatformStats::Twitter { followers, .. } => followers,
            PlatformStats::LinkedIn { followers, .. } => followers,
            PlatformStats::Blog { subscribers, .. } => subscribers,
        }
    }

    /// Platform-specific engagement rate in percent, rounded to two
    /// decimals. Zero denominators yield 0.
    pub fn engagement_rate(&self) -> f64 {
        let rate = match *self {
            PlatformStats::YouTube {
                subscribers,
                avg_views,
                ..
            } => ratio_percent(avg_views as f64, subscribers as f64),
            PlatformStats::Instagram {
                followers,
                avg_likes,
                avg_comments,
            } => ratio_percent((avg_likes + avg_comments) as f64, followers as f64),
            PlatformStats::TikTok {
                followers,
                avg_views,
                ..
            } => ratio_percent(avg_views as f64, followers as f64),
            PlatformStats::Twitter {
                avg_impressions,
                avg_engagements,
                ..
            } => ratio_percent(avg_engagements as f64, avg_impressions as f64),
            PlatformStats::LinkedIn {
                avg_impressions,
                avg_engagements,
                ..
            } => ratio_percent(avg_engagements as f64, avg_impressions as f64),
            PlatformStats::Blog {
                open_rate,
                click_through_rate,
                ..
            } => (open_rate / 100.0) * (click_through_rate / 100.0) * 100.0,
        };
        (rate * 100.0).round() / 100.0
    }
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CreatorData {
    Digital {
        #[serde(rename = "experienceLevel", default)]
        experience_level: ExperienceLevel,
        #[serde(rename = "projectTerms", default)]
        project_terms: ProjectTerms,
    },
    Physical {
        #[serde(rename = "hoursPerUnit", default)]
        hours_per_unit: f64,
        #[serde(rename = "avgMaterialCost", default)]
        material_cost: f64,
        #[serde(rename = "salesChannel", default)]
        sales_channel: SalesChannel,
        #[serde(rename = "shippingCost", default)]
        shipping_cost: f64,
    },
    Content {
        #[serde(flatten)]
        stats: Option<PlatformStats>,
        #[serde(rename = "hoursPerContent", default)]
        hours_per_content: f64,
        #[serde(rename = "engagementRate", default)]
        engagement_rate: f64,
        #[serde(rename = "contentType", default)]
        content_type: String,
        #[serde(rename = "usageRights", default)]
        usage_rights: Option<UsageRights>,
    },
}

impl Default for CreatorData {
    fn default() -> Self {
        CreatorData::Digital {
            experience_level: ExperienceLevel::Mid,
            project_terms: ProjectTerms::Standard,
        }
    }
}

impl CreatorData {
    pub fn type_name(&self) -> &'static str {
        match self {
            CreatorData::Digital { .. } => "digital",
            CreatorData::Physical { .. } => "physical",
            CreatorData::Content { .. } => "content",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub delivery_hours: f64,
    #[serde(default)]
    pub prep_hours: f64,
}

impl CustomService {
    pub fn new(name: &str, delivery_hours: f64, prep_hours: f64) -> Self {
        CustomService {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            delivery_hours,
            prep_hours,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.delivery_hours + self.prep_hours
    }
}

/// The whole pricing-tool state: everything the wizard edits, persisted as
/// one JSON blob and round-trippable through export/import.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingSession {
    pub expenses: Vec<Expense>,
    pub income_settings: IncomeSettings,
    #[serde(rename = "creatorData")]
    pub creator: CreatorData,
    pub custom_services: Vec<CustomService>,
    pub markup: f64,
    pub selected_rate_tier: RateTier,
    pub current_step: u32,
    pub export_date: String,
    pub version: String,
}

impl Default for PricingSession {
    fn default() -> Self {
        PricingSession {
            expenses: default_expenses(),
            income_settings: IncomeSettings::default(),
            creator: CreatorData::default(),
            custom_services: Vec::new(),
            markup: 0.0,
            selected_rate_tier: RateTier::Recommended,
            current_step: 1,
            export_date: String::new(),
            version: "1.0".to_string(),
        }
    }
}

// ==========================================
// Contract data
// ==========================================

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    #[default]
    Digital,
    Physical,
    Content,
}

impl ContractType {
    pub fn label(&self) -> &'static str {
        match self {
            ContractType::Digital => "Digital Creator Services",
            ContractType::Physical => "Physical Product Creation",
            ContractType::Content => "Content Creation",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractSections {
    pub scope_of_work: bool,
    pub deliverables: bool,
    pub timeline: bool,
    pub payment: bool,
    pub rights: bool,
    pub revisions: bool,
    pub cancellation: bool,
    pub confidentiality: bool,
    pub jurisdiction: bool,
    pub liability: bool,
    pub dispute_resolution: bool,
}

impl Default for ContractSections {
    fn default() -> Self {
        ContractSections {
            scope_of_work: true,
            deliverables: false,
            timeline: false,
            payment: false,
            rights: false,
            revisions: false,
            cancellation: false,
            confidentiality: false,
            jurisdiction: false,
            liability: false,
            dispute_resolution: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub routing_number: String,
    pub swift_bic: String,
    pub paypal_email: String,
    pub venmo_handle: String,
    pub zelle_info: String,
    pub crypto_wallet: String,
    pub crypto_network: String,
    pub other_details: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidentialitySubclauses {
    pub define_confidential: bool,
    pub exclusions: bool,
    pub portfolio_rights: bool,
    pub social_media_rights: bool,
    pub team_disclosure: bool,
    pub duration: bool,
    pub return_materials: bool,
    pub breach_remedies: bool,
}

impl Default for ConfidentialitySubclauses {
    fn default() -> Self {
        ConfidentialitySubclauses {
            define_confidential: true,
            exclusions: true,
            portfolio_rights: true,
            social_media_rights: false,
            team_disclosure: false,
            duration: true,
            return_materials: false,
            breach_remedies: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomClause {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl CustomClause {
    pub fn new(title: &str, content: &str) -> Self {
        CustomClause {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }
}

/// Everything the contract builder edits. Free-text clause fields are
/// overrides: blank means "substitute the template default for the active
/// contract type at render time".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractData {
    pub contract_type: ContractType,

    pub client_name: String,
    pub project_name: String,
    pub start_date: String,
    pub end_date: String,
    pub creator_name: String,

    pub creator_address: String,
    pub creator_city: String,
    pub creator_state: String,
    pub creator_zip: String,
    pub creator_country: String,
    pub creator_email: String,
    pub creator_phone: String,

    pub client_address: String,
    pub client_city: String,
    pub client_state: String,
    pub client_zip: String,
    pub client_country: String,
    pub client_email: String,
    pub client_phone: String,

    pub sections: ContractSections,

    pub scope_of_work: String,
    pub deliverables: String,
    pub timeline: String,
    pub payment_terms: String,
    pub payment_amount: String,
    pub payment_schedule: String,
    pub currency: String,
    pub payment_method: String,
    pub payment_details: PaymentDetails,
    pub rights_usage: String,
    pub revisions_limit: String,
    pub revisions_timeline: String,
    pub revisions_definition: String,
    pub revisions_overflow: String,
    pub revisions_additional: String,
    pub cancellation_notice: String,
    pub cancellation_fee: String,
    pub cancellation_additional: String,
    pub confidentiality_terms: String,
    pub governing_law: String,
    pub jurisdiction_venue: String,

    pub independent_contractor_terms: String,
    pub liability_limit: String,
    pub indemnification_terms: String,
    pub warranty_terms: String,

    pub dispute_resolution_terms: String,
    pub force_majeure_terms: String,

    pub confidentiality_subclauses: ConfidentialitySubclauses,
    pub confidentiality_duration: String,
    pub portfolio_usage_delay: String,

    pub custom_clauses: Vec<CustomClause>,

    pub export_date: String,
    pub version: String,
}

impl Default for ContractData {
    fn default() -> Self {
        ContractData {
            contract_type: ContractType::Digital,
            client_name: String::new(),
            project_name: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            creator_name: String::new(),
            creator_address: String::new(),
            creator_city: String::new(),
            creator_state: String::new(),
            creator_zip: String::new(),
            creator_country: String::new(),
            creator_email: String::new(),
            creator_phone: String::new(),
            client_address: String::new(),
            client_city: String::new(),
            client_state: String::new(),
            client_zip: String::new(),
            client_country: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            sections: ContractSections::default(),
            scope_of_work: String::new(),
            deliverables: String::new(),
            timeline: String::new(),
            payment_terms: String::new(),
            payment_amount: String::new(),
            payment_schedule: String::new(),
            currency: "USD".to_string(),
            payment_method: String::new(),
            payment_details: PaymentDetails::default(),
            rights_usage: String::new(),
            revisions_limit: "2 rounds".to_string(),
            revisions_timeline: "5 business days".to_string(),
            revisions_definition: String::new(),
            revisions_overflow: String::new(),
            revisions_additional: String::new(),
            cancellation_notice: String::new(),
            cancellation_fee: String::new(),
            cancellation_additional: String::new(),
            confidentiality_terms: String::new(),
            governing_law: String::new(),
            jurisdiction_venue: String::new(),
            independent_contractor_terms: String::new(),
            liability_limit: String::new(),
            indemnification_terms: String::new(),
            warranty_terms: String::new(),
            dispute_resolution_terms: String::new(),
            force_majeure_terms: String::new(),
            confidentiality_subclauses: ConfidentialitySubclauses::default(),
            confidentiality_duration: "3 years".to_string(),
            portfolio_usage_delay: "upon project completion".to_string(),
            custom_clauses: Vec::new(),
            export_date: String::new(),
            version: "1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_data_round_trips_with_web_style_keys() {
        let creator = CreatorData::Digital {
            experience_level: ExperienceLevel::Senior,
            project_terms: ProjectTerms::Rush,
        };
        let json = serde_json::to_value(&creator).unwrap();
        assert_eq!(json["type"], "digital");
        assert_eq!(json["experienceLevel"], "senior");
        assert_eq!(json["projectTerms"], "rush");
        let back: CreatorData = serde_json::from_value(json).unwrap();
        assert_eq!(back, creator);
    }

    #[test]
    fn content_stats_flatten_under_primary_platform() {
        let creator = CreatorData::Content {
            stats: Some(PlatformStats::YouTube {
                subscribers: 50_000,
                avg_views: 25_000,
                avg_watch_time_percent: 45.0,
            }),
            hours_per_content: 4.0,
            engagement_rate: 50.0,
            content_type: "video".to_string(),
            usage_rights: Some(UsageRights::PaidAd),
        };
        let json = serde_json::to_value(&creator).unwrap();
        assert_eq!(json["primaryPlatform"], "YouTube");
        assert_eq!(json["subscribers"], 50_000);
        assert_eq!(json["usageRights"], "paid_ad");
        let back: CreatorData = serde_json::from_value(json).unwrap();
        assert_eq!(back, creator);
    }

    #[test]
    fn engagement_rate_formulas() {
        let yt = PlatformStats::YouTube {
            subscribers: 50_000,
            avg_views: 25_000,
            avg_watch_time_percent: 45.0,
        };
        assert_eq!(yt.engagement_rate(), 50.0);

        let ig = PlatformStats::Instagram {
            followers: 50_000,
            avg_likes: 2_500,
            avg_comments: 150,
        };
        assert_eq!(ig.engagement_rate(), 5.3);

        let blog = PlatformStats::Blog {
            subscribers: 10_000,
            open_rate: 20.0,
            click_through_rate: 5.0,
        };
        assert_eq!(blog.engagement_rate(), 1.0);
    }

    #[test]
    fn engagement_rate_zero_denominator_is_zero() {
        let yt = PlatformStats::YouTube {
            subscribers: 0,
            avg_views: 25_000,
            avg_watch_time_percent: 0.0,
        };
        assert_eq!(yt.engagement_rate(), 0.0);
    }

    #[test]
    fn pricing_session_defaults() {
        let session = PricingSession::default();
        assert_eq!(session.expenses.len(), 12);
        assert!(session.expenses.iter().all(|e| e.monthly_cost == 0.0));
        assert_eq!(session.selected_rate_tier, RateTier::Recommended);
        assert_eq!(session.markup, 0.0);
    }

    #[test]
    fn contract_data_tolerates_missing_keys() {
        let json = r#"{ "contractType": "content", "clientName": "Acme" }"#;
        let data: ContractData = serde_json::from_str(json).unwrap();
        assert_eq!(data.contract_type, ContractType::Content);
        assert_eq!(data.client_name, "Acme");
        assert!(data.sections.scope_of_work);
        assert_eq!(data.revisions_limit, "2 rounds");
        assert!(data.confidentiality_subclauses.define_confidential);
        assert!(!data.confidentiality_subclauses.breach_remedies);
    }
}
