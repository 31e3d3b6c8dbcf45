//! The pricing pipeline: expense totals -> income target -> creator-type
//! rate adjustment -> service prices. Every function here is pure and total;
//! zero denominators yield 0 and unmatched lookups yield identity
//! multipliers.

use crate::model::{
    CreatorData, CustomService, ExperienceLevel, IncomeSettings, PlatformStats, PricingSession,
    ProjectTerms, RateTier, SalesChannel, UsageRights,
};

/// The recommended tier is always exactly base rate + 25%. A separate,
/// user-configurable markup is layered on later in the service step.
pub const RECOMMENDED_MARGIN: f64 = 1.25;
pub const TIER_MARKUP_PERCENT: f64 = 25.0;

// ==========================================
// 1. Expense aggregation
// ==========================================

pub fn monthly_total(expenses: &[crate::model::Expense]) -> f64 {
    expenses.iter().map(|e| e.monthly_cost).sum()
}

pub fn annual_total(expenses: &[crate::model::Expense]) -> f64 {
    monthly_total(expenses) * 12.0
}

// ==========================================
// 2. Income target & foundation rates
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeBreakdown {
    pub annual_expenses: f64,
    pub tax_amount: f64,
    pub buffer_amount: f64,
    pub reinvestment_amount: f64,
    pub target_income: f64,
    pub billable_hours: f64,
    pub base_hourly_rate: f64,
    pub recommended_hourly_rate: f64,
}

pub fn income_breakdown(annual_expenses: f64, settings: &IncomeSettings) -> IncomeBreakdown {
    let tax_amount = annual_expenses * settings.tax_rate / 100.0;
    let buffer_amount = annual_expenses * settings.emergency_buffer / 100.0;
    let reinvestment_amount = annual_expenses * settings.reinvestment / 100.0;
    let target_income = annual_expenses + tax_amount + buffer_amount + reinvestment_amount;

    let billable_hours =
        settings.weeks_per_year * settings.days_per_week * settings.hours_per_day;
    let base_hourly_rate = if billable_hours > 0.0 {
        target_income / billable_hours
    } else {
        0.0
    };

    IncomeBreakdown {
        annual_expenses,
        tax_amount,
        buffer_amount,
        reinvestment_amount,
        target_income,
        billable_hours,
        base_hourly_rate,
        recommended_hourly_rate: base_hourly_rate * RECOMMENDED_MARGIN,
    }
}

impl IncomeBreakdown {
    /// The foundation rate the user picked in the tier step.
    pub fn tier_rate(&self, tier: RateTier) -> f64 {
        match tier {
            RateTier::Base => self.base_hourly_rate,
            RateTier::Recommended => self.recommended_hourly_rate,
        }
    }
}

// ==========================================
// 3. Creator-type multipliers
// ==========================================

pub fn experience_multiplier(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Junior => 0.85,
        ExperienceLevel::Mid => 1.0,
        ExperienceLevel::Senior => 1.20,
    }
}

pub fn project_terms_multiplier(terms: ProjectTerms) -> f64 {
    match terms {
        ProjectTerms::Standard => 1.0,
        ProjectTerms::ExtraRevisions => 1.15,
        ProjectTerms::Rush => 1.25,
        ProjectTerms::RushRevisions => 1.40,
    }
}

/// Highest matching threshold wins; under 1K is the identity tier.
pub fn audience_multiplier(audience_size: u64) -> f64 {
    match audience_size {
        1_000_000.. => 1.5,
        500_000.. => 1.4,
        100_000.. => 1.3,
        50_000.. => 1.2,
        10_000.. => 1.1,
        5_000.. => 1.05,
        1_000.. => 1.02,
        _ => 1.0,
    }
}

pub fn audience_label(audience_size: u64) -> &'static str {
    match audience_size {
        1_000_000.. => "1M+ (Mega)",
        500_000.. => "500K+ (Large)",
        100_000.. => "100K+ (Mid)",
        50_000.. => "50K+ (Growing)",
        10_000.. => "10K+ (Micro)",
        5_000.. => "5K+ (Emerging)",
        1_000.. => "1K+ (Starting)",
        _ => "Under 1K",
    }
}

/// Engagement benchmarks differ per platform; the breakpoints below match
/// the guidance shown next to each platform's metric inputs (e.g. YouTube
/// "Good: 10-20% | Viral: 50%+"). A rate of 0 never earns a bonus.
pub fn engagement_multiplier(stats: &PlatformStats, engagement_rate: f64) -> f64 {
    if engagement_rate <= 0.0 {
        return 1.0;
    }
    match stats {
        PlatformStats::YouTube { .. } => match engagement_rate {
            r if r >= 50.0 => 1.2,
            r if r >= 20.0 => 1.15,
            r if r >= 10.0 => 1.08,
            _ => 1.0,
        },
        PlatformStats::Instagram { .. } => match engagement_rate {
            r if r >= 10.0 => 1.18,
            r if r >= 7.0 => 1.15,
            r if r >= 3.0 => 1.08,
            _ => 1.0,
        },
        PlatformStats::TikTok { .. } => match engagement_rate {
            r if r >= 200.0 => 1.25,
            r if r >= 100.0 => 1.15,
            r if r >= 50.0 => 1.08,
            _ => 1.0,
        },
        PlatformStats::Twitter { .. } | PlatformStats::LinkedIn { .. } => match engagement_rate {
            r if r >= 5.0 => 1.15,
            r if r >= 1.0 => 1.08,
            _ => 1.0,
        },
        PlatformStats::Blog { .. } => match engagement_rate {
            r if r >= 3.0 => 1.15,
            r if r >= 1.0 => 1.08,
            _ => 1.0,
        },
    }
}

pub fn engagement_label(stats: &PlatformStats, engagement_rate: f64) -> &'static str {
    let multiplier = engagement_multiplier(stats, engagement_rate);
    match stats {
        PlatformStats::YouTube { .. } | PlatformStats::TikTok { .. } => match multiplier {
            m if m >= 1.2 => "Viral Engagement",
            m if m >= 1.15 => "High Engagement",
            m if m > 1.0 => "Good Engagement",
            _ => "",
        },
        PlatformStats::Instagram { .. } => match multiplier {
            m if m >= 1.18 => "Exceptional Engagement",
            m if m >= 1.15 => "Great Engagement",
            m if m > 1.0 => "Good Engagement",
            _ => "",
        },
        _ => match multiplier {
            m if m >= 1.15 => "Great Engagement",
            m if m > 1.0 => "Good Engagement",
            _ => "",
        },
    }
}

pub fn usage_rights_multiplier(rights: UsageRights) -> f64 {
    match rights {
        UsageRights::Organic => 1.0,
        UsageRights::PaidAd => 2.5,
        UsageRights::Exclusive => 5.0,
    }
}

pub fn sales_channel_multiplier(channel: SalesChannel) -> f64 {
    match channel {
        SalesChannel::Wholesale => 2.0,
        SalesChannel::Retail => 3.0,
    }
}

/// Product of the creator-type multipliers that apply to client work.
/// Physical creators have none; their channel markup happens per unit.
pub fn creator_multiplier(creator: &CreatorData) -> f64 {
    match creator {
        CreatorData::Digital {
            experience_level,
            project_terms,
        } => experience_multiplier(*experience_level) * project_terms_multiplier(*project_terms),
        CreatorData::Physical { .. } => 1.0,
        CreatorData::Content {
            stats,
            engagement_rate,
            ..
        } => match stats {
            Some(s) => {
                audience_multiplier(s.audience_size()) * engagement_multiplier(s, *engagement_rate)
            }
            None => 1.0,
        },
    }
}

/// Custom services (workshops, consulting, audits) use a narrower basis:
/// digital creators keep the experience multiplier only, content creators
/// get the raw rate with no audience/engagement bonus at all.
pub fn custom_service_multiplier(creator: &CreatorData) -> f64 {
    match creator {
        CreatorData::Digital {
            experience_level, ..
        } => experience_multiplier(*experience_level),
        CreatorData::Physical { .. } | CreatorData::Content { .. } => 1.0,
    }
}

// ==========================================
// 4. Service price composition
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceOption {
    pub id: &'static str,
    pub name: &'static str,
    pub hours: f64,
    pub description: &'static str,
}

pub const STANDARD_SERVICES: [ServiceOption; 6] = [
    ServiceOption {
        id: "hourly",
        name: "Hourly Rate",
        hours: 1.0,
        description: "Per hour of work",
    },
    ServiceOption {
        id: "day",
        name: "Day Rate",
        hours: 8.0,
        description: "Full day (8 hours)",
    },
    ServiceOption {
        id: "small",
        name: "Small Project",
        hours: 15.0,
        description: "15 hours",
    },
    ServiceOption {
        id: "medium",
        name: "Medium Project",
        hours: 30.0,
        description: "30 hours - 5% volume discount",
    },
    ServiceOption {
        id: "large",
        name: "Large Project",
        hours: 60.0,
        description: "60 hours - 10% volume discount",
    },
    ServiceOption {
        id: "retainer",
        name: "Monthly Retainer",
        hours: 40.0,
        description: "40 hours/month - 15% recurring discount",
    },
];

/// Content creators sell content pieces, not project packages; only the
/// hourly reference survives. Physical creators use per-unit pricing and
/// skip this list entirely.
pub fn display_services(creator: &CreatorData) -> Vec<ServiceOption> {
    match creator {
        CreatorData::Content { .. } => STANDARD_SERVICES
            .iter()
            .copied()
            .filter(|s| s.id == "hourly")
            .collect(),
        _ => STANDARD_SERVICES.to_vec(),
    }
}

pub fn service_discount(service_id: &str) -> f64 {
    match service_id {
        "medium" => 0.95,
        "large" => 0.90,
        "retainer" => 0.85,
        _ => 1.0,
    }
}

pub fn tier_markup(tier: RateTier) -> f64 {
    match tier {
        RateTier::Base => 0.0,
        RateTier::Recommended => TIER_MARKUP_PERCENT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePair {
    pub base: f64,
    pub recommended: f64,
}

/// Everything the service-pricing step derives from the session, computed
/// once and read by the table/renderer code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateCard {
    pub breakdown: IncomeBreakdown,
    pub tier: RateTier,
    /// Tier markup (0 or 25) plus the additional markup, summed.
    pub total_markup: f64,
    /// Break-even rate with all creator-type multipliers applied.
    pub true_base_rate: f64,
    /// Break-even basis for custom services (narrower multiplier set).
    pub custom_base_rate: f64,
    /// Custom-service rate at the selected tier, for display.
    pub custom_selected_rate: f64,
}

impl RateCard {
    pub fn from_session(session: &PricingSession) -> RateCard {
        let breakdown = income_breakdown(
            annual_total(&session.expenses),
            &session.income_settings,
        );
        let true_base_rate = breakdown.base_hourly_rate * creator_multiplier(&session.creator);
        let custom_base_rate =
            breakdown.base_hourly_rate * custom_service_multiplier(&session.creator);
        let custom_selected_rate = match session.selected_rate_tier {
            RateTier::Base => custom_base_rate,
            RateTier::Recommended => custom_base_rate * RECOMMENDED_MARGIN,
        };
        RateCard {
            breakdown,
            tier: session.selected_rate_tier,
            total_markup: tier_markup(session.selected_rate_tier) + session.markup,
            true_base_rate,
            custom_base_rate,
            custom_selected_rate,
        }
    }

    /// Base price is always break-even; the recommended price layers the
    /// summed markup on top. The volume/retainer discount applies to both.
    pub fn service_price(&self, hours: f64, service_id: &str) -> PricePair {
        let base_price = self.true_base_rate * hours;
        let recommended_price = base_price * (1.0 + self.total_markup / 100.0);
        let discount = service_discount(service_id);
        PricePair {
            base: base_price * discount,
            recommended: recommended_price * discount,
        }
    }

    /// Custom services bill delivery + prep hours at the custom-service
    /// basis, with no volume discount.
    pub fn custom_price(&self, service: &CustomService) -> PricePair {
        let base_price = self.custom_base_rate * service.total_hours();
        PricePair {
            base: base_price,
            recommended: base_price * (1.0 + self.total_markup / 100.0),
        }
    }
}

// ==========================================
// 5. Physical per-unit pricing
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPricing {
    pub hourly_rate: f64,
    pub labor_cost: f64,
    pub material_cost: f64,
    pub total_cost: f64,
    pub wholesale_price: f64,
    pub retail_price: f64,
    pub wholesale_with_shipping: f64,
    pub retail_with_shipping: f64,
    pub shipping_cost: f64,
}

/// Physical creators price per unit from the tier-selected foundation rate;
/// there is no experience/terms adjustment. Shipping is added after the
/// channel markup and is never marked up itself.
pub fn unit_pricing(
    breakdown: &IncomeBreakdown,
    tier: RateTier,
    hours_per_unit: f64,
    material_cost: f64,
    shipping_cost: f64,
) -> UnitPricing {
    let hourly_rate = breakdown.tier_rate(tier);
    let labor_cost = hourly_rate * hours_per_unit;
    let total_cost = labor_cost + material_cost;
    let wholesale_price = total_cost * sales_channel_multiplier(SalesChannel::Wholesale);
    let retail_price = total_cost * sales_channel_multiplier(SalesChannel::Retail);
    UnitPricing {
        hourly_rate,
        labor_cost,
        material_cost,
        total_cost,
        wholesale_price,
        retail_price,
        wholesale_with_shipping: wholesale_price + shipping_cost,
        retail_with_shipping: retail_price + shipping_cost,
        shipping_cost,
    }
}

// ==========================================
// 6. Content-piece floor price
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentPricing {
    pub starting_rate: f64,
    pub audience_multiplier: f64,
    pub engagement_multiplier: f64,
    pub adjusted_rate: f64,
    pub time_cost: f64,
    pub rights_multiplier: f64,
    pub floor_price: f64,
}

/// The per-piece floor price for content posted to the creator's own
/// audience: tier rate x audience x engagement x hours, then the usage
/// rights multiplier. Returns None until platform, hours and rights are all
/// set.
pub fn content_piece_price(
    breakdown: &IncomeBreakdown,
    tier: RateTier,
    creator: &CreatorData,
) -> Option<ContentPricing> {
    let CreatorData::Content {
        stats: Some(stats),
        hours_per_content,
        engagement_rate,
        usage_rights: Some(rights),
        ..
    } = creator
    else {
        return None;
    };
    if *hours_per_content <= 0.0 || stats.audience_size() == 0 {
        return None;
    }

    let starting_rate = breakdown.tier_rate(tier);
    let audience = audience_multiplier(stats.audience_size());
    let engagement = engagement_multiplier(stats, *engagement_rate);
    let adjusted_rate = starting_rate * audience * engagement;
    let time_cost = adjusted_rate * hours_per_content;
    let rights_multiplier = usage_rights_multiplier(*rights);

    Some(ContentPricing {
        starting_rate,
        audience_multiplier: audience,
        engagement_multiplier: engagement,
        adjusted_rate,
        time_cost,
        rights_multiplier,
        floor_price: time_cost * rights_multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Expense;

    fn settings(weeks: f64, days: f64, hours: f64) -> IncomeSettings {
        IncomeSettings {
            tax_rate: 30.0,
            emergency_buffer: 20.0,
            reinvestment: 10.0,
            weeks_per_year: weeks,
            days_per_week: days,
            hours_per_day: hours,
        }
    }

    #[test]
    fn expense_totals() {
        let expenses = vec![
            Expense::new("Housing", 1200.0),
            Expense::new("Software", 55.5),
            Expense::new("Misc", 0.0),
        ];
        assert_eq!(monthly_total(&expenses), 1255.5);
        assert_eq!(annual_total(&expenses), 15066.0);
    }

    #[test]
    fn billable_hours_is_the_product_of_its_factors() {
        let b = income_breakdown(0.0, &settings(48.0, 3.0, 4.0));
        assert_eq!(b.billable_hours, 576.0);

        let b = income_breakdown(0.0, &settings(0.0, 3.0, 4.0));
        assert_eq!(b.billable_hours, 0.0);
    }

    #[test]
    fn target_income_composition() {
        let b = income_breakdown(10_000.0, &settings(48.0, 3.0, 4.0));
        assert_eq!(b.tax_amount, 3_000.0);
        assert_eq!(b.buffer_amount, 2_000.0);
        assert_eq!(b.reinvestment_amount, 1_000.0);
        assert_eq!(b.target_income, 16_000.0);
        assert_eq!(
            b.target_income,
            10_000.0 * (1.0 + (30.0 + 20.0 + 10.0) / 100.0)
        );
    }

    #[test]
    fn recommended_rate_is_exactly_base_times_1_25() {
        let b = income_breakdown(24_000.0, &settings(48.0, 3.0, 4.0));
        assert!(b.base_hourly_rate > 0.0);
        assert_eq!(b.recommended_hourly_rate, b.base_hourly_rate * 1.25);
    }

    #[test]
    fn zero_billable_hours_yields_zero_rate_not_nan() {
        let b = income_breakdown(24_000.0, &settings(48.0, 0.0, 4.0));
        assert_eq!(b.billable_hours, 0.0);
        assert_eq!(b.base_hourly_rate, 0.0);
        assert_eq!(b.recommended_hourly_rate, 0.0);
    }

    #[test]
    fn digital_multipliers_compose_multiplicatively() {
        let creator = CreatorData::Digital {
            experience_level: ExperienceLevel::Senior,
            project_terms: ProjectTerms::RushRevisions,
        };
        let m = creator_multiplier(&creator);
        assert!((m - 1.20 * 1.40).abs() < 1e-12);
    }

    #[test]
    fn audience_thresholds_highest_match_wins() {
        assert_eq!(audience_multiplier(999), 1.0);
        assert_eq!(audience_multiplier(1_000), 1.02);
        assert_eq!(audience_multiplier(5_000), 1.05);
        assert_eq!(audience_multiplier(10_000), 1.1);
        assert_eq!(audience_multiplier(50_000), 1.2);
        assert_eq!(audience_multiplier(100_000), 1.3);
        assert_eq!(audience_multiplier(500_000), 1.4);
        assert_eq!(audience_multiplier(1_000_000), 1.5);
        assert_eq!(audience_multiplier(7_500_000), 1.5);
    }

    #[test]
    fn youtube_engagement_tiers() {
        let yt = PlatformStats::YouTube {
            subscribers: 10_000,
            avg_views: 0,
            avg_watch_time_percent: 0.0,
        };
        assert_eq!(engagement_multiplier(&yt, 55.0), 1.2);
        assert_eq!(engagement_label(&yt, 55.0), "Viral Engagement");
        assert_eq!(engagement_multiplier(&yt, 15.0), 1.08);
        assert_eq!(engagement_label(&yt, 15.0), "Good Engagement");
        assert_eq!(engagement_multiplier(&yt, 5.0), 1.0);
        assert_eq!(engagement_multiplier(&yt, 0.0), 1.0);
    }

    #[test]
    fn per_platform_engagement_breakpoints() {
        let ig = PlatformStats::Instagram {
            followers: 0,
            avg_likes: 0,
            avg_comments: 0,
        };
        assert_eq!(engagement_multiplier(&ig, 10.0), 1.18);
        assert_eq!(engagement_multiplier(&ig, 7.0), 1.15);
        assert_eq!(engagement_multiplier(&ig, 3.0), 1.08);
        assert_eq!(engagement_multiplier(&ig, 2.9), 1.0);

        let tt = PlatformStats::TikTok {
            followers: 0,
            avg_views: 0,
            avg_likes: 0,
            avg_comments: 0,
        };
        assert_eq!(engagement_multiplier(&tt, 200.0), 1.25);
        assert_eq!(engagement_multiplier(&tt, 100.0), 1.15);
        assert_eq!(engagement_multiplier(&tt, 50.0), 1.08);
        assert_eq!(engagement_multiplier(&tt, 49.0), 1.0);

        let tw = PlatformStats::Twitter {
            followers: 0,
            avg_impressions: 0,
            avg_engagements: 0,
        };
        assert_eq!(engagement_multiplier(&tw, 5.0), 1.15);
        assert_eq!(engagement_multiplier(&tw, 1.0), 1.08);
        assert_eq!(engagement_multiplier(&tw, 0.5), 1.0);

        let blog = PlatformStats::Blog {
            subscribers: 0,
            open_rate: 0.0,
            click_through_rate: 0.0,
        };
        assert_eq!(engagement_multiplier(&blog, 3.0), 1.15);
        assert_eq!(engagement_multiplier(&blog, 1.0), 1.08);
        assert_eq!(engagement_multiplier(&blog, 0.9), 1.0);
    }

    fn card_for(session: &PricingSession) -> RateCard {
        RateCard::from_session(session)
    }

    #[test]
    fn discounts_strictly_increase_down_the_volume_ladder() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 2_000.0)];
        let card = card_for(&session);

        let hours = 30.0;
        let none = card.service_price(hours, "hourly");
        let medium = card.service_price(hours, "medium");
        let large = card.service_price(hours, "large");
        let retainer = card.service_price(hours, "retainer");

        assert!(retainer.recommended < large.recommended);
        assert!(large.recommended < medium.recommended);
        assert!(medium.recommended < none.recommended);
        assert!(retainer.base < large.base);
        assert!(large.base < medium.base);
        assert!(medium.base < none.base);
    }

    #[test]
    fn markup_is_additive_not_compounded() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 2_000.0)];
        session.selected_rate_tier = RateTier::Recommended;
        session.markup = 10.0;
        let card = card_for(&session);

        assert_eq!(card.total_markup, 35.0);
        let price = card.service_price(10.0, "hourly");
        assert!((price.recommended - price.base * 1.35).abs() < 1e-9);
    }

    #[test]
    fn base_tier_seeds_no_tier_markup() {
        let mut session = PricingSession::default();
        session.selected_rate_tier = RateTier::Base;
        session.markup = 25.0;
        let card = card_for(&session);
        assert_eq!(card.total_markup, 25.0);
    }

    #[test]
    fn physical_unit_pricing_worked_example() {
        // material 25, 2.5 h/unit at 40/h, wholesale channel, shipping 12
        let breakdown = IncomeBreakdown {
            annual_expenses: 0.0,
            tax_amount: 0.0,
            buffer_amount: 0.0,
            reinvestment_amount: 0.0,
            target_income: 0.0,
            billable_hours: 1.0,
            base_hourly_rate: 40.0,
            recommended_hourly_rate: 50.0,
        };
        let unit = unit_pricing(&breakdown, RateTier::Base, 2.5, 25.0, 12.0);
        assert_eq!(unit.labor_cost, 100.0);
        assert_eq!(unit.total_cost, 125.0);
        assert_eq!(unit.wholesale_price, 250.0);
        assert_eq!(unit.wholesale_with_shipping, 262.0);
        assert_eq!(unit.retail_price, 375.0);
        assert_eq!(unit.retail_with_shipping, 387.0);
    }

    #[test]
    fn physical_uses_tier_selected_rate_without_creator_adjustment() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 2_000.0)];
        session.creator = CreatorData::Physical {
            hours_per_unit: 2.0,
            material_cost: 10.0,
            sales_channel: SalesChannel::Wholesale,
            shipping_cost: 0.0,
        };
        let card = card_for(&session);
        // No experience/terms/audience chain for physical creators.
        assert_eq!(card.true_base_rate, card.breakdown.base_hourly_rate);

        let unit = unit_pricing(&card.breakdown, RateTier::Recommended, 2.0, 10.0, 0.0);
        assert_eq!(unit.hourly_rate, card.breakdown.recommended_hourly_rate);
    }

    #[test]
    fn content_custom_services_ignore_audience_and_engagement() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 2_000.0)];
        session.creator = CreatorData::Content {
            stats: Some(PlatformStats::YouTube {
                subscribers: 500_000,
                avg_views: 300_000,
                avg_watch_time_percent: 45.0,
            }),
            hours_per_content: 4.0,
            engagement_rate: 60.0,
            content_type: "video".to_string(),
            usage_rights: Some(UsageRights::Organic),
        };
        let card = card_for(&session);

        // Posting work carries the audience/engagement chain...
        assert!(card.true_base_rate > card.breakdown.base_hourly_rate);
        // ...consulting work does not.
        assert_eq!(card.custom_base_rate, card.breakdown.base_hourly_rate);

        let workshop = CustomService::new("Workshop", 8.0, 5.0);
        let price = card.custom_price(&workshop);
        assert_eq!(price.base, card.breakdown.base_hourly_rate * 13.0);
    }

    #[test]
    fn digital_custom_services_keep_experience_only() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 2_000.0)];
        session.creator = CreatorData::Digital {
            experience_level: ExperienceLevel::Senior,
            project_terms: ProjectTerms::Rush,
        };
        let card = card_for(&session);
        assert!((card.custom_base_rate - card.breakdown.base_hourly_rate * 1.20).abs() < 1e-9);
        assert!((card.true_base_rate - card.breakdown.base_hourly_rate * 1.20 * 1.25).abs() < 1e-9);
    }

    #[test]
    fn content_piece_floor_price_chain() {
        let breakdown = income_breakdown(28_800.0, &settings(48.0, 3.0, 4.0));
        // 28_800 * 1.6 / 576 = 80/h base
        assert_eq!(breakdown.base_hourly_rate, 80.0);
        let creator = CreatorData::Content {
            stats: Some(PlatformStats::Instagram {
                followers: 50_000,
                avg_likes: 2_400,
                avg_comments: 100,
            }),
            hours_per_content: 4.0,
            engagement_rate: 5.0,
            content_type: "sponsored_post".to_string(),
            usage_rights: Some(UsageRights::PaidAd),
        };
        let pricing = content_piece_price(&breakdown, RateTier::Base, &creator).unwrap();
        assert_eq!(pricing.audience_multiplier, 1.2);
        assert_eq!(pricing.engagement_multiplier, 1.08);
        assert!((pricing.adjusted_rate - 80.0 * 1.2 * 1.08).abs() < 1e-9);
        assert!((pricing.floor_price - pricing.adjusted_rate * 4.0 * 2.5).abs() < 1e-9);
    }

    #[test]
    fn content_piece_price_requires_platform_hours_and_rights() {
        let breakdown = income_breakdown(10_000.0, &settings(48.0, 3.0, 4.0));
        let creator = CreatorData::Content {
            stats: None,
            hours_per_content: 4.0,
            engagement_rate: 0.0,
            content_type: String::new(),
            usage_rights: Some(UsageRights::Organic),
        };
        assert!(content_piece_price(&breakdown, RateTier::Base, &creator).is_none());
    }

    #[test]
    fn content_creators_see_only_the_hourly_service() {
        let creator = CreatorData::Content {
            stats: None,
            hours_per_content: 0.0,
            engagement_rate: 0.0,
            content_type: String::new(),
            usage_rights: None,
        };
        let services = display_services(&creator);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, "hourly");
        assert_eq!(display_services(&CreatorData::default()).len(), 6);
    }
}
