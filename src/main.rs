mod contract;
mod model;
mod pricing;
mod render;
mod store;

use clap::{Parser, Subcommand};
use comfy_table::{Attribute, Cell, Color, Table};
use inquire::{Confirm, DateSelect, MultiSelect, Select, Text};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Local;

use crate::contract::{assemble, template_text, ClauseField};
use crate::model::{
    ContractData, ContractType, CreatorData, CustomService, Expense, ExperienceLevel,
    PlatformStats, PricingSession, ProjectTerms, RateTier, SalesChannel, UsageRights,
};
use crate::pricing::RateCard;
use crate::store::AppSettings;

// ==========================================
// Constants
// ==========================================
const NEW_CONTRACT_OPT: &str = "\u{2795} New Contract";

const CURRENCIES: [&str; 16] = [
    "USD", "EUR", "GBP", "CAD", "AUD", "JPY", "CNY", "INR", "BRL", "MXN", "USDT", "USDC", "DAI",
    "BUSD", "EURC", "USDGLO",
];

// ==========================================
// CLI
// ==========================================

#[derive(Parser)]
#[command(name = "creator-kit")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the four-step pricing calculator
    Pricing,
    /// Show your saved rate card
    Rates,
    /// Build or edit a contract
    Contract,
    /// Preview a contract in the terminal
    Preview,
    /// Export pricing data or contract documents
    Export,
    /// Import a previously exported JSON file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Configure data directory
    Config,
    /// Open output folder
    Open,
}

// ==========================================
// Main Function
// ==========================================

fn main() {
    let cli = Cli::parse();

    let settings = store::load_settings().unwrap_or_else(setup_config_wizard);
    let root = PathBuf::from(store::expand_home_dir(&settings.data_root));

    if let Err(e) = fs::create_dir_all(&root) {
        eprintln!("\u{274c} Error: Failed to create data directory: {}", e);
        return;
    }

    if cli.command.is_none() {
        use clap::CommandFactory;
        Cli::command().print_help().unwrap();
        return;
    }

    match cli.command.unwrap() {
        Commands::Pricing => run_pricing_wizard(&root),
        Commands::Rates => {
            let session = store::load_pricing(&root);
            print_rate_card(&session);
        }
        Commands::Contract => run_contract_wizard(&root),
        Commands::Preview => preview_contract(&root),
        Commands::Export => export_wizard(&root),
        Commands::Import { file } => import_file(&root, &file),
        Commands::Config => {
            setup_config_wizard();
        }
        Commands::Open => open_output_folder(&root),
    }
}

// ==========================================
// 1. Prompt helpers
// ==========================================

fn prompt_number(label: &str, default: f64) -> f64 {
    let default_str = if default == default.trunc() {
        format!("{:.0}", default)
    } else {
        format!("{}", default)
    };
    let input = Text::new(label).with_default(&default_str).prompt().unwrap();
    input.trim().parse::<f64>().unwrap_or(0.0).max(0.0)
}

fn prompt_count(label: &str, default: u64) -> u64 {
    let input = Text::new(label)
        .with_default(&default.to_string())
        .prompt()
        .unwrap();
    input.trim().parse().unwrap_or(0)
}

fn prompt_text(label: &str, default: &str) -> String {
    Text::new(label).with_default(default).prompt().unwrap()
}

fn money2(value: f64) -> String {
    render::fmt_money2(value)
}

fn money0(value: f64) -> String {
    render::fmt_money0(value)
}

fn generated_on() -> String {
    Local::now().format("%m/%d/%Y").to_string()
}

// ==========================================
// 2. Pricing wizard
// ==========================================

fn run_pricing_wizard(root: &Path) {
    let mut session = store::load_pricing(root);

    // --- Step 1: Monthly expenses ---
    println!("\n--- Step 1 of 4: Monthly Expenses ---");
    println!("\u{1f4a1} Tip: Enter 0 for anything that does not apply.");
    for expense in &mut session.expenses {
        expense.monthly_cost = prompt_number(
            &format!("{} (monthly):", expense.category),
            expense.monthly_cost,
        );
    }

    loop {
        let name = Text::new("Add another category (leave empty to continue):")
            .prompt()
            .unwrap();
        if name.trim().is_empty() {
            break;
        }
        let cost = prompt_number(&format!("{} (monthly):", name.trim()), 0.0);
        session.expenses.push(Expense::new(name.trim(), cost));
    }

    if session.expenses.len() > 1 {
        let remove = Confirm::new("Remove any categories?")
            .with_default(false)
            .prompt()
            .unwrap();
        if remove {
            let options: Vec<String> = session
                .expenses
                .iter()
                .map(|e| format!("{} ({})", e.category, money2(e.monthly_cost)))
                .collect();
            if let Ok(selected) = MultiSelect::new("Select categories to remove:", options).prompt()
            {
                session.expenses = session
                    .expenses
                    .iter()
                    .filter(|e| {
                        !selected
                            .iter()
                            .any(|s| s.starts_with(&format!("{} (", e.category)))
                    })
                    .cloned()
                    .collect();
            }
        }
    }

    let monthly = pricing::monthly_total(&session.expenses);
    println!(
        "\u{2705} Monthly expenses: {}  |  Annual: {}",
        money2(monthly),
        money2(monthly * 12.0)
    );
    session.current_step = 2;
    store::save_pricing(root, &session).ok();

    // --- Step 2: Your foundation ---
    println!("\n--- Step 2 of 4: Your Foundation ---");
    let s = &mut session.income_settings;
    s.tax_rate = prompt_number("Tax Rate % (US: 25-30% for self-employment):", s.tax_rate);
    s.emergency_buffer = prompt_number("Emergency Buffer % (recommended: 20-30):", s.emergency_buffer);
    s.reinvestment = prompt_number("Reinvestment % (recommended: 10-20):", s.reinvestment);
    s.weeks_per_year = prompt_number("Weeks Per Year (48 assumes 4 weeks off):", s.weeks_per_year);
    s.days_per_week = prompt_number("Days Per Week (3 is realistic for creators):", s.days_per_week);
    s.hours_per_day = prompt_number("Hours Per Day (4 hours of deep work):", s.hours_per_day);

    let breakdown = pricing::income_breakdown(
        pricing::annual_total(&session.expenses),
        &session.income_settings,
    );
    print_income_breakdown(&session, &breakdown);
    session.current_step = 3;
    store::save_pricing(root, &session).ok();

    // --- Step 3: Creator type & rate tier ---
    println!("\n--- Step 3 of 4: Creator Type ---");
    session.creator = creator_type_wizard(&session.creator);

    let previous_tier = session.selected_rate_tier;
    let tier_options = vec![
        format!(
            "Base Hourly Rate      {}/hr  (your break-even rate)",
            money2(breakdown.base_hourly_rate)
        ),
        format!(
            "Recommended Rate      {}/hr  (with 25% profit margin)",
            money2(breakdown.recommended_hourly_rate)
        ),
    ];
    let choice = Select::new("Choose which rate to build your pricing on:", tier_options)
        .prompt()
        .unwrap();
    session.selected_rate_tier = if choice.starts_with("Base") {
        RateTier::Base
    } else {
        RateTier::Recommended
    };
    if session.selected_rate_tier != previous_tier {
        // Recommended already includes profit; base needs a suggestion.
        session.markup = match session.selected_rate_tier {
            RateTier::Recommended => 0.0,
            RateTier::Base => 25.0,
        };
    }
    session.current_step = 4;
    store::save_pricing(root, &session).ok();

    // --- Step 4: Service pricing ---
    println!("\n--- Step 4 of 4: Service Pricing ---");
    if !matches!(session.creator, CreatorData::Physical { .. }) {
        println!("\u{1f4a1} 15-25% Competitive | 25-35% Standard | 35-50% Premium | 50%+ Specialized");
        session.markup = prompt_number("Additional profit margin %:", session.markup).min(100.0);

        let card = RateCard::from_session(&session);
        println!("\n--- Custom Services (workshops, consulting, audits) ---");
        println!(
            "\u{1f4a1} Calculated at {}/hr. Leave name empty to finish.",
            money0(card.custom_selected_rate)
        );
        loop {
            let name = Text::new("Service name:").prompt().unwrap();
            if name.trim().is_empty() {
                break;
            }
            let delivery = prompt_number("Delivery hours:", 0.0);
            let prep = prompt_number("Prep hours:", 0.0);
            session
                .custom_services
                .push(CustomService::new(name.trim(), delivery, prep));
        }
    }

    session.current_step = 4;
    if let Err(e) = store::save_pricing(root, &session) {
        eprintln!("\u{274c} Failed to save session: {}", e);
        return;
    }

    print_rate_card(&session);
    println!("\u{2705} Session saved. Run `creator-kit export` to save JSON or PDF artifacts.");
}

fn creator_type_wizard(current: &CreatorData) -> CreatorData {
    let options = vec![
        "Digital Creator    graphic design, UI/UX, web design, illustration",
        "Physical Creator   fashion design, jewelry, crafts, physical products",
        "Content Creator    YouTube, TikTok, Instagram, social media content",
    ];
    let choice = Select::new("What type of creator are you?", options)
        .prompt()
        .unwrap();

    if choice.starts_with("Digital") {
        let level_default = match current {
            CreatorData::Digital {
                experience_level, ..
            } => *experience_level,
            _ => ExperienceLevel::Mid,
        };
        let levels = vec![
            "Junior   0-2 years, -15%",
            "Mid      3-5 years, no adjustment",
            "Senior   6+ years, +20%",
        ];
        let start = match level_default {
            ExperienceLevel::Junior => 0,
            ExperienceLevel::Mid => 1,
            ExperienceLevel::Senior => 2,
        };
        let level = Select::new("Experience level:", levels)
            .with_starting_cursor(start)
            .prompt()
            .unwrap();
        let experience_level = if level.starts_with("Junior") {
            ExperienceLevel::Junior
        } else if level.starts_with("Senior") {
            ExperienceLevel::Senior
        } else {
            ExperienceLevel::Mid
        };

        let terms = Select::new(
            "Project terms:",
            vec![
                "Standard          2 revisions, normal timeline",
                "Extra Revisions   3-5 revisions, +15%",
                "Rush              tight deadline, +25%",
                "Rush + Revisions  both combined, +40%",
            ],
        )
        .prompt()
        .unwrap();
        let project_terms = if terms.starts_with("Extra") {
            ProjectTerms::ExtraRevisions
        } else if terms.starts_with("Rush +") {
            ProjectTerms::RushRevisions
        } else if terms.starts_with("Rush") {
            ProjectTerms::Rush
        } else {
            ProjectTerms::Standard
        };

        CreatorData::Digital {
            experience_level,
            project_terms,
        }
    } else if choice.starts_with("Physical") {
        let (hours_default, material_default, shipping_default) = match current {
            CreatorData::Physical {
                hours_per_unit,
                material_cost,
                shipping_cost,
                ..
            } => (*hours_per_unit, *material_cost, *shipping_cost),
            _ => (0.0, 0.0, 0.0),
        };
        let material_cost = prompt_number("Material cost per unit:", material_default);
        let hours_per_unit = prompt_number("Hours per unit:", hours_default);
        let channel = Select::new(
            "Sales channel:",
            vec![
                "Wholesale       selling to stores, 2x your cost",
                "Direct/Retail   selling to customers, 3x your cost",
            ],
        )
        .prompt()
        .unwrap();
        let sales_channel = if channel.starts_with("Wholesale") {
            SalesChannel::Wholesale
        } else {
            SalesChannel::Retail
        };
        let shipping_cost = prompt_number("Shipping/handling cost per unit (optional):", shipping_default);

        CreatorData::Physical {
            hours_per_unit,
            material_cost,
            sales_channel,
            shipping_cost,
        }
    } else {
        content_creator_wizard(current)
    }
}

fn content_creator_wizard(current: &CreatorData) -> CreatorData {
    let hours_default = match current {
        CreatorData::Content {
            hours_per_content, ..
        } => *hours_per_content,
        _ => 0.0,
    };

    let platform = Select::new(
        "Primary platform:",
        vec![
            "YouTube",
            "Instagram",
            "TikTok",
            "Twitter/X",
            "LinkedIn",
            "Blog/Newsletter",
        ],
    )
    .prompt()
    .unwrap();

    let stats = match platform {
        "YouTube" => {
            let subscribers = prompt_count("Subscribers:", 0);
            let avg_views = prompt_count("Avg. views per video:", 0);
            let avg_watch_time_percent = prompt_number("Avg. watch time % :", 0.0);
            println!("\u{1f4a1} View-to-subscriber rate guide: Good 10-20% | Viral 50%+");
            PlatformStats::YouTube {
                subscribers,
                avg_views,
                avg_watch_time_percent,
            }
        }
        "Instagram" => {
            let followers = prompt_count("Followers:", 0);
            let avg_likes = prompt_count("Avg. likes per post:", 0);
            let avg_comments = prompt_count("Avg. comments per post:", 0);
            println!("\u{1f4a1} Engagement guide: Good 3-5% | Great 7-10% | Exceptional 10%+");
            PlatformStats::Instagram {
                followers,
                avg_likes,
                avg_comments,
            }
        }
        "TikTok" => {
            let followers = prompt_count("Followers:", 0);
            let avg_views = prompt_count("Avg. views per video:", 0);
            let avg_likes = prompt_count("Avg. likes per video:", 0);
            let avg_comments = prompt_count("Avg. comments per video:", 0);
            println!("\u{1f4a1} View-to-follower rate guide: Good 50-100% | Viral 200%+");
            PlatformStats::TikTok {
                followers,
                avg_views,
                avg_likes,
                avg_comments,
            }
        }
        "Twitter/X" => {
            let followers = prompt_count("Followers:", 0);
            let avg_impressions = prompt_count("Avg. impressions per post:", 0);
            let avg_engagements = prompt_count("Avg. engagements per post:", 0);
            println!("\u{1f4a1} Engagement guide: Good 1-3% | Great 5%+");
            PlatformStats::Twitter {
                followers,
                avg_impressions,
                avg_engagements,
            }
        }
        "LinkedIn" => {
            let followers = prompt_count("Followers:", 0);
            let avg_impressions = prompt_count("Avg. impressions per post:", 0);
            let avg_engagements = prompt_count("Avg. engagements per post:", 0);
            println!("\u{1f4a1} Engagement guide: Good 1-3% | Great 5%+");
            PlatformStats::LinkedIn {
                followers,
                avg_impressions,
                avg_engagements,
            }
        }
        _ => {
            let subscribers = prompt_count("Subscribers:", 0);
            let open_rate = prompt_number("Open rate %:", 0.0);
            let click_through_rate = prompt_number("Click-through rate %:", 0.0);
            println!("\u{1f4a1} Overall engagement guide: Good 1-2% | Great 3-4%+");
            PlatformStats::Blog {
                subscribers,
                open_rate,
                click_through_rate,
            }
        }
    };

    // Recompute and store in the same update so it can never go stale.
    let engagement_rate = stats.engagement_rate();
    println!("\u{2705} Engagement rate: {}%", engagement_rate);

    let hours_per_content = prompt_number("Estimated hours per post/video:", hours_default);

    let content_types: Vec<&str> = if matches!(stats, PlatformStats::Blog { .. }) {
        vec![
            "blog_post",
            "newsletter_issue",
            "article_series",
            "sponsored_article",
            "guest_post",
        ]
    } else {
        vec!["sponsored_post", "video", "short", "story", "series"]
    };
    let content_type = Select::new("Content type:", content_types)
        .prompt()
        .unwrap()
        .to_string();

    let rights = Select::new(
        "Usage rights:",
        vec![
            "Organic Only      posted to your own feed, 1x",
            "Paid Ad Usage     brand runs it as ads, 2.5x",
            "Exclusive Rights  full ownership transfer, 5x",
        ],
    )
    .prompt()
    .unwrap();
    let usage_rights = if rights.starts_with("Organic") {
        UsageRights::Organic
    } else if rights.starts_with("Paid") {
        UsageRights::PaidAd
    } else {
        UsageRights::Exclusive
    };

    CreatorData::Content {
        stats: Some(stats),
        hours_per_content,
        engagement_rate,
        content_type,
        usage_rights: Some(usage_rights),
    }
}

// ==========================================
// 3. Rate card display
// ==========================================

fn print_income_breakdown(session: &PricingSession, breakdown: &pricing::IncomeBreakdown) {
    let s = &session.income_settings;
    let mut table = Table::new();
    table.set_header(vec![Cell::new("Your Foundation"), Cell::new("Amount")]);
    table.add_row(vec![
        Cell::new("Annual Expenses"),
        Cell::new(money2(breakdown.annual_expenses)),
    ]);
    table.add_row(vec![
        Cell::new(format!("+ Taxes ({}%)", s.tax_rate)),
        Cell::new(money2(breakdown.tax_amount)),
    ]);
    table.add_row(vec![
        Cell::new(format!("+ Emergency Buffer ({}%)", s.emergency_buffer)),
        Cell::new(money2(breakdown.buffer_amount)),
    ]);
    table.add_row(vec![
        Cell::new(format!("+ Reinvestment ({}%)", s.reinvestment)),
        Cell::new(money2(breakdown.reinvestment_amount)),
    ]);
    table.add_row(vec![
        Cell::new("Target Annual Income").add_attribute(Attribute::Bold),
        Cell::new(money2(breakdown.target_income)).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Billable Hours Per Year"),
        Cell::new(format!("{:.0} hours", breakdown.billable_hours)),
    ]);
    println!("{table}");
}

fn print_rate_card(session: &PricingSession) {
    let card = RateCard::from_session(session);
    let breakdown = card.breakdown;

    println!("\n--- My Creator Pricing ---");
    print_income_breakdown(session, &breakdown);

    let mut rates = Table::new();
    rates.set_header(vec![Cell::new("Foundation Rate"), Cell::new("Per Hour")]);
    let base_cell = Cell::new(format!("{}/hr", money2(breakdown.base_hourly_rate)));
    let rec_cell = Cell::new(format!("{}/hr", money2(breakdown.recommended_hourly_rate)))
        .fg(Color::Rgb { r: 4, g: 120, b: 87 });
    rates.add_row(vec![Cell::new("Base (break-even)"), base_cell]);
    rates.add_row(vec![Cell::new("Recommended (+25%)"), rec_cell]);
    println!("{rates}");

    match &session.creator {
        CreatorData::Physical {
            hours_per_unit,
            material_cost,
            sales_channel,
            shipping_cost,
        } => {
            let unit = pricing::unit_pricing(
                &breakdown,
                card.tier,
                *hours_per_unit,
                *material_cost,
                *shipping_cost,
            );
            let mut table = Table::new();
            table.set_header(vec![Cell::new("Per Unit"), Cell::new("Amount")]);
            table.add_row(vec![
                Cell::new(format!(
                    "Labor ({}h \u{d7} {}/hr)",
                    hours_per_unit,
                    money2(unit.hourly_rate)
                )),
                Cell::new(money2(unit.labor_cost)),
            ]);
            table.add_row(vec![Cell::new("Materials"), Cell::new(money2(unit.material_cost))]);
            table.add_row(vec![
                Cell::new("Total Cost to Make").add_attribute(Attribute::Bold),
                Cell::new(money2(unit.total_cost)).add_attribute(Attribute::Bold),
            ]);
            let wholesale_selected = *sales_channel == SalesChannel::Wholesale;
            table.add_row(vec![
                Cell::new(if wholesale_selected {
                    "Wholesale Price (2x) \u{2190} selected"
                } else {
                    "Wholesale Price (2x)"
                }),
                Cell::new(money2(unit.wholesale_price)),
            ]);
            table.add_row(vec![
                Cell::new(if wholesale_selected {
                    "Direct/Retail Price (3x)"
                } else {
                    "Direct/Retail Price (3x) \u{2190} selected"
                }),
                Cell::new(money2(unit.retail_price)),
            ]);
            if unit.shipping_cost > 0.0 {
                table.add_row(vec![
                    Cell::new(format!("+ Shipping ({})", money2(unit.shipping_cost))),
                    Cell::new(format!(
                        "{} / {}",
                        money2(unit.wholesale_with_shipping),
                        money2(unit.retail_with_shipping)
                    )),
                ]);
            }
            println!("{table}");
        }
        creator => {
            if let Some(content) = pricing::content_piece_price(&breakdown, card.tier, creator) {
                let mut table = Table::new();
                table.set_header(vec![Cell::new("Content Pricing"), Cell::new("Value")]);
                if let CreatorData::Content {
                    stats: Some(stats),
                    engagement_rate,
                    hours_per_content,
                    ..
                } = creator
                {
                    table.add_row(vec![
                        Cell::new("Platform"),
                        Cell::new(stats.platform_name()),
                    ]);
                    table.add_row(vec![
                        Cell::new("Starting Rate"),
                        Cell::new(format!("{}/hr", money2(content.starting_rate))),
                    ]);
                    if content.audience_multiplier > 1.0 {
                        table.add_row(vec![
                            Cell::new(format!(
                                "Audience Size ({})",
                                pricing::audience_label(stats.audience_size())
                            )),
                            Cell::new(format!(
                                "+{:.0}%",
                                (content.audience_multiplier - 1.0) * 100.0
                            )),
                        ]);
                    }
                    if content.engagement_multiplier > 1.0 {
                        table.add_row(vec![
                            Cell::new(pricing::engagement_label(stats, *engagement_rate)),
                            Cell::new(format!(
                                "+{:.0}%",
                                (content.engagement_multiplier - 1.0) * 100.0
                            )),
                        ]);
                    }
                    table.add_row(vec![
                        Cell::new("Adjusted Rate"),
                        Cell::new(format!("{}/hr", money2(content.adjusted_rate))),
                    ]);
                    table.add_row(vec![
                        Cell::new(format!("Time Cost ({}hrs)", hours_per_content)),
                        Cell::new(money2(content.time_cost)),
                    ]);
                    table.add_row(vec![
                        Cell::new("Usage Rights"),
                        Cell::new(format!("\u{d7}{}", content.rights_multiplier)),
                    ]);
                    table.add_row(vec![
                        Cell::new("Your Floor Price").add_attribute(Attribute::Bold),
                        Cell::new(money2(content.floor_price)).add_attribute(Attribute::Bold),
                    ]);
                }
                println!("{table}");
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Service"),
                Cell::new("Base"),
                Cell::new(format!("Recommended (+{:.0}%)", card.total_markup)),
            ]);
            for service in &session.custom_services {
                let price = card.custom_price(service);
                table.add_row(vec![
                    Cell::new(format!(
                        "{} ({}h + {}h prep)",
                        service.name, service.delivery_hours, service.prep_hours
                    )),
                    Cell::new(money0(price.base)),
                    Cell::new(money0(price.recommended)).fg(Color::Rgb { r: 4, g: 120, b: 87 }),
                ]);
            }
            for option in pricing::display_services(creator) {
                let price = card.service_price(option.hours, option.id);
                table.add_row(vec![
                    Cell::new(format!("{} ({})", option.name, option.description)),
                    Cell::new(money0(price.base)),
                    Cell::new(money0(price.recommended)).fg(Color::Rgb { r: 4, g: 120, b: 87 }),
                ]);
            }
            println!("{table}");
            println!("\u{1f4a1} Never price below the base rate. That's working for free.");
        }
    }
}

// ==========================================
// 4. Contract wizard
// ==========================================

fn select_or_create_contract(root: &Path) -> Option<ContractData> {
    let mut options = vec![NEW_CONTRACT_OPT.to_string()];
    let files = store::list_contracts(root);
    for file in &files {
        if let Some(stem) = file.file_stem() {
            options.push(stem.to_string_lossy().to_string());
        }
    }

    let ans = Select::new("Select Contract (Type to Filter):", options).prompt();
    match ans {
        Ok(choice) => {
            if choice == NEW_CONTRACT_OPT {
                Some(ContractData::default())
            } else {
                let path = store::contracts_dir(root).join(format!("{}.json", choice));
                match store::load_contract(&path) {
                    Ok(data) => Some(data),
                    Err(e) => {
                        eprintln!("\u{274c} Failed to load contract: {}", e);
                        None
                    }
                }
            }
        }
        Err(_) => std::process::exit(0),
    }
}

fn wizard_address(
    label: &str,
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
    country: &str,
) -> (String, String, String, String, String) {
    println!("\n--- {} Address (leave street empty to skip) ---", label);
    let street = Text::new("Street:").with_default(address).prompt().unwrap();
    if street.trim().is_empty() {
        return (
            String::new(),
            city.to_string(),
            state.to_string(),
            zip.to_string(),
            country.to_string(),
        );
    }

    let zip_input = Text::new("Zip Code (leave empty to skip lookup):")
        .with_default(zip)
        .prompt()
        .unwrap();
    let (mut def_city, mut def_state) = (city.to_string(), state.to_string());

    if !zip_input.trim().is_empty() {
        if let Ok(results) = zipcodes::matching(&zip_input, None) {
            if let Some(info) = results.first() {
                println!("\u{1f680} Found: {}, {}", info.city, info.state);
                def_city = info.city.to_string();
                def_state = info.state.to_string();
            }
        }
    }

    let city = Text::new("City:").with_default(&def_city).prompt().unwrap();
    let state = Text::new("State:").with_default(&def_state).prompt().unwrap();
    let country = Text::new("Country:").with_default(country).prompt().unwrap();

    (street, city, state, zip_input, country)
}

fn prompt_date(label: &str, current: &str) -> String {
    let set = Confirm::new(&format!("Set {}?", label))
        .with_default(true)
        .prompt()
        .unwrap();
    if !set {
        return current.to_string();
    }
    let default = current
        .parse::<chrono::NaiveDate>()
        .unwrap_or_else(|_| Local::now().date_naive());
    let date = DateSelect::new(&format!("{}:", label))
        .with_default(default)
        .prompt()
        .unwrap();
    date.format("%Y-%m-%d").to_string()
}

fn run_contract_wizard(root: &Path) {
    let Some(mut data) = select_or_create_contract(root) else {
        return;
    };

    // Contract type
    let types = vec![
        "Digital Creator Services     design, UGC, branding, consulting",
        "Physical Product Creation    handmade goods, custom artwork, merch",
        "Content Creation             video, photography, writing, podcasts",
    ];
    let start = match data.contract_type {
        ContractType::Digital => 0,
        ContractType::Physical => 1,
        ContractType::Content => 2,
    };
    let choice = Select::new("Contract type:", types)
        .with_starting_cursor(start)
        .prompt()
        .unwrap();
    data.contract_type = if choice.starts_with("Physical") {
        ContractType::Physical
    } else if choice.starts_with("Content") {
        ContractType::Content
    } else {
        ContractType::Digital
    };
    println!("\u{2705} Contract type: {}", data.contract_type.label());

    // Project metadata
    data.project_name = prompt_text("Project name:", &data.project_name);
    data.start_date = prompt_date("project start date", &data.start_date);
    data.end_date = prompt_date("project end date", &data.end_date);

    // Creator identity, prefilled from creator.toml
    println!("\n--- Creator (you) ---");
    let profile = store::load_creator_profile(root).unwrap_or_default();
    let name_default = if data.creator_name.is_empty() {
        profile.name.clone()
    } else {
        data.creator_name.clone()
    };
    data.creator_name = prompt_text("Your name:", &name_default);
    let (street, city, state, zip, country) = wizard_address(
        "Creator",
        if data.creator_address.is_empty() {
            &profile.address
        } else {
            &data.creator_address
        },
        if data.creator_city.is_empty() { &profile.city } else { &data.creator_city },
        if data.creator_state.is_empty() { &profile.state } else { &data.creator_state },
        if data.creator_zip.is_empty() { &profile.zip } else { &data.creator_zip },
        if data.creator_country.is_empty() { &profile.country } else { &data.creator_country },
    );
    data.creator_address = street;
    data.creator_city = city;
    data.creator_state = state;
    data.creator_zip = zip;
    data.creator_country = country;
    data.creator_email = prompt_text(
        "Your email:",
        if data.creator_email.is_empty() { &profile.email } else { &data.creator_email },
    );
    data.creator_phone = prompt_text(
        "Your phone:",
        if data.creator_phone.is_empty() { &profile.phone } else { &data.creator_phone },
    );

    // Client identity
    println!("\n--- Client ---");
    data.client_name = prompt_text("Client name:", &data.client_name);
    let (street, city, state, zip, country) = wizard_address(
        "Client",
        &data.client_address,
        &data.client_city,
        &data.client_state,
        &data.client_zip,
        &data.client_country,
    );
    data.client_address = street;
    data.client_city = city;
    data.client_state = state;
    data.client_zip = zip;
    data.client_country = country;
    data.client_email = prompt_text("Client email:", &data.client_email);
    data.client_phone = prompt_text("Client phone:", &data.client_phone);

    // Section toggles
    let section_options = vec![
        "Scope of Work",
        "Deliverables",
        "Timeline & Milestones",
        "Payment & Terms",
        "Rights & Usage",
        "Revisions Policy",
        "Cancellation Policy",
        "Confidentiality",
        "Governing Law & Jurisdiction",
        "Liability & Warranties",
        "Dispute Resolution",
    ];
    let enabled = [
        data.sections.scope_of_work,
        data.sections.deliverables,
        data.sections.timeline,
        data.sections.payment,
        data.sections.rights,
        data.sections.revisions,
        data.sections.cancellation,
        data.sections.confidentiality,
        data.sections.jurisdiction,
        data.sections.liability,
        data.sections.dispute_resolution,
    ];
    let defaults: Vec<usize> = enabled
        .iter()
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect();
    let selected = MultiSelect::new("Sections to include:", section_options)
        .with_default(&defaults)
        .prompt()
        .unwrap();
    let has = |label: &str| selected.iter().any(|s| *s == label);
    data.sections.scope_of_work = has("Scope of Work");
    data.sections.deliverables = has("Deliverables");
    data.sections.timeline = has("Timeline & Milestones");
    data.sections.payment = has("Payment & Terms");
    data.sections.rights = has("Rights & Usage");
    data.sections.revisions = has("Revisions Policy");
    data.sections.cancellation = has("Cancellation Policy");
    data.sections.confidentiality = has("Confidentiality");
    data.sections.jurisdiction = has("Governing Law & Jurisdiction");
    data.sections.liability = has("Liability & Warranties");
    data.sections.dispute_resolution = has("Dispute Resolution");

    if data.sections.payment {
        payment_wizard(&mut data);
    }
    if data.sections.revisions {
        println!("\n--- Revisions Policy ---");
        let reset = Confirm::new("Reset revision policy to the template wording?")
            .with_default(false)
            .prompt()
            .unwrap();
        if reset {
            data.revisions_limit =
                template_text(ClauseField::RevisionsLimit, data.contract_type, &data);
            data.revisions_timeline =
                template_text(ClauseField::RevisionsTimeline, data.contract_type, &data);
        }
        data.revisions_limit = prompt_text("Revision limit:", &data.revisions_limit);
        data.revisions_timeline = prompt_text("Request window:", &data.revisions_timeline);
        data.revisions_definition =
            prompt_text("What counts as a revision (optional):", &data.revisions_definition);
        data.revisions_overflow =
            prompt_text("Additional revisions policy (optional):", &data.revisions_overflow);
    }
    if data.sections.cancellation {
        println!("\n--- Cancellation Policy ---");
        let notice_default = if data.cancellation_notice.trim().is_empty() {
            template_text(ClauseField::CancellationNotice, data.contract_type, &data)
        } else {
            data.cancellation_notice.clone()
        };
        data.cancellation_notice = prompt_text("Notice period:", &notice_default);
        let fee_default = if data.cancellation_fee.trim().is_empty() {
            template_text(ClauseField::CancellationFee, data.contract_type, &data)
        } else {
            data.cancellation_fee.clone()
        };
        data.cancellation_fee = prompt_text("Cancellation fee:", &fee_default);
        data.cancellation_additional =
            prompt_text("Additional terms (optional):", &data.cancellation_additional);
    }
    if data.sections.confidentiality {
        confidentiality_wizard(&mut data);
    }

    // Custom clauses
    println!("\n--- Custom Clauses (leave title empty to finish) ---");
    loop {
        let title = Text::new("Clause title:").prompt().unwrap();
        if title.trim().is_empty() {
            break;
        }
        let content = Text::new("Clause text:").prompt().unwrap();
        data.custom_clauses
            .push(crate::model::CustomClause::new(title.trim(), &content));
    }

    match store::save_contract(root, &data) {
        Ok(path) => println!("\u{2705} Contract saved: {:?}", path),
        Err(e) => {
            eprintln!("\u{274c} Failed to save contract: {}", e);
            return;
        }
    }

    let show = Confirm::new("Preview the contract now?")
        .with_default(true)
        .prompt()
        .unwrap();
    if show {
        let doc = assemble(&data);
        println!("{}", render::render_preview(&doc, &generated_on()));
    }
}

fn payment_wizard(data: &mut ContractData) {
    println!("\n--- Payment & Terms ---");
    let previous_currency = data.currency.clone();
    let start = CURRENCIES
        .iter()
        .position(|c| *c == data.currency)
        .unwrap_or(0);
    data.currency = Select::new("Currency:", CURRENCIES.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .unwrap()
        .to_string();
    if previous_currency != data.currency && !data.payment_terms.is_empty() {
        data.payment_terms = contract::update_payment_terms_currency(
            &data.payment_terms,
            &previous_currency,
            &data.currency,
        );
    }

    data.payment_amount = prompt_text("Total amount:", &data.payment_amount);
    data.payment_schedule = prompt_text(
        "Payment schedule (e.g., 50% upfront, 50% upon completion):",
        &data.payment_schedule,
    );

    let methods = vec![
        "Bank Transfer",
        "PayPal",
        "Venmo",
        "Zelle",
        "Crypto",
        "Other",
        "Skip",
    ];
    let method = Select::new("Payment method:", methods).prompt().unwrap();
    let details = &mut data.payment_details;
    data.payment_method = match method {
        "Bank Transfer" => {
            details.bank_name = prompt_text("Bank name:", &details.bank_name);
            details.account_name = prompt_text("Account name:", &details.account_name);
            details.account_number = prompt_text("Account number:", &details.account_number);
            details.routing_number = prompt_text("Routing number:", &details.routing_number);
            details.swift_bic = prompt_text("SWIFT/BIC (optional):", &details.swift_bic);
            "bank".to_string()
        }
        "PayPal" => {
            details.paypal_email = prompt_text("PayPal email:", &details.paypal_email);
            "paypal".to_string()
        }
        "Venmo" => {
            details.venmo_handle = prompt_text("Venmo handle:", &details.venmo_handle);
            "venmo".to_string()
        }
        "Zelle" => {
            details.zelle_info = prompt_text("Zelle email/phone:", &details.zelle_info);
            "zelle".to_string()
        }
        "Crypto" => {
            details.crypto_wallet = prompt_text("Wallet address:", &details.crypto_wallet);
            details.crypto_network = prompt_text("Network:", &details.crypto_network);
            "crypto".to_string()
        }
        "Other" => {
            details.other_details = prompt_text("Payment details:", &details.other_details);
            "other".to_string()
        }
        _ => String::new(),
    };
}

fn confidentiality_wizard(data: &mut ContractData) {
    println!("\n--- Confidentiality ---");
    let compose = Confirm::new("Compose a detailed clause from sub-clauses? (No = short standard clause)")
        .with_default(true)
        .prompt()
        .unwrap();

    if !compose {
        data.confidentiality_terms =
            template_text(ClauseField::ConfidentialityTerms, data.contract_type, data);
        return;
    }

    let options = vec![
        "Define confidential information",
        "Exclusions from confidentiality",
        "Portfolio & case study usage",
        "Social media & public announcements",
        "Permitted disclosures to team members",
        "Duration of confidentiality",
        "Return or destruction of materials",
        "Breach and remedies",
    ];
    let t = &data.confidentiality_subclauses;
    let flags = [
        t.define_confidential,
        t.exclusions,
        t.portfolio_rights,
        t.social_media_rights,
        t.team_disclosure,
        t.duration,
        t.return_materials,
        t.breach_remedies,
    ];
    let defaults: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect();
    let selected = MultiSelect::new("Sub-clauses to include:", options)
        .with_default(&defaults)
        .prompt()
        .unwrap();
    let has = |label: &str| selected.iter().any(|s| *s == label);
    data.confidentiality_subclauses.define_confidential = has("Define confidential information");
    data.confidentiality_subclauses.exclusions = has("Exclusions from confidentiality");
    data.confidentiality_subclauses.portfolio_rights = has("Portfolio & case study usage");
    data.confidentiality_subclauses.social_media_rights =
        has("Social media & public announcements");
    data.confidentiality_subclauses.team_disclosure =
        has("Permitted disclosures to team members");
    data.confidentiality_subclauses.duration = has("Duration of confidentiality");
    data.confidentiality_subclauses.return_materials = has("Return or destruction of materials");
    data.confidentiality_subclauses.breach_remedies = has("Breach and remedies");

    data.confidentiality_duration =
        prompt_text("Confidentiality duration:", &data.confidentiality_duration);
    data.portfolio_usage_delay =
        prompt_text("Portfolio usage begins:", &data.portfolio_usage_delay);

    // Regenerate in the same update as the toggles so the stored text can
    // never drift from them.
    data.confidentiality_terms = contract::confidentiality_text(data.contract_type, data);
}

// ==========================================
// 5. Preview / export / import
// ==========================================

fn pick_contract(root: &Path) -> Option<ContractData> {
    let files = store::list_contracts(root);
    if files.is_empty() {
        println!("\u{274c} No saved contracts. Run `creator-kit contract` first.");
        return None;
    }
    let options: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();
    let choice = Select::new("Select Contract:", options).prompt().ok()?;
    let path = store::contracts_dir(root).join(format!("{}.json", choice));
    match store::load_contract(&path) {
        Ok(data) => Some(data),
        Err(e) => {
            eprintln!("\u{274c} Failed to load contract: {}", e);
            None
        }
    }
}

fn preview_contract(root: &Path) {
    if let Some(data) = pick_contract(root) {
        let doc = assemble(&data);
        println!("{}", render::render_preview(&doc, &generated_on()));
    }
}

fn export_wizard(root: &Path) {
    let options = vec![
        "Pricing data (JSON)",
        "Pricing rate card (PDF)",
        "Contract (JSON)",
        "Contract (Markdown)",
        "Contract (PDF)",
    ];
    let choice = match Select::new("What do you want to export?", options).prompt() {
        Ok(c) => c,
        Err(_) => return,
    };

    match choice {
        "Pricing data (JSON)" => {
            let session = store::load_pricing(root);
            match store::export_pricing(root, &session) {
                Ok(path) => {
                    println!("\u{2705} Exported: {:?}", path);
                    open_and_reveal(&path);
                }
                Err(e) => eprintln!("\u{274c} Export failed: {}", e),
            }
        }
        "Pricing rate card (PDF)" => {
            let session = store::load_pricing(root);
            let context = render::rate_card_context(&session, &generated_on());
            let typ_path = match store::pricing_artifact_path(root, "typ") {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("\u{274c} Export failed: {}", e);
                    return;
                }
            };
            export_pdf_to(root, &typ_path, move |tera| {
                render::render_pricing_typst(tera, &context)
            });
        }
        "Contract (JSON)" => {
            if let Some(data) = pick_contract(root) {
                match store::export_contract_json(root, &data) {
                    Ok(path) => {
                        println!("\u{2705} Exported: {:?}", path);
                        open_and_reveal(&path);
                    }
                    Err(e) => eprintln!("\u{274c} Export failed: {}", e),
                }
            }
        }
        "Contract (Markdown)" => {
            if let Some(data) = pick_contract(root) {
                let doc = assemble(&data);
                let markdown = render::render_markdown(&doc, &generated_on());
                match store::contract_artifact_path(root, &data, "md")
                    .and_then(|path| fs::write(&path, markdown).map(|_| path))
                {
                    Ok(path) => {
                        println!("\u{2705} Exported: {:?}", path);
                        open_and_reveal(&path);
                    }
                    Err(e) => eprintln!("\u{274c} Export failed: {}", e),
                }
            }
        }
        "Contract (PDF)" => {
            if let Some(data) = pick_contract(root) {
                let doc = assemble(&data);
                let stamp = generated_on();
                let typ_path = match store::contract_artifact_path(root, &data, "typ") {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("\u{274c} Export failed: {}", e);
                        return;
                    }
                };
                export_pdf_to(root, &typ_path, move |tera| {
                    render::render_contract_typst(tera, &doc, &stamp)
                });
            }
        }
        _ => {}
    }
}

fn export_pdf_to<F>(root: &Path, typ_path: &Path, render_fn: F)
where
    F: FnOnce(&tera::Tera) -> Result<String, tera::Error>,
{
    if !render::typst_available() {
        println!("\u{274c} Error: 'typst' is not installed. Please install it (brew install typst).");
        return;
    }

    let tera = match render::load_tera(&store::templates_dir(root)) {
        Ok(t) => t,
        Err(e) => {
            println!("\u{274c} Template Error: {}", e);
            return;
        }
    };

    let rendered = match render_fn(&tera) {
        Ok(r) => r,
        Err(e) => {
            println!("\u{274c} Template Error: {}", e);
            return;
        }
    };

    if let Err(e) = fs::write(typ_path, rendered) {
        eprintln!("\u{274c} Failed to write .typ file: {}", e);
        return;
    }
    let pdf_path = typ_path.with_extension("pdf");

    println!("\n\u{1f528} Compiling PDF...");
    match render::compile_typst(typ_path, &pdf_path) {
        Ok(true) => {
            println!("\u{2705} PDF Generated: {:?}", pdf_path);
            open_and_reveal(&pdf_path);
        }
        _ => println!("\u{274c} Compilation failed."),
    }
}

fn import_file(root: &Path, file: &Path) {
    let content = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("\u{274c} Error reading file: {}", e);
            return;
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(_) => {
            eprintln!("\u{274c} Error reading file. Please ensure it's a valid JSON file.");
            return;
        }
    };

    if value.get("contractType").is_some() {
        match store::import_contract(file) {
            Ok(data) => {
                match store::save_contract(root, &data) {
                    Ok(path) => println!("\u{2705} Contract data imported successfully: {:?}", path),
                    Err(e) => eprintln!("\u{274c} Failed to save imported contract: {}", e),
                }
            }
            Err(e) => eprintln!("\u{274c} Invalid file format: {}", e),
        }
    } else {
        match store::import_pricing(file) {
            Ok(session) => match store::save_pricing(root, &session) {
                Ok(()) => println!("\u{2705} Data imported successfully!"),
                Err(e) => eprintln!("\u{274c} Failed to save imported data: {}", e),
            },
            Err(e) => eprintln!(
                "\u{274c} Invalid file format ({}). Please upload a valid creator-kit data file.",
                e
            ),
        }
    }
}

// ==========================================
// 6. Config & utilities
// ==========================================

fn setup_config_wizard() -> AppSettings {
    println!("\n\u{2699}\u{fe0f}  --- Configuration Setup ---");
    let current = store::load_settings();
    let default_val = current
        .map(|s| s.data_root)
        .unwrap_or_else(|| "~/Documents/CreatorKit".to_string());

    println!("\u{1f4c2} Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Root Data Directory")
        .pick_folder();

    let new_root = if let Some(path) = picked_path {
        path.to_string_lossy().to_string()
    } else {
        println!("\u{274c} No folder selected. Falling back to manual input.");
        Text::new("Enter Root Data Directory:")
            .with_default(&default_val)
            .prompt()
            .unwrap()
    };

    let settings = AppSettings { data_root: new_root };
    if let Err(e) = store::save_settings(&settings) {
        eprintln!("\u{274c} Failed to save settings: {}", e);
    } else {
        println!("\u{2705} Settings saved.");
    }
    settings
}

fn open_output_folder(root: &Path) {
    let target = store::output_dir(root);
    fs::create_dir_all(&target).ok();
    println!("\u{1f680} Opening: {:?}", target);

    #[cfg(target_os = "macos")]
    Command::new("open").arg(&target).spawn().ok();
    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(&target).spawn().ok();
    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(&target).spawn().ok();
}

// Helper: Open file and reveal in Finder/Explorer
fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer")
        .arg(format!("/select,{}", path.to_string_lossy()))
        .spawn()
        .ok();

    #[cfg(target_os = "linux")]
    if let Some(parent) = path.parent() {
        Command::new("xdg-open").arg(parent).spawn().ok();
    }
}
