//! Renderers over the assembled contract document and the computed rate
//! card. The terminal preview, the Markdown export and the Typst source all
//! walk the same `Document`, so the textual content is identical across the
//! three outputs; only the markup syntax differs.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::contract::{Block, Document, Party};
use crate::model::{CreatorData, PricingSession, RateTier};
use crate::pricing::{self, RateCard};

// Embedded at compile time; materialized into the data root on first use so
// users can restyle the documents.
pub const CONTRACT_TEMPLATE: &str = include_str!("../templates/contract.tera");
pub const PRICING_TEMPLATE: &str = include_str!("../templates/pricing.tera");

// ==========================================
// 1. Formatting helpers
// ==========================================

fn group_thousands(integer: &str) -> String {
    let mut out = String::new();
    let digits: Vec<char> = integer.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}

/// "1234567.5" -> "1,234,567.50"
pub fn fmt_money2(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (integer, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    format!("{}.{}", group_thousands(integer), fraction)
}

/// Whole-unit money, the way the service cards show prices.
pub fn fmt_money0(value: f64) -> String {
    group_thousands(&format!("{:.0}", value))
}

// ==========================================
// 2. Terminal preview
// ==========================================

fn push_party(out: &mut String, party: &Party) {
    out.push_str(party.heading);
    out.push('\n');
    for line in &party.lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

pub fn render_preview(doc: &Document, generated_on: &str) -> String {
    let mut out = String::new();
    out.push_str(&doc.title);
    out.push_str("\n\n");
    out.push_str(&format!("Project: {}\n", doc.project_name));
    out.push_str(&format!("Start Date: {}\n", doc.start_date));
    out.push_str(&format!("End Date: {}\n\n", doc.end_date));

    push_party(&mut out, &doc.creator);
    push_party(&mut out, &doc.client);

    for section in &doc.sections {
        out.push_str(&section.heading.to_uppercase());
        out.push('\n');
        for block in &section.blocks {
            match block {
                Block::Subheading { text } => {
                    out.push('\n');
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Labeled { label, text } => {
                    out.push_str(&format!("{}: {}\n", label, text));
                }
                Block::Text { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }

    out.push_str("SIGNATURES\n");
    out.push_str(&doc.signature_ack);
    out.push_str("\n\n");
    for (role, name) in [("Creator", &doc.creator_name), ("Client", &doc.client_name)] {
        out.push_str(&format!("{}:\n", role));
        out.push_str("Signature: ____________________________\n");
        out.push_str(&format!("Name: {}\n", name));
        out.push_str("Date: ____________________________\n\n");
    }
    out.push_str(&format!("Generated on {}\n", generated_on));
    out
}

// ==========================================
// 3. Markdown export
// ==========================================

pub fn render_markdown(doc: &Document, generated_on: &str) -> String {
    let mut md = String::new();
    md.push_str("# Service Agreement\n\n");
    md.push_str(&format!(
        "**Project:** {}\n**Start Date:** {}\n**End Date:** {}\n\n",
        doc.project_name, doc.start_date, doc.end_date
    ));

    for party in [&doc.creator, &doc.client] {
        md.push_str(&format!("**{}**\n\n", party.heading));
        for line in &party.lines {
            md.push_str(line);
            md.push('\n');
        }
        md.push('\n');
    }

    for section in &doc.sections {
        md.push_str(&format!("## {}\n\n", section.heading));
        for block in &section.blocks {
            match block {
                Block::Subheading { text } => {
                    md.push_str(&format!("### {}\n\n", text));
                }
                Block::Labeled { label, text } => {
                    if text.contains('\n') {
                        md.push_str(&format!("**{}:**\n\n{}\n\n", label, text));
                    } else {
                        md.push_str(&format!("**{}:** {}\n\n", label, text));
                    }
                }
                Block::Text { text } => {
                    md.push_str(text);
                    md.push_str("\n\n");
                }
            }
        }
    }

    md.push_str("## Signatures\n\n");
    md.push_str(&doc.signature_ack);
    md.push_str("\n\n");
    for (role, name) in [("Creator", &doc.creator_name), ("Client", &doc.client_name)] {
        md.push_str(&format!(
            "**{}:**\n\nSignature: ____________________________\n\nName: {}\n\nDate: ____________________________\n\n",
            role, name
        ));
    }
    md.push_str(&format!("*Generated on {}*\n", generated_on));
    md
}

// ==========================================
// 4. Typst source via Tera
// ==========================================

/// Escapes Typst markup characters so clause text renders verbatim.
fn typst_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("typst filter expects a string"))?;
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '#' | '$' | '[' | ']' | '*' | '_' | '@' | '<' | '>' | '`' | '~' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    Ok(Value::String(escaped))
}

/// Tera instance over the embedded templates only; used by tests and as the
/// fallback when no template directory exists yet.
pub fn embedded_tera() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("contract.tera", CONTRACT_TEMPLATE)?;
    tera.add_raw_template("pricing.tera", PRICING_TEMPLATE)?;
    tera.register_filter("typst", typst_filter);
    Ok(tera)
}

/// Materializes the default templates into `template_dir` (first run only)
/// and loads every `*.tera` found there, so user edits win over the
/// embedded defaults.
pub fn load_tera(template_dir: &Path) -> Result<Tera, tera::Error> {
    if !template_dir.exists() {
        fs::create_dir_all(template_dir).map_err(|e| tera::Error::msg(e.to_string()))?;
    }
    for (name, contents) in [
        ("contract.tera", CONTRACT_TEMPLATE),
        ("pricing.tera", PRICING_TEMPLATE),
    ] {
        let path = template_dir.join(name);
        if !path.exists() {
            fs::write(&path, contents).map_err(|e| tera::Error::msg(e.to_string()))?;
        }
    }
    let glob = template_dir.join("*.tera");
    let mut tera = Tera::new(glob.to_str().unwrap_or("*.tera"))?;
    tera.register_filter("typst", typst_filter);
    Ok(tera)
}

pub fn render_contract_typst(
    tera: &Tera,
    doc: &Document,
    generated_on: &str,
) -> Result<String, tera::Error> {
    let mut context = Context::from_serialize(doc)?;
    context.insert("generated_on", generated_on);
    tera.render("contract.tera", &context)
}

// ==========================================
// 5. Rate card context (pricing PDF)
// ==========================================

#[derive(Debug, Serialize)]
pub struct ServiceRow {
    pub name: String,
    pub description: String,
    pub base: String,
    pub recommended: String,
}

#[derive(Debug, Serialize)]
pub struct UnitBreakdown {
    pub hourly_rate: String,
    pub hours_per_unit: f64,
    pub labor_cost: String,
    pub material_cost: String,
    pub total_cost: String,
    pub wholesale_price: String,
    pub retail_price: String,
    pub wholesale_with_shipping: String,
    pub retail_with_shipping: String,
    pub shipping_cost: String,
    pub has_shipping: bool,
}

/// Everything the pricing Typst template interpolates, pre-formatted.
#[derive(Debug, Serialize)]
pub struct RateCardContext {
    pub generated_on: String,
    pub creator_type: String,
    pub monthly_expenses: String,
    pub annual_expenses: String,
    pub target_income: String,
    pub billable_hours: String,
    pub base_rate: String,
    pub recommended_rate: String,
    pub tier: String,
    pub total_markup: String,
    pub services: Vec<ServiceRow>,
    pub unit: Option<UnitBreakdown>,
}

pub fn rate_card_context(session: &PricingSession, generated_on: &str) -> RateCardContext {
    let card = RateCard::from_session(session);
    let breakdown = card.breakdown;

    let mut services = Vec::new();
    let mut unit = None;

    match &session.creator {
        CreatorData::Physical {
            hours_per_unit,
            material_cost,
            shipping_cost,
            ..
        } => {
            let pricing = pricing::unit_pricing(
                &breakdown,
                card.tier,
                *hours_per_unit,
                *material_cost,
                *shipping_cost,
            );
            unit = Some(UnitBreakdown {
                hourly_rate: fmt_money2(pricing.hourly_rate),
                hours_per_unit: *hours_per_unit,
                labor_cost: fmt_money2(pricing.labor_cost),
                material_cost: fmt_money2(pricing.material_cost),
                total_cost: fmt_money2(pricing.total_cost),
                wholesale_price: fmt_money2(pricing.wholesale_price),
                retail_price: fmt_money2(pricing.retail_price),
                wholesale_with_shipping: fmt_money2(pricing.wholesale_with_shipping),
                retail_with_shipping: fmt_money2(pricing.retail_with_shipping),
                shipping_cost: fmt_money2(pricing.shipping_cost),
                has_shipping: pricing.shipping_cost > 0.0,
            });
        }
        creator => {
            for service in &session.custom_services {
                let price = card.custom_price(service);
                services.push(ServiceRow {
                    name: service.name.clone(),
                    description: "Custom service".to_string(),
                    base: fmt_money0(price.base),
                    recommended: fmt_money0(price.recommended),
                });
            }
            for option in pricing::display_services(creator) {
                let price = card.service_price(option.hours, option.id);
                services.push(ServiceRow {
                    name: option.name.to_string(),
                    description: option.description.to_string(),
                    base: fmt_money0(price.base),
                    recommended: fmt_money0(price.recommended),
                });
            }
        }
    }

    RateCardContext {
        generated_on: generated_on.to_string(),
        creator_type: session.creator.type_name().to_string(),
        monthly_expenses: fmt_money2(pricing::monthly_total(&session.expenses)),
        annual_expenses: fmt_money2(breakdown.annual_expenses),
        target_income: fmt_money2(breakdown.target_income),
        billable_hours: format!("{:.0}", breakdown.billable_hours),
        base_rate: fmt_money2(breakdown.base_hourly_rate),
        recommended_rate: fmt_money2(breakdown.recommended_hourly_rate),
        tier: match card.tier {
            RateTier::Base => "Base".to_string(),
            RateTier::Recommended => "Recommended".to_string(),
        },
        total_markup: format!("{:.0}", card.total_markup),
        services,
        unit,
    }
}

pub fn render_pricing_typst(
    tera: &Tera,
    context: &RateCardContext,
) -> Result<String, tera::Error> {
    tera.render("pricing.tera", &Context::from_serialize(context)?)
}

// ==========================================
// 6. Typst compilation
// ==========================================

pub fn typst_available() -> bool {
    Command::new("typst").arg("--version").output().is_ok()
}

/// Compile a rendered `.typ` file to PDF. Returns Ok(true) on success,
/// Ok(false) when the compiler exited nonzero.
pub fn compile_typst(typ_path: &Path, pdf_path: &Path) -> std::io::Result<bool> {
    let status = Command::new("typst")
        .arg("compile")
        .arg(typ_path)
        .arg(pdf_path)
        .status()?;
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::assemble;
    use crate::model::{ContractData, ContractType, Expense};

    fn sample_doc() -> Document {
        let data = ContractData {
            contract_type: ContractType::Digital,
            creator_name: "Jordan Blake".to_string(),
            client_name: "Acme Studio".to_string(),
            project_name: "Brand Refresh".to_string(),
            creator_email: "jordan@example.com".to_string(),
            client_email: "legal@acme.example".to_string(),
            sections: crate::model::ContractSections {
                scope_of_work: true,
                payment: true,
                revisions: true,
                liability: true,
                ..crate::model::ContractSections::default()
            },
            payment_amount: "5000".to_string(),
            payment_schedule: "50% upfront, 50% on delivery".to_string(),
            ..ContractData::default()
        };
        assemble(&data)
    }

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(fmt_money2(0.0), "0.00");
        assert_eq!(fmt_money2(1234567.5), "1,234,567.50");
        assert_eq!(fmt_money0(985.4), "985");
        assert_eq!(fmt_money0(12850.0), "12,850");
    }

    #[test]
    fn markdown_layout_matches_expected_shape() {
        let doc = sample_doc();
        let md = render_markdown(&doc, "2/3/2026");
        assert!(md.starts_with("# Service Agreement\n\n**Project:** Brand Refresh\n"));
        assert!(md.contains("**CREATOR**\n\nJordan Blake\n"));
        assert!(md.contains("## Scope of Work\n\n"));
        assert!(md.contains("**Amount:** $ 5000\n\n"));
        assert!(md.contains("**Schedule:** 50% upfront, 50% on delivery\n\n"));
        assert!(md.contains("### Independent Contractor\n\n"));
        assert!(md.contains("## General Provisions\n\n### Entire Agreement\n\n"));
        assert!(md.contains("## Signatures\n\n"));
        assert!(md.contains("Name: Jordan Blake\n"));
        assert!(md.trim_end().ends_with("*Generated on 2/3/2026*"));
    }

    #[test]
    fn preview_uses_uppercase_headings() {
        let doc = sample_doc();
        let preview = render_preview(&doc, "2/3/2026");
        assert!(preview.starts_with("SERVICE AGREEMENT\n"));
        assert!(preview.contains("SCOPE OF WORK\n"));
        assert!(preview.contains("PAYMENT & TERMS\n"));
        assert!(preview.contains("Amount: $ 5000\n"));
        assert!(preview.contains("GENERAL PROVISIONS\n"));
        assert!(preview.contains("SIGNATURES\n"));
    }

    #[test]
    fn typst_filter_escapes_markup() {
        let tera = embedded_tera().unwrap();
        let doc = sample_doc();
        let typ = render_contract_typst(&tera, &doc, "2/3/2026").unwrap();
        // Placeholders like [NUMBER] must arrive escaped, not as Typst
        // content blocks.
        assert!(typ.contains("\\[NUMBER\\]"));
        assert!(typ.contains("jordan\\@example.com"));
    }

    #[test]
    fn three_renderers_carry_the_same_sections_and_text() {
        let doc = sample_doc();
        let preview = render_preview(&doc, "2/3/2026");
        let md = render_markdown(&doc, "2/3/2026");
        let tera = embedded_tera().unwrap();
        let typ = render_contract_typst(&tera, &doc, "2/3/2026").unwrap();
        let typ_plain = typ.replace('\\', "");

        for section in &doc.sections {
            assert!(
                preview.contains(&section.heading.to_uppercase()),
                "preview missing {}",
                section.heading
            );
            assert!(
                md.contains(&format!("## {}", section.heading)),
                "markdown missing {}",
                section.heading
            );
            assert!(
                typ_plain.contains(&section.heading.to_uppercase()),
                "typst missing {}",
                section.heading
            );
            for block in &section.blocks {
                let probe: Option<&str> = match block {
                    Block::Text { text } => text.lines().next(),
                    Block::Labeled { text, .. } => text.lines().next(),
                    Block::Subheading { text } => Some(text.as_str()),
                };
                if let Some(line) = probe {
                    assert!(preview.contains(line), "preview missing line: {}", line);
                    assert!(md.contains(line), "markdown missing line: {}", line);
                    assert!(
                        typ_plain.contains(line),
                        "typst missing line: {}",
                        line
                    );
                }
            }
        }
    }

    #[test]
    fn rate_card_context_for_digital_creator() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 2_000.0)];
        let ctx = rate_card_context(&session, "2/3/2026");
        assert_eq!(ctx.creator_type, "digital");
        assert_eq!(ctx.monthly_expenses, "2,000.00");
        assert_eq!(ctx.annual_expenses, "24,000.00");
        assert_eq!(ctx.target_income, "38,400.00");
        assert_eq!(ctx.billable_hours, "576");
        // 38,400 / 576 = 66.67 base
        assert_eq!(ctx.base_rate, "66.67");
        assert_eq!(ctx.services.len(), 6);
        assert!(ctx.unit.is_none());

        let pricing_typ =
            render_pricing_typst(&embedded_tera().unwrap(), &ctx).unwrap();
        assert!(pricing_typ.contains("My Creator Pricing"));
        assert!(pricing_typ.contains("Hourly Rate"));
    }

    #[test]
    fn rate_card_context_for_physical_creator() {
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Studio", 1_000.0)];
        session.creator = CreatorData::Physical {
            hours_per_unit: 2.5,
            material_cost: 25.0,
            sales_channel: crate::model::SalesChannel::Wholesale,
            shipping_cost: 12.0,
        };
        let ctx = rate_card_context(&session, "2/3/2026");
        let unit = ctx.unit.as_ref().expect("physical creators get a unit breakdown");
        assert!(unit.has_shipping);
        assert!(ctx.services.is_empty());

        let pricing_typ =
            render_pricing_typst(&embedded_tera().unwrap(), &ctx).unwrap();
        assert!(pricing_typ.contains("My Product Pricing"));
        assert!(pricing_typ.contains("Wholesale Price"));
    }
}
