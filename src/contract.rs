//! The contract engine: a template library of boilerplate clause text per
//! contract type, the confidentiality composer, and the assembler that walks
//! the enabled sections into a renderer-neutral document.
//!
//! Clause resolution is always `override-or-template`: a blank free-text
//! field means the template default for the active contract type is
//! substituted at render time, and unset interpolation values fall back to
//! bracketed placeholders ("[CLIENT_NAME]") so the finished document flags
//! what still needs attention.

use serde::Serialize;

use crate::model::{ContractData, ContractType, PaymentDetails};

// ==========================================
// 1. Currency & payment details
// ==========================================

pub fn currency_symbol(currency: &str) -> String {
    match currency {
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "GBP" => "\u{a3}".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        "JPY" | "CNY" => "\u{a5}".to_string(),
        "INR" => "\u{20b9}".to_string(),
        "BRL" => "R$".to_string(),
        "MXN" => "MX$".to_string(),
        "USDT" | "USDC" | "DAI" | "BUSD" | "EURC" | "USDGLO" => currency.to_string(),
        other => format!("{} ", other),
    }
}

/// Wire details for the chosen payment method, with bracketed placeholders
/// for anything the user left blank.
pub fn payment_details_text(method: &str, details: &PaymentDetails) -> String {
    fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
        if value.trim().is_empty() {
            placeholder
        } else {
            value
        }
    }

    match method {
        "bank" => {
            let mut text = format!(
                "Bank Name: {}\nAccount Name: {}\nAccount Number: {}\nRouting Number: {}",
                or_placeholder(&details.bank_name, "[BANK_NAME]"),
                or_placeholder(&details.account_name, "[ACCOUNT_NAME]"),
                or_placeholder(&details.account_number, "[ACCOUNT_NUMBER]"),
                or_placeholder(&details.routing_number, "[ROUTING_NUMBER]"),
            );
            if !details.swift_bic.trim().is_empty() {
                text.push_str(&format!("\nSWIFT/BIC: {}", details.swift_bic));
            }
            text
        }
        "paypal" => format!(
            "PayPal Email: {}",
            or_placeholder(&details.paypal_email, "[PAYPAL_EMAIL]")
        ),
        "venmo" => format!(
            "Venmo Handle: {}",
            or_placeholder(&details.venmo_handle, "[VENMO_HANDLE]")
        ),
        "zelle" => format!(
            "Zelle: {}",
            or_placeholder(&details.zelle_info, "[ZELLE_INFO]")
        ),
        "crypto" => format!(
            "Wallet Address: {}\nNetwork: {}",
            or_placeholder(&details.crypto_wallet, "[WALLET_ADDRESS]"),
            or_placeholder(&details.crypto_network, "[NETWORK]"),
        ),
        "other" => or_placeholder(&details.other_details, "[PAYMENT_DETAILS]").to_string(),
        _ => String::new(),
    }
}

// ==========================================
// 2. Template library
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseField {
    ScopeOfWork,
    Deliverables,
    Timeline,
    PaymentTerms,
    RightsUsage,
    RevisionsLimit,
    RevisionsTimeline,
    CancellationNotice,
    CancellationFee,
    ConfidentialityTerms,
    GoverningLaw,
    JurisdictionVenue,
    IndependentContractor,
    LiabilityLimit,
    Indemnification,
    Warranty,
    DisputeResolution,
    ForceMajeure,
}

/// Interpolation values with their placeholder fallbacks applied once.
struct Ctx {
    creator: String,
    client: String,
    project: String,
    amount: String,
    start_date: String,
    end_date: String,
    revisions_limit: String,
    revisions_timeline: String,
    city: String,
    state: String,
    country: String,
    symbol: String,
}

impl Ctx {
    fn from(data: &ContractData) -> Ctx {
        fn or(value: &str, placeholder: &str) -> String {
            if value.trim().is_empty() {
                placeholder.to_string()
            } else {
                value.to_string()
            }
        }
        Ctx {
            creator: or(&data.creator_name, "[YOUR_NAME]"),
            client: or(&data.client_name, "[CLIENT_NAME]"),
            project: or(&data.project_name, "[PROJECT_NAME]"),
            amount: or(&data.payment_amount, "[AMOUNT]"),
            start_date: or(&data.start_date, "[START_DATE]"),
            end_date: or(&data.end_date, "[END_DATE]"),
            revisions_limit: or(&data.revisions_limit, "[NUMBER]"),
            revisions_timeline: or(&data.revisions_timeline, "[TIMEFRAME]"),
            city: data.creator_city.trim().to_string(),
            state: data.creator_state.trim().to_string(),
            country: data.creator_country.trim().to_string(),
            symbol: currency_symbol(if data.currency.is_empty() {
                "USD"
            } else {
                &data.currency
            }),
        }
    }

    fn city_or_placeholder(&self) -> &str {
        if self.city.is_empty() { "[YOUR_CITY]" } else { &self.city }
    }

    fn state_or_placeholder(&self) -> &str {
        if self.state.is_empty() { "[YOUR_STATE]" } else { &self.state }
    }
}

/// The boilerplate clause for one `(field, contract type)` pair, with
/// context values substituted. Purely a lookup; no state.
pub fn template_text(field: ClauseField, contract_type: ContractType, data: &ContractData) -> String {
    let c = Ctx::from(data);
    match field {
        ClauseField::ScopeOfWork => scope_of_work(contract_type, &c),
        ClauseField::Deliverables => deliverables(contract_type, &c),
        ClauseField::Timeline => timeline(contract_type, &c),
        ClauseField::PaymentTerms => payment_terms(contract_type, &c, data),
        ClauseField::RightsUsage => rights_usage(contract_type, &c),
        ClauseField::RevisionsLimit => revisions_limit(contract_type, &c),
        ClauseField::RevisionsTimeline => revisions_timeline(contract_type, &c),
        ClauseField::CancellationNotice => cancellation_notice(contract_type),
        ClauseField::CancellationFee => cancellation_fee(contract_type),
        ClauseField::ConfidentialityTerms => confidentiality_default(contract_type, &c),
        ClauseField::GoverningLaw => governing_law(&c),
        ClauseField::JurisdictionVenue => jurisdiction_venue(&c),
        ClauseField::IndependentContractor => independent_contractor(contract_type, &c),
        ClauseField::LiabilityLimit => liability_limit(contract_type, &c),
        ClauseField::Indemnification => indemnification(contract_type, &c),
        ClauseField::Warranty => warranty(contract_type, &c),
        ClauseField::DisputeResolution => dispute_resolution(contract_type, &c),
        ClauseField::ForceMajeure => force_majeure(contract_type),
    }
}

fn scope_of_work(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "{creator} (\"Creator\") agrees to provide digital creator services to {client} (\"Client\") for {project}. This includes but is not limited to:\n\n\
             \u{2022} Consulting and strategic guidance for the project\n\
             \u{2022} Creation of digital assets as outlined in the Deliverables section\n\
             \u{2022} Communication and collaboration throughout the project timeline\n\
             \u{2022} Professional execution according to industry standards\n\n\
             The Creator will work independently and maintain creative control over the execution of deliverables, while incorporating Client feedback as outlined in the Revisions Policy.\n\n\
             Any work outside the scope defined in this agreement will require a separate agreement and additional compensation.",
            creator = c.creator,
            client = c.client,
            project = c.project,
        ),
        ContractType::Physical => format!(
            "{creator} (\"Creator\") agrees to create and deliver physical product(s) for {client} (\"Client\") as part of {project}. This includes:\n\n\
             \u{2022} Design and creation of physical items as specified in Deliverables\n\
             \u{2022} Sourcing of materials (unless otherwise specified)\n\
             \u{2022} Quality control and craftsmanship meeting professional standards\n\
             \u{2022} Packaging and preparation for delivery/shipment\n\n\
             The Creator maintains full creative control over the production process while incorporating Client specifications and feedback as outlined in the Revisions Policy.\n\n\
             Any additional items or modifications beyond the original scope require separate agreement and additional fees.",
            creator = c.creator,
            client = c.client,
            project = c.project,
        ),
        ContractType::Content => format!(
            "{creator} (\"Creator\") agrees to create original content for {client} (\"Client\") as part of {project}. This includes:\n\n\
             \u{2022} Planning and conceptualizing content according to Client brief\n\
             \u{2022} Production of content including [filming/photography/writing]\n\
             \u{2022} Editing and post-production work\n\
             \u{2022} Delivery of final content files in specified formats\n\
             \u{2022} [NUMBER] rounds of revisions as outlined below\n\n\
             The Creator maintains editorial and creative control over content creation while collaborating with Client on overall direction and messaging.\n\n\
             Additional content pieces beyond the agreed scope will require separate agreement and compensation.",
            creator = c.creator,
            client = c.client,
            project = c.project,
        ),
    }
}

fn deliverables(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "The Creator will provide the following deliverables to the Client upon completion of {project}:\n\n\
             \u{2022} [List specific deliverables, e.g., \"3 Instagram posts with captions\"]\n\
             \u{2022} [e.g., \"1 brand strategy document (PDF format)\"]\n\
             \u{2022} [e.g., \"2 rounds of design concepts\"]\n\
             \u{2022} [e.g., \"Final files in high-resolution format\"]\n\n\
             All deliverables will be provided in the format(s) specified and delivered via [delivery method, e.g., email, Google Drive, Dropbox]. The Client is responsible for downloading and securing all files within 30 days of delivery.",
            project = c.project,
        ),
        ContractType::Physical => "The Creator will create and deliver the following physical items:\n\n\
             \u{2022} [e.g., \"1 handmade ceramic vase, approximately 12 inches tall\"]\n\
             \u{2022} [e.g., \"3 custom embroidered patches, 4x4 inches\"]\n\
             \u{2022} [e.g., \"Custom artwork on 16x20 canvas\"]\n\n\
             Specifications:\n\
             \u{2022} Materials: [e.g., \"Premium cotton, ceramic, etc.\"]\n\
             \u{2022} Colors: [e.g., \"As per reference images provided\"]\n\
             \u{2022} Quantity: [NUMBER] units\n\
             \u{2022} Packaging: [e.g., \"Gift wrapped / Standard shipping box\"]\n\n\
             Shipping: [e.g., \"Domestic shipping included / International shipping additional\"] via [carrier]. Client is responsible for any customs fees or import duties."
            .to_string(),
        ContractType::Content => "The Creator will produce and deliver the following content:\n\n\
             \u{2022} [e.g., \"1 YouTube video, 8-12 minutes long, fully edited\"]\n\
             \u{2022} [e.g., \"10 high-resolution photos, edited and color-graded\"]\n\
             \u{2022} [e.g., \"5 blog posts, 1000-1500 words each, SEO optimized\"]\n\n\
             Format specifications:\n\
             \u{2022} Video: [e.g., \"1080p MP4, H.264 codec\"]\n\
             \u{2022} Photos: [e.g., \"JPEG, minimum 3000px wide\"]\n\
             \u{2022} Writing: [e.g., \"Google Docs or Word format\"]\n\n\
             Delivery: Files will be provided via [e.g., Google Drive, Dropbox, WeTransfer] by the agreed completion date. Raw footage/files [included/not included]."
            .to_string(),
    }
}

fn timeline(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "Project timeline for {project}:\n\n\
             \u{2022} Project Start Date: {start}\n\
             \u{2022} Project End Date: {end}\n\n\
             Milestones:\n\
             \u{2022} Initial concepts/drafts: [DATE]\n\
             \u{2022} Client review period: [NUMBER] business days after delivery\n\
             \u{2022} Revisions submitted: [DATE]\n\
             \u{2022} Final delivery: [DATE]\n\n\
             Timeline is contingent upon Client providing necessary materials, feedback, and approvals within agreed timeframes. Delays in Client response may result in adjusted delivery dates.",
            project = c.project,
            start = c.start_date,
            end = c.end_date,
        ),
        ContractType::Physical => format!(
            "Production timeline for {project}:\n\n\
             \u{2022} Order confirmation & payment: {start}\n\
             \u{2022} Production begins: [DATE]\n\
             \u{2022} Expected completion: {end}\n\
             \u{2022} Shipping time: [e.g., 3-5 business days]\n\n\
             Timeline notes:\n\
             \u{2022} Production time begins after receipt of deposit\n\
             \u{2022} Completion dates are estimates and may vary due to material availability\n\
             \u{2022} Client will be notified of any significant delays\n\
             \u{2022} Rush orders may be available for additional fee",
            project = c.project,
            start = c.start_date,
            end = c.end_date,
        ),
        ContractType::Content => format!(
            "Content creation timeline for {project}:\n\n\
             \u{2022} Project kickoff: {start}\n\
             \u{2022} Content production: [DATE]\n\
             \u{2022} First draft delivery: [DATE]\n\
             \u{2022} Client feedback due: [NUMBER] business days after delivery\n\
             \u{2022} Revisions completed: [DATE]\n\
             \u{2022} Final delivery: {end}\n\n\
             Schedule notes:\n\
             \u{2022} Production schedule depends on location/talent availability\n\
             \u{2022} Weather or unforeseen circumstances may affect filming dates\n\
             \u{2022} Timeline adjusts if Client feedback is delayed\n\
             \u{2022} Rush delivery available for additional fee",
            project = c.project,
            start = c.start_date,
            end = c.end_date,
        ),
    }
}

fn payment_terms(contract_type: ContractType, c: &Ctx, data: &ContractData) -> String {
    let schedule = |fallback: &str| {
        if data.payment_schedule.trim().is_empty() {
            fallback.to_string()
        } else {
            data.payment_schedule.clone()
        }
    };
    match contract_type {
        ContractType::Digital => format!(
            "Total project fee: {symbol}{amount}\n\n\
             Payment schedule: {schedule}\n\n\
             Payment terms:\n\
             \u{2022} Invoices are due within [NUMBER] days of receipt\n\
             \u{2022} Accepted payment methods: [e.g., Bank transfer, PayPal, Venmo]\n\
             \u{2022} Late payments will incur a fee of [e.g., 5%] per [week/month]\n\
             \u{2022} Work will not commence until initial payment is received\n\
             \u{2022} Final deliverables will be released upon receipt of final payment\n\n\
             All fees are non-refundable once work has commenced.",
            symbol = c.symbol,
            amount = c.amount,
            schedule = schedule("[e.g., 50% upfront, 50% upon completion]"),
        ),
        ContractType::Physical => format!(
            "Total cost: {symbol}{amount}\n\n\
             Payment schedule: {schedule}\n\n\
             Payment details:\n\
             \u{2022} Deposit required to begin work\n\
             \u{2022} Final payment due before item(s) ship\n\
             \u{2022} Accepted payment methods: [e.g., Bank transfer, PayPal, credit card]\n\
             \u{2022} Shipping costs: [Included / Additional $[AMOUNT]]\n\
             \u{2022} Late payments will result in delayed shipment\n\n\
             All sales are final once production begins. No refunds for change of mind.",
            symbol = c.symbol,
            amount = c.amount,
            schedule = schedule("[e.g., 50% deposit, 50% before shipping]"),
        ),
        ContractType::Content => format!(
            "Total project fee: {symbol}{amount}\n\n\
             Payment schedule: {schedule}\n\n\
             Payment terms:\n\
             \u{2022} Initial payment due before any work begins\n\
             \u{2022} Subsequent payments due according to milestones\n\
             \u{2022} Accepted methods: [e.g., Bank transfer, PayPal, check]\n\
             \u{2022} Expenses: [Travel, equipment rental, talent fees] [included / billed separately]\n\
             \u{2022} Late payment fee: [PERCENTAGE]% per [week/month]\n\n\
             Final files released only upon receipt of final payment. No refunds after production begins.",
            symbol = c.symbol,
            amount = c.amount,
            schedule = schedule("[e.g., 40% upfront, 30% after filming, 30% upon delivery]"),
        ),
    }
}

fn rights_usage(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "Upon full payment, the Client receives an exclusive license to use the deliverables for {project}. [EXCLUSIVE means only the client can use this work - you cannot resell or relicense it to others. Delete this explanation before sending.]\n\n\
             Rights granted:\n\
             \u{2022} Usage: [e.g., Social media, website, print materials, etc.]\n\
             \u{2022} Territory: [e.g., Worldwide/United States only]\n\
             \u{2022} Duration: [e.g., Perpetual/1 year]\n\n\
             The Creator retains:\n\
             \u{2022} Copyright ownership of all work created\n\
             \u{2022} Right to display work in portfolio and promotional materials\n\
             \u{2022} Right to create similar work for other clients\n\n\
             Any usage beyond the scope outlined above requires written permission and may incur additional licensing fees.",
            project = c.project,
        ),
        ContractType::Physical => "Upon full payment, the Client receives:\n\n\
             \u{2022} Ownership of the physical item(s) created\n\
             \u{2022} Right to resell, gift, or use items as desired\n\
             \u{2022} Right to photograph items for personal or commercial use\n\n\
             The Creator retains:\n\
             \u{2022} Copyright of the design and creative concept [This means YOU own the design even though the client owns the physical object. Delete this explanation before sending.]\n\
             \u{2022} Right to photograph items for portfolio and marketing\n\
             \u{2022} Right to create similar items for other clients\n\
             \u{2022} Attribution rights when items are publicly displayed or published\n\n\
             The Client may not reproduce, replicate, or manufacture additional copies of the design without written permission."
            .to_string(),
        ContractType::Content => format!(
            "Upon full payment, Client receives license to use the content for {project} as follows:\n\n\
             Rights granted:\n\
             \u{2022} Platforms: [e.g., \"YouTube, Instagram, Facebook, Company website\"]\n\
             \u{2022} Territory: [e.g., \"Worldwide\" / \"North America only\"]\n\
             \u{2022} Duration: [e.g., \"In perpetuity\" / \"2 years from delivery\"]\n\
             \u{2022} Exclusivity: [Choose Exclusive or Non-exclusive. EXCLUSIVE means only this client can use this content - you cannot resell it. NON-EXCLUSIVE means you can license the same content to others. Delete this explanation before sending.]\n\n\
             The Creator retains:\n\
             \u{2022} Copyright ownership of all content created\n\
             \u{2022} Right to use content in portfolio, demo reel, and marketing materials\n\
             \u{2022} Raw footage and outtakes (unless negotiated otherwise)\n\
             \u{2022} Right to create similar content for other clients\n\n\
             Any usage beyond scope (e.g., TV commercials, paid advertising, resale) requires additional licensing agreement and fees.",
            project = c.project,
        ),
    }
}

fn revisions_limit(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!("{} rounds of revisions", c.revisions_limit),
        ContractType::Physical => format!(
            "{} rounds of revisions (concept/design phase only)",
            c.revisions_limit
        ),
        ContractType::Content => format!("{} rounds of revisions included", c.revisions_limit),
    }
}

fn revisions_timeline(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "Client must request revisions within {} of receiving deliverables",
            c.revisions_timeline
        ),
        ContractType::Physical => format!(
            "Design revisions must be requested within {} of receiving concept images. No revisions possible once production begins.",
            c.revisions_timeline
        ),
        ContractType::Content => format!(
            "Revision requests must be submitted within {} of receiving draft. Additional revision rounds available at $[AMOUNT] per round.",
            c.revisions_timeline
        ),
    }
}

fn cancellation_notice(contract_type: ContractType) -> String {
    match contract_type {
        ContractType::Digital => "7 days written notice".to_string(),
        ContractType::Physical => {
            "3 business days written notice (before production begins only)".to_string()
        }
        ContractType::Content => "14 days written notice (before production begins). 7 days notice during pre-production. No cancellation once production begins."
            .to_string(),
    }
}

fn cancellation_fee(contract_type: ContractType) -> String {
    match contract_type {
        ContractType::Digital => "25% of total project fee for cancellations with proper notice. 50% for cancellations without proper notice."
            .to_string(),
        ContractType::Physical => "Full project fee is due if cancellation occurs after production has commenced. Partially completed items become property of the Creator."
            .to_string(),
        ContractType::Content => "50% of total fee for cancellations in pre-production with proper notice. 100% of fee if production has commenced. Completed work transfers to Client."
            .to_string(),
    }
}

/// The short single-paragraph confidentiality clause. The composer in
/// `confidentiality_text` builds the long multi-subsection variant.
fn confidentiality_default(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "Both parties agree to keep confidential any proprietary information, trade secrets, or sensitive business information shared during the course of {project}. This obligation extends for [NUMBER] years beyond the completion of this agreement.\n\n\
             Exceptions: Information that is publicly available, independently developed, or required to be disclosed by law.",
            project = c.project,
        ),
        ContractType::Physical => format!(
            "Both parties agree to keep confidential any proprietary designs, techniques, or sensitive information shared during {project}. This includes design specifications, pricing structures, and any private client information.\n\n\
             This obligation continues for [NUMBER] years after project completion.",
            project = c.project,
        ),
        ContractType::Content => "Both parties agree to maintain confidentiality regarding:\n\n\
             \u{2022} Unpublished content and creative concepts\n\
             \u{2022} Proprietary business information\n\
             \u{2022} Compensation and contract terms\n\
             \u{2022} Any sensitive information marked as confidential\n\n\
             This obligation continues for [NUMBER] years after completion. Creator may announce the collaboration publicly unless otherwise agreed."
            .to_string(),
    }
}

/// Governing law derives from the creator's address with a cascading
/// fallback: state -> country -> placeholder.
fn governing_law(c: &Ctx) -> String {
    if !c.state.is_empty() {
        format!("State of {}", c.state)
    } else if !c.country.is_empty() {
        c.country.clone()
    } else {
        "State of [YOUR_STATE]".to_string()
    }
}

/// Venue cascade: city+state(+country) -> city+country -> country ->
/// placeholder.
fn jurisdiction_venue(c: &Ctx) -> String {
    if !c.city.is_empty() && !c.state.is_empty() {
        if !c.country.is_empty() {
            format!("Courts of {}, {}, {}", c.city, c.state, c.country)
        } else {
            format!("Courts of {}, {}", c.city, c.state)
        }
    } else if !c.city.is_empty() && !c.country.is_empty() {
        format!("Courts of {}, {}", c.city, c.country)
    } else if !c.country.is_empty() {
        format!("Courts of {}", c.country)
    } else {
        "Courts of [YOUR_CITY], [YOUR_STATE]".to_string()
    }
}

fn independent_contractor(contract_type: ContractType, c: &Ctx) -> String {
    let (tools, schedule, freedom) = match contract_type {
        ContractType::Digital => (
            "Their own tools, equipment, software, and workspace",
            "Setting their own working hours and methods of completing the work",
            "provide services to other clients",
        ),
        ContractType::Physical => (
            "Their own tools, materials, equipment, and workspace",
            "Setting their own working hours and production methods",
            "accept commissions from other clients",
        ),
        ContractType::Content => (
            "Their own equipment, software, studio space, and production tools",
            "Setting their own filming/production schedule and creative methods",
            "create content for other clients",
        ),
    };
    let extra_conflict = match contract_type {
        ContractType::Content => ", violate any exclusivity provisions,",
        _ => "",
    };
    format!(
        "{creator} is an independent contractor and not an employee, agent, partner, or joint venturer of {client}. {creator} shall be solely responsible for:\n\n\
         \u{2022} All federal, state, and local taxes, including self-employment taxes\n\
         \u{2022} {tools}\n\
         \u{2022} Their own health insurance, retirement benefits, and other benefits\n\
         \u{2022} {schedule}\n\n\
         Nothing in this agreement shall be construed to create an employer-employee relationship. {client} will not provide {creator} with employee benefits and will not withhold taxes from payments made under this agreement. {creator} is free to {freedom} during the term of this agreement, provided such work does not create a conflict of interest{extra_conflict} or breach the confidentiality provisions herein.",
        creator = c.creator,
        client = c.client,
        tools = tools,
        schedule = schedule,
        freedom = freedom,
        extra_conflict = extra_conflict,
    )
}

fn liability_limit(contract_type: ContractType, c: &Ctx) -> String {
    let cap = format!(
        "To the maximum extent permitted by law, {creator}'s total liability arising out of or related to this agreement shall not exceed the total fees actually paid by {client} under this agreement.",
        creator = c.creator,
        client = c.client,
    );
    match contract_type {
        ContractType::Digital => format!(
            "{cap}\n\n\
             In no event shall {creator} be liable for any indirect, incidental, special, consequential, or punitive damages, including but not limited to loss of profits, data, business opportunities, or goodwill, regardless of whether such damages were foreseeable or whether {creator} was advised of the possibility of such damages.\n\n\
             {client}'s sole remedy for dissatisfaction with the services or deliverables shall be limited to re-performance of the deficient services or a refund of the fees paid for the specific deliverable in question.",
            cap = cap,
            creator = c.creator,
            client = c.client,
        ),
        ContractType::Physical => format!(
            "{cap}\n\n\
             In no event shall {creator} be liable for any indirect, incidental, special, consequential, or punitive damages, including but not limited to loss of profits, data, business opportunities, or goodwill.\n\n\
             Due to the handmade/custom nature of physical products, minor variations in color, texture, size, and finish are inherent and do not constitute defects. {client}'s sole remedy for material defects in craftsmanship shall be repair or replacement at {creator}'s discretion, or a refund of the fees paid for the specific item in question.",
            cap = cap,
            creator = c.creator,
            client = c.client,
        ),
        ContractType::Content => format!(
            "{cap}\n\n\
             In no event shall {creator} be liable for any indirect, incidental, special, consequential, or punitive damages, including but not limited to loss of profits, followers, engagement metrics, brand reputation, or business opportunities, regardless of whether such damages were foreseeable.\n\n\
             {creator} is not responsible for the performance of published content, including but not limited to views, engagement, conversions, or sales resulting from the content. {client}'s sole remedy for dissatisfaction with the content shall be re-creation of the deficient content or a refund of the fees paid for the specific deliverable in question.",
            cap = cap,
            creator = c.creator,
            client = c.client,
        ),
    }
}

fn indemnification(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "{client} agrees to indemnify, defend, and hold harmless {creator} from and against any and all claims, damages, losses, liabilities, and expenses (including reasonable attorney's fees) arising out of or related to:\n\n\
             \u{2022} {client}'s use of the deliverables in a manner not authorized by this agreement\n\
             \u{2022} Any materials, content, or direction provided by {client} that infringes on third-party rights\n\
             \u{2022} {client}'s products, services, or business operations\n\
             \u{2022} Any modification of the deliverables made by {client} or third parties after delivery\n\n\
             {creator} agrees to indemnify, defend, and hold harmless {client} from and against any claims that the original deliverables (unmodified) infringe on the intellectual property rights of any third party, provided that {creator} had full creative control over the allegedly infringing elements.",
            creator = c.creator,
            client = c.client,
        ),
        ContractType::Physical => format!(
            "{client} agrees to indemnify, defend, and hold harmless {creator} from and against any and all claims, damages, losses, liabilities, and expenses (including reasonable attorney's fees) arising out of or related to:\n\n\
             \u{2022} {client}'s use, resale, or distribution of the delivered products\n\
             \u{2022} Any specifications, designs, or materials provided by {client} that infringe on third-party rights\n\
             \u{2022} Product liability claims arising from {client}'s modification, misuse, or resale of the products\n\
             \u{2022} Any claims related to {client}'s marketing or representation of the products\n\n\
             {creator} agrees to indemnify, defend, and hold harmless {client} from and against any claims that the original, unmodified products infringe on the intellectual property rights of any third party.",
            creator = c.creator,
            client = c.client,
        ),
        ContractType::Content => format!(
            "{client} agrees to indemnify, defend, and hold harmless {creator} from and against any and all claims, damages, losses, liabilities, and expenses (including reasonable attorney's fees) arising out of or related to:\n\n\
             \u{2022} {client}'s products, services, or claims that {creator} is asked to feature or promote in the content\n\
             \u{2022} Any scripts, talking points, product claims, or direction provided by {client} (including FTC compliance of required messaging)\n\
             \u{2022} Claims arising from {client}'s use of the content beyond the scope authorized by this agreement\n\
             \u{2022} Any modification of the content made by {client} or third parties after delivery\n\n\
             {creator} agrees to indemnify, defend, and hold harmless {client} from and against any claims that the original content (unmodified) infringes on the intellectual property rights of any third party, including unauthorized use of third-party music, footage, or images, provided that {creator} had full creative control over the allegedly infringing elements.",
            creator = c.creator,
            client = c.client,
        ),
    }
}

fn warranty(contract_type: ContractType, c: &Ctx) -> String {
    match contract_type {
        ContractType::Digital => format!(
            "{creator} represents and warrants that:\n\n\
             \u{2022} They have the legal right and authority to enter into this agreement and perform the services described herein\n\
             \u{2022} The deliverables will be original work created by {creator} (except for any Client-provided materials or properly licensed third-party assets)\n\
             \u{2022} The deliverables, to the best of {creator}'s knowledge, will not infringe upon the intellectual property rights of any third party\n\
             \u{2022} The services will be performed in a professional and workmanlike manner consistent with generally accepted industry standards\n\n\
             {client} represents and warrants that:\n\n\
             \u{2022} They have the legal right and authority to enter into this agreement\n\
             \u{2022} Any materials, content, briefs, or direction provided to {creator} do not infringe upon the rights of any third party\n\
             \u{2022} They will use the deliverables only in the manner permitted by this agreement\n\n\
             EXCEPT AS EXPRESSLY SET FORTH IN THIS AGREEMENT, {creator_upper} MAKES NO OTHER WARRANTIES, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO IMPLIED WARRANTIES OF MERCHANTABILITY OR FITNESS FOR A PARTICULAR PURPOSE.",
            creator = c.creator,
            client = c.client,
            creator_upper = c.creator.to_uppercase(),
        ),
        ContractType::Physical => format!(
            "{creator} represents and warrants that:\n\n\
             \u{2022} They have the legal right and authority to enter into this agreement\n\
             \u{2022} The products will be original work created by {creator} using the materials and techniques specified\n\
             \u{2022} The products will be free from material defects in craftsmanship for a period of [30/60/90] days from delivery\n\
             \u{2022} The products will substantially conform to the agreed-upon specifications and approved design concepts\n\n\
             {client} represents and warrants that:\n\n\
             \u{2022} They have the legal right and authority to enter into this agreement\n\
             \u{2022} Any designs, specifications, or materials provided to {creator} do not infringe upon the rights of any third party\n\n\
             EXCEPT AS EXPRESSLY SET FORTH IN THIS AGREEMENT, {creator_upper} MAKES NO OTHER WARRANTIES, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO IMPLIED WARRANTIES OF MERCHANTABILITY OR FITNESS FOR A PARTICULAR PURPOSE. Due to the handmade nature of the products, minor variations are expected and do not constitute a breach of warranty.",
            creator = c.creator,
            client = c.client,
            creator_upper = c.creator.to_uppercase(),
        ),
        ContractType::Content => format!(
            "{creator} represents and warrants that:\n\n\
             \u{2022} They have the legal right and authority to enter into this agreement and create the content described herein\n\
             \u{2022} The content will be original work created by {creator} (except for any Client-provided materials, properly licensed music/assets, or content specifically identified as sourced from third parties)\n\
             \u{2022} The content, to the best of {creator}'s knowledge, will not infringe upon the intellectual property rights of any third party\n\
             \u{2022} The content will be produced in a professional manner consistent with generally accepted industry standards\n\
             \u{2022} {creator} will comply with applicable FTC disclosure requirements and platform guidelines when creating sponsored content\n\n\
             {client} represents and warrants that:\n\n\
             \u{2022} They have the legal right and authority to enter into this agreement\n\
             \u{2022} Any product claims, scripts, briefs, or direction provided to {creator} are truthful, substantiated, and comply with applicable advertising laws and FTC guidelines\n\
             \u{2022} The products or services featured in the content are safe, legal, and accurately represented\n\n\
             EXCEPT AS EXPRESSLY SET FORTH IN THIS AGREEMENT, {creator_upper} MAKES NO WARRANTIES REGARDING CONTENT PERFORMANCE, INCLUDING BUT NOT LIMITED TO VIEWS, ENGAGEMENT, REACH, CONVERSIONS, OR SALES.",
            creator = c.creator,
            client = c.client,
            creator_upper = c.creator.to_uppercase(),
        ),
    }
}

fn dispute_resolution(contract_type: ContractType, c: &Ctx) -> String {
    // Only the digital template carries the arbitration-vs-litigation
    // guidance paragraph.
    let guidance = match contract_type {
        ContractType::Digital => "[Choose arbitration for faster, more private resolution. Choose litigation if you prefer the option to appeal. Arbitration is generally cheaper and faster, but the decision is usually final.]\n\n",
        _ => "",
    };
    format!(
        "In the event of any dispute, claim, or controversy arising out of or relating to this agreement, the parties agree to the following resolution process:\n\n\
         1. GOOD FAITH NEGOTIATION: The parties shall first attempt to resolve the dispute through direct, good faith negotiation for a period of [15/30] days from written notice of the dispute.\n\n\
         2. MEDIATION: If negotiation fails, the parties agree to submit the dispute to non-binding mediation administered by [a mutually agreed-upon mediator / the American Arbitration Association / your local mediation service]. The costs of mediation shall be shared equally between the parties.\n\n\
         3. [BINDING ARBITRATION / LITIGATION]: If mediation fails, the dispute shall be resolved by [binding arbitration under the rules of the American Arbitration Association, with a single arbitrator, in {city}, {state} / litigation in the courts specified in the Governing Law & Jurisdiction section of this agreement].\n\n\
         {guidance}\
         Each party shall bear their own attorney's fees and costs unless the arbitrator or court determines that one party's claims or defenses were frivolous, in which case the prevailing party may recover reasonable attorney's fees.",
        city = c.city_or_placeholder(),
        state = c.state_or_placeholder(),
        guidance = guidance,
    )
}

fn force_majeure(contract_type: ContractType) -> String {
    let causes = match contract_type {
        ContractType::Digital => "\u{2022} Natural disasters (earthquakes, floods, hurricanes, wildfires)\n\
             \u{2022} Pandemics, epidemics, or public health emergencies\n\
             \u{2022} Government actions, laws, regulations, embargoes, or sanctions\n\
             \u{2022} War, terrorism, civil unrest, or armed conflict\n\
             \u{2022} Power outages, internet service disruptions, or telecommunications failures\n\
             \u{2022} Strikes, labor disputes, or supply chain disruptions\n\
             \u{2022} Cyberattacks, data breaches, or technology platform failures",
        ContractType::Physical => "\u{2022} Natural disasters (earthquakes, floods, hurricanes, wildfires)\n\
             \u{2022} Pandemics, epidemics, or public health emergencies\n\
             \u{2022} Government actions, laws, regulations, embargoes, or sanctions\n\
             \u{2022} Supply chain disruptions, material shortages, or shipping delays\n\
             \u{2022} Power outages or infrastructure failures\n\
             \u{2022} War, terrorism, civil unrest, or armed conflict\n\
             \u{2022} Strikes, labor disputes, or equipment failures",
        ContractType::Content => "\u{2022} Natural disasters (earthquakes, floods, hurricanes, wildfires)\n\
             \u{2022} Pandemics, epidemics, or public health emergencies\n\
             \u{2022} Government actions, laws, regulations, embargoes, or sanctions\n\
             \u{2022} Social media platform outages, algorithm changes, or account suspensions beyond the Creator's control\n\
             \u{2022} Power outages, internet service disruptions, or equipment failures\n\
             \u{2022} War, terrorism, civil unrest, or armed conflict\n\
             \u{2022} Strikes, labor disputes, or supply chain disruptions",
    };
    let compensation = match contract_type {
        ContractType::Physical => {
            "the Creator shall be compensated for all work completed and materials purchased up to the date of the event"
        }
        _ => "the Creator shall be compensated for all work completed up to the date of the event",
    };
    format!(
        "Neither party shall be liable for any failure or delay in performing their obligations under this agreement if such failure or delay results from circumstances beyond the party's reasonable control, including but not limited to:\n\n\
         {causes}\n\n\
         The affected party must notify the other party in writing within [5/10] business days of the force majeure event and make reasonable efforts to mitigate its impact. If the force majeure event continues for more than [30/60] days, either party may terminate this agreement with written notice, and {compensation}.",
        causes = causes,
        compensation = compensation,
    )
}

/// When the currency changes after payment terms were already written, the
/// saved text still opens with the old symbol ("Total project fee: $5000").
/// Rewrite just that lead-in instead of regenerating the whole clause.
pub fn update_payment_terms_currency(terms: &str, old_currency: &str, new_currency: &str) -> String {
    let old_symbol = currency_symbol(old_currency);
    let new_symbol = currency_symbol(new_currency);
    if old_symbol == new_symbol {
        return terms.to_string();
    }
    let pattern = format!(
        r"(Total project fee:|Total cost:)\s*{}",
        regex::escape(old_symbol.trim_end())
    );
    match regex::Regex::new(&pattern) {
        Ok(re) => re
            .replace_all(terms, format!("${{1}} {}", new_symbol.trim_end()))
            .into_owned(),
        Err(_) => terms.to_string(),
    }
}

// ==========================================
// 3. Confidentiality composer
// ==========================================

const SUBCLAUSE_SEPARATOR: &str = "\n\n---\n\n";

/// Assembles the confidentiality clause from the toggled sub-clauses.
/// Sub-clauses always appear in the same canonical order regardless of the
/// order they were toggled in; with none enabled a one-line generic clause
/// is produced. Pure and idempotent.
pub fn confidentiality_text(contract_type: ContractType, data: &ContractData) -> String {
    let c = Ctx::from(data);
    let toggles = &data.confidentiality_subclauses;
    let duration = if data.confidentiality_duration.trim().is_empty() {
        "3 years".to_string()
    } else {
        data.confidentiality_duration.clone()
    };
    let portfolio_delay = if data.portfolio_usage_delay.trim().is_empty() {
        "upon project completion".to_string()
    } else {
        data.portfolio_usage_delay.clone()
    };

    let mut sections: Vec<String> = Vec::new();

    if toggles.define_confidential {
        let definitions = match contract_type {
            ContractType::Digital => "\u{2022} Unpublished creative work, design files, and source materials\n\
                 \u{2022} Business strategies, marketing plans, and proprietary processes\n\
                 \u{2022} Client lists, pricing structures, and financial information\n\
                 \u{2022} Trade secrets, technical specifications, and project methodologies\n\
                 \u{2022} Any information explicitly marked as confidential by either party",
            ContractType::Physical => "\u{2022} Original designs, patterns, templates, and production techniques\n\
                 \u{2022} Supplier information, material sources, and pricing details\n\
                 \u{2022} Custom specifications and proprietary manufacturing processes\n\
                 \u{2022} Client personal information and order details\n\
                 \u{2022} Any information explicitly marked as confidential by either party",
            ContractType::Content => "\u{2022} Unpublished content, scripts, outlines, and creative concepts\n\
                 \u{2022} Brand guidelines, content calendars, and strategic plans\n\
                 \u{2022} Analytics, performance data, and audience insights\n\
                 \u{2022} Compensation details and contract negotiations\n\
                 \u{2022} Any information explicitly marked as confidential by either party",
        };
        sections.push(format!(
            "**1. CONFIDENTIAL INFORMATION DEFINED**\n\n\
             Both {creator} (\"Creator\") and {client} (\"Client\") agree that the following information related to {project} is considered confidential:\n\n\
             {definitions}\n\n\
             Educational Note: This clearly defines what information must be kept private. Being specific helps prevent misunderstandings and protects both parties' interests.",
            creator = c.creator,
            client = c.client,
            project = c.project,
            definitions = definitions,
        ));
    }

    if toggles.exclusions {
        sections.push(
            "**2. EXCLUSIONS FROM CONFIDENTIALITY**\n\n\
             The following information is NOT considered confidential:\n\n\
             \u{2022} Information that is publicly available or becomes public through no breach of this agreement\n\
             \u{2022} Information independently developed without use of confidential information\n\
             \u{2022} Information already known prior to this agreement\n\
             \u{2022} Information required to be disclosed by law, court order, or government authority\n\n\
             Educational Note: These standard exclusions ensure you're not restricted from using publicly available information or your own independently created work."
                .to_string(),
        );
    }

    if toggles.portfolio_rights {
        sections.push(format!(
            "**3. PORTFOLIO & CASE STUDY USAGE**\n\n\
             Creator may use the work created for {project} in their professional portfolio {delay}. This includes:\n\n\
             \u{2022} Displaying final deliverables on personal website and portfolio platforms\n\
             \u{2022} Including the project in case studies (with or without Client name, as agreed)\n\
             \u{2022} Showcasing work samples in client pitches and proposals\n\n\
             The Creator will respect any Client requests to:\n\
             \u{2022} Delay portfolio posting until a specific date\n\
             \u{2022} Omit Client name or identifying information\n\
             \u{2022} Exclude the work entirely from public portfolios (must be agreed in writing)\n\n\
             Educational Note: Portfolio rights are essential for building your business. This clause balances your professional needs with client confidentiality concerns.",
            project = c.project,
            delay = portfolio_delay,
        ));
    }

    if toggles.social_media_rights {
        sections.push(format!(
            "**4. SOCIAL MEDIA & PUBLIC ANNOUNCEMENTS**\n\n\
             Creator may announce the collaboration publicly unless Client requests otherwise. Permitted announcements include:\n\n\
             \u{2022} Acknowledging the Client relationship (e.g., \"Working with {client}\")\n\
             \u{2022} Sharing behind-the-scenes content that doesn't reveal confidential information\n\
             \u{2022} Posting final deliverables {delay} (unless restricted by Client)\n\n\
             Client may also share and promote the Creator's work publicly once delivered.\n\n\
             Educational Note: Social media visibility helps grow your business. This clause ensures you can announce collaborations while respecting any client privacy needs.",
            client = c.client,
            delay = portfolio_delay,
        ));
    }

    if toggles.team_disclosure {
        sections.push(
            "**5. PERMITTED DISCLOSURES TO TEAM MEMBERS**\n\n\
             Both parties may disclose confidential information to:\n\n\
             \u{2022} Employees, contractors, or subcontractors who need the information to complete the project\n\
             \u{2022} Legal and financial advisors bound by professional confidentiality\n\
             \u{2022} Any person with prior written consent from the other party\n\n\
             The disclosing party must ensure all recipients are informed of the confidential nature and agree to maintain confidentiality.\n\n\
             Educational Note: You often need to involve assistants, editors, or specialists. This clause allows necessary collaboration while maintaining overall confidentiality."
                .to_string(),
        );
    }

    if toggles.duration {
        sections.push(format!(
            "**6. DURATION OF CONFIDENTIALITY**\n\n\
             The confidentiality obligations in this agreement continue for {duration} after the completion or termination of {project}.\n\n\
             Exceptions:\n\
             \u{2022} Trade secrets remain confidential indefinitely\n\
             \u{2022} Portfolio rights begin {delay}\n\
             \u{2022} Public announcements permitted as outlined in Section 4\n\n\
             Educational Note: Confidentiality doesn't last forever for most information. This defines clear timeframes so you know when restrictions end.",
            duration = duration,
            project = c.project,
            delay = portfolio_delay,
        ));
    }

    if toggles.return_materials {
        sections.push(
            "**7. RETURN OR DESTRUCTION OF MATERIALS**\n\n\
             Upon completion or termination of this agreement:\n\n\
             \u{2022} Client materials provided for the project should be returned or securely deleted\n\
             \u{2022} The Creator may retain one copy of deliverables for portfolio purposes (as outlined in Section 3)\n\
             \u{2022} Both parties should delete or return documents explicitly marked \"Return After Use\"\n\
             \u{2022} Digital files containing confidential information should be permanently deleted from unsecured locations\n\n\
             Educational Note: This protects both parties from data breaches. Keep secure backups for your portfolio rights, but remove unnecessary confidential files."
                .to_string(),
        );
    }

    if toggles.breach_remedies {
        sections.push(
            "**8. BREACH AND REMEDIES**\n\n\
             Both parties acknowledge that breach of this confidentiality agreement could cause irreparable harm.\n\n\
             In the event of a breach:\n\
             \u{2022} The non-breaching party may seek injunctive relief (court order to stop the breach)\n\
             \u{2022} The breaching party may be liable for actual damages caused by the breach\n\
             \u{2022} The non-breaching party may pursue any other remedies available under law\n\n\
             Minor inadvertent disclosures should be promptly reported and corrected in good faith.\n\n\
             Educational Note: This isn't meant to be scary - it's standard legal protection. Most confidentiality issues are honest mistakes that can be resolved through communication."
                .to_string(),
        );
    }

    if sections.is_empty() {
        format!(
            "Both parties agree to keep confidential any proprietary information shared during {project}. This obligation extends for {duration} beyond the completion of this agreement.",
            project = c.project,
            duration = duration,
        )
    } else {
        sections.join(SUBCLAUSE_SEPARATOR)
    }
}

// ==========================================
// 4. Document assembly
// ==========================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Subheading { text: String },
    Labeled { label: String, text: String },
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Section {
    pub key: &'static str,
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Party {
    pub heading: &'static str,
    pub lines: Vec<String>,
}

/// The renderer-neutral document. All three renderers (terminal preview,
/// Markdown, Typst) consume this one structure so their textual content
/// stays identical modulo markup syntax.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Document {
    pub title: String,
    pub project_name: String,
    pub start_date: String,
    pub end_date: String,
    pub creator: Party,
    pub client: Party,
    pub sections: Vec<Section>,
    pub signature_ack: String,
    pub creator_name: String,
    pub client_name: String,
}

/// `override ?? template(context)` - the single clause resolver.
pub fn resolve(override_text: &str, field: ClauseField, data: &ContractData) -> String {
    if override_text.trim().is_empty() {
        template_text(field, data.contract_type, data)
    } else {
        override_text.to_string()
    }
}

fn party_lines(
    name: &str,
    name_placeholder: &str,
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
    country: &str,
    email: &str,
    phone: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(if name.trim().is_empty() {
        name_placeholder.to_string()
    } else {
        name.to_string()
    });
    if !address.trim().is_empty() {
        lines.push(address.to_string());
    }
    if !city.is_empty() || !state.is_empty() || !zip.is_empty() {
        let mut line = String::new();
        line.push_str(city);
        if !city.is_empty() && !state.is_empty() {
            line.push_str(", ");
        }
        line.push_str(state);
        if !line.is_empty() && !zip.is_empty() {
            line.push(' ');
        }
        line.push_str(zip);
        lines.push(line);
    }
    for extra in [country, email, phone] {
        if !extra.trim().is_empty() {
            lines.push(extra.to_string());
        }
    }
    lines
}

const GENERAL_PROVISIONS: [(&str, &str); 5] = [
    (
        "Entire Agreement",
        "This agreement constitutes the entire agreement between the parties and supersedes all prior negotiations, representations, warranties, commitments, offers, contracts, and writings, whether written or oral, relating to its subject matter. No prior drafts, correspondence, or verbal discussions shall be used to interpret or modify this agreement.",
    ),
    (
        "Severability",
        "If any provision of this agreement is found to be invalid, illegal, or unenforceable by a court of competent jurisdiction, the remaining provisions shall continue in full force and effect. The invalid provision shall be modified to the minimum extent necessary to make it valid and enforceable while preserving the original intent of the parties.",
    ),
    (
        "Amendments & Modifications",
        "No amendment, modification, or waiver of any provision of this agreement shall be effective unless made in writing and signed by both parties. Verbal agreements or informal written communications (including emails, text messages, and direct messages) do not constitute valid amendments to this agreement.",
    ),
    (
        "Waiver",
        "The failure of either party to enforce any provision of this agreement shall not be construed as a waiver of such provision or the right to enforce it at a later time. A waiver of any breach of this agreement shall not constitute a waiver of any subsequent breach.",
    ),
    (
        "Assignment",
        "Neither party may assign, transfer, or delegate their rights or obligations under this agreement without the prior written consent of the other party. Any attempted assignment without such consent shall be void. This agreement shall be binding upon and inure to the benefit of the parties and their permitted successors and assigns.",
    ),
];

/// Walks the enabled-sections map in the fixed canonical order and emits the
/// document. An optional section is included iff its toggle is on AND its
/// resolved content is non-empty; the general provisions, custom clauses and
/// signature block follow unconditionally.
pub fn assemble(data: &ContractData) -> Document {
    let c = Ctx::from(data);
    let mut sections: Vec<Section> = Vec::new();

    let push_text_section =
        |sections: &mut Vec<Section>, key, heading: &str, enabled: bool, content: String| {
            if enabled && !content.trim().is_empty() {
                sections.push(Section {
                    key,
                    heading: heading.to_string(),
                    blocks: vec![Block::Text { text: content }],
                });
            }
        };

    push_text_section(
        &mut sections,
        "scope",
        "Scope of Work",
        data.sections.scope_of_work,
        resolve(&data.scope_of_work, ClauseField::ScopeOfWork, data),
    );
    push_text_section(
        &mut sections,
        "deliverables",
        "Deliverables",
        data.sections.deliverables,
        resolve(&data.deliverables, ClauseField::Deliverables, data),
    );
    push_text_section(
        &mut sections,
        "timeline",
        "Timeline & Milestones",
        data.sections.timeline,
        resolve(&data.timeline, ClauseField::Timeline, data),
    );

    if data.sections.payment {
        let mut blocks = Vec::new();
        if !data.payment_amount.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Amount".to_string(),
                text: format!("{} {}", c.symbol, data.payment_amount),
            });
        }
        if !data.payment_schedule.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Schedule".to_string(),
                text: data.payment_schedule.clone(),
            });
        }
        let details = payment_details_text(&data.payment_method, &data.payment_details);
        if !details.is_empty() {
            blocks.push(Block::Labeled {
                label: "Payment Details".to_string(),
                text: details,
            });
        }
        let terms = resolve(&data.payment_terms, ClauseField::PaymentTerms, data);
        if !terms.trim().is_empty() {
            blocks.push(Block::Text { text: terms });
        }
        if !blocks.is_empty() {
            sections.push(Section {
                key: "payment",
                heading: "Payment & Terms".to_string(),
                blocks,
            });
        }
    }

    push_text_section(
        &mut sections,
        "rights",
        "Rights & Usage",
        data.sections.rights,
        resolve(&data.rights_usage, ClauseField::RightsUsage, data),
    );

    if data.sections.revisions {
        let mut blocks = Vec::new();
        for (label, value) in [
            ("Limit", &data.revisions_limit),
            ("Timeline", &data.revisions_timeline),
            ("What Counts as a Revision", &data.revisions_definition),
            ("Additional Revisions", &data.revisions_overflow),
            ("Additional Terms", &data.revisions_additional),
        ] {
            if !value.trim().is_empty() {
                blocks.push(Block::Labeled {
                    label: label.to_string(),
                    text: value.clone(),
                });
            }
        }
        if !blocks.is_empty() {
            sections.push(Section {
                key: "revisions",
                heading: "Revisions Policy".to_string(),
                blocks,
            });
        }
    }

    if data.sections.cancellation {
        let mut blocks = Vec::new();
        let notice = resolve(
            &data.cancellation_notice,
            ClauseField::CancellationNotice,
            data,
        );
        if !notice.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Notice Period".to_string(),
                text: notice,
            });
        }
        let fee = resolve(&data.cancellation_fee, ClauseField::CancellationFee, data);
        if !fee.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Fee".to_string(),
                text: fee,
            });
        }
        if !data.cancellation_additional.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Additional Terms".to_string(),
                text: data.cancellation_additional.clone(),
            });
        }
        if !blocks.is_empty() {
            sections.push(Section {
                key: "cancellation",
                heading: "Cancellation Policy".to_string(),
                blocks,
            });
        }
    }

    // The confidentiality override falls back to the composed sub-clause
    // text, not the short template, so the toggles always take effect.
    let confidentiality = if data.confidentiality_terms.trim().is_empty() {
        confidentiality_text(data.contract_type, data)
    } else {
        data.confidentiality_terms.clone()
    };
    push_text_section(
        &mut sections,
        "confidentiality",
        "Confidentiality",
        data.sections.confidentiality,
        confidentiality,
    );

    if data.sections.jurisdiction {
        let mut blocks = Vec::new();
        let law = resolve(&data.governing_law, ClauseField::GoverningLaw, data);
        if !law.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Governing Law".to_string(),
                text: format!(
                    "This agreement shall be governed by and construed in accordance with the laws of the {}.",
                    law
                ),
            });
        }
        let venue = resolve(&data.jurisdiction_venue, ClauseField::JurisdictionVenue, data);
        if !venue.trim().is_empty() {
            blocks.push(Block::Labeled {
                label: "Jurisdiction".to_string(),
                text: format!(
                    "Any legal action or proceeding arising under this agreement will be brought exclusively in the {}.",
                    venue
                ),
            });
        }
        if !blocks.is_empty() {
            sections.push(Section {
                key: "jurisdiction",
                heading: "Governing Law & Jurisdiction".to_string(),
                blocks,
            });
        }
    }

    if data.sections.liability {
        let mut blocks = Vec::new();
        for (subheading, override_text, field) in [
            (
                "Independent Contractor",
                &data.independent_contractor_terms,
                ClauseField::IndependentContractor,
            ),
            (
                "Limitation of Liability",
                &data.liability_limit,
                ClauseField::LiabilityLimit,
            ),
            (
                "Indemnification",
                &data.indemnification_terms,
                ClauseField::Indemnification,
            ),
            (
                "Warranties & Representations",
                &data.warranty_terms,
                ClauseField::Warranty,
            ),
        ] {
            let text = resolve(override_text, field, data);
            if !text.trim().is_empty() {
                blocks.push(Block::Subheading {
                    text: subheading.to_string(),
                });
                blocks.push(Block::Text { text });
            }
        }
        if !blocks.is_empty() {
            sections.push(Section {
                key: "liability",
                heading: "Liability & Warranties".to_string(),
                blocks,
            });
        }
    }

    if data.sections.dispute_resolution {
        let mut blocks = Vec::new();
        for (subheading, override_text, field) in [
            (
                "Dispute Resolution Process",
                &data.dispute_resolution_terms,
                ClauseField::DisputeResolution,
            ),
            (
                "Force Majeure",
                &data.force_majeure_terms,
                ClauseField::ForceMajeure,
            ),
        ] {
            let text = resolve(override_text, field, data);
            if !text.trim().is_empty() {
                blocks.push(Block::Subheading {
                    text: subheading.to_string(),
                });
                blocks.push(Block::Text { text });
            }
        }
        if !blocks.is_empty() {
            sections.push(Section {
                key: "dispute_resolution",
                heading: "Dispute Resolution".to_string(),
                blocks,
            });
        }
    }

    // Always-on boilerplate.
    let mut provisions = Vec::new();
    for (subheading, text) in GENERAL_PROVISIONS {
        provisions.push(Block::Subheading {
            text: subheading.to_string(),
        });
        provisions.push(Block::Text {
            text: text.to_string(),
        });
    }
    let notices_emails =
        if !data.creator_email.trim().is_empty() && !data.client_email.trim().is_empty() {
            format!(
                " (Creator: {}, Client: {})",
                data.creator_email, data.client_email
            )
        } else {
            String::new()
        };
    provisions.push(Block::Subheading {
        text: "Notices".to_string(),
    });
    provisions.push(Block::Text {
        text: format!(
            "All notices, requests, and other communications under this agreement shall be in writing and delivered via email to the addresses provided in this agreement{}. Notices shall be deemed received on the date of confirmed delivery. Either party may change their notice address by providing written notice to the other party.",
            notices_emails
        ),
    });
    sections.push(Section {
        key: "general_provisions",
        heading: "General Provisions".to_string(),
        blocks: provisions,
    });

    for clause in &data.custom_clauses {
        if !clause.title.trim().is_empty() && !clause.content.trim().is_empty() {
            sections.push(Section {
                key: "custom",
                heading: clause.title.clone(),
                blocks: vec![Block::Text {
                    text: clause.content.clone(),
                }],
            });
        }
    }

    Document {
        title: "SERVICE AGREEMENT".to_string(),
        project_name: c.project.clone(),
        start_date: c.start_date.clone(),
        end_date: c.end_date.clone(),
        creator: Party {
            heading: "CREATOR",
            lines: party_lines(
                &data.creator_name,
                "[YOUR_NAME]",
                &data.creator_address,
                &data.creator_city,
                &data.creator_state,
                &data.creator_zip,
                &data.creator_country,
                &data.creator_email,
                &data.creator_phone,
            ),
        },
        client: Party {
            heading: "CLIENT",
            lines: party_lines(
                &data.client_name,
                "[CLIENT_NAME]",
                &data.client_address,
                &data.client_city,
                &data.client_state,
                &data.client_zip,
                &data.client_country,
                &data.client_email,
                &data.client_phone,
            ),
        },
        sections,
        signature_ack: "By signing below, both parties acknowledge they have read, understood, and agree to be bound by the terms and conditions outlined in this agreement.".to_string(),
        creator_name: c.creator,
        client_name: c.client,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfidentialitySubclauses;

    fn sample_data() -> ContractData {
        ContractData {
            contract_type: ContractType::Digital,
            creator_name: "Jordan Blake".to_string(),
            client_name: "Acme Studio".to_string(),
            project_name: "Brand Refresh".to_string(),
            creator_city: "Portland".to_string(),
            creator_state: "Oregon".to_string(),
            creator_country: "USA".to_string(),
            payment_amount: "5000".to_string(),
            currency: "USD".to_string(),
            ..ContractData::default()
        }
    }

    #[test]
    fn templates_substitute_context_values() {
        let data = sample_data();
        let scope = template_text(ClauseField::ScopeOfWork, ContractType::Digital, &data);
        assert!(scope.contains("Jordan Blake (\"Creator\")"));
        assert!(scope.contains("Acme Studio (\"Client\")"));
        assert!(scope.contains("Brand Refresh"));
        assert!(!scope.contains("[CLIENT_NAME]"));
    }

    #[test]
    fn unset_values_fall_back_to_bracketed_placeholders() {
        let data = ContractData::default();
        let scope = template_text(ClauseField::ScopeOfWork, ContractType::Content, &data);
        assert!(scope.contains("[YOUR_NAME]"));
        assert!(scope.contains("[CLIENT_NAME]"));
        assert!(scope.contains("[PROJECT_NAME]"));

        let terms = template_text(ClauseField::PaymentTerms, ContractType::Digital, &data);
        assert!(terms.contains("Total project fee: $[AMOUNT]"));
    }

    #[test]
    fn governing_law_and_venue_cascade() {
        let mut data = sample_data();
        assert_eq!(
            template_text(ClauseField::GoverningLaw, ContractType::Digital, &data),
            "State of Oregon"
        );
        assert_eq!(
            template_text(ClauseField::JurisdictionVenue, ContractType::Digital, &data),
            "Courts of Portland, Oregon, USA"
        );

        data.creator_state = String::new();
        assert_eq!(
            template_text(ClauseField::GoverningLaw, ContractType::Digital, &data),
            "USA"
        );
        assert_eq!(
            template_text(ClauseField::JurisdictionVenue, ContractType::Digital, &data),
            "Courts of Portland, USA"
        );

        data.creator_city = String::new();
        assert_eq!(
            template_text(ClauseField::JurisdictionVenue, ContractType::Digital, &data),
            "Courts of USA"
        );

        data.creator_country = String::new();
        assert_eq!(
            template_text(ClauseField::GoverningLaw, ContractType::Digital, &data),
            "State of [YOUR_STATE]"
        );
        assert_eq!(
            template_text(ClauseField::JurisdictionVenue, ContractType::Digital, &data),
            "Courts of [YOUR_CITY], [YOUR_STATE]"
        );
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("EUR"), "\u{20ac}");
        assert_eq!(currency_symbol("USDC"), "USDC");
        assert_eq!(currency_symbol("CHF"), "CHF ");
    }

    #[test]
    fn payment_details_per_method() {
        let mut details = PaymentDetails::default();
        details.paypal_email = "pay@example.com".to_string();
        assert_eq!(
            payment_details_text("paypal", &details),
            "PayPal Email: pay@example.com"
        );
        assert_eq!(
            payment_details_text("crypto", &details),
            "Wallet Address: [WALLET_ADDRESS]\nNetwork: [NETWORK]"
        );
        assert_eq!(payment_details_text("", &details), "");

        details.bank_name = "First Bank".to_string();
        details.swift_bic = "FRSTUS33".to_string();
        let bank = payment_details_text("bank", &details);
        assert!(bank.starts_with("Bank Name: First Bank"));
        assert!(bank.contains("Account Number: [ACCOUNT_NUMBER]"));
        assert!(bank.ends_with("SWIFT/BIC: FRSTUS33"));
    }

    #[test]
    fn currency_change_rewrites_payment_terms_lead_in() {
        let terms = "Total project fee: $5000\n\nPayment schedule: 50% upfront";
        let updated = update_payment_terms_currency(terms, "USD", "EUR");
        assert!(updated.starts_with("Total project fee: \u{20ac}5000"));
        assert!(updated.contains("50% upfront"));

        let untouched = update_payment_terms_currency(terms, "USD", "USD");
        assert_eq!(untouched, terms);
    }

    #[test]
    fn confidentiality_composer_is_idempotent() {
        let mut data = sample_data();
        data.confidentiality_subclauses = ConfidentialitySubclauses {
            define_confidential: true,
            exclusions: false,
            portfolio_rights: true,
            social_media_rights: true,
            team_disclosure: false,
            duration: true,
            return_materials: false,
            breach_remedies: true,
        };
        let first = confidentiality_text(ContractType::Content, &data);
        let second = confidentiality_text(ContractType::Content, &data);
        assert_eq!(first, second);
    }

    #[test]
    fn confidentiality_subclauses_keep_canonical_order() {
        let mut data = sample_data();
        data.confidentiality_subclauses = ConfidentialitySubclauses {
            define_confidential: true,
            exclusions: true,
            portfolio_rights: true,
            social_media_rights: true,
            team_disclosure: true,
            duration: true,
            return_materials: true,
            breach_remedies: true,
        };
        let text = confidentiality_text(ContractType::Digital, &data);
        let positions: Vec<usize> = [
            "**1. CONFIDENTIAL INFORMATION DEFINED**",
            "**2. EXCLUSIONS FROM CONFIDENTIALITY**",
            "**3. PORTFOLIO & CASE STUDY USAGE**",
            "**4. SOCIAL MEDIA & PUBLIC ANNOUNCEMENTS**",
            "**5. PERMITTED DISCLOSURES TO TEAM MEMBERS**",
            "**6. DURATION OF CONFIDENTIALITY**",
            "**7. RETURN OR DESTRUCTION OF MATERIALS**",
            "**8. BREACH AND REMEDIES**",
        ]
        .iter()
        .map(|h| text.find(h).expect("heading present"))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // Disabling a middle sub-clause removes it without reordering.
        data.confidentiality_subclauses.social_media_rights = false;
        let text = confidentiality_text(ContractType::Digital, &data);
        assert!(!text.contains("SOCIAL MEDIA & PUBLIC ANNOUNCEMENTS"));
        let exclusions = text.find("**2. EXCLUSIONS").unwrap();
        let team = text.find("**5. PERMITTED DISCLOSURES").unwrap();
        assert!(exclusions < team);
    }

    #[test]
    fn confidentiality_all_off_yields_generic_fallback() {
        let mut data = sample_data();
        data.confidentiality_subclauses = ConfidentialitySubclauses {
            define_confidential: false,
            exclusions: false,
            portfolio_rights: false,
            social_media_rights: false,
            team_disclosure: false,
            duration: false,
            return_materials: false,
            breach_remedies: false,
        };
        let text = confidentiality_text(ContractType::Physical, &data);
        assert_eq!(
            text,
            "Both parties agree to keep confidential any proprietary information shared during Brand Refresh. This obligation extends for 3 years beyond the completion of this agreement."
        );
    }

    #[test]
    fn assembler_emits_fixed_section_order() {
        let mut data = sample_data();
        data.sections.deliverables = true;
        data.sections.timeline = true;
        data.sections.payment = true;
        data.sections.rights = true;
        data.sections.revisions = true;
        data.sections.cancellation = true;
        data.sections.confidentiality = true;
        data.sections.jurisdiction = true;
        data.sections.liability = true;
        data.sections.dispute_resolution = true;
        data.custom_clauses
            .push(crate::model::CustomClause::new("Exclusivity", "No competing work."));

        let doc = assemble(&data);
        let keys: Vec<&str> = doc.sections.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                "scope",
                "deliverables",
                "timeline",
                "payment",
                "rights",
                "revisions",
                "cancellation",
                "confidentiality",
                "jurisdiction",
                "liability",
                "dispute_resolution",
                "general_provisions",
                "custom",
            ]
        );
    }

    #[test]
    fn disabled_sections_are_excluded_and_overrides_win() {
        let mut data = sample_data();
        data.sections.scope_of_work = true;
        data.scope_of_work = "Custom scope text.".to_string();
        data.sections.rights = false;
        data.rights_usage = "Never shown".to_string();

        let doc = assemble(&data);
        let scope = doc.sections.iter().find(|s| s.key == "scope").unwrap();
        assert_eq!(
            scope.blocks,
            vec![Block::Text {
                text: "Custom scope text.".to_string()
            }]
        );
        assert!(doc.sections.iter().all(|s| s.key != "rights"));
    }

    #[test]
    fn general_provisions_always_present_with_notice_emails() {
        let mut data = sample_data();
        data.creator_email = "jordan@example.com".to_string();
        data.client_email = "legal@acme.example".to_string();
        let doc = assemble(&data);
        let general = doc
            .sections
            .iter()
            .find(|s| s.key == "general_provisions")
            .unwrap();
        let subheadings: Vec<&str> = general
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Subheading { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            subheadings,
            vec![
                "Entire Agreement",
                "Severability",
                "Amendments & Modifications",
                "Waiver",
                "Assignment",
                "Notices",
            ]
        );
        let notices = general
            .blocks
            .iter()
            .rev()
            .find_map(|b| match b {
                Block::Text { text } => Some(text),
                _ => None,
            })
            .unwrap();
        assert!(notices.contains("Creator: jordan@example.com, Client: legal@acme.example"));
    }

    #[test]
    fn empty_custom_clauses_are_skipped() {
        let mut data = sample_data();
        data.custom_clauses
            .push(crate::model::CustomClause::new("", "orphan body"));
        data.custom_clauses
            .push(crate::model::CustomClause::new("Orphan title", ""));
        let doc = assemble(&data);
        assert!(doc.sections.iter().all(|s| s.key != "custom"));
    }

    #[test]
    fn parties_render_placeholder_names_and_city_line() {
        let mut data = ContractData::default();
        data.creator_city = "Lisbon".to_string();
        data.creator_zip = "1100".to_string();
        let doc = assemble(&data);
        assert_eq!(doc.creator.lines[0], "[YOUR_NAME]");
        assert_eq!(doc.client.lines[0], "[CLIENT_NAME]");
        assert!(doc.creator.lines.contains(&"Lisbon 1100".to_string()));
    }
}
