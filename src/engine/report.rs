use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{normalize, schema, or_default, SearchParams};
use super::{DEFAULT_BUDGET, DEFAULT_EXPERIENCE, DEFAULT_PRODUCT, DEFAULT_REGION};
use crate::config::AppConfig;
use crate::error::EngineError;
use crate::gemini::{Content, GenerateRequest, GenerationConfig, GenerativeBackend, Part};

// ─── Typed report contract ──────────────────────────────────────────────────
//
// These model exactly what the response schema requests: schema-required
// fields are plain, schema-optional fields are `Option`. Rejection is
// all-or-nothing; a report missing any required field never reaches the UI.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub overview: Overview,
    pub trends: Trends,
    pub pricing: Pricing,
    pub meta_ads: MetaAds,
    pub seo_listing: SeoListing,
    pub scaling_strategy: ScalingStrategy,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub explanation: String,
    pub use_cases: Vec<String>,
    pub buyer_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub status: TrendStatus,
    pub chart_data: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStatus {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub interest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub mvp: f64,
    #[serde(rename = "mvpROI", skip_serializing_if = "Option::is_none")]
    pub mvp_roi: Option<String>,
    pub mvp_value_note: String,
    pub competitive: f64,
    #[serde(rename = "competitiveROI", skip_serializing_if = "Option::is_none")]
    pub competitive_roi: Option<String>,
    pub competitive_value_note: String,
    pub premium: f64,
    #[serde(rename = "premiumROI", skip_serializing_if = "Option::is_none")]
    pub premium_roi: Option<String>,
    pub premium_value_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAds {
    pub best_time: BestTime,
    pub targeting: Targeting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_tips: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTime {
    pub peak_time: String,
    pub days: Vec<String>,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Targeting {
    pub specific_audience_interests: Vec<String>,
    pub lookalike_strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoListing {
    pub titles: Vec<ListingCopy>,
    pub meta_descriptions: Vec<ListingCopy>,
}

/// One piece of listing copy, labelled with the angle it takes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCopy {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingStrategy {
    pub reinvestment_triggers: String,
    pub line_expansion_ideas: Vec<String>,
    pub brand_building_strategy: String,
    pub actionable_advice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub decision: Decision,
    pub launch_time: String,
    pub today_action: String,
    pub success_factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Go,
    #[serde(rename = "No-Go")]
    NoGo,
    Conditional,
}

/// A validated report plus the grounding citations that arrived with it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub report: ProductReport,
    pub sources: Vec<Value>,
    pub generated_at: String,
}

// ─── Request construction ───────────────────────────────────────────────────

pub(crate) fn build_report_prompt(params: &SearchParams) -> String {
    let product = or_default(&params.product_name, DEFAULT_PRODUCT);
    let budget = or_default(&params.budget_range, DEFAULT_BUDGET);
    let region = or_default(&params.region, DEFAULT_REGION);
    let experience = or_default(&params.experience_level, DEFAULT_EXPERIENCE);

    format!(
        "Act as a world-class senior AI product architect and Meta Ads analyst.\n\n\
         TASK: Generate a simple, high-fidelity market strategy and financial report for: \"{product}\".\n\n\
         CONTEXT:\n\
         - Startup Budget: {budget}\n\
         - Target Region: {region}\n\
         - Seller Experience: {experience}\n\n\
         STRICT DATA REQUIREMENTS:\n\
         1. META ADS FOCUS: Categorize audience interests and provide a specific Lookalike (LAL) strategy.\n\
         2. PRICE PREDICTION: 3 tiers: MVP, Competitive, Premium. Use numbers ONLY.\n\
         3. ROI %: Estimate profit percentage.\n\
         4. NO REPETITION: Do not repeat sentences or loop text. Keep all text fields under 150 characters.\n\n\
         You MUST return ONLY a valid JSON object."
    )
}

pub(crate) fn build_report_request(config: &AppConfig, params: &SearchParams) -> GenerateRequest {
    let mut request = GenerateRequest::new(
        config.report_model.clone(),
        vec![Content::user(vec![Part::text(build_report_prompt(params))])],
    );
    request.tools = Some(vec![json!({ "googleSearch": {} })]);
    request.generation_config = Some(GenerationConfig {
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(schema::report_schema().clone()),
        ..Default::default()
    });
    request
}

// ─── Operation ──────────────────────────────────────────────────────────────

/// Generate a search-grounded market report for the given query. Fails with
/// `MalformedData` when the model strays from the schema contract; never
/// retries.
pub async fn generate_report(
    backend: &dyn GenerativeBackend,
    config: &AppConfig,
    params: &SearchParams,
) -> Result<ReportBundle, EngineError> {
    let request = build_report_request(config, params);
    let response = backend.generate(request).await?;

    let report = normalize::parse_json("generate_report", response.text().as_deref())?;
    let sources = response.grounding_chunks();
    log::info!("report generated with {} grounding sources", sources.len());

    Ok(ReportBundle {
        report,
        sources,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}
