//! Persistence boundary around the otherwise-pure core: settings.toml under
//! the platform config dir, the creator profile, session JSON files in the
//! data root, and the import/export contract. The core takes and returns
//! immutable snapshots; everything that touches the filesystem lives here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use slug::slugify;
use thiserror::Error;

use crate::model::{ContractData, PricingSession};

// ==========================================
// 1. Settings & creator profile
// ==========================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub data_root: String,
}

pub fn config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "creator-kit", "app") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).ok();
        }
        return config_dir.join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

pub fn load_settings() -> Option<AppSettings> {
    let path = config_path();
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

pub fn save_settings(settings: &AppSettings) -> io::Result<()> {
    let toml_str = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    fs::write(config_path(), toml_str)
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}

const DEFAULT_CREATOR_TEMPLATE: &str = include_str!("../creator.toml");

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CreatorProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub email: String,
    pub phone: String,
}

/// Reads `creator.toml` from the data root, materializing the commented
/// default on first run so the user has something to fill in.
pub fn load_creator_profile(root: &Path) -> io::Result<CreatorProfile> {
    let path = root.join("creator.toml");
    if !path.exists() {
        fs::write(&path, DEFAULT_CREATOR_TEMPLATE)?;
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(io::Error::other)
}

// ==========================================
// 2. Data root layout
// ==========================================

pub fn pricing_path(root: &Path) -> PathBuf {
    root.join("pricing.json")
}

pub fn contracts_dir(root: &Path) -> PathBuf {
    root.join("contracts")
}

pub fn output_dir(root: &Path) -> PathBuf {
    root.join("output")
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join("templates")
}

// ==========================================
// 3. Session persistence
// ==========================================

/// Loads the saved pricing session. Missing or unreadable state falls back
/// to the defaults; an auto-saved session must never block startup.
pub fn load_pricing(root: &Path) -> PricingSession {
    let path = pricing_path(root);
    let Ok(content) = fs::read_to_string(&path) else {
        return PricingSession::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

pub fn save_pricing(root: &Path, session: &PricingSession) -> io::Result<()> {
    let json = serde_json::to_string_pretty(session).map_err(io::Error::other)?;
    fs::write(pricing_path(root), json)
}

pub fn contract_file_name(data: &ContractData) -> String {
    let name = if data.project_name.trim().is_empty() {
        "untitled".to_string()
    } else {
        slugify(&data.project_name)
    };
    format!("{}.json", name)
}

pub fn save_contract(root: &Path, data: &ContractData) -> io::Result<PathBuf> {
    let dir = contracts_dir(root);
    fs::create_dir_all(&dir)?;
    let path = dir.join(contract_file_name(data));
    let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn load_contract(path: &Path) -> Result<ContractData, ImportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// All saved contracts, most recently modified first.
pub fn list_contracts(root: &Path) -> Vec<PathBuf> {
    let dir = contracts_dir(root);
    let mut files: Vec<PathBuf> = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |e| e == "json"))
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort_by_key(|p| fs::metadata(p).and_then(|m| m.modified()).ok());
    files.reverse();
    files
}

// ==========================================
// 4. Import / export
// ==========================================

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read file: {0}")]
    Read(#[from] io::Error),
    #[error("not a valid JSON file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing required field \"{0}\"")]
    Shape(&'static str),
}

/// Imports a pricing data file. The required top-level keys are checked
/// first; everything else merges over the defaults rather than being
/// strictly type-checked field by field.
pub fn import_pricing(path: &Path) -> Result<PricingSession, ImportError> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    for key in ["expenses", "incomeSettings", "creatorData"] {
        if value.get(key).is_none() {
            return Err(ImportError::Shape(key));
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Imports a contract data file; `contractType` is the only required key.
pub fn import_contract(path: &Path) -> Result<ContractData, ImportError> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if value.get("contractType").is_none() {
        return Err(ImportError::Shape("contractType"));
    }
    Ok(serde_json::from_value(value)?)
}

fn dated_file_name(prefix: &str, extension: &str) -> String {
    format!(
        "{}-{}.{}",
        prefix,
        Local::now().format("%Y-%m-%d"),
        extension
    )
}

/// Writes the round-trippable pricing JSON artifact into the output
/// directory and returns its path.
pub fn export_pricing(root: &Path, session: &PricingSession) -> io::Result<PathBuf> {
    let dir = output_dir(root);
    fs::create_dir_all(&dir)?;
    let mut stamped = session.clone();
    stamped.export_date = Local::now().to_rfc3339();
    let path = dir.join(dated_file_name("creator-pricing-data", "json"));
    let json = serde_json::to_string_pretty(&stamped).map_err(io::Error::other)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn export_contract_json(root: &Path, data: &ContractData) -> io::Result<PathBuf> {
    let dir = output_dir(root);
    fs::create_dir_all(&dir)?;
    let mut stamped = data.clone();
    stamped.export_date = Local::now().to_rfc3339();
    let name = if data.project_name.trim().is_empty() {
        "untitled".to_string()
    } else {
        slugify(&data.project_name)
    };
    let path = dir.join(dated_file_name(&format!("contract-{}", name), "json"));
    let json = serde_json::to_string_pretty(&stamped).map_err(io::Error::other)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Path for a non-JSON contract artifact (md, typ, pdf) in the output dir.
pub fn contract_artifact_path(root: &Path, data: &ContractData, extension: &str) -> io::Result<PathBuf> {
    let dir = output_dir(root);
    fs::create_dir_all(&dir)?;
    let name = if data.project_name.trim().is_empty() {
        "untitled".to_string()
    } else {
        slugify(&data.project_name)
    };
    Ok(dir.join(dated_file_name(&format!("contract-{}", name), extension)))
}

/// Path for the rate-card artifact (typ, pdf) in the output dir.
pub fn pricing_artifact_path(root: &Path, extension: &str) -> io::Result<PathBuf> {
    let dir = output_dir(root);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(dated_file_name("pricing-calculator", extension)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContractType, CreatorData, Expense, ExperienceLevel, ProjectTerms};
    use tempfile::tempdir;

    #[test]
    fn pricing_round_trip_through_export_and_import() {
        let dir = tempdir().unwrap();
        let mut session = PricingSession::default();
        session.expenses = vec![Expense::new("Housing", 1500.0)];
        session.markup = 15.0;
        session.creator = CreatorData::Digital {
            experience_level: ExperienceLevel::Senior,
            project_terms: ProjectTerms::ExtraRevisions,
        };

        let path = export_pricing(dir.path(), &session).unwrap();
        let imported = import_pricing(&path).unwrap();

        // The export stamps a date; everything else must round-trip
        // field for field.
        session.export_date = imported.export_date.clone();
        assert_eq!(imported, session);
    }

    #[test]
    fn contract_round_trip_through_export_and_import() {
        let dir = tempdir().unwrap();
        let mut data = ContractData::default();
        data.contract_type = ContractType::Content;
        data.project_name = "Summer Campaign".to_string();
        data.client_name = "Acme".to_string();
        data.sections.payment = true;
        data.confidentiality_subclauses.breach_remedies = true;

        let path = export_contract_json(dir.path(), &data).unwrap();
        let imported = import_contract(&path).unwrap();

        data.export_date = imported.export_date.clone();
        assert_eq!(imported, data);
    }

    #[test]
    fn import_rejects_files_missing_required_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "expenses": [] }"#).unwrap();
        match import_pricing(&path) {
            Err(ImportError::Shape(field)) => assert_eq!(field, "incomeSettings"),
            other => panic!("expected shape error, got {:?}", other.map(|_| ())),
        }

        fs::write(&path, r#"{ "clientName": "Acme" }"#).unwrap();
        match import_contract(&path) {
            Err(ImportError::Shape(field)) => assert_eq!(field, "contractType"),
            other => panic!("expected shape error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn import_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(import_pricing(&path), Err(ImportError::Parse(_))));
    }

    #[test]
    fn import_merges_partial_data_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(
            &path,
            r#"{
                "expenses": [{ "id": "1", "category": "Rent", "monthlyCost": 900 }],
                "incomeSettings": { "taxRate": 25 },
                "creatorData": { "type": "digital" }
            }"#,
        )
        .unwrap();
        let session = import_pricing(&path).unwrap();
        assert_eq!(session.expenses.len(), 1);
        assert_eq!(session.income_settings.tax_rate, 25.0);
        // Unspecified keys keep their defaults.
        assert_eq!(session.income_settings.weeks_per_year, 48.0);
        assert_eq!(session.markup, 0.0);
    }

    #[test]
    fn load_pricing_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let session = load_pricing(dir.path());
        assert_eq!(session, PricingSession::default());

        fs::write(pricing_path(dir.path()), "garbage").unwrap();
        let session = load_pricing(dir.path());
        assert_eq!(session.expenses.len(), 12);
    }

    #[test]
    fn save_and_list_contracts() {
        let dir = tempdir().unwrap();
        let mut data = ContractData::default();
        data.project_name = "Brand Refresh".to_string();
        let path = save_contract(dir.path(), &data).unwrap();
        assert!(path.ends_with("contracts/brand-refresh.json"));

        data.project_name = String::new();
        save_contract(dir.path(), &data).unwrap();

        let listed = list_contracts(dir.path());
        assert_eq!(listed.len(), 2);
        let loaded = load_contract(&path).unwrap();
        assert_eq!(loaded.project_name, "Brand Refresh");
    }

    #[test]
    fn creator_profile_materializes_default_file() {
        let dir = tempdir().unwrap();
        let profile = load_creator_profile(dir.path()).unwrap();
        assert_eq!(profile.name, "");
        assert!(dir.path().join("creator.toml").exists());
    }
}
