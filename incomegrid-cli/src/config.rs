use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use incomegrid_core::{Axis, Category, CategoryRegistry, Taxonomy};
use incomegrid_statement::{DEFAULT_END_LABEL, DEFAULT_START_LABEL, ScoringConfig, StatementOptions};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub table: TableSection,
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Replaces the built-in taxonomies when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<TaxonomySection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSection {
    /// First CSV record is a column header
    pub has_headers: bool,
    /// Row opening the investment income section
    pub start_label: String,
    /// Closing total row (included in the section)
    pub end_label: String,
}

impl Default for TableSection {
    fn default() -> Self {
        Self {
            has_headers: true,
            start_label: DEFAULT_START_LABEL.to_string(),
            end_label: DEFAULT_END_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomySection {
    pub investment: Vec<CategoryEntry>,
    pub income: Vec<CategoryEntry>,
    /// Income column order of the record grid; defaults to `income` order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub terms: Vec<String>,
}

impl TaxonomySection {
    fn build(entries: &[CategoryEntry], axis: Axis) -> Result<Taxonomy> {
        let categories = entries
            .iter()
            .map(|e| Category::new(e.name.clone(), axis, e.terms.iter().cloned()))
            .collect();
        Ok(Taxonomy::new(axis, categories)?)
    }

    pub fn registry(&self) -> Result<CategoryRegistry> {
        let investment = Self::build(&self.investment, Axis::Investment).context("investment taxonomy")?;
        let income = Self::build(&self.income, Axis::Income).context("income taxonomy")?;
        let registry = CategoryRegistry::new(investment, income)?;
        match &self.record_order {
            Some(order) => Ok(registry.with_record_order(order.iter().cloned())?),
            None => Ok(registry),
        }
    }
}

impl Config {
    pub fn registry(&self) -> Result<CategoryRegistry> {
        match &self.taxonomy {
            Some(section) => section.registry(),
            None => Ok(CategoryRegistry::builtin()),
        }
    }

    pub fn statement_options(&self, strict: bool) -> StatementOptions {
        StatementOptions {
            start_label: self.table.start_label.clone(),
            end_label: self.table.end_label.clone(),
            has_headers: self.table.has_headers,
            strict,
            scoring: self.scoring,
        }
    }
}

const CONFIG_FILE: &str = "config.toml";

/// `~/.incomegrid/config.toml`
pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".incomegrid").join(CONFIG_FILE))
}

/// Load `explicit` if given (it must exist), else the home config if present,
/// else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
