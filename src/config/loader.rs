//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionRule, Contributions, PayRules, PayrollConfig, ScheduleConfig, TaxTable,
    WorkSchedule,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── schedule.yaml       # Work schedule and pay rules
/// ├── contributions.yaml  # SSS, PhilHealth and Pag-IBIG rates and caps
/// └── tax_table.yaml      # Annual withholding tax brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Working days per month: {}", loader.pay().working_days_per_month);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or the
    /// assembled configuration fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<ScheduleConfig>(&path.join("schedule.yaml"))?;
        let contributions = Self::load_yaml::<Contributions>(&path.join("contributions.yaml"))?;
        let tax_table = Self::load_yaml::<TaxTable>(&path.join("tax_table.yaml"))?;

        let config = PayrollConfig::new(schedule.schedule, schedule.pay, contributions, tax_table);
        debug!(path = %path.display(), "Loaded payroll configuration");

        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the work schedule.
    pub fn schedule(&self) -> &WorkSchedule {
        &self.config.schedule
    }

    /// Returns the pay rules.
    pub fn pay(&self) -> &PayRules {
        &self.config.pay
    }

    /// Returns the tax table.
    pub fn tax_table(&self) -> &TaxTable {
        &self.config.tax_table
    }

    /// Gets a statutory contribution rule by program name.
    ///
    /// Accepts `sss`, `philhealth` or `pagibig` in any case.
    pub fn get_contribution(&self, program: &str) -> EngineResult<ContributionRule> {
        let contributions = &self.config.contributions;
        match program.to_lowercase().as_str() {
            "sss" => Ok(contributions.sss),
            "philhealth" => Ok(contributions.philhealth),
            "pagibig" | "pag-ibig" => Ok(contributions.pagibig),
            _ => Err(EngineError::InvalidInput {
                field: "program".to_string(),
                message: format!("Unknown contribution program: {}", program),
            }),
        }
    }
}
