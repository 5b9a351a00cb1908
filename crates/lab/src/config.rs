//! Run settings loaded from TOML.
//!
//! Every field is optional. Missing run parameters fall back to the selected
//! problem's defaults when the settings are resolved.
//!
//! ```toml
//! problem = "custom"
//! rhs = "cos(t) - y"
//! exact = "0.5 * (sin(t) + cos(t)) + (y0 - 0.5) * exp(-t)"
//! tf = 6.28318
//! h = 0.1
//! rate = 1.0
//!
//! [visibility]
//! exact = true
//! euler = true
//! midpoint = false
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{self, CUSTOM_ID, Defaults},
    params::RunParams,
    playback::DEFAULT_RATE,
    render::Visibility,
};

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Catalog id or `"custom"`.
    pub problem: String,
    pub t0: Option<f64>,
    pub tf: Option<f64>,
    pub y0: Option<f64>,
    pub h: Option<f64>,

    /// Right-hand side for a custom problem.
    pub rhs: Option<String>,

    /// Exact solution for a custom problem.
    pub exact: Option<String>,

    /// Playback rate multiplier.
    pub rate: f64,

    pub visibility: Visibility,
}

/// Errors that can occur when loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown problem `{0}`")]
    UnknownProblem(String),

    #[error("a custom problem needs a right-hand side")]
    MissingRhs,

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            problem: catalog::all()
                .first()
                .map_or(CUSTOM_ID, |p| p.id)
                .to_owned(),
            t0: None,
            tf: None,
            y0: None,
            h: None,
            rhs: None,
            exact: None,
            rate: DEFAULT_RATE,
            visibility: Visibility::default(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid settings TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Checks that the settings describe a runnable problem.
    ///
    /// Expressions are not compiled here; an invalid expression is reported
    /// when the run is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown problem id, a custom problem without a
    /// right-hand side, or a non-finite interval or initial value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.problem == CUSTOM_ID {
            if self.rhs.as_deref().is_none_or(|rhs| rhs.trim().is_empty()) {
                return Err(ConfigError::MissingRhs);
            }
        } else if catalog::get(&self.problem).is_none() {
            return Err(ConfigError::UnknownProblem(self.problem.clone()));
        }

        for (name, value) in [("t0", self.t0), ("tf", self.tf), ("y0", self.y0)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ConfigError::NonFinite(name));
            }
        }

        Ok(())
    }

    /// Returns the defaults of the selected problem.
    ///
    /// # Errors
    ///
    /// Returns an error if the problem id is unknown.
    pub fn defaults(&self) -> Result<Defaults, ConfigError> {
        catalog::defaults(&self.problem)
            .ok_or_else(|| ConfigError::UnknownProblem(self.problem.clone()))
    }

    /// Resolves the run parameters, filling gaps from the problem defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the problem id is unknown.
    pub fn params(&self) -> Result<RunParams, ConfigError> {
        let d = self.defaults()?;
        Ok(RunParams::new(
            self.t0.unwrap_or(d.t0),
            self.tf.unwrap_or(d.tf),
            self.y0.unwrap_or(d.y0),
            self.h.unwrap_or(d.h),
            d.h,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_selects_the_first_problem() {
        let settings = Settings::from_toml("").expect("valid");
        assert_eq!(settings.problem, "exp");
        assert_eq!(settings.rate, DEFAULT_RATE);
        assert_eq!(settings.visibility, Visibility::default());
        assert!(settings.validate().is_ok());

        let params = settings.params().expect("known problem");
        assert_eq!((params.t0, params.tf, params.y0, params.h), (0.0, 2.0, 1.0, 0.2));
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = Settings::from_toml(
            r#"
            problem = "decay"
            tf = 4.0
            h = 0.5

            [visibility]
            exact = false
            "#,
        )
        .expect("valid");

        assert!(!settings.visibility.exact);
        assert!(settings.visibility.euler);

        let params = settings.params().expect("known problem");
        assert_eq!((params.t0, params.tf, params.y0, params.h), (0.0, 4.0, 1.0, 0.5));
    }

    #[test]
    fn custom_problem_needs_rhs() {
        let settings = Settings::from_toml(r#"problem = "custom""#).expect("valid");
        assert!(matches!(settings.validate(), Err(ConfigError::MissingRhs)));

        let settings =
            Settings::from_toml("problem = \"custom\"\nrhs = \"t * y\"").expect("valid");
        assert!(settings.validate().is_ok());
        let params = settings.params().expect("custom defaults");
        assert_eq!(params.h, 0.2);
    }

    #[test]
    fn unknown_problem_is_rejected() {
        let settings = Settings::from_toml(r#"problem = "lorenz""#).expect("valid");
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::UnknownProblem(id)) if id == "lorenz"
        ));
        assert!(settings.params().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            Settings::from_toml("steps = 10"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let settings = Settings::from_toml("y0 = nan").expect("toml allows nan");
        assert!(matches!(settings.validate(), Err(ConfigError::NonFinite("y0"))));
    }
}
