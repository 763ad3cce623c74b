//! Distributor application validation and referral token rules.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Minimum length of the distribution plan, in characters.
pub const PLAN_MIN_CHARS: usize = 50;

/// Maximum length of the distribution plan, in characters.
pub const PLAN_MAX_CHARS: usize = 2000;

/// Minimum believable customer target.
pub const TARGET_CUSTOMERS_MIN: i64 = 10;

/// Maximum accepted customer target.
pub const TARGET_CUSTOMERS_MAX: i64 = 1_000_000;

/// Rollout timeline bounds, in months.
pub const TIMELINE_MIN_MONTHS: i32 = 1;
pub const TIMELINE_MAX_MONTHS: i32 = 60;

/// Maximum length of the experience free-text field, in characters.
pub const EXPERIENCE_MAX_CHARS: usize = 1000;

/// The fields of a distributor application that carry validation rules.
///
/// Borrowed view over whatever DTO the caller assembled; validation happens
/// before any persistence or notification call is made.
#[derive(Debug)]
pub struct ApplicationDraft<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub distribution_plan: &'a str,
    pub target_films: &'a str,
    pub target_customers: i64,
    pub timeline_months: i32,
    pub experience: Option<&'a str>,
    pub portfolio_url: Option<&'a str>,
}

impl ApplicationDraft<'_> {
    /// Validate every constrained field, failing on the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.full_name.trim().is_empty() {
            return Err(CoreError::Validation("Full name is required".into()));
        }
        if !self.email.validate_email() {
            return Err(CoreError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }

        let plan_chars = self.distribution_plan.chars().count();
        if plan_chars < PLAN_MIN_CHARS {
            return Err(CoreError::Validation(format!(
                "Distribution plan must be at least {PLAN_MIN_CHARS} characters"
            )));
        }
        if plan_chars > PLAN_MAX_CHARS {
            return Err(CoreError::Validation(format!(
                "Distribution plan must be at most {PLAN_MAX_CHARS} characters"
            )));
        }

        if self.target_films.trim().is_empty() {
            return Err(CoreError::Validation(
                "Describe which films you plan to distribute".into(),
            ));
        }

        if self.target_customers < TARGET_CUSTOMERS_MIN {
            return Err(CoreError::Validation(format!(
                "Target must be at least {TARGET_CUSTOMERS_MIN} customers"
            )));
        }
        if self.target_customers > TARGET_CUSTOMERS_MAX {
            return Err(CoreError::Validation(format!(
                "Target must be at most {TARGET_CUSTOMERS_MAX} customers"
            )));
        }

        if !(TIMELINE_MIN_MONTHS..=TIMELINE_MAX_MONTHS).contains(&self.timeline_months) {
            return Err(CoreError::Validation(format!(
                "Timeline must be between {TIMELINE_MIN_MONTHS} and {TIMELINE_MAX_MONTHS} months"
            )));
        }

        if let Some(experience) = self.experience {
            if experience.chars().count() > EXPERIENCE_MAX_CHARS {
                return Err(CoreError::Validation(format!(
                    "Experience must be at most {EXPERIENCE_MAX_CHARS} characters"
                )));
            }
        }

        if let Some(url) = self.portfolio_url {
            if !url.is_empty() && !url.validate_url() {
                return Err(CoreError::Validation(
                    "Portfolio URL must be a valid URL".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Application review status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown application status '{other}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}
