//! Film catalog rules: status enum, submission validation, revenue split.

use crate::error::CoreError;

/// Currency applied when a filmmaker does not choose one.
pub const DEFAULT_CURRENCY: &str = "KES";

/// Maximum accepted title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Share of every sale paid to the filmmaker, in percent.
pub const FILMMAKER_SHARE_PCT: u32 = 70;

/// Share of every sale paid to the referring distributor, in percent.
pub const DISTRIBUTOR_SHARE_PCT: u32 = 20;

/// Share of every sale retained by the platform, in percent.
pub const PLATFORM_SHARE_PCT: u32 = 10;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a film listing.
///
/// Submissions start as `Draft`; only `Published` films are browsable and
/// purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmStatus {
    Draft,
    Published,
}

impl FilmStatus {
    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "Unknown film status '{other}'. Must be one of: draft, published"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Validate that a title is non-empty (after trimming) and within bounds.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Film title must not be empty".into()));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(CoreError::Validation(format!(
            "Film title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate that a selling price is a finite, strictly positive amount.
pub fn validate_selling_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::Validation(
            "Selling price must be a positive amount".into(),
        ));
    }
    Ok(())
}

/// Validate an ISO 4217-style currency code (three ASCII uppercase letters).
pub fn validate_currency(currency: &str) -> Result<(), CoreError> {
    if currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency code '{currency}'. Expected a 3-letter code like KES or USD"
        )))
    }
}

// ---------------------------------------------------------------------------
// Revenue split
// ---------------------------------------------------------------------------

/// How a sale amount divides between the parties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueSplit {
    pub filmmaker: f64,
    pub distributor: f64,
    pub platform: f64,
}

/// Split a sale amount 70/20/10 between filmmaker, distributor, and platform.
///
/// When the sale has no referring distributor, the distributor share accrues
/// to the platform instead.
pub fn split_revenue(amount: f64, has_distributor: bool) -> RevenueSplit {
    let filmmaker = amount * f64::from(FILMMAKER_SHARE_PCT) / 100.0;
    let distributor_share = amount * f64::from(DISTRIBUTOR_SHARE_PCT) / 100.0;
    let platform_base = amount * f64::from(PLATFORM_SHARE_PCT) / 100.0;

    if has_distributor {
        RevenueSplit {
            filmmaker,
            distributor: distributor_share,
            platform: platform_base,
        }
    } else {
        RevenueSplit {
            filmmaker,
            distributor: 0.0,
            platform: platform_base + distributor_share,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
