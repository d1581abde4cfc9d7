//! Installment calculation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tellerbot_common::{format_dp, MissingFields};
use tracing::{debug, info, instrument};

use crate::error::{LoanError, LoanResult};
use crate::extract::{extract_loan_details, LoanDetails};

pub const FIELD_AMOUNT: &str = "loan amount";
pub const FIELD_RATE: &str = "interest rate";
pub const FIELD_TENURE: &str = "loan tenure";

/// Complete loan terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal.
    pub principal: f64,
    /// Annual interest rate in percent.
    pub annual_rate: f64,
    /// Tenure in years.
    pub tenure_years: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate: f64, tenure_years: f64) -> Self {
        Self {
            principal,
            annual_rate,
            tenure_years,
        }
    }

    fn validate(&self) -> LoanResult<()> {
        if !(self.principal.is_finite() && self.principal > 0.0) {
            return Err(LoanError::InvalidTerms("the loan amount must be positive".to_string()));
        }
        if !(self.annual_rate.is_finite() && self.annual_rate >= 0.0) {
            return Err(LoanError::InvalidTerms(
                "the interest rate cannot be negative".to_string(),
            ));
        }
        if !(self.tenure_years.is_finite() && self.tenure_years > 0.0) {
            return Err(LoanError::InvalidTerms("the tenure must be positive".to_string()));
        }
        Ok(())
    }
}

impl TryFrom<LoanDetails> for LoanTerms {
    type Error = MissingFields;

    fn try_from(details: LoanDetails) -> Result<Self, Self::Error> {
        match (details.amount, details.annual_rate, details.tenure_years) {
            (Some(principal), Some(rate), Some(years)) => Ok(Self::new(principal, rate, years)),
            _ => {
                let mut missing = MissingFields::new();
                missing
                    .check(details.amount.is_none(), FIELD_AMOUNT)
                    .check(details.annual_rate.is_none(), FIELD_RATE)
                    .check(details.tenure_years.is_none(), FIELD_TENURE);
                Err(missing)
            }
        }
    }
}

/// Monthly installment and totals over the life of a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiBreakdown {
    pub terms: LoanTerms,
    pub monthly_installment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl fmt::Display for EmiBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = &self.terms;

        writeln!(f, "Based on the provided information:")?;
        writeln!(f, "Loan Amount: {}", terms.principal)?;
        writeln!(f, "Annual Interest Rate: {}%", terms.annual_rate)?;
        writeln!(f, "Loan Tenure: {} years", terms.tenure_years)?;
        writeln!(f)?;
        writeln!(
            f,
            "Your monthly EMI will be: {}",
            format_dp(self.monthly_installment, 2)
        )?;
        writeln!(
            f,
            "Total amount you will pay over {} years: {}",
            terms.tenure_years,
            format_dp(self.total_payment, 2)
        )?;
        write!(
            f,
            "Total interest you will pay: {}",
            format_dp(self.total_interest, 2)
        )
    }
}

/// Calculate the equated monthly installment for a loan.
///
/// `emi = P * r / (1 - (1 + r)^-n)` with `r` the monthly rate and `n` the
/// number of months. A zero rate spreads the principal evenly.
pub fn calculate(terms: &LoanTerms) -> LoanResult<EmiBreakdown> {
    terms.validate()?;

    let monthly_rate = terms.annual_rate / (12.0 * 100.0);
    let months = terms.tenure_years * 12.0;

    let monthly_installment = if monthly_rate == 0.0 {
        terms.principal / months
    } else {
        // Negative exponent so long tenures tend to P * r instead of inf / inf
        terms.principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-months))
    };

    let total_payment = monthly_installment * months;
    if !(monthly_installment.is_finite() && total_payment.is_finite()) {
        return Err(LoanError::InvalidTerms(
            "the repayment is too large to calculate".to_string(),
        ));
    }

    Ok(EmiBreakdown {
        terms: *terms,
        monthly_installment,
        total_payment,
        total_interest: total_payment - terms.principal,
    })
}

/// Answers free-text EMI queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmiCalculator;

impl EmiCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Extract terms from a query and calculate the installment.
    pub fn answer(&self, text: &str) -> LoanResult<EmiBreakdown> {
        let terms = LoanTerms::try_from(extract_loan_details(text)).map_err(LoanError::Incomplete)?;
        calculate(&terms)
    }

    /// Answer a query with text for the user. Failures become a prompt or an explanation.
    #[instrument(skip(self))]
    pub fn run(&self, text: &str) -> String {
        match self.answer(text) {
            Ok(breakdown) => {
                info!(
                    monthly_installment = breakdown.monthly_installment,
                    "EMI calculated"
                );
                breakdown.to_string()
            }
            Err(err) => {
                debug!(error = %err, "EMI query not answered");
                err.user_message()
            }
        }
    }
}
