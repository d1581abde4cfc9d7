//! Tellerbot Loan Calculator
//!
//! Equated monthly installment (EMI) calculation for loan queries written in
//! free text, e.g. "EMI for 5 lakh at 10% for 5 years".

pub mod emi;
pub mod error;
pub mod extract;

pub use emi::{calculate, EmiBreakdown, EmiCalculator, LoanTerms};
pub use error::{LoanError, LoanResult};
pub use extract::{extract_loan_details, LoanDetails};
