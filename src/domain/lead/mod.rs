//! Lead - the prospective founder registered before a diagnostic starts.

mod company_size;
mod registration;

pub use company_size::CompanySizeBand;
pub use registration::LeadRegistration;
