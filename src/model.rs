mod dates;
mod ids;
mod lease;
mod status;

pub use self::dates::{add_one_year, format_date, parse_date};
pub use self::ids::{ApartmentId, LeaseId, TenantId};
pub use self::lease::{Lease, LeaseTerms, NewLease, RentAmount};
pub use self::status::LeaseStatus;

#[cfg(test)]
#[path = "tests/model/model_tests.rs"]
mod tests;
