pub mod checkin;
pub mod facility;
pub mod guest;
pub mod mats_list;
pub mod payment_type;
pub mod summary;
pub mod template;
pub mod user;

pub use checkin::{AssignmentRequest, Checkin, CheckinRequest, CheckinValues};
pub use facility::{Facility, FacilityRequest};
pub use guest::{Guest, GuestRequest};
pub use mats_list::{MatsList, MatsListError, MAX_MAT_NUMBER};
pub use payment_type::PaymentType;
pub use summary::{format_amount, roll_up_by_month, summarize_by_date, Summary};
pub use template::{Template, TemplateRequest};
pub use user::{User, UserRequest};

/// Trim an optional string; blank becomes `None`.
pub fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_blank() {
        assert_eq!(normalize(Some("  x ".into())), Some("x".into()));
        assert_eq!(normalize(Some("   ".into())), None);
        assert_eq!(normalize(None), None);
    }
}
