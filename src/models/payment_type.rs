use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// How a guest paid for a mat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PaymentType {
    #[serde(rename = "$$")]
    Cash,
    #[serde(rename = "AG")]
    Agency,
    #[serde(rename = "CT")]
    ClientTrust,
    #[serde(rename = "FM")]
    FreeMat,
    #[serde(rename = "MM")]
    MissionManager,
    #[serde(rename = "SW")]
    ShelterWorker,
    #[serde(rename = "UK")]
    Unknown,
}

impl PaymentType {
    pub const ALL: [PaymentType; 7] = [
        PaymentType::Cash,
        PaymentType::Agency,
        PaymentType::ClientTrust,
        PaymentType::FreeMat,
        PaymentType::MissionManager,
        PaymentType::ShelterWorker,
        PaymentType::Unknown,
    ];

    /// Two-character code stored in the `payment_type` column.
    pub fn code(self) -> &'static str {
        match self {
            PaymentType::Cash => "$$",
            PaymentType::Agency => "AG",
            PaymentType::ClientTrust => "CT",
            PaymentType::FreeMat => "FM",
            PaymentType::MissionManager => "MM",
            PaymentType::ShelterWorker => "SW",
            PaymentType::Unknown => "UK",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Agency => "Agency Voucher",
            PaymentType::ClientTrust => "Client Trust",
            PaymentType::FreeMat => "Free Mat",
            PaymentType::MissionManager => "Mission Manager",
            PaymentType::ShelterWorker => "Shelter Worker",
            PaymentType::Unknown => "Unknown",
        }
    }

    /// Lenient lookup used by aggregation: unrecognized codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pt| pt.code() == code.trim())
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentType(pub String);

impl fmt::Display for UnknownPaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown payment type '{}'", self.0)
    }
}

impl std::error::Error for UnknownPaymentType {}

impl FromStr for PaymentType {
    type Err = UnknownPaymentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownPaymentType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back_to_their_variant() {
        for pt in PaymentType::ALL {
            assert_eq!(pt.code().parse::<PaymentType>(), Ok(pt));
        }
    }

    #[test]
    fn unrecognized_code_is_rejected() {
        assert_eq!(PaymentType::from_code("ZZ"), None);
        assert!("".parse::<PaymentType>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&PaymentType::Cash).unwrap();
        assert_eq!(json, "\"$$\"");
    }
}
