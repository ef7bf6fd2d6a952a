use chrono::{Local, NaiveDate};
use thiserror::Error as ThisError;

use desk_data::{
    Member, MemberDraft, MembershipType, Payment, PaymentDraft, YesNo,
};

#[derive(Debug, ThisError)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be at least 1")]
    NotPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: String },
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

/// Parse a date input, dropping any time component the value
/// may carry ("2025-04-01T08:30:00" -> 2025-04-01).
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    let date_part = value.split('T').next().unwrap_or("");
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
        FormError::Invalid {
            field,
            value: value.to_string(),
        }
    })
}

/// Field values of the add / edit member modal.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberForm {
    pub first_name: String,
    pub last_name: String,
    pub membership_type: MembershipType,
    pub membership_expiry: Option<NaiveDate>,
    pub membership_renewal: Option<NaiveDate>,
    pub annual_membership: YesNo,
    pub notes1: String,
    pub notes2: String,
    pub notes3: String,
    pub length_months: u32,
}

impl Default for MemberForm {
    /// Add-mode defaults.
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            membership_type: MembershipType::Annual,
            membership_expiry: None,
            membership_renewal: None,
            annual_membership: YesNo::No,
            notes1: String::new(),
            notes2: String::new(),
            notes3: String::new(),
            length_months: 1,
        }
    }
}

impl MemberForm {
    /// Edit-mode form, populated from the selected record.
    pub fn from_member(member: &Member) -> Self {
        Self {
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            membership_type: member.membership_type,
            membership_expiry: Some(member.membership_expiry),
            membership_renewal: Some(member.membership_renewal),
            annual_membership: member.annual_membership,
            notes1: member.notes1.clone(),
            notes2: member.notes2.clone(),
            notes3: member.notes3.clone(),
            length_months: member.length_months,
        }
    }

    /// Update a single field from its input value, the way a
    /// controlled input would.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "first_name" => self.first_name = value.to_string(),
            "last_name" => self.last_name = value.to_string(),
            "membership_type" => {
                self.membership_type =
                    value.parse().map_err(|_| FormError::Invalid {
                        field: "membership_type",
                        value: value.to_string(),
                    })?
            }
            "membership_expiry" => {
                self.membership_expiry =
                    Some(parse_date("membership_expiry", value)?)
            }
            "membership_renewal" => {
                self.membership_renewal =
                    Some(parse_date("membership_renewal", value)?)
            }
            "annual_membership" => {
                self.annual_membership =
                    value.parse().map_err(|_| FormError::Invalid {
                        field: "annual_membership",
                        value: value.to_string(),
                    })?
            }
            "notes1" => self.notes1 = value.to_string(),
            "notes2" => self.notes2 = value.to_string(),
            "notes3" => self.notes3 = value.to_string(),
            "length_months" => {
                self.length_months =
                    value.parse().map_err(|_| FormError::Invalid {
                        field: "length_months",
                        value: value.to_string(),
                    })?
            }
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Validate the required-field contract and produce the
    /// submission payload.
    pub fn to_draft(&self) -> Result<MemberDraft, FormError> {
        if self.first_name.trim().is_empty() {
            return Err(FormError::Required("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(FormError::Required("last_name"));
        }
        let membership_expiry = self
            .membership_expiry
            .ok_or(FormError::Required("membership_expiry"))?;
        let membership_renewal = self
            .membership_renewal
            .ok_or(FormError::Required("membership_renewal"))?;
        if self.length_months < 1 {
            return Err(FormError::NotPositive("length_months"));
        }

        Ok(MemberDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            membership_type: self.membership_type,
            membership_expiry,
            membership_renewal,
            annual_membership: self.annual_membership,
            notes1: self.notes1.clone(),
            notes2: self.notes2.clone(),
            notes3: self.notes3.clone(),
            length_months: self.length_months,
        })
    }
}

/// Field values of the add / edit payment modal.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub member_id: Option<u32>,
    pub amount: Option<f64>,
    pub date: NaiveDate,
    pub payment_type: MembershipType,
    pub expiry: Option<NaiveDate>,
}

impl Default for PaymentForm {
    /// Add-mode defaults, payment date preset to today.
    fn default() -> Self {
        Self {
            member_id: None,
            amount: None,
            date: Local::now().date_naive(),
            payment_type: MembershipType::Annual,
            expiry: None,
        }
    }
}

impl PaymentForm {
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            member_id: Some(payment.member_id),
            amount: Some(payment.amount),
            date: payment.date,
            payment_type: payment.payment_type,
            expiry: Some(payment.expiry),
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "member_id" => {
                self.member_id =
                    Some(value.parse().map_err(|_| FormError::Invalid {
                        field: "member_id",
                        value: value.to_string(),
                    })?)
            }
            "amount" => {
                self.amount =
                    Some(value.parse().map_err(|_| FormError::Invalid {
                        field: "amount",
                        value: value.to_string(),
                    })?)
            }
            "date" => self.date = parse_date("date", value)?,
            "payment_type" => {
                self.payment_type =
                    value.parse().map_err(|_| FormError::Invalid {
                        field: "payment_type",
                        value: value.to_string(),
                    })?
            }
            "expiry" => self.expiry = Some(parse_date("expiry", value)?),
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    pub fn to_draft(&self) -> Result<PaymentDraft, FormError> {
        let member_id = self.member_id.ok_or(FormError::Required("member_id"))?;
        let amount = self.amount.ok_or(FormError::Required("amount"))?;
        if amount < 0.0 {
            return Err(FormError::Negative("amount"));
        }
        let expiry = self.expiry.ok_or(FormError::Required("expiry"))?;

        Ok(PaymentDraft {
            member_id,
            amount,
            date: self.date,
            payment_type: self.payment_type,
            expiry,
        })
    }
}
