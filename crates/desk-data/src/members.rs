use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership rate class. Also used as the payment type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
pub enum MembershipType {
    #[default]
    Annual,
    Monthly,
    #[serde(rename = "Walk-in")]
    #[sqlx(rename = "Walk-in")]
    WalkIn,
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MembershipType::Annual => write!(f, "Annual"),
            MembershipType::Monthly => write!(f, "Monthly"),
            MembershipType::WalkIn => write!(f, "Walk-in"),
        }
    }
}

impl FromStr for MembershipType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annual" => Ok(MembershipType::Annual),
            "monthly" => Ok(MembershipType::Monthly),
            "walk-in" | "walkin" => Ok(MembershipType::WalkIn),
            other => Err(anyhow!("unknown membership type: {}", other)),
        }
    }
}

/// Yes / no flag stored as text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            YesNo::Yes => write!(f, "Yes"),
            YesNo::No => write!(f, "No"),
        }
    }
}

impl FromStr for YesNo {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            other => Err(anyhow!("expected yes or no, got: {}", other)),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub membership_type: Option<MembershipType>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub membership_type: MembershipType,
    pub membership_expiry: NaiveDate,
    pub membership_renewal: NaiveDate,
    pub annual_membership: YesNo,
    pub notes1: String,
    pub notes2: String,
    pub notes3: String,
    pub length_months: u32,
    pub created_at: NaiveDateTime,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create / update payload for a member. Everything the
/// collaborator assigns itself (id, created_at) is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberDraft {
    pub first_name: String,
    pub last_name: String,
    pub membership_type: MembershipType,
    pub membership_expiry: NaiveDate,
    pub membership_renewal: NaiveDate,
    pub annual_membership: YesNo,
    pub notes1: String,
    pub notes2: String,
    pub notes3: String,
    pub length_months: u32,
}

impl MemberDraft {
    /// Apply the draft onto an existing record, keeping id
    /// and created_at.
    pub fn apply_to(&self, member: &Member) -> Member {
        Member {
            id: member.id,
            created_at: member.created_at,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            membership_type: self.membership_type,
            membership_expiry: self.membership_expiry,
            membership_renewal: self.membership_renewal,
            annual_membership: self.annual_membership,
            notes1: self.notes1.clone(),
            notes2: self.notes2.clone(),
            notes3: self.notes3.clone(),
            length_months: self.length_months,
        }
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        MemberDraft {
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            membership_type: member.membership_type,
            membership_expiry: member.membership_expiry,
            membership_renewal: member.membership_renewal,
            annual_membership: member.annual_membership,
            notes1: member.notes1.clone(),
            notes2: member.notes2.clone(),
            notes3: member.notes3.clone(),
            length_months: member.length_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_type_parse() {
        assert_eq!(
            "walk-in".parse::<MembershipType>().unwrap(),
            MembershipType::WalkIn
        );
        assert_eq!(
            "Annual".parse::<MembershipType>().unwrap(),
            MembershipType::Annual
        );
        assert!("weekly".parse::<MembershipType>().is_err());
    }

    #[test]
    fn test_membership_type_display() {
        assert_eq!(MembershipType::WalkIn.to_string(), "Walk-in");
    }

    #[test]
    fn test_draft_apply_keeps_identity() {
        let member = Member {
            id: 23,
            first_name: "Erika".to_string(),
            last_name: "Mustermann".to_string(),
            ..Default::default()
        };
        let mut draft = MemberDraft::from(&member);
        draft.first_name = "Max".to_string();
        let updated = draft.apply_to(&member);
        assert_eq!(updated.id, 23);
        assert_eq!(updated.created_at, member.created_at);
        assert_eq!(updated.first_name, "Max");
        assert_eq!(updated.last_name, "Mustermann");
    }
}
