// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guests and the blacklist gate.

use crate::documents::full_name;
use crate::error::DomainError;
use crate::validation::{require_text, validate_email, validate_phone};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

const DEFAULT_BLACKLIST_REASON: &str = "guest is blacklisted";

/// Guest gender as recorded at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "O" => Ok(Self::Other),
            _ => Err(DomainError::InvalidChoice {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// A registered hotel guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub nationality_id: i64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Gender>,
    pub blacklisted: bool,
    pub blacklist_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Result of the blacklist gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEligibility {
    pub allowed: bool,
    pub reason: String,
}

impl Guest {
    /// Validates names, contact details and the blacklist rule.
    ///
    /// Phone uniqueness needs the rest of the register and is checked by
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if self.blacklisted && !has_text(self.blacklist_reason.as_deref()) {
            return Err(DomainError::BlacklistReasonRequired);
        }
        Ok(())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.last_name, &self.first_name, self.middle_name.as_deref())
    }

    /// Age in whole years on `today`, or `None` without a birthdate.
    #[must_use]
    pub fn age(&self, today: Date) -> Option<i32> {
        self.date_of_birth.map(|birth| {
            let before_birthday: bool =
                (u8::from(today.month()), today.day()) < (u8::from(birth.month()), birth.day());
            today.year() - birth.year() - i32::from(before_birthday)
        })
    }

    /// The blacklist gate consulted before any booking is created.
    #[must_use]
    pub fn can_book(&self) -> BookingEligibility {
        if self.blacklisted {
            let reason: String = self
                .blacklist_reason
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BLACKLIST_REASON.to_string());
            BookingEligibility {
                allowed: false,
                reason,
            }
        } else {
            BookingEligibility {
                allowed: true,
                reason: String::from("OK"),
            }
        }
    }

    /// Rejects a booking for a guest who may not book.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GuestCannotBook` when the gate is closed.
    pub fn ensure_can_book(&self) -> Result<(), DomainError> {
        let eligibility = self.can_book();
        if eligibility.allowed {
            Ok(())
        } else {
            Err(DomainError::GuestCannotBook {
                reason: eligibility.reason,
            })
        }
    }

    /// Blacklists the guest.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlacklistReasonRequired` if the reason is blank.
    pub fn blacklist(&mut self, reason: &str) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::BlacklistReasonRequired);
        }
        self.blacklisted = true;
        self.blacklist_reason = Some(reason.trim().to_string());
        Ok(())
    }

    /// Lifts the blacklist and clears its reason.
    pub fn clear_blacklist(&mut self) {
        self.blacklisted = false;
        self.blacklist_reason = None;
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
