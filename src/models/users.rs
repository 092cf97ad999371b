use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account kind of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Donor,
    BloodBank,
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Donor, UserType::BloodBank, UserType::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Donor => "DONOR",
            UserType::BloodBank => "BLOOD_BANK",
            UserType::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown user type '{}'", s))
    }
}

/// ABO/Rh blood group label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown blood type '{}'", s))
    }
}

/// A registered donor, blood bank or admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

/// A fully validated record ready to be inserted; id and timestamp are
/// assigned by the service layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl From<NewUser> for User {
    fn from(new_user: NewUser) -> Self {
        Self {
            id: new_user.id,
            email: new_user.email,
            name: new_user.name,
            phone: new_user.phone,
            address: new_user.address,
            blood_type: new_user.blood_type,
            user_type: new_user.user_type,
            created_at: new_user.created_at,
        }
    }
}

/// HTTP API request body for creating a user.
///
/// Every field is optional at the wire level so that a missing required
/// field is reported as a validation error naming it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub user_type: Option<String>,
}

/// Query string accepted by `DELETE /api/users?id=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteUserQuery {
    pub id: Option<String>,
}
