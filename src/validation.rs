//! Input validation for the user resource.
//!
//! Required fields are checked here, before anything reaches the store.
//! Email and phone formats are deliberately passed through untouched.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    error::{Error, Result, ValidationErrors},
    models::users::{BloodType, CreateUserRequest, UserType},
};

/// A create request whose required fields are present and whose enum
/// labels are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreateUser {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    pub user_type: UserType,
}

/// Trims a value and drops it entirely when nothing is left.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates a create request, collecting every field problem at once.
///
/// # Errors
/// * `Validation` - a required field is missing or blank, or `userType` /
///   `bloodType` is not a known label
///
/// # Examples
/// ```
/// use bloodlink::models::users::CreateUserRequest;
/// use bloodlink::validation::validate_create_user;
///
/// let request = CreateUserRequest {
///     email: Some("a@x.com".into()),
///     name: Some("A".into()),
///     user_type: Some("DONOR".into()),
///     ..Default::default()
/// };
/// assert!(validate_create_user(request).is_ok());
/// assert!(validate_create_user(Default::default()).is_err());
/// ```
pub fn validate_create_user(request: CreateUserRequest) -> Result<ValidCreateUser> {
    let mut fields = HashMap::new();

    let email = non_blank(request.email);
    if email.is_none() {
        fields.insert("email".to_string(), "Email is required".to_string());
    }

    let name = non_blank(request.name);
    if name.is_none() {
        fields.insert("name".to_string(), "Name is required".to_string());
    }

    let user_type = match non_blank(request.user_type) {
        None => {
            fields.insert("userType".to_string(), "User type is required".to_string());
            None
        }
        Some(raw) => match raw.parse::<UserType>() {
            Ok(user_type) => Some(user_type),
            Err(message) => {
                fields.insert("userType".to_string(), message);
                None
            }
        },
    };

    let blood_type = match non_blank(request.blood_type) {
        None => None,
        Some(raw) => match raw.parse::<BloodType>() {
            Ok(blood_type) => Some(blood_type),
            Err(message) => {
                fields.insert("bloodType".to_string(), message);
                None
            }
        },
    };

    match (email, name, user_type) {
        (Some(email), Some(name), Some(user_type)) if fields.is_empty() => Ok(ValidCreateUser {
            email,
            name,
            phone: non_blank(request.phone),
            address: non_blank(request.address),
            blood_type,
            user_type,
        }),
        _ => Err(into_error(fields)),
    }
}

fn into_error(mut fields: HashMap<String, String>) -> Error {
    if fields.len() == 1 {
        if let Some((field, message)) = fields.drain().next() {
            return Error::Validation(ValidationErrors::Single { field, message });
        }
    }
    Error::Validation(ValidationErrors::Multiple { fields })
}

/// Validates the id parameter of a delete request.
///
/// A missing or blank id is a validation error. An id that is present but
/// not a UUID can never match a record, so it is reported as not found.
pub fn validate_user_id(id: Option<&str>) -> Result<Uuid> {
    let id = id.map(str::trim).filter(|id| !id.is_empty()).ok_or_else(|| {
        Error::invalid_field("id", "Missing id")
    })?;

    Uuid::parse_str(id).map_err(|_| Error::NotFound("User not found".to_string()))
}
