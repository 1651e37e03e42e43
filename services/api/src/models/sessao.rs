//! Chat session (`sessao`) model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{self, FieldErrors};

pub const NAME_MAX_CHARS: usize = 30;

/// Row of `sessao`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Sessao {
    pub id_sessao: i32,
    pub name: String,
    pub id_user: Option<i32>,
}

/// Body of `POST /sessao/` and `PUT /sessao/{id}/`
///
/// `id_user` is not read from the body; the owner always comes from the token.
#[derive(Debug, Default, Deserialize)]
pub struct SessaoRequest {
    #[serde(default, deserialize_with = "validation::present")]
    pub name: Option<Value>,
}

/// Validated session fields
#[derive(Debug, Clone)]
pub struct SessaoFields {
    pub name: String,
}

impl SessaoRequest {
    pub fn validate(self) -> Result<SessaoFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors
            .check("name", validation::required_text(self.name))
            .and_then(|name| {
                errors
                    .check("name", validation::max_chars(&name, NAME_MAX_CHARS))
                    .map(|_| name)
            });

        match name {
            Some(name) => errors.into_result(SessaoFields { name }),
            None => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_is_required() {
        let errors = SessaoRequest::default().validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&[validation::REQUIRED.to_string()][..])
        );
    }

    #[test]
    fn test_name_length_limit() {
        let ok = SessaoRequest {
            name: Some(json!("a".repeat(30))),
        };
        assert!(ok.validate().is_ok());

        let too_long = SessaoRequest {
            name: Some(json!("a".repeat(31))),
        };
        let errors = too_long.validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["Ensure this field has no more than 30 characters.".to_string()][..])
        );
    }

    #[test]
    fn test_client_owner_is_ignored() {
        let request: SessaoRequest =
            serde_json::from_value(json!({"name": "trip", "id_user": 99})).unwrap();
        assert_eq!(request.validate().unwrap().name, "trip");
    }

    #[test]
    fn test_name_is_trimmed_before_length_check() {
        let request = SessaoRequest {
            name: Some(json!(format!("  {}  ", "a".repeat(30)))),
        };
        assert_eq!(request.validate().unwrap().name, "a".repeat(30));
    }

    #[test]
    fn test_numeric_name_is_taken_as_text() {
        let request = SessaoRequest {
            name: Some(json!(123)),
        };
        assert_eq!(request.validate().unwrap().name, "123");
    }
}
