//! Persona contact records and their validated input.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::PersonaId;

/// Maximum length of `nombre` and `apellido`, in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of `email`, in characters.
pub const MAX_EMAIL_LEN: usize = 100;
/// Maximum length of `telefono`, in characters.
pub const MAX_PHONE_LEN: usize = 20;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid email regex")
});

/// A stored contact record.
///
/// `id` and `created_at` are assigned by the store and never change.
/// `updated_at` stays empty until the first update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Persona {
    /// Build a record from validated input and store-assigned metadata.
    #[must_use]
    pub fn from_input(id: PersonaId, input: &PersonaInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            nombre: input.nombre.clone(),
            apellido: input.apellido.clone(),
            email: input.email.clone(),
            telefono: input.telefono.clone(),
            direccion: input.direccion.clone(),
            created_at,
            updated_at: None,
        }
    }

    /// Overwrite every writable field with `input`, stamping `updated_at`.
    pub fn apply(&mut self, input: &PersonaInput, updated_at: DateTime<Utc>) {
        self.nombre.clone_from(&input.nombre);
        self.apellido.clone_from(&input.apellido);
        self.email.clone_from(&input.email);
        self.telefono.clone_from(&input.telefono);
        self.direccion.clone_from(&input.direccion);
        self.updated_at = Some(updated_at);
    }
}

/// The writable fields of a persona.
///
/// Only constructible through [`PersonaInput::try_new`], so holding one
/// means the field rules already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaInput {
    nombre: String,
    apellido: String,
    email: String,
    telefono: Option<String>,
    direccion: Option<String>,
}

impl PersonaInput {
    /// Validate and build persona input.
    ///
    /// Required fields are trimmed. Optional fields are kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when a required field is blank, a field is
    /// longer than its column, or the email is malformed.
    pub fn try_new(
        nombre: impl Into<String>,
        apellido: impl Into<String>,
        email: impl Into<String>,
        telefono: Option<String>,
        direccion: Option<String>,
    ) -> Result<Self, DomainError> {
        let nombre = required("nombre", nombre.into(), MAX_NAME_LEN)?;
        let apellido = required("apellido", apellido.into(), MAX_NAME_LEN)?;
        let email = required("email", email.into(), MAX_EMAIL_LEN)?;
        if !EMAIL_RE.is_match(&email) {
            return Err(DomainError::InvalidEmail { email });
        }
        if let Some(ref telefono) = telefono {
            check_len("telefono", telefono, MAX_PHONE_LEN)?;
        }

        Ok(Self {
            nombre,
            apellido,
            email,
            telefono,
            direccion,
        })
    }

    /// First name, trimmed.
    #[must_use]
    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    /// Surname, trimmed.
    #[must_use]
    pub fn apellido(&self) -> &str {
        &self.apellido
    }

    /// Email address, trimmed and well-formed.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number as given, if any.
    #[must_use]
    pub fn telefono(&self) -> Option<&str> {
        self.telefono.as_deref()
    }

    /// Postal address as given, if any.
    #[must_use]
    pub fn direccion(&self) -> Option<&str> {
        self.direccion.as_deref()
    }
}

fn required(field: &'static str, value: String, max: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    check_len(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::FieldTooLong { field, max, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str) -> Result<PersonaInput, DomainError> {
        PersonaInput::try_new("Ana", "Diaz", email, None, None)
    }

    #[test]
    fn accepts_well_formed_input() {
        let input = PersonaInput::try_new(
            "Ana",
            "Diaz",
            "ana@x.com",
            Some("555-0101".into()),
            Some("Calle 1".into()),
        )
        .unwrap();

        assert_eq!(input.nombre(), "Ana");
        assert_eq!(input.email(), "ana@x.com");
        assert_eq!(input.telefono(), Some("555-0101"));
        assert_eq!(input.direccion(), Some("Calle 1"));
    }

    #[test]
    fn trims_required_fields() {
        let input = PersonaInput::try_new("  Ana ", "Diaz\n", " ana@x.com ", None, None).unwrap();
        assert_eq!(input.nombre(), "Ana");
        assert_eq!(input.apellido(), "Diaz");
        assert_eq!(input.email(), "ana@x.com");
    }

    #[test]
    fn rejects_blank_required_fields() {
        assert_eq!(
            PersonaInput::try_new("   ", "Diaz", "ana@x.com", None, None),
            Err(DomainError::EmptyField { field: "nombre" })
        );
        assert_eq!(
            PersonaInput::try_new("Ana", "", "ana@x.com", None, None),
            Err(DomainError::EmptyField { field: "apellido" })
        );
        assert_eq!(input(""), Err(DomainError::EmptyField { field: "email" }));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "ana",
            "ana@",
            "@x.com",
            "ana@x",
            "ana@@x.com",
            "ana@x..com",
            "ana@.com",
            "a na@x.com",
        ] {
            assert!(
                matches!(input(email), Err(DomainError::InvalidEmail { .. })),
                "expected {email} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_subdomains_and_plus_addressing() {
        assert!(input("ana+agenda@mail.example.co").is_ok());
    }

    #[test]
    fn enforces_column_widths() {
        let long_name = "a".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            PersonaInput::try_new(long_name, "Diaz", "ana@x.com", None, None),
            Err(DomainError::FieldTooLong {
                field: "nombre",
                max: MAX_NAME_LEN,
                len: MAX_NAME_LEN + 1,
            })
        );

        let long_phone = "5".repeat(MAX_PHONE_LEN + 1);
        assert!(matches!(
            PersonaInput::try_new("Ana", "Diaz", "ana@x.com", Some(long_phone), None),
            Err(DomainError::FieldTooLong {
                field: "telefono",
                ..
            })
        ));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_NAME_LEN);
        assert!(PersonaInput::try_new(accented, "Diaz", "ana@x.com", None, None).is_ok());
    }

    #[test]
    fn apply_overwrites_fields_and_keeps_identity() {
        let created = Utc::now();
        let original = input("ana@x.com").unwrap();
        let mut persona = Persona::from_input(PersonaId::new(1), &original, created);

        let replacement =
            PersonaInput::try_new("Ana Maria", "Diaz", "ana2@x.com", None, Some("Calle 2".into()))
                .unwrap();
        let updated = Utc::now();
        persona.apply(&replacement, updated);

        assert_eq!(persona.id, PersonaId::new(1));
        assert_eq!(persona.created_at, created);
        assert_eq!(persona.updated_at, Some(updated));
        assert_eq!(persona.nombre, "Ana Maria");
        assert_eq!(persona.email, "ana2@x.com");
        assert_eq!(persona.direccion.as_deref(), Some("Calle 2"));
    }
}
