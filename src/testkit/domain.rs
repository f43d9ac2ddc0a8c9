//! Builders for domain values used across tests.

use crate::domain::persona::PersonaInput;

/// Valid input with the given first name and email, surname `Diaz`.
pub fn input(nombre: &str, email: &str) -> PersonaInput {
    PersonaInput::try_new(nombre, "Diaz", email, None, None).expect("valid persona input")
}

/// Valid input for `Ana Diaz` with the given email.
pub fn input_with_email(email: &str) -> PersonaInput {
    input("Ana", email)
}
