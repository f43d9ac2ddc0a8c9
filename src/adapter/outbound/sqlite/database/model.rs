//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::personas;

/// Database row for a persona (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = personas)]
pub struct NewPersonaRow<'a> {
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub email: &'a str,
    pub telefono: Option<&'a str>,
    pub direccion: Option<&'a str>,
    pub created_at: String,
}

/// Changeset applied by an update. `None` optional fields clear the column.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = personas)]
#[diesel(treat_none_as_null = true)]
pub struct PersonaChangeset<'a> {
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub email: &'a str,
    pub telefono: Option<&'a str>,
    pub direccion: Option<&'a str>,
    pub updated_at: Option<String>,
}

/// Database row for a persona (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = personas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PersonaRow {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}
