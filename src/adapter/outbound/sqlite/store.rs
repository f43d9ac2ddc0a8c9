//! SQLite persona store implementation.
//!
//! Provides persistent storage for personas using SQLite and Diesel ORM.
//! The `UNIQUE` constraint on `personas.email` makes every insert and
//! update an atomic insert-or-fail.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    NewPersonaRow, PersonaChangeset, PersonaRow,
};
use crate::adapter::outbound::sqlite::database::schema::personas;
use crate::domain::{id::PersonaId, persona::Persona, persona::PersonaInput};
use crate::error::{Error, Result};
use crate::port::outbound::store::PersonaStore;

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    #[diesel(column_name = "id")]
    id: i64,
}

/// SQLite-backed persona store.
///
/// Implements the [`PersonaStore`] trait. Diesel calls are blocking and
/// run on the tokio blocking pool.
#[derive(Clone)]
pub struct SqlitePersonaStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqlitePersonaStore {
    /// Create a new SQLite persona store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Conn) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            f(&mut conn)
        })
        .await?
    }

    fn from_row(row: PersonaRow) -> Result<Persona> {
        let created_at = parse_timestamp(&row.created_at)?;
        let updated_at = row.updated_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(Persona {
            id: PersonaId::from(row.id),
            nombre: row.nombre,
            apellido: row.apellido,
            email: row.email,
            telefono: row.telefono,
            direccion: row.direccion,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Database(format!("invalid timestamp {raw}: {e}")))
}

/// Map a write failure, turning the email uniqueness violation into
/// [`Error::DuplicateEmail`].
fn write_error(err: DieselError, email: &str) -> Error {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Error::DuplicateEmail {
                email: email.to_string(),
            }
        }
        other => Error::Database(other.to_string()),
    }
}

fn load_by_id(conn: &mut Conn, id: PersonaId) -> Result<Option<PersonaRow>> {
    personas::table
        .find(id.value())
        .select(PersonaRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| Error::Database(e.to_string()))
}

impl PersonaStore for SqlitePersonaStore {
    async fn find_by_id(&self, id: PersonaId) -> Result<Option<Persona>> {
        let row = self.with_conn(move |conn| load_by_id(conn, id)).await?;
        row.map(Self::from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Persona>> {
        let email = email.to_string();
        let row: Option<PersonaRow> = self
            .with_conn(move |conn| {
                personas::table
                    .filter(personas::email.eq(&email))
                    .select(PersonaRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;
        row.map(Self::from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Persona>> {
        let rows: Vec<PersonaRow> = self
            .with_conn(|conn| {
                personas::table
                    .order(personas::id.asc())
                    .select(PersonaRow::as_select())
                    .load(conn)
                    .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;
        rows.into_iter().map(Self::from_row).collect()
    }

    async fn insert(&self, input: &PersonaInput) -> Result<Persona> {
        let input = input.clone();
        let row = self
            .with_conn(move |conn| {
                conn.immediate_transaction::<PersonaRow, DieselError, _>(|conn| {
                    diesel::insert_into(personas::table)
                        .values(&NewPersonaRow {
                            nombre: input.nombre(),
                            apellido: input.apellido(),
                            email: input.email(),
                            telefono: input.telefono(),
                            direccion: input.direccion(),
                            created_at: Utc::now().to_rfc3339(),
                        })
                        .execute(conn)?;

                    let inserted: LastInsertRowId =
                        diesel::sql_query("SELECT last_insert_rowid() AS id").get_result(conn)?;

                    personas::table
                        .find(inserted.id)
                        .select(PersonaRow::as_select())
                        .first(conn)
                })
                .map_err(|e| write_error(e, input.email()))
            })
            .await?;
        Self::from_row(row)
    }

    async fn update(&self, id: PersonaId, input: &PersonaInput) -> Result<Option<Persona>> {
        let key = id.value();
        let input = input.clone();
        let row = self
            .with_conn(move |conn| {
                conn.immediate_transaction::<Option<PersonaRow>, DieselError, _>(|conn| {
                    let changed = diesel::update(personas::table.find(key))
                        .set(&PersonaChangeset {
                            nombre: input.nombre(),
                            apellido: input.apellido(),
                            email: input.email(),
                            telefono: input.telefono(),
                            direccion: input.direccion(),
                            updated_at: Some(Utc::now().to_rfc3339()),
                        })
                        .execute(conn)?;
                    if changed == 0 {
                        return Ok(None);
                    }

                    personas::table
                        .find(key)
                        .select(PersonaRow::as_select())
                        .first(conn)
                        .optional()
                })
                .map_err(|e| write_error(e, input.email()))
            })
            .await?;
        row.map(Self::from_row).transpose()
    }

    async fn delete_by_id(&self, id: PersonaId) -> Result<bool> {
        let key = id.value();
        let deleted = self
            .with_conn(move |conn| {
                diesel::delete(personas::table.find(key))
                    .execute(conn)
                    .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
    use crate::testkit::domain::{input, input_with_email};

    fn setup_test_db(dir: &tempfile::TempDir) -> SqlitePersonaStore {
        let url = dir.path().join("store.db").display().to_string();
        let pool = create_pool(&url, 4).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        SqlitePersonaStore::new(pool)
    }

    // -------------------------------------------------------------------------
    // Basic CRUD operations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);

        let ana = store.insert(&input("Ana", "ana@x.com")).await.unwrap();
        let luis = store.insert(&input("Luis", "luis@x.com")).await.unwrap();

        assert_eq!(ana.id, PersonaId::new(1));
        assert_eq!(luis.id, PersonaId::new(2));
        assert!(ana.updated_at.is_none());
    }

    #[tokio::test]
    async fn find_by_id_and_email_return_stored_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);
        let ana = store.insert(&input("Ana", "ana@x.com")).await.unwrap();

        assert_eq!(store.find_by_id(ana.id).await.unwrap(), Some(ana.clone()));
        assert_eq!(store.find_by_email("ana@x.com").await.unwrap(), Some(ana));
        assert_eq!(store.find_by_email("nadie@x.com").await.unwrap(), None);
        assert_eq!(store.find_by_id(PersonaId::new(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_all_orders_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);
        store.insert(&input("Ana", "ana@x.com")).await.unwrap();
        store.insert(&input("Luis", "luis@x.com")).await.unwrap();
        store.insert(&input("Eva", "eva@x.com")).await.unwrap();

        let ids: Vec<i64> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_stamps_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);
        let ana = store
            .insert(
                &PersonaInput::try_new("Ana", "Diaz", "ana@x.com", Some("555".into()), None)
                    .unwrap(),
            )
            .await
            .unwrap();

        let updated = store
            .update(ana.id, &input_with_email("ana2@x.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.email, "ana2@x.com");
        assert_eq!(updated.telefono, None, "omitted optional field is cleared");
        assert_eq!(updated.created_at, ana.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);

        let result = store
            .update(PersonaId::new(7), &input("Ana", "ana@x.com"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_by_id_reports_removal() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);
        let ana = store.insert(&input("Ana", "ana@x.com")).await.unwrap();

        assert!(store.delete_by_id(ana.id).await.unwrap());
        assert!(store.find_by_id(ana.id).await.unwrap().is_none());
        assert!(!store.delete_by_id(ana.id).await.unwrap()); // Already deleted
    }

    // -------------------------------------------------------------------------
    // Uniqueness
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn insert_with_taken_email_is_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);
        store.insert(&input("Ana", "ana@x.com")).await.unwrap();

        let result = store.insert(&input("Otra", "ana@x.com")).await;
        assert!(matches!(result, Err(Error::DuplicateEmail { email }) if email == "ana@x.com"));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_to_taken_email_is_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_test_db(&dir);
        let ana = store.insert(&input("Ana", "ana@x.com")).await.unwrap();
        store.insert(&input("Luis", "luis@x.com")).await.unwrap();

        let result = store.update(ana.id, &input_with_email("luis@x.com")).await;
        assert!(matches!(result, Err(Error::DuplicateEmail { .. })));
        assert_eq!(store.find_by_id(ana.id).await.unwrap(), Some(ana));
    }

    #[tokio::test]
    async fn concurrent_inserts_with_same_email_commit_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(setup_test_db(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.insert(&input(&format!("Ana{i}"), "ana@x.com")).await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(Error::DuplicateEmail { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
