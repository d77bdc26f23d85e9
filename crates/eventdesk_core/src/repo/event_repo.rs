//! Event repository contract and SQLite implementation.
//!
//! # Invariants
//! - `create_event` calls `NewEvent::validate()` before inserting.
//! - Listing is ordered `date ASC, id ASC`, so same-date events keep
//!   creation order.

use crate::model::event::{Event, EventId, EventListQuery, NewEvent};
use crate::repo::{ensure_connection_ready, non_blank, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    date,
    type,
    college_id
FROM events";

/// Repository interface for event operations.
pub trait EventRepository {
    fn create_event(&self, event: &NewEvent) -> RepoResult<Event>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<Event>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &NewEvent) -> RepoResult<Event> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (title, description, date, type, college_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                event.title.as_str(),
                event.description.as_str(),
                event.date.as_str(),
                event.kind.as_str(),
                event.college_id.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_event(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created event {id} not found in read-back"))
        })
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let event = self
            .conn
            .query_row(
                &format!("{EVENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_event_row,
            )
            .optional()?;
        Ok(event)
    }

    fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<Event>> {
        let mut sql = format!("{EVENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = non_blank(query.kind.as_deref()) {
            sql.push_str(" AND type = ?");
            bind_values.push(Value::Text(kind.to_string()));
        }

        if let Some(college_id) = non_blank(query.college_id.as_deref()) {
            sql.push_str(" AND college_id = ?");
            bind_values.push(Value::Text(college_id.to_string()));
        }

        sql.push_str(" ORDER BY date ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let events = stmt
            .query_map(params_from_iter(bind_values), parse_event_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }
}

fn parse_event_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        date: row.get("date")?,
        kind: row.get("type")?,
        college_id: row.get("college_id")?,
    })
}
