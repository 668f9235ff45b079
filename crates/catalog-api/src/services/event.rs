// Event service: direct field CRUD, one store call per operation

use catalog_contracts::Event;
use catalog_storage::{CreateEvent, Database, EventRow, Result, UpdateEvent};
use std::sync::Arc;

pub struct EventService {
    db: Arc<Database>,
}

impl EventService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateEvent) -> Result<Event> {
        let row = self.db.create_event(input).await?;
        Ok(Self::row_to_event(row))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Event>> {
        let row = self.db.get_event(id).await?;
        Ok(row.map(Self::row_to_event))
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let rows = self.db.list_events().await?;
        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    pub async fn update(&self, id: i64, input: UpdateEvent) -> Result<Option<Event>> {
        let row = self.db.update_event(id, input).await?;
        Ok(row.map(Self::row_to_event))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.db.delete_event(id).await
    }

    fn row_to_event(row: EventRow) -> Event {
        Event {
            id: row.id,
            name: row.name,
            event_type: row.event_type,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
