// Property service: direct field CRUD, one store call per operation

use catalog_contracts::Property;
use catalog_storage::{CreateProperty, Database, PropertyRow, Result, UpdateProperty};
use std::sync::Arc;

pub struct PropertyService {
    db: Arc<Database>,
}

impl PropertyService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateProperty) -> Result<Property> {
        let row = self.db.create_property(input).await?;
        Ok(Self::row_to_property(row))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Property>> {
        let row = self.db.get_property(id).await?;
        Ok(row.map(Self::row_to_property))
    }

    pub async fn list(&self) -> Result<Vec<Property>> {
        let rows = self.db.list_properties().await?;
        Ok(rows.into_iter().map(Self::row_to_property).collect())
    }

    pub async fn update(&self, id: i64, input: UpdateProperty) -> Result<Option<Property>> {
        let row = self.db.update_property(id, input).await?;
        Ok(row.map(Self::row_to_property))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.db.delete_property(id).await
    }

    fn row_to_property(row: PropertyRow) -> Property {
        Property {
            id: row.id,
            name: row.name,
            property_type: row.property_type,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
