// Repository layer for database operations
//
// Direct per-table CRUD plus the nested-graph read path. The tracking-plan
// write path (transactional reconciliation) lives in reconcile.rs.

use sqlx::PgPool;

use crate::error::{Result, StoreError};
use crate::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEvent) -> Result<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (name, type, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, type, description, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.event_type)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, type, description, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, type, description, created_at, updated_at
            FROM events
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_event(&self, id: i64, input: UpdateEvent) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, type, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.event_type)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_event(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Properties
    // ============================================

    pub async fn create_property(&self, input: CreateProperty) -> Result<PropertyRow> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            INSERT INTO properties (name, type, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, type, description, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.property_type)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_property(&self, id: i64) -> Result<Option<PropertyRow>> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            SELECT id, name, type, description, created_at, updated_at
            FROM properties
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_properties(&self) -> Result<Vec<PropertyRow>> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            r#"
            SELECT id, name, type, description, created_at, updated_at
            FROM properties
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_property(
        &self,
        id: i64,
        input: UpdateProperty,
    ) -> Result<Option<PropertyRow>> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            UPDATE properties
            SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, type, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.property_type)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_property(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Tracking plans (read + delete; writes in reconcile.rs)
    // ============================================

    pub async fn get_tracking_plan(&self, id: i64) -> Result<Option<TrackingPlanGraph>> {
        let plan = sqlx::query_as::<_, TrackingPlanRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM tracking_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match plan {
            Some(plan) => {
                let events = self.fetch_plan_events(plan.id).await?;
                Ok(Some(TrackingPlanGraph { plan, events }))
            }
            None => Ok(None),
        }
    }

    pub async fn list_tracking_plans(&self) -> Result<Vec<TrackingPlanGraph>> {
        let plans = sqlx::query_as::<_, TrackingPlanRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM tracking_plans
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut graphs = Vec::with_capacity(plans.len());
        for plan in plans {
            let events = self.fetch_plan_events(plan.id).await?;
            graphs.push(TrackingPlanGraph { plan, events });
        }

        Ok(graphs)
    }

    /// Deletes the plan row; join rows go with it (ON DELETE CASCADE).
    /// Underlying event/property rows are shared and stay untouched.
    pub async fn delete_tracking_plan(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tracking_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Assemble the join graph for one plan: join events in id order, each
    /// with its event row and its join properties in id order.
    pub(crate) async fn fetch_plan_events(&self, plan_id: i64) -> Result<Vec<PlanEventGraph>> {
        let links = sqlx::query_as::<_, TrackingPlanEventRow>(
            r#"
            SELECT id, tracking_plan_id, event_id, additional_properties, created_at, updated_at
            FROM tracking_plan_events
            WHERE tracking_plan_id = $1
            ORDER BY id
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        let mut events = Vec::with_capacity(links.len());
        for link in links {
            let event = self
                .get_event(link.event_id)
                .await?
                .ok_or(StoreError::NotFound("event", link.event_id))?;

            let prop_links = sqlx::query_as::<_, TrackingPlanEventPropertyRow>(
                r#"
                SELECT id, tracking_plan_event_id, property_id, required, created_at, updated_at
                FROM tracking_plan_event_properties
                WHERE tracking_plan_event_id = $1
                ORDER BY id
                "#,
            )
            .bind(link.id)
            .fetch_all(&self.pool)
            .await?;

            let mut properties = Vec::with_capacity(prop_links.len());
            for prop_link in prop_links {
                let property = self
                    .get_property(prop_link.property_id)
                    .await?
                    .ok_or(StoreError::NotFound("property", prop_link.property_id))?;
                properties.push(PlanPropertyGraph {
                    link: prop_link,
                    property,
                });
            }

            events.push(PlanEventGraph {
                link,
                event,
                properties,
            });
        }

        Ok(events)
    }
}
