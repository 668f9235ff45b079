// Tracking-plan reconciliation
//
// Write path for tracking plans. One call is one transaction: the plan row,
// its join rows, and any events/properties resolved along the way commit or
// roll back together.
//
// Events and properties are resolved by their (name, type) identity:
// an existing row is linked, never duplicated, and its stored description
// is never overwritten by resolution. An explicit join-row id in an update
// payload means "edit this specific row" and cascades an overwrite to the
// linked event/property instead.

use sqlx::{Postgres, Transaction};

use crate::error::{Result, StoreError};
use crate::models::*;
use crate::repositories::Database;

type Tx<'a> = Transaction<'a, Postgres>;

impl Database {
    /// Create a tracking plan with its full nested graph.
    pub async fn create_tracking_plan(&self, input: CreateTrackingPlan) -> Result<TrackingPlanGraph> {
        let mut tx = self.pool().begin().await?;

        let plan = sqlx::query_as::<_, TrackingPlanRow>(
            r#"
            INSERT INTO tracking_plans (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await?;

        for spec in &input.events {
            create_plan_event(&mut tx, plan.id, spec).await?;
        }

        tx.commit().await?;

        tracing::debug!(plan_id = plan.id, "created tracking plan");
        let events = self.fetch_plan_events(plan.id).await?;
        Ok(TrackingPlanGraph { plan, events })
    }

    /// Update a tracking plan.
    ///
    /// Scalars update only when provided. When an `events` list is present,
    /// entries carrying an id that matches one of this plan's join rows are
    /// edited in place (join row and linked event/property both); entries
    /// without a matching id are created as in create mode. Join rows
    /// omitted from the list are left alone.
    pub async fn update_tracking_plan(
        &self,
        id: i64,
        input: UpdateTrackingPlan,
    ) -> Result<TrackingPlanGraph> {
        let mut tx = self.pool().begin().await?;

        let plan = sqlx::query_as::<_, TrackingPlanRow>(
            r#"
            UPDATE tracking_plans
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound("tracking plan", id))?;

        if let Some(specs) = &input.events {
            let existing = sqlx::query_as::<_, TrackingPlanEventRow>(
                r#"
                SELECT id, tracking_plan_id, event_id, additional_properties, created_at, updated_at
                FROM tracking_plan_events
                WHERE tracking_plan_id = $1
                ORDER BY id
                "#,
            )
            .bind(plan.id)
            .fetch_all(&mut *tx)
            .await?;

            for spec in specs {
                // Ids only match join rows of this plan; anything else
                // falls through to create.
                let target = spec
                    .id
                    .and_then(|sid| existing.iter().find(|link| link.id == sid));

                match target {
                    Some(link) => update_plan_event(&mut tx, link, spec).await?,
                    None => create_plan_event(&mut tx, plan.id, spec).await?,
                }
            }
        }

        tx.commit().await?;

        tracing::debug!(plan_id = plan.id, "updated tracking plan");
        let events = self.fetch_plan_events(plan.id).await?;
        Ok(TrackingPlanGraph { plan, events })
    }
}

/// Create-mode path for one event spec: resolve the event by identity,
/// insert the join row, then each property the same way.
async fn create_plan_event(tx: &mut Tx<'_>, plan_id: i64, spec: &PlanEventSpec) -> Result<()> {
    let event = find_or_create_event(tx, spec).await?;

    let link_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO tracking_plan_events (tracking_plan_id, event_id, additional_properties)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(plan_id)
    .bind(event.id)
    .bind(spec.additional_properties)
    .fetch_one(&mut **tx)
    .await?;

    for prop_spec in &spec.properties {
        create_plan_property(tx, link_id, prop_spec).await?;
    }

    Ok(())
}

async fn create_plan_property(
    tx: &mut Tx<'_>,
    plan_event_id: i64,
    spec: &PlanPropertySpec,
) -> Result<()> {
    let property = find_or_create_property(tx, spec).await?;

    sqlx::query(
        r#"
        INSERT INTO tracking_plan_event_properties (tracking_plan_event_id, property_id, required)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(plan_event_id)
    .bind(property.id)
    .bind(spec.required)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Edit-in-place path: the spec named this join row explicitly, so the join
/// row's policy and the linked event's fields are overwritten (no identity
/// resolution). Property entries are matched against this event's join rows
/// the same way; unmatched ones are created.
async fn update_plan_event(
    tx: &mut Tx<'_>,
    link: &TrackingPlanEventRow,
    spec: &PlanEventSpec,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE tracking_plan_events
        SET additional_properties = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(link.id)
    .bind(spec.additional_properties)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE events
        SET name = $2, type = $3, description = $4, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(link.event_id)
    .bind(&spec.name)
    .bind(&spec.event_type)
    .bind(&spec.description)
    .execute(&mut **tx)
    .await?;

    let existing_props = sqlx::query_as::<_, TrackingPlanEventPropertyRow>(
        r#"
        SELECT id, tracking_plan_event_id, property_id, required, created_at, updated_at
        FROM tracking_plan_event_properties
        WHERE tracking_plan_event_id = $1
        ORDER BY id
        "#,
    )
    .bind(link.id)
    .fetch_all(&mut **tx)
    .await?;

    for prop_spec in &spec.properties {
        let target = prop_spec
            .id
            .and_then(|sid| existing_props.iter().find(|p| p.id == sid));

        match target {
            Some(prop_link) => {
                sqlx::query(
                    r#"
                    UPDATE tracking_plan_event_properties
                    SET required = $2, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(prop_link.id)
                .bind(prop_spec.required)
                .execute(&mut **tx)
                .await?;

                sqlx::query(
                    r#"
                    UPDATE properties
                    SET name = $2, type = $3, description = $4, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(prop_link.property_id)
                .bind(&prop_spec.name)
                .bind(&prop_spec.property_type)
                .bind(&prop_spec.description)
                .execute(&mut **tx)
                .await?;
            }
            None => create_plan_property(tx, link.id, prop_spec).await?,
        }
    }

    Ok(())
}

/// Resolve an event by (name, type): reuse the existing row if present,
/// otherwise insert. A concurrent writer winning the insert race is benign;
/// the re-read resolves to the winning row.
///
/// The existing row's description is never overwritten here.
async fn find_or_create_event(tx: &mut Tx<'_>, spec: &PlanEventSpec) -> Result<EventRow> {
    if let Some(row) = select_event_by_identity(tx, &spec.name, &spec.event_type).await? {
        return Ok(row);
    }

    let inserted = sqlx::query_as::<_, EventRow>(
        r#"
        INSERT INTO events (name, type, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (name, type) DO NOTHING
        RETURNING id, name, type, description, created_at, updated_at
        "#,
    )
    .bind(&spec.name)
    .bind(&spec.event_type)
    .bind(&spec.description)
    .fetch_optional(&mut **tx)
    .await?;

    if let Some(row) = inserted {
        return Ok(row);
    }

    // Lost the race: the conflicting row committed under us. Re-read it.
    select_event_by_identity(tx, &spec.name, &spec.event_type)
        .await?
        .ok_or_else(|| {
            StoreError::Conflict(format!(
                "event ({}, {}) conflicted but could not be re-read",
                spec.name, spec.event_type
            ))
        })
}

async fn select_event_by_identity(
    tx: &mut Tx<'_>,
    name: &str,
    event_type: &str,
) -> Result<Option<EventRow>> {
    let row = sqlx::query_as::<_, EventRow>(
        r#"
        SELECT id, name, type, description, created_at, updated_at
        FROM events
        WHERE name = $1 AND type = $2
        "#,
    )
    .bind(name)
    .bind(event_type)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row)
}

/// Same resolution as [`find_or_create_event`], against the properties table.
async fn find_or_create_property(tx: &mut Tx<'_>, spec: &PlanPropertySpec) -> Result<PropertyRow> {
    if let Some(row) = select_property_by_identity(tx, &spec.name, &spec.property_type).await? {
        return Ok(row);
    }

    let inserted = sqlx::query_as::<_, PropertyRow>(
        r#"
        INSERT INTO properties (name, type, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (name, type) DO NOTHING
        RETURNING id, name, type, description, created_at, updated_at
        "#,
    )
    .bind(&spec.name)
    .bind(&spec.property_type)
    .bind(&spec.description)
    .fetch_optional(&mut **tx)
    .await?;

    if let Some(row) = inserted {
        return Ok(row);
    }

    select_property_by_identity(tx, &spec.name, &spec.property_type)
        .await?
        .ok_or_else(|| {
            StoreError::Conflict(format!(
                "property ({}, {}) conflicted but could not be re-read",
                spec.name, spec.property_type
            ))
        })
}

async fn select_property_by_identity(
    tx: &mut Tx<'_>,
    name: &str,
    property_type: &str,
) -> Result<Option<PropertyRow>> {
    let row = sqlx::query_as::<_, PropertyRow>(
        r#"
        SELECT id, name, type, description, created_at, updated_at
        FROM properties
        WHERE name = $1 AND type = $2
        "#,
    )
    .bind(name)
    .bind(property_type)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row)
}
