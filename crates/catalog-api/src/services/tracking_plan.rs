// Tracking plan service: maps the storage graph to the wire graph.
// The reconciliation itself lives in catalog-storage; this layer only
// translates shapes and forwards the error taxonomy.

use catalog_contracts::{Event, Property, TrackingPlan, TrackingPlanEvent, TrackingPlanEventProperty};
use catalog_storage::{
    CreateTrackingPlan, Database, PlanEventGraph, PlanPropertyGraph, Result, TrackingPlanGraph,
    UpdateTrackingPlan,
};
use std::sync::Arc;

pub struct TrackingPlanService {
    db: Arc<Database>,
}

impl TrackingPlanService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateTrackingPlan) -> Result<TrackingPlan> {
        let graph = self.db.create_tracking_plan(input).await?;
        Ok(Self::graph_to_plan(graph))
    }

    pub async fn get(&self, id: i64) -> Result<Option<TrackingPlan>> {
        let graph = self.db.get_tracking_plan(id).await?;
        Ok(graph.map(Self::graph_to_plan))
    }

    pub async fn list(&self) -> Result<Vec<TrackingPlan>> {
        let graphs = self.db.list_tracking_plans().await?;
        Ok(graphs.into_iter().map(Self::graph_to_plan).collect())
    }

    /// Propagates `StoreError::NotFound` for a missing plan id.
    pub async fn update(&self, id: i64, input: UpdateTrackingPlan) -> Result<TrackingPlan> {
        let graph = self.db.update_tracking_plan(id, input).await?;
        Ok(Self::graph_to_plan(graph))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.db.delete_tracking_plan(id).await
    }

    fn graph_to_plan(graph: TrackingPlanGraph) -> TrackingPlan {
        TrackingPlan {
            id: graph.plan.id,
            name: graph.plan.name,
            description: graph.plan.description,
            created_at: graph.plan.created_at,
            updated_at: graph.plan.updated_at,
            events: graph.events.into_iter().map(Self::event_graph).collect(),
        }
    }

    fn event_graph(graph: PlanEventGraph) -> TrackingPlanEvent {
        TrackingPlanEvent {
            id: graph.link.id,
            tracking_plan_id: graph.link.tracking_plan_id,
            event_id: graph.link.event_id,
            additional_properties: graph.link.additional_properties,
            event: Event {
                id: graph.event.id,
                name: graph.event.name,
                event_type: graph.event.event_type,
                description: graph.event.description,
                created_at: graph.event.created_at,
                updated_at: graph.event.updated_at,
            },
            properties: graph
                .properties
                .into_iter()
                .map(Self::property_graph)
                .collect(),
        }
    }

    fn property_graph(graph: PlanPropertyGraph) -> TrackingPlanEventProperty {
        TrackingPlanEventProperty {
            id: graph.link.id,
            tracking_plan_event_id: graph.link.tracking_plan_event_id,
            property_id: graph.link.property_id,
            required: graph.link.required,
            property: Property {
                id: graph.property.id,
                name: graph.property.name,
                property_type: graph.property.property_type,
                description: graph.property.description,
                created_at: graph.property.created_at,
                updated_at: graph.property.updated_at,
            },
        }
    }
}
