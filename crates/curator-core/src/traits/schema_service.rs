use crate::errors::CuratorResult;
use crate::models::{Layer, LayerId, ProjectId};

/// Layer and feature definitions of a project.
pub trait ISchemaService: Send + Sync {
    fn list_layers(&self, project: ProjectId) -> CuratorResult<Vec<Layer>>;
    fn get_layer(&self, id: LayerId) -> CuratorResult<Option<Layer>>;
}
