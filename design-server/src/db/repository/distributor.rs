//! Distributor Repository

use super::{BaseRepository, MaterialRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Distributor, DistributorCreate, DistributorUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "distributor";

#[derive(Clone)]
pub struct DistributorRepository {
    base: BaseRepository,
}

impl DistributorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all distributors ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Distributor>> {
        let distributors: Vec<Distributor> = self
            .base
            .db()
            .query("SELECT * FROM distributor ORDER BY name")
            .await?
            .take(0)?;
        Ok(distributors)
    }

    /// Find distributor by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Distributor>> {
        let thing = parse_id(TABLE, id)?;
        let distributor: Option<Distributor> = self.base.db().select(thing).await?;
        Ok(distributor)
    }

    /// Create a distributor (admin tooling only)
    pub async fn create(&self, data: DistributorCreate) -> RepoResult<Distributor> {
        let distributor = Distributor {
            id: None,
            name: data.name,
            location: data.location,
            description: data.description,
            status: data.status.unwrap_or_else(|| "active".to_string()),
            image_url: data.image_url,
            contact: data.contact,
        };

        let created: Option<Distributor> =
            self.base.db().create(TABLE).content(distributor).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create distributor".to_string()))
    }

    /// Update a distributor
    pub async fn update(&self, id: &str, data: DistributorUpdate) -> RepoResult<Distributor> {
        let thing = parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Distributor {} not found", id)))?;

        #[derive(serde::Serialize)]
        struct DistributorUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            location: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_url: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            contact: Option<crate::db::models::ContactInfo>,
        }

        let update_data = DistributorUpdateDb {
            name: data.name,
            location: data.location,
            description: data.description,
            status: data.status,
            image_url: data.image_url,
            contact: data.contact,
        };

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Distributor {} not found", id)))
    }

    /// Delete a distributor. Restricted: fails while any material still
    /// references it.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Distributor {} not found", id)))?;

        let materials = MaterialRepository::new(self.base.db().clone());
        if materials.exists_for_distributor(id).await? {
            return Err(RepoError::Duplicate(
                "Cannot delete distributor with referencing materials".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
