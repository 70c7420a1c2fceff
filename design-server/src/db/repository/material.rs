//! Material Repository (catalog)

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Material, MaterialCreate, MaterialUpdate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "material";

#[derive(Clone)]
pub struct MaterialRepository {
    base: BaseRepository,
}

impl MaterialRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List materials, optionally filtered by category.
    ///
    /// The category filter is a case-insensitive exact match.
    pub async fn find_all(&self, category: Option<&str>) -> RepoResult<Vec<Material>> {
        let materials: Vec<Material> = match category {
            Some(cat) => {
                let cat_lower = cat.to_lowercase();
                self.base
                    .db()
                    .query(
                        "SELECT * FROM material WHERE string::lowercase(category) = $category ORDER BY name",
                    )
                    .bind(("category", cat_lower))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM material ORDER BY name")
                    .await?
                    .take(0)?
            }
        };
        Ok(materials)
    }

    /// Find material by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Material>> {
        let thing = parse_id(TABLE, id)?;
        let material: Option<Material> = self.base.db().select(thing).await?;
        Ok(material)
    }

    /// Create a catalog entry (admin tooling only)
    pub async fn create(&self, data: MaterialCreate) -> RepoResult<Material> {
        if data.price < 0 {
            return Err(RepoError::Validation(format!(
                "price must be non-negative, got {}",
                data.price
            )));
        }

        let distributor_id = match data.distributor_id {
            Some(ref id) => Some(self.resolve_distributor(id).await?),
            None => None,
        };

        let material = Material {
            id: None,
            name: data.name,
            category: data.category,
            material_type: data.material_type,
            color: data.color,
            finish: data.finish,
            unit: data.unit,
            price: data.price,
            availability: data.availability,
            distributor_id,
            image_url: data.image_url,
        };

        let created: Option<Material> = self.base.db().create(TABLE).content(material).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create material".to_string()))
    }

    /// Update a catalog entry
    pub async fn update(&self, id: &str, data: MaterialUpdate) -> RepoResult<Material> {
        let thing = parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Material {} not found", id)))?;

        if let Some(price) = data.price
            && price < 0
        {
            return Err(RepoError::Validation(format!(
                "price must be non-negative, got {price}"
            )));
        }

        let distributor_id = match data.distributor_id {
            Some(ref id) => Some(self.resolve_distributor(id).await?),
            None => None,
        };

        #[derive(serde::Serialize)]
        struct MaterialUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            material_type: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            color: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            finish: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            unit: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            availability: Option<crate::db::models::Availability>,
            #[serde(skip_serializing_if = "Option::is_none")]
            distributor_id: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_url: Option<String>,
        }

        let update_data = MaterialUpdateDb {
            name: data.name,
            category: data.category,
            material_type: data.material_type,
            color: data.color,
            finish: data.finish,
            unit: data.unit,
            price: data.price,
            availability: data.availability,
            distributor_id,
            image_url: data.image_url,
        };

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing.clone()))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Material {} not found", id)))
    }

    /// Whether any material references the given distributor
    pub async fn exists_for_distributor(&self, distributor_id: &str) -> RepoResult<bool> {
        // distributor_id is stored in its string form
        let dist = parse_id("distributor", distributor_id)?.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM material WHERE distributor_id = $dist GROUP ALL")
            .bind(("dist", dist))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// Resolve and verify a distributor reference
    async fn resolve_distributor(&self, id: &str) -> RepoResult<RecordId> {
        let dist = parse_id("distributor", id)?;
        let exists: Option<serde_json::Value> = self.base.db().select(dist.clone()).await?;
        if exists.is_none() {
            return Err(RepoError::Validation(format!(
                "Distributor {} does not exist",
                id
            )));
        }
        Ok(dist)
    }
}
