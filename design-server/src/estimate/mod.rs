//! Cost & Materials Estimation
//!
//! Pure derivation of a cost range and time frame from
//! {project type, selected materials, size} over a catalog snapshot.
//! Deterministic for identical inputs and catalog data; never mutates
//! the catalog. All amounts are in the smallest currency unit.

use crate::db::models::{Material, ProjectType};
use shared::estimate::{BreakdownEntry, CostRange, EstimateResponse};
use std::collections::HashMap;

/// Labor/installation baseline per project type: (min, max, time frame)
fn base_rates(project_type: &ProjectType) -> (i64, i64, &'static str) {
    match project_type {
        ProjectType::Cocina => (250_000, 450_000, "4-6 semanas"),
        ProjectType::Puerta => (45_000, 90_000, "1-2 semanas"),
        ProjectType::Ventana => (35_000, 70_000, "1-2 semanas"),
        ProjectType::Gabinete => (80_000, 160_000, "2-3 semanas"),
        ProjectType::Piscina => (900_000, 1_800_000, "8-12 semanas"),
        ProjectType::Contenedor => (1_200_000, 2_400_000, "10-14 semanas"),
        ProjectType::Otro(_) => (100_000, 300_000, "3-5 semanas"),
    }
}

/// Reference area assumed when the caller gives no usable size
const DEFAULT_AREA: f64 = 8.0;

/// Spread applied to material totals for the upper bound (waste, trim, fit)
const MATERIAL_MAX_FACTOR_PCT: i64 = 125;

/// Read-only view of the catalog used by one estimation run
pub struct CatalogSnapshot {
    by_id: HashMap<String, Material>,
}

impl CatalogSnapshot {
    pub fn new(materials: Vec<Material>) -> Self {
        // Indexed by the bare record key; RecordId's Display form escapes
        // non-ident keys, so it is unusable as a lookup key here.
        let mut by_id = HashMap::new();
        for material in materials {
            if let Some(id) = material.id.clone() {
                by_id.insert(id.key().to_string(), material);
            }
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Material> {
        // Accept both "material:key" and bare "key" lookups
        let key = id.strip_prefix("material:").unwrap_or(id);
        self.by_id.get(key)
    }

    /// Case-insensitive lookup by material name (analysis suggestions)
    pub fn find_by_name(&self, name: &str) -> Option<&Material> {
        let needle = name.to_lowercase();
        self.by_id
            .values()
            .find(|m| m.name.to_lowercase() == needle)
    }
}

/// Parse a size string like "12m2" or "3.5 m2" into an area.
///
/// Lenient: takes the leading numeric run, ignores the unit suffix.
/// Anything unusable falls back to [`DEFAULT_AREA`].
pub fn parse_size(size: Option<&str>) -> f64 {
    let Some(raw) = size else {
        return DEFAULT_AREA;
    };
    let numeric: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match numeric.parse::<f64>() {
        Ok(area) if area > 0.0 => area,
        _ => DEFAULT_AREA,
    }
}

/// Estimate the cost of a project.
///
/// Unknown material ids are skipped and reported in `ignored` rather than
/// failing the whole estimate; each one is also logged as a diagnostic.
pub fn estimate_cost(
    project_type: &ProjectType,
    material_ids: &[String],
    size: Option<&str>,
    catalog: &CatalogSnapshot,
) -> EstimateResponse {
    let (base_min, base_max, time_frame) = base_rates(project_type);
    let area = parse_size(size);

    let mut breakdown = vec![BreakdownEntry {
        component: "mano de obra".to_string(),
        cost: base_min,
    }];
    let mut ignored = Vec::new();
    let mut materials_total: i64 = 0;

    for id in material_ids {
        match catalog.get(id) {
            Some(material) => {
                let cost = material_cost(material, area);
                materials_total += cost;
                breakdown.push(BreakdownEntry {
                    component: material.name.clone(),
                    cost,
                });
            }
            None => {
                tracing::warn!(
                    target: "estimate",
                    material = %id,
                    "unknown material ignored"
                );
                ignored.push(id.clone());
            }
        }
    }

    let estimated_cost = CostRange {
        min: base_min + materials_total,
        max: base_max + materials_total * MATERIAL_MAX_FACTOR_PCT / 100,
    };

    EstimateResponse {
        estimated_cost,
        time_frame: time_frame.to_string(),
        breakdown,
        ignored,
    }
}

/// Material contribution: unit price scaled by area for area-priced units,
/// flat otherwise.
fn material_cost(material: &Material, area: f64) -> i64 {
    let unit = material.unit.to_lowercase();
    if unit == "m2" || unit == "m" || unit == "metro lineal" {
        (material.price as f64 * area).round() as i64
    } else {
        material.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Availability;
    use surrealdb::RecordId;

    fn material(key: &str, name: &str, unit: &str, price: i64) -> Material {
        Material {
            id: Some(RecordId::from_table_key("material", key)),
            name: name.to_string(),
            category: "cocina".to_string(),
            material_type: "superficie".to_string(),
            color: None,
            finish: None,
            unit: unit.to_string(),
            price,
            availability: Availability::Available,
            distributor_id: None,
            image_url: None,
        }
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            material("laminado-blanco", "Laminado Blanco", "m2", 4_500),
            material("granito-gris", "Granito Gris", "m2", 12_000),
            material("bisagra-inox", "Bisagra Inox", "unidad", 800),
        ])
    }

    #[test]
    fn estimate_is_deterministic() {
        let cat = catalog();
        let ids = vec!["laminado-blanco".to_string(), "bisagra-inox".to_string()];
        let a = estimate_cost(&ProjectType::Cocina, &ids, Some("12m2"), &cat);
        let b = estimate_cost(&ProjectType::Cocina, &ids, Some("12m2"), &cat);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_material_is_ignored_not_fatal() {
        let cat = catalog();
        let ids = vec![
            "laminado-blanco".to_string(),
            "herraje-inox-unknown".to_string(),
        ];
        let result = estimate_cost(&ProjectType::Cocina, &ids, Some("12m2"), &cat);

        assert_eq!(result.ignored, vec!["herraje-inox-unknown".to_string()]);
        assert!(
            result
                .breakdown
                .iter()
                .all(|e| e.component != "herraje-inox-unknown")
        );
        // Known material still produces a non-empty range
        assert!(result.estimated_cost.min > 0);
        assert!(result.estimated_cost.max > result.estimated_cost.min);
        assert!(
            result
                .breakdown
                .iter()
                .any(|e| e.component == "Laminado Blanco")
        );
    }

    #[test]
    fn area_scales_area_priced_materials_only() {
        let cat = catalog();
        let ids = vec!["laminado-blanco".to_string(), "bisagra-inox".to_string()];
        let result = estimate_cost(&ProjectType::Cocina, &ids, Some("10m2"), &cat);

        let laminado = result
            .breakdown
            .iter()
            .find(|e| e.component == "Laminado Blanco")
            .unwrap();
        assert_eq!(laminado.cost, 45_000); // 4500 * 10m2
        let bisagra = result
            .breakdown
            .iter()
            .find(|e| e.component == "Bisagra Inox")
            .unwrap();
        assert_eq!(bisagra.cost, 800); // flat per unit
    }

    #[test]
    fn unparseable_size_falls_back_to_default_area() {
        assert_eq!(parse_size(Some("12m2")), 12.0);
        assert_eq!(parse_size(Some("3.5 m2")), 3.5);
        assert_eq!(parse_size(Some("grande")), DEFAULT_AREA);
        assert_eq!(parse_size(None), DEFAULT_AREA);
    }

    #[test]
    fn accepts_full_record_id_form() {
        let cat = catalog();
        let ids = vec!["material:granito-gris".to_string()];
        let result = estimate_cost(&ProjectType::Cocina, &ids, Some("2m2"), &cat);
        assert!(result.ignored.is_empty());
        assert!(
            result
                .breakdown
                .iter()
                .any(|e| e.component == "Granito Gris")
        );
    }
}
