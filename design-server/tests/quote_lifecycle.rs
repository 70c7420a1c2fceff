//! Quote lifecycle and entity store behavior against the in-memory engine

mod common;

use common::{create_user, default_state};
use design_server::db::models::{
    Availability, ContactInfo, DistributorCreate, MaterialCreate, QuoteCreate, QuoteStatus, Role,
};
use design_server::db::repository::{
    DistributorRepository, MaterialRepository, QuoteRepository, RepoError,
};
use serde_json::json;
use shared::quote::QuoteDetails;

fn details(tipo: &str) -> QuoteDetails {
    QuoteDetails {
        tipo: tipo.to_string(),
        datos: json!({"ancho": 120, "alto": 210}),
        image_url: None,
        descripcion: Some("puerta de entrada".to_string()),
        fecha_solicitud: None,
        comentarios: None,
    }
}

#[tokio::test]
async fn quote_starts_pending_and_defaults_fecha() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "ana", Role::Cliente).await;
    let repo = QuoteRepository::new(state.get_db());

    let quote = repo
        .create(QuoteCreate {
            user_id: Some(owner),
            project_id: None,
            details: details("puerta"),
            total_cost: Some(89_000),
        })
        .await
        .unwrap();

    assert_eq!(quote.status, QuoteStatus::Pending);
    assert!(quote.details.fecha_solicitud.is_some());
}

#[tokio::test]
async fn anonymous_quotes_are_allowed() {
    let (state, _dir) = default_state().await;
    let repo = QuoteRepository::new(state.get_db());

    let quote = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: details("ventana"),
            total_cost: None,
        })
        .await
        .unwrap();

    assert!(quote.user_id.is_none());
    assert_eq!(quote.status, QuoteStatus::Pending);
}

#[tokio::test]
async fn quote_requires_tipo_and_datos() {
    let (state, _dir) = default_state().await;
    let repo = QuoteRepository::new(state.get_db());

    let mut missing_tipo = details("");
    missing_tipo.tipo = "  ".to_string();
    let err = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: missing_tipo,
            total_cost: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let mut missing_datos = details("cocina");
    missing_datos.datos = serde_json::Value::Null;
    let err = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: missing_datos,
            total_cost: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn dangling_references_are_rejected() {
    let (state, _dir) = default_state().await;
    let repo = QuoteRepository::new(state.get_db());

    let err = repo
        .create(QuoteCreate {
            user_id: Some("user:nadie".to_string()),
            project_id: None,
            details: details("cocina"),
            total_cost: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: Some("project:fantasma".to_string()),
            details: details("cocina"),
            total_cost: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn negative_total_cost_is_rejected() {
    let (state, _dir) = default_state().await;
    let repo = QuoteRepository::new(state.get_db());

    let err = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: details("gabinete"),
            total_cost: Some(-500),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn status_walks_the_machine_and_stops_at_terminals() {
    let (state, _dir) = default_state().await;
    let repo = QuoteRepository::new(state.get_db());

    let quote = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: details("cocina"),
            total_cost: None,
        })
        .await
        .unwrap();
    let id = quote.id.unwrap().to_string();

    // pending -> completed is a skip, must fail
    let err = repo
        .update_status(&id, QuoteStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidTransition(_)));

    let quote = repo.update_status(&id, QuoteStatus::Approved).await.unwrap();
    assert_eq!(quote.status, QuoteStatus::Approved);

    let quote = repo
        .update_status(&id, QuoteStatus::Completed)
        .await
        .unwrap();
    assert_eq!(quote.status, QuoteStatus::Completed);

    // completed is terminal
    for target in [QuoteStatus::Pending, QuoteStatus::Approved, QuoteStatus::Rejected] {
        let err = repo.update_status(&id, target).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidTransition(_)));
    }
}

#[tokio::test]
async fn rejected_is_terminal() {
    let (state, _dir) = default_state().await;
    let repo = QuoteRepository::new(state.get_db());

    let quote = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: details("ventana"),
            total_cost: None,
        })
        .await
        .unwrap();
    let id = quote.id.unwrap().to_string();

    repo.update_status(&id, QuoteStatus::Rejected).await.unwrap();
    let err = repo
        .update_status(&id, QuoteStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidTransition(_)));

    // The failed transition must not have moved the status
    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, QuoteStatus::Rejected);
}

#[tokio::test]
async fn listing_filters_by_status_most_recent_first() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "berta", Role::Cliente).await;
    let repo = QuoteRepository::new(state.get_db());

    let mut ids = Vec::new();
    for tipo in ["cocina", "puerta", "ventana"] {
        let quote = repo
            .create(QuoteCreate {
                user_id: Some(owner.clone()),
                project_id: None,
                details: details(tipo),
                total_cost: None,
            })
            .await
            .unwrap();
        ids.push(quote.id.unwrap().to_string());
    }
    repo.update_status(&ids[1], QuoteStatus::Approved)
        .await
        .unwrap();

    let all = repo.find_by_user(&owner, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let pending = repo
        .find_by_user(&owner, Some(QuoteStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|q| q.status == QuoteStatus::Pending));

    let approved = repo
        .find_by_user(&owner, Some(QuoteStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
}

// =============================================================================
// Catalog round-trips
// =============================================================================

#[tokio::test]
async fn material_category_filter_is_case_insensitive() {
    let (state, _dir) = default_state().await;
    let repo = MaterialRepository::new(state.get_db());

    repo.create(MaterialCreate {
        name: "Laminado Blanco".to_string(),
        category: "Cocina".to_string(),
        material_type: "superficie".to_string(),
        color: Some("blanco".to_string()),
        finish: Some("mate".to_string()),
        unit: "m2".to_string(),
        price: 4_500,
        availability: Availability::Available,
        distributor_id: None,
        image_url: None,
    })
    .await
    .unwrap();

    for query in ["cocina", "COCINA", "Cocina"] {
        let hits = repo.find_all(Some(query)).await.unwrap();
        assert_eq!(hits.len(), 1, "query '{query}' should match");
    }
    let misses = repo.find_all(Some("puertas")).await.unwrap();
    assert!(misses.is_empty());
}

#[tokio::test]
async fn distributor_delete_is_restricted_while_referenced() {
    let (state, _dir) = default_state().await;
    let distributors = DistributorRepository::new(state.get_db());
    let materials = MaterialRepository::new(state.get_db());

    let dist = distributors
        .create(DistributorCreate {
            name: "Maderas del Sur".to_string(),
            location: "Temuco".to_string(),
            description: None,
            status: None,
            image_url: None,
            contact: ContactInfo {
                phone: "+56 9 1234 5678".to_string(),
                email: "ventas@maderasdelsur.example".to_string(),
            },
        })
        .await
        .unwrap();
    let dist_id = dist.id.unwrap().to_string();

    materials
        .create(MaterialCreate {
            name: "Roble Nativo".to_string(),
            category: "puerta".to_string(),
            material_type: "madera".to_string(),
            color: None,
            finish: None,
            unit: "m2".to_string(),
            price: 18_000,
            availability: Availability::Limited,
            distributor_id: Some(dist_id.clone()),
            image_url: None,
        })
        .await
        .unwrap();

    // Referenced: delete must fail and the record must survive
    let err = distributors.delete(&dist_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
    assert!(distributors.find_by_id(&dist_id).await.unwrap().is_some());

    // An unreferenced distributor deletes cleanly
    let lonely = distributors
        .create(DistributorCreate {
            name: "Vidrios Andinos".to_string(),
            location: "Santiago".to_string(),
            description: None,
            status: None,
            image_url: None,
            contact: ContactInfo {
                phone: "+56 2 2345 6789".to_string(),
                email: "contacto@vidriosandinos.example".to_string(),
            },
        })
        .await
        .unwrap();
    let lonely_id = lonely.id.unwrap().to_string();
    assert!(distributors.delete(&lonely_id).await.unwrap());
    assert!(distributors.find_by_id(&lonely_id).await.unwrap().is_none());
}
