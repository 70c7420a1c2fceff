//! Design submission workflow against mock collaborators

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{
    FailingAnalysis, FailingTranscoder, MockAnalysis, MockTranscoder, create_user, default_state,
    fake_heic, test_jpeg, test_state,
};
use design_server::AppError;
use design_server::db::models::{ProjectType, Role};
use design_server::db::repository::ProjectRepository;
use design_server::designs::{self, SubmitDesign};

fn submission(data: Vec<u8>, project_type: ProjectType) -> SubmitDesign {
    SubmitDesign {
        data,
        project_type,
        project_id: None,
        name: None,
        description: None,
    }
}

#[tokio::test]
async fn oversize_payload_is_rejected_without_a_project() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "ana", Role::Cliente).await;

    let oversized = vec![0xFFu8; designs::MAX_IMAGE_SIZE + 1];
    let err = designs::submit_design(&state, &owner, false, submission(oversized, ProjectType::Cocina))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::PayloadTooLarge(_)));

    let projects = ProjectRepository::new(state.get_db());
    assert!(projects.find_by_user(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_encoding_is_rejected_without_a_project() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "ana", Role::Cliente).await;

    let gif = b"GIF89a-definitely-not-a-kitchen".to_vec();
    let err = designs::submit_design(&state, &owner, false, submission(gif, ProjectType::Cocina))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedFormat(_)));
    let projects = ProjectRepository::new(state.get_db());
    assert!(projects.find_by_user(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_submission_attaches_analysis() {
    let analysis = Arc::new(MockAnalysis::default());
    let (state, _dir) = test_state(analysis.clone(), Arc::new(MockTranscoder)).await;
    let owner = create_user(&state, "carla", Role::Cliente).await;

    let project = designs::submit_design(
        &state,
        &owner,
        false,
        submission(test_jpeg(256), ProjectType::Cocina),
    )
    .await
    .unwrap();

    assert_eq!(project.user_id.to_string(), owner);
    assert_eq!(project.project_type, ProjectType::Cocina);
    assert!(project.image_url.as_deref().unwrap().starts_with("/api/image/"));

    let attached = project.ai_analysis.expect("analysis attached");
    assert!(!attached.style.is_empty());
    assert!(!attached.materials.is_empty());
    assert!(project.materials_list.is_some());
    assert!(project.cost.unwrap() > 0);
    assert_eq!(analysis.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn analysis_failure_keeps_the_staged_project() {
    let (state, _dir) = test_state(Arc::new(FailingAnalysis), Arc::new(MockTranscoder)).await;
    let owner = create_user(&state, "dora", Role::Cliente).await;

    let err = designs::submit_design(
        &state,
        &owner,
        false,
        submission(test_jpeg(64), ProjectType::Puerta),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::AnalysisFailed(_)));

    // The project survived with its image URL; analysis stayed unset
    let projects = ProjectRepository::new(state.get_db());
    let stored = projects.find_by_user(&owner).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].image_url.is_some());
    assert!(stored[0].ai_analysis.is_none());
    assert!(stored[0].materials_list.is_none());
}

#[tokio::test]
async fn heic_goes_through_the_transcoder() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "elena", Role::Cliente).await;

    let project = designs::submit_design(
        &state,
        &owner,
        false,
        submission(fake_heic(), ProjectType::Ventana),
    )
    .await
    .unwrap();

    assert!(project.image_url.is_some());
    assert!(project.ai_analysis.is_some());
}

#[tokio::test]
async fn transcode_failure_creates_nothing() {
    let (state, _dir) = test_state(
        Arc::new(MockAnalysis::default()),
        Arc::new(FailingTranscoder),
    )
    .await;
    let owner = create_user(&state, "fede", Role::Cliente).await;

    let err = designs::submit_design(
        &state,
        &owner,
        false,
        submission(fake_heic(), ProjectType::Ventana),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::TranscodeFailed(_)));
    let projects = ProjectRepository::new(state.get_db());
    assert!(projects.find_by_user(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn resubmission_to_existing_project_replaces_image() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "gina", Role::Cliente).await;

    let first = designs::submit_design(
        &state,
        &owner,
        false,
        submission(test_jpeg(64), ProjectType::Gabinete),
    )
    .await
    .unwrap();
    let project_id = first.id.as_ref().unwrap().to_string();

    let second = designs::submit_design(
        &state,
        &owner,
        false,
        SubmitDesign {
            data: test_jpeg(128),
            project_type: ProjectType::Gabinete,
            project_id: Some(project_id.clone()),
            name: None,
            description: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(second.id.as_ref().unwrap().to_string(), project_id);
    assert_ne!(first.image_url, second.image_url);

    // Still exactly one project for the owner
    let projects = ProjectRepository::new(state.get_db());
    assert_eq!(projects.find_by_user(&owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn foreign_project_is_off_limits() {
    let (state, _dir) = default_state().await;
    let owner = create_user(&state, "hugo", Role::Cliente).await;
    let intruder = create_user(&state, "ivan", Role::Cliente).await;

    let project = designs::submit_design(
        &state,
        &owner,
        false,
        submission(test_jpeg(64), ProjectType::Cocina),
    )
    .await
    .unwrap();
    let project_id = project.id.as_ref().unwrap().to_string();

    let err = designs::submit_design(
        &state,
        &intruder,
        false,
        SubmitDesign {
            data: test_jpeg(64),
            project_type: ProjectType::Cocina,
            project_id: Some(project_id),
            name: None,
            description: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}
