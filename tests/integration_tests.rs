// Integration tests for Course Compass

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use course_compass::engine::{Dataset, Recommender, TrainedModel};
use course_compass::error::handle_json_payload_error;
use course_compass::models::{ErrorResponse, ForestParams, Interest, PageView, Recommendation, SessionResponse};
use course_compass::routes::{self, AppState};
use course_compass::services::SessionStore;
use serde_json::json;
use std::sync::Arc;

const DATASET: &str = "\
drawing,cartooning,coding,mathematics,singing,listening_music,Courses,Top Careers,Highest Position,Avg Salary,Social Respect
1,0,0,0,0,0,Fine Arts,\"Illustrator, Animator\",Art Director,4 LPA,7
1,0,0,0,0,0,Fine Arts,\"Illustrator, Animator\",Art Director,4 LPA,7
0,1,0,0,0,0,Fine Arts,\"Illustrator, Animator\",Art Director,4 LPA,7
0,1,0,0,0,0,Fine Arts,\"Illustrator, Animator\",Art Director,4 LPA,7
1,1,0,0,0,0,Fine Arts,\"Illustrator, Animator\",Art Director,4 LPA,7
0,0,1,0,0,0,Computer Science,\"Developer, Data Scientist\",CTO,9 LPA,8
0,0,1,0,0,0,Computer Science,\"Developer, Data Scientist\",CTO,9 LPA,8
0,0,0,1,0,0,Computer Science,\"Developer, Data Scientist\",CTO,9 LPA,8
0,0,0,1,0,0,Computer Science,\"Developer, Data Scientist\",CTO,9 LPA,8
0,0,1,1,0,0,Computer Science,\"Developer, Data Scientist\",CTO,9 LPA,8
0,0,0,0,1,0,Music,\"Singer, Composer\",Music Director,5 LPA,6
0,0,0,0,1,0,Music,\"Singer, Composer\",Music Director,5 LPA,6
0,0,0,0,0,1,Music,\"Singer, Composer\",Music Director,5 LPA,6
0,0,0,0,0,1,Music,\"Singer, Composer\",Music Director,5 LPA,6
0,0,0,0,1,1,Music,\"Singer, Composer\",Music Director,5 LPA,6
";

fn create_recommender() -> Recommender {
    let dataset = Dataset::from_reader(DATASET.as_bytes()).expect("valid dataset");
    let params = ForestParams {
        n_trees: 50,
        ..ForestParams::default()
    };
    let model = TrainedModel::train(&dataset, &params).expect("training succeeds");
    Recommender::new(Arc::new(model), Arc::new(dataset.course_info))
}

fn create_state() -> AppState {
    AppState {
        recommender: create_recommender(),
        sessions: SessionStore::new(100, 60),
    }
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(create_state()))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_integration_full_flow() {
    let app = init_app!();

    // Welcome
    let req = test::TestRequest::post().uri("/api/v1/sessions").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: SessionResponse = test::read_body_json(resp).await;
    assert!(matches!(created.view, PageView::Welcome { .. }));
    let id = created.session_id;

    // Start
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/start", id))
        .to_request();
    let started: SessionResponse = test::call_and_read_body_json(&app, req).await;
    match started.view {
        PageView::SelectInterests { categories, selected_count, min_required } => {
            assert_eq!(categories.len(), 6);
            assert_eq!(selected_count, 0);
            assert_eq!(min_required, 2);
        }
        other => panic!("expected interest selection, got {:?}", other.page()),
    }

    // Check two interests
    for interest in ["drawing", "cartooning"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/sessions/{}/interests", id))
            .set_json(json!({ "interest": interest, "selected": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Results
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/submit", id))
        .to_request();
    let results: SessionResponse = test::call_and_read_body_json(&app, req).await;
    let recommendation = match results.view {
        PageView::Results { recommendation } => recommendation,
        other => panic!("expected results, got {:?}", other.page()),
    };
    assert_eq!(recommendation.best_match.course, "Fine Arts");
    assert_eq!(recommendation.per_interest.len(), 2);
    assert_eq!(recommendation.per_interest[0].interest, Interest::Drawing);
    assert_eq!(recommendation.per_interest[1].interest, Interest::Cartooning);

    // Re-rendering gives the same results
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}", id))
        .to_request();
    let again: SessionResponse = test::call_and_read_body_json(&app, req).await;
    match again.view {
        PageView::Results { recommendation: second } => assert_eq!(second, recommendation),
        other => panic!("expected results, got {:?}", other.page()),
    }

    // Restart
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/restart", id))
        .to_request();
    let restarted: SessionResponse = test::call_and_read_body_json(&app, req).await;
    assert!(matches!(restarted.view, PageView::Welcome { .. }));

    // Back on the selection page nothing is checked
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/start", id))
        .to_request();
    let fresh: SessionResponse = test::call_and_read_body_json(&app, req).await;
    match fresh.view {
        PageView::SelectInterests { categories, selected_count, .. } => {
            assert_eq!(selected_count, 0);
            assert!(categories.iter().flat_map(|c| &c.interests).all(|o| !o.selected));
        }
        other => panic!("expected interest selection, got {:?}", other.page()),
    }
}

#[actix_web::test]
async fn test_submit_with_one_interest_is_rejected() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/v1/sessions").to_request();
    let created: SessionResponse = test::call_and_read_body_json(&app, req).await;
    let id = created.session_id;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/start", id))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/interests", id))
        .set_json(json!({ "interest": "coding" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/submit", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "insufficient_selection");
    assert!(body.message.contains("at least 2 interests"));

    // Still on the selection page
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}", id))
        .to_request();
    let current: SessionResponse = test::call_and_read_body_json(&app, req).await;
    match current.view {
        PageView::SelectInterests { selected_count, .. } => assert_eq!(selected_count, 1),
        other => panic!("expected interest selection, got {:?}", other.page()),
    }
}

#[actix_web::test]
async fn test_invalid_transition_and_unknown_session() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/v1/sessions").to_request();
    let created: SessionResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/restart", created.session_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "session_not_found");
}

#[actix_web::test]
async fn test_unknown_interest_is_rejected() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/v1/sessions").to_request();
    let created: SessionResponse = test::call_and_read_body_json(&app, req).await;
    let id = created.session_id;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/start", id))
        .to_request();
    test::call_service(&app, req).await;

    // Display labels are not accepted as identifiers
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/interests", id))
        .set_json(json!({ "interest": "Bussiness", "selected": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "unknown_interest");
}

#[actix_web::test]
async fn test_stateless_recommend() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(json!({ "interests": ["coding", "mathematics"] }))
        .to_request();
    let recommendation: Recommendation = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recommendation.best_match.course, "Computer Science");
    assert_eq!(recommendation.best_match.top_careers, "Developer, Data Scientist");

    for interests in [json!([]), json!(["singing"])] {
        let req = test::TestRequest::post()
            .uri("/api/v1/recommend")
            .set_json(json!({ "interests": interests }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(json!({ "interests": ["Drawing", "coding"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_json");
}

#[actix_web::test]
async fn test_catalog_and_health() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/catalog").to_request();
    let catalog: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let categories = catalog["categories"].as_array().expect("categories array");
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0]["name"], "Creative Arts");
    assert_eq!(categories[0]["interests"][6]["interest"], "creative_writing");
    assert_eq!(categories[0]["interests"][6]["label"], "Content writing");

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model"]["trees"], 50);
    assert_eq!(health["model"]["features"], 6);
    assert_eq!(health["model"]["courses"], 3);
}
