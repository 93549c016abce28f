//! HTTP surface: authorization, status codes and response shapes.

mod common;

use crate::common::*;
use axum::http::{Method, StatusCode};
use serde_json::json;
use situs_core::common::Role;
use situs_core::domains::moderation::ModerationStatus;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_database_ok(ctx: &TestHarness) {
    let (status, body) = ctx.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn submitted_site_is_pending_and_hidden_from_public_list(ctx: &TestHarness) {
    let token = ctx.token(501, Role::Contributor);
    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/sites",
            Some(&token),
            Some(json!({
                "name": "Candi Plaosan Submission",
                "street": "Bugisan",
                "latitude": -7.7404,
                "longitude": 110.5047,
                "site_type": "temple"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["verification_status"], "pending");
    assert_eq!(body["data"]["reporter_id"], 501);
    let site_id = body["data"]["site_id"].as_i64().unwrap();

    let (status, body) = ctx
        .request(Method::GET, "/api/sites/verified", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body
        .as_array()
        .unwrap()
        .iter()
        .any(|site| site["site_id"].as_i64() == Some(site_id));
    assert!(!listed);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn submission_requires_authentication(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/sites",
            None,
            Some(json!({
                "name": "Anonymous",
                "street": "Unknown",
                "latitude": 0.0,
                "longitude": 0.0
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn incomplete_submission_body_is_bad_request_json(ctx: &TestHarness) {
    let token = ctx.token(503, Role::Contributor);
    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/sites",
            Some(&token),
            Some(json!({ "name": "x" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn submission_with_unknown_kingdom_conflicts(ctx: &TestHarness) {
    let token = ctx.token(502, Role::Contributor);
    let (status, _) = ctx
        .request(
            Method::POST,
            "/api/sites",
            Some(&token),
            Some(json!({
                "name": "Orphan Site",
                "street": "Jalan Sepi",
                "latitude": -6.2,
                "longitude": 106.8,
                "kingdom_id": i32::MAX
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn verifier_approval_cascades_and_publishes_site(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let kingdom = create_kingdom(pool, "Kediri", ModerationStatus::Pending)
        .await
        .unwrap();
    let site = create_site(pool, "Candi Penataran", Some(kingdom), ModerationStatus::Pending)
        .await
        .unwrap();

    let token = ctx.token(601, Role::Verifier);
    let (status, body) = ctx
        .request(
            Method::PUT,
            &format!("/api/sites/approve/{}", site),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Site verified");
    assert_eq!(body["data"]["verification_status"], "verified");
    assert_eq!(body["data"]["reviewed_by"], 601);
    assert_eq!(kingdom_status(pool, kingdom).await.unwrap(), ModerationStatus::Verified);

    let (_, body) = ctx
        .request(Method::GET, "/api/sites/verified", None, None)
        .await;
    let listing = body
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["site_id"].as_i64() == Some(site.as_i32().into()))
        .cloned()
        .expect("approved site is listed");
    assert_eq!(listing["kingdom_name"], "Kediri");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn contributor_cannot_moderate(ctx: &TestHarness) {
    let site = create_site(&ctx.db_pool, "Candi Kidal", None, ModerationStatus::Pending)
        .await
        .unwrap();
    let token = ctx.token(502, Role::Contributor);

    let (status, _) = ctx
        .request(
            Method::PUT,
            &format!("/api/sites/reject/{}", site),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .request(Method::GET, "/api/sites/pending", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(
        site_status(&ctx.db_pool, site).await.unwrap(),
        ModerationStatus::Pending
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn moderating_unknown_or_malformed_id(ctx: &TestHarness) {
    let token = ctx.token(602, Role::Verifier);

    let (status, body) = ctx
        .request(
            Method::PUT,
            &format!("/api/sites/reject/{}", i32::MAX),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Site {} not found", i32::MAX));

    let (status, _) = ctx
        .request(Method::PUT, "/api/sites/approve/abc", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .request(Method::PUT, "/api/sites/approve/0", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn pending_queue_lists_submissions_for_verifiers(ctx: &TestHarness) {
    let site = create_site(&ctx.db_pool, "Candi Sukuh", None, ModerationStatus::Pending)
        .await
        .unwrap();
    let token = ctx.token(603, Role::Verifier);

    let (status, body) = ctx
        .request(Method::GET, "/api/sites/pending", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let queued = body
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["site_id"].as_i64() == Some(site.as_i32().into()));
    assert!(queued);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_is_admin_only_and_refuses_linked_sites(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let linked = create_site(pool, "Candi Cetho", None, ModerationStatus::Pending)
        .await
        .unwrap();
    let archaeologist = create_archaeologist(pool, "Edi Sedyawati", ModerationStatus::Pending)
        .await
        .unwrap();
    link(pool, archaeologist, linked).await.unwrap();
    let plain = create_site(pool, "Situs Duplikat", None, ModerationStatus::Pending)
        .await
        .unwrap();

    let verifier = ctx.token(604, Role::Verifier);
    let admin = ctx.token(1, Role::Administrator);

    let (status, _) = ctx
        .request(
            Method::DELETE,
            &format!("/api/sites/{}", plain),
            Some(&verifier),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .request(
            Method::DELETE,
            &format!("/api/sites/{}", linked),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = ctx
        .request(
            Method::DELETE,
            &format!("/api/sites/{}", plain),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Site deleted");

    let (status, _) = ctx
        .request(
            Method::DELETE,
            &format!("/api/sites/{}", plain),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn research_links_are_unique_and_listed_by_site(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let site = create_site(pool, "Candi Kalasan", None, ModerationStatus::Pending)
        .await
        .unwrap();
    let archaeologist = create_archaeologist(pool, "Satyawati Suleiman", ModerationStatus::Pending)
        .await
        .unwrap();
    let token = ctx.token(605, Role::Verifier);
    let key = json!({
        "archaeologist_id": archaeologist.as_i32(),
        "site_id": site.as_i32()
    });

    let (status, _) = ctx
        .request(Method::POST, "/api/research", Some(&token), Some(key.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = ctx
        .request(Method::POST, "/api/research", Some(&token), Some(key.clone()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = ctx
        .request(
            Method::GET,
            &format!("/api/research/by-site/{}", site),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["full_name"], "Satyawati Suleiman");

    let (status, _) = ctx
        .request(Method::DELETE, "/api/research", Some(&token), Some(key.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .request(Method::DELETE, "/api/research", Some(&token), Some(key))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reference_data_is_created_pending(ctx: &TestHarness) {
    let token = ctx.token(606, Role::Verifier);

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/kingdoms",
            Some(&token),
            Some(json!({ "name": "Pajajaran", "capital": "Pakuan" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["validation_status"], "pending");

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/archaeologists",
            Some(&token),
            Some(json!({ "full_name": "Ayatrohaedi" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["validation_status"], "pending");

    let contributor = ctx.token(507, Role::Contributor);
    let (status, _) = ctx
        .request(
            Method::POST,
            "/api/kingdoms",
            Some(&contributor),
            Some(json!({ "name": "Kerajaan Rekaan" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
