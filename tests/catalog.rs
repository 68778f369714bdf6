//! Catalog, recommendation, and admin endpoints against a mock backend.

use httpmock::prelude::*;
use serde_json::json;

use reviewhub_rs::catalog::reviews::NewReview;
use reviewhub_rs::{RequestError, ReviewHub};

#[tokio::test]
async fn fetches_a_product() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products/42");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "product": {
                        "id": 42,
                        "name": "Noise Cancelling Headphones",
                        "brand": "Acme",
                        "average_rating": 4.5,
                        "review_count": 12,
                        "created_at": "2025-01-15T09:30:00.000000"
                    }
                }));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    let product = hub.product(42).await.expect("product");

    assert_eq!(product.id, 42);
    assert_eq!(product.brand.as_deref(), Some("Acme"));
    assert_eq!(product.review_count, 12);
    assert!(product.created_at.is_some());
}

#[tokio::test]
async fn missing_product_maps_to_not_found() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products/999");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({"error": "Not found"}));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    let error = hub.product(999).await.expect_err("should fail");

    assert!(matches!(error, RequestError::NotFound));
}

#[tokio::test]
async fn product_search_sends_the_selected_filters() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/search/products")
                .query_param("q", "headphones")
                .query_param("category", "audio")
                .query_param("rating_min", "4")
                .query_param("sort_by", "rating")
                .query_param("page", "2")
                .query_param("per_page", "20");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "products": [{"id": 42, "name": "Noise Cancelling Headphones"}],
                    "total": 21,
                    "pages": 2,
                    "current_page": 2
                }));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    let results = hub
        .search_products("headphones")
        .category("audio")
        .rating_min(4)
        .sort_by("rating")
        .page(2)
        .per_page(20)
        .call()
        .await
        .expect("search");

    mock.assert_async().await;
    assert_eq!(results.total, 21);
    assert_eq!(results.products.len(), 1);
    assert_eq!(results.current_page, 2);
}

#[tokio::test]
async fn review_listing_is_paginated_and_sorted() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/products/42/reviews")
                .query_param("per_page", "10")
                .query_param("sort_by", "most_helpful");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "reviews": [{
                        "id": 9,
                        "user": {"id": 1, "username": "john_doe"},
                        "product_id": 42,
                        "rating": 4,
                        "content": "Does what it says.",
                        "helpful_votes": 3,
                        "total_votes": 5
                    }],
                    "total": 1,
                    "pages": 1,
                    "current_page": 1
                }));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    let page = hub
        .product_reviews(42)
        .per_page(10)
        .sort_by("most_helpful")
        .call()
        .await
        .expect("reviews");

    mock.assert_async().await;
    assert_eq!(page.reviews.len(), 1);
    assert_eq!(page.reviews[0].user.username, "john_doe");
}

#[tokio::test]
async fn create_review_sends_the_bearer_token() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/reviews")
                .header("authorization", "Bearer tok1")
                .json_body(json!({
                    "product_id": 42,
                    "rating": 5,
                    "content": "Excellent.",
                    "verified_purchase": false
                }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({
                    "message": "Review created successfully",
                    "review": {
                        "id": 10,
                        "user": {"id": 1, "username": "john_doe"},
                        "product_id": 42,
                        "rating": 5,
                        "content": "Excellent."
                    }
                }));
        })
        .await;

    let mut hub = ReviewHub::new(&server.base_url());
    hub.set_token("tok1");

    let review = hub
        .create_review(&NewReview {
            product_id: 42,
            rating: 5,
            title: None,
            content: "Excellent.".to_string(),
            pros: None,
            cons: None,
            verified_purchase: false,
        })
        .await
        .expect("create review");

    mock.assert_async().await;
    assert_eq!(review.id, 10);
}

#[tokio::test]
async fn anonymous_review_submission_is_unauthorized() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/reviews");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({"msg": "Missing Authorization Header"}));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    let error = hub
        .create_review(&NewReview {
            product_id: 42,
            rating: 5,
            content: "Excellent.".to_string(),
            ..NewReview::default()
        })
        .await
        .expect_err("should fail");

    assert!(matches!(error, RequestError::Unauthorized));
}

#[tokio::test]
async fn votes_a_review_helpful() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/reviews/9/vote")
                .json_body(json!({"is_helpful": true}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"message": "Vote recorded"}));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    hub.vote_review(9, true).await.expect("vote");

    mock.assert_async().await;
}

#[tokio::test]
async fn trending_products_decode_recommendation_metadata() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/recommendations/trending")
                .query_param("limit", "5")
                .query_param("category_id", "3");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "trending_products": [{
                        "id": 42,
                        "name": "Noise Cancelling Headphones",
                        "average_rating": 4.5,
                        "recommendation_score": 0.91,
                        "recommendation_reasons": ["Trending in audio"]
                    }],
                    "category_id": 3
                }));
        })
        .await;

    let hub = ReviewHub::new(&server.base_url());
    let trending = hub.trending_products(Some(3), 5).await.expect("trending");

    assert_eq!(trending.len(), 1);
    assert_eq!(trending[0].product.id, 42);
    assert_eq!(trending[0].recommendation_score, Some(0.91));
}

#[tokio::test]
async fn user_recommendations_require_the_bearer_token() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/recommendations/user")
                .header("authorization", "Bearer tok1")
                .query_param("limit", "10");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"recommendations": [], "user_id": 1}));
        })
        .await;

    let mut hub = ReviewHub::new(&server.base_url());
    hub.set_token("tok1");

    let recommendations = hub.user_recommendations(10).await.expect("recommendations");

    mock.assert_async().await;
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn admin_listing_from_a_non_admin_account_is_forbidden() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/admin/users");
            then.status(403)
                .header("content-type", "application/json")
                .json_body(json!({"error": "Admin access required"}));
        })
        .await;

    let mut hub = ReviewHub::new(&server.base_url());
    hub.set_token("tok1");

    let error = hub.admin_users().call().await.expect_err("should fail");

    assert!(matches!(error, RequestError::Forbidden));
}

#[tokio::test]
async fn admin_user_listing_decodes_and_filters() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/admin/users")
                .query_param("search", "doe")
                .query_param("sort_by", "last_login")
                .query_param("order", "desc");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "users": [{
                        "id": 1,
                        "username": "john_doe",
                        "email": "john@example.com",
                        "email_verified": true,
                        "is_active": true,
                        "review_count": 7
                    }],
                    "total": 1,
                    "pages": 1,
                    "current_page": 1,
                    "per_page": 20
                }));
        })
        .await;

    let mut hub = ReviewHub::new(&server.base_url());
    hub.set_token("admin-token");

    let page = hub
        .admin_users()
        .search("doe")
        .sort_by("last_login")
        .order("desc")
        .call()
        .await
        .expect("admin users");

    mock.assert_async().await;
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].is_active, Some(true));
    assert_eq!(page.per_page, 20);
}

#[tokio::test]
async fn deactivates_a_user() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/7/status")
                .json_body(json!({"is_active": false}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"message": "User status updated successfully"}));
        })
        .await;

    let mut hub = ReviewHub::new(&server.base_url());
    hub.set_token("admin-token");

    hub.set_user_status(7, false).await.expect("status update");

    mock.assert_async().await;
}

#[tokio::test]
async fn admin_dashboard_decodes_overview_and_categories() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/admin/dashboard");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "overview": {
                        "total_users": 120,
                        "total_products": 44,
                        "total_reviews": 310,
                        "total_categories": 6,
                        "new_users_30d": 12,
                        "new_reviews_30d": 40,
                        "active_users_30d": 33,
                        "average_rating": 4.12
                    },
                    "top_categories": [
                        {"name": "Audio", "product_count": 18}
                    ]
                }));
        })
        .await;

    let mut hub = ReviewHub::new(&server.base_url());
    hub.set_token("admin-token");

    let stats = hub.admin_dashboard().await.expect("dashboard");

    assert_eq!(stats.overview.total_users, 120);
    assert_eq!(stats.top_categories[0].name, "Audio");
}
