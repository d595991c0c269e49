//! Conversation endpoint integration tests

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use common::{parse_body, parse_timestamp, request, TestApp};

mod service_shell {
    use super::*;

    #[tokio::test]
    async fn test_root_returns_service_info() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["name"], "Cloud Advisor API");
        assert_eq!(body["api"]["conversations"], "/api/conversations");
    }

    #[tokio::test]
    async fn test_health_returns_healthy() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/health", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "Cloud Advisor API");
    }
}

mod create_conversation {
    use super::*;

    #[tokio::test]
    async fn test_create_without_title_returns_201() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::POST, "/api/conversations", Some(json!({}))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = parse_body(resp).await;
        assert!(body["title"].is_null());
        assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
        assert_eq!(body["created_at"], body["updated_at"]);
    }

    #[tokio::test]
    async fn test_create_with_title_returns_201() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(
                Method::POST,
                "/api/conversations",
                Some(json!({"title": "Cloud Migration Help"})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = parse_body(resp).await;
        assert_eq!(body["title"], "Cloud Migration Help");
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let app = TestApp::new().await.unwrap();

        let first = parse_body(
            app.router()
                .oneshot(request(Method::POST, "/api/conversations", Some(json!({}))))
                .await
                .unwrap(),
        )
        .await;
        let second = parse_body(
            app.router()
                .oneshot(request(Method::POST, "/api/conversations", Some(json!({}))))
                .await
                .unwrap(),
        )
        .await;

        assert_ne!(first["id"], second["id"]);
    }

    #[tokio::test]
    async fn test_create_title_too_long_returns_422() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(
                Method::POST,
                "/api/conversations",
                Some(json!({"title": "a".repeat(101)})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

mod list_conversations {
    use super::*;

    #[tokio::test]
    async fn test_list_empty_returns_empty_array() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/api/conversations", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_list_orders_by_most_recently_updated() {
        let app = TestApp::new().await.unwrap();

        let first = parse_body(
            app.router()
                .oneshot(request(
                    Method::POST,
                    "/api/conversations",
                    Some(json!({"title": "first"})),
                ))
                .await
                .unwrap(),
        )
        .await;
        app.router()
            .oneshot(request(
                Method::POST,
                "/api/conversations",
                Some(json!({"title": "second"})),
            ))
            .await
            .unwrap();

        // Touch the first conversation so it becomes the most recent
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let uri = format!("/api/conversations/{}", first["id"].as_str().unwrap());
        app.router()
            .oneshot(request(Method::PATCH, &uri, Some(json!({}))))
            .await
            .unwrap();

        let body = parse_body(
            app.router()
                .oneshot(request(Method::GET, "/api/conversations", None))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(body[0]["title"], "first");
        assert_eq!(body[1]["title"], "second");
    }

    #[tokio::test]
    async fn test_list_respects_skip_and_limit() {
        let app = TestApp::new().await.unwrap();
        for i in 0..3 {
            app.router()
                .oneshot(request(
                    Method::POST,
                    "/api/conversations",
                    Some(json!({"title": format!("conv {i}")})),
                ))
                .await
                .unwrap();
        }

        let body = parse_body(
            app.router()
                .oneshot(request(
                    Method::GET,
                    "/api/conversations?skip=1&limit=1",
                    None,
                ))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_limit_100_accepted() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/api/conversations?limit=100", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_limit_101_returns_422() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/api/conversations?limit=101", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_list_negative_skip_returns_422() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, "/api/conversations?skip=-1", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod get_conversation {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_conversation_with_messages() {
        let app = TestApp::new().await.unwrap();

        let created = parse_body(
            app.router()
                .oneshot(request(
                    Method::POST,
                    "/api/conversations",
                    Some(json!({"title": "with messages"})),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        app.router()
            .oneshot(request(
                Method::POST,
                &format!("/api/conversations/{id}/messages"),
                Some(json!([
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi there"}
                ])),
            ))
            .await
            .unwrap();

        let resp = app
            .router()
            .oneshot(request(Method::GET, &format!("/api/conversations/{id}"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["id"], id);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["content"], "Hello");
        assert_eq!(messages[1]["content"], "Hi there");
    }

    #[tokio::test]
    async fn test_get_missing_returns_404_naming_the_id() {
        let app = TestApp::new().await.unwrap();
        let id = Uuid::new_v4().to_string();

        let resp = app
            .router()
            .oneshot(request(Method::GET, &format!("/api/conversations/{id}"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["error"]["message"].as_str().unwrap().contains(&id));
    }
}

mod update_conversation {
    use super::*;

    #[tokio::test]
    async fn test_patch_overwrites_title_and_bumps_updated_at() {
        let app = TestApp::new().await.unwrap();

        let created = parse_body(
            app.router()
                .oneshot(request(
                    Method::POST,
                    "/api/conversations",
                    Some(json!({"title": "old title"})),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap();
        let created_updated_at = parse_timestamp(&created["updated_at"]);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let resp = app
            .router()
            .oneshot(request(
                Method::PATCH,
                &format!("/api/conversations/{id}"),
                Some(json!({"title": "new title"})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["title"], "new title");
        assert!(parse_timestamp(&body["updated_at"]) > created_updated_at);
    }

    #[tokio::test]
    async fn test_patch_without_title_keeps_title_but_bumps_updated_at() {
        let app = TestApp::new().await.unwrap();

        let created = parse_body(
            app.router()
                .oneshot(request(
                    Method::POST,
                    "/api/conversations",
                    Some(json!({"title": "keep me"})),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap();
        let created_updated_at = parse_timestamp(&created["updated_at"]);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let body = parse_body(
            app.router()
                .oneshot(request(
                    Method::PATCH,
                    &format!("/api/conversations/{id}"),
                    Some(json!({"title": null})),
                ))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(body["title"], "keep me");
        assert!(parse_timestamp(&body["updated_at"]) > created_updated_at);
    }

    #[tokio::test]
    async fn test_patch_missing_returns_404() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(
                Method::PATCH,
                &format!("/api/conversations/{}", Uuid::new_v4()),
                Some(json!({"title": "anything"})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

mod delete_conversation {
    use super::*;

    #[tokio::test]
    async fn test_delete_returns_204_and_conversation_is_gone() {
        let app = TestApp::new().await.unwrap();

        let created = parse_body(
            app.router()
                .oneshot(request(Method::POST, "/api/conversations", Some(json!({}))))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let resp = app
            .router()
            .oneshot(request(
                Method::DELETE,
                &format!("/api/conversations/{id}"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app
            .router()
            .oneshot(request(Method::GET, &format!("/api/conversations/{id}"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_404() {
        let app = TestApp::new().await.unwrap();

        let resp = app
            .router()
            .oneshot(request(
                Method::DELETE,
                &format!("/api/conversations/{}", Uuid::new_v4()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
