use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use usermgmt_blogs::{Blog, validate_blog};
use usermgmt_core::{DomainError, Entity};

use crate::app::dto::{Key, Payload};
use crate::app::errors::ApiError;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/:title", get(get_blog).put(update_blog).delete(delete_blog))
}

pub async fn create_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Payload(blog): Payload<Blog>,
) -> Result<Response, ApiError> {
    let existing = services.blogs.list()?;
    validate_blog(&blog, &existing)?;

    services.blogs.insert(blog.clone())?;
    tracing::info!(blog = %blog, "blog created");

    common::created(&common::location("blogs", &blog.title), &blog)
}

pub async fn list_blogs(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Blog>>, ApiError> {
    Ok(Json(services.blogs.list()?))
}

pub async fn get_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Key { value: title, .. }: Key<Blog>,
) -> Result<Json<Blog>, ApiError> {
    services
        .blogs
        .get(&title)?
        .map(Json)
        .ok_or_else(|| DomainError::missing(Blog::kind(), &title).into())
}

/// Replace the content of an existing post; the title stays as stored.
pub async fn update_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Key { value: title, .. }: Key<Blog>,
    Payload(changes): Payload<Blog>,
) -> Result<Json<Blog>, ApiError> {
    if services.blogs.get(&title)?.is_none() {
        return Err(DomainError::missing(Blog::kind(), &title).into());
    }

    let others = services.blogs.others(&title)?;
    validate_blog(&changes, &others)?;

    let updated = services
        .blogs
        .update(&title, &mut |blog: &mut Blog| blog.apply_update(&changes))?;
    tracing::info!(blog = %updated, "blog updated");

    Ok(Json(updated))
}

pub async fn delete_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Key { value: title, .. }: Key<Blog>,
) -> Result<Response, ApiError> {
    services.blogs.remove(&title)?;
    tracing::info!(title = %title, "blog deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, header};
    use serde_json::json;

    use super::*;
    use crate::app::testing::{app, app_with, send};

    #[tokio::test]
    async fn starts_with_seeded_posts() {
        let res = send(&app(), Method::GET, "/blogs", None).await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(
            res.json(),
            json!([
                {"title": "First Blog", "content": "This is the content of the first blog."},
                {"title": "Second Blog", "content": "This is the content of the second blog."},
            ])
        );
    }

    #[tokio::test]
    async fn unseeded_list_is_empty_array() {
        let res = send(&app_with(AppServices::in_memory(false)), Method::GET, "/blogs", None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json(), json!([]));
    }

    #[tokio::test]
    async fn get_decodes_path_segment() {
        let res = send(&app(), Method::GET, "/blogs/First%20Blog", None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json()["title"], "First Blog");
    }

    #[tokio::test]
    async fn create_returns_encoded_location() {
        let app = app();
        let res = send(
            &app,
            Method::POST,
            "/blogs",
            Some(json!({"title": "Third Blog", "content": "More words."})),
        )
        .await;

        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.headers.get(header::LOCATION).unwrap(), "/blogs/Third%20Blog");
        assert_eq!(res.json()["content"], "More words.");
        assert_eq!(
            send(&app, Method::GET, "/blogs/Third%20Blog", None).await.status,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn create_rejects_blank_fields_and_duplicates() {
        let app = app();

        let res = send(&app, Method::POST, "/blogs", Some(json!({"title": "T", "content": ""}))).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);

        let res = send(
            &app,
            Method::POST,
            "/blogs",
            Some(json!({"title": "First Blog", "content": "copy"})),
        )
        .await;
        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(
            res.json(),
            json!({"statusCode": 409, "message": "A blog with the title 'First Blog' already exists."})
        );
    }

    #[tokio::test]
    async fn update_changes_content_and_keeps_title() {
        let app = app();

        let res = send(
            &app,
            Method::PUT,
            "/blogs/First%20Blog",
            Some(json!({"title": "First Blog", "content": "updated"})),
        )
        .await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json(), json!({"title": "First Blog", "content": "updated"}));
    }

    #[tokio::test]
    async fn update_rejects_title_of_another_post() {
        let app = app();

        let res = send(
            &app,
            Method::PUT,
            "/blogs/First%20Blog",
            Some(json!({"title": "Second Blog", "content": "updated"})),
        )
        .await;

        assert_eq!(res.status, StatusCode::CONFLICT);
        let first = send(&app, Method::GET, "/blogs/First%20Blog", None).await;
        assert_eq!(first.json()["content"], "This is the content of the first blog.");
    }

    #[tokio::test]
    async fn update_rejects_blank_content() {
        let res = send(
            &app(),
            Method::PUT,
            "/blogs/First%20Blog",
            Some(json!({"title": "First Blog", "content": "   "})),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_missing_post_is_404_and_changes_nothing() {
        let app = app();
        let before = send(&app, Method::GET, "/blogs", None).await.json();

        let res = send(
            &app,
            Method::PUT,
            "/blogs/Nope",
            Some(json!({"title": "Nope", "content": "x"})),
        )
        .await;

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, Method::GET, "/blogs", None).await.json(), before);
    }

    #[tokio::test]
    async fn delete_then_get_is_404() {
        let app = app();

        let res = send(&app, Method::DELETE, "/blogs/Second%20Blog", None).await;
        assert_eq!(res.status, StatusCode::NO_CONTENT);

        assert_eq!(
            send(&app, Method::GET, "/blogs/Second%20Blog", None).await.status,
            StatusCode::NOT_FOUND
        );
        let list = send(&app, Method::GET, "/blogs", None).await.json();
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_key_is_json_404_and_changes_nothing() {
        let app = app();
        let before = send(&app, Method::GET, "/blogs", None).await.json();

        let res = send(&app, Method::DELETE, "/blogs/%FF", None).await;

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        let body = res.json();
        assert_eq!(body["statusCode"], 404);
        assert!(body["message"].as_str().unwrap().starts_with("No blog found"));
        assert_eq!(send(&app, Method::GET, "/blogs", None).await.json(), before);
    }
}
