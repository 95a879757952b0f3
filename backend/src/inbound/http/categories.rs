//! Note category handlers.
//!
//! ```text
//! GET    /api/category?id=12
//! POST   /api/category          {"noteId":12,"category":"questions"}
//! PUT    /api/category?id=12    {"category":"meta"}
//! DELETE /api/category?id=12
//! ```
//!
//! Reads need a session; changes also need the caller to be the note's
//! author.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Category, DatastoreError, Error, NoteId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notes::{NoteQuery, authored_note};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategoryRequest {
    pub note_id: NoteId,
    pub category: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CategoryRequest {
    pub category: String,
}

/// `{"category": name}`, with an empty name when none is set.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CategoryView {
    pub category: String,
}

/// Case-insensitive category lookup.
fn parse_category(raw: &str) -> ApiResult<Category> {
    raw.trim().to_lowercase().parse::<Category>().map_err(|err| {
        Error::invalid_request(format!("{err}"))
            .with_details(json!({ "field": "category", "code": "unknown_category" }))
    })
}

#[get("/category")]
pub async fn get_category(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<NoteQuery>,
) -> ApiResult<web::Json<CategoryView>> {
    let category = match state.datastore.note_category(query.note_id()).await {
        Ok(category) => category.as_str().to_owned(),
        Err(DatastoreError::CategoryNotSet) => String::new(),
        Err(err) => return Err(err.into()),
    };
    Ok(web::Json(CategoryView { category }))
}

/// Attach a category to a note that has none; `409` otherwise.
#[post("/category")]
pub async fn create_category(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<NewCategoryRequest>,
) -> ApiResult<HttpResponse> {
    let category = parse_category(&payload.category)?;
    authored_note(&state, payload.note_id, user.id()).await?;
    state
        .datastore
        .store_note_category(payload.note_id, category)
        .await?;
    Ok(HttpResponse::Created().finish())
}

/// Set or replace a note's category.
#[put("/category")]
pub async fn update_category(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<NoteQuery>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let category = parse_category(&payload.category)?;
    let note_id = query.note_id();
    authored_note(&state, note_id, user.id()).await?;
    state
        .datastore
        .update_note_category(note_id, category)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[delete("/category")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<NoteQuery>,
) -> ApiResult<HttpResponse> {
    let note_id = query.note_id();
    authored_note(&state, note_id, user.id()).await?;
    state.datastore.delete_note_category(note_id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDatastore;
    use crate::domain::{Note, UserId};
    use crate::inbound::http::test_utils::{fixture_now, issue_cookie, test_state};
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    const CALLER: UserId = UserId::new(10);

    fn note_by(author_id: UserId) -> Note {
        Note {
            author_id,
            content: "text".into(),
            creation_time: fixture_now(),
        }
    }

    async fn send(datastore: MockDatastore, request: actix_test::TestRequest) -> ServiceResponse {
        let state = test_state(datastore);
        let cookie = issue_cookie(&state, CALLER);
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api")
                    .service(get_category)
                    .service(create_category)
                    .service(update_category)
                    .service(delete_category),
            ),
        )
        .await;
        actix_test::call_service(&app, request.cookie(cookie).to_request()).await
    }

    #[rstest]
    #[case(Ok(Category::Predictions), "predictions")]
    #[case(Err(DatastoreError::CategoryNotSet), "")]
    #[actix_web::test]
    async fn reading_a_category_reports_name_or_empty(
        #[case] stored: Result<Category, DatastoreError>,
        #[case] expected: &str,
    ) {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_note_category()
            .withf(|id| *id == NoteId::new(3))
            .returning(move |_| stored.clone());

        let response = send(
            datastore,
            actix_test::TestRequest::get().uri("/api/category?id=3"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: CategoryView = actix_test::read_body_json(response).await;
        assert_eq!(body.category, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn author_attaches_a_category_case_insensitively() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_note_by_id()
            .returning(|_| Ok(note_by(CALLER)));
        datastore
            .expect_store_note_category()
            .withf(|id, category| *id == NoteId::new(3) && *category == Category::Questions)
            .times(1)
            .returning(|_, _| Ok(()));

        let response = send(
            datastore,
            actix_test::TestRequest::post()
                .uri("/api/category")
                .set_json(serde_json::json!({ "noteId": 3, "category": "Questions" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn second_category_is_a_conflict() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_note_by_id()
            .returning(|_| Ok(note_by(CALLER)));
        datastore
            .expect_store_note_category()
            .returning(|_, _| Err(DatastoreError::CategoryAlreadyExists));

        let response = send(
            datastore,
            actix_test::TestRequest::post()
                .uri("/api/category")
                .set_json(serde_json::json!({ "noteId": 3, "category": "meta" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_category_is_rejected() {
        let mut datastore = MockDatastore::new();
        datastore.expect_note_by_id().never();
        datastore.expect_update_note_category().never();

        let response = send(
            datastore,
            actix_test::TestRequest::put()
                .uri("/api/category?id=3")
                .set_json(CategoryRequest {
                    category: "gossip".into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn only_the_author_may_change_categories() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_note_by_id()
            .returning(|_| Ok(note_by(UserId::new(99))));
        datastore.expect_update_note_category().never();
        datastore.expect_delete_note_category().never();

        let update = send(
            datastore,
            actix_test::TestRequest::put()
                .uri("/api/category?id=3")
                .set_json(CategoryRequest {
                    category: "meta".into(),
                }),
        )
        .await;
        assert_eq!(update.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn author_replaces_and_removes_categories() {
        let mut datastore = MockDatastore::new();
        datastore
            .expect_note_by_id()
            .returning(|_| Ok(note_by(CALLER)));
        datastore
            .expect_update_note_category()
            .withf(|_, category| *category == Category::Meta)
            .times(1)
            .returning(|_, _| Ok(()));
        datastore
            .expect_delete_note_category()
            .times(1)
            .returning(|_| Ok(()));
        let state = test_state(datastore);
        let cookie = issue_cookie(&state, CALLER);
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api")
                    .service(update_category)
                    .service(delete_category),
            ),
        )
        .await;

        let update = actix_test::TestRequest::put()
            .uri("/api/category?id=3")
            .cookie(cookie.clone())
            .set_json(CategoryRequest {
                category: "META".into(),
            })
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, update).await.status(),
            StatusCode::OK
        );

        let remove = actix_test::TestRequest::delete()
            .uri("/api/category?id=3")
            .cookie(cookie)
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, remove).await.status(),
            StatusCode::OK
        );
    }
}
