use assert_matches::assert_matches;
use resource_framework::mock::{MockTransport, RecordingNavigator};
use resource_framework::route::SORT_PARAM;
use resource_framework::transport::HttpMethod;
use resource_framework::{
    add_to_collection_if_missing, build_sort_param, parse_sort_param, EntityClient,
    FrameworkError, Identified, ListController, NavigationEvent, ResourceClient, RestEntity,
    RouteQuery, SortKey, SortOrder, SortState, Sortable,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Submission {
    id: Option<i64>,
    submission_ref: Option<String>,
    attempts: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionPatch {
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<i32>,
}

impl Identified for Submission {
    fn identity(&self) -> Option<i64> {
        self.id
    }
}

impl Identified for SubmissionPatch {
    fn identity(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl RestEntity for Submission {
    const RESOURCE: &'static str = "api/cdms-submissions";
    const NAME: &'static str = "CdmsSubmission";
    type Patch = SubmissionPatch;
}

impl Sortable for Submission {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "submissionRef" => self.submission_ref.as_ref().into(),
            "attempts" => self.attempts.into(),
            _ => SortKey::Absent,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Submission error: {0}")]
struct SubmissionError(String);

impl From<String> for SubmissionError {
    fn from(s: String) -> Self {
        SubmissionError(s)
    }
}

struct SubmissionClient {
    inner: ResourceClient<Submission>,
}

impl EntityClient<Submission> for SubmissionClient {
    type Error = SubmissionError;

    fn inner(&self) -> &ResourceClient<Submission> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SubmissionError(e.to_string())
    }
}

fn submission(id: i64) -> Submission {
    Submission {
        id: Some(id),
        ..Default::default()
    }
}

// --- Tests ---

#[tokio::test]
async fn entity_client_covers_the_whole_crud_surface() {
    let mock = MockTransport::new();
    mock.expect_post("api/cdms-submissions")
        .return_json(json!({ "id": 1, "submissionRef": "SUB-1", "attempts": 0 }));
    mock.expect_patch("api/cdms-submissions/1")
        .return_json(json!({ "id": 1, "submissionRef": "SUB-1", "attempts": 2 }));
    mock.expect_get("api/cdms-submissions/1")
        .return_json(json!({ "id": 1, "submissionRef": "SUB-1", "attempts": 2 }));
    mock.expect_delete("api/cdms-submissions/1").return_empty();
    let client = SubmissionClient {
        inner: mock.client(),
    };

    let created = client
        .create(&Submission {
            submission_ref: Some("SUB-1".to_string()),
            attempts: Some(0),
            ..Default::default()
        })
        .await
        .unwrap();
    let patched = client
        .partial_update(&SubmissionPatch {
            id: 1,
            attempts: Some(2),
        })
        .await
        .unwrap();
    let found = client.find(1).await.unwrap();
    client.delete(1).await.unwrap();

    assert_eq!(created.id, Some(1));
    assert_eq!(patched.attempts, Some(2));
    assert_eq!(found, Some(patched));
    assert_eq!(mock.requests()[1].body, Some(json!({ "id": 1, "attempts": 2 })));
    mock.verify();
}

#[tokio::test]
async fn client_errors_go_through_map_error() {
    let mock = MockTransport::new();
    mock.expect_get("api/cdms-submissions").return_status(503);
    let client = SubmissionClient {
        inner: mock.client(),
    };

    let err = client.query(&Default::default()).await.unwrap_err();

    assert!(err.to_string().contains("503"), "{err}");
}

#[tokio::test]
async fn persisted_entity_cannot_be_created_again() {
    let mock = MockTransport::new();
    let client: ResourceClient<Submission> = mock.client();

    let result = client.create(&submission(7)).await;

    assert_matches!(
        result,
        Err(FrameworkError::UnexpectedIdentity { id: 7, .. })
    );
    assert!(mock.requests().is_empty());
}

#[test]
fn reconciliation_is_idempotent_and_ignores_nulls() {
    let options = vec![submission(2), submission(3)];

    let once = add_to_collection_if_missing(options, [Some(submission(1)), None]);
    let twice = add_to_collection_if_missing(once.clone(), [Some(submission(1)), None]);

    assert_eq!(once, twice);
    let ids: Vec<_> = twice.iter().filter_map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(add_to_collection_if_missing(Vec::<Submission>::new(), [None]).is_empty());
}

#[test]
fn sort_token_round_trips() {
    for token in ["id,asc", "submissionRef,desc", "attempts,asc"] {
        assert_eq!(build_sort_param(&parse_sort_param(Some(token))).as_deref(), Some(token));
    }
    assert_eq!(
        parse_sort_param(Some("attempts,desc")),
        SortState::new("attempts", SortOrder::Desc)
    );
}

/// Clicking a column twice flips its direction, through the navigator only.
#[tokio::test]
async fn list_sorting_is_driven_by_the_route() {
    let mock = MockTransport::new();
    mock.expect_get("api/cdms-submissions").return_json(json!([
        { "id": 1, "attempts": 3 },
        { "id": 2, "attempts": 0 },
        { "id": 3, "attempts": 1 }
    ]));
    let navigator = Arc::new(RecordingNavigator::new());
    let mut list = ListController::new(mock.client::<Submission>(), navigator.clone());
    list.on_route_change(&RouteQuery::new()).await.unwrap();

    list.toggle_sort("attempts");
    let first = navigator.last_query().unwrap();
    assert_eq!(first.get(SORT_PARAM), Some("attempts,asc"));
    list.on_route_change(&first).await.unwrap();
    list.toggle_sort("attempts");

    assert_eq!(
        navigator.last_query().unwrap().get(SORT_PARAM),
        Some("attempts,desc")
    );
    let attempts: Vec<_> = list.items().iter().filter_map(|s| s.attempts).collect();
    assert_eq!(attempts, vec![0, 1, 3]);
    assert_eq!(mock.count(HttpMethod::Get, "api/cdms-submissions"), 1);
    assert!(navigator
        .events()
        .iter()
        .all(|e| matches!(e, NavigationEvent::Query(_))));
}
