use std::sync::mpsc;

use serde_json::json;
use tokio::sync::oneshot;
use tokio_test::{assert_err, assert_ok};

use super::*;
use crate::{
    entities::{Division, fixtures},
    link::Fetchable,
    transport::fake::{BASE_URL, FakeTransport},
};

fn divisions_session() -> (Session, std::sync::Arc<FakeTransport>) {
    FakeTransport::new()
        .route("study/divisions", fixtures::divisions())
        .into_session()
}

#[test]
fn test_query_url_appends_segments_and_params() {
    let base: Url = "https://timetable.spbu.ru/api/v1/".parse().unwrap();
    let url = Query::new("/groups/334001/events/")
        .param("timetable", "all lessons")
        .param("lang", "ru")
        .url(&base)
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://timetable.spbu.ru/api/v1/groups/334001/events?timetable=all+lessons&lang=ru"
    );
}

#[test]
fn test_query_url_without_trailing_slash() {
    let base: Url = BASE_URL.parse().unwrap();
    let query = Query::new("addresses").segment("a/b").segment("classrooms");
    assert_eq!(query.path(), "addresses/a/b/classrooms");
    assert_eq!(
        query.url(&base).unwrap().as_str(),
        "https://timetable.test/api/v1/addresses/a%2Fb/classrooms"
    );
    assert!(query.params().is_empty());
}

#[tokio::test]
async fn test_mock_skips_transport() {
    let (session, transport) = divisions_session();
    let request = session.divisions().with_mock(fixtures::divisions().to_string());
    assert!(request.is_mock());

    let divisions = assert_ok!(request.await);
    assert_eq!(divisions.len(), 2);
    assert!(divisions[0].session().is_bound_to(&session));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_mock_and_network_results_are_equal() {
    let (session, transport) = divisions_session();
    let from_network = assert_ok!(session.divisions().send().await);
    let from_mock = assert_ok!(
        session
            .divisions()
            .with_mock(fixtures::divisions().to_string())
            .send()
            .await
    );
    assert_eq!(from_network, from_mock);
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_mock_callback_runs_before_returning() {
    let (session, transport) = divisions_session();
    let (tx, rx) = mpsc::channel();

    session
        .divisions()
        .with_mock(fixtures::divisions().to_string())
        .on_complete(move |result| {
            tx.send(result).unwrap();
        });

    let divisions = assert_ok!(rx.try_recv().unwrap());
    assert_eq!(divisions[1].alias, "HIST");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_network_callback_delivered_on_runtime() {
    let (session, transport) = divisions_session();
    let (tx, rx) = oneshot::channel();

    session.divisions().on_complete(move |result| {
        let _ = tx.send(result);
    });

    let divisions = assert_ok!(rx.await.unwrap());
    assert_eq!(divisions.len(), 2);
    assert!(divisions[0].session().is_bound_to(&session));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_callback_delivered_on_given_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let (session, transport) = divisions_session();
    let (tx, rx) = mpsc::channel();

    session
        .divisions()
        .deliver_on(runtime.handle().clone())
        .on_complete(move |result| {
            let on_runtime = Handle::try_current().is_ok();
            tx.send((result, on_runtime)).unwrap();
        });

    let (result, on_runtime) = rx.recv().unwrap();
    assert!(on_runtime);
    assert_eq!(assert_ok!(result).len(), 2);
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_network_callback_without_runtime_fails() {
    let (session, transport) = divisions_session();
    let (tx, rx) = mpsc::channel();

    session.divisions().on_complete(move |result| {
        tx.send(result).unwrap();
    });

    let err = assert_err!(rx.try_recv().unwrap());
    assert!(matches!(err, Error::Internal(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_custom_decoder_replaces_entity_rule() {
    let (session, _transport) = divisions_session();
    let first_only: DecodeRule<Vec<Division>> = |json| {
        let mut divisions = Vec::<Division>::decode(json)?;
        divisions.truncate(1);
        Ok(divisions)
    };

    let divisions = assert_ok!(session.divisions().with_decoder(first_only).await);
    assert_eq!(divisions.len(), 1);
    assert!(divisions[0].session().is_bound_to(&session));
}

#[tokio::test]
async fn test_nested_envelope_is_unwrapped() {
    let (session, _transport) = FakeTransport::new()
        .route("wrapped", json!({"Data": {"Items": [1, 2, 3]}}))
        .into_session();

    let items = assert_ok!(
        session
            .request::<Value>(Query::new("wrapped").select("Data").select("Items"))
            .await
    );
    assert_eq!(items, json!([1, 2, 3]));

    let err = assert_err!(
        session
            .request::<Value>(Query::new("wrapped").select("Data").select("Rows"))
            .await
    );
    match err {
        Error::Decode(decode) => {
            assert_eq!(decode.key.as_deref(), Some("Rows"));
            assert_eq!(decode.fragment, Some(json!({"Items": [1, 2, 3]})));
        }
        other => panic!("expected a decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_params_reach_transport() {
    let (session, transport) = FakeTransport::new()
        .route("search?q=%D0%B8%D0%B2", json!(["hit"]))
        .into_session();

    let hits = assert_ok!(session.request::<Value>(Query::new("search").param("q", "ив")).await);
    assert_eq!(hits, json!(["hit"]));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let (session, _transport) = FakeTransport::new()
        .route_raw("study/divisions", b"<html>maintenance</html>".to_vec())
        .into_session();

    let err = assert_err!(session.divisions().await);
    assert!(matches!(err, Error::Json(_)));
    assert!(err.is_decode());
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_network_error_is_not_retried() {
    let (session, transport) = FakeTransport::new().into_session();

    let err = assert_err!(session.divisions().await);
    assert!(matches!(err, Error::Status { status: 404, .. }));
    assert!(err.is_network());
    assert_eq!(transport.calls(), 1);
    assert_eq!(
        transport.requested(),
        vec!["https://timetable.test/api/v1/study/divisions".to_string()]
    );
}

#[tokio::test]
async fn test_unbound_link_fails_before_transport() {
    let (_session, transport) = divisions_session();
    let request = Request::<Vec<Division>>::from_link(&SessionLink::default(), Division::query());

    let err = assert_err!(request.await);
    assert!(matches!(err, Error::ContextGone("session")));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_unbound_link_fails_before_transport_with_mock() {
    let (tx, rx) = mpsc::channel();
    Request::<Vec<Division>>::from_link(&SessionLink::default(), Division::query())
        .with_mock(fixtures::divisions().to_string())
        .on_complete(move |result| {
            tx.send(result).unwrap();
        });

    let err = assert_err!(rx.try_recv().unwrap());
    assert!(matches!(err, Error::ContextGone("session")));
}
