use arize::types::{
    DashboardRef, DataQualityMonitorInput, DriftMonitorInput, ModelRef, PerformanceMonitorInput,
    ThresholdUpdate,
};
use arize::{BoxFutureResult, Client, ClientConfig, Error, SpanQuery, Transport};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

/// answers each request from a per-operation queue and records what was sent
#[derive(Default)]
struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<(StatusCode, String)>>>,
    sent: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn respond(&self, operation: &str, data: Value) {
        self.respond_raw(operation, StatusCode::OK, json!({ "data": data }).to_string());
    }

    fn respond_raw(&self, operation: &str, status: StatusCode, body: String) {
        self.responses
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_default()
            .push_back((status, body));
    }

    fn operations(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn variables(&self, index: usize) -> Value {
        self.sent.lock().unwrap()[index].1.clone()
    }
}

impl Transport for MockTransport {
    fn post<'a>(&'a self, _url: &'a Url, body: &'a Value) -> BoxFutureResult<'a, (StatusCode, String)> {
        let operation = body["operationName"].as_str().unwrap_or_default().to_string();
        self.sent
            .lock()
            .unwrap()
            .push((operation.clone(), body["variables"].clone()));
        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        Box::pin(async move {
            next.ok_or_else(|| Error::Config(format!("no response scripted for {operation}")))
        })
    }
}

async fn client(transport: &Arc<MockTransport>) -> Client {
    let config = ClientConfig::new("key", "acme", "fraud").with_ids("org1", "space1");
    Client::connect_with_transport(config, transport.clone())
        .await
        .unwrap()
}

fn model(id: &str, name: &str) -> Value {
    json!({ "node": { "id": id, "name": name, "modelType": "numeric" } })
}

fn models_page(edges: Vec<Value>, has_next: Option<bool>, cursor: Option<&str>) -> Value {
    json!({ "node": { "models": {
        "pageInfo": { "hasNextPage": has_next, "endCursor": cursor },
        "edges": edges,
    }}})
}

fn span(id: &str, trace: &str) -> Value {
    json!({ "node": {
        "spanId": id,
        "traceId": trace,
        "name": "llm.call",
        "spanKind": "LLM",
        "statusCode": "OK",
        "startTime": "2024-05-01T12:00:00Z",
    }})
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_get_all_models_follows_cursors() {
    let transport = MockTransport::new();
    transport.respond(
        "getAllModels",
        models_page(vec![model("m1", "a"), model("m2", "b")], Some(true), Some("c1")),
    );
    transport.respond(
        "getAllModels",
        models_page(vec![model("m3", "c")], Some(true), Some("c2")),
    );
    transport.respond(
        "getAllModels",
        json!({ "node": { "models": { "pageInfo": null, "edges": [model("m4", "d")] } } }),
    );
    let client = client(&transport).await;

    let models = client.get_all_models().await.unwrap();
    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3", "m4"]);

    assert_eq!(transport.operations().len(), 3);
    assert!(transport.variables(0)["endCursor"].is_null());
    assert_eq!(transport.variables(1)["endCursor"], "c1");
    assert_eq!(transport.variables(2)["endCursor"], "c2");
    assert_eq!(transport.variables(2)["id"], "space1");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_unknown_name_never_sends_primary_operation() {
    let transport = MockTransport::new();
    transport.respond("getModelByName", models_page(vec![], None, None));
    let client = client(&transport).await;

    let err = client
        .delete_model(&ModelRef::Name("missing".to_string()))
        .await
        .unwrap_err();
    match err {
        Error::NotFound {
            resource,
            name,
            domain,
        } => {
            assert_eq!(resource, "model");
            assert_eq!(name, "missing");
            assert_eq!(domain, "space 'fraud'");
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(transport.operations(), vec!["getModelByName"]);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_fuzzy_name_match_is_not_accepted() {
    let transport = MockTransport::new();
    transport.respond(
        "getModelByName",
        models_page(vec![model("m1", "fraud-v2")], None, None),
    );
    let client = client(&transport).await;

    let err = client
        .get_model_id(&ModelRef::Name("fraud".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_graphql_errors_surface_with_operation_context() {
    let transport = MockTransport::new();
    transport.respond_raw(
        "getAllDashboards",
        StatusCode::OK,
        json!({ "data": null, "errors": [{ "message": "space is archived" }] }).to_string(),
    );
    let client = client(&transport).await;

    let err = client.get_all_dashboards().await.unwrap_err();
    assert!(err.is_api_error());
    assert_eq!(
        err.to_string(),
        "Error getting dashboards: space is archived"
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_create_dashboard_issues_one_mutation() {
    let transport = MockTransport::new();
    transport.respond(
        "createDashboard",
        json!({ "createDashboard": { "dashboard": { "id": "d1", "name": "Volume" } } }),
    );
    let client = client(&transport).await;

    let id = client.create_dashboard("Volume").await.unwrap();
    assert_eq!(id, "d1");
    assert_eq!(transport.operations(), vec!["createDashboard"]);
    assert_eq!(
        transport.variables(0),
        json!({ "input": { "spaceId": "space1", "name": "Volume" } })
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_volume_dashboard_skips_rejected_widgets() {
    let transport = MockTransport::new();
    transport.respond(
        "getAllModels",
        models_page(vec![model("m1", "a"), model("m2", "b")], Some(true), Some("c1")),
    );
    transport.respond(
        "getAllModels",
        models_page(vec![model("m3", "c")], Some(false), None),
    );
    transport.respond(
        "createDashboard",
        json!({ "createDashboard": { "dashboard": { "id": "d1", "name": "Volume" } } }),
    );
    transport.respond(
        "createLineChartWidget",
        json!({ "createLineChartWidget": { "lineChartWidget": { "id": "w1", "title": "a volume" } } }),
    );
    transport.respond_raw(
        "createLineChartWidget",
        StatusCode::OK,
        json!({ "data": null, "errors": [{ "message": "model has no data" }] }).to_string(),
    );
    transport.respond(
        "createLineChartWidget",
        json!({ "createLineChartWidget": { "lineChartWidget": { "id": "w3", "title": "c volume" } } }),
    );
    let client = client(&transport).await;

    let url = client
        .create_model_volume_dashboard("Volume", None)
        .await
        .unwrap();
    assert_eq!(
        url,
        "https://app.arize.com/organizations/org1/spaces/space1/dashboards/d1"
    );
    assert_eq!(
        transport.operations(),
        vec![
            "getAllModels",
            "getAllModels",
            "createDashboard",
            "createLineChartWidget",
            "createLineChartWidget",
            "createLineChartWidget",
        ]
    );

    let third = transport.variables(5);
    assert_eq!(third["input"]["dashboardId"], "d1");
    assert_eq!(third["input"]["plots"][0]["modelId"], "m3");
    // the skipped widget leaves no gap in the grid
    assert_eq!(third["input"]["gridPosition"], json!([6, 0, 6, 4]));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_volume_dashboard_with_unknown_model_creates_nothing() {
    let transport = MockTransport::new();
    transport.respond("getAllModels", models_page(vec![model("m1", "a")], None, None));
    let client = client(&transport).await;

    let wanted = vec!["a".to_string(), "zzz".to_string()];
    let err = client
        .create_model_volume_dashboard("Volume", Some(wanted.as_slice()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { resource: "model", .. }));
    assert_eq!(transport.operations(), vec!["getAllModels"]);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_list_spans_keeps_partial_results() {
    let transport = MockTransport::new();
    transport.respond(
        "getModelSpans",
        json!({ "node": { "spans": {
            "pageInfo": { "hasNextPage": true, "endCursor": "c1" },
            "edges": [span("s1", "t1"), span("s2", "t1")],
        }}}),
    );
    transport.respond_raw(
        "getModelSpans",
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal error".to_string(),
    );
    let client = client(&transport).await;

    let collected = client
        .list_spans(&ModelRef::Id("m1".to_string()), &SpanQuery::last_days(1))
        .await
        .unwrap();
    assert_eq!(collected.items.len(), 2);
    assert_eq!(collected.pages, 1);
    assert!(!collected.is_complete());
    assert!(matches!(
        collected.error,
        Some(Error::Api {
            status: Some(500),
            ..
        })
    ));
    assert_eq!(transport.variables(1)["endCursor"], "c1");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_list_spans_honours_limit() {
    let transport = MockTransport::new();
    transport.respond(
        "getModelSpans",
        json!({ "node": { "spans": {
            "pageInfo": { "hasNextPage": true, "endCursor": "c1" },
            "edges": [span("s1", "t1"), span("s2", "t1"), span("s3", "t2")],
        }}}),
    );
    let client = client(&transport).await;

    let query = SpanQuery::last_days(1)
        .with_limit(Some(2))
        .with_root_spans_only(true);
    let collected = client
        .list_spans(&ModelRef::Id("m1".to_string()), &query)
        .await
        .unwrap();
    assert!(collected.is_complete());
    assert_eq!(collected.items.len(), 2);
    assert_eq!(transport.operations().len(), 1);
    assert_eq!(transport.variables(0)["rootSpansOnly"], true);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_unknown_trace_is_not_found() {
    let transport = MockTransport::new();
    transport.respond(
        "getModelSpans",
        json!({ "node": { "spans": { "pageInfo": null, "edges": [] } } }),
    );
    let client = client(&transport).await;

    let err = client
        .get_trace(
            &ModelRef::Id("m1".to_string()),
            "t404",
            &SpanQuery::last_days(1),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { resource: "trace", .. }));
    assert_eq!(transport.variables(0)["traceId"], "t404");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_invalid_monitor_never_reaches_the_network() {
    let transport = MockTransport::new();
    let client = client(&transport).await;

    let input = PerformanceMonitorInput {
        model_name: "fraud".to_string(),
        name: "accuracy drop".to_string(),
        performance_metric: Some("accuracy".parse().unwrap()),
        threshold: Some(0.9),
        ..PerformanceMonitorInput::default()
    };
    let err = client.create_performance_monitor(input).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation { field: Some(ref field), .. } if field == "operator"
    ));
    assert!(transport.operations().is_empty());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_create_monitor_fills_space_and_returns_id() {
    let transport = MockTransport::new();
    transport.respond(
        "createPerformanceMonitor",
        json!({ "createPerformanceMonitor": { "monitor": { "id": "mon1" } } }),
    );
    let client = client(&transport).await;

    let input = PerformanceMonitorInput {
        model_name: "fraud".to_string(),
        name: "accuracy drop".to_string(),
        performance_metric: Some("accuracy".parse().unwrap()),
        operator: Some("<".parse().unwrap()),
        threshold: Some(0.9),
        ..PerformanceMonitorInput::default()
    };
    let id = client.create_performance_monitor(input).await.unwrap();
    assert_eq!(id, "mon1");

    let input = &transport.variables(0)["input"];
    assert_eq!(input["spaceId"], "space1");
    assert_eq!(input["operator"], "lessThan");
    assert!(input.get("emailAddresses").is_none());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_get_monitor_resolves_model_first() {
    let transport = MockTransport::new();
    transport.respond("getModelByName", models_page(vec![model("m1", "fraud")], None, None));
    transport.respond(
        "getModelMonitorByName",
        json!({ "node": { "monitors": { "edges": [
            { "node": { "id": "mon1", "name": "accuracy drop", "monitorCategory": "performance" } }
        ] } } }),
    );
    let client = client(&transport).await;

    let monitor = client
        .get_monitor(&ModelRef::Name("fraud".to_string()), "accuracy drop")
        .await
        .unwrap();
    assert_eq!(monitor.id, "mon1");
    assert_eq!(
        transport.operations(),
        vec!["getModelByName", "getModelMonitorByName"]
    );
    assert_eq!(transport.variables(1)["id"], "m1");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_list_models_stops_at_limit() {
    let transport = MockTransport::new();
    transport.respond(
        "getAllModels",
        models_page(vec![model("m1", "a"), model("m2", "b")], Some(true), Some("c1")),
    );
    let client = client(&transport).await;

    let models = client.list_models(Some(2)).await.unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(transport.operations(), vec!["getAllModels"]);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_switch_space_resolves_again() {
    let transport = MockTransport::new();
    transport.respond(
        "orgIdAndSpaceIdQuery",
        json!({ "account": { "organizations": { "edges": [
            { "node": { "id": "org1", "name": "acme", "spaces": { "edges": [
                { "node": { "id": "space-eu", "name": "churn-eu" } },
                { "node": { "id": "space2", "name": "churn" } }
            ] } } }
        ] } } }),
    );
    let client = client(&transport).await;

    let switched = client.switch_space("acme", "churn").await.unwrap();
    assert_eq!(switched.session().space_id, "space2");
    assert_eq!(switched.session().organization_id, "org1");
    assert_eq!(client.session().space_id, "space1");
    assert_eq!(transport.operations(), vec!["orgIdAndSpaceIdQuery"]);
    assert_eq!(
        transport.variables(0),
        json!({ "organization": "acme", "space": "churn" })
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_switch_space_to_unknown_space_fails() {
    let transport = MockTransport::new();
    transport.respond(
        "orgIdAndSpaceIdQuery",
        json!({ "account": { "organizations": { "edges": [
            { "node": { "id": "org1", "name": "acme", "spaces": { "edges": [
                { "node": { "id": "space-eu", "name": "churn-eu" } }
            ] } } }
        ] } } }),
    );
    let client = client(&transport).await;

    let err = client.switch_space("acme", "churn").await.err().unwrap();
    assert!(matches!(err, Error::NotFound { resource: "space", .. }));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_delete_model_by_name() {
    let transport = MockTransport::new();
    transport.respond("getModelByName", models_page(vec![model("m1", "fraud")], None, None));
    transport.respond("deleteModel", json!({ "deleteModel": { "clientMutationId": null } }));
    let client = client(&transport).await;

    let deleted = client
        .delete_model(&ModelRef::Name("fraud".to_string()))
        .await
        .unwrap();
    assert!(deleted);
    assert_eq!(transport.operations(), vec!["getModelByName", "deleteModel"]);
    assert_eq!(transport.variables(1), json!({ "input": { "id": "m1" } }));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_delete_dashboard_by_name_and_id() {
    let transport = MockTransport::new();
    transport.respond(
        "getDashboardByName",
        json!({ "node": { "dashboards": { "edges": [
            { "node": { "id": "d2", "name": "Ops" } }
        ] } } }),
    );
    transport.respond("deleteDashboard", json!({ "deleteDashboard": {} }));
    transport.respond("deleteDashboard", json!({ "deleteDashboard": {} }));
    let client = client(&transport).await;

    assert!(client
        .delete_dashboard(&DashboardRef::Name("Ops".to_string()))
        .await
        .unwrap());
    assert!(client
        .delete_dashboard(&DashboardRef::Id("d9".to_string()))
        .await
        .unwrap());
    assert_eq!(
        transport.operations(),
        vec!["getDashboardByName", "deleteDashboard", "deleteDashboard"]
    );
    assert_eq!(transport.variables(0)["search"], "Ops");
    assert_eq!(transport.variables(1), json!({ "input": { "id": "d2" } }));
    assert_eq!(transport.variables(2), json!({ "input": { "id": "d9" } }));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_delete_monitor_by_name_and_id() {
    let transport = MockTransport::new();
    transport.respond(
        "getModelMonitorByName",
        json!({ "node": { "monitors": { "edges": [
            { "node": { "id": "mon1", "name": "accuracy drop" } }
        ] } } }),
    );
    transport.respond("deleteMonitor", json!({ "deleteMonitor": {} }));
    transport.respond("deleteMonitor", json!({ "deleteMonitor": {} }));
    let client = client(&transport).await;

    assert!(client
        .delete_monitor(&ModelRef::Id("m1".to_string()), "accuracy drop")
        .await
        .unwrap());
    assert!(client.delete_monitor_by_id("mon7").await.unwrap());
    assert_eq!(
        transport.operations(),
        vec!["getModelMonitorByName", "deleteMonitor", "deleteMonitor"]
    );
    assert_eq!(transport.variables(0)["id"], "m1");
    assert_eq!(transport.variables(1), json!({ "input": { "id": "mon1" } }));
    assert_eq!(transport.variables(2), json!({ "input": { "id": "mon7" } }));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_create_drift_monitor_sends_sparse_input() {
    let transport = MockTransport::new();
    transport.respond(
        "createDriftMonitor",
        json!({ "createDriftMonitor": { "monitor": { "id": "mon2" } } }),
    );
    let client = client(&transport).await;

    let input = DriftMonitorInput {
        model_name: "fraud".to_string(),
        name: "amount drift".to_string(),
        drift_metric: Some("psi".parse().unwrap()),
        dimension_name: "amount".to_string(),
        operator: Some(">".parse().unwrap()),
        threshold: Some(0.2),
        ..DriftMonitorInput::default()
    };
    assert_eq!(client.create_drift_monitor(input).await.unwrap(), "mon2");
    assert_eq!(transport.operations(), vec!["createDriftMonitor"]);
    assert_eq!(
        transport.variables(0),
        json!({ "input": {
            "spaceId": "space1",
            "modelName": "fraud",
            "name": "amount drift",
            "driftMetric": "psi",
            "dimensionName": "amount",
            "operator": "greaterThan",
            "threshold": 0.2,
        } })
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_create_data_quality_monitor_with_dynamic_threshold() {
    let transport = MockTransport::new();
    transport.respond(
        "createDataQualityMonitor",
        json!({ "createDataQualityMonitor": { "monitor": { "id": "mon3" } } }),
    );
    let client = client(&transport).await;

    let input = DataQualityMonitorInput {
        model_name: "fraud".to_string(),
        name: "merchant nulls".to_string(),
        data_quality_metric: Some("null_rate".parse().unwrap()),
        dimension_name: "merchant".to_string(),
        operator: Some("gte".parse().unwrap()),
        dynamic_auto_threshold: Some(true),
        ..DataQualityMonitorInput::default()
    };
    assert_eq!(
        client.create_data_quality_monitor(input).await.unwrap(),
        "mon3"
    );
    let input = &transport.variables(0)["input"];
    assert_eq!(transport.operations(), vec!["createDataQualityMonitor"]);
    assert_eq!(input["dataQualityMetric"], "percentEmpty");
    assert_eq!(input["operator"], "greaterThanOrEqual");
    assert_eq!(input["dynamicAutoThreshold"], true);
    assert!(input.get("threshold").is_none());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_update_monitor_threshold() {
    let transport = MockTransport::new();
    transport.respond(
        "updateMonitorThreshold",
        json!({ "updateMonitorThreshold": { "monitor": { "id": "mon1" } } }),
    );
    let client = client(&transport).await;

    let update = ThresholdUpdate {
        monitor_id: "mon1".to_string(),
        threshold: Some(0.75),
        ..ThresholdUpdate::default()
    };
    assert_eq!(client.update_monitor_threshold(update).await.unwrap(), "mon1");
    assert_eq!(transport.operations(), vec!["updateMonitorThreshold"]);
    assert_eq!(
        transport.variables(0),
        json!({ "input": { "monitorId": "mon1", "threshold": 0.75 } })
    );

    let err = client
        .update_monitor_threshold(ThresholdUpdate {
            monitor_id: "mon1".to_string(),
            ..ThresholdUpdate::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(transport.operations().len(), 1);
}
