//! Endpoint Contract Tests
//!
//! End-to-end behavior of a small node collection served through the
//! router:
//! - version negotiation bounds and malformed versions
//! - verb capability and the Allow header
//! - create conflicts, deletes and the ACL companion cascade
//! - single-organization URIs

use std::sync::Arc;

use opsrest::config::ServerConfig;
use opsrest::endpoint::{
    policy_name_invalid, AccessOptions, Endpoint, EndpointBase, EndpointError, EndpointResult,
    Method,
};
use opsrest::protocol::response::ALLOW_HEADER;
use opsrest::protocol::{ProtocolError, Request, Response};
use opsrest::router::RestRouter;
use opsrest::store::{DataStore, MemoryStore, StoreError, StoreOptions};
use serde_json::{json, Value};

// =============================================================================
// Endpoints
// =============================================================================

struct NodesEndpoint;

impl Endpoint for NodesEndpoint {
    fn methods(&self) -> &'static [Method] {
        &[Method::Get, Method::Post]
    }

    fn get(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        let names = base.data().list(request, None, &AccessOptions::default())?;
        Ok(base.json_reply(200, request, &base.hashify_list(request, &names)))
    }

    fn post(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        let node = request.body_json()?;
        let name = match node.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => return Err(ProtocolError::bad_request("Field 'name' missing").into()),
        };
        base.data().create_entry(
            request,
            None,
            &name,
            node.to_string().as_bytes(),
            &AccessOptions::default(),
        )?;

        let mut path = request.rest_path().to_vec();
        path.push(name);
        let uri = base.build_uri(request.base_uri(), &path);
        Ok(base.json_reply(201, request, &json!({ "uri": uri })))
    }
}

struct NodeEndpoint;

impl Endpoint for NodeEndpoint {
    fn methods(&self) -> &'static [Method] {
        &[Method::Get, Method::Delete]
    }

    fn get(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        let node = base.data().get_or_default(request, None, Value::Null)?;
        if node.is_null() {
            let uri = base.build_uri(request.base_uri(), request.rest_path());
            return Err(ProtocolError::not_found(format!("Object not found: {}", uri)).into());
        }
        Ok(base.json_reply(200, request, &self.populate_defaults(request, node)))
    }

    fn populate_defaults(&self, request: &Request, mut node: Value) -> Value {
        if let Some(fields) = node.as_object_mut() {
            fields.entry("chef_type").or_insert_with(|| json!("node"));
            if let Some(name) = request.rest_path().last() {
                fields.entry("name").or_insert_with(|| json!(name));
            }
        }
        node
    }

    fn delete(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        base.data().delete(request, None, &AccessOptions::default())?;
        Ok(base.json_reply(200, request, &json!({})))
    }
}

struct PoliciesEndpoint;

impl Endpoint for PoliciesEndpoint {
    fn methods(&self) -> &'static [Method] {
        &[Method::Put]
    }

    fn put(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        let name = json!(request.rest_path().last().cloned().unwrap_or_default());
        if policy_name_invalid(&name) {
            return Err(ProtocolError::bad_request(format!("Malformed policy name {}", name)).into());
        }
        Ok(base.json_reply(200, request, &json!({ "name": name })))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn p(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

fn setup(config: ServerConfig) -> (Arc<MemoryStore>, RestRouter) {
    let store = Arc::new(MemoryStore::new());
    let opts = StoreOptions {
        create_dir: true,
        ..Default::default()
    };
    store.create_dir(&p(&["organizations", "acme"]), "nodes", &opts).unwrap();
    store.create_dir(&p(&["organizations", "acme", "acls"]), "nodes", &opts).unwrap();

    let base = EndpointBase::new(Arc::new(config), store.clone());
    let router = RestRouter::new(base)
        .route("/organizations/*/nodes", NodesEndpoint)
        .route("/organizations/*/nodes/*", NodeEndpoint)
        .route("/organizations/*/policies/*", PoliciesEndpoint);
    (store, router)
}

fn request(method: &str, path: &[&str]) -> Request {
    Request::new(method, path.iter().copied())
        .with_base_uri("http://chef.example")
        .with_requestor("pivotal")
}

fn post_node(router: &RestRouter, name: &str) -> Response {
    router.call(
        &request("POST", &["organizations", "acme", "nodes"])
            .with_body(json!({ "name": name }).to_string()),
    )
}

// =============================================================================
// Version Negotiation
// =============================================================================

#[test]
fn test_versions_in_range_accepted() {
    let (_store, router) = setup(ServerConfig::default());
    for version in ["0", "1"] {
        let resp = router.call(
            &request("GET", &["organizations", "acme", "nodes"]).with_api_version(version),
        );
        assert_eq!(resp.status(), 200, "version {}", version);
    }
}

#[test]
fn test_versions_out_of_range_report_bounds() {
    let (_store, router) = setup(ServerConfig::default().with_api_versions(1, 2));
    for version in ["0", "3", "99"] {
        let resp = router.call(
            &request("GET", &["organizations", "acme", "nodes"]).with_api_version(version),
        );
        assert_eq!(resp.status(), 406);
        let body = resp.json().unwrap();
        assert_eq!(body["min_api_version"], 1);
        assert_eq!(body["max_api_version"], 2);
    }
}

#[test]
fn test_malformed_version_does_not_echo() {
    let (_store, router) = setup(ServerConfig::default());
    for version in ["abc", "1.5"] {
        let resp = router.call(
            &request("GET", &["organizations", "acme", "nodes"]).with_api_version(version),
        );
        assert_eq!(resp.status(), 406);
        let body = resp.json().unwrap();
        assert_eq!(body, json!({ "username": "pivotal" }));
        assert!(!resp.body().as_str().contains(version));
    }
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_put_on_get_post_endpoint_is_405() {
    let (_store, router) = setup(ServerConfig::default());
    let resp = router.call(&request("PUT", &["organizations", "acme", "nodes"]));
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.header(ALLOW_HEADER), Some("GET, POST"));
}

#[test]
fn test_text_accept_rejected() {
    let (_store, router) = setup(ServerConfig::default());
    let resp = router.call(
        &request("GET", &["organizations", "acme", "nodes"]).with_accept("text/plain"),
    );
    assert_eq!(resp.status(), 406);
    assert_eq!(resp.body().as_str(), "Must accept application/json");
}

#[test]
fn test_bad_body_is_500() {
    let (_store, router) = setup(ServerConfig::default());
    let resp = router.call(
        &request("POST", &["organizations", "acme", "nodes"]).with_body("{not json"),
    );
    assert_eq!(resp.status(), 500);
    assert!(resp.body().as_str().starts_with("Exception raised!"));
}

// =============================================================================
// Data Access
// =============================================================================

#[test]
fn test_create_twice_conflicts() {
    let (_store, router) = setup(ServerConfig::default());

    let first = post_node(&router, "n1");
    assert_eq!(first.status(), 201);
    assert_eq!(
        first.json().unwrap()["uri"],
        "http://chef.example/organizations/acme/nodes/n1"
    );

    let second = post_node(&router, "n1");
    assert_eq!(second.status(), 409);
    assert_eq!(
        second.json().unwrap(),
        json!({"error": ["Object already exists: http://chef.example/organizations/acme/nodes/n1"]})
    );
}

#[test]
fn test_list_renders_child_uris() {
    let (_store, router) = setup(ServerConfig::default());
    post_node(&router, "n1");
    post_node(&router, "n2");

    let resp = router.call(&request("GET", &["organizations", "acme", "nodes"]));
    assert_eq!(
        resp.json().unwrap(),
        json!({
            "n1": "http://chef.example/organizations/acme/nodes/n1",
            "n2": "http://chef.example/organizations/acme/nodes/n2"
        })
    );
}

#[test]
fn test_get_fills_defaults() {
    let (store, router) = setup(ServerConfig::default());
    store
        .create(&p(&["organizations", "acme", "nodes"]), "n1", br#"{"run_list":[]}"#, &StoreOptions::default())
        .unwrap();

    let resp = router.call(&request("GET", &["organizations", "acme", "nodes", "n1"]));
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.json().unwrap(),
        json!({"run_list": [], "chef_type": "node", "name": "n1"})
    );
}

#[test]
fn test_get_missing_node_is_404() {
    let (_store, router) = setup(ServerConfig::default());
    let resp = router.call(&request("GET", &["organizations", "acme", "nodes", "ghost"]));
    assert_eq!(resp.status(), 404);
}

#[test]
fn test_delete_removes_companion() {
    let (store, router) = setup(ServerConfig::default());
    post_node(&router, "n1");
    store
        .create(&p(&["organizations", "acme", "acls", "nodes"]), "n1", b"{}", &StoreOptions::default())
        .unwrap();

    let resp = router.call(&request("DELETE", &["organizations", "acme", "nodes", "n1"]));
    assert_eq!(resp.status(), 200);
    assert!(!store.exists(&p(&["organizations", "acme", "nodes", "n1"])));
    assert!(!store.exists(&p(&["organizations", "acme", "acls", "nodes", "n1"])));
}

#[test]
fn test_delete_without_companion_succeeds() {
    let (store, router) = setup(ServerConfig::default());
    post_node(&router, "n1");

    let resp = router.call(&request("DELETE", &["organizations", "acme", "nodes", "n1"]));
    assert_eq!(resp.status(), 200);
    assert!(!store.exists(&p(&["organizations", "acme", "nodes", "n1"])));
}

#[test]
fn test_delete_missing_is_404_naming_uri() {
    let (_store, router) = setup(ServerConfig::default());
    let resp = router.call(&request("DELETE", &["organizations", "acme", "nodes", "ghost"]));
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.json().unwrap(),
        json!({"error": ["Object not found: http://chef.example/organizations/acme/nodes/ghost"]})
    );
}

#[test]
fn test_delete_missing_raw_store_error() {
    let store = Arc::new(MemoryStore::new());
    let base = EndpointBase::new(Arc::new(ServerConfig::default()), store);
    let req = request("DELETE", &["organizations", "acme", "nodes", "ghost"]);

    let err = base
        .data()
        .delete(&req, None, &AccessOptions::data_store_exceptions())
        .unwrap_err();
    assert!(matches!(err, EndpointError::Store(StoreError::NotFound(_))));
}

// =============================================================================
// Single-Organization Mode
// =============================================================================

#[test]
fn test_single_org_uris_drop_prefix() {
    let (_store, router) = setup(ServerConfig::default().with_single_org("acme"));

    let resp = post_node(&router, "n1");
    assert_eq!(resp.json().unwrap()["uri"], "http://chef.example/nodes/n1");

    let resp = router.call(&request("DELETE", &["organizations", "acme", "nodes", "ghost"]));
    assert_eq!(
        resp.json().unwrap(),
        json!({"error": ["Object not found: http://chef.example/nodes/ghost"]})
    );
}

#[test]
#[should_panic(expected = "Unexpected URL")]
fn test_single_org_foreign_path_panics() {
    let base = EndpointBase::new(
        Arc::new(ServerConfig::default().with_single_org("acme")),
        Arc::new(MemoryStore::new()),
    );
    base.build_uri("http://chef.example", &p(&["organizations", "other", "nodes"]));
}

// =============================================================================
// Policy Names
// =============================================================================

#[test]
fn test_policy_names_through_endpoint() {
    let (_store, router) = setup(ServerConfig::default());

    let ok = router.call(&request("PUT", &["organizations", "acme", "policies", "valid_name-1"]));
    assert_eq!(ok.status(), 200);

    let bad = router.call(&request("PUT", &["organizations", "acme", "policies", "a+b"]));
    assert_eq!(bad.status(), 400);
}
