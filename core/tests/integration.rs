//! Full session lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `TodoSession` over
//! real HTTP using ureq. Validates that request building, response parsing,
//! and state reconciliation agree with the actual gateway.

use todo_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Interaction, Outcome, TodoClient,
    TodoSession, TodoView, Transport,
};

/// Executes requests with ureq, returning 4xx/5xx as data so the core
/// interprets status codes itself.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = &self.agent;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => {
                agent.post(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                agent.put(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

/// Always confirms; records notices.
#[derive(Default)]
struct Yes {
    notices: Vec<String>,
}

impl Interaction for Yes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn session_lifecycle() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}/"));
    let mut session = TodoSession::new(client, UreqTransport::new(), Yes::default());

    // Step 1: initial load — empty.
    session.load_all();
    assert_eq!(session.view(), TodoView::Empty);
    assert!(!session.state().load_failed());

    // Step 2: blank title never reaches the server.
    assert_eq!(session.create("   ", "ignored"), Ok(Outcome::InvalidInput));

    // Step 3: create two; newest ends up first.
    assert_eq!(session.create("A", ""), Ok(Outcome::Applied));
    assert_eq!(session.create("  B  ", " note "), Ok(Outcome::Applied));
    let titles: Vec<&str> = session.state().todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
    assert_eq!(session.state().todos()[0].description.as_deref(), Some("note"));
    assert_eq!(session.state().todos()[1].description, None);

    // Step 4: toggle B.
    let b = session.state().todos()[0].id.clone();
    assert_eq!(session.toggle_complete(&b), Ok(Outcome::Applied));
    assert!(session.state().get(&b).unwrap().completed);

    // Step 5: delete A.
    let a = session.state().todos()[1].id.clone();
    assert_eq!(session.delete(&a), Ok(Outcome::Applied));
    assert_eq!(session.state().len(), 1);

    // Step 6: a fresh load agrees with local state.
    let local = session.state().todos().to_vec();
    session.load_all();
    assert_eq!(session.state().todos(), local.as_slice());
    assert!(session.interaction().notices.is_empty());
}

#[test]
fn unreachable_gateway_degrades_and_alerts() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = TodoClient::new(&format!("http://{addr}"));
    let mut session = TodoSession::new(client, UreqTransport::new(), Yes::default());

    session.load_all();
    assert!(session.state().load_failed());
    assert_eq!(session.view(), TodoView::Empty);
    assert!(session.interaction().notices.is_empty());

    assert!(session.create("A", "").is_err());
    assert_eq!(session.draft().title, "A");
    assert_eq!(session.interaction().notices, vec!["Failed to add todo".to_string()]);
}
