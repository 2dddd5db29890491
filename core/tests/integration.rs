//! Full CRUD lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every façade over
//! real HTTP: once through the default `ReqwestTransport`, once through a
//! blocking ureq agent wrapped as a `Transport`. The materialized envelopes
//! must be the same whichever transport carried the exchange.

use async_trait::async_trait;
use crud_core::{
    curried, Client, CreateMethod, Headers, HttpMethod, RawResponse, RequestBuilder,
    RequestDescriptor, ResponseEnvelope, Transport, TransportError,
};
use mock_server::Person;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Bind the mock server to a random local port and return its base URL.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

/// Executes requests with ureq on the blocking pool.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, leaving status
/// interpretation to the materializer.
struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqTransport {
    fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.to_string(),
        }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &Headers,
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    builder
}

fn execute(
    agent: &ureq::Agent,
    url: &str,
    req: RequestDescriptor,
) -> Result<RawResponse, TransportError> {
    let headers = &req.headers;
    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), headers).call(),
        (HttpMethod::Head, _) => with_headers(agent.head(url), headers).call(),
        (HttpMethod::Options, _) => with_headers(agent.options(url), headers).call(),
        (HttpMethod::Delete, Some(body)) => with_headers(agent.delete(url), headers)
            .force_send_body()
            .send(body.as_bytes()),
        (HttpMethod::Delete, None) => with_headers(agent.delete(url), headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(url), headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(url), headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(url), headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(url), headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            with_headers(agent.patch(url), headers).send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => with_headers(agent.patch(url), headers).send_empty(),
    };
    let mut response = result.map_err(TransportError::new)?;

    let status = response.status();
    let headers: Headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = if req.method == HttpMethod::Head {
        Vec::new()
    } else {
        response.body_mut().read_to_vec().map_err(TransportError::new)?
    };

    Ok(RawResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body: body.into(),
    })
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        let agent = self.agent.clone();
        let url = format!("{}{}", self.base_url, request.target);
        tokio::task::spawn_blocking(move || execute(&agent, &url, request))
            .await
            .map_err(TransportError::new)?
    }
}

/// Runs the same lifecycle whatever transport `client` was built with.
async fn people_lifecycle<Tr: Transport>(client: Client<Tr>) {
    // Step 1: read a JSON document.
    let home: ResponseEnvelope = client.read("/home", None).await.unwrap();
    assert_eq!(home.status(), 200);
    assert_eq!(home.parsed_body(), Some(&json!({"hello": "world"})));

    // Step 2: HEAD on the same route never carries a body.
    let home: ResponseEnvelope = client.head("/home", None).await.unwrap();
    assert_eq!(home.status(), 200);
    assert!(home.parsed_body.is_none());

    // Step 3: create answers 201 with a Location and no content type.
    let created: ResponseEnvelope = client
        .create(CreateMethod::Post, "/people", None, &json!({"name": "John Henry"}))
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    assert!(created.parsed_body.is_none());
    let location = created.header("Location").expect("location header").to_string();

    // Step 4: read the created person into a typed body.
    let fetched: ResponseEnvelope<Person> = client.read(&location, None).await.unwrap();
    let person = fetched.into_parsed_body().expect("person body");
    assert_eq!(person.name, "John Henry");
    assert_eq!(format!("/people/{}", person.id), location);

    // Step 5: update answers 204, so nothing is parsed.
    let updated: ResponseEnvelope = client
        .update(&location, None, &json!({"name": "Polly Ann"}))
        .await
        .unwrap();
    assert_eq!(updated.status(), 204);
    assert!(updated.parsed_body.is_none());

    // Step 6: list through the staged form.
    let people: ResponseEnvelope<Vec<Person>> = curried::read(client.transport())
        .path("/people")
        .send()
        .await
        .unwrap();
    let people = people.into_parsed_body().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Polly Ann");

    // Step 7: delete answers 202 with a JSON body.
    let deleted: ResponseEnvelope = client.del(&location, None).await.unwrap();
    assert_eq!(deleted.status(), 202);
    assert_eq!(deleted.parsed_body().unwrap()["result"], "pending");

    // Step 8: read after delete fails with the status text.
    let err = client.read::<Value>(&location, None).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not Found");

    // Step 9: PUT-create at an unknown URI fails the same way.
    let err = client
        .create::<Value, _>(
            CreateMethod::Put,
            "/people/00000000-0000-0000-0000-000000000000",
            None,
            &json!({"name": "Nobody"}),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));

    // Step 10: raw request with an explicit descriptor.
    let request = RequestBuilder::new("/people")
        .method(HttpMethod::Get)
        .header("Accept", "application/json")
        .build()
        .unwrap();
    let people: ResponseEnvelope<Vec<Person>> = client.http(request).await.unwrap();
    assert!(people.into_parsed_body().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_over_reqwest() {
    let base_url = start_server().await;
    people_lifecycle(Client::with_base_url(&base_url)).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_over_ureq() {
    let base_url = start_server().await;
    people_lifecycle(Client::with_transport(UreqTransport::new(&base_url))).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = Client::with_base_url(&format!("http://{addr}"));

    let err = client.read::<Value>("/home", None).await.unwrap_err();
    assert!(matches!(err, crud_core::Error::Transport(_)));
}

/// Answer every connection with `status_line` and an empty body, the way a
/// server with its own reason phrases would.
async fn start_raw_responder(status_line: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response =
                format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn custom_reason_phrase_becomes_the_error_message() {
    let base_url = start_raw_responder("HTTP/1.1 404 Person Missing").await;
    let client = Client::with_base_url(&base_url);

    let err = client.read::<Value>("/x", None).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Person Missing");
}

#[tokio::test(flavor = "multi_thread")]
async fn reason_phrase_of_unregistered_status_is_kept() {
    let base_url = start_raw_responder("HTTP/1.1 599 Network Timeout").await;
    let client = Client::with_base_url(&base_url);

    let err = client.read::<Value>("/x", None).await.unwrap_err();
    assert_eq!(err.status(), Some(599));
    assert_eq!(err.to_string(), "Network Timeout");
}

#[tokio::test(flavor = "multi_thread")]
async fn canonical_reason_phrase_is_used_when_server_sends_the_stock_one() {
    let base_url = start_raw_responder("HTTP/1.1 500 Internal Server Error").await;
    let client = Client::with_base_url(&base_url);

    let err = client.read::<Value>("/x", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Internal Server Error");
}
