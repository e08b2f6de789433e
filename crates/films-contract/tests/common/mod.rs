// crates/films-contract/tests/common/mod.rs
// ============================================================================
// Module: Stub Films Service
// Description: In-process films API for verifier tests.
// Purpose: Exercise every check against a conforming service and targeted faults.
// Dependencies: films-contract, serde_json, tiny_http
// ============================================================================

//! ## Overview
//! [`StubService`] serves `/api/films/` on an ephemeral localhost port. Every
//! URL in its payloads is built from its own address so self-links and
//! reference prefixes match the configured service root. [`Fault`]s switch
//! individual behaviors off the contract.
//!
//! Clients connect to a raw TCP front. It answers `HEAD films/` itself,
//! because tiny_http drops a handler's `Connection` header, and forwards
//! every other request to a tiny_http server over a fresh connection.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test fixtures favor direct unwraps for setup clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpListener;
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use films_contract::ContractConfig;
use films_contract::ContractVerifier;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Faults
// ============================================================================

/// Deviations from the contract the stub can be told to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The second film serves `episode_id` as a string.
    EpisodeIdAsString,
    /// The second film serves an impossible release date.
    ImpossibleReleaseDate,
    /// The second film serves a timestamp without fractional seconds.
    WholeSecondTimestamp,
    /// The second film omits `edited`.
    MissingEdited,
    /// The second film serves a number inside `planets`.
    NumericPlanetReference,
    /// Film 1 references a character on another host.
    ForeignCharacterPrefix,
    /// Film 1 serves a different title.
    WrongTitle,
    /// `HEAD` omits `ETag` and `Strict-Transport-Security`.
    MissingSecurityHeaders,
    /// `OPTIONS` does not advertise `multipart/form-data`.
    MissingMultipartParser,
    /// `POST` on the collection returns `201`.
    AcceptsPost,
    /// Missing films return a different detail text.
    WrongNotFoundDetail,
    /// Missing films return `200`.
    MissingFilmsResolve,
    /// The collection returns `500`.
    CollectionUnavailable,
    /// Film 1 waits before responding.
    SlowFilm(Duration),
    /// Film 1 serves a new `edited` value on every request.
    DriftingEdited,
    /// The collection serves pagination fields of unexpected types.
    OddPagination,
    /// `OPTIONS` answers `200` with an HTML body.
    HtmlOptions,
    /// `HEAD` sends every header name in lowercase.
    LowercaseHeaderNames,
}

// ============================================================================
// SECTION: Stub Service
// ============================================================================

/// Running stub service; stops when dropped.
pub struct StubService {
    /// Upstream tiny_http server, unblocked on drop.
    server: Arc<Server>,
    /// Worker serving upstream requests.
    worker: Option<JoinHandle<()>>,
    /// Address of the raw TCP front.
    front: SocketAddr,
    /// Set when the front should stop accepting.
    stopping: Arc<AtomicBool>,
    /// Thread accepting front connections.
    acceptor: Option<JoinHandle<()>>,
    /// Service root, `http://127.0.0.1:<port>/api/`.
    root: String,
}

impl StubService {
    /// Starts a conforming service.
    pub fn conforming() -> Self {
        Self::start(&[])
    }

    /// Starts a service exhibiting `faults`.
    pub fn start(faults: &[Fault]) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let upstream = server.server_addr().to_ip().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let front = listener.local_addr().unwrap();
        let root = format!("http://{front}/api/");
        let state = Arc::new(StubState {
            root: root.clone(),
            faults: faults.to_vec(),
            film_fetches: AtomicUsize::new(0),
        });
        let worker = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    state.handle(request);
                }
            })
        };
        let stopping = Arc::new(AtomicBool::new(false));
        let acceptor = {
            let stopping = Arc::clone(&stopping);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if stopping.load(Ordering::SeqCst) {
                        break;
                    }
                    let Ok(stream) = stream else {
                        continue;
                    };
                    let state = Arc::clone(&state);
                    thread::spawn(move || {
                        let _ = serve_connection(stream, &state, upstream);
                    });
                }
            })
        };
        Self {
            server,
            worker: Some(worker),
            front,
            stopping,
            acceptor: Some(acceptor),
            root,
        }
    }

    /// Returns the service root.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns a configuration pointed at this service with a generous budget.
    pub fn config(&self) -> ContractConfig {
        ContractConfig {
            service_root: self.root.clone(),
            timeout_ms: 5_000,
            latency_budget_ms: 2_000,
            ..ContractConfig::default()
        }
    }

    /// Builds a verifier for this service.
    pub fn verifier(&self) -> ContractVerifier {
        ContractVerifier::new(self.config()).unwrap()
    }
}

impl Drop for StubService {
    fn drop(&mut self) {
        self.stopping.store(true, Ordering::SeqCst);
        let _ = TcpStream::connect(self.front);
        if let Some(acceptor) = self.acceptor.take() {
            let _ = acceptor.join();
        }
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

// ============================================================================
// SECTION: Front Connections
// ============================================================================

/// Serves requests on one client connection until it closes.
fn serve_connection(client: TcpStream, state: &StubState, upstream: SocketAddr) -> io::Result<()> {
    let mut reader = BufReader::new(client.try_clone()?);
    let mut writer = client;
    while let Some(head) = read_head(&mut reader)? {
        let mut body = vec![0u8; content_length(&head)];
        reader.read_exact(&mut body)?;
        let response = if head.first().is_some_and(|line| line.starts_with("HEAD /api/films/ ")) {
            state.head_response()
        } else {
            forward(upstream, &head, &body)?
        };
        writer.write_all(&response)?;
        writer.flush()?;
    }
    Ok(())
}

/// Reads a message head, returning `None` at end of stream.
fn read_head(reader: &mut impl BufRead) -> io::Result<Option<Vec<String>>> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        if line.is_empty() {
            return Ok(Some(lines));
        }
        lines.push(line);
    }
}

/// Returns the `Content-Length` of a message head, or zero.
fn content_length(head: &[String]) -> usize {
    head.iter()
        .skip(1)
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if !name.trim().eq_ignore_ascii_case("content-length") {
                return None;
            }
            value.trim().parse::<usize>().ok()
        })
        .unwrap_or(0)
}

/// Sends one request to tiny_http and returns the raw response bytes.
fn forward(upstream: SocketAddr, head: &[String], body: &[u8]) -> io::Result<Vec<u8>> {
    let mut stream = TcpStream::connect(upstream)?;
    let mut request = String::new();
    for line in head {
        let is_connection = line
            .split_once(':')
            .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("connection"));
        if !is_connection {
            request.push_str(line);
            request.push_str("\r\n");
        }
    }
    request.push_str("Connection: close\r\n\r\n");
    stream.write_all(request.as_bytes())?;
    stream.write_all(body)?;
    stream.flush()?;

    let mut reader = BufReader::new(stream);
    let mut response = Vec::new();
    let mut head = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        response.extend_from_slice(line.as_bytes());
        let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
        if trimmed.is_empty() {
            break;
        }
        head.push(trimmed);
    }
    if head.iter().skip(1).any(|line| line.to_ascii_lowercase().starts_with("content-length:")) {
        let mut body = vec![0u8; content_length(&head)];
        reader.read_exact(&mut body)?;
        response.extend_from_slice(&body);
    } else {
        reader.read_to_end(&mut response)?;
    }
    Ok(response)
}

// ============================================================================
// SECTION: Request Handling
// ============================================================================

/// Request-independent stub state.
struct StubState {
    /// Service root used in payload URLs.
    root: String,
    /// Active faults.
    faults: Vec<Fault>,
    /// `GET films/1/` count, used by [`Fault::DriftingEdited`].
    film_fetches: AtomicUsize,
}

impl StubState {
    /// Returns true when `fault` is active.
    fn has(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }

    /// Returns the configured film-1 delay.
    fn film_delay(&self) -> Option<Duration> {
        self.faults.iter().find_map(|fault| match fault {
            Fault::SlowFilm(delay) => Some(*delay),
            _ => None,
        })
    }

    /// Routes one request.
    fn handle(&self, request: Request) {
        let path = request.url().split('?').next().unwrap_or_default().to_string();
        let method = request.method().clone();
        let response = match (path.as_str(), &method) {
            ("/api/films/", Method::Get) => self.collection(),
            ("/api/films/", Method::Options) => self.options(),
            ("/api/films/", Method::Post) if self.has(Fault::AcceptsPost) => {
                json_response(201, &json!({"detail": "created"}))
            }
            ("/api/films/", _) => json_response(
                405,
                &json!({"detail": format!("Method \"{method}\" not allowed.")}),
            ),
            ("/api/films/1/", Method::Get) => self.film_one(),
            (other, Method::Get) if other.starts_with("/api/films/") => self.missing_film(),
            _ => json_response(404, &json!({"detail": "Not found"})),
        };
        let _ = request.respond(response);
    }

    /// `GET films/`.
    fn collection(&self) -> Response<std::io::Cursor<Vec<u8>>> {
        if self.has(Fault::CollectionUnavailable) {
            return json_response(500, &json!({"detail": "unavailable"}));
        }
        let first = self.first_film(0);
        let second = self.second_film();
        let body = if self.has(Fault::OddPagination) {
            json!({
                "count": "2",
                "next": {"page": 2},
                "previous": 7,
                "results": [first, second],
            })
        } else {
            json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [first, second],
            })
        };
        json_response(200, &body)
    }

    /// Raw `HEAD films/` response, written by the front.
    fn head_response(&self) -> Vec<u8> {
        let mut headers = vec![
            ("Content-Type", "application/json"),
            ("Content-Length", "0"),
            ("Server", "stub"),
            ("Date", "Thu, 15 Oct 2026 12:00:00 GMT"),
            ("Connection", "keep-alive"),
            ("Vary", "Accept, Cookie"),
            ("X-Frame-Options", "SAMEORIGIN"),
            ("Allow", "GET, HEAD, OPTIONS"),
        ];
        if !self.has(Fault::MissingSecurityHeaders) {
            headers.push(("ETag", "\"f5a1c9\""));
            headers.push(("Strict-Transport-Security", "max-age=15768000"));
        }
        let mut response = String::from("HTTP/1.1 200 OK\r\n");
        for (name, value) in headers {
            let name = if self.has(Fault::LowercaseHeaderNames) {
                name.to_ascii_lowercase()
            } else {
                name.to_string()
            };
            response.push_str(&format!("{name}: {value}\r\n"));
        }
        response.push_str("\r\n");
        response.into_bytes()
    }

    /// `OPTIONS films/`.
    fn options(&self) -> Response<std::io::Cursor<Vec<u8>>> {
        if self.has(Fault::HtmlOptions) {
            return Response::from_data(b"<html>oops</html>".to_vec())
                .with_header(header("Content-Type", "text/html"));
        }
        let mut parses =
            vec!["application/json", "application/x-www-form-urlencoded", "multipart/form-data"];
        if self.has(Fault::MissingMultipartParser) {
            parses.pop();
        }
        json_response(
            200,
            &json!({
                "name": "Film List",
                "renders": ["application/json", "text/html"],
                "parses": parses,
            }),
        )
    }

    /// `GET films/1/`.
    fn film_one(&self) -> Response<std::io::Cursor<Vec<u8>>> {
        if let Some(delay) = self.film_delay() {
            thread::sleep(delay);
        }
        let fetch = self.film_fetches.fetch_add(1, Ordering::SeqCst);
        json_response(200, &self.first_film(fetch))
    }

    /// `GET films/<missing>/`.
    fn missing_film(&self) -> Response<std::io::Cursor<Vec<u8>>> {
        if self.has(Fault::MissingFilmsResolve) {
            return json_response(200, &self.second_film());
        }
        let detail = if self.has(Fault::WrongNotFoundDetail) { "No such film" } else { "Not found" };
        json_response(404, &json!({"detail": detail}))
    }

    /// A New Hope, as served at `films/1/`.
    fn first_film(&self, fetch: usize) -> Value {
        let root = &self.root;
        let mut characters = vec![format!("{root}people/1/"), format!("{root}people/2/")];
        if self.has(Fault::ForeignCharacterPrefix) {
            characters.push("http://elsewhere.example/api/people/3/".to_string());
        }
        let title = if self.has(Fault::WrongTitle) { "A New Hop" } else { "A New Hope" };
        let edited = if self.has(Fault::DriftingEdited) {
            format!("2014-12-20T19:49:{:02}.256000Z", 45 + fetch % 10)
        } else {
            "2014-12-20T19:49:45.256000Z".to_string()
        };
        json!({
            "title": title,
            "episode_id": 4,
            "opening_crawl": "It is a period of civil war.\r\nRebel spaceships, striking\r\nfrom a hidden base...",
            "director": "George Lucas",
            "producer": "Gary Kurtz, Rick McCallum",
            "release_date": "1977-05-25",
            "characters": characters,
            "planets": [format!("{root}planets/1/")],
            "starships": [format!("{root}starships/2/")],
            "vehicles": [format!("{root}vehicles/4/")],
            "species": [format!("{root}species/1/")],
            "created": "2014-12-10T14:23:31.880000Z",
            "edited": edited,
            "url": format!("{root}films/1/"),
        })
    }

    /// The Empire Strikes Back, carrying any collection-level faults.
    fn second_film(&self) -> Value {
        let root = &self.root;
        let mut film = json!({
            "title": "The Empire Strikes Back",
            "episode_id": 5,
            "opening_crawl": "It is a dark time for the Rebellion.",
            "director": "Irvin Kershner",
            "producer": "Gary Kurtz, Rick McCallum",
            "release_date": "1980-05-17",
            "characters": [format!("{root}people/1/")],
            "planets": [format!("{root}planets/4/")],
            "starships": [format!("{root}starships/3/")],
            "vehicles": [format!("{root}vehicles/8/")],
            "species": [format!("{root}species/2/")],
            "created": "2014-12-12T11:26:24.656000Z",
            "edited": "2014-12-15T13:07:53.386000Z",
            "url": format!("{root}films/2/"),
        });
        let record = film.as_object_mut().unwrap();
        if self.has(Fault::EpisodeIdAsString) {
            record.insert("episode_id".to_string(), json!("5"));
        }
        if self.has(Fault::ImpossibleReleaseDate) {
            record.insert("release_date".to_string(), json!("1980-02-30"));
        }
        if self.has(Fault::WholeSecondTimestamp) {
            record.insert("created".to_string(), json!("2014-12-12T11:26:24Z"));
        }
        if self.has(Fault::MissingEdited) {
            record.remove("edited");
        }
        if self.has(Fault::NumericPlanetReference) {
            record.insert("planets".to_string(), json!([format!("{root}planets/4/"), 5]));
        }
        film
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a JSON response with the given status.
fn json_response(status: u16, body: &Value) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_data(serde_json::to_vec(body).unwrap())
        .with_status_code(status)
        .with_header(header("Content-Type", "application/json"))
}

/// Builds a header from ASCII strings.
fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}

/// Returns a service root on a port nothing listens on.
pub fn unreachable_root() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/")
}
