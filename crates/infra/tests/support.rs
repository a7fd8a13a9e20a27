use std::io::Write;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use workwx_common::MockClock;
use workwx_domain::{AppCredentials, WorkwxConfig};
use workwx_infra::{WorkwxApp, WorkwxClient};

pub const CORP_ID: &str = "ww-test-corp";
pub const CORP_SECRET: &str = "test-secret";
pub const AGENT_ID: i64 = 1_000_002;

pub fn credentials() -> AppCredentials {
    AppCredentials { corp_id: CORP_ID.into(), corp_secret: CORP_SECRET.into(), agent_id: AGENT_ID }
}

pub fn config_for(server: &MockServer) -> WorkwxConfig {
    WorkwxConfig { request_timeout_secs: 5, ..WorkwxConfig::with_base_url(server.uri()) }
}

/// App against `server` with a real clock
pub fn app_for(server: &MockServer) -> WorkwxApp {
    WorkwxClient::new(config_for(server)).expect("client should build").app(credentials())
}

/// App against `server` whose credential expiry follows `clock`
pub fn app_with_clock(server: &MockServer, clock: &MockClock) -> WorkwxApp {
    WorkwxClient::with_clock(config_for(server), Arc::new(clock.clone()))
        .expect("client should build")
        .app(credentials())
}

/// `{errcode: 0, errmsg: "ok"}` merged with `payload`
pub fn ok_json(payload: Value) -> ResponseTemplate {
    let mut body = json!({"errcode": 0, "errmsg": "ok"});
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), payload) {
        target.extend(fields);
    }
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn platform_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"errcode": code, "errmsg": message}))
}

/// Serve `gettoken` with `token`, expecting exactly `times` calls
pub async fn mount_token(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ok_json(json!({"access_token": token, "expires_in": 7200})))
        .expect(times)
        .mount(server)
        .await;
}

/// Serve `gettoken` with `first` once, then `second`
pub async fn mount_token_sequence(server: &MockServer, first: &str, second: &str) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ok_json(json!({"access_token": first, "expires_in": 7200})))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ok_json(json!({"access_token": second, "expires_in": 7200})))
        .mount(server)
        .await;
}

/// Captured formatted log output of the current thread
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().expect("log mutex poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's tracing output into a [`LogCapture`] until the guard
/// is dropped.
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
