//! Blocking HTTP execution with ureq.

use item_admin_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Executes core requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data, letting the core interpret them.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! with_headers {
    ($builder:expr, $headers:expr) => {{
        let mut builder = $builder;
        for (k, v) in $headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        builder
    }};
}

impl Transport for UreqTransport {
    fn send(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers!(self.agent.get(&req.path), &req.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers!(self.agent.delete(&req.path), &req.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers!(self.agent.post(&req.path), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers!(self.agent.post(&req.path), &req.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers!(self.agent.put(&req.path), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers!(self.agent.put(&req.path), &req.headers).send_empty()
            }
        };

        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(format!("reading response body: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serves one canned response on a local port and returns its base URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn returns_status_and_body_as_data() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 22\r\nConnection: close\r\n\r\n{\"detail\":\"Not found\"}",
        );
        let response = UreqTransport::new()
            .send(&HttpRequest::get(format!("{base}/api/items/9")))
            .unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body, r#"{"detail":"Not found"}"#);
    }

    #[test]
    fn truncated_body_is_a_transport_error() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"message\":",
        );
        let err = UreqTransport::new()
            .send(&HttpRequest::delete(format!("{base}/api/items/1")))
            .unwrap_err();
        assert!(err.0.starts_with("reading response body"), "{err:?}");
    }
}
