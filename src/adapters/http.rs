//! Blocking HTTP exchange seam.
//!
//! The prediction client only needs `GET` and `POST application/json`
//! with a bounded body.  On ESP-IDF this wraps `EspHttpConnection`
//! (one connection per request, with the configured timeout).

use crate::error::CommsError;

/// Largest response body accepted.  Both endpoints answer with a few
/// dozen bytes.
pub const MAX_BODY: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpExchange {
    fn get(&mut self, url: &str) -> Result<HttpResponse, CommsError>;
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, CommsError>;
}

#[cfg(target_os = "espidf")]
pub use esp::EspHttpExchange;

#[cfg(target_os = "espidf")]
mod esp {
    use std::time::Duration;

    use embedded_svc::http::{Method, Status};
    use embedded_svc::http::client::Client as HttpClient;
    use embedded_svc::io::{Read, Write};
    use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};
    use log::debug;

    use super::{HttpExchange, HttpResponse, MAX_BODY};
    use crate::error::CommsError;

    pub struct EspHttpExchange {
        timeout: Duration,
    }

    impl EspHttpExchange {
        pub fn new(timeout: Duration) -> Self {
            Self { timeout }
        }

        fn client(&self) -> Result<HttpClient<EspHttpConnection>, CommsError> {
            let conf = HttpClientConfiguration {
                timeout: Some(self.timeout),
                ..Default::default()
            };
            let conn =
                EspHttpConnection::new(&conf).map_err(|_| CommsError::HttpRequestFailed)?;
            Ok(HttpClient::wrap(conn))
        }

        fn exchange(
            &self,
            method: Method,
            url: &str,
            body: Option<&[u8]>,
        ) -> Result<HttpResponse, CommsError> {
            let mut client = self.client()?;
            let len;
            let mut headers: heapless::Vec<(&str, &str), 2> = heapless::Vec::new();
            if let Some(b) = body {
                len = b.len().to_string();
                let _ = headers.push(("Content-Type", "application/json"));
                let _ = headers.push(("Content-Length", len.as_str()));
            }

            let mut request = client
                .request(method, url, &headers)
                .map_err(|_| CommsError::HttpRequestFailed)?;
            if let Some(b) = body {
                request
                    .write_all(b)
                    .map_err(|_| CommsError::HttpRequestFailed)?;
            }
            let mut response = request.submit().map_err(|_| CommsError::HttpRequestFailed)?;
            let status = response.status();

            let mut buf = [0u8; MAX_BODY];
            let mut filled = 0;
            loop {
                if filled == buf.len() {
                    let mut probe = [0u8; 1];
                    let extra = response
                        .read(&mut probe)
                        .map_err(|_| CommsError::HttpRequestFailed)?;
                    if extra > 0 {
                        return Err(CommsError::HttpBodyTooLarge);
                    }
                    break;
                }
                let n = response
                    .read(&mut buf[filled..])
                    .map_err(|_| CommsError::HttpRequestFailed)?;
                if n == 0 {
                    break;
                }
                filled += n;
            }
            debug!("HTTP {} -> {} ({} bytes)", url, status, filled);

            Ok(HttpResponse {
                status,
                body: buf[..filled].to_vec(),
            })
        }
    }

    impl HttpExchange for EspHttpExchange {
        fn get(&mut self, url: &str) -> Result<HttpResponse, CommsError> {
            self.exchange(Method::Get, url, None)
        }

        fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, CommsError> {
            self.exchange(Method::Post, url, Some(body))
        }
    }
}
