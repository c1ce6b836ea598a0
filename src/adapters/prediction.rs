//! HTTP client for the inference server.
//!
//! Implements [`PredictionPort`]:
//!
//! - `GET {base}/status`: [`Ready`](Availability::Ready) only for a 2xx
//!   answer whose body is `ready`; any other answer is
//!   [`NotReady`](Availability::NotReady), a transport error or timeout is
//!   [`Unreachable`](Availability::Unreachable).
//! - `POST {base}/predict` with `{"ldr","motion"}`: 200 with `{"led"}`
//!   (clamped to 0–255); every other outcome is a [`PredictionError`].

use log::{debug, warn};

use crate::app::model::{Availability, Level, SensorReading};
use crate::app::ports::PredictionPort;
use crate::config::NetworkConfig;
use crate::error::PredictionError;
use crate::wire::prediction;

use super::http::HttpExchange;

pub struct HttpPredictionService<H> {
    http: H,
    status_url: String,
    predict_url: String,
}

impl<H: HttpExchange> HttpPredictionService<H> {
    pub fn new(http: H, net: &NetworkConfig) -> Self {
        Self {
            http,
            status_url: net.status_url(),
            predict_url: net.predict_url(),
        }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn http_mut(&mut self) -> &mut H {
        &mut self.http
    }
}

impl<H: HttpExchange> PredictionPort for HttpPredictionService<H> {
    fn check_availability(&mut self) -> Availability {
        match self.http.get(&self.status_url) {
            Ok(resp) if resp.is_success() && prediction::is_ready(&resp.body) => {
                Availability::Ready
            }
            Ok(resp) => {
                debug!("PREDICT: status {} -> not ready", resp.status);
                Availability::NotReady
            }
            Err(e) => {
                warn!("PREDICT: status probe failed: {}", e);
                Availability::Unreachable
            }
        }
    }

    fn predict(&mut self, reading: &SensorReading) -> Result<Level, PredictionError> {
        let body = prediction::encode_request(reading)?;
        let resp = self.http.post_json(&self.predict_url, &body)?;
        if resp.status != 200 {
            return Err(PredictionError::HttpStatus(resp.status));
        }
        let level = prediction::decode_response(&resp.body)?;
        debug!(
            "PREDICT: ldr={} motion={} -> led={}",
            reading.light_level,
            reading.motion_detected,
            level.get()
        );
        Ok(level)
    }
}
