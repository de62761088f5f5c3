#![allow(dead_code)]

use bridgekit_core::api::Transport;
use http::{HeaderMap, Method, Request, Response, StatusCode};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

#[derive(Default)]
struct State {
    responses: VecDeque<Result<(StatusCode, Vec<u8>), String>>,
    requests: Vec<RecordedRequest>,
}

/// An in-memory transport that replays queued responses in order.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<State>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_raw(status, body.to_string().into_bytes());
    }

    pub fn respond_raw(&self, status: u16, body: Vec<u8>) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Ok((status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Transport for FakeTransport {
    async fn send(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();

        let body = serde_json::from_slice(request.body()).unwrap_or(serde_json::Value::Null);
        state.requests.push(RecordedRequest {
            method: request.method().clone(),
            uri: request.uri().to_string(),
            headers: request.headers().clone(),
            body,
        });

        let (status, body) = state
            .responses
            .pop_front()
            .expect("no response queued")?;

        Ok(Response::builder().status(status).body(body)?)
    }
}
