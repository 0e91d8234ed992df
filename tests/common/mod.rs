#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, path::PathBuf};

use billdb::api::{Request, Response, Transport, TransportError, TransportResult};

/// Транспорт, который отдаёт заранее заданные ответы и запоминает запросы.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<TransportResult>>,
    requests: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(Response::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Other(message.to_owned())));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: Request) -> TransportResult {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_owned())))
    }
}

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn read_data(name: &str) -> String {
    std::fs::read_to_string(data_path(name)).unwrap()
}
