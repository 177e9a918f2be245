use std::sync::Mutex;

use courier_core::{HttpClient, Request, Response, TransportError};

type Reply = fn(&Request) -> Result<Response, TransportError>;

/// In-memory transport: records each request and the thread that ran it.
pub(crate) struct MockClient {
    reply: Reply,
    requests: Mutex<Vec<Request>>,
    threads: Mutex<Vec<String>>,
    shutdowns: Mutex<usize>,
}

impl MockClient {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::default(),
            threads: Mutex::default(),
            shutdowns: Mutex::default(),
        }
    }

    /// Answers every request with `204 No Content`.
    pub(crate) fn no_content() -> Self {
        Self::new(|_| Ok(Response::empty(204)))
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("lock").clone()
    }

    pub(crate) fn last_request(&self) -> Request {
        self.requests().pop().expect("at least one request")
    }

    pub(crate) fn threads(&self) -> Vec<String> {
        self.threads.lock().expect("lock").clone()
    }

    pub(crate) fn shutdowns(&self) -> usize {
        *self.shutdowns.lock().expect("lock")
    }
}

impl HttpClient for MockClient {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let thread = std::thread::current().name().unwrap_or("unnamed").to_string();
        self.threads.lock().expect("lock").push(thread);
        let reply = (self.reply)(&request);
        self.requests.lock().expect("lock").push(request);
        reply
    }

    fn shutdown(&self) -> Result<(), TransportError> {
        *self.shutdowns.lock().expect("lock") += 1;
        Ok(())
    }
}
