use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use payloads::{ClientError, ErrorKind, Transport};
use serde::Serialize;
use serde_json::Value;

type Reply = Result<Value, (ErrorKind, String)>;

fn into_client_result(reply: Reply) -> Result<Value, ClientError> {
    reply.map_err(|(kind, message)| ClientError::Backend { kind, message })
}

fn to_value(value: &impl Serialize) -> Value {
    serde_json::to_value(value).expect("fixture should serialize")
}

#[derive(Default)]
struct Script {
    /// Used up one per call, before `sticky`.
    queued: VecDeque<Reply>,
    sticky: Option<Reply>,
    /// Calls that wait for the test to release them, in order.
    gates: VecDeque<oneshot::Receiver<Reply>>,
}

/// Holds back one call until the test decides how it settles.
pub struct Gate {
    sender: oneshot::Sender<Reply>,
}

impl Gate {
    pub fn succeed(self, value: &impl Serialize) {
        let _ = self.sender.send(Ok(to_value(value)));
    }

    pub fn fail(self, message: &str) {
        let _ = self
            .sender
            .send(Err((payloads::classify_message(message), message.to_string())));
    }
}

/// In-process bridge that answers from a per-command script and records
/// every call.
///
/// A command with nothing scripted fails with a backend error, so a test
/// never silently depends on a default.
#[derive(Default)]
pub struct MockTransport {
    scripts: RefCell<HashMap<String, Script>>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self, command: &str, f: impl FnOnce(&mut Script)) {
        f(self
            .scripts
            .borrow_mut()
            .entry(command.to_string())
            .or_default());
    }

    /// Answer every call to `command` with `value` from now on.
    pub fn respond(&self, command: &str, value: &impl Serialize) {
        let value = to_value(value);
        self.script(command, |s| s.sticky = Some(Ok(value)));
    }

    /// Answer the next unanswered call with `value`.
    pub fn respond_once(&self, command: &str, value: &impl Serialize) {
        let value = to_value(value);
        self.script(command, |s| s.queued.push_back(Ok(value)));
    }

    /// Fail every call to `command`. The kind is classified from the message
    /// the way the client classifies plain-text backend errors.
    pub fn fail(&self, command: &str, message: &str) {
        let reply = Err((payloads::classify_message(message), message.to_string()));
        self.script(command, |s| s.sticky = Some(reply));
    }

    pub fn fail_once(&self, command: &str, message: &str) {
        let reply = Err((payloads::classify_message(message), message.to_string()));
        self.script(command, |s| s.queued.push_back(reply));
    }

    /// Make the next call to `command` wait until the returned gate is
    /// released. Dropping the gate fails the call as cancelled.
    pub fn gate(&self, command: &str) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.script(command, |s| s.gates.push_back(receiver));
        Gate { sender }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(name, _)| name == command)
            .count()
    }

    /// Arguments of the most recent call to `command`.
    pub fn last_args(&self, command: &str) -> Option<Value> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == command)
            .map(|(_, args)| args.clone())
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn next_reply(&self, command: &str) -> Result<Reply, oneshot::Receiver<Reply>> {
        let mut scripts = self.scripts.borrow_mut();
        let Some(script) = scripts.get_mut(command) else {
            tracing::warn!(command, "unscripted bridge command");
            return Ok(Err((
                ErrorKind::Internal,
                format!("no response scripted for {command}"),
            )));
        };
        if let Some(gate) = script.gates.pop_front() {
            return Err(gate);
        }
        if let Some(reply) = script.queued.pop_front() {
            return Ok(reply);
        }
        Ok(script.sticky.clone().unwrap_or_else(|| {
            Err((ErrorKind::Internal, format!("no response scripted for {command}")))
        }))
    }
}

impl Transport for MockTransport {
    fn invoke<'a>(
        &'a self,
        command: &'a str,
        args: Value,
    ) -> LocalBoxFuture<'a, Result<Value, ClientError>> {
        async move {
            self.calls.borrow_mut().push((command.to_string(), args));
            match self.next_reply(command) {
                Ok(reply) => into_client_result(reply),
                Err(gate) => match gate.await {
                    Ok(reply) => into_client_result(reply),
                    Err(oneshot::Canceled) => Err(ClientError::Cancelled),
                },
            }
        }
        .boxed_local()
    }
}
