//! In-memory stand-ins for the browser, used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalSpawner;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;

use crate::dom::{Node, NodeRef, SubmitControl, Viewport};
use crate::error::TransportError;
use crate::events::{EventSource, Handler, PageEvent, Subscription, Topic};
use crate::form::{
    ContactForm, FormPayload, FormTarget, Method, Serializer, SubmitRequest, SubmitResponse,
    Transport, Validator,
};
use crate::page::Spawner;
use crate::timer::{PendingTask, Scheduler, Task, Timer};

impl Spawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawn_local(task)
            .expect("local pool dropped while the page was mounted");
    }
}

#[derive(Debug, Default)]
pub struct FakeNode {
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    display: RefCell<String>,
    top: Cell<f64>,
    text: RefCell<String>,
    /// Style/layout operations in the order they happened.
    ops: RefCell<Vec<String>>,
}

impl FakeNode {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn at(top: f64) -> Rc<Self> {
        let node = Self::default();
        node.top.set(top);
        Rc::new(node)
    }

    pub fn with_text(text: &str) -> Rc<Self> {
        let node = Self::default();
        *node.text.borrow_mut() = text.to_string();
        Rc::new(node)
    }

    pub fn set_top(&self, top: f64) {
        self.top.set(top);
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.borrow().clone()
    }
}

impl Node for FakeNode {
    fn toggle_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        if on {
            if classes.insert(class.to_string()) {
                self.ops.borrow_mut().push(format!("+{}", class));
            }
        } else if classes.remove(class) {
            self.ops.borrow_mut().push(format!("-{}", class));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_display(&self, value: &str) {
        *self.display.borrow_mut() = value.to_string();
        self.ops.borrow_mut().push(format!("display:{}", value));
    }

    fn force_layout(&self) {
        self.ops.borrow_mut().push("layout".to_string());
    }

    fn viewport_top(&self) -> f64 {
        self.top.get()
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}

pub fn node_refs(nodes: &[Rc<FakeNode>]) -> Vec<NodeRef> {
    nodes.iter().map(|node| node.clone() as NodeRef).collect()
}

#[derive(Debug)]
pub struct FakeViewport {
    scroll_y: Cell<f64>,
    height: Cell<f64>,
}

impl FakeViewport {
    pub fn new(height: f64) -> Rc<Self> {
        Rc::new(Self {
            scroll_y: Cell::new(0.0),
            height: Cell::new(height),
        })
    }

    pub fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y);
    }
}

impl Viewport for FakeViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn inner_height(&self) -> f64 {
        self.height.get()
    }
}

struct Listener {
    topic: Topic,
    handler: Handler,
    attached: Rc<Cell<bool>>,
}

struct Detach(Rc<Cell<bool>>);

impl Drop for Detach {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Event source whose events are fired by the test.
#[derive(Default)]
pub struct FakeEvents {
    listeners: RefCell<Vec<Listener>>,
}

impl FakeEvents {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn emit(&self, topic: Topic) -> PageEvent {
        let event = PageEvent::new();
        self.dispatch(topic, &event);
        event
    }

    pub fn key(&self, key: &str) -> PageEvent {
        let event = PageEvent::with_key(key);
        self.dispatch(Topic::KeyDown, &event);
        event
    }

    pub fn listeners(&self, topic: Topic) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.topic == topic && l.attached.get())
            .count()
    }

    fn dispatch(&self, topic: Topic, event: &PageEvent) {
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.topic == topic && l.attached.get())
            .map(|l| l.handler.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}

impl EventSource for FakeEvents {
    fn subscribe(&self, topic: Topic, handler: Handler) -> Subscription {
        let attached = Rc::new(Cell::new(true));
        self.listeners.borrow_mut().push(Listener {
            topic,
            handler,
            attached: attached.clone(),
        });
        Subscription::new(Detach(attached))
    }
}

struct Scheduled {
    due: u64,
    seq: u64,
    task: Task,
    cancelled: Rc<Cell<bool>>,
}

struct ManualTimer(Rc<Cell<bool>>);

impl PendingTask for ManualTimer {
    fn cancel(self: Box<Self>) {
        self.0.set(true);
    }

    fn release(self: Box<Self>) {}
}

/// Scheduler driven by a virtual clock that only moves in [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Scheduled>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue
            .borrow()
            .iter()
            .filter(|s| !s.cancelled.get())
            .count()
    }

    /// Moves the clock forward, running every task that falls due in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                queue.retain(|s| !s.cancelled.get());
                let index = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.seq))
                    .map(|(index, _)| index);
                index.map(|index| queue.remove(index))
            };
            match next {
                Some(scheduled) => {
                    self.now.set(scheduled.due);
                    (scheduled.task)();
                }
                None => break,
            }
        }
        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> Timer {
        let seq = self.seq.get() + 1;
        self.seq.set(seq);
        let cancelled = Rc::new(Cell::new(false));
        self.queue.borrow_mut().push(Scheduled {
            due: self.now.get() + u64::from(delay_ms),
            seq,
            task,
            cancelled: cancelled.clone(),
        });
        Timer::new(ManualTimer(cancelled))
    }
}

pub type Reply = Result<SubmitResponse, TransportError>;

enum Scripted {
    Now(Reply),
    Later(oneshot::Receiver<Reply>),
}

/// Transport that answers from a script and records what it was asked to send.
#[derive(Default)]
pub struct FakeTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<SubmitRequest>>,
}

impl FakeTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Now(Ok(SubmitResponse {
                status,
                body: body.to_string(),
            })));
    }

    pub fn fail(&self, reason: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Now(Err(TransportError::Send(reason.to_string()))));
    }

    /// Queues a reply the test resolves later through the returned sender.
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Later(rx));
        tx
    }

    pub fn requests(&self) -> Vec<SubmitRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: SubmitRequest) -> LocalBoxFuture<'static, Reply> {
        self.requests.borrow_mut().push(request);
        match self.script.borrow_mut().pop_front() {
            Some(Scripted::Now(reply)) => futures::future::ready(reply).boxed_local(),
            Some(Scripted::Later(rx)) => async move {
                rx.await
                    .unwrap_or_else(|_| Err(TransportError::Send("reply dropped".to_string())))
            }
            .boxed_local(),
            None => futures::future::ready(Err(TransportError::Send(
                "no scripted reply".to_string(),
            )))
            .boxed_local(),
        }
    }
}

#[derive(Debug)]
pub struct FakeForm {
    valid: Cell<bool>,
    reports: Cell<u32>,
    resets: Cell<u32>,
    fields: RefCell<Vec<(String, String)>>,
    action: String,
    method: Option<String>,
}

impl FakeForm {
    pub fn new(action: &str, method: Option<&str>) -> Rc<Self> {
        Rc::new(Self {
            valid: Cell::new(true),
            reports: Cell::new(0),
            resets: Cell::new(0),
            fields: RefCell::new(Vec::new()),
            action: action.to_string(),
            method: method.map(str::to_string),
        })
    }

    pub fn fill(&self, name: &str, value: &str) {
        self.fields
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
    }

    pub fn set_valid(&self, valid: bool) {
        self.valid.set(valid);
    }

    pub fn reports(&self) -> u32 {
        self.reports.get()
    }

    pub fn resets(&self) -> u32 {
        self.resets.get()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.borrow().is_empty()
    }
}

impl Validator for FakeForm {
    fn check_validity(&self) -> bool {
        self.valid.get()
    }

    fn report_validity(&self) {
        self.reports.set(self.reports.get() + 1);
    }
}

impl Serializer for FakeForm {
    fn serialize(&self) -> FormPayload {
        self.fields.borrow().iter().cloned().collect()
    }
}

impl ContactForm for FakeForm {
    fn target(&self) -> FormTarget {
        FormTarget {
            action: self.action.clone(),
            method: Method::from_attribute(self.method.as_deref()),
        }
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        self.fields.borrow_mut().clear();
    }
}

#[derive(Debug, Default)]
pub struct FakeButton {
    disabled: Cell<bool>,
    label: RefCell<String>,
}

impl FakeButton {
    pub fn labelled(label: &str) -> Rc<Self> {
        let button = Self::default();
        *button.label.borrow_mut() = label.to_string();
        Rc::new(button)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn current_label(&self) -> String {
        self.label.borrow().clone()
    }
}

impl SubmitControl for FakeButton {
    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
    }
}
