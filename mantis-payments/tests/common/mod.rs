//! Scripted terminal and backend mocks shared by the integration suites
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use mantis_payments::{CaptureError, PaymentBackend};
use mantis_terminal::{
    CollectPaymentEvent, CreatePaymentEvent, ProcessPaymentEvent, RefundEvent, TerminalClient,
    TerminalResult,
};
use shared::{Charge, CreateIntentParams, PaymentIntent, PaymentIntentStatus, RefundParams};
use tokio::sync::mpsc;

/// Install a fmt subscriber so `RUST_LOG=debug cargo test` shows the flow
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn intent(id: &str, status: PaymentIntentStatus) -> PaymentIntent {
    PaymentIntent {
        id: id.to_string(),
        status,
        amount: 2000,
        currency: "usd".to_string(),
        description: "Order 42".to_string(),
        charges: vec![],
        created_at: Utc::now(),
    }
}

pub fn intent_with_receipt(
    id: &str,
    status: PaymentIntentStatus,
    receipt_url: &str,
) -> PaymentIntent {
    let mut intent = intent(id, status);
    intent.charges.push(Charge {
        id: uuid::Uuid::new_v4().to_string(),
        amount: intent.amount,
        receipt_url: Some(receipt_url.to_string()),
        created_at: Utc::now(),
    });
    intent
}

/// Load scripted events into a channel that closes once they are drained
fn scripted<E>(events: Vec<E>) -> mpsc::Receiver<E> {
    let (tx, rx) = mpsc::channel(events.len().max(1));
    for event in events {
        tx.try_send(event).expect("script channel sized to fit");
    }
    rx
}

/// A terminal whose responses are scripted per call, recording every
/// interaction so tests can assert which hardware calls happened.
pub struct MockTerminal {
    initialized: bool,
    create_script: Mutex<VecDeque<Vec<CreatePaymentEvent>>>,
    collect_script: Mutex<VecDeque<Vec<CollectPaymentEvent>>>,
    process_script: Mutex<VecDeque<Vec<ProcessPaymentEvent>>>,
    collect_refund_script: Mutex<VecDeque<Vec<RefundEvent>>>,
    process_refund_script: Mutex<VecDeque<Vec<RefundEvent>>>,
    pub create_params: Mutex<Vec<CreateIntentParams>>,
    pub collected_intents: Mutex<Vec<PaymentIntent>>,
    pub processed_intents: Mutex<Vec<PaymentIntent>>,
    pub canceled_intents: Mutex<Vec<PaymentIntent>>,
    pub collect_refund_calls: AtomicUsize,
    pub process_refund_calls: AtomicUsize,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            initialized: true,
            create_script: Mutex::new(VecDeque::new()),
            collect_script: Mutex::new(VecDeque::new()),
            process_script: Mutex::new(VecDeque::new()),
            collect_refund_script: Mutex::new(VecDeque::new()),
            process_refund_script: Mutex::new(VecDeque::new()),
            create_params: Mutex::new(Vec::new()),
            collected_intents: Mutex::new(Vec::new()),
            processed_intents: Mutex::new(Vec::new()),
            canceled_intents: Mutex::new(Vec::new()),
            collect_refund_calls: AtomicUsize::new(0),
            process_refund_calls: AtomicUsize::new(0),
        }
    }

    pub fn disconnected() -> Self {
        let mut terminal = Self::new();
        terminal.initialized = false;
        terminal
    }

    pub fn script_create(&self, events: Vec<CreatePaymentEvent>) -> &Self {
        self.create_script.lock().unwrap().push_back(events);
        self
    }

    pub fn script_collect(&self, events: Vec<CollectPaymentEvent>) -> &Self {
        self.collect_script.lock().unwrap().push_back(events);
        self
    }

    pub fn script_process(&self, events: Vec<ProcessPaymentEvent>) -> &Self {
        self.process_script.lock().unwrap().push_back(events);
        self
    }

    pub fn script_collect_refund(&self, events: Vec<RefundEvent>) -> &Self {
        self.collect_refund_script.lock().unwrap().push_back(events);
        self
    }

    pub fn script_process_refund(&self, events: Vec<RefundEvent>) -> &Self {
        self.process_refund_script.lock().unwrap().push_back(events);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_params.lock().unwrap().len()
    }

    pub fn collect_calls(&self) -> usize {
        self.collected_intents.lock().unwrap().len()
    }

    pub fn process_calls(&self) -> usize {
        self.processed_intents.lock().unwrap().len()
    }

    pub fn cancel_calls(&self) -> usize {
        self.canceled_intents.lock().unwrap().len()
    }

    fn next_script<E>(queue: &Mutex<VecDeque<Vec<E>>>) -> Vec<E> {
        queue.lock().unwrap().pop_front().unwrap_or_default()
    }
}

#[async_trait]
impl TerminalClient for MockTerminal {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    async fn create_payment_intent(
        &self,
        params: CreateIntentParams,
    ) -> mpsc::Receiver<CreatePaymentEvent> {
        self.create_params.lock().unwrap().push(params);
        scripted(Self::next_script(&self.create_script))
    }

    async fn collect_payment_method(
        &self,
        intent: PaymentIntent,
    ) -> mpsc::Receiver<CollectPaymentEvent> {
        self.collected_intents.lock().unwrap().push(intent);
        scripted(Self::next_script(&self.collect_script))
    }

    async fn process_payment(&self, intent: PaymentIntent) -> mpsc::Receiver<ProcessPaymentEvent> {
        self.processed_intents.lock().unwrap().push(intent);
        scripted(Self::next_script(&self.process_script))
    }

    async fn cancel_payment_intent(&self, intent: &PaymentIntent) -> TerminalResult<()> {
        self.canceled_intents.lock().unwrap().push(intent.clone());
        Ok(())
    }

    async fn collect_refund(&self, _params: RefundParams) -> mpsc::Receiver<RefundEvent> {
        self.collect_refund_calls.fetch_add(1, Ordering::SeqCst);
        scripted(Self::next_script(&self.collect_refund_script))
    }

    async fn process_refund(&self) -> mpsc::Receiver<RefundEvent> {
        self.process_refund_calls.fetch_add(1, Ordering::SeqCst);
        scripted(Self::next_script(&self.process_refund_script))
    }
}

/// A backend whose capture responses are scripted per call (default: Ok)
pub struct MockBackend {
    capture_script: Mutex<VecDeque<Result<(), CaptureError>>>,
    pub captured: Mutex<Vec<(u64, String)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            capture_script: Mutex::new(VecDeque::new()),
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn script_capture(&self, result: Result<(), CaptureError>) -> &Self {
        self.capture_script.lock().unwrap().push_back(result);
        self
    }

    pub fn capture_calls(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentBackend for MockBackend {
    async fn capture_payment_intent(
        &self,
        order_id: u64,
        intent_id: &str,
    ) -> Result<(), CaptureError> {
        self.captured
            .lock()
            .unwrap()
            .push((order_id, intent_id.to_string()));
        self.capture_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}
