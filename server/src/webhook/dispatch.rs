//! Webhook Event Dispatch
//!
//! Routes parsed events to the listeners registered for their kind. All
//! listeners of an event run concurrently under one cancellable group; the
//! first failure cancels the group and is returned once every listener has
//! finished.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use line_common::{EventKind, WebhookEvent};
use line_crypto::ChannelSecret;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::listener::{Listener, ListenerResult};
use super::parse::parse_webhook;
use super::types::{DispatchError, WebhookError};

/// Per-kind listener registry.
///
/// Registration takes `&mut self`, so it is finished before the dispatcher is
/// shared behind an `Arc`.
pub struct Dispatcher {
    secret: ChannelSecret,
    routes: HashMap<EventKind, Vec<Arc<dyn Listener>>>,
}

impl Dispatcher {
    /// Create a dispatcher verifying requests with `secret`.
    pub fn new(secret: ChannelSecret) -> Self {
        let routes = EventKind::ALL
            .into_iter()
            .map(|kind| (kind, Vec::new()))
            .collect();
        Self { secret, routes }
    }

    /// Add a listener for events of `kind`.
    pub fn register(&mut self, kind: EventKind, listener: impl Listener) -> &mut Self {
        self.routes.entry(kind).or_default().push(Arc::new(listener));
        self
    }

    /// Add a listener for follow events.
    pub fn on_follow<F, Fut>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(CancellationToken, Arc<WebhookEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ListenerResult> + Send + 'static,
    {
        self.register(EventKind::Follow, listener)
    }

    /// Add a listener for unfollow events.
    pub fn on_unfollow<F, Fut>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(CancellationToken, Arc<WebhookEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ListenerResult> + Send + 'static,
    {
        self.register(EventKind::Unfollow, listener)
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.routes.get(&kind).map_or(0, Vec::len)
    }

    /// Dispatch a batch of parsed events.
    ///
    /// Only the first event of the batch is dispatched; its outcome is the
    /// outcome of the call. An empty batch succeeds.
    pub async fn dispatch(
        &self,
        cancel: &CancellationToken,
        events: &[WebhookEvent],
    ) -> Result<(), DispatchError> {
        // TODO: decide whether the remaining events of a batch should be
        // dispatched in order once the first one succeeds.
        let Some(event) = events.first() else {
            return Ok(());
        };
        if events.len() > 1 {
            debug!(
                batch_size = events.len(),
                "Dispatching first event of batch only"
            );
        }
        self.dispatch_event(cancel, Arc::new(event.clone())).await
    }

    /// Verify, parse and dispatch a raw webhook body.
    pub async fn dispatch_body(
        &self,
        cancel: &CancellationToken,
        signature: &str,
        body: &[u8],
    ) -> Result<(), WebhookError> {
        let events = parse_webhook(&self.secret, signature, body)?;
        self.dispatch(cancel, &events).await?;
        Ok(())
    }

    async fn dispatch_event(
        &self,
        cancel: &CancellationToken,
        event: Arc<WebhookEvent>,
    ) -> Result<(), DispatchError> {
        let kind = event.kind();
        let listeners = self
            .routes
            .get(&kind)
            .ok_or(DispatchError::UnsupportedEvent(kind))?;

        if listeners.is_empty() {
            debug!(event_kind = %kind, "No listeners registered");
            return Ok(());
        }

        let group = cancel.child_token();
        let mut tasks = JoinSet::new();
        for listener in listeners {
            let listener = Arc::clone(listener);
            let token = group.clone();
            let event = Arc::clone(&event);
            tasks.spawn(async move { listener.handle(token, event).await });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let error = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => DispatchError::Listener(e),
                Err(e) => match e.try_into_panic() {
                    Ok(payload) => DispatchError::ListenerPanicked(panic_message(payload.as_ref())),
                    Err(e) => DispatchError::ListenerPanicked(e.to_string()),
                },
            };

            warn!(
                event_kind = %kind,
                event_id = event.webhook_event_id(),
                error = %error,
                "Listener failed"
            );
            if first_error.is_none() {
                group.cancel();
                first_error = Some(error);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
