//! Event Listeners

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use line_common::WebhookEvent;
use tokio_util::sync::CancellationToken;

/// Error type returned by listeners. Passed through dispatch unchanged.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

pub type ListenerResult = Result<(), ListenerError>;

/// Async handler invoked for events of the kinds it is registered under.
///
/// Listeners of the same event run concurrently. The token is cancelled when
/// the caller gives up or a sibling listener fails; honoring it is up to the
/// listener.
pub trait Listener: Send + Sync + 'static {
    fn handle(
        &self,
        cancel: CancellationToken,
        event: Arc<WebhookEvent>,
    ) -> BoxFuture<'static, ListenerResult>;
}

impl<F, Fut> Listener for F
where
    F: Fn(CancellationToken, Arc<WebhookEvent>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ListenerResult> + Send + 'static,
{
    fn handle(
        &self,
        cancel: CancellationToken,
        event: Arc<WebhookEvent>,
    ) -> BoxFuture<'static, ListenerResult> {
        self(cancel, event).boxed()
    }
}
