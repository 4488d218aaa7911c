// ── Alert hand-off ──
//
// The one place alerts cross contexts: the pod communication side raises
// alerts from background tasks, the UI side consumes them in order.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::error::CoreError;
use crate::model::PumpAlert;

/// Create a connected sender/receiver pair.
pub fn channel() -> (AlertSender, AlertReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AlertSender { tx }, AlertReceiver { rx })
}

/// Background-side handle. Cheap to clone; safe to move across threads.
#[derive(Debug, Clone)]
pub struct AlertSender {
    tx: mpsc::UnboundedSender<PumpAlert>,
}

impl AlertSender {
    pub fn send(&self, alert: PumpAlert) -> Result<(), CoreError> {
        tracing::trace!(identifier = alert.identifier(), "handing off alert");
        self.tx.send(alert).map_err(|_| CoreError::HandoffClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// UI-side handle.
#[derive(Debug)]
pub struct AlertReceiver {
    rx: mpsc::UnboundedReceiver<PumpAlert>,
}

impl AlertReceiver {
    /// Wait for the next alert. `None` once every sender is dropped.
    pub async fn recv(&mut self) -> Option<PumpAlert> {
        self.rx.recv().await
    }

    /// Take an alert if one is already queued.
    pub fn try_recv(&mut self) -> Option<PumpAlert> {
        self.rx.try_recv().ok()
    }

    pub fn into_stream(self) -> AlertStream {
        AlertStream {
            inner: UnboundedReceiverStream::new(self.rx),
        }
    }
}

/// `Stream` adapter over an [`AlertReceiver`].
#[derive(Debug)]
pub struct AlertStream {
    inner: UnboundedReceiverStream<PumpAlert>,
}

impl Stream for AlertStream {
    type Item = PumpAlert;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AlertSlot;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn alerts_arrive_in_send_order_across_tasks() {
        let (tx, mut rx) = channel();
        let background = tx.clone();
        tokio::spawn(async move {
            background
                .send(PumpAlert::MultiCommand { slot: None })
                .unwrap();
            background
                .send(PumpAlert::SuspendEnded {
                    slot: Some(AlertSlot::SuspendTimeExpired),
                })
                .unwrap();
        })
        .await
        .unwrap();
        drop(tx);

        assert_eq!(rx.recv().await, Some(PumpAlert::MultiCommand { slot: None }));
        assert_eq!(
            rx.recv().await,
            Some(PumpAlert::SuspendEnded {
                slot: Some(AlertSlot::SuspendTimeExpired)
            })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn send_fails_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(matches!(
            tx.send(PumpAlert::TimeOffsetChangeDetected),
            Err(CoreError::HandoffClosed)
        ));
    }

    #[test]
    fn try_recv_is_non_blocking() {
        let (tx, mut rx) = channel();
        assert_eq!(rx.try_recv(), None);
        tx.send(PumpAlert::PodExpiring { slot: None }).unwrap();
        assert_eq!(rx.try_recv(), Some(PumpAlert::PodExpiring { slot: None }));
    }

    #[tokio::test]
    async fn stream_yields_until_senders_drop() {
        let (tx, rx) = channel();
        tx.send(PumpAlert::PodExpireImminent { slot: None }).unwrap();
        tx.send(PumpAlert::TimeOffsetChangeDetected).unwrap();
        drop(tx);

        let alerts: Vec<PumpAlert> = rx.into_stream().collect().await;
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1], PumpAlert::TimeOffsetChangeDetected);
    }

    #[test]
    fn stream_wakes_when_an_alert_is_sent() {
        let (tx, rx) = channel();
        let mut stream = tokio_test::task::spawn(rx.into_stream());

        tokio_test::assert_pending!(stream.poll_next());

        tx.send(PumpAlert::LowReservoir {
            slot: None,
            level: crate::model::ReservoirLevel::from_units(10.0).unwrap(),
        })
        .unwrap();
        assert!(stream.is_woken());
        let next = tokio_test::assert_ready!(stream.poll_next());
        assert_eq!(next.map(|a| a.identifier()), Some("lowReservoir"));
    }
}
