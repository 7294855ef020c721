//! Ordering guard for overlapping catalog loads.
//!
//! Each load takes a ticket. When it finishes, its result is used only if no
//! newer load has started in the meantime, so a slow stale response never
//! overwrites a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::source::{CatalogDocument, ProductSource, SourceError};

/// Identifies one started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Hands out increasing tickets and remembers the newest.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Start a load.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the newest started load.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Load from `source`, discarding the result if a newer load started
    /// while this one was in flight.
    ///
    /// Returns `Ok(None)` for a superseded load.
    ///
    /// # Errors
    ///
    /// Returns the source error of a load that is still current.
    pub async fn load_latest<S: ProductSource>(
        &self,
        source: &S,
    ) -> Result<Option<CatalogDocument>, SourceError> {
        let ticket = self.begin();
        let result = source.load().await;

        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "Discarding superseded catalog load");
            return Ok(None);
        }
        result.map(Some)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use boutique_core::{Price, Product, ProductId, Size};
    use tokio::sync::Notify;

    use super::*;

    #[test]
    fn test_only_newest_ticket_is_current() {
        let sequence = RequestSequence::new();
        let first = sequence.begin();
        assert!(sequence.is_current(first));
        let second = sequence.begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        assert!(second > first);
    }

    struct GatedSource {
        gate: Arc<Notify>,
        name: &'static str,
    }

    impl ProductSource for GatedSource {
        async fn load(&self) -> Result<CatalogDocument, SourceError> {
            self.gate.notified().await;
            Ok(CatalogDocument {
                products: vec![Product {
                    id: ProductId::new("1"),
                    name: self.name.to_string(),
                    price: Price::from_units(1),
                    image_url: String::new(),
                    category: "unknown".to_string(),
                    color: "unknown".to_string(),
                    size: Size::parse("unknown"),
                    sales_status: false,
                    rating: 0.0,
                    popularity: 0.0,
                }],
                top_best_sets: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let sequence = Arc::new(RequestSequence::new());
        let slow_gate = Arc::new(Notify::new());

        let stale = {
            let sequence = Arc::clone(&sequence);
            let gate = Arc::clone(&slow_gate);
            tokio::spawn(async move {
                sequence
                    .load_latest(&GatedSource { gate, name: "stale" })
                    .await
            })
        };
        // Let the first load take its ticket before starting the second.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast_gate = Arc::new(Notify::new());
        fast_gate.notify_one();
        let fresh = sequence
            .load_latest(&GatedSource {
                gate: fast_gate,
                name: "fresh",
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.products[0].name, "fresh");

        slow_gate.notify_one();
        assert!(stale.await.unwrap().unwrap().is_none());
    }
}
