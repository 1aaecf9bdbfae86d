use chrono::Utc;
use mongodb::Database;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::AppState;
use crate::error::AppError;
use crate::models::PriceAlert;
use crate::services::coinmarketcap::CmcClient;
use crate::services::{alerts_service, requests_service};

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub index: usize,
    pub message: String,
}

/// Store operations the reconciliation pass needs.
trait AlertLedger {
    async fn list_pending(&self, username: &str) -> Result<Vec<PriceAlert>, AppError>;
    async fn mark_served(&self, alert_id: ObjectId, served_at: i64) -> Result<bool, AppError>;
}

impl AlertLedger for Database {
    async fn list_pending(&self, username: &str) -> Result<Vec<PriceAlert>, AppError> {
        alerts_service::list_pending(self, username).await
    }

    async fn mark_served(&self, alert_id: ObjectId, served_at: i64) -> Result<bool, AppError> {
        alerts_service::mark_served(self, alert_id, served_at).await
    }
}

/// Price lookup the reconciliation pass needs. `Ok(None)` is an upstream
/// miss for the id.
trait PriceFeed {
    async fn usd_price_by_id(&self, id: i64) -> Result<Option<f64>, AppError>;
}

impl PriceFeed for CmcClient {
    async fn usd_price_by_id(&self, id: i64) -> Result<Option<f64>, AppError> {
        Ok(self.quote_by_id(id).await?.map(|c| c.usd_price()))
    }
}

/// One ordered notifications list for a user: moderated unavailability
/// requests first, then alerts newly served by this reconciliation pass.
/// Indices are 1-based over the combined list. Fails if either underlying
/// source fails to load.
pub async fn check_notifications(
    state: &AppState,
    username: &str,
) -> Result<Vec<Notification>, AppError> {
    let request_msgs = check_unavailable_requests(state, username).await?;
    let alert_msgs = check_price_alerts(state, username).await?;

    Ok(combine(request_msgs, alert_msgs))
}

async fn check_unavailable_requests(
    state: &AppState,
    username: &str,
) -> Result<Vec<String>, AppError> {
    let requests = requests_service::list_moderated_for_user(&state.db, username).await?;

    Ok(requests
        .into_iter()
        .map(|r| format!("Your request for {} has been {}.", r.symbol, r.status.as_str()))
        .collect())
}

pub async fn check_price_alerts(state: &AppState, username: &str) -> Result<Vec<String>, AppError> {
    reconcile_alerts(&state.db, &state.cmc, username).await
}

/// One reconciliation pass for one user.
///
/// Loads the user's Pending alerts and walks them sequentially. Each alert
/// costs one upstream quote, reused for both the threshold check and the
/// emitted message. A failed or missing quote skips that alert only; a store
/// failure aborts the whole pass.
async fn reconcile_alerts<L, P>(
    ledger: &L,
    prices: &P,
    username: &str,
) -> Result<Vec<String>, AppError>
where
    L: AlertLedger,
    P: PriceFeed,
{
    let pending = ledger.list_pending(username).await?;

    let mut messages: Vec<String> = Vec::new();

    for alert in pending {
        let current = match prices.usd_price_by_id(alert.crypto_id).await {
            Ok(Some(price)) => price,
            Ok(None) => {
                tracing::warn!(symbol = %alert.symbol, "skipping alert: symbol unknown upstream");
                continue;
            }
            Err(e) => {
                tracing::warn!(symbol = %alert.symbol, "skipping alert: {e}");
                continue;
            }
        };

        if !target_met(current, alert.target_price) {
            continue;
        }

        let newly = ledger.mark_served(alert.id, Utc::now().timestamp()).await?;

        // A concurrent pass may have served it between our read and the
        // status-guarded update; that is a success with no message to emit.
        if newly {
            messages.push(serve_message(&alert.symbol, alert.target_price, current));
        }
    }

    Ok(messages)
}

/// An alert is met the instant the price reaches the target.
fn target_met(current: f64, target: f64) -> bool {
    current >= target
}

fn serve_message(symbol: &str, target: f64, current: f64) -> String {
    format!("{symbol} has reached your target price of ${target:.2}. Current price: ${current:.2}")
}

fn combine(request_msgs: Vec<String>, alert_msgs: Vec<String>) -> Vec<Notification> {
    request_msgs
        .into_iter()
        .chain(alert_msgs)
        .enumerate()
        .map(|(i, message)| Notification {
            index: i + 1,
            message,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::models::AlertStatus;

    fn alert(username: &str, crypto_id: i64, symbol: &str, target: f64) -> PriceAlert {
        PriceAlert {
            id: ObjectId::new(),
            username: username.to_string(),
            crypto_id,
            symbol: symbol.to_string(),
            target_price: target,
            status: AlertStatus::Pending,
            asked_at: 0,
            served_at: None,
        }
    }

    /// In-memory ledger with the same Pending guard as the real store.
    struct MemoryLedger {
        alerts: Mutex<Vec<PriceAlert>>,
    }

    impl MemoryLedger {
        fn with(alerts: Vec<PriceAlert>) -> Self {
            Self {
                alerts: Mutex::new(alerts),
            }
        }

        fn served_at_of(&self, id: ObjectId) -> Option<i64> {
            let alerts = self.alerts.lock().unwrap();
            alerts.iter().find(|a| a.id == id).unwrap().served_at
        }
    }

    impl AlertLedger for MemoryLedger {
        async fn list_pending(&self, username: &str) -> Result<Vec<PriceAlert>, AppError> {
            let alerts = self.alerts.lock().unwrap();
            Ok(alerts
                .iter()
                .filter(|a| a.username == username && a.status == AlertStatus::Pending)
                .cloned()
                .collect())
        }

        async fn mark_served(&self, alert_id: ObjectId, served_at: i64) -> Result<bool, AppError> {
            let mut alerts = self.alerts.lock().unwrap();
            let Some(alert) = alerts
                .iter_mut()
                .find(|a| a.id == alert_id && a.status == AlertStatus::Pending)
            else {
                return Ok(false);
            };

            alert.status = AlertStatus::Served;
            alert.served_at = Some(served_at);
            Ok(true)
        }
    }

    /// Fixed per-id quote outcomes.
    struct FixedFeed {
        prices: HashMap<i64, Result<Option<f64>, String>>,
    }

    impl FixedFeed {
        fn with(prices: Vec<(i64, Result<Option<f64>, String>)>) -> Self {
            Self {
                prices: prices.into_iter().collect(),
            }
        }
    }

    impl PriceFeed for FixedFeed {
        async fn usd_price_by_id(&self, id: i64) -> Result<Option<f64>, AppError> {
            match self.prices.get(&id) {
                Some(Ok(price)) => Ok(*price),
                Some(Err(e)) => Err(AppError::Upstream(e.clone())),
                None => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn second_pass_does_not_serve_the_same_alert_again() {
        let btc = alert("alice", 1, "BTC", 50000.0);
        let id = btc.id;

        let ledger = MemoryLedger::with(vec![btc]);
        let feed = FixedFeed::with(vec![(1, Ok(Some(51000.0)))]);

        let first = reconcile_alerts(&ledger, &feed, "alice").await.unwrap();
        assert_eq!(first.len(), 1);
        let served_at = ledger.served_at_of(id);
        assert!(served_at.is_some());

        let second = reconcile_alerts(&ledger, &feed, "alice").await.unwrap();
        assert!(second.is_empty());
        assert_eq!(ledger.served_at_of(id), served_at);
    }

    #[tokio::test]
    async fn losing_the_status_guard_emits_no_message() {
        // Another pass serves the alert between our read and our update.
        struct RacedLedger {
            inner: MemoryLedger,
        }

        impl AlertLedger for RacedLedger {
            async fn list_pending(&self, username: &str) -> Result<Vec<PriceAlert>, AppError> {
                self.inner.list_pending(username).await
            }

            async fn mark_served(&self, _: ObjectId, _: i64) -> Result<bool, AppError> {
                Ok(false)
            }
        }

        let ledger = RacedLedger {
            inner: MemoryLedger::with(vec![alert("alice", 1, "BTC", 50000.0)]),
        };
        let feed = FixedFeed::with(vec![(1, Ok(Some(51000.0)))]);

        let messages = reconcile_alerts(&ledger, &feed, "alice").await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn one_failing_quote_does_not_stop_the_pass() {
        let doge = alert("alice", 74, "DOGE", 1.0);
        let btc = alert("alice", 1, "BTC", 50000.0);
        let btc_id = btc.id;

        let ledger = MemoryLedger::with(vec![doge, btc]);
        let feed = FixedFeed::with(vec![
            (74, Err("quote failed: 500".to_string())),
            (1, Ok(Some(51000.0))),
        ]);

        let messages = reconcile_alerts(&ledger, &feed, "alice").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("BTC"));
        assert!(ledger.served_at_of(btc_id).is_some());
    }

    #[tokio::test]
    async fn an_upstream_miss_skips_only_that_alert() {
        let gone = alert("alice", 999, "GONE", 1.0);
        let btc = alert("alice", 1, "BTC", 50000.0);

        let ledger = MemoryLedger::with(vec![gone, btc]);
        let feed = FixedFeed::with(vec![(1, Ok(Some(51000.0)))]);

        let messages = reconcile_alerts(&ledger, &feed, "alice").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("BTC"));
    }

    #[test]
    fn target_is_met_at_exact_price() {
        assert!(target_met(100.0, 100.0));
        assert!(target_met(100.01, 100.0));
        assert!(!target_met(99.99, 100.0));
    }

    #[test]
    fn serve_message_reports_target_and_current() {
        let msg = serve_message("BTC", 50000.0, 50000.0);
        assert_eq!(
            msg,
            "BTC has reached your target price of $50000.00. Current price: $50000.00"
        );
    }

    #[test]
    fn requests_come_before_alerts_with_contiguous_indices() {
        let combined = combine(
            vec!["req a".into(), "req b".into()],
            vec!["alert a".into(), "alert b".into()],
        );

        let indices: Vec<usize> = combined.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);

        let messages: Vec<&str> = combined.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["req a", "req b", "alert a", "alert b"]);
    }

    #[test]
    fn combine_of_nothing_is_empty() {
        assert!(combine(vec![], vec![]).is_empty());
    }

    #[test]
    fn group_order_is_preserved_not_sorted() {
        let combined = combine(vec!["zeta".into(), "alpha".into()], vec![]);
        assert_eq!(combined[0].message, "zeta");
        assert_eq!(combined[1].message, "alpha");
    }
}
