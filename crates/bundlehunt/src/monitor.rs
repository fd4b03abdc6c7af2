//! 在庫監視と自動購入のループ
//!
//! ```text
//!            Ok(false) / Err (< max)
//!              ┌──────────┐
//!              ▼          │
//!         ┌─────────┐  sleep  ┌────────────┐
//!   ──▶   │ Polling │────────▶│ Purchasing │
//!         └─────────┘ Ok(true)└────────────┘
//!              │                   │ Created + exit_after_purchase
//!              │ Err (>= max)      ▼
//!              └──────────▶  Stopped(reason)  ◀── signal
//! ```

use crate::shutdown;
use bundlehunt_cloud::{BundleProvider, PurchaseOrder, PurchaseOutcome};
use bundlehunt_config::PurchaseConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// ループの停止理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 購入成功後に終了する設定
    Purchased,
    /// 在庫確認の連続失敗が上限に達した
    RetriesExhausted,
    /// SIGINT / SIGTERM
    Shutdown,
}

impl StopReason {
    pub fn is_fatal(&self) -> bool {
        matches!(self, StopReason::RetriesExhausted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorState {
    Polling,
    Purchasing,
    Stopped(StopReason),
}

/// ループ実行中のカウンタ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    pub running: bool,
    /// 在庫確認の連続失敗回数 (購入失敗は含まない)
    pub consecutive_failures: u32,
    /// 購入成功回数の累計
    pub purchase_count: u32,
}

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub bundle_id: String,
    pub interval: Duration,
    pub max_retries: u32,
    pub exit_after_purchase: bool,
    pub order: PurchaseOrder,
}

impl MonitorSettings {
    pub fn from_config(config: &PurchaseConfig) -> Self {
        Self {
            bundle_id: config.bundle_id.clone(),
            interval: config.poll_interval(),
            max_retries: config.max_retries,
            exit_after_purchase: config.exit_after_purchase,
            order: PurchaseOrder {
                blueprint_id: config.blueprint_id.clone(),
                instance_name_prefix: config.instance_name_prefix.clone(),
                instance_count: config.instance_count,
                period_months: config.period,
                renew_flag: config.renew_flag.clone(),
            },
        }
    }
}

/// 停止時の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorReport {
    pub reason: StopReason,
    pub checks: u64,
    pub purchase_count: u32,
    pub purchase_failures: u32,
    pub consecutive_failures: u32,
    pub instance_ids: Vec<String>,
    pub last_error: Option<String>,
}

impl MonitorReport {
    pub fn exit_code(&self) -> i32 {
        if self.reason.is_fatal() { 1 } else { 0 }
    }
}

pub struct Monitor {
    provider: Arc<dyn BundleProvider>,
    settings: MonitorSettings,
    shutdown: watch::Receiver<bool>,
    poll: PollState,
    checks: u64,
    purchase_failures: u32,
    instance_ids: Vec<String>,
    last_error: Option<String>,
}

impl Monitor {
    pub fn new(
        provider: Arc<dyn BundleProvider>,
        settings: MonitorSettings,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            provider,
            settings,
            shutdown,
            poll: PollState::default(),
            checks: 0,
            purchase_failures: 0,
            instance_ids: Vec::new(),
            last_error: None,
        }
    }

    /// Stopped になるまでループを回す
    pub async fn run(mut self) -> MonitorReport {
        self.poll.running = true;
        tracing::info!(
            bundle_id = %self.settings.bundle_id,
            interval_ms = self.settings.interval.as_millis() as u64,
            max_retries = self.settings.max_retries,
            exit_after_purchase = self.settings.exit_after_purchase,
            "Started polling bundle stock"
        );

        let mut state = MonitorState::Polling;
        let mut stop = StopReason::Shutdown;
        while self.poll.running {
            state = match state {
                MonitorState::Polling => self.check().await,
                MonitorState::Purchasing => self.purchase().await,
                MonitorState::Stopped(reason) => {
                    self.poll.running = false;
                    stop = reason;
                    MonitorState::Stopped(reason)
                }
            };
        }
        self.report(stop)
    }

    async fn check(&mut self) -> MonitorState {
        if shutdown::is_requested(&self.shutdown) {
            return MonitorState::Stopped(StopReason::Shutdown);
        }

        self.checks += 1;
        let bundle_id = self.settings.bundle_id.as_str();

        // 在庫確認は停止要求で打ち切る
        let result = tokio::select! {
            biased;
            _ = shutdown::requested(&mut self.shutdown) => {
                return MonitorState::Stopped(StopReason::Shutdown);
            }
            result = self.provider.is_available(bundle_id) => result,
        };

        match result {
            Ok(available) => {
                self.poll.consecutive_failures = 0;
                tracing::info!(
                    bundle_id,
                    check = self.checks,
                    status = if available { "AVAILABLE" } else { "UNAVAILABLE" },
                    "Stock status"
                );
                if available {
                    tracing::info!(bundle_id, "Stock detected, attempting purchase");
                    MonitorState::Purchasing
                } else {
                    self.pause(MonitorState::Polling).await
                }
            }
            Err(e) => {
                self.poll.consecutive_failures += 1;
                self.last_error = Some(e.to_string());

                if self.poll.consecutive_failures >= self.settings.max_retries {
                    tracing::error!(
                        bundle_id,
                        failures = self.poll.consecutive_failures,
                        error = %e,
                        "Stock check failed too many times in a row, giving up"
                    );
                    return MonitorState::Stopped(StopReason::RetriesExhausted);
                }

                tracing::warn!(
                    bundle_id,
                    failures = self.poll.consecutive_failures,
                    max_retries = self.settings.max_retries,
                    error = %e,
                    "Stock check failed"
                );
                self.pause(MonitorState::Polling).await
            }
        }
    }

    async fn purchase(&mut self) -> MonitorState {
        let bundle_id = self.settings.bundle_id.as_str();

        // 発注中の呼び出しは停止要求があっても完了させる
        match self.provider.purchase(bundle_id, &self.settings.order).await {
            PurchaseOutcome::Created { instance_ids } => {
                self.poll.purchase_count += 1;
                tracing::info!(
                    bundle_id,
                    instance_ids = %instance_ids.join(", "),
                    purchase_count = self.poll.purchase_count,
                    "Purchase succeeded"
                );
                self.instance_ids.extend(instance_ids);

                if self.settings.exit_after_purchase {
                    tracing::info!("Configured to exit after purchase");
                    return MonitorState::Stopped(StopReason::Purchased);
                }
            }
            PurchaseOutcome::Failed { reason, code } => {
                self.purchase_failures += 1;
                tracing::error!(
                    bundle_id,
                    code = code.as_deref().unwrap_or("-"),
                    reason = %reason,
                    "Purchase failed"
                );
            }
        }

        self.pause(MonitorState::Polling).await
    }

    /// ポーリング間隔だけ待つ。待機中の停止要求で Stopped に遷移
    async fn pause(&mut self, next: MonitorState) -> MonitorState {
        tokio::select! {
            biased;
            _ = shutdown::requested(&mut self.shutdown) => MonitorState::Stopped(StopReason::Shutdown),
            _ = tokio::time::sleep(self.settings.interval) => next,
        }
    }

    fn report(self, reason: StopReason) -> MonitorReport {
        MonitorReport {
            reason,
            checks: self.checks,
            purchase_count: self.poll.purchase_count,
            purchase_failures: self.purchase_failures,
            consecutive_failures: self.poll.consecutive_failures,
            instance_ids: self.instance_ids,
            last_error: self.last_error,
        }
    }
}
