//! SIGINT / SIGTERM を watch チャネルに変換する

use std::future::Future;
use tokio::sync::watch;

/// シグナルハンドラを登録し、停止フラグの受信側を返す
///
/// ハンドラの登録は戻る前に完了している。
pub fn listen() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    let mut signals = Signals::register();

    tokio::spawn(async move {
        let signal_name = signals.recv().await;
        tracing::info!(signal = signal_name, "Received signal, shutting down gracefully");
        let _ = tx.send(true);
    });

    rx
}

#[cfg(unix)]
struct Signals {
    sigterm: Option<tokio::signal::unix::Signal>,
    sigint: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl Signals {
    fn register() -> Self {
        use tokio::signal::unix::{SignalKind, signal};

        let sigterm = signal(SignalKind::terminate())
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to register SIGTERM handler"))
            .ok();
        let sigint = signal(SignalKind::interrupt())
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to register SIGINT handler"))
            .ok();
        Self { sigterm, sigint }
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = recv_signal(&mut self.sigterm) => "SIGTERM",
            _ = recv_signal(&mut self.sigint) => "SIGINT",
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn register() -> Self {
        Signals
    }

    async fn recv(&mut self) -> &'static str {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        "CTRL-C"
    }
}

/// 登録済みならシグナルを待ち、登録に失敗していれば永久に待つ
#[cfg(unix)]
async fn recv_signal(sig: &mut Option<tokio::signal::unix::Signal>) {
    match sig {
        Some(s) => {
            s.recv().await;
        }
        None => std::future::pending().await,
    }
}

/// 停止フラグが立つまで待つ
///
/// 送信側が停止要求なしに破棄された場合は永久に待つ。
pub async fn requested(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

pub fn is_requested(rx: &watch::Receiver<bool>) -> bool {
    *rx.borrow()
}

/// `fut` を実行し、先に停止要求が来たら None を返す
pub async fn or_shutdown<F: Future>(fut: F, rx: &mut watch::Receiver<bool>) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = requested(rx) => None,
        out = fut => Some(out),
    }
}
