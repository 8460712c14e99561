//! デバウンスタイマー
//!
//! 単一の保留締め切りを持つワンショットタイマー。再始動が唯一の
//! キャンセル手段で、保留中の締め切りは新しい締め切りに置き換わる
//! （両方発火することはない）。

use std::time::{Duration, Instant};

/// 再始動キャンセル式のワンショットタイマー
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    /// 静止期間
    quiet_interval: Duration,
    /// 保留中の締め切り（なければ非作動）
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// 指定の静止期間でタイマーを作成（非作動状態）
    pub fn new(quiet_interval: Duration) -> Self {
        Self {
            quiet_interval,
            deadline: None,
        }
    }

    /// 静止期間を取得
    pub fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }

    /// タイマーが作動中かどうか
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// 締め切りを `now + 静止期間` に設定し直す
    ///
    /// 保留中の締め切りは破棄される。
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_interval);
    }

    /// 保留中の締め切りを破棄
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// 締め切りが経過していれば消費して `true` を返す
    ///
    /// 消費後は再始動されるまで発火しない（静止期間あたり最大1回）。
    pub fn take_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// 締め切りまでの残り時間
    ///
    /// 非作動なら `None`、経過済みなら `Some(ZERO)`。
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed() {
        let timer = DebounceTimer::new(Duration::from_millis(100));
        assert!(!timer.is_armed());
        assert!(timer.remaining(Instant::now()).is_none());
    }

    #[test]
    fn fires_only_after_interval() {
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.restart(t0);

        assert!(!timer.take_if_due(t0 + Duration::from_millis(99)));
        assert!(timer.take_if_due(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn firing_consumes_the_deadline() {
        let mut timer = DebounceTimer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        timer.restart(t0);

        assert!(timer.take_if_due(t0 + Duration::from_millis(10)));
        assert!(!timer.take_if_due(t0 + Duration::from_millis(20)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn restart_replaces_pending_deadline() {
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.restart(t0);
        timer.restart(t0 + Duration::from_millis(90));

        // 旧締め切り時点ではまだ発火しない
        assert!(!timer.take_if_due(t0 + Duration::from_millis(100)));
        // 新締め切りで1回だけ発火する
        assert!(timer.take_if_due(t0 + Duration::from_millis(190)));
        assert!(!timer.take_if_due(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn cancel_disarms() {
        let mut timer = DebounceTimer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        timer.restart(t0);
        timer.cancel();
        assert!(!timer.take_if_due(t0 + Duration::from_millis(50)));
    }
}
