//! デバウンス付きJSON検証
//!
//! 文書変更の通知をまとめ、静止期間の経過後に一度だけ検証を走らせる。
//! UIフレームワークには依存せず、時刻は呼び出し側から `Instant` で
//! 注入されるためイベントループなしでテストできる。

pub mod timer;

pub use timer::DebounceTimer;

#[cfg(test)]
use crate::error::JsonError;
use crate::json::JsonCodec;
use std::time::{Duration, Instant};

/// 既定の静止期間
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(350);

/// バリデータ設定
///
/// 遅延は全ての編集に一様に適用される。適応的なバックオフはしない。
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// 最後の編集から検証までの静止期間
    pub quiet_interval: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            quiet_interval: DEFAULT_QUIET_INTERVAL,
        }
    }
}

/// 文書の検証状態
///
/// `Unknown` は「検証待ち」と「空白文書」の両方を表す。いずれも
/// グリフなし・メッセージなしで、`Valid` とは区別される。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidityState {
    /// 未確定（検証待ち、または空白文書）
    #[default]
    Unknown,
    /// 有効なJSON
    Valid,
    /// 無効なJSON（抽出済みメッセージ付き）
    Invalid { message: String },
}

impl ValidityState {
    /// エラーパネルに表示するメッセージ（`Invalid` のみ）
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidityState::Invalid { message } => Some(message),
            _ => None,
        }
    }
}

/// デバウンス付きバリデータ
///
/// 変更通知でタイマーを再始動し、静止期間が途切れず経過した時点の
/// 文書内容に対して一度だけ検証を実行する。
pub struct DebouncedValidator<C: JsonCodec> {
    codec: C,
    timer: DebounceTimer,
    state: ValidityState,
}

impl<C: JsonCodec> DebouncedValidator<C> {
    /// コーデックと設定からバリデータを作成
    pub fn new(codec: C, config: ValidatorConfig) -> Self {
        Self {
            codec,
            timer: DebounceTimer::new(config.quiet_interval),
            state: ValidityState::Unknown,
        }
    }

    /// 現在の検証状態を取得
    pub fn state(&self) -> &ValidityState {
        &self.state
    }

    /// 検証が保留中かどうか（タイマー作動中）
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// 次の締め切りまでの残り時間（イベントループのポーリング間隔用）
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// 文書変更の通知
    ///
    /// 保留中の締め切りは破棄され、静止期間は最後の編集から測り直される。
    /// 表示済みの結果も古くなるため `Unknown` に戻す。
    pub fn notify_change(&mut self, now: Instant) {
        self.timer.restart(now);
        self.state = ValidityState::Unknown;
    }

    /// 締め切りを確認し、経過していれば検証を実行
    ///
    /// 検証は締め切り経過時点の `text` に対して行われる。空白文書は
    /// 検証せず `Unknown` のままにする。状態が変わった場合のみ
    /// 新しい状態を返す。
    pub fn poll(&mut self, now: Instant, text: &str) -> Option<&ValidityState> {
        if !self.timer.take_if_due(now) {
            return None;
        }
        self.state = self.run_validation(text);
        Some(&self.state)
    }

    /// 締め切りを待たずに即時検証（テスト・初期表示用）
    pub fn validate_now(&mut self, text: &str) -> &ValidityState {
        self.timer.cancel();
        self.state = self.run_validation(text);
        &self.state
    }

    fn run_validation(&self, text: &str) -> ValidityState {
        if text.chars().all(char::is_whitespace) {
            return ValidityState::Unknown;
        }
        match self.codec.validate(text) {
            Ok(()) => ValidityState::Valid,
            Err(err) => {
                log::warn!("json validation failed: {}", err);
                ValidityState::Invalid {
                    message: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::SerdeJsonCodec;

    fn validator(quiet_ms: u64) -> DebouncedValidator<SerdeJsonCodec> {
        DebouncedValidator::new(
            SerdeJsonCodec::new(),
            ValidatorConfig {
                quiet_interval: Duration::from_millis(quiet_ms),
            },
        )
    }

    /// 偽コーデック: 検証回数を数える
    struct CountingCodec {
        calls: std::cell::Cell<usize>,
    }

    impl JsonCodec for CountingCodec {
        fn validate(&self, _text: &str) -> Result<(), JsonError> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }

        fn to_pretty(&self, text: &str) -> Result<String, JsonError> {
            Ok(text.to_string())
        }

        fn to_compact(&self, text: &str) -> Result<String, JsonError> {
            Ok(text.to_string())
        }
    }

    #[test]
    fn no_validation_before_quiet_interval() {
        let mut v = validator(100);
        let t0 = Instant::now();
        v.notify_change(t0);

        assert!(v.poll(t0 + Duration::from_millis(50), "{}").is_none());
        assert_eq!(*v.state(), ValidityState::Unknown);
    }

    #[test]
    fn validation_fires_after_quiet_interval() {
        let mut v = validator(100);
        let t0 = Instant::now();
        v.notify_change(t0);

        let outcome = v.poll(t0 + Duration::from_millis(100), "{\"a\":1}");
        assert_eq!(outcome, Some(&ValidityState::Valid));
    }

    #[test]
    fn burst_of_edits_validates_once_with_final_content() {
        let codec = CountingCodec {
            calls: std::cell::Cell::new(0),
        };
        let mut v = DebouncedValidator::new(
            codec,
            ValidatorConfig {
                quiet_interval: Duration::from_millis(100),
            },
        );
        let t0 = Instant::now();

        // 静止期間内に連続して編集
        v.notify_change(t0);
        v.notify_change(t0 + Duration::from_millis(40));
        v.notify_change(t0 + Duration::from_millis(80));

        // 最初の編集からは十分経っているが、最後の編集からは経っていない
        assert!(v.poll(t0 + Duration::from_millis(120), "{").is_none());

        // 最後の編集から静止期間が経過して初めて1回だけ検証される
        assert!(v.poll(t0 + Duration::from_millis(180), "{\"done\":true}").is_some());
        assert_eq!(v.codec.calls.get(), 1);

        // 以後は締め切りが消えているので何度ポーリングしても走らない
        assert!(v.poll(t0 + Duration::from_millis(400), "{}").is_none());
        assert_eq!(v.codec.calls.get(), 1);
    }

    #[test]
    fn edit_after_result_resets_to_unknown() {
        let mut v = validator(50);
        let t0 = Instant::now();
        v.notify_change(t0);
        v.poll(t0 + Duration::from_millis(50), "{\"a\":1}");
        assert_eq!(*v.state(), ValidityState::Valid);

        // 新しい編集で表示済みの結果は無効化される
        v.notify_change(t0 + Duration::from_millis(60));
        assert_eq!(*v.state(), ValidityState::Unknown);
        assert!(v.is_pending());
    }

    #[test]
    fn invalid_json_yields_location_qualified_message() {
        let mut v = validator(10);
        let t0 = Instant::now();
        v.notify_change(t0);
        let outcome = v.poll(t0 + Duration::from_millis(10), "{\"a\":1,}").unwrap();
        match outcome {
            ValidityState::Invalid { message } => {
                assert!(message.contains("at line 1 col"), "{}", message);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn blank_text_skips_validation() {
        let mut v = validator(10);
        let t0 = Instant::now();
        v.notify_change(t0);
        let outcome = v.poll(t0 + Duration::from_millis(10), "   \n\t");
        assert_eq!(outcome, Some(&ValidityState::Unknown));
        assert!(v.state().message().is_none());
    }

    #[test]
    fn remaining_shrinks_toward_deadline() {
        let mut v = validator(100);
        let t0 = Instant::now();
        assert!(v.remaining(t0).is_none());

        v.notify_change(t0);
        let at_start = v.remaining(t0).unwrap();
        let later = v.remaining(t0 + Duration::from_millis(70)).unwrap();
        assert!(later < at_start);
        assert_eq!(v.remaining(t0 + Duration::from_millis(100)), Some(Duration::ZERO));
    }
}
