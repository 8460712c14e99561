//! JSON検証・整形の外部境界
//!
//! serde_json への委譲をトレイト境界の背後に置く。バリデータや整形
//! コマンドはこのトレイトだけに依存するため、テストでは偽実装を
//! 差し込める。

use crate::error::JsonError;
use serde_json::Value;

/// JSON検証・整形の戦略トレイト
pub trait JsonCodec {
    /// テキストが有効なJSONかを検証
    fn validate(&self, text: &str) -> Result<(), JsonError>;

    /// 展開整形（複数行・インデント付き）したテキストを返す
    fn to_pretty(&self, text: &str) -> Result<String, JsonError>;

    /// 最小化（1行）したテキストを返す
    fn to_compact(&self, text: &str) -> Result<String, JsonError>;
}

/// serde_json による実装
#[derive(Debug, Default, Clone)]
pub struct SerdeJsonCodec;

impl SerdeJsonCodec {
    /// インスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

impl JsonCodec for SerdeJsonCodec {
    fn validate(&self, text: &str) -> Result<(), JsonError> {
        serde_json::from_str::<Value>(text)
            .map(|_| ())
            .map_err(|err| JsonError::parse(&err))
    }

    fn to_pretty(&self, text: &str) -> Result<String, JsonError> {
        // 整形経路のエラーは診断的な接頭辞付きで報告される
        let value: Value = serde_json::from_str(text)
            .map_err(|err| JsonError::syntax(format!("pretty print failed with parse error: {}", err)))?;
        serde_json::to_string_pretty(&value).map_err(|err| JsonError::parse(&err))
    }

    fn to_compact(&self, text: &str) -> Result<String, JsonError> {
        let value: Value = serde_json::from_str(text).map_err(|err| JsonError::parse(&err))?;
        serde_json::to_string(&value).map_err(|err| JsonError::parse(&err))
    }
}
