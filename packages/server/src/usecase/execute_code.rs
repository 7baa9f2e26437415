//! UseCase: コード実行処理
//!
//! 実行サンドボックスは外部コラボレーター（`CodeExecutor` trait）であり、
//! Room の状態には一切関与しない。ダウンストリーム障害は構造化された
//! 失敗結果としてリクエスト元のクライアントにのみ返される。

use std::net::IpAddr;
use std::sync::Arc;

use crate::domain::{
    CodeExecutor, ExecuteError, ExecutionRequest, ExecutionResult, FixedWindowLimiter,
};

use super::error::ExecuteCodeError;

/// コード実行のユースケース
pub struct ExecuteCodeUseCase {
    executor: Arc<dyn CodeExecutor>,
    limiter: Arc<FixedWindowLimiter<IpAddr>>,
}

impl ExecuteCodeUseCase {
    /// 新しい ExecuteCodeUseCase を作成
    pub fn new(
        executor: Arc<dyn CodeExecutor>,
        limiter: Arc<FixedWindowLimiter<IpAddr>>,
    ) -> Self {
        Self { executor, limiter }
    }

    /// コード実行を実行
    ///
    /// # Arguments
    ///
    /// * `peer` - リクエスト元の IP（レートリミットのキー）
    /// * `request` - 実行リクエスト
    ///
    /// # Returns
    ///
    /// * `Ok(ExecutionResult)` - 実行結果。ダウンストリーム障害も
    ///   `status: "Error"` の構造化された結果として返される
    /// * `Err(ExecuteCodeError::RateLimited)` - レートリミット超過
    pub async fn execute(
        &self,
        peer: IpAddr,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, ExecuteCodeError> {
        if !self.limiter.check(&peer).await {
            tracing::warn!("execution request from {} rate-limited", peer);
            return Err(ExecuteCodeError::RateLimited);
        }

        match self.executor.execute(request).await {
            Ok(result) => Ok(result),
            Err(ExecuteError::Unavailable(message)) => {
                tracing::warn!("execution backend unavailable: {}", message);
                Ok(ExecutionResult {
                    output: format!("API Error: {message}"),
                    status: "Error".to_string(),
                    time: "0.00s".to_string(),
                    memory: "0KB".to_string(),
                })
            }
        }
    }
}
