//! Piston API を使った CodeExecutor 実装
//!
//! <https://github.com/engineer-man/piston> の公開エンドポイントに
//! リクエストを転送し、実行結果を共通フォーマットに変換します。
//! ネットワーク障害や API エラーは `ExecuteError::Unavailable` として
//! 呼び出し元に返され、Gateway をクラッシュさせることはありません。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CodeExecutor, ExecuteError, ExecutionRequest, ExecutionResult};

/// Default public Piston endpoint.
pub const DEFAULT_PISTON_URL: &str = "https://emkc.org/api/v2/piston/execute";

#[derive(Debug, Serialize)]
struct PistonRequest {
    language: String,
    version: String,
    files: Vec<PistonFile>,
    stdin: String,
}

#[derive(Debug, Serialize)]
struct PistonFile {
    content: String,
}

#[derive(Debug, Deserialize)]
struct PistonResponse {
    run: PistonStage,
    #[serde(default)]
    compile: Option<PistonStage>,
}

#[derive(Debug, Default, Deserialize)]
struct PistonStage {
    #[serde(default)]
    output: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    signal: Option<String>,
    /// Piston reports elapsed time as a decimal string.
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    memory: Option<i64>,
}

/// Piston を使った CodeExecutor 実装
pub struct PistonExecutor {
    http: reqwest::Client,
    endpoint: String,
}

impl PistonExecutor {
    /// 新しい PistonExecutor を作成
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Piston execute エンドポイントの URL
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

/// Pinned interpreter/compiler versions for the languages the editor offers.
/// Unknown languages fall back to "latest"(*) and let Piston resolve.
fn language_version(language: &str) -> &'static str {
    match language {
        "python" => "3.10.0",
        "javascript" => "18.15.0",
        "typescript" => "5.0.3",
        "cpp" => "10.2.0",
        "c" => "10.2.0",
        "java" => "15.0.2",
        "rust" => "1.68.2",
        "go" => "1.16.2",
        "ruby" => "3.0.1",
        "php" => "8.2.3",
        "swift" => "5.3.3",
        "csharp" => "6.12.0",
        "kotlin" => "1.7.20",
        _ => "*",
    }
}

/// First non-empty output across run and compile stages.
fn pick_output(response: &PistonResponse) -> String {
    let empty = String::new();
    let compile_output = response.compile.as_ref().map_or(&empty, |c| &c.output);
    let compile_stderr = response.compile.as_ref().map_or(&empty, |c| &c.stderr);
    let candidates = [
        &response.run.output,
        &response.run.stderr,
        compile_output,
        compile_stderr,
    ];
    candidates
        .iter()
        .find(|s| !s.is_empty())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "No output".to_string())
}

fn format_time(time: Option<&str>) -> String {
    let seconds = time.and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0);
    format!("{seconds:.2}s")
}

fn format_memory(memory: Option<i64>) -> String {
    format!("{}KB", memory.unwrap_or(0))
}

#[async_trait]
impl CodeExecutor for PistonExecutor {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, ExecuteError> {
        let body = PistonRequest {
            version: language_version(&request.language).to_string(),
            language: request.language,
            files: vec![PistonFile {
                content: request.code,
            }],
            stdin: request.stdin,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExecuteError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExecuteError::Unavailable(format!(
                "Piston API error: {}",
                response.status()
            )));
        }

        let data: PistonResponse = response
            .json()
            .await
            .map_err(|e| ExecuteError::Unavailable(e.to_string()))?;

        let status = if data.run.signal.is_some() {
            "Signaled"
        } else {
            "Success"
        };

        Ok(ExecutionResult {
            output: pick_output(&data),
            status: status.to_string(),
            time: format_time(data.run.time.as_deref()),
            memory: format_memory(data.run.memory),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(output: &str, stderr: &str) -> PistonStage {
        PistonStage {
            output: output.to_string(),
            stderr: stderr.to_string(),
            signal: None,
            time: None,
            memory: None,
        }
    }

    #[test]
    fn test_language_version_known_languages() {
        // テスト項目: 既知の言語に固定バージョンが返される
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert_eq!(language_version("python"), "3.10.0");
        assert_eq!(language_version("rust"), "1.68.2");
        assert_eq!(language_version("kotlin"), "1.7.20");
    }

    #[test]
    fn test_language_version_unknown_language_falls_back() {
        // テスト項目: 未知の言語に "*" が返される
        // given (前提条件):

        // when (操作):
        let version = language_version("cobol");

        // then (期待する結果):
        assert_eq!(version, "*");
    }

    #[test]
    fn test_pick_output_prefers_run_output() {
        // テスト項目: run.output が最優先で選択される
        // given (前提条件):
        let response = PistonResponse {
            run: stage("hello\n", "warning"),
            compile: None,
        };

        // when (操作):
        let output = pick_output(&response);

        // then (期待する結果): trim された run.output が返される
        assert_eq!(output, "hello");
    }

    #[test]
    fn test_pick_output_falls_back_to_stderr() {
        // テスト項目: run.output が空のとき run.stderr が選択される
        // given (前提条件):
        let response = PistonResponse {
            run: stage("", "Traceback (most recent call last)"),
            compile: None,
        };

        // when (操作):
        let output = pick_output(&response);

        // then (期待する結果):
        assert_eq!(output, "Traceback (most recent call last)");
    }

    #[test]
    fn test_pick_output_falls_back_to_compile_stage() {
        // テスト項目: run が空のときコンパイル段の出力が選択される
        // given (前提条件):
        let response = PistonResponse {
            run: stage("", ""),
            compile: Some(stage("", "error: expected `;`")),
        };

        // when (操作):
        let output = pick_output(&response);

        // then (期待する結果):
        assert_eq!(output, "error: expected `;`");
    }

    #[test]
    fn test_pick_output_defaults_to_no_output() {
        // テスト項目: すべての出力が空のとき "No output" が返される
        // given (前提条件):
        let response = PistonResponse {
            run: stage("", ""),
            compile: None,
        };

        // when (操作):
        let output = pick_output(&response);

        // then (期待する結果):
        assert_eq!(output, "No output");
    }

    #[test]
    fn test_time_and_memory_formatting() {
        // テスト項目: 実行時間とメモリ使用量が表示用に整形される
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert_eq!(format_time(Some("0.034")), "0.03s");
        assert_eq!(format_time(Some("not a number")), "0.00s");
        assert_eq!(format_time(None), "0.00s");
        assert_eq!(format_memory(Some(1024)), "1024KB");
        assert_eq!(format_memory(None), "0KB");
    }
}
