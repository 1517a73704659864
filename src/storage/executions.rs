//! Execution result storage

use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;
use crate::types::ExecutionResult;

pub fn save_execution(result: &ExecutionResult) -> Result<()> {
    let filename = format!(
        "output/executions/decisions_{}.jsonl",
        Utc::now().format("%Y-%m-%d")
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    writeln!(file, "{}", serde_json::to_string(result)?)?;

    debug!(
        execution_id = %result.id,
        status = ?result.status,
        "Saved execution decision"
    );

    Ok(())
}
