use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmitMode;

// 提交或重新提交
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmitRequest {
    pub content: String,
    #[serde(default)]
    pub mode: SubmitMode,
}

// 评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct GradeRequest {
    pub marks: Option<f64>,
    #[serde(default)]
    pub feedback: String,
}
