use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub total_marks: f64,
    pub created_by: i64,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 截止时间是否已过
    pub fn is_past_due(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now > self.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_is_past_due() {
        let now = Utc::now();
        let assignment = Assignment {
            id: 1,
            course_id: 1,
            title: "Essay".into(),
            description: "Write".into(),
            due_date: now,
            total_marks: 100.0,
            created_by: 1,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert!(!assignment.is_past_due(now));
        assert!(assignment.is_past_due(now + Duration::seconds(1)));
        assert!(!assignment.is_past_due(now - Duration::days(1)));
    }
}
