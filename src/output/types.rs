use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "rsplit.v1";

#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        let result = serde_json::to_value(result)?;
        Ok(Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            result,
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_result_envelope() {
        let result = json!({"chunks": [{"path": "xaa", "bytes": 3}]});
        let env = Envelope::result("split", &result, None).expect("to serialize result");
        let s = serde_json::to_string(&env).unwrap();
        assert!(s.contains("\"schema_version\":\"rsplit.v1\""));
        assert!(s.contains("\"op\":\"split\""));
        assert!(s.contains("\"xaa\""));
        assert!(!s.contains("\"meta\""));
    }

    #[test]
    fn meta_duration_is_serialized() {
        let meta = Meta { duration_ms: Some(12) };
        let env = Envelope::result("split", &json!({}), Some(meta)).unwrap();
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["meta"]["duration_ms"], 12);
    }
}
