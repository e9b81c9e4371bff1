//! Calculator messages.
//!
//! Both messages are plain proto3 messages with scalar fields, so absent
//! fields decode to `0`. The JSON rendering follows the protobuf JSON
//! mapping: lowerCamelCase field names (snake_case accepted on input) and
//! `int64` values written as decimal strings, read from strings or numbers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operands of a binary arithmetic operation.
///
/// ```protobuf
/// message BinaryOperationRequest {
///   int64 operand_a = 1;
///   int64 operand_b = 2;
/// }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinaryOperationRequest {
    #[prost(int64, tag = "1")]
    #[serde(alias = "operand_a", with = "int64_json")]
    pub operand_a: i64,
    #[prost(int64, tag = "2")]
    #[serde(alias = "operand_b", with = "int64_json")]
    pub operand_b: i64,
}

impl BinaryOperationRequest {
    pub fn new(operand_a: i64, operand_b: i64) -> Self {
        Self {
            operand_a,
            operand_b,
        }
    }
}

/// Result of a binary arithmetic operation.
///
/// ```protobuf
/// message BinaryOperationReply {
///   int64 result = 1;
/// }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryOperationReply {
    #[prost(int64, tag = "1")]
    #[serde(with = "int64_json")]
    pub result: i64,
}

impl BinaryOperationReply {
    pub fn new(result: i64) -> Self {
        Self { result }
    }
}

/// `int64` in the protobuf JSON mapping.
mod int64_json {
    use super::*;
    use pbjson::private::NumberDeserialize;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(NumberDeserialize::<i64>::deserialize(deserializer)?.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_request_wire_layout() {
        // field 1 varint 2, field 2 varint 3
        let bytes = BinaryOperationRequest::new(2, 3).encode_to_vec();
        assert_eq!(bytes, vec![0x08, 0x02, 0x10, 0x03]);
    }

    #[test]
    fn test_empty_body_decodes_to_defaults() {
        let req = BinaryOperationRequest::decode(&[][..]).unwrap();
        assert_eq!(req, BinaryOperationRequest::new(0, 0));
    }

    #[test]
    fn test_negative_operands_survive_decode() {
        let original = BinaryOperationRequest::new(-7, i64::MIN);
        let decoded = BinaryOperationRequest::decode(original.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_json_accepts_camel_and_snake_case() {
        let camel: BinaryOperationRequest =
            serde_json::from_str(r#"{"operandA":1,"operandB":2}"#).unwrap();
        let snake: BinaryOperationRequest =
            serde_json::from_str(r#"{"operand_a":1,"operand_b":2}"#).unwrap();
        assert_eq!(camel, snake);

        let partial: BinaryOperationRequest = serde_json::from_str(r#"{"operandA":5}"#).unwrap();
        assert_eq!(partial, BinaryOperationRequest::new(5, 0));
    }

    #[test]
    fn test_reply_json_shape() {
        let json = serde_json::to_string(&BinaryOperationReply::new(5)).unwrap();
        assert_eq!(json, r#"{"result":"5"}"#);

        let json = serde_json::to_string(&BinaryOperationReply::new(i64::MIN)).unwrap();
        assert_eq!(json, r#"{"result":"-9223372036854775808"}"#);
    }

    #[test]
    fn test_json_accepts_string_operands() {
        let quoted: BinaryOperationRequest =
            serde_json::from_str(r#"{"operandA":"2","operandB":"-3"}"#).unwrap();
        assert_eq!(quoted, BinaryOperationRequest::new(2, -3));

        let mixed: BinaryOperationRequest =
            serde_json::from_str(r#"{"operandA":"9223372036854775807","operandB":1}"#).unwrap();
        assert_eq!(mixed, BinaryOperationRequest::new(i64::MAX, 1));
    }

    #[test]
    fn test_json_rejects_non_numeric_string() {
        let result = serde_json::from_str::<BinaryOperationRequest>(r#"{"operandA":"two"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reply_json_reads_string_and_number() {
        let from_string: BinaryOperationReply = serde_json::from_str(r#"{"result":"5"}"#).unwrap();
        let from_number: BinaryOperationReply = serde_json::from_str(r#"{"result":5}"#).unwrap();
        assert_eq!(from_string, from_number);
    }
}
