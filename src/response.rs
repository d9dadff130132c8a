use serde::Serialize;
use utoipa::ToSchema;

const SUCCESS_CODE: &str = "COMMON200";
const SUCCESS_MESSAGE: &str = "성공입니다.";

/// 성공 응답 envelope: `{ isSuccess, code, message, result }`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    #[schema(example = true)]
    pub is_success: bool,
    #[schema(example = "COMMON200")]
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: SUCCESS_CODE.to_owned(),
            message: SUCCESS_MESSAGE.to_owned(),
            result: Some(result),
        }
    }
}

/// 실패 응답 envelope. `result`는 항상 null로 직렬화됩니다.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub is_success: bool,
    #[schema(example = "COMMON400")]
    pub code: String,
    #[schema(example = "이모지는 최대 20개까지 선택할 수 있습니다")]
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_should_use_camel_case_envelope() {
        #[derive(Serialize)]
        struct Payload {
            emotion: &'static str,
        }

        let response = BaseResponse::success(Payload { emotion: "Joy" });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["code"], "COMMON200");
        assert_eq!(json["result"]["emotion"], "Joy");
    }

    #[test]
    fn error_response_should_have_null_result() {
        let response = ErrorResponse::new("AI_001", "유효하지 않은 비밀 키입니다.");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["code"], "AI_001");
        assert!(json["result"].is_null());
    }
}
