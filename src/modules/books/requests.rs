//! Backend calls made by the books handlers, as plain request descriptions.

use bookdesk_http::{ApiRequest, Method};

use super::models::{BookId, UpdatePayload};

pub const DELETE_ENDPOINT: &str = "delete_book";
pub const UPDATE_ENDPOINT: &str = "update_book";

/// `DELETE /delete_book/{id}`, no body.
pub fn delete_book(id: &BookId) -> ApiRequest {
    ApiRequest::new(Method::DELETE, [DELETE_ENDPOINT, id.as_str()])
}

/// `PUT /update_book/{id}` with the payload as a JSON body.
pub fn update_book(id: &BookId, payload: &UpdatePayload) -> Result<ApiRequest, serde_json::Error> {
    let body = serde_json::to_string(payload)?;
    Ok(ApiRequest::new(Method::PUT, [UPDATE_ENDPOINT, id.as_str()]).with_json_body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookdesk_http::header::CONTENT_TYPE;

    #[test]
    fn delete_request_has_no_body() {
        let request = delete_book(&BookId::from("X"));
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path(), "/delete_book/X");
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn update_request_matches_backend_contract() {
        let payload = UpdatePayload {
            title: Some("Dune".to_string()),
            author: Some("Herbert".to_string()),
            kind: Some("Novel".to_string()),
            publication_date: Some("1965".to_string()),
        };

        let request = update_book(&BookId::from(7_i64), &payload).unwrap();

        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path(), "/update_book/7");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"title":"Dune","author":"Herbert","kind":"Novel","publication_date":"1965"}"#)
        );
    }
}
