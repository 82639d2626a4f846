use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};

use crate::error::AppError;

/// Decoded form body, either `application/x-www-form-urlencoded` or
/// `multipart/form-data`.
///
/// Keeps repeated keys so multi-select answers survive decoding. An absent key
/// and a key submitted with an empty value are both treated as not supplied.
#[derive(Debug, Default, Clone)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted under `key`, or `None` when the key is absent or
    /// that first value is empty.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn owned(&self, key: &str) -> Option<String> {
        self.value(key).map(str::to_owned)
    }

    /// Every non-empty value submitted under `key`, in submission order.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_input(e.body_text()))?;
            return Ok(Self::new(pairs));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_input(e.body_text()))?;

        let mut pairs = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_input(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| AppError::bad_input(e.body_text()))?;
            pairs.push((name, value));
        }

        Ok(Self::new(pairs))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn fields() -> FormFields {
        [
            ("name", "Asha"),
            ("empty", ""),
            ("painPoints", "billing"),
            ("painPoints", ""),
            ("painPoints", "otherPainPoints"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_value() {
        let fields = fields();
        assert_eq!(fields.value("name"), Some("Asha"));
        assert_eq!(fields.value("empty"), None);
        assert_eq!(fields.value("missing"), None);
    }

    #[test]
    fn test_values_keep_order_and_skip_blanks() {
        assert_eq!(
            fields().values("painPoints"),
            vec!["billing".to_string(), "otherPainPoints".to_string()]
        );
        assert!(fields().values("missing").is_empty());
    }

    #[test]
    fn test_value_is_first_submission_only() {
        let fields: FormFields = [("aiView", ""), ("aiView", "Useful")].into_iter().collect();
        assert_eq!(fields.value("aiView"), None);
        assert_eq!(fields.values("aiView"), vec!["Useful".to_string()]);
    }

    async fn extract(content_type: &str, body: &str) -> Result<FormFields, AppError> {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        FormFields::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_extract_urlencoded() {
        let fields = extract(
            "application/x-www-form-urlencoded",
            "painPoints=billing&painPoints=otherPainPoints&name=Asha+Rao",
        )
        .await
        .unwrap();

        assert_eq!(fields.value("name"), Some("Asha Rao"));
        assert_eq!(fields.values("painPoints").len(), 2);
    }

    #[tokio::test]
    async fn test_extract_multipart() {
        let body = "--XyZ\r\n\
            Content-Disposition: form-data; name=\"painPoints\"\r\n\r\nbilling\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"painPoints\"\r\n\r\notherPainPoints\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"email\"\r\n\r\nx@y.com\r\n\
            --XyZ--\r\n";

        let fields = extract("multipart/form-data; boundary=XyZ", body).await.unwrap();

        assert_eq!(fields.value("email"), Some("x@y.com"));
        assert_eq!(
            fields.values("painPoints"),
            vec!["billing".to_string(), "otherPainPoints".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unsupported_body_is_bad_input() {
        let error = extract("application/json", r#"{"email":"x@y.com"}"#)
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::BadInput(_)));
    }

    #[test]
    fn test_whitespace_counts_as_supplied() {
        let fields: FormFields = [("aiView", " ")].into_iter().collect();
        assert_eq!(fields.value("aiView"), Some(" "));
    }
}
