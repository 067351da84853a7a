use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::quiz::SessionIdentity;

/// Rendered PDF report for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Report {
    pub fn default_file_name(session: &SessionIdentity) -> String {
        format!("strength_report_{}.pdf", session.short())
    }

    pub fn looks_like_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF")
    }
}

/// Pull `filename` out of a `Content-Disposition` header value.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        let value = value.trim_matches('"').trim();
        // Drop any directory part a server might send.
        let name = value.rsplit(['/', '\\']).next().unwrap_or(value);
        (!matches!(name, "" | "." | "..")).then(|| name.to_string())
    })
}

/// Chart images as `data:image/png;base64,...` URIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartImages {
    pub radar_chart: String,
    pub bar_chart: String,
}

impl ChartImages {
    pub fn radar_png(&self) -> Result<Vec<u8>, ServiceError> {
        decode_data_uri(&self.radar_chart)
    }

    pub fn bar_png(&self) -> Result<Vec<u8>, ServiceError> {
        decode_data_uri(&self.bar_chart)
    }
}

/// Decode a base64 data URI into raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ServiceError> {
    let (header, data) = uri
        .split_once(',')
        .ok_or_else(|| ServiceError::Malformed("data URI has no payload".into()))?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(ServiceError::Malformed(format!(
            "unsupported data URI header '{header}'"
        )));
    }
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| ServiceError::Malformed(format!("invalid base64 image: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_name_uses_short_id() {
        let id = SessionIdentity::new("3f2a9c1e-0000-4000-8000-000000000000").unwrap();
        assert_eq!(Report::default_file_name(&id), "strength_report_3f2a9c1e.pdf");
    }

    #[test]
    fn content_disposition_filename_is_extracted() {
        assert_eq!(
            filename_from_content_disposition(r#"attachment; filename="report_ab12.pdf""#),
            Some("report_ab12.pdf".to_string())
        );
        assert_eq!(
            filename_from_content_disposition("attachment; filename=../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(filename_from_content_disposition("inline"), None);
    }

    #[test]
    fn content_disposition_rejects_dot_names() {
        assert_eq!(filename_from_content_disposition("attachment; filename=.."), None);
        assert_eq!(filename_from_content_disposition(r#"attachment; filename=".""#), None);
        assert_eq!(filename_from_content_disposition("attachment; filename=reports/.."), None);
        assert_eq!(filename_from_content_disposition("attachment; filename=a/"), None);
    }

    #[test]
    fn data_uri_decodes_png_bytes() {
        let bytes = decode_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn data_uri_rejects_non_base64_header() {
        assert!(decode_data_uri("data:image/png,abc").is_err());
        assert!(decode_data_uri("no comma here").is_err());
    }
}
