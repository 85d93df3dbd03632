use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::ArchiveConfig;

/// Object storage for original resume documents, one folder per candidate.
#[derive(Clone)]
pub struct ResumeArchive {
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl ResumeArchive {
    /// Constructs an S3 client for MinIO (custom endpoint) or AWS.
    pub async fn connect(config: &ArchiveConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "hireflow-static",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Uploads a resume and returns its `s3://` URL.
    pub async fn put_resume(&self, candidate_id: Uuid, filename: &str, document: Bytes) -> Result<String> {
        let key = object_key(candidate_id, filename);
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(document))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        info!("Archived resume to s3://{}/{}", self.bucket, key);
        Ok(format!("s3://{}/{}", self.bucket, key))
    }
}

fn object_key(candidate_id: Uuid, filename: &str) -> String {
    format!("resumes/{candidate_id}/{}", sanitize_filename(filename))
}

/// Reduces an uploaded filename to a safe single path component.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => c,
            _ => '_',
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "resume.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories_and_specials() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\My CV (final).pdf"), "My_CV__final_.pdf");
        assert_eq!(sanitize_filename("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn test_sanitize_falls_back_for_empty_names() {
        assert_eq!(sanitize_filename(""), "resume.pdf");
        assert_eq!(sanitize_filename("../.."), "resume.pdf");
    }

    #[test]
    fn test_object_key_is_per_candidate() {
        let id = Uuid::nil();
        assert_eq!(
            object_key(id, "cv.pdf"),
            "resumes/00000000-0000-0000-0000-000000000000/cv.pdf"
        );
    }
}
