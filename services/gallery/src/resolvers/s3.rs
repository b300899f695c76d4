//! S3 bucket listing backend

use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::resolvers::remote::ObjectLister;

/// Lists gallery objects from an S3 bucket by key prefix
pub struct S3Lister {
    s3_client: Client,
    bucket_name: String,
}

impl S3Lister {
    pub fn new(s3_client: Client, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait]
impl ObjectLister for S3Lister {
    async fn list(&self, source_ref: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", source_ref.trim_end_matches('/'));
        debug!("Listing s3://{}/{}", self.bucket_name, prefix);

        let mut keys = Vec::new();
        let mut continuation_token = None;

        loop {
            let mut request = self
                .s3_client
                .list_objects_v2()
                .bucket(&self.bucket_name)
                .prefix(&prefix);

            if let Some(token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await?;

            if let Some(contents) = response.contents {
                for obj in contents {
                    if let Some(key) = obj.key {
                        if key != prefix {
                            keys.push(key);
                        }
                    }
                }
            }

            // Check if there are more objects to fetch
            if response.is_truncated.unwrap_or(false) {
                continuation_token = response.next_continuation_token;
            } else {
                break;
            }
        }

        Ok(keys)
    }
}
