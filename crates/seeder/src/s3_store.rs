// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! S3-compatible bucket access through rust-s3 (blocking client)

use crate::config::S3Settings;
use crate::store::SeedStore;
use crate::{Result, SeedError};
use diagnostics::*;
use s3::bucket::Bucket;
use s3::bucket_ops::BucketConfiguration;
use s3::creds::Credentials;
use s3::region::Region;

pub struct S3Store {
    name: String,
    bucket: Bucket,
    region: Region,
    credentials: Credentials,
}

impl S3Store {
    /// Build a path-style bucket handle. No request is made yet.
    pub fn connect(name: &str, settings: &S3Settings) -> Result<Self> {
        let endpoint = settings.endpoint_url();
        let region = Region::Custom {
            region: settings.region.clone(),
            endpoint: endpoint.clone(),
        };
        let credentials = credentials(settings)?;
        let bucket = Bucket::new(name, region.clone(), credentials.clone())?.with_path_style();

        debug!("Connected bucket {name} at {endpoint}", name: name, endpoint: endpoint.as_str());
        Ok(Self {
            name: name.to_string(),
            bucket,
            region,
            credentials,
        })
    }
}

fn credentials(settings: &S3Settings) -> Result<Credentials> {
    match (&settings.access_key, &settings.secret_key) {
        (None, None) => Ok(Credentials::anonymous()?),
        (access, secret) => Ok(Credentials::new(
            access.as_deref(),
            secret.as_deref(),
            None,
            None,
            None,
        )?),
    }
}

impl SeedStore for S3Store {
    fn bucket(&self) -> &str {
        &self.name
    }

    fn bucket_exists(&self) -> Result<bool> {
        Ok(self.bucket.exists()?)
    }

    fn create_bucket(&self) -> Result<()> {
        let response = Bucket::create_with_path_style(
            &self.name,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )?;
        if !response.success() {
            return Err(SeedError::CreateBucket {
                bucket: self.name.clone(),
                status: response.response_code,
            });
        }
        Ok(())
    }

    fn has_objects(&self) -> Result<bool> {
        // No delimiter: nested keys count as objects too.
        let (page, _status) = self
            .bucket
            .list_page(String::new(), None, None, None, Some(1))?;
        Ok(!page.contents.is_empty())
    }

    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        let response = self
            .bucket
            .put_object_with_content_type(key, body, content_type)?;
        match response.status_code() {
            200..=299 => Ok(()),
            status => Err(SeedError::Rejected {
                key: key.to_string(),
                status,
            }),
        }
    }
}
