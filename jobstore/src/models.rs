//! Entities stored by the job-listing service.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobstore_core::document::Document;

pub const TITLE_FIELD: &str = "title";
pub const COMPANY_NAME_FIELD: &str = "companyName";
pub const LOCATION_FIELD: &str = "location";

/// A single job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobDetails {
    /// Store-assigned identifier; `None` until the job has been inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub company_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl Document for JobDetails {
    fn collection_name() -> &'static str {
        "jobdetails"
    }
}

/// A registered user of the job board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Document for User {
    fn collection_name() -> &'static str {
        "users"
    }
}

/// Optional search terms for listing jobs.
///
/// An empty `location` places no location constraint. `keywords` is matched
/// against both the title and the company name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    pub location: String,
    pub keywords: String,
}

impl SearchCriteria {
    pub fn new(location: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            keywords: keywords.into(),
        }
    }

    /// Returns `true` for the default criteria, which restrict nothing.
    pub fn is_empty(&self) -> bool {
        self.location.is_empty() && self.keywords.is_empty()
    }
}
