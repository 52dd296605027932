//! Brand profiles and verification data.

use serde::{Deserialize, Deserializer, Serialize};

/// Brand-specific columns embedded under a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandInfo {
    pub profile_id: String,
    pub company_name: Option<String>,
    /// "verified" or "pending"
    pub verification_status: Option<String>,
    #[serde(rename = "isAgency", default)]
    pub is_agency: Option<bool>,
    pub agency_status: Option<String>,
    pub sales_handler: Option<String>,
    pub business_phone_number: Option<String>,
}

/// `profiles` row with its embedded `brands` array, as fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandProfileRow {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    /// Array for one-to-many embeds, object for one-to-one, null when absent
    #[serde(default, deserialize_with = "one_or_many")]
    pub brands: Vec<BrandInfo>,
}

/// Brand listing entry with the brand record flattened.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BrandSummary {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub brands: Option<BrandInfo>,
}

impl From<BrandProfileRow> for BrandSummary {
    fn from(row: BrandProfileRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            created_at: row.created_at,
            brands: row.brands.into_iter().next(),
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<BrandInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Embedded {
        Many(Vec<BrandInfo>),
        One(BrandInfo),
    }

    Ok(match Option::<Embedded>::deserialize(deserializer)? {
        Some(Embedded::Many(rows)) => rows,
        Some(Embedded::One(row)) => vec![row],
        None => Vec::new(),
    })
}
