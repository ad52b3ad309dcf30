//! Wire types for the PropConnect backend.
//!
//! Everything here is a read projection of server-owned state: records are
//! deserialized from JSON responses and never mutated locally except by
//! re-fetch. Field names follow the backend's camelCase convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role returned by the login endpoint. Only `Admin` may use the
/// console; every other role is rejected at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Admin,
    Agent,
    User,
    #[serde(other)]
    Unknown,
}

impl UserType {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::Admin)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserType::Admin => "ADMIN",
            UserType::Agent => "AGENT",
            UserType::User => "USER",
            UserType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Residential,
    Commercial,
    Agriculture,
    NewDevelopment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Residential,
        PropertyType::Commercial,
        PropertyType::Agriculture,
        PropertyType::NewDevelopment,
    ];

    /// Wire value, also used as the display label in tables and CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "RESIDENTIAL",
            PropertyType::Commercial => "COMMERCIAL",
            PropertyType::Agriculture => "AGRICULTURE",
            PropertyType::NewDevelopment => "NEW_DEVELOPMENT",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RESIDENTIAL" => Ok(PropertyType::Residential),
            "COMMERCIAL" => Ok(PropertyType::Commercial),
            "AGRICULTURE" => Ok(PropertyType::Agriculture),
            "NEW_DEVELOPMENT" | "NEW-DEVELOPMENT" => Ok(PropertyType::NewDevelopment),
            other => Err(format!("Unknown property type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryStatus {
    New,
    Contacted,
    InProgress,
    Closed,
    #[serde(other)]
    Unknown,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "NEW",
            InquiryStatus::Contacted => "CONTACTED",
            InquiryStatus::InProgress => "IN_PROGRESS",
            InquiryStatus::Closed => "CLOSED",
            InquiryStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NEW" => Ok(InquiryStatus::New),
            "CONTACTED" => Ok(InquiryStatus::Contacted),
            "IN_PROGRESS" | "IN-PROGRESS" => Ok(InquiryStatus::InProgress),
            "CLOSED" => Ok(InquiryStatus::Closed),
            other => Err(format!("Unknown inquiry status: {}", other)),
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Body of a successful `POST /api/auth/admin/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub user_type: UserType,
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error envelope the backend attaches to failed requests.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Sold-properties report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldProperty {
    pub property_id: i64,
    pub property_title: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub listing_type: String,
    pub city: String,
    pub locality: String,
    pub full_address: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sold_by: SoldBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldBy {
    pub agent_id: i64,
    pub agent_name: String,
    pub agent_email: String,
    pub agent_phone: String,
    pub agent_username: String,
    pub agent_status: String,
    pub total_sold_by_agent: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingAgent {
    pub agent_id: i64,
    pub agent_name: String,
    pub agent_email: String,
    pub agent_phone: String,
    pub sold_count: u32,
}

/// `GET /api/admin/dashboard/sold-properties`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldPropertiesReport {
    pub total_sold: u32,
    #[serde(default)]
    pub top_selling_agent: Option<TopSellingAgent>,
    #[serde(default)]
    pub sold_properties: Vec<SoldProperty>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// `GET /api/admin/dashboard/stats`. Entirely backend-computed; the console
/// only formats it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_properties: u64,
    #[serde(default)]
    pub total_agents: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_inquiries: u64,
    #[serde(default)]
    pub property_status: Option<PropertyStatusBreakdown>,
    #[serde(default)]
    pub top_selling_agent: Option<AgentPerformance>,
    #[serde(default)]
    pub least_active_agent: Option<AgentPerformance>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStatusBreakdown {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub sold: u64,
    #[serde(default)]
    pub rented: u64,
    #[serde(default)]
    pub inactive: u64,
    #[serde(default)]
    pub under_review: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
    #[serde(default)]
    pub agent_id: Option<i64>,
    pub agent_name: String,
    #[serde(default)]
    pub agent_email: Option<String>,
    #[serde(default)]
    pub agent_phone: Option<String>,
    #[serde(default)]
    pub count: u64,
}

// ============================================================================
// Agents, properties, users, inquiries
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub experience: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListItem {
    pub id: i64,
    pub property_title: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub listing_type: String,
    pub city: String,
    pub agent_id: i64,
    pub agent_name: String,
    pub agent_phone: String,
    pub agent_email: String,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub amenities: Option<String>,
}

/// Server-side page envelope for `GET /api/properties`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPage {
    #[serde(default)]
    pub content: Vec<PropertyListItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    /// Zero-based page index, as the backend reports it.
    #[serde(default)]
    pub number: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
    pub inquiry_type: String,
    pub status: InquiryStatus,
    pub property_id: i64,
    pub property_title: String,
    pub property_city: String,
    #[serde(default)]
    pub agent_id: Option<i64>,
    #[serde(default)]
    pub agent_name: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub responded_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_round_trip() {
        for t in PropertyType::ALL {
            assert_eq!(t.as_str().parse::<PropertyType>().unwrap(), t);
        }
        assert!("FARMHOUSE".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_user_type_unknown_variant() {
        let t: UserType = serde_json::from_str("\"SUPERADMIN\"").unwrap();
        assert_eq!(t, UserType::Unknown);
        assert!(!t.is_admin());
        let t: UserType = serde_json::from_str("\"ADMIN\"").unwrap();
        assert!(t.is_admin());
    }

    #[test]
    fn test_sold_property_deserializes_backend_shape() {
        let json = r#"{
            "propertyId": 42,
            "propertyTitle": "3BHK Apartment in Banjara Hills",
            "price": 9500000.0,
            "propertyType": "RESIDENTIAL",
            "listingType": "SALE",
            "city": "Hyderabad",
            "locality": "Banjara Hills",
            "fullAddress": "Road No. 12, Banjara Hills",
            "bedrooms": 3,
            "bathrooms": 2,
            "area": "1650",
            "status": "SOLD",
            "createdAt": "2025-05-01T10:00:00Z",
            "updatedAt": "2025-06-15T08:30:00Z",
            "soldBy": {
                "agentId": 7,
                "agentName": "Priya Sharma",
                "agentEmail": "priya@propconnect.example",
                "agentPhone": "+91 98000 00000",
                "agentUsername": "priya.s",
                "agentStatus": "ACTIVE",
                "totalSoldByAgent": 12
            }
        }"#;

        let p: SoldProperty = serde_json::from_str(json).unwrap();
        assert_eq!(p.property_id, 42);
        assert_eq!(p.property_type, PropertyType::Residential);
        assert_eq!(p.sold_by.agent_id, 7);
        assert_eq!(p.bedrooms, 3);
    }

    #[test]
    fn test_dashboard_stats_tolerates_missing_sections() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"totalProperties": 120, "totalAgents": 8, "totalUsers": 340, "totalInquiries": 45}"#,
        )
        .unwrap();
        assert_eq!(stats.total_properties, 120);
        assert!(stats.property_status.is_none());
        assert!(stats.top_selling_agent.is_none());
    }

    #[test]
    fn test_inquiry_status_parse() {
        assert_eq!(
            "in_progress".parse::<InquiryStatus>().unwrap(),
            InquiryStatus::InProgress
        );
        assert!("ESCALATED".parse::<InquiryStatus>().is_err());
    }
}
