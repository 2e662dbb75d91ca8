use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of rental listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Duplex,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Duplex => "duplex",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Duplex => "Duplex",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "duplex" => Ok(PropertyType::Duplex),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Part of a property an image depicts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Exterior,
    Living,
    Kitchen,
    Bedroom,
    Bathroom,
    Dining,
    Backyard,
    Garage,
    Other,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Exterior => "exterior",
            RoomType::Living => "living",
            RoomType::Kitchen => "kitchen",
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom",
            RoomType::Dining => "dining",
            RoomType::Backyard => "backyard",
            RoomType::Garage => "garage",
            RoomType::Other => "other",
        }
    }

    /// Human readable label used for gallery filter buttons
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Exterior => "Exterior",
            RoomType::Living => "Living Room",
            RoomType::Kitchen => "Kitchen",
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Dining => "Dining Room",
            RoomType::Backyard => "Backyard",
            RoomType::Garage => "Garage",
            RoomType::Other => "Other",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exterior" => Ok(RoomType::Exterior),
            "living" => Ok(RoomType::Living),
            "kitchen" => Ok(RoomType::Kitchen),
            "bedroom" => Ok(RoomType::Bedroom),
            "bathroom" => Ok(RoomType::Bathroom),
            "dining" => Ok(RoomType::Dining),
            "backyard" => Ok(RoomType::Backyard),
            "garage" => Ok(RoomType::Garage),
            "other" => Ok(RoomType::Other),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Reason a visitor got in touch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InquiryType {
    Viewing,
    Application,
    General,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::Viewing => "viewing",
            InquiryType::Application => "application",
            InquiryType::General => "general",
        }
    }
}

impl FromStr for InquiryType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewing" => Ok(InquiryType::Viewing),
            "application" => Ok(InquiryType::Application),
            "general" => Ok(InquiryType::General),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Returned when a wire name does not match any enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

/// Photo attached to a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id: i64,
    pub property_id: i64,
    pub url: String,
    pub caption: String,
    pub room: RoomType,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: i64,
    pub deposit: i64,
    pub application_fee: i64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub square_feet: u32,
    pub description: String,
    pub features: Vec<String>,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_date: Option<NaiveDate>,
    pub pet_friendly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_deposit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_rent: Option<i64>,
    pub parking: String,
    pub laundry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub utilities: Vec<String>,
    #[serde(default)]
    pub lease_terms: Vec<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}

impl Property {
    pub fn type_label(&self) -> &'static str {
        self.property_type.label()
    }

    pub fn bedroom_text(&self) -> String {
        match self.bedrooms {
            0 => "Studio".to_string(),
            1 => "1 Bed".to_string(),
            n => format!("{n} Beds"),
        }
    }

    pub fn bathroom_text(&self) -> String {
        let whole = self.bathrooms.trunc();
        if self.bathrooms == 1.0 {
            "1 Bath".to_string()
        } else if self.bathrooms == whole {
            format!("{} Baths", whole as u32)
        } else {
            format!("{}.5 Baths", whole as u32)
        }
    }

    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    pub fn first_image(&self) -> Option<&PropertyImage> {
        self.images.first()
    }
}

/// Inquiry sent through the contact form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_type: Option<InquiryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}
