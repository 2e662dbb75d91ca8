use crate::catalog::traits::CatalogSource;
use crate::models::{Property, PropertyImage, PropertyType, RoomType};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

/// Built-in listing set served when no external catalog is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleCatalog;

impl SampleCatalog {
    pub fn new() -> Self {
        Self
    }

    /// The sample Springfield rentals, in catalog order
    pub fn properties() -> Vec<Property> {
        let listed = listed_at();

        vec![
            Property {
                id: 1,
                slug: "spacious-family-home".to_string(),
                title: "Spacious Family Home".to_string(),
                property_type: PropertyType::House,
                address: "123 Oak Street".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                price: 1850,
                deposit: 1850,
                application_fee: 50,
                bedrooms: 4,
                bathrooms: 2.5,
                square_feet: 2200,
                description: "Beautiful single-family home in a quiet neighborhood. Open floor plan, updated kitchen with stainless steel appliances, hardwood floors throughout the main level and a large backyard. Near excellent schools and parks.".to_string(),
                features: strings(&[
                    "Central Air Conditioning",
                    "Hardwood Floors",
                    "Updated Kitchen",
                    "Large Backyard",
                    "Two-Car Garage",
                    "Basement Storage",
                ]),
                available: true,
                available_date: NaiveDate::from_ymd_opt(2024, 2, 1),
                pet_friendly: true,
                pet_deposit: Some(300),
                pet_rent: Some(35),
                parking: "2-Car Garage".to_string(),
                laundry: "In-Unit".to_string(),
                year_built: Some(2015),
                utilities: strings(&["Trash"]),
                lease_terms: strings(&["12 months"]),
                featured: true,
                created_at: listed,
                updated_at: listed,
                images: vec![
                    image(1, 101, "photo-1568605114967-8130f3a36994", "Front of the house", RoomType::Exterior, 1),
                    image(1, 102, "photo-1600596542815-ffad4c1539a9", "Open living room", RoomType::Living, 2),
                    image(1, 103, "photo-1600607687939-ce8a6c25118c", "Updated kitchen", RoomType::Kitchen, 3),
                    image(1, 104, "photo-1600566753190-17f0baa2a6c3", "Main bedroom", RoomType::Bedroom, 4),
                    image(1, 105, "photo-1600585154526-990dced4db0d", "Backyard", RoomType::Backyard, 5),
                ],
            },
            Property {
                id: 2,
                slug: "modern-downtown-apartment".to_string(),
                title: "Modern Downtown Apartment".to_string(),
                property_type: PropertyType::Apartment,
                address: "456 Main Avenue, Unit 5B".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62702".to_string(),
                price: 1200,
                deposit: 1200,
                application_fee: 40,
                bedrooms: 2,
                bathrooms: 1.0,
                square_feet: 950,
                description: "Contemporary apartment in the heart of downtown with granite countertops, stainless steel appliances and in-unit laundry. Fitness center, rooftop terrace and secure entry.".to_string(),
                features: strings(&[
                    "Granite Countertops",
                    "Stainless Steel Appliances",
                    "In-Unit Laundry",
                    "Fitness Center",
                    "Rooftop Terrace",
                    "Secure Entry",
                ]),
                available: true,
                available_date: None,
                pet_friendly: true,
                pet_deposit: Some(250),
                pet_rent: Some(25),
                parking: "Underground Parking Available".to_string(),
                laundry: "In-Unit".to_string(),
                year_built: Some(2020),
                utilities: strings(&["Water", "Trash"]),
                lease_terms: strings(&["6 months", "12 months"]),
                featured: true,
                created_at: listed,
                updated_at: listed,
                images: vec![
                    image(2, 201, "photo-1502672260266-1c1ef2d93688", "Living area", RoomType::Living, 1),
                    image(2, 202, "photo-1560448204-e02f11c3d0e2", "Kitchen", RoomType::Kitchen, 2),
                    image(2, 203, "photo-1522708323590-d24dbb6b0267", "Living area at night", RoomType::Living, 3),
                    image(2, 204, "photo-1600585154340-be6161a56a0c", "Building exterior", RoomType::Exterior, 4),
                ],
            },
            Property {
                id: 3,
                slug: "charming-duplex-unit".to_string(),
                title: "Charming Duplex Unit".to_string(),
                property_type: PropertyType::Duplex,
                address: "789 Elm Street, Unit A".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62703".to_string(),
                price: 1450,
                deposit: 1450,
                application_fee: 40,
                bedrooms: 3,
                bathrooms: 2.0,
                square_feet: 1400,
                description: "Well-maintained duplex unit with a private entrance, updated bathrooms, eat-in kitchen and private backyard space. Recently renovated with new flooring and modern fixtures.".to_string(),
                features: strings(&[
                    "Private Entrance",
                    "Updated Bathrooms",
                    "Eat-In Kitchen",
                    "Private Backyard",
                    "Recently Renovated",
                    "Dedicated Parking",
                ]),
                available: true,
                available_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                pet_friendly: false,
                pet_deposit: None,
                pet_rent: None,
                parking: "Driveway - 1 Space".to_string(),
                laundry: "In-Unit".to_string(),
                year_built: Some(1998),
                utilities: strings(&["Trash", "Lawn Care"]),
                lease_terms: strings(&["12 months"]),
                featured: false,
                created_at: listed,
                updated_at: listed,
                images: vec![
                    image(3, 301, "photo-1600047509807-ba8f99d2cdde", "Street view", RoomType::Exterior, 1),
                    image(3, 302, "photo-1600566753086-00f18fb6b3ea", "Eat-in kitchen", RoomType::Kitchen, 2),
                    image(3, 303, "photo-1600585154526-990dced4db0d", "Updated bathroom", RoomType::Bathroom, 3),
                    image(3, 304, "photo-1600573472592-401b489a3cdc", "Private backyard", RoomType::Backyard, 4),
                ],
            },
            Property {
                id: 4,
                slug: "cozy-studio-apartment".to_string(),
                title: "Cozy Studio Apartment".to_string(),
                property_type: PropertyType::Apartment,
                address: "321 Park Boulevard, Unit 12".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62702".to_string(),
                price: 750,
                deposit: 750,
                application_fee: 30,
                bedrooms: 0,
                bathrooms: 1.0,
                square_feet: 450,
                description: "Efficient studio apartment with an open layout, separate kitchen area and large windows. Building laundry, bike storage and package lockers.".to_string(),
                features: strings(&[
                    "Large Windows",
                    "Modern Finishes",
                    "Separate Kitchen Area",
                    "Building Laundry",
                    "Bike Storage",
                    "Utilities Included",
                ]),
                available: true,
                available_date: None,
                pet_friendly: false,
                pet_deposit: None,
                pet_rent: None,
                parking: "Street Parking".to_string(),
                laundry: "Shared".to_string(),
                year_built: Some(2018),
                utilities: strings(&["Water", "Electric", "Gas", "Trash"]),
                lease_terms: strings(&["12 months"]),
                featured: false,
                created_at: listed,
                updated_at: listed,
                images: vec![
                    image(4, 401, "photo-1536376072261-38c75010e6c9", "Studio living space", RoomType::Living, 1),
                    image(4, 402, "photo-1600210492486-724fe5c67fb0", "Kitchen area", RoomType::Kitchen, 2),
                    image(4, 403, "photo-1600121848594-d8644e57abab", "Sleeping nook", RoomType::Bedroom, 3),
                    image(4, 404, "photo-1600566752355-35792bedcfea", "Bathroom", RoomType::Bathroom, 4),
                ],
            },
            Property {
                id: 5,
                slug: "executive-townhouse".to_string(),
                title: "Executive Townhouse".to_string(),
                property_type: PropertyType::House,
                address: "555 Maple Drive".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62704".to_string(),
                price: 2400,
                deposit: 2400,
                application_fee: 50,
                bedrooms: 3,
                bathrooms: 2.5,
                square_feet: 1800,
                description: "Elegant townhouse in a prestigious community with high ceilings, a chef's kitchen and a private patio. Community pool, clubhouse and fitness center.".to_string(),
                features: strings(&[
                    "High Ceilings",
                    "Crown Molding",
                    "Chef's Kitchen",
                    "Private Patio",
                    "Community Pool",
                    "HOA Maintained",
                ]),
                available: false,
                available_date: None,
                pet_friendly: true,
                pet_deposit: Some(400),
                pet_rent: None,
                parking: "Attached Garage".to_string(),
                laundry: "In-Unit".to_string(),
                year_built: Some(2019),
                utilities: strings(&["Trash", "Lawn Care", "Snow Removal"]),
                lease_terms: strings(&["12 months", "24 months"]),
                featured: true,
                created_at: listed,
                updated_at: listed,
                images: vec![
                    image(5, 501, "photo-1600596542815-ffad4c1539a9", "Townhouse front", RoomType::Exterior, 1),
                    image(5, 502, "photo-1600607687644-aac4c3eac7f4", "Living room", RoomType::Living, 2),
                    image(5, 503, "photo-1600585154340-be6161a56a0c", "Chef's kitchen", RoomType::Kitchen, 3),
                    image(5, 504, "photo-1600047509782-20d39509f26d", "Attached garage", RoomType::Garage, 4),
                ],
            },
            Property {
                id: 6,
                slug: "garden-level-apartment".to_string(),
                title: "Garden Level Apartment".to_string(),
                property_type: PropertyType::Apartment,
                address: "888 River Road, Unit G1".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                price: 950,
                deposit: 950,
                application_fee: 30,
                bedrooms: 1,
                bathrooms: 1.0,
                square_feet: 700,
                description: "Quiet garden-level apartment with private patio access, new appliances and luxury vinyl flooring. Easy access to walking trails and parks.".to_string(),
                features: strings(&[
                    "Private Patio",
                    "New Appliances",
                    "Luxury Vinyl Flooring",
                    "Near Walking Trails",
                    "Updated Interior",
                ]),
                available: true,
                available_date: NaiveDate::from_ymd_opt(2024, 2, 15),
                pet_friendly: true,
                pet_deposit: Some(200),
                pet_rent: Some(25),
                parking: "Assigned Parking Space".to_string(),
                laundry: "Shared".to_string(),
                year_built: Some(2005),
                utilities: strings(&["Water", "Trash"]),
                lease_terms: strings(&["6 months", "12 months"]),
                featured: true,
                created_at: listed,
                updated_at: listed,
                images: vec![
                    image(6, 601, "photo-1600585154526-990dced4db0d", "Living room", RoomType::Living, 1),
                    image(6, 602, "photo-1600566752229-250ed79470f8", "Kitchen", RoomType::Kitchen, 2),
                    image(6, 603, "photo-1600210491892-03d54c0aaf87", "Bedroom", RoomType::Bedroom, 3),
                    image(6, 604, "photo-1600585152220-90363fe7e115", "Patio", RoomType::Other, 4),
                ],
            },
        ]
    }
}

#[async_trait]
impl CatalogSource for SampleCatalog {
    async fn fetch(&self) -> Result<Vec<Property>> {
        let properties = Self::properties();
        info!("📋 Serving {} built-in sample properties", properties.len());
        Ok(properties)
    }

    fn source_name(&self) -> &'static str {
        "sample"
    }
}

fn listed_at() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn image(
    property_id: i64,
    id: i64,
    photo: &str,
    caption: &str,
    room: RoomType,
    display_order: i32,
) -> PropertyImage {
    PropertyImage {
        id,
        property_id,
        url: format!("https://images.unsplash.com/{photo}?w=800"),
        caption: caption.to_string(),
        room,
        display_order,
        created_at: listed_at(),
    }
}
