//! Read-only queries over a catalog snapshot.
//!
//! Everything here is a pure function of the slice it is handed, so any
//! number of requests can run these concurrently against one snapshot.

use crate::catalog::types::{lenient_int, FilterCriteria};
use crate::error::CatalogError;
use crate::models::{Property, PropertyImage, RoomType};
use serde::Serialize;

/// Room filter value that selects every image
pub const ALL_ROOMS: &str = "all";

/// How many available properties stand in when nothing is featured
pub const FEATURED_FALLBACK_COUNT: usize = 3;

pub fn find_by_slug<'a>(catalog: &'a [Property], slug: &str) -> Result<&'a Property, CatalogError> {
    catalog
        .iter()
        .find(|p| p.slug == slug)
        .ok_or(CatalogError::NotFound)
}

/// Every property matching all present criteria, in catalog order
pub fn filter<'a>(catalog: &'a [Property], criteria: &FilterCriteria) -> Vec<&'a Property> {
    catalog.iter().filter(|p| matches(p, criteria)).collect()
}

fn matches(property: &Property, criteria: &FilterCriteria) -> bool {
    if let Some(category) = &criteria.category {
        if property.property_type.as_str() != category {
            return false;
        }
    }

    if let Some(min) = criteria.min_price {
        if property.price < min {
            return false;
        }
    }

    if let Some(max) = criteria.max_price {
        if property.price > max {
            return false;
        }
    }

    if let Some(beds) = criteria.min_bedrooms {
        if i64::from(property.bedrooms) < beds {
            return false;
        }
    }

    true
}

/// Featured and available properties, or the first few available ones when
/// none are featured. Empty only when nothing is available.
pub fn featured(catalog: &[Property]) -> Vec<&Property> {
    let primary: Vec<&Property> = catalog
        .iter()
        .filter(|p| p.featured && p.available)
        .collect();

    if !primary.is_empty() {
        return primary;
    }

    catalog
        .iter()
        .filter(|p| p.available)
        .take(FEATURED_FALLBACK_COUNT)
        .collect()
}

/// Images of one room, or all of them for `None`, `""` or `"all"`.
/// A room name that matches no category selects nothing.
pub fn images_for_room<'a>(property: &'a Property, room: Option<&str>) -> Vec<&'a PropertyImage> {
    match room {
        None | Some("") | Some(ALL_ROOMS) => property.images.iter().collect(),
        Some(name) => match name.parse::<RoomType>() {
            Ok(room) => property.images.iter().filter(|i| i.room == room).collect(),
            Err(_) => Vec::new(),
        },
    }
}

/// Distinct room categories in first-seen order
pub fn unique_rooms(property: &Property) -> Vec<RoomType> {
    let mut rooms = Vec::new();
    for image in &property.images {
        if !rooms.contains(&image.room) {
            rooms.push(image.room);
        }
    }
    rooms
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub room: &'a str,
    pub rooms: Vec<RoomType>,
    pub images: Vec<&'a PropertyImage>,
    pub index: usize,
}

/// Gallery for `slug`. The start index falls back to 0 when it is missing,
/// unparsable or outside the selected images.
pub fn gallery<'a>(
    catalog: &'a [Property],
    slug: &str,
    room: Option<&'a str>,
    index: Option<&str>,
) -> Result<GalleryView<'a>, CatalogError> {
    let property = find_by_slug(catalog, slug)?;
    let images = images_for_room(property, room);

    let index = lenient_int(index)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| *i < images.len())
        .unwrap_or(0);

    Ok(GalleryView {
        slug: &property.slug,
        title: &property.title,
        room: room.filter(|r| !r.is_empty()).unwrap_or(ALL_ROOMS),
        rooms: unique_rooms(property),
        images,
        index,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption<'a> {
    pub slug: &'a str,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPageView<'a> {
    pub properties: Vec<PropertyOption<'a>>,
    pub selected: Option<&'a Property>,
}

/// Property picker for the contact form, preselecting `slug` when it exists
pub fn contact_page<'a>(catalog: &'a [Property], slug: Option<&str>) -> ContactPageView<'a> {
    let selected = slug
        .filter(|s| !s.is_empty())
        .and_then(|s| find_by_slug(catalog, s).ok());

    ContactPageView {
        properties: catalog
            .iter()
            .map(|p| PropertyOption {
                slug: &p.slug,
                title: &p.title,
            })
            .collect(),
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::FilterParams;
    use crate::catalog::SampleCatalog;
    use crate::models::PropertyType;

    fn two_listing_catalog() -> Vec<Property> {
        let mut a = SampleCatalog::properties().remove(0);
        a.slug = "a".to_string();
        a.price = 1000;
        a.bedrooms = 2;
        a.available = true;
        a.featured = true;

        let mut b = SampleCatalog::properties().remove(1);
        b.slug = "b".to_string();
        b.price = 2000;
        b.bedrooms = 3;
        b.available = true;
        b.featured = false;

        vec![a, b]
    }

    fn slugs(properties: &[&Property]) -> Vec<String> {
        properties.iter().map(|p| p.slug.clone()).collect()
    }

    fn criteria(t: Option<&str>, min: Option<&str>, max: Option<&str>, beds: Option<&str>) -> FilterCriteria {
        FilterCriteria::from_params(&FilterParams {
            property_type: t.map(str::to_string),
            min_price: min.map(str::to_string),
            max_price: max.map(str::to_string),
            bedrooms: beds.map(str::to_string),
        })
    }

    #[test]
    fn two_listing_scenario() {
        let catalog = two_listing_catalog();

        let result = filter(&catalog, &criteria(None, Some("1500"), None, None));
        assert_eq!(slugs(&result), vec!["b"]);

        assert_eq!(find_by_slug(&catalog, "c"), Err(CatalogError::NotFound));
        assert_eq!(slugs(&featured(&catalog)), vec!["a"]);
    }

    #[test]
    fn filter_is_conjunction_of_predicates() {
        let catalog = SampleCatalog::properties();
        let combos = [
            (Some("house"), Some("1000"), None, None),
            (Some("apartment"), None, Some("1000"), None),
            (None, Some("900"), Some("1500"), Some("1")),
            (Some("duplex"), None, None, Some("3")),
            (None, None, None, Some("0")),
        ];

        for (t, min, max, beds) in combos {
            let c = criteria(t, min, max, beds);
            let expected: Vec<&Property> = catalog
                .iter()
                .filter(|p| c.category.as_deref().map_or(true, |t| p.property_type.as_str() == t))
                .filter(|p| c.min_price.map_or(true, |m| p.price >= m))
                .filter(|p| c.max_price.map_or(true, |m| p.price <= m))
                .filter(|p| c.min_bedrooms.map_or(true, |b| i64::from(p.bedrooms) >= b))
                .collect();
            assert_eq!(slugs(&filter(&catalog, &c)), slugs(&expected));
        }

        let houses = filter(&catalog, &criteria(Some("house"), Some("1000"), None, None));
        assert_eq!(
            slugs(&houses),
            vec!["spacious-family-home", "executive-townhouse"]
        );
        assert!(houses.iter().all(|p| p.property_type == PropertyType::House && p.price >= 1000));
    }

    #[test]
    fn bounds_are_inclusive() {
        let catalog = SampleCatalog::properties();
        let exact = filter(&catalog, &criteria(None, Some("1200"), Some("1200"), None));
        assert_eq!(slugs(&exact), vec!["modern-downtown-apartment"]);

        let beds = filter(&catalog, &criteria(None, None, None, Some("4")));
        assert_eq!(slugs(&beds), vec!["spacious-family-home"]);
    }

    #[test]
    fn malformed_numbers_behave_like_absent() {
        let catalog = SampleCatalog::properties();
        let absent = filter(&catalog, &criteria(Some("apartment"), None, None, None));

        for junk in ["abc", "12.5", "", " 100", "1e3"] {
            let c = criteria(Some("apartment"), Some(junk), Some(junk), Some(junk));
            assert_eq!(slugs(&filter(&catalog, &c)), slugs(&absent), "input {junk:?}");
        }
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let catalog = SampleCatalog::properties();
        assert!(filter(&catalog, &criteria(Some("castle"), None, None, None)).is_empty());
    }

    #[test]
    fn filter_without_criteria_returns_catalog_order() {
        let catalog = SampleCatalog::properties();
        let all = filter(&catalog, &FilterCriteria::default());
        assert_eq!(all.len(), catalog.len());
        assert_eq!(all[5].slug, "garden-level-apartment");
    }

    #[test]
    fn featured_prefers_featured_and_available() {
        let catalog = SampleCatalog::properties();
        // executive-townhouse is featured but not available
        assert_eq!(
            slugs(&featured(&catalog)),
            vec![
                "spacious-family-home",
                "modern-downtown-apartment",
                "garden-level-apartment"
            ]
        );
    }

    #[test]
    fn featured_falls_back_to_first_three_available() {
        let mut catalog = SampleCatalog::properties();
        for p in &mut catalog {
            p.featured = false;
        }
        catalog[0].available = false;

        assert_eq!(
            slugs(&featured(&catalog)),
            vec![
                "modern-downtown-apartment",
                "charming-duplex-unit",
                "cozy-studio-apartment"
            ]
        );
    }

    #[test]
    fn featured_fallback_returns_fewer_when_scarce() {
        let mut catalog = SampleCatalog::properties();
        for p in &mut catalog {
            p.featured = false;
            p.available = false;
        }
        assert!(featured(&catalog).is_empty());

        catalog[4].available = true;
        assert_eq!(slugs(&featured(&catalog)), vec!["executive-townhouse"]);
    }

    #[test]
    fn all_rooms_equals_full_image_list() {
        let catalog = SampleCatalog::properties();
        for property in &catalog {
            let full: Vec<&PropertyImage> = property.images.iter().collect();
            assert_eq!(images_for_room(property, Some(ALL_ROOMS)), full);
            assert_eq!(images_for_room(property, None), full);
        }
    }

    #[test]
    fn room_filter_keeps_display_order() {
        let catalog = SampleCatalog::properties();
        let apartment = find_by_slug(&catalog, "modern-downtown-apartment").unwrap();

        let living: Vec<i64> = images_for_room(apartment, Some("living"))
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(living, vec![201, 203]);
        assert!(images_for_room(apartment, Some("garage")).is_empty());
        assert!(images_for_room(apartment, Some("attic")).is_empty());
    }

    #[test]
    fn unique_rooms_in_first_seen_order() {
        let catalog = SampleCatalog::properties();
        let apartment = find_by_slug(&catalog, "modern-downtown-apartment").unwrap();
        assert_eq!(
            unique_rooms(apartment),
            vec![RoomType::Living, RoomType::Kitchen, RoomType::Exterior]
        );
    }

    #[test]
    fn gallery_clamps_index() {
        let catalog = SampleCatalog::properties();

        let view = gallery(&catalog, "spacious-family-home", None, Some("3")).unwrap();
        assert_eq!(view.index, 3);
        assert_eq!(view.images.len(), 5);
        assert_eq!(view.room, ALL_ROOMS);

        for bad in ["5", "-1", "x"] {
            let view = gallery(&catalog, "spacious-family-home", None, Some(bad)).unwrap();
            assert_eq!(view.index, 0, "index {bad:?}");
        }

        let view = gallery(&catalog, "spacious-family-home", Some("kitchen"), Some("1")).unwrap();
        assert_eq!(view.images.len(), 1);
        assert_eq!(view.index, 0);
        assert_eq!(view.room, "kitchen");

        assert!(matches!(
            gallery(&catalog, "nope", None, None),
            Err(CatalogError::NotFound)
        ));
    }

    #[test]
    fn contact_page_preselects_known_slug() {
        let catalog = SampleCatalog::properties();

        let view = contact_page(&catalog, Some("charming-duplex-unit"));
        assert_eq!(view.properties.len(), 6);
        assert_eq!(view.selected.map(|p| p.id), Some(3));

        assert!(contact_page(&catalog, Some("missing")).selected.is_none());
        assert!(contact_page(&catalog, None).selected.is_none());
    }
}
