//! Markup snapshot → ordered `LocationRecord` sequence.
//!
//! Pure read of the snapshot; malformed or missing fields never error, they
//! degrade to the documented defaults (empty string, `false`, absent
//! coordinate).

use listmap_core::{Address, Coordinate, LocationRecord, Selectors};

use crate::markup;

/// Field names carried in the selector attribute, fixed by the host markup
/// contract.
const FIELD_LATLONG: &str = "latlong";
const FIELD_ID: &str = "id";
const FIELD_PREMIUM: &str = "premium";
const FIELD_COUNTRY: &str = "country";
const FIELD_STATE: &str = "state";
const FIELD_CITY: &str = "city";

/// Extract one record per item element, in document order.
///
/// Items are matched document-wide by item class; the container class only
/// matters for change observation, not extraction.
#[must_use]
pub fn extract_records(html: &str, selectors: &Selectors) -> Vec<LocationRecord> {
    markup::elements_with_class(html, &selectors.item_class)
        .into_iter()
        .map(|item| extract_record(item.inner, selectors))
        .collect()
}

fn extract_record(item_html: &str, selectors: &Selectors) -> LocationRecord {
    let title = markup::first_with_class(item_html, &selectors.title_class)
        .map(|frag| markup::text_content(frag.inner))
        .unwrap_or_default();

    let image_url = markup::first_with_class(item_html, &selectors.image_class)
        .and_then(|frag| markup::attr_value(frag.open_tag, "src"))
        .unwrap_or_default();

    let coordinate =
        field_text(item_html, selectors, FIELD_LATLONG).and_then(|text| parse_coordinate(&text));

    let id = field_text(item_html, selectors, FIELD_ID).unwrap_or_default();

    let is_premium = field_text(item_html, selectors, FIELD_PREMIUM)
        .is_some_and(|text| text.eq_ignore_ascii_case("true"));

    let address = Address {
        country: field_text(item_html, selectors, FIELD_COUNTRY).unwrap_or_default(),
        state: field_text(item_html, selectors, FIELD_STATE).unwrap_or_default(),
        city: field_text(item_html, selectors, FIELD_CITY).unwrap_or_default(),
    };

    LocationRecord {
        id,
        title,
        image_url,
        coordinate,
        is_premium,
        address,
    }
}

/// Trimmed text of the first sub-element tagged with the given field name,
/// or `None` when the field is absent.
fn field_text(item_html: &str, selectors: &Selectors, field: &str) -> Option<String> {
    markup::first_with_attr(item_html, &selectors.field_attr, field)
        .map(|frag| markup::text_content(frag.inner))
}

/// Parse a `"<lat>,<lng>"` field. Split on the FIRST comma, trim both
/// halves, parse both as `f64`. Any failure yields `None` — both halves
/// parse or neither does, never a partial coordinate.
///
/// Non-finite values are rejected: `f64::parse` accepts `"NaN"` and
/// `"inf"`, but those are not coordinates (and a NaN position would defeat
/// both the idempotence check and bounds fitting downstream).
fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let (lat_text, lng_text) = text.split_once(',')?;
    let lat = parse_finite(lat_text)?;
    let lng = parse_finite(lng_text)?;
    Some(Coordinate { lat, lng })
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
