//! Google Maps search links for nearby specialists.

use serde::{Deserialize, Serialize};

use super::Condition;

const MAPS_SEARCH: &str = "https://www.google.com/maps/search/";
const MAPS_EMBED: &str = "https://www.google.com/maps?q=";

/// Specialist to consult for a condition key; unknown keys get a plain doctor.
pub fn specialist_for(condition: &str) -> &'static str {
    match condition.parse::<Condition>() {
        Ok(c) => c.specialist(),
        Err(_) => "doctor",
    }
}

impl Condition {
    pub fn specialist(&self) -> &'static str {
        match self {
            Self::Heart => "cardiologist",
            Self::Diabetes => "endocrinologist",
            Self::Lungs => "pulmonologist",
            Self::Parkinsons => "neurologist",
            Self::Thyroid => "endocrinologist",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceRange {
    #[default]
    #[serde(rename = "within_5_km", alias = "Within 5 km")]
    Within5Km,
    #[serde(rename = "within_10_km", alias = "Within 10 km")]
    Within10Km,
    #[serde(rename = "within_20_km", alias = "Within 20 km")]
    Within20Km,
}

impl DistanceRange {
    pub const ALL: [DistanceRange; 3] = [
        DistanceRange::Within5Km,
        DistanceRange::Within10Km,
        DistanceRange::Within20Km,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Within5Km => "Within 5 km",
            Self::Within10Km => "Within 10 km",
            Self::Within20Km => "Within 20 km",
        }
    }

    /// Phrase appended to the search query.
    pub fn query(&self) -> &'static str {
        match self {
            Self::Within5Km => "near me",
            Self::Within10Km => "within 10 km",
            Self::Within20Km => "within 20 km",
        }
    }
}

/// Search links for one specialist around one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorLinks {
    pub specialist: &'static str,
    pub city: String,
    pub state: String,
    pub distance: DistanceRange,
    pub doctors: String,
    pub hospitals: String,
    pub top_doctors: String,
    pub top_hospitals: String,
    /// `src` for an embedded map iframe.
    pub embed: String,
}

/// Build the links, or `None` unless both city and state are given.
pub fn doctor_links(
    condition: &str,
    city: &str,
    state: &str,
    distance: DistanceRange,
) -> Option<DoctorLinks> {
    let (city, state) = (city.trim(), state.trim());
    if city.is_empty() || state.is_empty() {
        return None;
    }

    let specialist = specialist_for(condition);
    let near = distance.query();
    let near_q = quote_plus(near);
    let location = quote_plus(&format!("{city} {state}"));

    Some(DoctorLinks {
        specialist,
        city: city.to_string(),
        state: state.to_string(),
        distance,
        doctors: format!("{MAPS_SEARCH}{specialist}+doctor+{near_q}+in+{location}"),
        hospitals: format!("{MAPS_SEARCH}{specialist}+hospital+{near_q}+in+{location}"),
        top_doctors: format!(
            "{MAPS_SEARCH}{}",
            quote_plus(&format!("top rated {specialist} doctor {near} in {city} {state}"))
        ),
        top_hospitals: format!(
            "{MAPS_SEARCH}{}",
            quote_plus(&format!("top rated {specialist} hospital {near} in {city} {state}"))
        ),
        embed: format!(
            "{MAPS_EMBED}{}&output=embed",
            quote_plus(&format!("{specialist} doctor {city} {state}"))
        ),
    })
}

/// Form-style URL encoding: unreserved bytes pass through, space becomes
/// `+`, everything else is `%XX` over its UTF-8 bytes.
pub fn quote_plus(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialist_map() {
        assert_eq!(specialist_for("heart"), "cardiologist");
        assert_eq!(specialist_for("diabetes"), "endocrinologist");
        assert_eq!(specialist_for("lungs"), "pulmonologist");
        assert_eq!(specialist_for("parkinsons"), "neurologist");
        assert_eq!(specialist_for("thyroid"), "endocrinologist");
        assert_eq!(specialist_for("kidney"), "doctor");
    }

    #[test]
    fn quote_plus_encodes_like_form_data() {
        assert_eq!(quote_plus("New Delhi India"), "New+Delhi+India");
        assert_eq!(quote_plus("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(quote_plus("São Paulo"), "S%C3%A3o+Paulo");
        assert_eq!(quote_plus("safe-_.~"), "safe-_.~");
    }

    #[test]
    fn doctor_links_follow_maps_search_format() {
        let links = doctor_links("heart", "Delhi", "India", DistanceRange::Within5Km).unwrap();
        assert_eq!(links.specialist, "cardiologist");
        assert_eq!(
            links.doctors,
            "https://www.google.com/maps/search/cardiologist+doctor+near+me+in+Delhi+India"
        );
        assert_eq!(
            links.hospitals,
            "https://www.google.com/maps/search/cardiologist+hospital+near+me+in+Delhi+India"
        );
        assert_eq!(
            links.top_doctors,
            "https://www.google.com/maps/search/top+rated+cardiologist+doctor+near+me+in+Delhi+India"
        );
        assert_eq!(
            links.embed,
            "https://www.google.com/maps?q=cardiologist+doctor+Delhi+India&output=embed"
        );
    }

    #[test]
    fn distance_phrase_used_in_links() {
        let links =
            doctor_links("thyroid", "Pune", "Maharashtra", DistanceRange::Within20Km).unwrap();
        assert!(links.hospitals.contains("+within+20+km+"));
        assert!(links
            .top_hospitals
            .ends_with("top+rated+endocrinologist+hospital+within+20+km+in+Pune+Maharashtra"));
    }

    #[test]
    fn missing_location_yields_no_links() {
        assert!(doctor_links("heart", "", "India", DistanceRange::Within5Km).is_none());
        assert!(doctor_links("heart", "Delhi", "  ", DistanceRange::Within5Km).is_none());
    }

    #[test]
    fn distance_accepts_picker_labels() {
        let d: DistanceRange = serde_json::from_str("\"Within 10 km\"").unwrap();
        assert_eq!(d, DistanceRange::Within10Km);
        let d: DistanceRange = serde_json::from_str("\"within_20_km\"").unwrap();
        assert_eq!(d, DistanceRange::Within20Km);
    }
}
